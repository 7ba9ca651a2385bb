pub mod connection_repository;
pub mod errors;
pub mod history_repository;
pub mod session_repository;
