pub mod connection_repository_errors;
pub mod history_repository_errors;
pub mod session_repository_errors;
