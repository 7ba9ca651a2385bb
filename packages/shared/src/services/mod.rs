pub mod coordinator;
pub mod errors;
pub mod notification_service;
pub mod prompt_service;
pub mod rules;
