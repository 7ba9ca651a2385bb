pub mod coordinator_errors;
