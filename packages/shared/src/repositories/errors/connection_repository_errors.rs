#[derive(Debug)]
pub enum ConnectionRepositoryError {
    DynamoDb(String),
    Push(String),
}

impl std::fmt::Display for ConnectionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            ConnectionRepositoryError::Push(msg) => write!(f, "Push delivery error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectionRepositoryError {}
