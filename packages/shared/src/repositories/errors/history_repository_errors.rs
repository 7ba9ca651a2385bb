#[derive(Debug)]
pub enum HistoryRepositoryError {
    Serialization(String),
    DynamoDb(String),
    /// An outcome with this id already exists. The log is append-only, so a
    /// replayed write is reported rather than overwriting.
    AlreadyRecorded,
}

impl std::fmt::Display for HistoryRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            HistoryRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            HistoryRepositoryError::AlreadyRecorded => {
                write!(f, "Outcome already recorded")
            }
        }
    }
}

impl std::error::Error for HistoryRepositoryError {}
