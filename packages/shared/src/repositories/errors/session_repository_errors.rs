#[derive(Debug)]
pub enum SessionRepositoryError {
    Serialization(String),
    DynamoDb(String),
    /// The conditional replace lost a race: the stored record moved past the
    /// version this write was computed from.
    VersionConflict,
}

impl std::fmt::Display for SessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            SessionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            SessionRepositoryError::VersionConflict => {
                write!(f, "Session record changed since it was read")
            }
        }
    }
}

impl std::error::Error for SessionRepositoryError {}
