use crate::repositories::errors::history_repository_errors::HistoryRepositoryError;
use crate::repositories::errors::session_repository_errors::SessionRepositoryError;

#[derive(Debug)]
pub enum CoordinatorError {
    SessionNotFound,
    /// The automatic refetch-and-retry also lost its race; the caller must
    /// re-read and decide, instead of the coordinator retrying forever.
    Conflict,
    Validation(String),
    Repository(SessionRepositoryError),
    History(HistoryRepositoryError),
}

impl std::fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinatorError::SessionNotFound => write!(f, "Session not found"),
            CoordinatorError::Conflict => {
                write!(f, "Session changed concurrently, please try again")
            }
            CoordinatorError::Validation(msg) => write!(f, "Validation error: {}", msg),
            CoordinatorError::Repository(err) => write!(f, "Repository error: {}", err),
            CoordinatorError::History(err) => write!(f, "History error: {}", err),
        }
    }
}

impl std::error::Error for CoordinatorError {}

impl From<SessionRepositoryError> for CoordinatorError {
    fn from(err: SessionRepositoryError) -> Self {
        CoordinatorError::Repository(err)
    }
}

impl From<HistoryRepositoryError> for CoordinatorError {
    fn from(err: HistoryRepositoryError) -> Self {
        CoordinatorError::History(err)
    }
}
