use serde::{Deserialize, Serialize};

use crate::models::{action::Rejection, game_session::GameSession};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: GameSession,
}

/// Outcome of applying an action. Rejections are expected results of normal
/// dual-client play, so they ride in a 200 body instead of an error status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplyResponse {
    Accepted { session: GameSession },
    Rejected { rejection: Rejection },
}
