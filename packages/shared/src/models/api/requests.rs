use serde::{Deserialize, Serialize};

use crate::models::{action::GameAction, game_session::GameKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub partner_link_id: String,
    pub game_kind: GameKind,
    pub started_by: String,
    pub partner_id: String,
    #[serde(default)]
    pub spicy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub user_id: String,
    pub action: GameAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSessionQuery {
    pub partner_link_id: String,
    pub game_kind: GameKind,
}
