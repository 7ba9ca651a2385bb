use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::session_state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    TruthOrDare,
    TwoTruthsOneLie,
    ThisOrThat,
    TonightsPlans,
    QuizGame,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::TruthOrDare => "truth_or_dare",
            GameKind::TwoTruthsOneLie => "two_truths_one_lie",
            GameKind::ThisOrThat => "this_or_that",
            GameKind::TonightsPlans => "tonights_plans",
            GameKind::QuizGame => "quiz_game",
        }
    }
}

/// The single live, mutable record for one in-progress mini-game round.
///
/// `state`, `readiness`, `current_index` and `version` always travel together
/// in one record so a reader can never observe readiness for a newer card
/// than the state it fetched. Writers replace the whole record through a
/// version-checked conditional put; see `SessionRepository::replace_session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: String,
    pub partner_link_id: String,
    /// `partner_link_id#game_kind`, the GSI key enforcing the
    /// one-live-session-per-kind lookup.
    pub live_key: String,
    pub game_kind: GameKind,
    pub started_by: String,
    pub partner_a: String,
    pub partner_b: String,
    pub state: SessionState,
    pub readiness: HashMap<String, bool>,
    pub current_index: u32,
    pub spicy: bool,
    /// Monotonically increasing write counter; stale replaces are rejected.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn live_key(partner_link_id: &str, game_kind: GameKind) -> String {
    format!("{}#{}", partner_link_id, game_kind.as_str())
}

impl GameSession {
    pub fn new(
        partner_link_id: &str,
        game_kind: GameKind,
        started_by: &str,
        partner: &str,
        state: SessionState,
        spicy: bool,
    ) -> Self {
        let now = Utc::now();
        let mut readiness = HashMap::new();
        readiness.insert(started_by.to_string(), false);
        readiness.insert(partner.to_string(), false);

        GameSession {
            session_id: Uuid::new_v4().to_string(),
            partner_link_id: partner_link_id.to_string(),
            live_key: live_key(partner_link_id, game_kind),
            game_kind,
            started_by: started_by.to_string(),
            partner_a: started_by.to_string(),
            partner_b: partner.to_string(),
            state,
            readiness,
            current_index: 0,
            spicy,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_participant(&self, user_id: &str) -> bool {
        self.partner_a == user_id || self.partner_b == user_id
    }

    /// The other half of the partnership, if `user_id` is a participant.
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        if self.partner_a == user_id {
            Some(&self.partner_b)
        } else if self.partner_b == user_id {
            Some(&self.partner_a)
        } else {
            None
        }
    }

    pub fn is_ready(&self, user_id: &str) -> bool {
        self.readiness.get(user_id).copied().unwrap_or(false)
    }

    pub fn both_ready(&self) -> bool {
        self.is_ready(&self.partner_a) && self.is_ready(&self.partner_b)
    }

    pub fn mark_ready(&mut self, user_id: &str) {
        self.readiness.insert(user_id.to_string(), true);
    }

    pub fn reset_readiness(&mut self) {
        self.readiness.insert(self.partner_a.clone(), false);
        self.readiness.insert(self.partner_b.clone(), false);
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}
