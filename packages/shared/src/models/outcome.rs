use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::game_session::GameKind;

/// Immutable, append-only record of a finished round. The only thing that
/// survives a consumed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Equal to the session id it was derived from, which makes recording
    /// idempotent across a crash-and-replay of `consume_terminal`.
    pub outcome_id: String,
    pub partner_link_id: String,
    pub game_kind: GameKind,
    pub played_by: Vec<String>,
    pub score: Option<i32>,
    pub details: serde_json::Value,
    pub completed_at: DateTime<Utc>,
}

impl GameOutcome {
    pub fn new(
        session_id: &str,
        partner_link_id: &str,
        game_kind: GameKind,
        played_by: Vec<String>,
        score: Option<i32>,
        details: serde_json::Value,
    ) -> Self {
        GameOutcome {
            outcome_id: session_id.to_string(),
            partner_link_id: partner_link_id.to_string(),
            game_kind,
            played_by,
            score,
            details,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_creation() {
        let outcome = GameOutcome::new(
            "session-1",
            "link-1",
            GameKind::TwoTruthsOneLie,
            vec!["alice".to_string(), "bob".to_string()],
            Some(0),
            json!({"guessed_correctly": false, "fooled_partner": true}),
        );

        assert_eq!(outcome.outcome_id, "session-1");
        assert_eq!(outcome.partner_link_id, "link-1");
        assert_eq!(outcome.played_by.len(), 2);
        assert_eq!(outcome.details["fooled_partner"], json!(true));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = GameOutcome::new(
            "session-2",
            "link-1",
            GameKind::ThisOrThat,
            vec!["alice".to_string(), "bob".to_string()],
            Some(67),
            json!({"compatibility": 67}),
        );

        let serialized = serde_json::to_string(&outcome).unwrap();
        let deserialized: GameOutcome = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.outcome_id, outcome.outcome_id);
        assert_eq!(deserialized.score, Some(67));
    }
}
