use serde::{Deserialize, Serialize};

use crate::models::session_state::{Choice, PromptMode};

/// Player intents fed to the state machine. Wrong-kind actions are rejected
/// with `WrongPhase`, never matched loosely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    /// Truth-or-dare: chooser picks the card flavor; draws the card.
    SelectMode { mode: PromptMode },
    /// Tonight's-plans: chooser draws the next suggestion.
    SuggestPlan,
    /// Flag the acting user ready for the card on the table.
    MarkReady,
    /// Consume the current card once both partners are ready.
    AdvanceCard,
    /// Two-truths: creator submits the statements and which one is the lie.
    SubmitStatements {
        statements: [String; 3],
        lie_index: u8,
    },
    /// Two-truths: guessing partner commits a guess, exactly once.
    SubmitGuess { guess: u8 },
    /// Two-truths: show the lie. Idempotent.
    Reveal,
    /// This-or-that: answer one question, once per user per index.
    SubmitAnswer { question_index: u32, choice: Choice },
    /// Quiz: answer one question, once per user per index.
    SubmitQuizAnswer { question_index: u32, option: u8 },
    EndGame,
}

/// Expected, recoverable outcomes of normal dual-client play. These are
/// values, not errors; callers render or ignore them and never crash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum Rejection {
    NotYourTurn,
    WrongPhase { detail: String },
}

impl Rejection {
    pub fn wrong_phase(detail: &str) -> Self {
        Rejection::WrongPhase {
            detail: detail.to_string(),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotYourTurn => write!(f, "not your turn"),
            Rejection::WrongPhase { detail } => write!(f, "wrong phase: {}", detail),
        }
    }
}
