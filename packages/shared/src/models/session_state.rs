use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Truth-or-dare card flavor picked by the current chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptMode {
    Truth,
    Dare,
}

/// Answer to a this-or-that question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

/// Round phase for the initiator-advantage card games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum CardPhase {
    /// The chooser has not picked the next card yet.
    Choosing,
    /// A card is on the table; both partners must mark ready before it can
    /// be consumed and the next one drawn.
    AwaitingBothReady { prompt: String },
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthOrDareState {
    /// User expected to pick the next card; alternates per consumed card.
    pub chooser: String,
    pub mode: Option<PromptMode>,
    pub phase: CardPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TonightsPlansState {
    pub chooser: String,
    pub phase: CardPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoTruthsOneLieState {
    /// Set once by the creator, immutable afterwards.
    pub statements: Option<[String; 3]>,
    pub lie_index: Option<u8>,
    /// Set exactly once by the guessing partner.
    pub guess: Option<u8>,
    pub revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThisOrThatState {
    /// question index -> user id -> answer. One answer per user per question.
    pub answers: BTreeMap<u32, BTreeMap<String, Choice>>,
    pub total_questions: u32,
    pub ended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizState {
    /// Correct option per question, fixed at session creation.
    pub answer_key: Vec<u8>,
    /// question index -> user id -> chosen option.
    pub responses: BTreeMap<u32, BTreeMap<String, u8>>,
    pub total_questions: u32,
    pub ended: bool,
}

/// Closed per-kind session state union. The state machine matches on this
/// exhaustively, so adding a game kind is a compiler-checked extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game")]
pub enum SessionState {
    TruthOrDare(TruthOrDareState),
    TwoTruthsOneLie(TwoTruthsOneLieState),
    ThisOrThat(ThisOrThatState),
    TonightsPlans(TonightsPlansState),
    Quiz(QuizState),
}

impl TruthOrDareState {
    pub fn new(chooser: &str) -> Self {
        TruthOrDareState {
            chooser: chooser.to_string(),
            mode: None,
            phase: CardPhase::Choosing,
        }
    }
}

impl TonightsPlansState {
    pub fn new(chooser: &str) -> Self {
        TonightsPlansState {
            chooser: chooser.to_string(),
            phase: CardPhase::Choosing,
        }
    }
}

impl TwoTruthsOneLieState {
    pub fn new() -> Self {
        TwoTruthsOneLieState {
            statements: None,
            lie_index: None,
            guess: None,
            revealed: false,
        }
    }
}

impl Default for TwoTruthsOneLieState {
    fn default() -> Self {
        Self::new()
    }
}

impl ThisOrThatState {
    pub fn new(total_questions: u32) -> Self {
        ThisOrThatState {
            answers: BTreeMap::new(),
            total_questions,
            ended: false,
        }
    }

    /// Count of questions answered by both partners.
    pub fn answered_by_both(&self) -> u32 {
        self.answers.values().filter(|per_user| per_user.len() >= 2).count() as u32
    }
}

impl QuizState {
    pub fn new(answer_key: Vec<u8>) -> Self {
        let total_questions = answer_key.len() as u32;
        QuizState {
            answer_key,
            responses: BTreeMap::new(),
            total_questions,
            ended: false,
        }
    }

    /// True once both partners have answered every question.
    pub fn all_answered(&self) -> bool {
        self.total_questions > 0
            && (0..self.total_questions)
                .all(|i| self.responses.get(&i).map(|per_user| per_user.len() >= 2).unwrap_or(false))
    }
}

impl SessionState {
    /// Terminal states are safe to silently discard on restart and are the
    /// only states `consume_terminal` accepts.
    pub fn is_terminal(&self) -> bool {
        match self {
            SessionState::TruthOrDare(s) => matches!(s.phase, CardPhase::Ended),
            SessionState::TonightsPlans(s) => matches!(s.phase, CardPhase::Ended),
            SessionState::TwoTruthsOneLie(s) => s.revealed,
            SessionState::ThisOrThat(s) => s.ended,
            SessionState::Quiz(s) => s.ended,
        }
    }
}
