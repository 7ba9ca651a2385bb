use rand::seq::SliceRandom;

#[cfg(test)]
use mockall::automock;

use crate::models::{game_session::GameKind, session_state::PromptMode};

/// A fixed quiz question pack: one correct option index per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPack {
    pub answer_key: Vec<u8>,
}

/// Read-only content pool consumed by the coordinator when a transition
/// needs a fresh card. Selection is uniformly random within the pool.
#[cfg_attr(test, automock)]
pub trait PromptProvider: Send + Sync {
    fn draw_prompt(&self, kind: GameKind, mode: Option<PromptMode>, spicy: bool) -> Option<String>;

    fn this_or_that_question_count(&self) -> u32;

    fn quiz_pack(&self) -> QuizPack;
}

const TRUTH_PROMPTS: &[&str] = &[
    "What was your first impression of me?",
    "What is one thing you have never told anyone?",
    "What song reminds you of us?",
    "What is your happiest memory from this year?",
    "What do you miss most about when we first met?",
];

const TRUTH_PROMPTS_SPICY: &[&str] = &[
    "Describe your favorite moment together, in detail",
    "What is something you have been too shy to ask for?",
    "Where is the most adventurous place you would say yes to?",
];

const DARE_PROMPTS: &[&str] = &[
    "Recreate the first photo you ever took together",
    "Let your partner pick your outfit tomorrow",
    "Cook your partner's favorite meal this week",
    "Write a two-line poem about your partner right now",
    "Do your best impression of your partner",
];

const DARE_PROMPTS_SPICY: &[&str] = &[
    "Give your partner a five-minute massage tonight",
    "Whisper something you have never said out loud",
    "Plan a surprise just for the two of you this week",
];

const PLAN_PROMPTS: &[&str] = &[
    "Cook dinner together with no phones allowed",
    "Take a night walk and pick out constellations",
    "Movie night, loser of a coin flip picks the snacks",
    "Build a blanket fort and order takeout",
    "Board game tournament, best of three",
];

const PLAN_PROMPTS_SPICY: &[&str] = &[
    "Candlelit dinner, dress up like it's a first date",
    "Slow dance to three songs in the living room",
];

const THIS_OR_THAT_QUESTION_COUNT: u32 = 10;

/// Answer key for the bundled couples quiz pack, one entry per question.
const QUIZ_ANSWER_KEY: &[u8] = &[0, 2, 1, 3, 0, 1, 2, 0];

/// Bundled content pools. Hosted packs plug in behind the same trait.
#[derive(Clone, Default)]
pub struct StaticPromptProvider;

impl StaticPromptProvider {
    pub fn new() -> Self {
        StaticPromptProvider
    }
}

impl PromptProvider for StaticPromptProvider {
    fn draw_prompt(&self, kind: GameKind, mode: Option<PromptMode>, spicy: bool) -> Option<String> {
        let pool: &[&str] = match (kind, mode) {
            (GameKind::TruthOrDare, Some(PromptMode::Truth)) => {
                if spicy {
                    TRUTH_PROMPTS_SPICY
                } else {
                    TRUTH_PROMPTS
                }
            }
            (GameKind::TruthOrDare, Some(PromptMode::Dare)) => {
                if spicy {
                    DARE_PROMPTS_SPICY
                } else {
                    DARE_PROMPTS
                }
            }
            (GameKind::TonightsPlans, _) => {
                if spicy {
                    PLAN_PROMPTS_SPICY
                } else {
                    PLAN_PROMPTS
                }
            }
            _ => return None,
        };

        let mut rng = rand::thread_rng();
        pool.choose(&mut rng).map(|prompt| prompt.to_string())
    }

    fn this_or_that_question_count(&self) -> u32 {
        THIS_OR_THAT_QUESTION_COUNT
    }

    fn quiz_pack(&self) -> QuizPack {
        QuizPack {
            answer_key: QUIZ_ANSWER_KEY.to_vec(),
        }
    }
}
