use std::collections::BTreeMap;

use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    session_state::{QuizState, SessionState},
};

/// Couples quiz: both partners answer the same fixed question pack; the
/// answer key is drawn at session creation and immutable. Symmetric, one
/// response per user per question; tallies are derived, never stored.
pub(super) fn apply(
    next: &mut GameSession,
    mut state: QuizState,
    action: &GameAction,
    acting_user: &str,
) -> Result<(), Rejection> {
    match action {
        GameAction::SubmitQuizAnswer {
            question_index,
            option,
        } => {
            if state.ended {
                return Err(Rejection::wrong_phase("quiz is already over"));
            }
            if *question_index >= state.total_questions {
                return Err(Rejection::wrong_phase("question index out of range"));
            }
            let per_user = state.responses.entry(*question_index).or_default();
            if per_user.contains_key(acting_user) {
                return Err(Rejection::wrong_phase("question already answered"));
            }
            per_user.insert(acting_user.to_string(), *option);

            next.current_index = state
                .responses
                .values()
                .filter(|per_user| per_user.len() >= 2)
                .count() as u32;
            if state.all_answered() {
                state.ended = true;
            }
        }
        GameAction::EndGame => {
            state.ended = true;
        }
        _ => {
            return Err(Rejection::wrong_phase("action does not apply to the quiz"));
        }
    }

    next.state = SessionState::Quiz(state);
    Ok(())
}

/// Per-user tally of responses matching the answer key.
pub fn scores(state: &QuizState, partner_a: &str, partner_b: &str) -> BTreeMap<String, u32> {
    let mut tallies = BTreeMap::new();
    for user in [partner_a, partner_b] {
        let correct = state
            .responses
            .iter()
            .filter(|(question, per_user)| {
                state
                    .answer_key
                    .get(**question as usize)
                    .map(|key| per_user.get(user) == Some(key))
                    .unwrap_or(false)
            })
            .count() as u32;
        tallies.insert(user.to_string(), correct);
    }
    tallies
}
