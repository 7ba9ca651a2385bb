use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    session_state::{SessionState, ThisOrThatState},
};

/// Symmetric per-question game: either partner answers each question index
/// at most once, in any order. The compatibility score is derived from the
/// answer map on demand so it can never drift from it.
pub(super) fn apply(
    next: &mut GameSession,
    mut state: ThisOrThatState,
    action: &GameAction,
    acting_user: &str,
) -> Result<(), Rejection> {
    match action {
        GameAction::SubmitAnswer {
            question_index,
            choice,
        } => {
            if state.ended {
                return Err(Rejection::wrong_phase("game is already over"));
            }
            if *question_index >= state.total_questions {
                return Err(Rejection::wrong_phase("question index out of range"));
            }
            let per_user = state.answers.entry(*question_index).or_default();
            if per_user.contains_key(acting_user) {
                return Err(Rejection::wrong_phase("question already answered"));
            }
            per_user.insert(acting_user.to_string(), *choice);

            next.current_index = state.answered_by_both();
            if state.answered_by_both() == state.total_questions {
                state.ended = true;
            }
        }
        GameAction::EndGame => {
            state.ended = true;
        }
        _ => {
            return Err(Rejection::wrong_phase(
                "action does not apply to this-or-that",
            ));
        }
    }

    next.state = SessionState::ThisOrThat(state);
    Ok(())
}

/// `round(matches / answered_by_both * 100)`; `None` when no question has
/// been answered by both partners yet (explicit no-data, not a zero).
pub fn compatibility_score(state: &ThisOrThatState) -> Option<u32> {
    let both: Vec<_> = state
        .answers
        .values()
        .filter(|per_user| per_user.len() >= 2)
        .collect();
    if both.is_empty() {
        return None;
    }

    let matches = both
        .iter()
        .filter(|per_user| {
            let mut choices = per_user.values();
            let first = choices.next();
            choices.next() == first
        })
        .count();

    Some(((matches as f64 / both.len() as f64) * 100.0).round() as u32)
}
