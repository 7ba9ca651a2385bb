use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    session_state::{SessionState, TwoTruthsOneLieState},
};

/// Two-phase, role-locked game. The creator (whoever started the session)
/// submits three statements and the lie index, immutable thereafter; the
/// other partner commits exactly one guess. Reveal is the terminal,
/// idempotent step: the state machine, not the UI, answers "has this
/// already been revealed".
pub(super) fn apply(
    next: &mut GameSession,
    mut state: TwoTruthsOneLieState,
    action: &GameAction,
    acting_user: &str,
) -> Result<(), Rejection> {
    match action {
        GameAction::SubmitStatements {
            statements,
            lie_index,
        } => {
            if acting_user != next.started_by {
                return Err(Rejection::NotYourTurn);
            }
            if state.statements.is_some() {
                return Err(Rejection::wrong_phase("statements already submitted"));
            }
            if *lie_index > 2 {
                return Err(Rejection::wrong_phase("lie index out of range"));
            }
            state.statements = Some(statements.clone());
            state.lie_index = Some(*lie_index);
        }
        GameAction::SubmitGuess { guess } => {
            if acting_user == next.started_by {
                return Err(Rejection::NotYourTurn);
            }
            if state.statements.is_none() {
                return Err(Rejection::wrong_phase("statements not submitted yet"));
            }
            if state.guess.is_some() {
                return Err(Rejection::wrong_phase("guess already submitted"));
            }
            if *guess > 2 {
                return Err(Rejection::wrong_phase("guess out of range"));
            }
            state.guess = Some(*guess);
        }
        GameAction::Reveal => {
            // Reveal-once: replaying against an already-revealed state
            // yields the identical terminal state.
            if !state.revealed {
                if state.guess.is_none() {
                    return Err(Rejection::wrong_phase("no guess submitted yet"));
                }
                state.revealed = true;
            }
        }
        GameAction::EndGame => {
            return Err(Rejection::wrong_phase(
                "two truths ends by reveal; quit by ending the session",
            ));
        }
        _ => {
            return Err(Rejection::wrong_phase(
                "action does not apply to two truths and a lie",
            ));
        }
    }

    next.state = SessionState::TwoTruthsOneLie(state);
    Ok(())
}
