use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    session_state::{CardPhase, SessionState, TruthOrDareState},
};

use super::TransitionCtx;

/// Truth-or-dare round flow: the chooser picks a flavor, the drawn card sits
/// on the table until both partners are ready, then the card is consumed and
/// the chooser role swaps. Only the chooser may pick; everything reveal-like
/// is gated on mutual readiness.
pub(super) fn apply(
    next: &mut GameSession,
    mut state: TruthOrDareState,
    action: &GameAction,
    acting_user: &str,
    ctx: &TransitionCtx,
) -> Result<(), Rejection> {
    match action {
        GameAction::SelectMode { mode } => {
            // Turn rule first: a non-chooser is told NotYourTurn no matter
            // which phase the round is in.
            if state.chooser != acting_user {
                return Err(Rejection::NotYourTurn);
            }
            if state.phase == CardPhase::Ended {
                return Err(Rejection::wrong_phase("game is already over"));
            }
            if !matches!(state.phase, CardPhase::Choosing) {
                return Err(Rejection::wrong_phase("a card is already on the table"));
            }
            let prompt = ctx
                .drawn_prompt
                .ok_or_else(|| Rejection::wrong_phase("no card available to draw"))?;

            state.mode = Some(*mode);
            state.phase = CardPhase::AwaitingBothReady {
                prompt: prompt.to_string(),
            };
            next.reset_readiness();
        }
        GameAction::MarkReady => {
            if !matches!(state.phase, CardPhase::AwaitingBothReady { .. }) {
                return Err(Rejection::wrong_phase("no card awaiting readiness"));
            }
            next.mark_ready(acting_user);
        }
        GameAction::AdvanceCard => {
            if !matches!(state.phase, CardPhase::AwaitingBothReady { .. }) {
                return Err(Rejection::wrong_phase("no card to advance past"));
            }
            if !next.both_ready() {
                return Err(Rejection::wrong_phase("both partners must be ready"));
            }
            let swapped = next
                .partner_of(&state.chooser)
                .ok_or_else(|| Rejection::wrong_phase("chooser is not a participant"))?
                .to_string();
            state.chooser = swapped;
            state.mode = None;
            state.phase = CardPhase::Choosing;
            next.current_index += 1;
            next.reset_readiness();
        }
        GameAction::EndGame => {
            // Idempotent: ending an ended game is a no-op.
            state.phase = CardPhase::Ended;
        }
        _ => {
            return Err(Rejection::wrong_phase(
                "action does not apply to truth-or-dare",
            ));
        }
    }

    next.state = SessionState::TruthOrDare(state);
    Ok(())
}
