use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    session_state::{CardPhase, SessionState, TonightsPlansState},
};

use super::TransitionCtx;

/// Tonight's-plans is the other initiator-advantage card game: same round
/// shape as truth-or-dare but without the truth/dare pick. The chooser draws
/// a plan suggestion, both partners sign off, the chooser role swaps.
pub(super) fn apply(
    next: &mut GameSession,
    mut state: TonightsPlansState,
    action: &GameAction,
    acting_user: &str,
    ctx: &TransitionCtx,
) -> Result<(), Rejection> {
    match action {
        GameAction::SuggestPlan => {
            if state.chooser != acting_user {
                return Err(Rejection::NotYourTurn);
            }
            if state.phase == CardPhase::Ended {
                return Err(Rejection::wrong_phase("game is already over"));
            }
            if !matches!(state.phase, CardPhase::Choosing) {
                return Err(Rejection::wrong_phase("a plan is already on the table"));
            }
            let prompt = ctx
                .drawn_prompt
                .ok_or_else(|| Rejection::wrong_phase("no plan available to draw"))?;

            state.phase = CardPhase::AwaitingBothReady {
                prompt: prompt.to_string(),
            };
            next.reset_readiness();
        }
        GameAction::MarkReady => {
            if !matches!(state.phase, CardPhase::AwaitingBothReady { .. }) {
                return Err(Rejection::wrong_phase("no plan awaiting readiness"));
            }
            next.mark_ready(acting_user);
        }
        GameAction::AdvanceCard => {
            if !matches!(state.phase, CardPhase::AwaitingBothReady { .. }) {
                return Err(Rejection::wrong_phase("no plan to advance past"));
            }
            if !next.both_ready() {
                return Err(Rejection::wrong_phase("both partners must be ready"));
            }
            let swapped = next
                .partner_of(&state.chooser)
                .ok_or_else(|| Rejection::wrong_phase("chooser is not a participant"))?
                .to_string();
            state.chooser = swapped;
            state.phase = CardPhase::Choosing;
            next.current_index += 1;
            next.reset_readiness();
        }
        GameAction::EndGame => {
            state.phase = CardPhase::Ended;
        }
        _ => {
            return Err(Rejection::wrong_phase(
                "action does not apply to tonight's plans",
            ));
        }
    }

    next.state = SessionState::TonightsPlans(state);
    Ok(())
}
