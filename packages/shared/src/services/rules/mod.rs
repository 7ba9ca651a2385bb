//! The per-kind session state machines. Pure functions: no I/O, no clock, no
//! randomness. Prompt draws happen in the coordinator and arrive through
//! [`TransitionCtx`], so replaying an action against a refetched record is
//! deterministic.

pub mod quiz;
pub mod this_or_that;
pub mod tonights_plans;
pub mod truth_or_dare;
pub mod two_truths;

use serde_json::json;

use crate::models::{
    action::{GameAction, Rejection},
    game_session::GameSession,
    outcome::GameOutcome,
    session_state::SessionState,
};

/// Inputs resolved outside the machine before a transition runs.
#[derive(Debug, Default)]
pub struct TransitionCtx<'a> {
    /// Card drawn from the content pool, for transitions that put a new
    /// prompt on the table.
    pub drawn_prompt: Option<&'a str>,
}

impl<'a> TransitionCtx<'a> {
    pub fn with_prompt(prompt: &'a str) -> Self {
        TransitionCtx {
            drawn_prompt: Some(prompt),
        }
    }
}

/// Result of running one action through the machine.
#[derive(Debug)]
pub enum Transition {
    /// The full next record: state, readiness and current_index already
    /// updated together. The version bump belongs to the writer.
    Accepted(GameSession),
    Rejected(Rejection),
}

/// Apply `action` by `acting_user` to the session's current state.
///
/// Never mutates its input; on acceptance the returned session is a complete
/// replacement for the stored record.
pub fn apply(
    session: &GameSession,
    action: &GameAction,
    acting_user: &str,
    ctx: &TransitionCtx,
) -> Transition {
    if !session.is_participant(acting_user) {
        return Transition::Rejected(Rejection::wrong_phase("not a participant in this session"));
    }

    let mut next = session.clone();
    let applied = match session.state.clone() {
        SessionState::TruthOrDare(state) => {
            truth_or_dare::apply(&mut next, state, action, acting_user, ctx)
        }
        SessionState::TonightsPlans(state) => {
            tonights_plans::apply(&mut next, state, action, acting_user, ctx)
        }
        SessionState::TwoTruthsOneLie(state) => {
            two_truths::apply(&mut next, state, action, acting_user)
        }
        SessionState::ThisOrThat(state) => {
            this_or_that::apply(&mut next, state, action, acting_user)
        }
        SessionState::Quiz(state) => quiz::apply(&mut next, state, action, acting_user),
    };

    match applied {
        Ok(()) => Transition::Accepted(next),
        Err(rejection) => Transition::Rejected(rejection),
    }
}

/// Derive the immutable outcome of a terminal session. Returns `None` for a
/// session still in play; scores are computed here, never persisted mid-game.
pub fn outcome_for(session: &GameSession) -> Option<GameOutcome> {
    if !session.is_terminal() {
        return None;
    }

    let played_by = vec![session.partner_a.clone(), session.partner_b.clone()];
    let (score, details) = match &session.state {
        SessionState::TruthOrDare(_) | SessionState::TonightsPlans(_) => (
            None,
            json!({ "cards_played": session.current_index }),
        ),
        SessionState::TwoTruthsOneLie(state) => {
            let guessed_correctly =
                state.guess.is_some() && state.guess == state.lie_index;
            (
                Some(guessed_correctly as i32),
                json!({
                    "guessed_correctly": guessed_correctly,
                    "fooled_partner": !guessed_correctly,
                    "lie_index": state.lie_index,
                    "guess": state.guess,
                }),
            )
        }
        SessionState::ThisOrThat(state) => {
            let compatibility = this_or_that::compatibility_score(state);
            (
                compatibility.map(|s| s as i32),
                json!({
                    "compatibility": compatibility,
                    "answered_by_both": state.answered_by_both(),
                }),
            )
        }
        SessionState::Quiz(state) => {
            let scores = quiz::scores(state, &session.partner_a, &session.partner_b);
            let total: u32 = scores.values().sum();
            (Some(total as i32), json!({ "scores": scores }))
        }
    };

    Some(GameOutcome::new(
        &session.session_id,
        &session.partner_link_id,
        session.game_kind,
        played_by,
        score,
        details,
    ))
}
