use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::{
    action::{GameAction, Rejection},
    game_session::{GameKind, GameSession},
    outcome::GameOutcome,
    session_state::{
        QuizState, SessionState, ThisOrThatState, TonightsPlansState, TruthOrDareState,
        TwoTruthsOneLieState,
    },
};
use crate::repositories::errors::history_repository_errors::HistoryRepositoryError;
use crate::repositories::errors::session_repository_errors::SessionRepositoryError;
use crate::repositories::{
    history_repository::HistoryRepository, session_repository::SessionRepository,
};
use crate::services::errors::coordinator_errors::CoordinatorError;
use crate::services::notification_service::{PartnerEvent, PartnerNotifier};
use crate::services::prompt_service::PromptProvider;
use crate::services::rules::{self, Transition, TransitionCtx};

#[derive(Debug, Clone)]
pub struct StartSession {
    pub partner_link_id: String,
    pub game_kind: GameKind,
    pub started_by: String,
    pub partner_id: String,
    pub spicy: bool,
}

/// Result of a successfully processed action. Rejections are expected
/// outcomes of dual-client play, not failures.
#[derive(Debug)]
pub enum ApplyOutcome {
    Accepted(GameSession),
    Rejected(Rejection),
}

/// Coarse change-feed event: a signal to refetch, never a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEventType {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub event_type: ChangeEventType,
    pub record_id: String,
}

/// Owns one partnership's session lifecycle: applies local actions through
/// the state machine, persists them with a version-checked replace, and
/// reconciles inbound change-feed events by refetching wholesale.
#[derive(Clone)]
pub struct SessionCoordinator {
    sessions: Arc<dyn SessionRepository>,
    history: Arc<dyn HistoryRepository>,
    notifier: Arc<dyn PartnerNotifier>,
    prompts: Arc<dyn PromptProvider>,
}

impl SessionCoordinator {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        history: Arc<dyn HistoryRepository>,
        notifier: Arc<dyn PartnerNotifier>,
        prompts: Arc<dyn PromptProvider>,
    ) -> Self {
        SessionCoordinator {
            sessions,
            history,
            notifier,
            prompts,
        }
    }

    /// Start a fresh round, superseding any live session of the same kind
    /// for this partnership so at most one exists at a time.
    pub async fn start(&self, request: &StartSession) -> Result<GameSession, CoordinatorError> {
        if request.started_by == request.partner_id {
            return Err(CoordinatorError::Validation(
                "a session needs two distinct partners".to_string(),
            ));
        }

        if let Some(existing) = self
            .sessions
            .find_live_session(&request.partner_link_id, request.game_kind)
            .await?
        {
            if existing.is_terminal() {
                debug!(
                    "Discarding finished {} session {}",
                    request.game_kind.as_str(),
                    existing.session_id
                );
            } else {
                info!(
                    "Superseding live {} session {}",
                    request.game_kind.as_str(),
                    existing.session_id
                );
            }
            self.sessions.delete_session(&existing.session_id).await?;
        }

        let state = self.initial_state(request);
        let session = GameSession::new(
            &request.partner_link_id,
            request.game_kind,
            &request.started_by,
            &request.partner_id,
            state,
            request.spicy,
        );
        self.sessions.create_session(&session).await?;

        // The INSERT stream record nudges the partner; pushing here as well
        // would deliver the same GameStarted twice.
        Ok(session)
    }

    pub async fn get(&self, session_id: &str) -> Result<GameSession, CoordinatorError> {
        self.sessions
            .get_session(session_id)
            .await?
            .ok_or(CoordinatorError::SessionNotFound)
    }

    pub async fn find_live(
        &self,
        partner_link_id: &str,
        game_kind: GameKind,
    ) -> Result<Option<GameSession>, CoordinatorError> {
        Ok(self
            .sessions
            .find_live_session(partner_link_id, game_kind)
            .await?)
    }

    /// Run `action` through the state machine and persist the result as a
    /// version-checked whole-record replace. A lost race triggers exactly one
    /// refetch-and-replay; a second conflict surfaces to the caller.
    pub async fn apply(
        &self,
        session_id: &str,
        acting_user: &str,
        action: &GameAction,
    ) -> Result<ApplyOutcome, CoordinatorError> {
        let mut current = self.get(session_id).await?;

        // The draw is resolved once, so a replay after a conflict reapplies
        // the same card instead of rolling a new one.
        let drawn = self.draw_for(&current, action);

        for attempt in 0..2 {
            let ctx = TransitionCtx {
                drawn_prompt: drawn.as_deref(),
            };
            let mut next = match rules::apply(&current, action, acting_user, &ctx) {
                Transition::Accepted(next) => next,
                Transition::Rejected(rejection) => {
                    debug!(
                        "Action rejected for session {}: {}",
                        session_id, rejection
                    );
                    return Ok(ApplyOutcome::Rejected(rejection));
                }
            };

            let expected_version = current.version;
            next.version = expected_version + 1;
            next.updated_at = Utc::now();

            match self.sessions.replace_session(&next, expected_version).await {
                Ok(()) => return Ok(ApplyOutcome::Accepted(next)),
                Err(SessionRepositoryError::VersionConflict) if attempt == 0 => {
                    warn!(
                        "Write to session {} lost a race, replaying against latest record",
                        session_id
                    );
                    current = self.get(session_id).await?;
                }
                Err(SessionRepositoryError::VersionConflict) => {
                    return Err(CoordinatorError::Conflict)
                }
                Err(e) => return Err(CoordinatorError::Repository(e)),
            }
        }

        Err(CoordinatorError::Conflict)
    }

    /// React to a coarse change-feed notification: trust the store, refetch
    /// the whole record, and replace any local optimistic view with it.
    pub async fn on_remote_change(
        &self,
        event: &ChangeEvent,
    ) -> Result<Option<GameSession>, CoordinatorError> {
        match event.event_type {
            ChangeEventType::Delete => Ok(None),
            ChangeEventType::Insert | ChangeEventType::Update => {
                Ok(self.sessions.get_session(&event.record_id).await?)
            }
        }
    }

    /// Nudge the slow half of the partnership. Fire-and-forget.
    pub async fn remind_partner(
        &self,
        session_id: &str,
        requesting_user: &str,
    ) -> Result<(), CoordinatorError> {
        let session = self.get(session_id).await?;
        let partner = session
            .partner_of(requesting_user)
            .ok_or_else(|| {
                CoordinatorError::Validation("not a participant in this session".to_string())
            })?
            .to_string();

        self.notifier
            .notify_partner(
                &partner,
                PartnerEvent::ActionPending,
                session.game_kind.as_str(),
            )
            .await;

        Ok(())
    }

    /// Explicit quit: drop the live record without recording an outcome.
    pub async fn end(&self, session_id: &str) -> Result<(), CoordinatorError> {
        self.sessions.delete_session(session_id).await?;
        Ok(())
    }

    /// Normal completion. The outcome is durably recorded before the live
    /// record is deleted; a crash in between leaves an orphaned terminal
    /// session that a replay (or the next start) cleans up safely.
    pub async fn consume_terminal(
        &self,
        session_id: &str,
    ) -> Result<GameOutcome, CoordinatorError> {
        let session = self.get(session_id).await?;
        let outcome = rules::outcome_for(&session).ok_or_else(|| {
            CoordinatorError::Validation("session is not in a terminal state".to_string())
        })?;

        match self.history.record_outcome(&outcome).await {
            Ok(()) => {}
            Err(HistoryRepositoryError::AlreadyRecorded) => {
                info!(
                    "Outcome for session {} already recorded, finishing cleanup",
                    session_id
                );
            }
            Err(e) => return Err(CoordinatorError::History(e)),
        }

        self.sessions.delete_session(session_id).await?;
        Ok(outcome)
    }

    fn initial_state(&self, request: &StartSession) -> SessionState {
        match request.game_kind {
            GameKind::TruthOrDare => {
                SessionState::TruthOrDare(TruthOrDareState::new(&request.started_by))
            }
            GameKind::TonightsPlans => {
                SessionState::TonightsPlans(TonightsPlansState::new(&request.started_by))
            }
            GameKind::TwoTruthsOneLie => {
                SessionState::TwoTruthsOneLie(TwoTruthsOneLieState::new())
            }
            GameKind::ThisOrThat => SessionState::ThisOrThat(ThisOrThatState::new(
                self.prompts.this_or_that_question_count(),
            )),
            GameKind::QuizGame => {
                SessionState::Quiz(QuizState::new(self.prompts.quiz_pack().answer_key))
            }
        }
    }

    fn draw_for(&self, session: &GameSession, action: &GameAction) -> Option<String> {
        match action {
            GameAction::SelectMode { mode } => {
                self.prompts
                    .draw_prompt(session.game_kind, Some(*mode), session.spicy)
            }
            GameAction::SuggestPlan => {
                self.prompts
                    .draw_prompt(session.game_kind, None, session.spicy)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::*;
    use crate::models::session_state::{CardPhase, PromptMode};
    use crate::repositories::history_repository::MockHistoryRepository;
    use crate::repositories::session_repository::MockSessionRepository;
    use crate::services::notification_service::MockPartnerNotifier;
    use crate::services::prompt_service::{MockPromptProvider, QuizPack};

    fn coordinator(
        sessions: MockSessionRepository,
        history: MockHistoryRepository,
        notifier: MockPartnerNotifier,
        prompts: MockPromptProvider,
    ) -> SessionCoordinator {
        SessionCoordinator::new(
            Arc::new(sessions),
            Arc::new(history),
            Arc::new(notifier),
            Arc::new(prompts),
        )
    }

    fn truth_or_dare_session() -> GameSession {
        GameSession::new(
            "link-1",
            GameKind::TruthOrDare,
            "alice",
            "bob",
            SessionState::TruthOrDare(TruthOrDareState::new("alice")),
            false,
        )
    }

    fn awaiting_ready_session() -> GameSession {
        let mut session = truth_or_dare_session();
        session.state = SessionState::TruthOrDare(TruthOrDareState {
            chooser: "alice".to_string(),
            mode: Some(PromptMode::Truth),
            phase: CardPhase::AwaitingBothReady {
                prompt: "What song reminds you of us?".to_string(),
            },
        });
        session
    }

    fn start_request() -> StartSession {
        StartSession {
            partner_link_id: "link-1".to_string(),
            game_kind: GameKind::TruthOrDare,
            started_by: "alice".to_string(),
            partner_id: "bob".to_string(),
            spicy: false,
        }
    }

    #[tokio::test]
    async fn test_start_supersedes_existing_live_session() {
        let existing = truth_or_dare_session();
        let existing_id = existing.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_live_session()
            .with(eq("link-1"), eq(GameKind::TruthOrDare))
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        sessions
            .expect_delete_session()
            .with(eq(existing_id))
            .times(1)
            .returning(|_| Ok(()));
        sessions
            .expect_create_session()
            .withf(|session: &GameSession| {
                session.version == 0 && session.live_key == "link-1#truth_or_dare"
            })
            .times(1)
            .returning(|_| Ok(()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let session = coordinator.start(&start_request()).await.unwrap();
        assert_eq!(session.started_by, "alice");
        assert!(!session.is_terminal());
    }

    #[tokio::test]
    async fn test_start_does_not_push_directly() {
        // The GameStarted nudge rides the INSERT change-feed record; a
        // second synchronous push from start would double-deliver it.
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_live_session()
            .returning(|_, _| Ok(None));
        sessions
            .expect_create_session()
            .times(1)
            .returning(|_| Ok(()));

        let mut notifier = MockPartnerNotifier::new();
        notifier.expect_notify_partner().times(0);

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            notifier,
            MockPromptProvider::new(),
        );

        coordinator.start(&start_request()).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_with_no_existing_session_creates_one() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_live_session()
            .returning(|_, _| Ok(None));
        sessions.expect_delete_session().times(0);
        sessions
            .expect_create_session()
            .times(1)
            .returning(|_| Ok(()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        coordinator.start(&start_request()).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_quiz_takes_answer_key_from_pack() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_live_session()
            .returning(|_, _| Ok(None));
        sessions
            .expect_create_session()
            .withf(|session: &GameSession| {
                matches!(
                    &session.state,
                    SessionState::Quiz(quiz) if quiz.answer_key == vec![1, 0, 2]
                )
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut prompts = MockPromptProvider::new();
        prompts.expect_quiz_pack().returning(|| QuizPack {
            answer_key: vec![1, 0, 2],
        });

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            prompts,
        );

        let mut request = start_request();
        request.game_kind = GameKind::QuizGame;
        coordinator.start(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_start_rejects_self_partnership() {
        let coordinator = coordinator(
            MockSessionRepository::new(),
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let mut request = start_request();
        request.partner_id = "alice".to_string();
        let result = coordinator.start(&request).await;
        assert!(matches!(result, Err(CoordinatorError::Validation(_))));
    }

    #[tokio::test]
    async fn test_apply_persists_accepted_action_with_version_bump() {
        let session = awaiting_ready_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .with(eq(session_id.clone()))
            .times(1)
            .return_once(move |_| Ok(Some(session)));
        sessions
            .expect_replace_session()
            .withf(|next: &GameSession, expected_version| {
                next.version == 1 && *expected_version == 0 && next.is_ready("bob")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let outcome = coordinator
            .apply(&session_id, "bob", &GameAction::MarkReady)
            .await
            .unwrap();
        match outcome {
            ApplyOutcome::Accepted(next) => {
                assert_eq!(next.version, 1);
                assert!(next.is_ready("bob"));
            }
            ApplyOutcome::Rejected(rejection) => panic!("unexpected rejection: {}", rejection),
        }
    }

    #[tokio::test]
    async fn test_rejected_action_is_never_written() {
        let session = truth_or_dare_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));
        sessions.expect_replace_session().times(0);

        let mut prompts = MockPromptProvider::new();
        prompts
            .expect_draw_prompt()
            .returning(|_, _, _| Some("prompt".to_string()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            prompts,
        );

        // Bob is not the chooser.
        let outcome = coordinator
            .apply(
                &session_id,
                "bob",
                &GameAction::SelectMode {
                    mode: PromptMode::Truth,
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ApplyOutcome::Rejected(Rejection::NotYourTurn)
        ));
    }

    #[tokio::test]
    async fn test_conflict_retry_preserves_both_readiness_flags() {
        // The lost-update scenario: bob's MarkReady is computed against the
        // same stale version alice wrote to. The conditional replace rejects
        // the stale write; the replay runs against alice's record, so both
        // flags survive.
        let stale = awaiting_ready_session();
        let session_id = stale.session_id.clone();

        let mut fresh = stale.clone();
        fresh.mark_ready("alice");
        fresh.version = 1;

        let mut sessions = MockSessionRepository::new();
        let mut fetches = Sequence::new();
        sessions
            .expect_get_session()
            .times(1)
            .in_sequence(&mut fetches)
            .return_once(move |_| Ok(Some(stale)));
        sessions
            .expect_get_session()
            .times(1)
            .in_sequence(&mut fetches)
            .return_once(move |_| Ok(Some(fresh)));

        let mut writes = Sequence::new();
        sessions
            .expect_replace_session()
            .withf(|next, expected_version| *expected_version == 0 && next.is_ready("bob"))
            .times(1)
            .in_sequence(&mut writes)
            .returning(|_, _| Err(SessionRepositoryError::VersionConflict));
        sessions
            .expect_replace_session()
            .withf(|next: &GameSession, expected_version| {
                *expected_version == 1
                    && next.version == 2
                    && next.is_ready("alice")
                    && next.is_ready("bob")
            })
            .times(1)
            .in_sequence(&mut writes)
            .returning(|_, _| Ok(()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let outcome = coordinator
            .apply(&session_id, "bob", &GameAction::MarkReady)
            .await
            .unwrap();
        match outcome {
            ApplyOutcome::Accepted(next) => assert!(next.both_ready()),
            ApplyOutcome::Rejected(rejection) => panic!("unexpected rejection: {}", rejection),
        }
    }

    #[tokio::test]
    async fn test_second_conflict_surfaces_to_caller() {
        let session = awaiting_ready_session();
        let session_id = session.session_id.clone();
        let refetched = session.clone();

        let mut sessions = MockSessionRepository::new();
        let mut fetches = Sequence::new();
        sessions
            .expect_get_session()
            .times(1)
            .in_sequence(&mut fetches)
            .return_once(move |_| Ok(Some(session)));
        sessions
            .expect_get_session()
            .times(1)
            .in_sequence(&mut fetches)
            .return_once(move |_| Ok(Some(refetched)));
        sessions
            .expect_replace_session()
            .times(2)
            .returning(|_, _| Err(SessionRepositoryError::VersionConflict));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let result = coordinator
            .apply(&session_id, "bob", &GameAction::MarkReady)
            .await;
        assert!(matches!(result, Err(CoordinatorError::Conflict)));
    }

    #[tokio::test]
    async fn test_apply_on_missing_session_is_not_found() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_get_session().returning(|_| Ok(None));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let result = coordinator
            .apply("missing", "alice", &GameAction::MarkReady)
            .await;
        assert!(matches!(result, Err(CoordinatorError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_consume_terminal_records_before_deleting() {
        let mut session = truth_or_dare_session();
        session.state = SessionState::TruthOrDare(TruthOrDareState {
            chooser: "alice".to_string(),
            mode: None,
            phase: CardPhase::Ended,
        });
        session.current_index = 3;
        let session_id = session.session_id.clone();
        let expected_outcome_id = session_id.clone();

        let mut order = Sequence::new();

        let mut history = MockHistoryRepository::new();
        history
            .expect_record_outcome()
            .withf(move |outcome: &GameOutcome| outcome.outcome_id == expected_outcome_id)
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Ok(()));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));
        sessions
            .expect_delete_session()
            .with(eq(session_id.clone()))
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Ok(()));

        let coordinator = coordinator(
            sessions,
            history,
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let outcome = coordinator.consume_terminal(&session_id).await.unwrap();
        assert_eq!(outcome.details["cards_played"], serde_json::json!(3));
    }

    #[tokio::test]
    async fn test_consume_terminal_replay_tolerates_already_recorded() {
        let mut session = truth_or_dare_session();
        session.state = SessionState::TruthOrDare(TruthOrDareState {
            chooser: "alice".to_string(),
            mode: None,
            phase: CardPhase::Ended,
        });
        let session_id = session.session_id.clone();

        let mut history = MockHistoryRepository::new();
        history
            .expect_record_outcome()
            .returning(|_| Err(HistoryRepositoryError::AlreadyRecorded));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));
        sessions
            .expect_delete_session()
            .times(1)
            .returning(|_| Ok(()));

        let coordinator = coordinator(
            sessions,
            history,
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        coordinator.consume_terminal(&session_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_consume_terminal_rejects_live_session() {
        let session = awaiting_ready_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));
        sessions.expect_delete_session().times(0);

        let mut history = MockHistoryRepository::new();
        history.expect_record_outcome().times(0);

        let coordinator = coordinator(
            sessions,
            history,
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let result = coordinator.consume_terminal(&session_id).await;
        assert!(matches!(result, Err(CoordinatorError::Validation(_))));
    }

    #[tokio::test]
    async fn test_on_remote_change_refetches_on_update() {
        let session = awaiting_ready_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .with(eq(session_id.clone()))
            .times(1)
            .return_once(move |_| Ok(Some(session)));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let refreshed = coordinator
            .on_remote_change(&ChangeEvent {
                event_type: ChangeEventType::Update,
                record_id: session_id,
            })
            .await
            .unwrap();
        assert!(refreshed.is_some());
    }

    #[tokio::test]
    async fn test_on_remote_change_delete_clears_view_without_fetch() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_get_session().times(0);

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            MockPromptProvider::new(),
        );

        let refreshed = coordinator
            .on_remote_change(&ChangeEvent {
                event_type: ChangeEventType::Delete,
                record_id: "whatever".to_string(),
            })
            .await
            .unwrap();
        assert!(refreshed.is_none());
    }

    #[tokio::test]
    async fn test_remind_partner_nudges_the_other_half() {
        let session = awaiting_ready_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));

        let mut notifier = MockPartnerNotifier::new();
        notifier
            .expect_notify_partner()
            .with(
                eq("bob"),
                eq(PartnerEvent::ActionPending),
                eq("truth_or_dare"),
            )
            .times(1)
            .returning(|_, _, _| ());

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            notifier,
            MockPromptProvider::new(),
        );

        coordinator
            .remind_partner(&session_id, "alice")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_select_mode_carries_drawn_prompt_into_state() {
        let session = truth_or_dare_session();
        let session_id = session.session_id.clone();

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_get_session()
            .return_once(move |_| Ok(Some(session)));
        sessions
            .expect_replace_session()
            .withf(|next: &GameSession, _| {
                matches!(
                    &next.state,
                    SessionState::TruthOrDare(state)
                        if state.phase
                            == CardPhase::AwaitingBothReady {
                                prompt: "What song reminds you of us?".to_string()
                            }
                )
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut prompts = MockPromptProvider::new();
        prompts
            .expect_draw_prompt()
            .with(eq(GameKind::TruthOrDare), eq(Some(PromptMode::Truth)), eq(false))
            .times(1)
            .returning(|_, _, _| Some("What song reminds you of us?".to_string()));

        let coordinator = coordinator(
            sessions,
            MockHistoryRepository::new(),
            MockPartnerNotifier::new(),
            prompts,
        );

        let outcome = coordinator
            .apply(
                &session_id,
                "alice",
                &GameAction::SelectMode {
                    mode: PromptMode::Truth,
                },
            )
            .await
            .unwrap();
        assert!(matches!(outcome, ApplyOutcome::Accepted(_)));
    }
}
