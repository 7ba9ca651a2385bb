use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::state::AppState;
use shared::models::api::requests::{
    ActionRequest, LiveSessionQuery, RemindRequest, StartSessionRequest,
};
use shared::models::api::responses::{ApplyResponse, ErrorResponse, SessionResponse};
use shared::models::outcome::GameOutcome;
use shared::services::coordinator::{ApplyOutcome, StartSession};
use shared::services::errors::coordinator_errors::CoordinatorError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/live", get(find_live_session))
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}", delete(end_session))
        .route("/sessions/{session_id}/actions", post(apply_action))
        .route("/sessions/{session_id}/remind", post(remind_partner))
        .route("/sessions/{session_id}/complete", post(complete_session))
}

fn error_response(e: CoordinatorError) -> (StatusCode, Json<ErrorResponse>) {
    let body = Json(ErrorResponse {
        error: e.to_string(),
    });
    match e {
        CoordinatorError::SessionNotFound => (StatusCode::NOT_FOUND, body),
        CoordinatorError::Conflict => (StatusCode::CONFLICT, body),
        CoordinatorError::Validation(_) => (StatusCode::BAD_REQUEST, body),
        CoordinatorError::Repository(_) | CoordinatorError::History(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, Json<ErrorResponse>)> {
    let request = StartSession {
        partner_link_id: payload.partner_link_id,
        game_kind: payload.game_kind,
        started_by: payload.started_by,
        partner_id: payload.partner_id,
        spicy: payload.spicy,
    };

    match state.coordinator.start(&request).await {
        Ok(session) => Ok((StatusCode::CREATED, Json(SessionResponse { session }))),
        Err(e) => Err(error_response(e)),
    }
}

async fn find_live_session(
    State(state): State<AppState>,
    Query(query): Query<LiveSessionQuery>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .coordinator
        .find_live(&query.partner_link_id, query.game_kind)
        .await
    {
        Ok(Some(session)) => Ok(Json(SessionResponse { session })),
        Ok(None) => Err(error_response(CoordinatorError::SessionNotFound)),
        Err(e) => Err(error_response(e)),
    }
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.coordinator.get(&session_id).await {
        Ok(session) => Ok(Json(SessionResponse { session })),
        Err(e) => Err(error_response(e)),
    }
}

async fn apply_action(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<ApplyResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .coordinator
        .apply(&session_id, &payload.user_id, &payload.action)
        .await
    {
        Ok(ApplyOutcome::Accepted(session)) => Ok(Json(ApplyResponse::Accepted { session })),
        Ok(ApplyOutcome::Rejected(rejection)) => Ok(Json(ApplyResponse::Rejected { rejection })),
        Err(e) => Err(error_response(e)),
    }
}

async fn remind_partner(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<RemindRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state
        .coordinator
        .remind_partner(&session_id, &payload.user_id)
        .await
    {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_response(e)),
    }
}

async fn complete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameOutcome>, (StatusCode, Json<ErrorResponse>)> {
    match state.coordinator.consume_terminal(&session_id).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => Err(error_response(e)),
    }
}

async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.coordinator.end(&session_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_response(e)),
    }
}
