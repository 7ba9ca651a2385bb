use axum::http::StatusCode;

/// Liveness probe for the session API.
pub async fn health_check() -> (StatusCode, String) {
    (StatusCode::OK, "ok".to_string())
}
