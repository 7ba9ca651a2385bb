use std::sync::Arc;

use shared::services::coordinator::SessionCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<SessionCoordinator>,
}
