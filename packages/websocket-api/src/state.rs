use std::sync::Arc;

use shared::repositories::connection_repository::ConnectionRepository;

#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<dyn ConnectionRepository>,
}
