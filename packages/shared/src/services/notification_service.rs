use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use crate::repositories::connection_repository::ConnectionRepository;

/// Things worth tapping the other partner on the shoulder about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PartnerEvent {
    GameStarted,
    ActionPending,
    GameCompleted,
}

/// Fire-and-forget bridge to the external messaging side. Callers never
/// block on or inspect the result of a nudge.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PartnerNotifier: Send + Sync {
    async fn notify_partner(&self, user_id: &str, event: PartnerEvent, context: &str);
}

/// Push-based notifier over the WebSocket connection registry. An offline
/// partner is skipped with a log line; delivery failures are swallowed.
#[derive(Clone)]
pub struct PushNotifier {
    connections: Arc<dyn ConnectionRepository>,
}

impl PushNotifier {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl PartnerNotifier for PushNotifier {
    async fn notify_partner(&self, user_id: &str, event: PartnerEvent, context: &str) {
        let connection_id = match self.connections.get_connection_id(user_id).await {
            Ok(Some(connection_id)) => connection_id,
            Ok(None) => {
                info!("Partner {} is not connected, skipping notification", user_id);
                return;
            }
            Err(e) => {
                warn!("Failed to look up connection for {}: {}", user_id, e);
                return;
            }
        };

        let message = json!({
            "type": "partner_notification",
            "event": event,
            "context": context,
        })
        .to_string();

        if let Err(e) = self.connections.send_message(&connection_id, &message).await {
            warn!("Failed to push notification to {}: {}", user_id, e);
        }
    }
}
