use crate::models::game_session::{live_key, GameKind, GameSession};
use crate::repositories::errors::session_repository_errors::SessionRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbSessionRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbSessionRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_SESSIONS_TABLE")
            .expect("GAME_SESSIONS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

/// Keyed store for the single live session record per (partnership, kind).
/// Pure storage: the uniqueness rule itself is enforced by the coordinator.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &GameSession) -> Result<(), SessionRepositoryError>;

    async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSession>, SessionRepositoryError>;

    async fn find_live_session(
        &self,
        partner_link_id: &str,
        game_kind: GameKind,
    ) -> Result<Option<GameSession>, SessionRepositoryError>;

    /// Whole-record replace, accepted only if the stored version still equals
    /// `expected_version`. A lost race surfaces as `VersionConflict` instead
    /// of silently clobbering the other writer.
    async fn replace_session(
        &self,
        session: &GameSession,
        expected_version: u64,
    ) -> Result<(), SessionRepositoryError>;

    async fn delete_session(&self, session_id: &str) -> Result<(), SessionRepositoryError>;
}

#[async_trait]
impl SessionRepository for DynamoDbSessionRepository {
    async fn create_session(&self, session: &GameSession) -> Result<(), SessionRepositoryError> {
        let item = to_item(session)
            .map_err(|e| SessionRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(session_id)")
            .send()
            .await
            .map_err(|e| SessionRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<Option<GameSession>, SessionRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("session_id", AttributeValue::S(session_id.to_string()))
            // State and readiness must come from one consistent fetch.
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| SessionRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let session: GameSession = from_item(item)
                .map_err(|e| SessionRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    async fn find_live_session(
        &self,
        partner_link_id: &str,
        game_kind: GameKind,
    ) -> Result<Option<GameSession>, SessionRepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_LiveSession")
            .key_condition_expression("live_key = :live_key")
            .expression_attribute_values(
                ":live_key",
                AttributeValue::S(live_key(partner_link_id, game_kind)),
            )
            .limit(1)
            .send()
            .await
            .map_err(|e| SessionRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.items.and_then(|items| items.into_iter().next()) {
            let session: GameSession = from_item(item)
                .map_err(|e| SessionRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    async fn replace_session(
        &self,
        session: &GameSession,
        expected_version: u64,
    ) -> Result<(), SessionRepositoryError> {
        let item = to_item(session)
            .map_err(|e| SessionRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(session_id) AND version = :expected")
            .expression_attribute_values(
                ":expected",
                AttributeValue::N(expected_version.to_string()),
            )
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    SessionRepositoryError::VersionConflict
                } else {
                    SessionRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), SessionRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("session_id", AttributeValue::S(session_id.to_string()))
            .send()
            .await
            .map_err(|e| SessionRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
