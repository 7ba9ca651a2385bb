use crate::models::outcome::GameOutcome;
use crate::repositories::errors::history_repository_errors::HistoryRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use serde_dynamo::to_item;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbHistoryRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbHistoryRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("GAME_HISTORY_TABLE")
            .expect("GAME_HISTORY_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

/// Append-only log of terminal game outcomes. Written once per consumed
/// session, never read by the live-session path.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn record_outcome(&self, outcome: &GameOutcome) -> Result<(), HistoryRepositoryError>;
}

#[async_trait]
impl HistoryRepository for DynamoDbHistoryRepository {
    async fn record_outcome(&self, outcome: &GameOutcome) -> Result<(), HistoryRepositoryError> {
        let item = to_item(outcome)
            .map_err(|e| HistoryRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(outcome_id)")
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    HistoryRepositoryError::AlreadyRecorded
                } else {
                    HistoryRepositoryError::DynamoDb(service_error.to_string())
                }
            })?;

        Ok(())
    }
}
