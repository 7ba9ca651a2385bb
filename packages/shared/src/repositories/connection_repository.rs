use async_trait::async_trait;
use aws_sdk_apigatewaymanagement::{primitives::Blob, Client as ApiGatewayClient};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::env;

#[cfg(test)]
use mockall::automock;

use crate::repositories::errors::connection_repository_errors::ConnectionRepositoryError;

/// Registry of live WebSocket connections per user, plus the push path the
/// change-feed fan-out and partner nudges ride on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn store_connection(
        &self,
        user_id: &str,
        connection_id: &str,
    ) -> Result<(), ConnectionRepositoryError>;

    async fn remove_connection(&self, connection_id: &str)
        -> Result<(), ConnectionRepositoryError>;

    async fn get_connection_id(
        &self,
        user_id: &str,
    ) -> Result<Option<String>, ConnectionRepositoryError>;

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), ConnectionRepositoryError>;
}

pub struct DynamoDbConnectionRepository {
    dynamodb_client: DynamoDbClient,
    api_gateway_client: ApiGatewayClient,
    table_name: String,
}

impl DynamoDbConnectionRepository {
    pub fn new(dynamodb_client: DynamoDbClient, api_gateway_client: ApiGatewayClient) -> Self {
        let table_name = env::var("PARTNER_CONNECTIONS_TABLE")
            .expect("PARTNER_CONNECTIONS_TABLE environment variable must be set");

        Self {
            dynamodb_client,
            api_gateway_client,
            table_name,
        }
    }
}

#[async_trait]
impl ConnectionRepository for DynamoDbConnectionRepository {
    async fn store_connection(
        &self,
        user_id: &str,
        connection_id: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item("user_id", AttributeValue::S(user_id.to_string()))
            .item("connection_id", AttributeValue::S(connection_id.to_string()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn remove_connection(
        &self,
        connection_id: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        // Connections are keyed by user; find the owning user via the GSI
        // and drop the row.
        let result = self
            .dynamodb_client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI_ByConnection")
            .key_condition_expression("connection_id = :connection_id")
            .expression_attribute_values(
                ":connection_id",
                AttributeValue::S(connection_id.to_string()),
            )
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;

        for item in result.items.unwrap_or_default() {
            if let Some(AttributeValue::S(user_id)) = item.get("user_id") {
                self.dynamodb_client
                    .delete_item()
                    .table_name(&self.table_name)
                    .key("user_id", AttributeValue::S(user_id.clone()))
                    .send()
                    .await
                    .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn get_connection_id(
        &self,
        user_id: &str,
    ) -> Result<Option<String>, ConnectionRepositoryError> {
        let result = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key("user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::DynamoDb(e.to_string()))?;

        Ok(result.item.and_then(|item| match item.get("connection_id") {
            Some(AttributeValue::S(connection_id)) => Some(connection_id.clone()),
            _ => None,
        }))
    }

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), ConnectionRepositoryError> {
        self.api_gateway_client
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(message.as_bytes()))
            .send()
            .await
            .map_err(|e| ConnectionRepositoryError::Push(e.to_string()))?;

        Ok(())
    }
}
