use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

pub mod state;

use shared::repositories::connection_repository::DynamoDbConnectionRepository;

#[derive(Debug, Deserialize)]
pub struct WebSocketEvent {
    #[serde(rename = "requestContext")]
    pub request_context: RequestContext,
    pub body: Option<String>,
    #[serde(rename = "queryStringParameters")]
    pub query_string_parameters: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RequestContext {
    #[serde(rename = "connectionId")]
    pub connection_id: String,
    #[serde(rename = "routeKey")]
    pub route_key: String,
}

#[derive(Debug, Serialize)]
pub struct WebSocketResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);

    let connections = Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    ));
    let app_state = state::AppState { connections };

    run(service_fn(|event: LambdaEvent<WebSocketEvent>| {
        websocket_handler(event, app_state.clone())
    }))
    .await
}

async fn websocket_handler(
    event: LambdaEvent<WebSocketEvent>,
    state: state::AppState,
) -> Result<WebSocketResponse, Error> {
    let websocket_event = event.payload;
    let route_key = &websocket_event.request_context.route_key;
    let connection_id = &websocket_event.request_context.connection_id;

    debug!(
        "Processing route_key: {}, connection_id: {}",
        route_key, connection_id
    );

    match route_key.as_str() {
        "$connect" => handle_connect(connection_id, &websocket_event, state).await,
        "$disconnect" => handle_disconnect(connection_id, state).await,
        "$default" => handle_default_message(&websocket_event).await,
        _ => {
            error!("Unknown route key: {}", route_key);
            Ok(WebSocketResponse {
                status_code: 400,
                body: Some(json!({"error": "Unknown route"}).to_string()),
            })
        }
    }
}

async fn handle_connect(
    connection_id: &str,
    event: &WebSocketEvent,
    state: state::AppState,
) -> Result<WebSocketResponse, Error> {
    let user_id = event
        .query_string_parameters
        .as_ref()
        .and_then(|params| params.get("user_id"))
        .and_then(|user_id| user_id.as_str());

    let Some(user_id) = user_id else {
        // A connection with no owner can never be addressed by the fan-out.
        error!("Connection {} attempted without user_id", connection_id);
        return Ok(WebSocketResponse {
            status_code: 400,
            body: Some(json!({"error": "user_id query parameter is required"}).to_string()),
        });
    };

    info!(
        "WebSocket connection established for {}: {}",
        user_id, connection_id
    );

    if let Err(e) = state
        .connections
        .store_connection(user_id, connection_id)
        .await
    {
        error!("Failed to store connection {}: {}", connection_id, e);
        return Ok(WebSocketResponse {
            status_code: 500,
            body: Some(json!({"error": "Failed to store connection"}).to_string()),
        });
    }

    Ok(WebSocketResponse {
        status_code: 200,
        body: None,
    })
}

async fn handle_disconnect(
    connection_id: &str,
    state: state::AppState,
) -> Result<WebSocketResponse, Error> {
    info!("WebSocket connection disconnected: {}", connection_id);

    if let Err(e) = state.connections.remove_connection(connection_id).await {
        error!("Failed to remove connection {}: {}", connection_id, e);
    }

    Ok(WebSocketResponse {
        status_code: 200,
        body: None,
    })
}

async fn handle_default_message(event: &WebSocketEvent) -> Result<WebSocketResponse, Error> {
    let connection_id = &event.request_context.connection_id;

    if let Some(body) = &event.body {
        match serde_json::from_str::<Value>(body) {
            Ok(message) => {
                // The sync loop is one-way: clients refetch over HTTP, so
                // inbound messages are only acknowledged.
                info!(
                    "Received message from connection {}: {}",
                    connection_id, message
                );
            }
            Err(e) => {
                error!("Failed to parse message from {}: {}", connection_id, e);
                return Ok(WebSocketResponse {
                    status_code: 400,
                    body: Some(json!({"error": "Invalid JSON format"}).to_string()),
                });
            }
        }
    }

    Ok(WebSocketResponse {
        status_code: 200,
        body: Some(
            json!({
                "action": "ack",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
            .to_string(),
        ),
    })
}
