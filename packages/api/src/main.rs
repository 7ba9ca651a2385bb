use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod routes;
pub mod state;

use shared::repositories::connection_repository::DynamoDbConnectionRepository;
use shared::repositories::history_repository::DynamoDbHistoryRepository;
use shared::repositories::session_repository::DynamoDbSessionRepository;
use shared::services::coordinator::SessionCoordinator;
use shared::services::notification_service::PushNotifier;
use shared::services::prompt_service::StaticPromptProvider;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);

    let session_repository = Arc::new(DynamoDbSessionRepository::new(dynamodb_client.clone()));
    let history_repository = Arc::new(DynamoDbHistoryRepository::new(dynamodb_client.clone()));
    let connection_repository = Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    ));
    let notifier = Arc::new(PushNotifier::new(connection_repository));
    let prompts = Arc::new(StaticPromptProvider::new());

    let coordinator = Arc::new(SessionCoordinator::new(
        session_repository,
        history_repository,
        notifier,
        prompts,
    ));

    let app_state = state::AppState { coordinator };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::sessions::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
