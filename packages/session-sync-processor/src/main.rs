use std::sync::Arc;

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_dynamo::aws_sdk_dynamodb_1::from_item;
use serde_json::json;
use shared::models::game_session::GameSession;
use shared::repositories::connection_repository::{
    ConnectionRepository, DynamoDbConnectionRepository,
};
use tracing::{error, info, warn};

/// Change-feed fan-out: every write to the session table becomes a coarse
/// "something changed, refetch" push to both partners. The record payload is
/// read only to learn who to address; it is never forwarded.
#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    info!("Session sync processor starting");

    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);
    let connections: Arc<dyn ConnectionRepository> = Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    ));

    run(service_fn(|event: LambdaEvent<Event>| {
        let connections = connections.clone();
        async move {
            let (event, _context) = event.into_parts();

            for record in event.records {
                if let Err(e) = process_record(connections.as_ref(), record).await {
                    error!("Failed to process record: {}", e);
                }
            }

            Ok::<(), Error>(())
        }
    }))
    .await
}

async fn process_record(
    connections: &dyn ConnectionRepository,
    record: EventRecord,
) -> Result<(), Box<dyn std::error::Error>> {
    let (event_type, image) = match record.event_name.as_str() {
        "INSERT" => ("insert", record.change.new_image),
        "MODIFY" => ("update", record.change.new_image),
        "REMOVE" => ("delete", record.change.old_image),
        other => {
            warn!("Unhandled event type: {}", other);
            return Ok(());
        }
    };

    let session: GameSession = from_item(image.into())?;

    // The signal carries no state: partners refetch the record themselves.
    let message = json!({
        "type": "session_changed",
        "event": event_type,
        "session_id": session.session_id,
    })
    .to_string();

    for user_id in [&session.partner_a, &session.partner_b] {
        match connections.get_connection_id(user_id).await {
            Ok(Some(connection_id)) => {
                if let Err(e) = connections.send_message(&connection_id, &message).await {
                    warn!("Failed to push change signal to {}: {}", user_id, e);
                } else {
                    info!(
                        "Pushed {} signal for session {} to {}",
                        event_type, session.session_id, user_id
                    );
                }
            }
            Ok(None) => {
                info!("Partner {} is not connected, skipping change signal", user_id);
            }
            Err(e) => {
                warn!("Failed to look up connection for {}: {}", user_id, e);
            }
        }
    }

    Ok(())
}
