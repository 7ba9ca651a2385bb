use std::sync::Arc;

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_dynamo::aws_sdk_dynamodb_1::from_item;
use shared::models::game_session::GameSession;
use shared::repositories::connection_repository::DynamoDbConnectionRepository;
use shared::services::notification_service::{PartnerEvent, PartnerNotifier, PushNotifier};
use tracing::{error, info};

/// Nudges the non-initiating partner when a fresh session appears: "your
/// partner started a game". Fire-and-forget by construction.
#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    info!("Partner notifier starting");

    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let api_gateway_client = aws_sdk_apigatewaymanagement::Client::new(&config);
    let notifier = PushNotifier::new(Arc::new(DynamoDbConnectionRepository::new(
        dynamodb_client,
        api_gateway_client,
    )));

    run(service_fn(|event: LambdaEvent<Event>| {
        let notifier = notifier.clone();
        async move {
            let (event, _context) = event.into_parts();

            info!("Processing {} records", event.records.len());
            for record in event.records {
                if let Err(e) = process_record(&notifier, record).await {
                    error!("Failed to process record: {}", e);
                }
            }

            Ok::<(), Error>(())
        }
    }))
    .await
}

async fn process_record(
    notifier: &PushNotifier,
    record: EventRecord,
) -> Result<(), Box<dyn std::error::Error>> {
    match record.event_name.as_str() {
        "INSERT" => {
            let session: GameSession = from_item(record.change.new_image.into())?;
            let partner = session
                .partner_of(&session.started_by)
                .unwrap_or(&session.partner_b)
                .to_string();

            info!(
                "New {} session {} started by {}, nudging {}",
                session.game_kind.as_str(),
                session.session_id,
                session.started_by,
                partner
            );
            notifier
                .notify_partner(&partner, PartnerEvent::GameStarted, session.game_kind.as_str())
                .await;
        }
        _ => {
            info!("Unhandled event type: {}", record.event_name);
        }
    }

    Ok(())
}
