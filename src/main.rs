//! Dice-roll demo.
//!
//! Builds a legacy view with a reroll button and a sides picker, "sends" it
//! through a transport that only logs, then feeds simulated gateway payloads
//! through an event queue into the view store, the way a bot's gateway loop
//! would.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use tracing::{error, info};

use hello_discord_views::types::*;
use hello_discord_views::ui::{Button, Item, Nestable, Select, View, ViewStore};
use hello_discord_views::{Error, GatewayEvent, Transport, TransportError};

// ---------------------------------------------------------------------------
// Transport that only logs
// ---------------------------------------------------------------------------

struct LoggingTransport {
    next_message: AtomicU64,
}

impl LoggingTransport {
    fn new() -> Self {
        Self {
            next_message: AtomicU64::new(1),
        }
    }

    fn echo(id: Id<MessageMarker>, body: &MessagePayload) -> EchoedMessage {
        EchoedMessage {
            id,
            channel_id: None,
            components: body.components.clone(),
            flags: body.flags,
        }
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn send(&self, body: &MessagePayload) -> Result<EchoedMessage, TransportError> {
        let id = Id::new_checked(self.next_message.fetch_add(1, Ordering::Relaxed))
            .ok_or_else(|| TransportError::Transport("message ids exhausted".to_owned()))?;
        info!(message = %id, body = %serde_json::to_string(body)?, "send message");
        Ok(Self::echo(id, body))
    }

    async fn edit(
        &self,
        message_id: Id<MessageMarker>,
        body: &MessagePayload,
    ) -> Result<EchoedMessage, TransportError> {
        info!(message = %message_id, body = %serde_json::to_string(body)?, "edit message");
        Ok(Self::echo(message_id, body))
    }
}

// ---------------------------------------------------------------------------
// The view
// ---------------------------------------------------------------------------

const SIDES: [u32; 5] = [4, 6, 8, 12, 20];

/// A die needs at least one side.
fn parse_sides(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|&sides| sides > 0)
}

fn dice_view(default_sides: u32) -> Result<View, Error> {
    let reroll = Button::new("Roll")
        .style(ButtonStyle::Primary)
        .custom_id("dice:reroll")
        .on_click(move |view, interaction| async move {
            let roll = {
                let mut surface = view.lock().await;
                let sides = surface
                    .get_item("dice:sides")
                    .and_then(Item::as_select)
                    .and_then(|select| select.values().first())
                    .and_then(|value| parse_sides(value))
                    .unwrap_or(default_sides);
                let roll = rand::thread_rng().gen_range(1..=sides);
                if let Some(button) = surface.get_item_mut("dice:reroll").and_then(Item::as_button_mut) {
                    button.set_label(Some(format!("Rolled {} (d{})", roll, sides)));
                }
                roll
            };
            info!(user = ?interaction.user_id, roll, "rolled");
            view.edit_message().await?;
            Ok(())
        });

    let mut sides = Select::string()
        .custom_id("dice:sides")
        .placeholder("Dice sides")
        .row(1)
        .on_select(|_, interaction| async move {
            let picked = interaction.component_data().map(|state| state.values.clone());
            info!(picked = ?picked, "sides picked");
            Ok(())
        });
    for n in SIDES {
        sides.add_option(format!("d{}", n), n.to_string())?;
    }

    let mut view = View::new()
        .timeout(Some(Duration::from_secs(30)))
        .disable_on_timeout(true);
    view.add_item(reroll)?;
    view.add_item(sides)?;
    Ok(view)
}

// ---------------------------------------------------------------------------
// Simulated gateway traffic
// ---------------------------------------------------------------------------

fn interaction_payload(message_id: Id<MessageMarker>, data: serde_json::Value) -> GatewayPayload {
    GatewayPayload {
        op: 0,
        d: Some(json!({
            "id": "1",
            "application_id": "2",
            "type": 3,
            "token": "demo",
            "channel_id": "3",
            "message": { "id": message_id.to_string() },
            "user": { "id": "4" },
            "data": data,
        })),
        s: None,
        t: Some("INTERACTION_CREATE".to_owned()),
    }
}

async fn run() -> Result<(), Error> {
    let default_sides = std::env::var("DICE_SIDES")
        .ok()
        .and_then(|value| parse_sides(&value))
        .unwrap_or(6);

    let store = ViewStore::new();
    let transport = Arc::new(LoggingTransport::new());
    let handle = store.send_view(transport, dice_view(default_sides)?).await?;
    let Some(message_id) = handle.message_id().await else {
        return Ok(());
    };

    let (events_tx, events_rx) = async_channel::unbounded::<GatewayPayload>();
    let producer = tokio::spawn(async move {
        let payloads = [
            interaction_payload(
                message_id,
                json!({ "custom_id": "dice:sides", "component_type": 3, "values": ["20"] }),
            ),
            interaction_payload(
                message_id,
                json!({ "custom_id": "dice:reroll", "component_type": 2 }),
            ),
            interaction_payload(
                message_id,
                json!({ "custom_id": "not:ours", "component_type": 2 }),
            ),
        ];
        for payload in payloads {
            if events_tx.send(payload).await.is_err() {
                break;
            }
        }
    });

    while let Ok(payload) = events_rx.recv().await {
        let event = GatewayEvent::from_payload(payload);
        match store.handle_event(&event).await {
            Some(task) => {
                if let Err(e) = task.await {
                    error!(error = %e, "callback task panicked");
                }
            }
            None => info!("event not routed to any view"),
        }
    }
    if let Err(e) = producer.await {
        error!(error = %e, "producer task failed");
    }

    handle.stop().await;
    info!(views = store.len().await, "done");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sided_dice_are_rejected() {
        assert_eq!(parse_sides("20"), Some(20));
        assert_eq!(parse_sides(" 6 "), Some(6));
        assert_eq!(parse_sides("0"), None);
        assert_eq!(parse_sides("-3"), None);
        assert_eq!(parse_sides("d6"), None);
    }
}
