//! Typed gateway events.
//!
//! Instead of matching on raw `(op, t, serde_json::Value)` tuples everywhere,
//! dispatch payloads are deserialised into this enum so the view store can
//! pattern-match on the handful of events that concern component messages.

use serde::Deserialize;
use tracing::warn;

use crate::types::*;

// ---------------------------------------------------------------------------
// The top-level event enum
// ---------------------------------------------------------------------------

/// A parsed event relevant to component messages.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// An interaction was created (button, select, modal submit, command).
    InteractionCreate(Interaction),

    /// A message was edited. `components` is `None` when the edit didn't
    /// touch them (partial update).
    MessageUpdate(MessageUpdate),

    /// A message was deleted.
    MessageDelete(MessageDelete),

    /// An event we received but don't have a typed variant for.
    /// Carries the event name and raw JSON so callers can still inspect it.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<serde_json::Value>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageUpdate {
    pub id: Id<MessageMarker>,
    pub channel_id: Option<Id<ChannelMarker>>,
    pub components: Option<Vec<Component>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageDelete {
    pub id: Id<MessageMarker>,
    pub channel_id: Option<Id<ChannelMarker>>,
}

// ---------------------------------------------------------------------------
// Parsing from a raw GatewayPayload
// ---------------------------------------------------------------------------

impl GatewayEvent {
    /// Convert a raw [`GatewayPayload`] into a typed event.
    ///
    /// This never fails. Unrecognised or malformed events become
    /// [`GatewayEvent::Unknown`].
    pub fn from_payload(payload: GatewayPayload) -> Self {
        match payload.op {
            0 => Self::parse_dispatch(payload.t.as_deref(), payload.d),
            _ => GatewayEvent::Unknown {
                event_name: payload.t,
                op: payload.op,
                data: payload.d,
            },
        }
    }

    /// Parse an op-0 DISPATCH event by its `t` name.
    fn parse_dispatch(event_name: Option<&str>, data: Option<serde_json::Value>) -> Self {
        let (Some(name), Some(d)) = (event_name, data.clone()) else {
            return GatewayEvent::Unknown {
                event_name: event_name.map(str::to_owned),
                op: 0,
                data,
            };
        };

        let parsed = match name {
            "INTERACTION_CREATE" => {
                serde_json::from_value::<Interaction>(d.clone()).map(GatewayEvent::InteractionCreate)
            }
            "MESSAGE_UPDATE" => {
                serde_json::from_value::<MessageUpdate>(d.clone()).map(GatewayEvent::MessageUpdate)
            }
            "MESSAGE_DELETE" => {
                serde_json::from_value::<MessageDelete>(d.clone()).map(GatewayEvent::MessageDelete)
            }
            _ => {
                return GatewayEvent::Unknown {
                    event_name: Some(name.to_owned()),
                    op: 0,
                    data: Some(d),
                }
            }
        };

        parsed.unwrap_or_else(|e| {
            warn!(event = name, error = %e, "failed to parse dispatch payload");
            GatewayEvent::Unknown {
                event_name: Some(name.to_owned()),
                op: 0,
                data: Some(d),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dispatch(name: &str, d: serde_json::Value) -> GatewayPayload {
        GatewayPayload {
            op: 0,
            d: Some(d),
            s: Some(4),
            t: Some(name.to_owned()),
        }
    }

    #[test]
    fn parses_interaction_create() {
        let event = GatewayEvent::from_payload(dispatch(
            "INTERACTION_CREATE",
            json!({
                "id": "1",
                "type": 3,
                "token": "tok",
                "message": { "id": "10" },
                "data": { "custom_id": "go", "component_type": 2 },
            }),
        ));
        let GatewayEvent::InteractionCreate(interaction) = event else {
            panic!("expected InteractionCreate, got {event:?}");
        };
        assert_eq!(interaction.custom_id(), Some("go"));
    }

    #[test]
    fn partial_message_update_has_no_components() {
        let event = GatewayEvent::from_payload(dispatch(
            "MESSAGE_UPDATE",
            json!({ "id": "10", "channel_id": "20", "content": "edited" }),
        ));
        let GatewayEvent::MessageUpdate(update) = event else {
            panic!("expected MessageUpdate, got {event:?}");
        };
        assert_eq!(update.id, Id::new(10));
        assert!(update.components.is_none());
    }

    #[test]
    fn message_update_carries_components() {
        let event = GatewayEvent::from_payload(dispatch(
            "MESSAGE_UPDATE",
            json!({
                "id": "10",
                "components": [{ "type": 1, "id": 1, "components": [
                    { "type": 2, "id": 2, "style": 1, "custom_id": "go", "label": "Go" },
                ]}],
            }),
        ));
        let GatewayEvent::MessageUpdate(update) = event else {
            panic!("expected MessageUpdate, got {event:?}");
        };
        assert_eq!(update.components.map(|c| c.len()), Some(1));
    }

    #[test]
    fn malformed_payload_becomes_unknown() {
        let event = GatewayEvent::from_payload(dispatch("MESSAGE_DELETE", json!({ "id": [] })));
        assert!(matches!(
            event,
            GatewayEvent::Unknown { ref event_name, op: 0, data: Some(_) }
                if event_name.as_deref() == Some("MESSAGE_DELETE")
        ));
    }

    #[test]
    fn non_dispatch_ops_are_unknown() {
        let event = GatewayEvent::from_payload(GatewayPayload {
            op: 11,
            d: None,
            s: None,
            t: None,
        });
        assert!(matches!(event, GatewayEvent::Unknown { op: 11, .. }));
    }
}
