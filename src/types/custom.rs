//! Envelope and message-body types the view layer exchanges with its
//! collaborators: the gateway envelope events arrive in, the body handed to
//! the transport, the message the transport echoes back, and interaction
//! callback responses.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::Serialize_repr;

use crate::types::component::Component;
use crate::types::id::{
    marker::{ChannelMarker, MessageMarker},
    Id,
};

// ---------------------------------------------------------------------------
// Gateway payload (the raw WebSocket envelope)
// ---------------------------------------------------------------------------

/// Raw gateway payload envelope.
///
/// Every message on the Discord WebSocket is wrapped in this structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayPayload {
    pub op: u8,
    pub d: Option<serde_json::Value>,
    pub s: Option<u64>,
    pub t: Option<String>,
}

// ---------------------------------------------------------------------------
// Message flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Message flags relevant to component messages.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Only the invoking user can see the message.
        const EPHEMERAL = 1 << 6;
        /// The message uses the nested layout components. Such a message
        /// cannot carry `content` or embeds.
        const IS_COMPONENTS_V2 = 1 << 15;
    }
}

impl Serialize for MessageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

// ---------------------------------------------------------------------------
// Outbound message body
// ---------------------------------------------------------------------------

/// Body for sending or editing a message that carries components.
///
/// ```ignore
/// let body = MessagePayload::new(view.to_components())
///     .content("Pick one")
///     .flags(view.message_flags());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "MessageFlags::is_empty")]
    pub flags: MessageFlags,
}

impl MessagePayload {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            content: None,
            components,
            flags: MessageFlags::empty(),
        }
    }

    /// Set the text content of the message.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// The message as the server echoed it after a send or edit.
///
/// Components come back with server-assigned `id`s filled in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EchoedMessage {
    pub id: Id<MessageMarker>,
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub flags: MessageFlags,
}

// ---------------------------------------------------------------------------
// Interaction response types
// ---------------------------------------------------------------------------

/// An interaction response sent back to Discord.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

/// The type of callback for an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

/// Data payload for an interaction callback.
///
/// Supports `Default` for construction with struct update syntax
/// (`..Default::default()`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    /// For modal responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::component::TextDisplay;
    use serde_json::json;

    #[test]
    fn message_payload_serializes() {
        let body = MessagePayload::new(vec![Component::TextDisplay(TextDisplay {
            id: None,
            content: "hi".to_owned(),
        })])
        .flags(MessageFlags::IS_COMPONENTS_V2);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "components": [{ "type": 10, "content": "hi" }],
                "flags": 32768,
            })
        );
    }

    #[test]
    fn message_payload_omits_empty_flags() {
        let json = serde_json::to_string(&MessagePayload::new(Vec::new()).content("x")).unwrap();
        assert!(json.contains("\"content\":\"x\""));
        assert!(!json.contains("flags"));
    }

    #[test]
    fn echoed_message_keeps_unknown_flag_bits() {
        let echo: EchoedMessage = serde_json::from_value(json!({
            "id": "55",
            "channel_id": "66",
            "flags": (1u64 << 15) | (1u64 << 40),
            "components": [],
        }))
        .unwrap();
        assert!(echo.flags.contains(MessageFlags::IS_COMPONENTS_V2));
        assert_eq!(echo.flags.bits() & (1 << 40), 1 << 40);
    }

    #[test]
    fn gateway_payload_deserializes() {
        let json = r#"{"op":0,"d":null,"s":1,"t":"INTERACTION_CREATE"}"#;
        let payload: GatewayPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.op, 0);
        assert_eq!(payload.s, Some(1));
        assert_eq!(payload.t.as_deref(), Some("INTERACTION_CREATE"));
    }

    #[test]
    fn interaction_callback_type_is_integer() {
        let json = serde_json::to_string(&InteractionCallbackType::UpdateMessage).unwrap();
        assert_eq!(json, "7");
    }
}
