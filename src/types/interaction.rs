//! Inbound interaction payloads.
//!
//! Only the parts the view layer routes on are modelled: who clicked, on
//! which message, which component, and what values came back. Slash-command
//! and autocomplete interactions parse with `data: None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::types::component::ComponentType;
use crate::types::id::{
    marker::{
        ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, MessageMarker,
        UserMarker,
    },
    Id,
};

/// Type of an [`Interaction`].
#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
}

/// A user interaction delivered by the gateway or an outgoing webhook.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction {
    pub id: Id<InteractionMarker>,
    pub application_id: Option<Id<ApplicationMarker>>,
    pub kind: InteractionType,
    pub token: String,
    pub channel_id: Option<Id<ChannelMarker>>,
    pub guild_id: Option<Id<GuildMarker>>,
    /// Message the component lives on, for component interactions.
    pub message_id: Option<Id<MessageMarker>>,
    /// The invoking user. In a guild this comes from `member.user`, in a DM
    /// from the top-level `user`.
    pub user_id: Option<Id<UserMarker>>,
    pub data: Option<InteractionData>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionData {
    MessageComponent(ComponentState),
    ModalSubmit(ModalSubmitData),
}

/// Value(s) a user produced with one component.
///
/// Selects, checkbox groups and file uploads report `values`; text inputs,
/// radio groups and checkboxes report a single `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentState {
    pub custom_id: String,
    pub component_type: ComponentType,
    pub values: Vec<String>,
    pub value: Option<Value>,
}

impl ComponentState {
    /// The single `value` as a string, if it is one.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }

    /// The single `value` as a bool, if it is one.
    pub fn value_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(Value::as_bool)
    }
}

/// Submitted modal. Nested rows and labels are flattened away; every input
/// that reported a value appears once, in submission order.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalSubmitData {
    pub custom_id: String,
    pub components: Vec<ComponentState>,
}

impl ModalSubmitData {
    pub fn get(&self, custom_id: &str) -> Option<&ComponentState> {
        self.components.iter().find(|c| c.custom_id == custom_id)
    }
}

impl Interaction {
    /// Parse a raw `INTERACTION_CREATE` payload.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The `custom_id` of the component or modal that raised this
    /// interaction.
    pub fn custom_id(&self) -> Option<&str> {
        match self.data.as_ref()? {
            InteractionData::MessageComponent(state) => Some(&state.custom_id),
            InteractionData::ModalSubmit(modal) => Some(&modal.custom_id),
        }
    }

    /// Component data, for [`InteractionType::MessageComponent`].
    pub fn component_data(&self) -> Option<&ComponentState> {
        match self.data.as_ref()? {
            InteractionData::MessageComponent(state) => Some(state),
            InteractionData::ModalSubmit(_) => None,
        }
    }

    /// Modal data, for [`InteractionType::ModalSubmit`].
    pub fn modal_data(&self) -> Option<&ModalSubmitData> {
        match self.data.as_ref()? {
            InteractionData::ModalSubmit(modal) => Some(modal),
            InteractionData::MessageComponent(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawInteraction {
    id: Id<InteractionMarker>,
    application_id: Option<Id<ApplicationMarker>>,
    #[serde(rename = "type")]
    kind: InteractionType,
    token: String,
    channel_id: Option<Id<ChannelMarker>>,
    guild_id: Option<Id<GuildMarker>>,
    message: Option<RawMessage>,
    member: Option<RawMember>,
    user: Option<RawUser>,
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RawMessage {
    id: Id<MessageMarker>,
}

#[derive(Deserialize)]
struct RawMember {
    user: Option<RawUser>,
}

#[derive(Deserialize)]
struct RawUser {
    id: Id<UserMarker>,
}

#[derive(Deserialize)]
struct RawComponentData {
    custom_id: String,
    component_type: ComponentType,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Deserialize)]
struct RawModalData {
    custom_id: String,
    #[serde(default)]
    components: Vec<Value>,
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = RawInteraction::deserialize(deserializer)?;

        let data = match (raw.kind, raw.data) {
            (InteractionType::MessageComponent, Some(data)) => {
                let data: RawComponentData =
                    serde_json::from_value(data).map_err(D::Error::custom)?;
                Some(InteractionData::MessageComponent(ComponentState {
                    custom_id: data.custom_id,
                    component_type: data.component_type,
                    values: data.values,
                    value: None,
                }))
            }
            (InteractionType::ModalSubmit, Some(data)) => {
                let data: RawModalData = serde_json::from_value(data).map_err(D::Error::custom)?;
                let mut components = Vec::new();
                for component in &data.components {
                    flatten_submitted(component, &mut components);
                }
                Some(InteractionData::ModalSubmit(ModalSubmitData {
                    custom_id: data.custom_id,
                    components,
                }))
            }
            _ => None,
        };

        let user_id = raw
            .member
            .and_then(|member| member.user)
            .or(raw.user)
            .map(|user| user.id);

        Ok(Self {
            id: raw.id,
            application_id: raw.application_id,
            kind: raw.kind,
            token: raw.token,
            channel_id: raw.channel_id,
            guild_id: raw.guild_id,
            message_id: raw.message.map(|message| message.id),
            user_id,
            data,
        })
    }
}

/// Collect every submitted input below `component`.
fn flatten_submitted(component: &Value, out: &mut Vec<ComponentState>) {
    let kind = component
        .get("type")
        .and_then(Value::as_u64)
        .and_then(|tag| u8::try_from(tag).ok())
        .map(|tag| ComponentType::from(u64::from(tag)));

    if let (Some(kind), Some(custom_id)) = (
        kind,
        component.get("custom_id").and_then(Value::as_str),
    ) {
        let values = component
            .get("values")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();
        out.push(ComponentState {
            custom_id: custom_id.to_owned(),
            component_type: kind,
            values,
            value: component.get("value").cloned(),
        });
    }

    if let Some(children) = component.get("components").and_then(Value::as_array) {
        for child in children {
            flatten_submitted(child, out);
        }
    }
    if let Some(child) = component.get("component") {
        flatten_submitted(child, out);
    }
}
