use serde::{Deserialize, Serialize};

use super::{ComponentType, PartialEmoji};
use crate::types::id::{marker::GenericMarker, Id};
use crate::types::util::is_false;

/// Dropdown menu. One struct covers all five select flavours; the flavour
/// lives in [`SelectMenu::kind`] and becomes the wire `type` tag.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectMenu {
    /// Set by the component decoder from the `type` tag.
    #[serde(skip)]
    pub kind: SelectMenuType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectMenuOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_values: Vec<SelectDefaultValue>,
    /// Only meaningful inside a modal [`Label`](super::Label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Which entities a [`SelectMenu`] offers.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SelectMenuType {
    /// Developer-defined string options.
    #[default]
    Text,
    User,
    Role,
    Mentionable,
    Channel,
}

impl SelectMenuType {
    /// The component `type` tag this flavour is sent with.
    pub const fn component_type(self) -> ComponentType {
        match self {
            Self::Text => ComponentType::StringSelect,
            Self::User => ComponentType::UserSelect,
            Self::Role => ComponentType::RoleSelect,
            Self::Mentionable => ComponentType::MentionableSelect,
            Self::Channel => ComponentType::ChannelSelect,
        }
    }

    /// Inverse of [`component_type`](Self::component_type).
    pub const fn from_component_type(kind: ComponentType) -> Option<Self> {
        match kind {
            ComponentType::StringSelect => Some(Self::Text),
            ComponentType::UserSelect => Some(Self::User),
            ComponentType::RoleSelect => Some(Self::Role),
            ComponentType::MentionableSelect => Some(Self::Mentionable),
            ComponentType::ChannelSelect => Some(Self::Channel),
            _ => None,
        }
    }
}

/// One entry of a string [`SelectMenu`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectMenuOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

impl SelectMenuOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn emoji(mut self, emoji: impl Into<PartialEmoji>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn default_selected(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

/// Pre-selected entity of an auto-populated select.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SelectDefaultValue {
    pub id: Id<GenericMarker>,
    #[serde(rename = "type")]
    pub kind: SelectDefaultValueType,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectDefaultValueType {
    User,
    Role,
    Channel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_type_maps_to_component_type() {
        for kind in [
            SelectMenuType::Text,
            SelectMenuType::User,
            SelectMenuType::Role,
            SelectMenuType::Mentionable,
            SelectMenuType::Channel,
        ] {
            assert_eq!(
                SelectMenuType::from_component_type(kind.component_type()),
                Some(kind)
            );
        }
        assert_eq!(
            SelectMenuType::from_component_type(ComponentType::Button),
            None
        );
    }

    #[test]
    fn default_value_type_is_snake_case() {
        let value = SelectDefaultValue {
            id: Id::new(10),
            kind: SelectDefaultValueType::Role,
        };
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({ "id": "10", "type": "role" })
        );
    }
}
