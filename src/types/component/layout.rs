//! Components that hold other components.

use serde::{Deserialize, Serialize};

use super::Component;
use crate::types::util::{is_false, nullable};

/// Horizontal row of buttons, or a single select.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Up to three text blocks with an optional accessory on the side.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Box<Component>>,
}

/// Boxed group of components with an optional accent colour stripe.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub components: Vec<Component>,
    /// `Some(None)` is sent as an explicit `null`, which clears a colour
    /// previously set on the message.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "nullable"
    )]
    pub accent_color: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub spoiler: bool,
}

/// Modal wrapper giving a single input a label and description.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component: Box<Component>,
}
