use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::PartialEmoji;
use crate::types::id::{marker::SkuMarker, Id};
use crate::types::util::is_false;

/// Clickable button, always placed inside an [`ActionRow`] or as a
/// [`Section`] accessory.
///
/// Link buttons carry a `url` and premium buttons a `sku_id`; every other
/// style carries a `custom_id` that comes back in the interaction payload.
///
/// [`ActionRow`]: super::ActionRow
/// [`Section`]: super::Section
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Button {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<Id<SkuMarker>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

/// Visual style of a [`Button`].
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    /// Blurple.
    #[default]
    Primary = 1,
    /// Grey.
    Secondary = 2,
    /// Green.
    Success = 3,
    /// Red.
    Danger = 4,
    /// Navigates to a URL; never raises an interaction.
    Link = 5,
    /// Purchase button for a SKU; never raises an interaction.
    Premium = 6,
}

impl ButtonStyle {
    /// Whether buttons of this style carry a `custom_id` and raise
    /// interactions.
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Link | Self::Premium)
    }
}
