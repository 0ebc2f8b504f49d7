use serde::{Deserialize, Serialize};

use crate::types::id::{marker::EmojiMarker, Id};
use crate::types::util::is_false;

/// Emoji shown on a button or select option.
///
/// Unicode emoji only carry a `name`; custom guild emoji carry an `id` and
/// usually a `name` as well.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PartialEmoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<EmojiMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub animated: bool,
}

impl PartialEmoji {
    /// A plain unicode emoji such as `"🎲"`.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    /// A custom emoji uploaded to a guild.
    pub fn custom(id: Id<EmojiMarker>, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            animated,
        }
    }
}

impl From<&str> for PartialEmoji {
    fn from(name: &str) -> Self {
        Self::unicode(name)
    }
}
