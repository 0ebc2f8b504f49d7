//! Markers for various resource types, such as channels or users.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. If IDs were only 64-bit
//! integers then a message's ID may be erroneously used in the place of where
//! a channel's ID is required; by using markers it can be ensured that only an
//! ID with a [`ChannelMarker`] can be used where a channel's ID is required.

/// Marker for application IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
///
/// Uploaded files referenced by a [`FileUpload`] submission carry this marker.
///
/// [`FileUpload`]: crate::types::component::FileUpload
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for emoji IDs.
///
/// Types such as [`PartialEmoji`] use this ID marker.
///
/// [`PartialEmoji`]: crate::types::component::PartialEmoji
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for generic IDs.
///
/// Select default values may point at users, roles or channels, so they use
/// this marker.
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
///
/// Types such as [`Interaction`] use this ID marker.
///
/// [`Interaction`]: crate::types::interaction::Interaction
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
///
/// The view store keys its routing tables with this marker.
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for SKU IDs.
///
/// Premium [`Button`]s reference a SKU instead of a custom ID.
///
/// [`Button`]: crate::types::component::Button
#[derive(Debug)]
#[non_exhaustive]
pub struct SkuMarker;

/// Marker for user IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
