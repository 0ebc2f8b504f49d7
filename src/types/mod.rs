//! Discord wire types for components and the payloads around them.
//!
//! Everything in here is plain data: serde derives, builders, and the
//! tag-dispatching component codec. Interactive behaviour (layout, callbacks,
//! dispatch) lives in [`crate::ui`].

/// Message and modal components.
pub mod component;

/// Type-safe IDs with marker types.
pub mod id;

/// Inbound interaction payloads.
pub mod interaction;

/// Serde helpers shared by the component payloads.
pub(crate) mod util;

/// Helper functions for raw component construction.
pub mod builders;

/// Gateway envelope, message bodies, and interaction responses.
pub mod custom;

// ===========================================================================
// Convenience re-exports
// ===========================================================================
// The rest of the codebase does `use crate::types::*` so we re-export the
// most commonly used items here.

// ---- IDs ------------------------------------------------------------------
pub use self::id::marker::{
    ApplicationMarker, AttachmentMarker, ChannelMarker, EmojiMarker, GenericMarker, GuildMarker,
    InteractionMarker, MessageMarker, RoleMarker, SkuMarker, UserMarker,
};
pub use self::id::Id;

// ---- Components -----------------------------------------------------------
pub use self::component::{
    ButtonStyle, Component, ComponentType, GroupOption, PartialEmoji, SelectMenuOption,
    SelectMenuType, SeparatorSpacing, TextInputStyle, UnfurledMediaItem,
};

// ---- Interactions ---------------------------------------------------------
pub use self::interaction::{
    ComponentState, Interaction, InteractionData, InteractionType, ModalSubmitData,
};

// ---- Envelopes and bodies -------------------------------------------------
pub use self::custom::{
    EchoedMessage, GatewayPayload, InteractionCallbackData, InteractionCallbackType,
    InteractionResponse, MessageFlags, MessagePayload,
};

// ---- Component helpers ----------------------------------------------------
pub use self::builders::{
    action_row, button, container, link_button, string_select, text_display, text_input,
};
