use std::future::Future;

use super::item::{check_len, mismatch, random_custom_id};
use super::{Disableable, ItemCallback, ViewHandle, ViewItem};
use crate::error::{CallbackError, ComponentError};
use crate::types::component;
use crate::types::{ButtonStyle, Component, ComponentType, Id, Interaction, PartialEmoji, SkuMarker};

const MAX_LABEL: usize = 80;
pub(crate) const MAX_CUSTOM_ID: usize = 100;

/// A clickable button. Takes one width unit of a row.
///
/// ```ignore
/// let roll = Button::new("Roll")
///     .style(ButtonStyle::Primary)
///     .custom_id("dice:roll")
///     .on_click(|view, interaction| async move {
///         tracing::info!(user = ?interaction.user_id, "rolled");
///         Ok(())
///     });
/// ```
#[derive(Clone, Debug)]
pub struct Button {
    inner: component::Button,
    row: Option<u8>,
    rendered_row: Option<u8>,
    provided_custom_id: bool,
    callback: Option<ItemCallback>,
}

impl Button {
    /// Secondary-style button with a generated custom id.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: component::Button {
                id: None,
                style: ButtonStyle::Secondary,
                label: Some(label.into()),
                emoji: None,
                custom_id: Some(random_custom_id()),
                url: None,
                sku_id: None,
                disabled: false,
            },
            row: None,
            rendered_row: None,
            provided_custom_id: false,
            callback: None,
        }
    }

    /// Button that opens `url`. Never raises an interaction.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label).url(url)
    }

    /// Button that opens the purchase flow for a SKU.
    pub fn premium(sku_id: Id<SkuMarker>) -> Self {
        let mut button = Self::new(String::new());
        button.inner.style = ButtonStyle::Premium;
        button.inner.label = None;
        button.inner.custom_id = None;
        button.inner.sku_id = Some(sku_id);
        button
    }

    pub fn from_component(inner: component::Button) -> Self {
        Self {
            inner,
            row: None,
            rendered_row: None,
            provided_custom_id: false,
            callback: None,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.inner.style = style;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.inner.label = Some(label.into());
        self
    }

    /// Set a stable custom id. Needed for the button to be persistent.
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = Some(custom_id.into());
        self.provided_custom_id = true;
        self
    }

    pub fn emoji(mut self, emoji: impl Into<PartialEmoji>) -> Self {
        self.inner.emoji = Some(emoji.into());
        self
    }

    /// Turn this into a link button. Drops the custom id.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner.style = ButtonStyle::Link;
        self.inner.url = Some(url.into());
        self.inner.custom_id = None;
        self.provided_custom_id = false;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.inner.disabled = disabled;
        self
    }

    /// Pin the button to a row of a legacy view.
    pub fn row(mut self, row: u8) -> Self {
        self.row = Some(row);
        self
    }

    pub fn on_click<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ViewHandle, Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.callback = Some(ItemCallback::new(f));
        self
    }

    pub fn component(&self) -> &component::Button {
        &self.inner
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.inner.label = label;
    }

    pub fn set_style(&mut self, style: ButtonStyle) {
        self.inner.style = style;
    }

    pub fn set_emoji(&mut self, emoji: Option<PartialEmoji>) {
        self.inner.emoji = emoji;
    }

    pub fn callback(&self) -> Option<&ItemCallback> {
        self.callback.as_ref()
    }

    pub fn set_callback(&mut self, callback: ItemCallback) {
        self.callback = Some(callback);
    }
}

impl ViewItem for Button {
    fn component_type(&self) -> ComponentType {
        ComponentType::Button
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn custom_id(&self) -> Option<&str> {
        self.inner.custom_id.as_deref()
    }

    fn width(&self) -> u8 {
        1
    }

    fn row(&self) -> Option<u8> {
        self.row
    }

    fn set_row(&mut self, row: Option<u8>) {
        self.row = row;
    }

    fn rendered_row(&self) -> Option<u8> {
        self.rendered_row
    }

    fn set_rendered_row(&mut self, row: Option<u8>) {
        self.rendered_row = row;
    }

    fn is_dispatchable(&self) -> bool {
        self.inner.custom_id.is_some()
    }

    fn is_persistent(&self) -> bool {
        !self.is_dispatchable() || self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len("button label", self.inner.label.as_deref(), MAX_LABEL)?;
        check_len("button custom_id", self.inner.custom_id.as_deref(), MAX_CUSTOM_ID)?;
        match self.inner.style {
            ButtonStyle::Link if self.inner.url.is_none() => {
                Err(ComponentError::invalid("button url", "link buttons need a url"))
            }
            ButtonStyle::Premium if self.inner.sku_id.is_none() => Err(ComponentError::invalid(
                "button sku_id",
                "premium buttons need a sku_id",
            )),
            style if style.is_interactive() && self.inner.custom_id.is_none() => Err(
                ComponentError::invalid("button custom_id", "interactive buttons need a custom_id"),
            ),
            style if !style.is_interactive() && self.inner.custom_id.is_some() => Err(
                ComponentError::invalid("button custom_id", "link and premium buttons can't have one"),
            ),
            _ => Ok(()),
        }
    }

    fn to_component(&self) -> Component {
        Component::Button(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Button(inner) => self.inner = inner,
            other => mismatch(ComponentType::Button, &other),
        }
    }
}

impl Disableable for Button {
    fn is_disabled(&self) -> bool {
        self.inner.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.inner.disabled = disabled;
    }
}
