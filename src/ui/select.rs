use std::future::Future;

use super::button::MAX_CUSTOM_ID;
use super::item::{check_len, mismatch, random_custom_id};
use super::{Disableable, ItemCallback, ViewHandle, ViewItem};
use crate::error::{CallbackError, ComponentError};
use crate::types::component::{self, SelectDefaultValue};
use crate::types::{Component, ComponentState, ComponentType, Interaction, SelectMenuOption, SelectMenuType};

pub(crate) const MAX_OPTIONS: usize = 25;
const MAX_PLACEHOLDER: usize = 150;
const MAX_OPTION_LABEL: usize = 100;

/// A select menu. Fills a whole row on its own.
///
/// String selects carry their own options; user, role, mentionable and
/// channel selects are populated by the client.
#[derive(Clone, Debug)]
pub struct Select {
    inner: component::SelectMenu,
    row: Option<u8>,
    rendered_row: Option<u8>,
    provided_custom_id: bool,
    values: Vec<String>,
    callback: Option<ItemCallback>,
}

impl Select {
    pub fn new(kind: SelectMenuType) -> Self {
        Self {
            inner: component::SelectMenu {
                kind,
                id: None,
                custom_id: random_custom_id(),
                options: Vec::new(),
                placeholder: None,
                min_values: None,
                max_values: None,
                disabled: false,
                channel_types: Vec::new(),
                default_values: Vec::new(),
                required: None,
            },
            row: None,
            rendered_row: None,
            provided_custom_id: false,
            values: Vec::new(),
            callback: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SelectMenuType::Text)
    }

    pub fn user() -> Self {
        Self::new(SelectMenuType::User)
    }

    pub fn role() -> Self {
        Self::new(SelectMenuType::Role)
    }

    pub fn mentionable() -> Self {
        Self::new(SelectMenuType::Mentionable)
    }

    pub fn channel() -> Self {
        Self::new(SelectMenuType::Channel)
    }

    pub fn from_component(inner: component::SelectMenu) -> Self {
        Self {
            inner,
            row: None,
            rendered_row: None,
            provided_custom_id: false,
            values: Vec::new(),
            callback: None,
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.inner.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_values(mut self, min: u8) -> Self {
        self.inner.min_values = Some(min);
        self
    }

    pub fn max_values(mut self, max: u8) -> Self {
        self.inner.max_values = Some(max);
        self
    }

    /// Replace the options. Checked against limits when the select is added
    /// to a view.
    pub fn options(mut self, options: Vec<SelectMenuOption>) -> Self {
        self.inner.options = options;
        self
    }

    /// Channel types offered by a channel select.
    pub fn channel_types(mut self, channel_types: Vec<u8>) -> Self {
        self.inner.channel_types = channel_types;
        self
    }

    pub fn default_values(mut self, default_values: Vec<SelectDefaultValue>) -> Self {
        self.inner.default_values = default_values;
        self
    }

    /// Whether an answer is required, when used inside a modal.
    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = Some(required);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.inner.disabled = disabled;
        self
    }

    pub fn row(mut self, row: u8) -> Self {
        self.row = Some(row);
        self
    }

    pub fn on_select<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ViewHandle, Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        self.callback = Some(ItemCallback::new(f));
        self
    }

    /// Add one option to a string select.
    pub fn append_option(&mut self, option: SelectMenuOption) -> Result<&mut Self, ComponentError> {
        if self.inner.kind != SelectMenuType::Text {
            return Err(ComponentError::invalid(
                "select options",
                "only string selects carry options",
            ));
        }
        if self.inner.options.len() >= MAX_OPTIONS {
            return Err(ComponentError::CapacityExceeded {
                container: "Select",
                max: MAX_OPTIONS,
            });
        }
        check_len("option label", Some(&option.label), MAX_OPTION_LABEL)?;
        check_len("option value", Some(&option.value), MAX_OPTION_LABEL)?;
        self.inner.options.push(option);
        Ok(self)
    }

    pub fn add_option(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, ComponentError> {
        self.append_option(SelectMenuOption::new(label, value))
    }

    pub fn kind(&self) -> SelectMenuType {
        self.inner.kind
    }

    pub fn component(&self) -> &component::SelectMenu {
        &self.inner
    }

    /// Values the user picked in the last interaction.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn callback(&self) -> Option<&ItemCallback> {
        self.callback.as_ref()
    }

    pub fn set_callback(&mut self, callback: ItemCallback) {
        self.callback = Some(callback);
    }
}

impl ViewItem for Select {
    fn component_type(&self) -> ComponentType {
        self.inner.kind.component_type()
    }

    fn id(&self) -> Option<u32> {
        self.inner.id
    }

    fn set_id(&mut self, id: Option<u32>) {
        self.inner.id = id;
    }

    fn custom_id(&self) -> Option<&str> {
        Some(&self.inner.custom_id)
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
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len("select custom_id", Some(&self.inner.custom_id), MAX_CUSTOM_ID)?;
        check_len("select placeholder", self.inner.placeholder.as_deref(), MAX_PLACEHOLDER)?;
        if self.inner.options.len() > MAX_OPTIONS {
            return Err(ComponentError::CapacityExceeded {
                container: "Select",
                max: MAX_OPTIONS,
            });
        }
        if self.inner.kind != SelectMenuType::Text && !self.inner.options.is_empty() {
            return Err(ComponentError::invalid(
                "select options",
                "only string selects carry options",
            ));
        }
        let min = self.inner.min_values.unwrap_or(1);
        let max = self.inner.max_values.unwrap_or(1);
        if usize::from(max) > MAX_OPTIONS || min > max {
            return Err(ComponentError::invalid(
                "select min_values/max_values",
                format!("need 0 <= min <= max <= {}, got {}..{}", MAX_OPTIONS, min, max),
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::SelectMenu(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::SelectMenu(inner) if inner.kind == self.inner.kind => self.inner = inner,
            other => mismatch(self.component_type(), &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.values = state.values.clone();
    }
}

impl Disableable for Select {
    fn is_disabled(&self) -> bool {
        self.inner.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.inner.disabled = disabled;
    }
}
