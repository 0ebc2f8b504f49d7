//! Modal inputs. They raise no interaction of their own; their values
//! arrive with the modal submission.

use serde_json::Value;

use super::button::MAX_CUSTOM_ID;
use super::item::{check_len, mismatch, random_custom_id};
use super::ViewItem;
use crate::error::ComponentError;
use crate::types::component::{self, GroupOption};
use crate::types::{Component, ComponentState, ComponentType, TextInputStyle};

const MAX_INPUT_LABEL: usize = 45;
const MAX_INPUT_PLACEHOLDER: usize = 100;
const MAX_INPUT_LENGTH: u16 = 4000;
const MAX_GROUP_OPTIONS: usize = 10;

// ---------------------------------------------------------------------------
// InputText
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct InputText {
    inner: component::TextInput,
    provided_custom_id: bool,
    value: Option<String>,
}

impl InputText {
    /// Unlabelled single-line input, for wrapping in a [`Label`](super::Label).
    pub fn new() -> Self {
        Self {
            inner: component::TextInput {
                id: None,
                custom_id: random_custom_id(),
                style: TextInputStyle::Short,
                label: None,
                placeholder: None,
                value: None,
                min_length: None,
                max_length: None,
                required: None,
            },
            provided_custom_id: false,
            value: None,
        }
    }

    pub fn from_component(inner: component::TextInput) -> Self {
        Self {
            inner,
            provided_custom_id: false,
            value: None,
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
        self
    }

    /// Label shown above the input in a legacy row. Leave unset when
    /// wrapping the input in a `Label`.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.inner.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: TextInputStyle) -> Self {
        self.inner.style = style;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.inner.placeholder = Some(placeholder.into());
        self
    }

    /// Pre-filled text.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.inner.value = Some(value.into());
        self
    }

    pub fn min_length(mut self, min: u16) -> Self {
        self.inner.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: u16) -> Self {
        self.inner.max_length = Some(max);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = Some(required);
        self
    }

    pub fn component(&self) -> &component::TextInput {
        &self.inner
    }

    /// Text the user submitted.
    pub fn submitted(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn has_label(&self) -> bool {
        self.inner.label.is_some()
    }
}

impl Default for InputText {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewItem for InputText {
    fn component_type(&self) -> ComponentType {
        ComponentType::TextInput
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

    fn is_dispatchable(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_len("input custom_id", Some(&self.inner.custom_id), MAX_CUSTOM_ID)?;
        check_len("input label", self.inner.label.as_deref(), MAX_INPUT_LABEL)?;
        check_len(
            "input placeholder",
            self.inner.placeholder.as_deref(),
            MAX_INPUT_PLACEHOLDER,
        )?;
        check_len(
            "input value",
            self.inner.value.as_deref(),
            usize::from(MAX_INPUT_LENGTH),
        )?;
        let min = self.inner.min_length.unwrap_or(0);
        let max = self.inner.max_length.unwrap_or(MAX_INPUT_LENGTH);
        if max == 0 || max > MAX_INPUT_LENGTH || min > max {
            return Err(ComponentError::invalid(
                "input min_length/max_length",
                format!("need 0 <= min <= max, 1 <= max <= {}", MAX_INPUT_LENGTH),
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::TextInput(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::TextInput(inner) => self.inner = inner,
            other => mismatch(ComponentType::TextInput, &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.value = state.value_str().map(str::to_owned);
    }
}

// ---------------------------------------------------------------------------
// FileUpload
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct FileUpload {
    inner: component::FileUpload,
    provided_custom_id: bool,
    values: Vec<String>,
}

impl FileUpload {
    pub fn new() -> Self {
        Self::from_parts(
            component::FileUpload {
                id: None,
                custom_id: random_custom_id(),
                min_values: None,
                max_values: None,
                required: None,
            },
            false,
        )
    }

    pub fn from_component(inner: component::FileUpload) -> Self {
        Self::from_parts(inner, false)
    }

    fn from_parts(inner: component::FileUpload, provided_custom_id: bool) -> Self {
        Self {
            inner,
            provided_custom_id,
            values: Vec::new(),
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
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

    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = Some(required);
        self
    }

    /// Attachment ids of the uploaded files.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Default for FileUpload {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewItem for FileUpload {
    fn component_type(&self) -> ComponentType {
        ComponentType::FileUpload
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

    fn is_dispatchable(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        let min = self.inner.min_values.unwrap_or(1);
        let max = self.inner.max_values.unwrap_or(1);
        if max > 10 || min > max {
            return Err(ComponentError::invalid(
                "file upload min_values/max_values",
                "need 0 <= min <= max <= 10",
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::FileUpload(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::FileUpload(inner) => self.inner = inner,
            other => mismatch(ComponentType::FileUpload, &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.values = state.values.clone();
    }
}

// ---------------------------------------------------------------------------
// RadioGroup / CheckboxGroup
// ---------------------------------------------------------------------------

fn check_group(options: &[GroupOption]) -> Result<(), ComponentError> {
    if options.is_empty() || options.len() > MAX_GROUP_OPTIONS {
        return Err(ComponentError::invalid(
            "group options",
            format!("need between 1 and {} options", MAX_GROUP_OPTIONS),
        ));
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct RadioGroup {
    inner: component::RadioGroup,
    provided_custom_id: bool,
    value: Option<String>,
}

impl RadioGroup {
    pub fn new(options: Vec<GroupOption>) -> Self {
        Self {
            inner: component::RadioGroup {
                id: None,
                custom_id: random_custom_id(),
                options,
                required: None,
            },
            provided_custom_id: false,
            value: None,
        }
    }

    pub fn from_component(inner: component::RadioGroup) -> Self {
        Self {
            inner,
            provided_custom_id: false,
            value: None,
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = Some(required);
        self
    }

    /// The chosen option's value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ViewItem for RadioGroup {
    fn component_type(&self) -> ComponentType {
        ComponentType::RadioGroup
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

    fn is_dispatchable(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_group(&self.inner.options)
    }

    fn to_component(&self) -> Component {
        Component::RadioGroup(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::RadioGroup(inner) => self.inner = inner,
            other => mismatch(ComponentType::RadioGroup, &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.value = state.value_str().map(str::to_owned);
    }
}

#[derive(Clone, Debug)]
pub struct CheckboxGroup {
    inner: component::CheckboxGroup,
    provided_custom_id: bool,
    values: Vec<String>,
}

impl CheckboxGroup {
    pub fn new(options: Vec<GroupOption>) -> Self {
        Self {
            inner: component::CheckboxGroup {
                id: None,
                custom_id: random_custom_id(),
                options,
                min_values: None,
                max_values: None,
                required: None,
            },
            provided_custom_id: false,
            values: Vec::new(),
        }
    }

    pub fn from_component(inner: component::CheckboxGroup) -> Self {
        Self {
            inner,
            provided_custom_id: false,
            values: Vec::new(),
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
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

    pub fn required(mut self, required: bool) -> Self {
        self.inner.required = Some(required);
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl ViewItem for CheckboxGroup {
    fn component_type(&self) -> ComponentType {
        ComponentType::CheckboxGroup
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

    fn is_dispatchable(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn validate(&self) -> Result<(), ComponentError> {
        check_group(&self.inner.options)?;
        let max = self.inner.max_values.map_or(self.inner.options.len(), usize::from);
        let min = self.inner.min_values.map_or(0, usize::from);
        if min > max || max > self.inner.options.len() {
            return Err(ComponentError::invalid(
                "checkbox group min_values/max_values",
                "need min <= max <= number of options",
            ));
        }
        Ok(())
    }

    fn to_component(&self) -> Component {
        Component::CheckboxGroup(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::CheckboxGroup(inner) => self.inner = inner,
            other => mismatch(ComponentType::CheckboxGroup, &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.values = state.values.clone();
    }
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct Checkbox {
    inner: component::Checkbox,
    provided_custom_id: bool,
    checked: Option<bool>,
}

impl Checkbox {
    pub fn new() -> Self {
        Self {
            inner: component::Checkbox {
                id: None,
                custom_id: random_custom_id(),
                default: false,
            },
            provided_custom_id: false,
            checked: None,
        }
    }

    pub fn from_component(inner: component::Checkbox) -> Self {
        Self {
            inner,
            provided_custom_id: false,
            checked: None,
        }
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.inner.custom_id = custom_id.into();
        self.provided_custom_id = true;
        self
    }

    /// Start ticked.
    pub fn default_checked(mut self, checked: bool) -> Self {
        self.inner.default = checked;
        self
    }

    /// Submitted state, once the modal came back.
    pub fn checked(&self) -> Option<bool> {
        self.checked
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewItem for Checkbox {
    fn component_type(&self) -> ComponentType {
        ComponentType::Checkbox
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

    fn is_dispatchable(&self) -> bool {
        true
    }

    fn is_persistent(&self) -> bool {
        self.provided_custom_id
    }

    fn to_component(&self) -> Component {
        Component::Checkbox(self.inner.clone())
    }

    fn refresh_component(&mut self, component: Component) {
        match component {
            Component::Checkbox(inner) => self.inner = inner,
            other => mismatch(ComponentType::Checkbox, &other),
        }
    }

    fn refresh_state(&mut self, state: &ComponentState) {
        self.checked = match &state.value {
            Some(Value::Bool(checked)) => Some(*checked),
            Some(Value::String(s)) => Some(s == "true"),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(custom_id: &str, kind: ComponentType, value: Option<Value>, values: &[&str]) -> ComponentState {
        ComponentState {
            custom_id: custom_id.to_owned(),
            component_type: kind,
            values: values.iter().map(|v| v.to_string()).collect(),
            value,
        }
    }

    #[test]
    fn input_text_absorbs_submitted_value() {
        let mut input = InputText::new()
            .custom_id("subject")
            .value("prefilled");
        input.refresh_state(&state(
            "subject",
            ComponentType::TextInput,
            Some(json!("typed")),
            &[],
        ));
        assert_eq!(input.submitted(), Some("typed"));
        assert_eq!(input.component().value.as_deref(), Some("prefilled"));
    }

    #[test]
    fn input_text_length_bounds() {
        assert!(InputText::new().min_length(10).max_length(5).validate().is_err());
        assert!(InputText::new().max_length(4001).validate().is_err());
        assert!(InputText::new()
            .label("x".repeat(46))
            .validate()
            .is_err());
        assert!(InputText::new().min_length(1).max_length(4000).validate().is_ok());
    }

    #[test]
    fn groups_need_options() {
        assert!(RadioGroup::new(Vec::new()).validate().is_err());
        let options = vec![GroupOption::new("Yes", "y"), GroupOption::new("No", "n")];
        assert!(RadioGroup::new(options.clone()).validate().is_ok());
        assert!(CheckboxGroup::new(options.clone()).max_values(3).validate().is_err());
        assert!(CheckboxGroup::new(options).max_values(2).validate().is_ok());
    }

    #[test]
    fn checkbox_reads_bool_value() {
        let mut checkbox = Checkbox::new().custom_id("agree");
        checkbox.refresh_state(&state("agree", ComponentType::Checkbox, Some(json!(true)), &[]));
        assert_eq!(checkbox.checked(), Some(true));
        assert!(checkbox.is_persistent());
        assert!(!Checkbox::new().is_persistent());
    }

    #[test]
    fn group_values_absorbed() {
        let mut group = CheckboxGroup::new(vec![GroupOption::new("A", "a")]);
        group.refresh_state(&state("x", ComponentType::CheckboxGroup, None, &["a"]));
        assert_eq!(group.values(), ["a"]);

        let mut upload = FileUpload::new().max_values(3);
        upload.refresh_state(&state("x", ComponentType::FileUpload, None, &["111", "222"]));
        assert_eq!(upload.values().len(), 2);
        assert!(upload.validate().is_ok());
    }
}
