//! Modal-only inputs that must be wrapped in a [`Label`](super::Label).

use serde::{Deserialize, Serialize};

use crate::types::util::is_false;

/// File picker.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FileUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Single choice from a list of options.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RadioGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: String,
    pub options: Vec<GroupOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Multiple choices from a list of options.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CheckboxGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: String,
    pub options: Vec<GroupOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Single yes/no toggle.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Checkbox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

/// Option of a [`RadioGroup`] or [`CheckboxGroup`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GroupOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub default: bool,
}

impl GroupOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_selected(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}
