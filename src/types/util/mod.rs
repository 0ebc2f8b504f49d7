//! Small serde helpers shared by the component payload types.
//!
//! Component payloads omit "unset" fields entirely instead of writing
//! `null`/`false`, so most fields go through [`is_false`] or
//! `Option::is_none`. The one exception is a field that must be cleared
//! explicitly on the wire, which uses [`nullable`].

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_true(value: &bool) -> bool {
    *value
}

pub(crate) fn default_true() -> bool {
    true
}

/// Extension trait on [`serde_json::Value`] that provides
/// `.deserialize_into::<T>()`, used by the tag-dispatching component decoder.
pub(crate) trait ValueExt: Sized {
    /// Consume this value and attempt to deserialize it into `T`.
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error>;
}

impl ValueExt for serde_json::Value {
    fn deserialize_into<T: serde::de::DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self)
    }
}

/// Serde adapter for `Option<Option<T>>` fields.
///
/// | Rust            | JSON              |
/// |-----------------|-------------------|
/// | `None`          | field absent      |
/// | `Some(None)`    | `"field": null`   |
/// | `Some(Some(v))` | `"field": v`      |
///
/// Use together with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(Some(inner)) => inner.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        // Only called when the field is present, so `null` means "cleared".
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
