//! Error types.
//!
//! Structural violations are raised synchronously by the call that caused
//! them (`add_item`, `set_item`, `append_option`, ...) and leave the target
//! unchanged. Transport failures come from the [`Transport`] collaborator.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;

use crate::transport::TransportError;
use crate::types::ComponentType;

/// Boxed error returned by user callbacks and hooks.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// A component tree was about to violate a layout or typing rule.
#[derive(Debug)]
pub enum ComponentError {
    /// An explicit row already holds too much width for this item.
    RowFull { row: usize, total: u8 },
    /// No row can take an automatically placed item.
    NoOpenSpace,
    /// A row number outside what the surface supports.
    RowOutOfRange { row: u8, max: u8 },
    /// A container already holds its maximum number of children.
    CapacityExceeded {
        container: &'static str,
        max: usize,
    },
    /// An item of this type cannot go in this slot.
    WrongItemType {
        container: &'static str,
        item: ComponentType,
    },
    /// An input with its own label text was put inside a `Label`.
    AmbiguousLabel,
    /// A field value breaks a platform limit.
    InvalidValue {
        field: &'static str,
        reason: String,
    },
    /// Registering without a message id requires a persistent view.
    NotPersistent,
}

impl ComponentError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::RowFull { row, total } => {
                write!(f, "item would not fit at row {} ({} > 5 width)", row, total)
            }
            ComponentError::NoOpenSpace => f.write_str("could not find open space for item"),
            ComponentError::RowOutOfRange { row, max } => {
                write!(f, "row {} is out of range (must be below {})", row, max)
            }
            ComponentError::CapacityExceeded { container, max } => write!(
                f,
                "maximum number of children exceeded ({} holds at most {})",
                container, max
            ),
            ComponentError::WrongItemType { container, item } => {
                write!(f, "{} cannot be added to {}", item.name(), container)
            }
            ComponentError::AmbiguousLabel => f.write_str(
                "input text inside a label must not set its own label; set it on the Label",
            ),
            ComponentError::InvalidValue { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            ComponentError::NotPersistent => f.write_str(
                "view is not persistent: items need an explicit custom_id and the view must have no timeout",
            ),
        }
    }
}

impl std::error::Error for ComponentError {}

/// Crate-level error.
#[derive(Debug)]
pub enum Error {
    Component(ComponentError),
    Transport(TransportError),
    /// A payload did not match the expected JSON shape.
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Component(e) => write!(f, "component error: {}", e),
            Error::Transport(e) => write!(f, "transport error: {}", e),
            Error::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Component(e) => Some(e),
            Error::Transport(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

impl From<ComponentError> for Error {
    fn from(err: ComponentError) -> Self {
        Error::Component(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

/// Result type for fallible crate operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_full_message_names_row_and_width() {
        let err = ComponentError::RowFull { row: 2, total: 6 };
        assert_eq!(err.to_string(), "item would not fit at row 2 (6 > 5 width)");
    }

    #[test]
    fn wrong_item_type_names_both_sides() {
        let err = ComponentError::WrongItemType {
            container: "Container",
            item: ComponentType::Button,
        };
        assert_eq!(err.to_string(), "Button cannot be added to Container");
    }

    #[test]
    fn crate_error_wraps_sources() {
        let err: Error = ComponentError::NoOpenSpace.into();
        assert!(matches!(err, Error::Component(ComponentError::NoOpenSpace)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
