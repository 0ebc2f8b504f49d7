//! The message transport the view layer sends through.
//!
//! The view layer never builds HTTP requests. It hands a serialized
//! [`MessagePayload`] to a [`Transport`] at the two points where a message is
//! created or edited, and reads back the [`EchoedMessage`] (whose components
//! carry server-assigned ids). Auth, rate limits and retries are the
//! implementor's business.

use async_trait::async_trait;
use std::fmt;

use crate::types::*;

/// Discord's JSON error code for "Unknown Message".
const UNKNOWN_MESSAGE: u64 = 10008;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum TransportError {
    /// Non-success status from Discord.
    Api {
        status: u16,
        /// Discord's JSON error code, when the body carried one.
        code: Option<u64>,
        body: String,
        route: String,
    },
    /// Network error.
    Transport(String),
    /// Serialisation error.
    Serde(String),
}

impl TransportError {
    /// Whether the target message no longer exists. Re-rendering a view
    /// whose message was deleted is expected to fail this way.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TransportError::Api { status: 404, .. }
                | TransportError::Api {
                    code: Some(UNKNOWN_MESSAGE),
                    ..
                }
        )
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Api {
                status,
                body,
                route,
                ..
            } => {
                write!(f, "Discord API error {} on {}: {}", status, route, body)
            }
            TransportError::Transport(e) => write!(f, "HTTP transport error: {}", e),
            TransportError::Serde(e) => write!(f, "Serialisation error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Serde(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Sends and edits component messages.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Create a message, returning it as the server stored it.
    async fn send(&self, body: &MessagePayload) -> Result<EchoedMessage, TransportError>;

    /// Replace an existing message's body, returning it as the server stored
    /// it.
    async fn edit(
        &self,
        message_id: Id<MessageMarker>,
        body: &MessagePayload,
    ) -> Result<EchoedMessage, TransportError>;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_matches_status_or_code() {
        let by_status = TransportError::Api {
            status: 404,
            code: None,
            body: String::new(),
            route: "PATCH /messages".to_owned(),
        };
        let by_code = TransportError::Api {
            status: 400,
            code: Some(UNKNOWN_MESSAGE),
            body: String::new(),
            route: "PATCH /messages".to_owned(),
        };
        let other = TransportError::Api {
            status: 500,
            code: None,
            body: "oops".to_owned(),
            route: "PATCH /messages".to_owned(),
        };
        assert!(by_status.is_not_found());
        assert!(by_code.is_not_found());
        assert!(!other.is_not_found());
        assert!(!TransportError::Transport("reset".to_owned()).is_not_found());
    }

    #[test]
    fn api_error_display_includes_route() {
        let err = TransportError::Api {
            status: 403,
            code: Some(50013),
            body: "Missing Permissions".to_owned(),
            route: "POST /channels/{channel_id}/messages".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Discord API error 403 on POST /channels/{channel_id}/messages: Missing Permissions"
        );
    }
}
