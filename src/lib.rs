//! Discord message components as an interactive, owned tree.
//!
//! [`types`] holds the wire format: every component as plain serde data
//! plus the envelopes around it. [`ui`] builds on that with items that carry
//! callbacks and layout hints, the two message surfaces ([`ui::View`] for
//! legacy rows, [`ui::DesignerView`] for components v2), modals, and the
//! [`ui::ViewStore`] that routes interactions back to the right callback.
//!
//! Sending messages and reading the gateway are left to the application: it
//! implements [`transport::Transport`] and feeds parsed
//! [`events::GatewayEvent`]s to the store.

pub mod error;
pub mod events;
pub mod transport;
pub mod types;
pub mod ui;

pub use error::{CallbackError, ComponentError, Error, Result};
pub use events::GatewayEvent;
pub use transport::{Transport, TransportError};
