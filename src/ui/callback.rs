//! Boxed async callbacks attached to items and modals.

use futures_lite::future::Boxed;
use std::{fmt, future::Future, sync::Arc};

use super::{Modal, ViewHandle};
use crate::error::CallbackError;
use crate::types::Interaction;

/// Future returned by every callback.
pub type CallbackFuture = Boxed<Result<(), CallbackError>>;

type ItemFn = dyn Fn(ViewHandle, Interaction) -> CallbackFuture + Send + Sync;
type ModalFn = dyn Fn(Modal, Interaction) -> CallbackFuture + Send + Sync;

/// Runs when a button is clicked or a select changes.
///
/// The handle gives access to the owning view (lock it to read or mutate
/// items, call [`ViewHandle::stop`], or re-render). Returning `Err` routes the
/// error to the view's [`ViewHooks::on_error`](super::ViewHooks::on_error).
#[derive(Clone)]
pub struct ItemCallback(Arc<ItemFn>);

impl ItemCallback {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(ViewHandle, Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        Self(Arc::new(move |view, interaction| Box::pin(f(view, interaction))))
    }

    pub(crate) fn call(&self, view: ViewHandle, interaction: Interaction) -> CallbackFuture {
        (self.0)(view, interaction)
    }
}

impl fmt::Debug for ItemCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemCallback(..)")
    }
}

/// Runs when a modal is submitted. Receives the modal with every input's
/// submitted value already absorbed.
#[derive(Clone)]
pub struct ModalCallback(Arc<ModalFn>);

impl ModalCallback {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Modal, Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), CallbackError>> + Send + 'static,
    {
        Self(Arc::new(move |modal, interaction| {
            Box::pin(f(modal, interaction))
        }))
    }

    pub(crate) fn call(&self, modal: Modal, interaction: Interaction) -> CallbackFuture {
        (self.0)(modal, interaction)
    }
}

impl fmt::Debug for ModalCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ModalCallback(..)")
    }
}
