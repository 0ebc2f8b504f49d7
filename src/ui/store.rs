//! Routing table from incoming interactions to live views.
//!
//! One [`ViewStore`] is created by the application and threaded to wherever
//! gateway events are handled. It is a cheap-to-clone handle; clones share
//! the same tables.

use async_lock::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::{AnyView, Modal, Nestable, ViewHandle, ViewItem};
use crate::error::{ComponentError, Error};
use crate::events::GatewayEvent;
use crate::transport::Transport;
use crate::types::{Component, ComponentType, Id, Interaction, InteractionType, MessageMarker, UserMarker};

type RouteKey = (ComponentType, Option<Id<MessageMarker>>, String);
type ModalKey = (Option<Id<UserMarker>>, String);

#[derive(Default)]
pub(crate) struct StoreTables {
    routes: HashMap<RouteKey, ViewHandle>,
    synced: HashMap<Id<MessageMarker>, ViewHandle>,
    modals: HashMap<ModalKey, Modal>,
}

impl StoreTables {
    /// Drop every entry whose view has stopped.
    fn prune(&mut self) {
        self.routes.retain(|_, view| !view.is_finished());
        self.synced.retain(|_, view| !view.is_finished());
    }

    /// Replace the routes `view` holds under `message_id`.
    pub(crate) fn register_routes(
        &mut self,
        view: &ViewHandle,
        message_id: Option<Id<MessageMarker>>,
        routes: &[(ComponentType, String)],
    ) {
        self.routes
            .retain(|(_, message, _), owner| owner.id() != view.id() || *message != message_id);
        for (kind, custom_id) in routes {
            self.routes
                .insert((*kind, message_id, custom_id.clone()), view.clone());
        }
    }

    pub(crate) fn remove_view(&mut self, view_id: u64) {
        self.routes.retain(|_, view| view.id() != view_id);
        self.synced.retain(|_, view| view.id() != view_id);
    }

    fn views(&self) -> Vec<ViewHandle> {
        let mut seen = HashSet::new();
        self.routes
            .values()
            .chain(self.synced.values())
            .filter(|view| !view.is_finished() && seen.insert(view.id()))
            .cloned()
            .collect()
    }
}

/// `(type, custom_id)` of every dispatchable leaf in `view`.
pub(crate) fn dispatch_routes(view: &AnyView) -> Vec<(ComponentType, String)> {
    view.walk_items()
        .into_iter()
        .filter(|item| item.is_dispatchable())
        .filter_map(|item| Some((item.component_type(), item.custom_id()?.to_owned())))
        .collect()
}

/// Routes component and modal interactions to the views that own them.
#[derive(Clone, Default)]
pub struct ViewStore {
    tables: Arc<Mutex<StoreTables>>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening for interactions on `view`.
    ///
    /// With a message id, only interactions on that message are routed to
    /// it. Without one, the view catches interactions from any message that
    /// has no view of its own, which only makes sense for a persistent view.
    pub async fn add_view(
        &self,
        view: impl Into<AnyView>,
        message_id: Option<Id<MessageMarker>>,
    ) -> Result<ViewHandle, ComponentError> {
        let view = view.into();
        if message_id.is_none() && !view.is_persistent() {
            return Err(ComponentError::NotPersistent);
        }
        let routes = dispatch_routes(&view);

        let handle = ViewHandle::new(view);
        {
            let mut tables = self.tables.lock().await;
            tables.prune();
            tables.register_routes(&handle, message_id, &routes);
            if let Some(message_id) = message_id {
                tables.synced.insert(message_id, handle.clone());
            }
        }
        handle.attach_store(Arc::downgrade(&self.tables), message_id).await;
        handle.start_timeout().await;
        debug!(
            view = handle.id(),
            message = ?message_id,
            routes = routes.len(),
            "view registered"
        );
        Ok(handle)
    }

    /// Send `view` as a new message, absorb the echoed ids, and register it
    /// under the new message. Later edits go through the same transport.
    pub async fn send_view(
        &self,
        transport: Arc<dyn Transport>,
        view: impl Into<AnyView>,
    ) -> Result<ViewHandle, Error> {
        let mut view = view.into();
        let echo = transport.send(&view.to_message()).await?;
        view.refresh(&echo.components);
        let handle = self.add_view(view, Some(echo.id)).await?;
        handle.bind_message(echo.id, transport).await;
        Ok(handle)
    }

    /// Route a component interaction. Looks for a view registered on the
    /// interaction's message first, then for one registered without a
    /// message. Returns the spawned callback task, or `None` if nothing
    /// claimed the interaction.
    pub async fn dispatch(
        &self,
        kind: ComponentType,
        custom_id: &str,
        interaction: Interaction,
    ) -> Option<JoinHandle<()>> {
        let view = {
            let tables = self.tables.lock().await;
            let live = |key: RouteKey| tables.routes.get(&key).filter(|view| !view.is_finished());
            interaction
                .message_id
                .and_then(|message_id| live((kind, Some(message_id), custom_id.to_owned())))
                .or_else(|| live((kind, None, custom_id.to_owned())))
                .cloned()
        };
        let Some(view) = view else {
            trace!(custom_id, kind = kind.name(), "no view for interaction");
            return None;
        };
        view.dispatch(kind, custom_id, interaction).await
    }

    /// Route any interaction: components go to views, submissions go to
    /// modals, everything else is ignored.
    pub async fn handle_interaction(&self, interaction: Interaction) -> Option<JoinHandle<()>> {
        match interaction.kind {
            InteractionType::MessageComponent => {
                let state = interaction.component_data()?;
                let kind = state.component_type;
                let custom_id = state.custom_id.clone();
                self.dispatch(kind, &custom_id, interaction).await
            }
            InteractionType::ModalSubmit => self.dispatch_modal(interaction).await,
            _ => None,
        }
    }

    /// Wait for a submission of `modal` by `user_id` (or by anyone, with
    /// `None`). A user has at most one modal open, so any modal still
    /// pending for the same user is dropped.
    pub async fn add_modal(&self, modal: Modal, user_id: Option<Id<UserMarker>>) {
        let custom_id = modal.get_custom_id().to_owned();
        let mut tables = self.tables.lock().await;
        if user_id.is_some() {
            let before = tables.modals.len();
            tables.modals.retain(|(user, _), _| *user != user_id);
            if tables.modals.len() < before {
                debug!(user = ?user_id, "replacing pending modal");
            }
        }
        tables.modals.insert((user_id, custom_id.clone()), modal);
        debug!(modal = %custom_id, user = ?user_id, "modal registered");
    }

    /// Stop waiting for a modal, e.g. after the user dismissed it.
    pub async fn remove_modal(
        &self,
        user_id: Option<Id<UserMarker>>,
        custom_id: &str,
    ) -> Option<Modal> {
        self.tables
            .lock()
            .await
            .modals
            .remove(&(user_id, custom_id.to_owned()))
    }

    /// Number of modals waiting for a submission.
    pub async fn pending_modals(&self) -> usize {
        self.tables.lock().await.modals.len()
    }

    /// Hand a submission to its modal. A modal answers once.
    pub async fn dispatch_modal(&self, interaction: Interaction) -> Option<JoinHandle<()>> {
        let data = interaction.modal_data()?;
        let modal = {
            let mut tables = self.tables.lock().await;
            let exact = (interaction.user_id, data.custom_id.clone());
            match tables.modals.remove(&exact) {
                Some(modal) => Some(modal),
                None => tables.modals.remove(&(None, data.custom_id.clone())),
            }
        };
        let Some(mut modal) = modal else {
            trace!(custom_id = %data.custom_id, "no modal for submission");
            return None;
        };
        modal.refresh(data);
        Some(tokio::spawn(modal.submit(interaction)))
    }

    /// Absorb an edited message into the view tracking it. `false` if no
    /// view tracks that message.
    pub async fn update_from_message(
        &self,
        message_id: Id<MessageMarker>,
        components: &[Component],
    ) -> bool {
        let view = self.tables.lock().await.synced.get(&message_id).cloned();
        match view {
            Some(view) => {
                view.lock().await.refresh(components);
                true
            }
            None => false,
        }
    }

    /// Forget which view a message belongs to. The view keeps listening
    /// until it stops.
    pub async fn remove_message_tracking(&self, message_id: Id<MessageMarker>) -> bool {
        self.tables.lock().await.synced.remove(&message_id).is_some()
    }

    pub async fn is_message_tracked(&self, message_id: Id<MessageMarker>) -> bool {
        self.tables.lock().await.synced.contains_key(&message_id)
    }

    /// Live views whose routing would survive a restart.
    pub async fn persistent_views(&self) -> Vec<ViewHandle> {
        let views = self.tables.lock().await.views();
        let mut persistent = Vec::new();
        for view in views {
            if view.lock().await.is_persistent() {
                persistent.push(view);
            }
        }
        persistent
    }

    /// Remove a view without stopping it.
    pub async fn remove_view(&self, view: &ViewHandle) {
        self.tables.lock().await.remove_view(view.id());
    }

    /// Number of live views.
    pub async fn len(&self) -> usize {
        self.tables.lock().await.views().len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Feed one gateway event to the store.
    pub async fn handle_event(&self, event: &GatewayEvent) -> Option<JoinHandle<()>> {
        match event {
            GatewayEvent::InteractionCreate(interaction) => {
                self.handle_interaction(interaction.clone()).await
            }
            GatewayEvent::MessageUpdate(update) => {
                if let Some(components) = &update.components {
                    self.update_from_message(update.id, components).await;
                }
                None
            }
            GatewayEvent::MessageDelete(delete) => {
                self.remove_message_tracking(delete.id).await;
                None
            }
            GatewayEvent::Unknown { .. } => None,
        }
    }
}

impl fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStore").finish_non_exhaustive()
    }
}
