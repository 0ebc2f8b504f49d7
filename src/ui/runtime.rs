//! Live views.
//!
//! Registering a surface with a [`ViewStore`](super::ViewStore) moves it
//! behind a [`ViewHandle`]: a cheap-to-clone handle with `Arc<Mutex<_>>`
//! internals that callbacks receive, that owns the timeout watcher, and that
//! remembers which message (and transport) the view was rendered to.
//!
//! Locks are never held across a user callback or hook. Dispatches to the
//! same view are not serialized against each other.

use async_lock::{Mutex, MutexGuard};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, trace, warn};

use super::store::{dispatch_routes, StoreTables};
use super::{AnyView, ItemCallback, Nestable, ViewItem};
use crate::error::{CallbackError, Error};
use crate::transport::Transport;
use crate::types::{ComponentType, EchoedMessage, Id, Interaction, MessageMarker};

/// Timeout a new view starts with.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Per-view lifecycle hooks. Every method has a default.
#[async_trait]
pub trait ViewHooks: Send + Sync {
    /// Runs before every callback. `Ok(false)` skips the callback and calls
    /// [`on_check_failure`](Self::on_check_failure); `Err` goes to
    /// [`on_error`](Self::on_error).
    async fn interaction_check(
        &self,
        _view: &ViewHandle,
        _interaction: &Interaction,
    ) -> Result<bool, CallbackError> {
        Ok(true)
    }

    async fn on_check_failure(&self, _view: &ViewHandle, _interaction: &Interaction) {}

    /// A callback or check failed. Logs by default.
    async fn on_error(&self, view: &ViewHandle, interaction: &Interaction, error: CallbackError) {
        error!(
            view = view.id(),
            custom_id = interaction.custom_id().unwrap_or_default(),
            error = %error,
            "view callback failed"
        );
    }

    /// The view timed out. Disables every item and re-renders the message
    /// when the view was built with `disable_on_timeout(true)`.
    async fn on_timeout(&self, view: &ViewHandle) {
        if view.disable_on_timeout() {
            view.disable_and_rerender().await;
        }
    }
}

/// Hooks that keep every default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

#[async_trait]
impl ViewHooks for DefaultHooks {}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Timeout behaviour and hooks shared by both surface kinds. Read once when
/// the view is registered.
#[derive(Clone)]
pub struct ViewSettings {
    pub(crate) timeout: Option<Duration>,
    pub(crate) disable_on_timeout: bool,
    pub(crate) hooks: Arc<dyn ViewHooks>,
}

impl ViewSettings {
    /// Idle time after which the view stops. `None` never times out.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn disable_on_timeout(&self) -> bool {
        self.disable_on_timeout
    }

    pub fn hooks(&self) -> &Arc<dyn ViewHooks> {
        &self.hooks
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            disable_on_timeout: false,
            hooks: Arc::new(DefaultHooks),
        }
    }
}

impl fmt::Debug for ViewSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSettings")
            .field("timeout", &self.timeout)
            .field("disable_on_timeout", &self.disable_on_timeout)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Why a view stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StopReason {
    Stopped,
    TimedOut,
}

struct BoundMessage {
    id: Id<MessageMarker>,
    transport: Arc<dyn Transport>,
}

/// The store a view is registered with, and under which message.
struct StoreLink {
    tables: Weak<Mutex<StoreTables>>,
    message_id: Option<Id<MessageMarker>>,
}

struct ViewInner {
    id: u64,
    view: Mutex<AnyView>,
    settings: ViewSettings,
    expires_at: Mutex<Option<Instant>>,
    stopped: watch::Sender<Option<StopReason>>,
    timeout_task: Mutex<Option<JoinHandle<()>>>,
    message: Mutex<Option<BoundMessage>>,
    store: Mutex<Option<StoreLink>>,
}

/// A live view.
///
/// Clones share the same view. Callbacks receive one, so they can edit
/// items through [`lock`](Self::lock), push the change with
/// [`edit_message`](Self::edit_message), or end the view with
/// [`stop`](Self::stop).
#[derive(Clone)]
pub struct ViewHandle {
    inner: Arc<ViewInner>,
}

impl ViewHandle {
    /// Wrap a surface. The timeout clock doesn't start until the view is
    /// registered with a store.
    pub fn new(view: impl Into<AnyView>) -> Self {
        let view = view.into();
        let settings = view.settings().clone();
        let (stopped, _) = watch::channel(None);
        Self {
            inner: Arc::new(ViewInner {
                id: NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed),
                view: Mutex::new(view),
                settings,
                expires_at: Mutex::new(None),
                stopped,
                timeout_task: Mutex::new(None),
                message: Mutex::new(None),
                store: Mutex::new(None),
            }),
        }
    }

    /// Process-unique view number, used in logs.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Lock the surface for reading or editing.
    pub async fn lock(&self) -> MutexGuard<'_, AnyView> {
        self.inner.view.lock().await
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.settings.timeout
    }

    pub fn disable_on_timeout(&self) -> bool {
        self.inner.settings.disable_on_timeout
    }

    pub fn hooks(&self) -> Arc<dyn ViewHooks> {
        self.inner.settings.hooks.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.stopped.borrow().is_some()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        *self.inner.stopped.borrow()
    }

    /// When the view will time out if nothing else happens.
    pub async fn expires_at(&self) -> Option<Instant> {
        *self.inner.expires_at.lock().await
    }

    /// Stop listening. Cancels the timeout and removes the view from its
    /// store. In-flight callbacks run to completion. Calling it again is a
    /// no-op.
    pub async fn stop(&self) {
        if !self.finish(StopReason::Stopped) {
            return;
        }
        if let Some(task) = self.inner.timeout_task.lock().await.take() {
            task.abort();
        }
        self.deregister().await;
        debug!(view = self.id(), "view stopped");
    }

    /// Wait until the view stops. Returns `true` if it timed out.
    pub async fn wait(&self) -> bool {
        let mut stopped = self.inner.stopped.subscribe();
        let timed_out = match stopped.wait_for(Option::is_some).await {
            Ok(reason) => *reason == Some(StopReason::TimedOut),
            Err(_) => false,
        };
        timed_out
    }

    /// Push the expiry out to `now + timeout`.
    pub async fn refresh_timeout(&self) {
        if let Some(timeout) = self.inner.settings.timeout {
            *self.inner.expires_at.lock().await = Some(Instant::now() + timeout);
        }
    }

    /// Remember the message this view was rendered to, so that
    /// [`edit_message`](Self::edit_message) can re-render it.
    pub async fn bind_message(&self, message_id: Id<MessageMarker>, transport: Arc<dyn Transport>) {
        *self.inner.message.lock().await = Some(BoundMessage {
            id: message_id,
            transport,
        });
    }

    pub async fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.inner.message.lock().await.as_ref().map(|message| message.id)
    }

    /// Send the current state of the view as an edit of its message, then
    /// absorb the echo. Items added since registration start receiving
    /// interactions, and removed ones stop. `Ok(None)` when no message is
    /// bound.
    pub async fn edit_message(&self) -> Result<Option<EchoedMessage>, Error> {
        let bound = self
            .inner
            .message
            .lock()
            .await
            .as_ref()
            .map(|message| (message.id, message.transport.clone()));
        let Some((message_id, transport)) = bound else {
            return Ok(None);
        };
        let body = self.inner.view.lock().await.to_message();
        let echo = transport.edit(message_id, &body).await?;
        self.inner.view.lock().await.refresh(&echo.components);
        self.sync_routes().await;
        Ok(Some(echo))
    }

    /// Disable every item and re-render. Failures are logged, and a message
    /// that no longer exists is not a failure.
    pub async fn disable_and_rerender(&self) {
        self.inner.view.lock().await.disable_all_items();
        match self.edit_message().await {
            Ok(_) => {}
            Err(Error::Transport(e)) if e.is_not_found() => {
                debug!(view = self.id(), "message is gone, skipping re-render");
            }
            Err(e) => warn!(view = self.id(), error = %e, "failed to re-render view"),
        }
    }

    // ---- registration and dispatch (crate-internal) ------------------------

    pub(crate) fn settings(&self) -> &ViewSettings {
        &self.inner.settings
    }

    pub(crate) async fn attach_store(
        &self,
        tables: Weak<Mutex<StoreTables>>,
        message_id: Option<Id<MessageMarker>>,
    ) {
        *self.inner.store.lock().await = Some(StoreLink { tables, message_id });
    }

    /// Re-register routes for the items the view holds now.
    pub(crate) async fn sync_routes(&self) {
        if self.is_finished() {
            return;
        }
        let link = self
            .inner
            .store
            .lock()
            .await
            .as_ref()
            .map(|link| (link.tables.clone(), link.message_id));
        let Some((tables, message_id)) = link else {
            return;
        };
        let Some(tables) = tables.upgrade() else {
            return;
        };
        let routes = dispatch_routes(&*self.inner.view.lock().await);
        tables.lock().await.register_routes(self, message_id, &routes);
        trace!(view = self.id(), routes = routes.len(), "routes synced");
    }

    pub(crate) async fn start_timeout(&self) {
        let Some(timeout) = self.inner.settings.timeout else {
            return;
        };
        *self.inner.expires_at.lock().await = Some(Instant::now() + timeout);
        let watcher = self.clone();
        let task = tokio::spawn(watcher.watch_timeout());
        if let Some(previous) = self.inner.timeout_task.lock().await.replace(task) {
            previous.abort();
        }
    }

    /// Route one interaction to the item with this type and custom id.
    /// Absorbs the submitted state, slides the timeout, and runs the check
    /// and callback on a new task.
    pub(crate) async fn dispatch(
        &self,
        kind: ComponentType,
        custom_id: &str,
        interaction: Interaction,
    ) -> Option<JoinHandle<()>> {
        if self.is_finished() {
            return None;
        }
        let callback = {
            let mut view = self.inner.view.lock().await;
            let Some(item) = view
                .walk_items_mut()
                .into_iter()
                .find(|item| item.component_type() == kind && item.custom_id() == Some(custom_id))
            else {
                trace!(view = self.id(), custom_id, "item no longer in view");
                return None;
            };
            if let Some(state) = interaction.component_data() {
                item.refresh_state(state);
            }
            item.callback().cloned()
        };
        self.refresh_timeout().await;
        let view = self.clone();
        Some(tokio::spawn(view.scheduled_task(callback, interaction)))
    }

    // ---- internals ---------------------------------------------------------

    /// Record the stop reason. `false` if the view had already stopped.
    fn finish(&self, reason: StopReason) -> bool {
        self.inner.stopped.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(reason);
            true
        })
    }

    async fn deregister(&self) {
        let link = self.inner.store.lock().await.take();
        if let Some(tables) = link.and_then(|link| link.tables.upgrade()) {
            tables.lock().await.remove_view(self.id());
            debug!(view = self.id(), "view deregistered");
        }
    }

    async fn watch_timeout(self) {
        loop {
            let Some(deadline) = *self.inner.expires_at.lock().await else {
                return;
            };
            sleep_until(deadline).await;
            if self.is_finished() {
                return;
            }
            // a dispatch may have pushed the deadline out while we slept
            let expired = self
                .inner
                .expires_at
                .lock()
                .await
                .map_or(true, |deadline| deadline <= Instant::now());
            if expired {
                self.dispatch_timeout().await;
                return;
            }
        }
    }

    async fn dispatch_timeout(&self) {
        if !self.finish(StopReason::TimedOut) {
            return;
        }
        // this runs on the timeout task itself, so detach rather than abort
        drop(self.inner.timeout_task.lock().await.take());
        self.deregister().await;
        debug!(view = self.id(), "view timed out");
        let hooks = self.hooks();
        hooks.on_timeout(self).await;
    }

    async fn scheduled_task(self, callback: Option<ItemCallback>, interaction: Interaction) {
        let hooks = self.hooks();
        match hooks.interaction_check(&self, &interaction).await {
            Ok(true) => {}
            Ok(false) => return hooks.on_check_failure(&self, &interaction).await,
            Err(e) => return hooks.on_error(&self, &interaction, e).await,
        }
        let Some(callback) = callback else {
            return;
        };
        if let Err(e) = callback.call(self.clone(), interaction.clone()).await {
            hooks.on_error(&self, &interaction, e).await;
        }
    }
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("id", &self.inner.id)
            .field("stop_reason", &self.stop_reason())
            .finish_non_exhaustive()
    }
}
