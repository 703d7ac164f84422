use std::sync::Arc;

use tokio::sync::watch;

use super::model::{Identity, SessionFlag};
use crate::error::{AiverseError, Result};
use crate::subscription::{ListenerRegistry, Subscription};

/// Owner of the process-wide [`SessionFlag`].
///
/// `SessionStore` is created by the application root and passed to whatever
/// needs it; there is no global instance. It has a single mutation entry
/// point, [`SessionStore::on_session_change`], which the identity binding
/// calls. Any number of readers can take snapshots, register listeners, or
/// await changes through a watch receiver.
pub struct SessionStore {
    sender: watch::Sender<SessionFlag>,
    listeners: ListenerRegistry<SessionFlag>,
}

impl SessionStore {
    /// Creates a store in the `Unknown` state.
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(SessionFlag::Unknown);
        Self {
            sender,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Creates a store and wraps it for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of the current flag.
    pub fn current(&self) -> SessionFlag {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_authenticated()
    }

    /// Applies an identity provider notification.
    ///
    /// `Some` moves to `Authenticated`, `None` to `Unauthenticated`. When the
    /// resulting flag equals the current one nothing happens and no listener
    /// fires.
    ///
    /// # Returns
    ///
    /// `true` if the flag changed.
    pub fn on_session_change(&self, identity: Option<Identity>) -> bool {
        let next = SessionFlag::from_identity(identity);
        let changed = self.sender.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });

        if changed {
            self.listeners.notify(&next);
        }
        changed
    }

    /// Registers `listener` for every effective change.
    ///
    /// The listener is not called with the current value; read
    /// [`SessionStore::current`] first if needed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionFlag) + Send + Sync + 'static,
    {
        self.listeners.register(Arc::new(listener))
    }

    /// Receiver for async consumers. Starts at the current value.
    pub fn watch(&self) -> watch::Receiver<SessionFlag> {
        self.sender.subscribe()
    }

    /// Resolves once the identity provider has reported at least once.
    pub async fn wait_until_known(&self) -> Result<SessionFlag> {
        let mut receiver = self.sender.subscribe();
        let flag = receiver
            .wait_for(SessionFlag::is_known)
            .await
            .map_err(|e| AiverseError::internal(format!("session store closed: {}", e)))?;
        Ok(flag.clone())
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
