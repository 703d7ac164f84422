//! Wires the identity provider to the session store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use aiverse_core::identity::IdentityProvider;
use aiverse_core::session::{Identity, SessionStore};
use aiverse_core::subscription::Subscription;

/// Keeps a [`SessionStore`] in step with an [`IdentityProvider`].
///
/// Dropping the binding cancels the provider subscription. A notification
/// that is already in flight when the binding goes away, or that arrives
/// after the store itself has been dropped, is ignored.
#[must_use = "dropping the binding stops session updates"]
pub struct SessionBinding {
    active: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

impl SessionBinding {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops forwarding notifications.
    pub fn unbind(self) {
        drop(self);
    }
}

impl Drop for SessionBinding {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

/// Forwards every provider notification to
/// [`SessionStore::on_session_change`].
pub fn bind_session(store: &Arc<SessionStore>, provider: &dyn IdentityProvider) -> SessionBinding {
    let active = Arc::new(AtomicBool::new(true));
    let weak_store: Weak<SessionStore> = Arc::downgrade(store);
    let flag = active.clone();

    let subscription = provider.subscribe(Arc::new(move |identity: &Option<Identity>| {
        if !flag.load(Ordering::SeqCst) {
            return;
        }
        let Some(store) = weak_store.upgrade() else {
            tracing::debug!("[SessionBinding] Store dropped, ignoring identity change");
            return;
        };
        if store.on_session_change(identity.clone()) {
            tracing::info!(
                "[SessionBinding] Session is now {}",
                match identity {
                    Some(identity) => format!("signed in as {}", identity.label()),
                    None => "signed out".to_string(),
                }
            );
        }
    }));

    SessionBinding {
        active,
        subscription: Some(subscription),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiverse_core::error::Result;
    use aiverse_core::identity::{IdentityListener, ProfileUpdate, Registration};
    use aiverse_core::session::SessionFlag;
    use aiverse_core::subscription::ListenerRegistry;
    use async_trait::async_trait;

    /// Provider whose notifications are pushed by the test.
    #[derive(Default)]
    struct ManualProvider {
        listeners: ListenerRegistry<Option<Identity>>,
    }

    impl ManualProvider {
        fn emit(&self, identity: Option<Identity>) {
            self.listeners.notify(&identity);
        }
    }

    #[async_trait]
    impl IdentityProvider for ManualProvider {
        fn subscribe(&self, listener: IdentityListener) -> Subscription {
            self.listeners.register(listener)
        }
        fn current_identity(&self) -> Option<Identity> {
            None
        }
        async fn send_sign_in_link(&self, _email: &str, _continue_url: &str) -> Result<()> {
            Ok(())
        }
        fn is_sign_in_link(&self, _link: &str) -> bool {
            false
        }
        async fn sign_in_with_email_link(&self, _email: &str, _link: &str) -> Result<Identity> {
            unimplemented!()
        }
        async fn sign_in_with_google(&self) -> Result<Identity> {
            unimplemented!()
        }
        async fn create_account(&self, _registration: &Registration) -> Result<Identity> {
            unimplemented!()
        }
        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }
        async fn update_profile(&self, _update: ProfileUpdate) -> Result<Identity> {
            unimplemented!()
        }
    }

    #[test]
    fn test_notifications_reach_store() {
        let provider = ManualProvider::default();
        let store = SessionStore::shared();
        let _binding = bind_session(&store, &provider);

        assert_eq!(store.current(), SessionFlag::Unknown);
        provider.emit(None);
        assert_eq!(store.current(), SessionFlag::Unauthenticated);
        provider.emit(Some(Identity::new("u1")));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_unbind_stops_updates() {
        let provider = ManualProvider::default();
        let store = SessionStore::shared();
        let binding = bind_session(&store, &provider);
        assert!(binding.is_active());

        binding.unbind();
        assert_eq!(provider.listeners.len(), 0);

        provider.emit(Some(Identity::new("u1")));
        assert_eq!(store.current(), SessionFlag::Unknown);
    }

    #[test]
    fn test_dropped_store_is_tolerated() {
        let provider = ManualProvider::default();
        let store = SessionStore::shared();
        let _binding = bind_session(&store, &provider);

        drop(store);
        provider.emit(None);
    }
}
