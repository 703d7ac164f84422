//! In-process identity provider.
//!
//! Stands in for the hosted authentication service during development, in
//! the CLI, and in tests. Accounts live in memory; "sent" sign-in links are
//! kept in an outbox instead of being emailed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use aiverse_core::error::{AiverseError, Result};
use aiverse_core::identity::{IdentityListener, IdentityProvider, ProfileUpdate, Registration, is_valid_email};
use aiverse_core::session::Identity;
use aiverse_core::subscription::{ListenerRegistry, Subscription};
use async_trait::async_trait;
use uuid::Uuid;

const MODE_PARAM: &str = "mode=signIn";
const CODE_PARAM: &str = "oobCode=";

/// A sign-in link recorded by [`LocalIdentityProvider::send_sign_in_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentLink {
    pub email: String,
    pub link: String,
}

#[derive(Default)]
struct Inner {
    current: Option<Identity>,
    /// keyed by lower-cased email; no credentials are kept
    accounts: HashMap<String, Identity>,
    /// one-time code -> email it was sent to
    pending_links: HashMap<String, String>,
    outbox: Vec<SentLink>,
    google_account: Option<Identity>,
}

/// Memory-backed [`IdentityProvider`].
///
/// Subscribers are called with the current identity as soon as they
/// register, then on every sign-in, sign-out and profile update.
#[derive(Default)]
pub struct LocalIdentityProvider {
    inner: Mutex<Inner>,
    listeners: ListenerRegistry<Option<Identity>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account returned by [`IdentityProvider::sign_in_with_google`].
    pub fn with_google_account(self, identity: Identity) -> Self {
        self.lock().google_account = Some(identity);
        self
    }

    /// Links "emailed" so far, oldest first.
    pub fn sent_links(&self) -> Vec<SentLink> {
        self.lock().outbox.clone()
    }

    /// Most recent link sent to `email`.
    pub fn last_link_for(&self, email: &str) -> Option<String> {
        self.lock()
            .outbox
            .iter()
            .rev()
            .find(|sent| sent.email.eq_ignore_ascii_case(email))
            .map(|sent| sent.link.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the current identity and notifies listeners outside the lock.
    fn set_current(&self, identity: Option<Identity>) {
        {
            let mut inner = self.lock();
            inner.current = identity.clone();
        }
        self.listeners.notify(&identity);
    }

    fn oob_code(link: &str) -> Option<&str> {
        let query = link.split_once('?')?.1;
        let query = query.split('#').next().unwrap_or(query);
        if !query.split('&').any(|pair| pair == MODE_PARAM) {
            return None;
        }
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(CODE_PARAM))
            .filter(|code| !code.is_empty())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        let subscription = self.listeners.register(listener.clone());
        let current = self.lock().current.clone();
        listener(&current);
        subscription
    }

    fn current_identity(&self) -> Option<Identity> {
        self.lock().current.clone()
    }

    async fn send_sign_in_link(&self, email: &str, continue_url: &str) -> Result<()> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AiverseError::identity("auth/invalid-email"));
        }

        let code = Uuid::new_v4().simple().to_string();
        let separator = if continue_url.contains('?') { '&' } else { '?' };
        let link = format!("{}{}{}&{}{}", continue_url, separator, MODE_PARAM, CODE_PARAM, code);

        let mut inner = self.lock();
        inner.pending_links.insert(code, email.to_string());
        inner.outbox.push(SentLink {
            email: email.to_string(),
            link,
        });
        tracing::debug!("[LocalIdentityProvider] Sign-in link queued for {}", email);
        Ok(())
    }

    fn is_sign_in_link(&self, link: &str) -> bool {
        Self::oob_code(link).is_some()
    }

    async fn sign_in_with_email_link(&self, email: &str, link: &str) -> Result<Identity> {
        let code = Self::oob_code(link).ok_or_else(|| AiverseError::identity("auth/argument-error"))?;
        let email = email.trim();

        let identity = {
            let mut inner = self.lock();
            match inner.pending_links.get(code) {
                Some(sent_to) if sent_to.eq_ignore_ascii_case(email) => {}
                Some(_) => return Err(AiverseError::identity("auth/invalid-email")),
                None => return Err(AiverseError::identity("auth/invalid-action-code")),
            }
            inner.pending_links.remove(code);

            let key = email.to_lowercase();
            inner
                .accounts
                .entry(key)
                .or_insert_with(|| Identity::new(Uuid::new_v4().to_string()).with_email(email))
                .clone()
        };

        tracing::info!("[LocalIdentityProvider] {} signed in with email link", identity.uid);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_google(&self) -> Result<Identity> {
        let identity = {
            let mut inner = self.lock();
            let google = inner
                .google_account
                .clone()
                .ok_or_else(|| AiverseError::identity("auth/popup-closed-by-user"))?;
            let key = google.email.clone().unwrap_or_else(|| google.uid.clone()).to_lowercase();
            inner
                .accounts
                .entry(key)
                .or_insert(google)
                .clone()
        };

        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn create_account(&self, registration: &Registration) -> Result<Identity> {
        let email = registration.email.trim();
        if !is_valid_email(email) {
            return Err(AiverseError::identity("auth/invalid-email"));
        }

        let identity = {
            let mut inner = self.lock();
            let key = email.to_lowercase();
            if inner.accounts.contains_key(&key) {
                return Err(AiverseError::identity("auth/email-already-in-use"));
            }
            let identity = Identity::new(Uuid::new_v4().to_string())
                .with_display_name(registration.name.trim())
                .with_email(email);
            inner.accounts.insert(key, identity.clone());
            identity
        };

        tracing::info!("[LocalIdentityProvider] Created account {}", identity.uid);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.set_current(None);
        Ok(())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<Identity> {
        let updated = {
            let mut inner = self.lock();
            let mut identity = inner.current.clone().ok_or(AiverseError::Unauthenticated)?;
            if let Some(name) = update.display_name {
                identity.display_name = Some(name);
            }
            if let Some(url) = update.photo_url {
                identity.photo_url = Some(url);
            }
            if let Some(account) = inner.accounts.values_mut().find(|a| a.uid == identity.uid) {
                *account = identity.clone();
            }
            identity
        };

        self.set_current(Some(updated.clone()));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder(provider: &LocalIdentityProvider) -> (Arc<Mutex<Vec<Option<Identity>>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let sub = provider.subscribe(Arc::new(move |identity: &Option<Identity>| {
            s.lock().unwrap().push(identity.clone())
        }));
        (seen, sub)
    }

    #[tokio::test]
    async fn test_subscribe_reports_current_immediately() {
        let provider = LocalIdentityProvider::new();
        let (seen, _sub) = recorder(&provider);
        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_email_link_flow() {
        let provider = LocalIdentityProvider::new();
        let (seen, _sub) = recorder(&provider);

        provider
            .send_sign_in_link("ada@example.com", "http://localhost:5173/login")
            .await
            .unwrap();
        let link = provider.last_link_for("ada@example.com").unwrap();
        assert!(link.starts_with("http://localhost:5173/login?mode=signIn&oobCode="));
        assert!(provider.is_sign_in_link(&link));

        let identity = provider.sign_in_with_email_link("ada@example.com", &link).await.unwrap();
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
        assert_eq!(provider.current_identity(), Some(identity.clone()));
        assert_eq!(seen.lock().unwrap().last().cloned(), Some(Some(identity)));

        // one-time
        let again = provider.sign_in_with_email_link("ada@example.com", &link).await;
        assert!(again.unwrap_err().is_identity());
    }

    #[tokio::test]
    async fn test_email_link_rejects_other_address() {
        let provider = LocalIdentityProvider::new();
        provider.send_sign_in_link("ada@example.com", "http://x/login").await.unwrap();
        let link = provider.last_link_for("ada@example.com").unwrap();

        let result = provider.sign_in_with_email_link("eve@example.com", &link).await;
        assert!(result.unwrap_err().is_identity());
        assert!(provider.current_identity().is_none());
    }

    #[test]
    fn test_is_sign_in_link() {
        let provider = LocalIdentityProvider::new();
        assert!(provider.is_sign_in_link("http://x/login?mode=signIn&oobCode=abc"));
        assert!(provider.is_sign_in_link("http://x/login?oobCode=abc&mode=signIn#top"));
        assert!(!provider.is_sign_in_link("http://x/login"));
        assert!(!provider.is_sign_in_link("http://x/login?mode=signIn"));
        assert!(!provider.is_sign_in_link("http://x/login?oobCode=abc"));
    }

    #[tokio::test]
    async fn test_create_account_and_duplicate() {
        let provider = LocalIdentityProvider::new();
        let registration = Registration::new("Ada", "ada@example.com", "secret1", "secret1");

        let identity = provider.create_account(&registration).await.unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Ada"));

        let err = provider.create_account(&registration).await.unwrap_err();
        assert_eq!(err, AiverseError::identity("auth/email-already-in-use"));
    }

    #[tokio::test]
    async fn test_registered_address_signs_in_by_link_as_same_user() {
        let provider = LocalIdentityProvider::new();
        let registered = provider
            .create_account(&Registration::new("Ada", "Ada@Example.com", "secret1", "secret1"))
            .await
            .unwrap();
        provider.sign_out().await.unwrap();

        provider.send_sign_in_link("ada@example.com", "http://x/login").await.unwrap();
        let link = provider.last_link_for("ada@example.com").unwrap();
        let signed_in = provider.sign_in_with_email_link("ada@example.com", &link).await.unwrap();

        assert_eq!(signed_in, registered);
        assert_eq!(signed_in.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_sign_out_and_update_profile() {
        let provider = LocalIdentityProvider::new()
            .with_google_account(Identity::new("g1").with_email("g@example.com"));
        let (seen, _sub) = recorder(&provider);

        provider.sign_in_with_google().await.unwrap();
        let updated = provider
            .update_profile(ProfileUpdate::display_name("Grace"))
            .await
            .unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Grace"));
        assert_eq!(updated.uid, "g1");

        provider.sign_out().await.unwrap();
        assert!(provider.current_identity().is_none());
        assert!(provider.update_profile(ProfileUpdate::display_name("x")).await.is_err());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3], None);
    }

    #[tokio::test]
    async fn test_google_without_account_fails() {
        let provider = LocalIdentityProvider::new();
        assert!(provider.sign_in_with_google().await.unwrap_err().is_identity());
    }

    #[tokio::test]
    async fn test_dropped_subscription_stops_delivery() {
        let provider = LocalIdentityProvider::new();
        let (seen, sub) = recorder(&provider);
        assert_eq!(provider.listener_count(), 1);
        drop(sub);
        assert_eq!(provider.listener_count(), 0);

        provider.sign_out().await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
