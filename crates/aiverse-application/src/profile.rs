//! Profile page operations.

use std::sync::Arc;

use aiverse_core::AiverseError;
use aiverse_core::identity::{IdentityProvider, ProfileUpdate};
use aiverse_core::session::{Identity, SessionStore};
use aiverse_core::storage::ObjectStorage;
use aiverse_core::user::UserProfile;
use anyhow::{Context, Result};
use uuid::Uuid;

/// Object key prefix for profile photos.
pub const PROFILE_PHOTO_PREFIX: &str = "profile_photos";

pub struct ProfileUseCase {
    store: Arc<SessionStore>,
    provider: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
}

impl ProfileUseCase {
    pub fn new(store: Arc<SessionStore>, provider: Arc<dyn IdentityProvider>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            store,
            provider,
            storage,
        }
    }

    fn signed_in(&self) -> Result<Identity> {
        self.store
            .current()
            .identity()
            .cloned()
            .ok_or_else(|| AiverseError::Unauthenticated.into())
    }

    /// Profile of the signed-in user.
    pub fn current_profile(&self) -> Result<UserProfile> {
        Ok(UserProfile::from(&self.signed_in()?))
    }

    pub async fn update_display_name(&self, name: &str) -> Result<UserProfile> {
        self.signed_in()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AiverseError::validation("Display name cannot be empty").into());
        }

        let identity = self.provider.update_profile(ProfileUpdate::display_name(name)).await?;
        Ok(UserProfile::from(&identity))
    }

    /// Uploads a new profile photo and points the identity at it.
    ///
    /// The object goes under `profile_photos/{uid}/`; a fresh name per upload
    /// keeps cached copies of the old photo from shadowing the new one.
    pub async fn upload_photo(&self, bytes: Vec<u8>, content_type: &str) -> Result<UserProfile> {
        let identity = self.signed_in()?;
        if !content_type.starts_with("image/") {
            return Err(AiverseError::validation("Please choose an image file").into());
        }
        if bytes.is_empty() {
            return Err(AiverseError::validation("The selected file is empty").into());
        }

        let key = format!("{}/{}/{}", PROFILE_PHOTO_PREFIX, identity.uid, Uuid::new_v4());
        let url = self
            .storage
            .upload(&key, bytes, content_type)
            .await
            .context("Failed to upload profile photo")?;
        tracing::info!("[ProfileUseCase] Uploaded photo for {} to {}", identity.uid, url);

        let identity = self.provider.update_profile(ProfileUpdate::photo_url(url)).await?;
        Ok(UserProfile::from(&identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiverse_core::error::Result as CoreResult;
    use aiverse_core::identity::{IdentityListener, Registration};
    use aiverse_core::subscription::Subscription;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that echoes updates onto a fixed identity.
    struct EchoProvider {
        identity: Mutex<Identity>,
    }

    #[async_trait]
    impl IdentityProvider for EchoProvider {
        fn subscribe(&self, _listener: IdentityListener) -> Subscription {
            Subscription::noop()
        }
        fn current_identity(&self) -> Option<Identity> {
            Some(self.identity.lock().unwrap().clone())
        }
        async fn send_sign_in_link(&self, _email: &str, _continue_url: &str) -> CoreResult<()> {
            Ok(())
        }
        fn is_sign_in_link(&self, _link: &str) -> bool {
            false
        }
        async fn sign_in_with_email_link(&self, _email: &str, _link: &str) -> CoreResult<Identity> {
            unimplemented!()
        }
        async fn sign_in_with_google(&self) -> CoreResult<Identity> {
            unimplemented!()
        }
        async fn create_account(&self, _registration: &Registration) -> CoreResult<Identity> {
            unimplemented!()
        }
        async fn sign_out(&self) -> CoreResult<()> {
            Ok(())
        }
        async fn update_profile(&self, update: ProfileUpdate) -> CoreResult<Identity> {
            let mut identity = self.identity.lock().unwrap();
            if let Some(name) = update.display_name {
                identity.display_name = Some(name);
            }
            if let Some(url) = update.photo_url {
                identity.photo_url = Some(url);
            }
            Ok(identity.clone())
        }
    }

    #[derive(Default)]
    struct RecordingStorage {
        keys: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ObjectStorage for RecordingStorage {
        async fn upload(&self, path: &str, _bytes: Vec<u8>, content_type: &str) -> CoreResult<String> {
            self.keys
                .lock()
                .unwrap()
                .push((path.to_string(), content_type.to_string()));
            Ok(format!("https://cdn.example/{}", path))
        }
    }

    fn setup(signed_in: bool) -> (ProfileUseCase, Arc<RecordingStorage>) {
        let identity = Identity::new("u1").with_email("ada@example.com");
        let store = SessionStore::shared();
        store.on_session_change(signed_in.then(|| identity.clone()));

        let storage = Arc::new(RecordingStorage::default());
        let usecase = ProfileUseCase::new(
            store,
            Arc::new(EchoProvider {
                identity: Mutex::new(identity),
            }),
            storage.clone(),
        );
        (usecase, storage)
    }

    #[test]
    fn test_current_profile_requires_sign_in() {
        let (usecase, _) = setup(false);
        let err = usecase.current_profile().unwrap_err();
        assert_eq!(err.downcast_ref::<AiverseError>(), Some(&AiverseError::Unauthenticated));

        let (usecase, _) = setup(true);
        assert_eq!(usecase.current_profile().unwrap().display_name, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_display_name() {
        let (usecase, _) = setup(true);
        let profile = usecase.update_display_name("  Ada  ").await.unwrap();
        assert_eq!(profile.display_name, "Ada");

        assert!(usecase.update_display_name("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_upload_photo_path_and_url() {
        let (usecase, storage) = setup(true);
        let profile = usecase.upload_photo(vec![1, 2, 3], "image/png").await.unwrap();

        let keys = storage.keys.lock().unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].0.starts_with("profile_photos/u1/"));
        assert_eq!(keys[0].1, "image/png");
        assert_eq!(
            profile.photo_url,
            Some(format!("https://cdn.example/{}", keys[0].0))
        );
    }

    #[tokio::test]
    async fn test_upload_photo_rejects_non_images() {
        let (usecase, storage) = setup(true);
        assert!(usecase.upload_photo(vec![1], "application/pdf").await.is_err());
        assert!(usecase.upload_photo(Vec::new(), "image/png").await.is_err());
        assert!(storage.keys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_photo_requires_sign_in() {
        let (usecase, storage) = setup(false);
        assert!(usecase.upload_photo(vec![1], "image/png").await.is_err());
        assert!(storage.keys.lock().unwrap().is_empty());
    }
}
