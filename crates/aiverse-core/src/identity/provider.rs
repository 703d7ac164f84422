use async_trait::async_trait;

use super::model::{ProfileUpdate, Registration};
use crate::error::Result;
use crate::session::Identity;
use crate::subscription::{Listener, Subscription};

/// Callback receiving `Some(identity)` on sign-in or profile change and
/// `None` on sign-out.
pub type IdentityListener = Listener<Option<Identity>>;

/// External authentication service.
///
/// Implementations report identity changes to subscribers. Operations that
/// sign a user in or out do not return the new state to the caller's session
/// store; the store moves only when the provider notifies.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a listener for identity changes.
    ///
    /// The listener may fire any number of times, including after the caller
    /// has moved on; dropping the returned guard stops delivery.
    fn subscribe(&self, listener: IdentityListener) -> Subscription;

    /// Identity currently signed in, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Emails a one-time sign-in link that opens `continue_url`.
    async fn send_sign_in_link(&self, email: &str, continue_url: &str) -> Result<()>;

    /// True when `link` is a sign-in link issued by this provider.
    fn is_sign_in_link(&self, link: &str) -> bool;

    /// Completes an email-link sign-in.
    async fn sign_in_with_email_link(&self, email: &str, link: &str) -> Result<Identity>;

    async fn sign_in_with_google(&self) -> Result<Identity>;

    /// Creates an account and signs it in.
    async fn create_account(&self, registration: &Registration) -> Result<Identity>;

    async fn sign_out(&self) -> Result<()>;

    /// Applies `update` to the signed-in identity.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<Identity>;
}
