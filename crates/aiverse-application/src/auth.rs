//! Sign-in, sign-up and sign-out.
//!
//! None of these operations touch the session flag. The identity provider
//! reports the outcome through its subscription and the session binding
//! applies it, so a failed call leaves the flag exactly where it was.

use std::sync::Arc;

use aiverse_core::AiverseError;
use aiverse_core::identity::{IdentityProvider, Registration, is_valid_email};
use aiverse_core::navigation::Destination;
use aiverse_core::state::StateRepository;
use anyhow::{Context, Result};

use crate::notice::Notice;

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpComplete {
    pub notice: Notice,
    /// Where to send the user next
    pub continue_to: Destination,
}

pub struct AuthUseCase {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<dyn StateRepository>,
    /// Page the emailed sign-in link opens
    sign_in_url: String,
    login: Destination,
}

impl AuthUseCase {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        state: Arc<dyn StateRepository>,
        sign_in_url: impl Into<String>,
        login: Destination,
    ) -> Self {
        Self {
            provider,
            state,
            sign_in_url: sign_in_url.into(),
            login,
        }
    }

    /// Emails a sign-in link and remembers the address for completing it.
    pub async fn send_sign_in_link(&self, email: &str) -> Result<Notice> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AiverseError::validation("Please enter a valid email address").into());
        }

        self.provider.send_sign_in_link(email, &self.sign_in_url).await?;
        self.state
            .set_email_for_sign_in(email.to_string())
            .await
            .context("Failed to remember sign-in email")?;

        tracing::info!("[AuthUseCase] Sign-in link sent to {}", email);
        Ok(Notice::success(format!(
            "Sign-in link sent to {}. Please check your email.",
            email
        )))
    }

    pub fn is_sign_in_link(&self, link: &str) -> bool {
        self.provider.is_sign_in_link(link)
    }

    /// Completes an email-link sign-in opened at `link`.
    ///
    /// Uses `email` when given, otherwise the address remembered by
    /// [`AuthUseCase::send_sign_in_link`]. With neither, returns an info
    /// notice asking for the address and does nothing else.
    pub async fn complete_email_link_sign_in(&self, link: &str, email: Option<&str>) -> Result<Notice> {
        if !self.provider.is_sign_in_link(link) {
            return Err(AiverseError::validation("This is not a valid sign-in link").into());
        }

        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => Some(email.to_string()),
            None => self.state.get_email_for_sign_in().await,
        };
        let Some(email) = email else {
            return Ok(Notice::info("Please enter your email to complete sign in"));
        };

        let identity = self.provider.sign_in_with_email_link(&email, link).await?;
        self.state
            .clear_email_for_sign_in()
            .await
            .context("Failed to clear sign-in email")?;

        tracing::info!("[AuthUseCase] {} signed in with email link", identity.uid);
        Ok(Notice::success("Successfully signed in!"))
    }

    pub async fn sign_in_with_google(&self) -> Result<Notice> {
        let identity = self.provider.sign_in_with_google().await?;
        tracing::info!("[AuthUseCase] {} signed in with Google", identity.uid);
        Ok(Notice::success(format!("Welcome, {}!", identity.label())))
    }

    pub async fn sign_out(&self) -> Result<Notice> {
        self.provider.sign_out().await?;
        Ok(Notice::info("You have been signed out"))
    }

    /// Validates the form, then creates the account.
    pub async fn sign_up(&self, registration: &Registration) -> Result<SignUpComplete> {
        registration.validate()?;

        let identity = self.provider.create_account(registration).await?;
        tracing::info!("[AuthUseCase] Created account {}", identity.uid);

        Ok(SignUpComplete {
            notice: Notice::success("Account created successfully!"),
            continue_to: self.login.clone(),
        })
    }
}
