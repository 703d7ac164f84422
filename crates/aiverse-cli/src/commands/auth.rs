use std::path::PathBuf;
use std::sync::Arc;

use aiverse_application::{AuthUseCase, NavigationController, Notice, NoticeKind, ProfileUseCase, bind_session};
use aiverse_core::session::SessionStore;
use aiverse_infrastructure::LocalIdentityProvider;
use anyhow::{Context, Result};

use crate::context::AppContext;

fn print_notice(notice: &Notice) {
    let marker = match notice.kind {
        NoticeKind::Success => "✅",
        NoticeKind::Error => "❌",
        NoticeKind::Info => "ℹ️ ",
    };
    println!("{} {}", marker, notice.text);
}

/// Plays the email-link sign-in against the in-process provider: request a
/// page, get sent to login, follow the emailed link, come back, optionally
/// edit the profile, sign out.
pub async fn demo(
    ctx: &AppContext,
    email: &str,
    to: &str,
    name: Option<String>,
    photo: Option<PathBuf>,
) -> Result<()> {
    let store = SessionStore::shared();
    let provider = Arc::new(LocalIdentityProvider::new());
    let binding = bind_session(&store, provider.as_ref());

    let controller = Arc::new(NavigationController::new(
        ctx.route_policy()?,
        ctx.config.navigation.unknown_session,
        Arc::clone(&store),
    ));
    let _attached = controller.attach(|outcome| {
        println!("   -> {:?}", outcome);
    });

    let auth = AuthUseCase::new(
        provider.clone(),
        ctx.state_repository().await?,
        ctx.config.identity.sign_in_url.clone(),
        controller.policy().login().clone(),
    );

    println!("Requesting {}", to);
    println!("   -> {:?}", controller.navigate(to));

    let notice = match auth.send_sign_in_link(email).await {
        Ok(notice) => notice,
        Err(err) => {
            print_notice(&Notice::from_error(&err, "Failed to send sign-in link"));
            return Err(err);
        }
    };
    print_notice(&notice);

    let link = provider
        .last_link_for(email.trim())
        .context("No sign-in link was recorded")?;
    println!("Opening {}", link);
    print_notice(&auth.complete_email_link_sign_in(&link, None).await?);

    if let Some(location) = controller.location() {
        println!("Now at {}", location);
    }

    let profile = ProfileUseCase::new(Arc::clone(&store), provider.clone(), ctx.object_storage()?);
    if let Some(name) = name {
        let updated = profile.update_display_name(&name).await?;
        println!("Display name: {}", updated.display_name);
    }
    if let Some(path) = photo {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let content_type = mime_guess::from_path(&path).first_or_octet_stream();
        let updated = profile.upload_photo(bytes, content_type.essence_str()).await?;
        if let Some(url) = updated.photo_url {
            println!("Photo: {}", url);
        }
    }

    println!("Signing out");
    print_notice(&auth.sign_out().await?);

    binding.unbind();
    Ok(())
}
