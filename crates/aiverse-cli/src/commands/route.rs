use std::sync::Arc;

use aiverse_application::{GuardOutcome, NavigationController};
use aiverse_core::navigation::{Access, Destination, NavigationDecision};
use aiverse_core::session::{Identity, SessionFlag, SessionStore};
use anyhow::Result;
use serde::Serialize;

use super::utils::print_json;
use crate::context::AppContext;

#[derive(Serialize)]
struct RouteReport<'a> {
    destination: &'a Destination,
    route: &'a str,
    access: Access,
    session: &'static str,
    decision: NavigationDecision,
    outcome: GuardOutcome,
}

fn session_label(flag: &SessionFlag) -> &'static str {
    match flag {
        SessionFlag::Unknown => "unknown",
        SessionFlag::Unauthenticated => "signed out",
        SessionFlag::Authenticated(_) => "signed in",
    }
}

/// Runs the gate for `path` under a chosen session flag.
///
/// `decision` is the plain route check; `outcome` is what the controller
/// does with it under the configured unknown-session behavior.
pub fn check(ctx: &AppContext, path: &str, as_user: Option<String>, unknown: bool, json: bool) -> Result<()> {
    let policy = ctx.route_policy()?;
    let store = SessionStore::shared();
    if !unknown {
        let identity = as_user.map(|name| Identity::new("cli-user").with_display_name(name));
        store.on_session_change(identity);
    }
    let flag = store.current();

    let destination = Destination::new(path);
    let decision = policy.can_enter(&destination, &flag);
    let access = policy.access(&destination);

    let controller = NavigationController::new(
        policy,
        ctx.config.navigation.unknown_session,
        Arc::clone(&store),
    );
    let outcome = controller.navigate(destination.clone());

    if json {
        return print_json(&RouteReport {
            destination: &destination,
            route: destination.route(),
            access,
            session: session_label(&flag),
            decision,
            outcome,
        });
    }

    println!("{} ({:?}, session {})", destination, access, session_label(&flag));
    match decision {
        NavigationDecision::Allow => println!("  can_enter: allow"),
        NavigationDecision::RedirectToLogin { return_to } => {
            println!("  can_enter: redirect to login, then back to {}", return_to)
        }
    }
    println!("  controller: {:?}", outcome);
    Ok(())
}

pub fn list(ctx: &AppContext) -> Result<()> {
    let policy = ctx.route_policy()?;
    println!("Home:    {}", policy.home());
    println!("Login:   {}", policy.login());
    println!("Sign up: {}", policy.signup());
    println!("Protected:");
    for route in policy.protected_routes() {
        println!("  {}", route);
    }
    println!("Everything else is public.");
    Ok(())
}
