//! Navigation controller.
//!
//! Holds where the user is and re-runs the route gate whenever the
//! destination or the session flag changes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aiverse_core::config::UnknownSessionBehavior;
use aiverse_core::navigation::{Destination, NavigationDecision, RoutePolicy};
use aiverse_core::session::{SessionFlag, SessionStore};
use aiverse_core::subscription::Subscription;
use serde::Serialize;

/// What the presentation layer should do for the current destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Show the destination.
    Render { destination: Destination },
    /// Replace the location with `to`. `return_to` is set when the user is
    /// sent to sign in and should come back afterwards.
    Redirect {
        to: Destination,
        return_to: Option<Destination>,
    },
    /// The session is still unknown; show a loading state for the
    /// destination.
    Pending { destination: Destination },
}

impl GuardOutcome {
    /// Where the user ends up once the outcome is applied.
    pub fn location(&self) -> &Destination {
        match self {
            Self::Render { destination } | Self::Pending { destination } => destination,
            Self::Redirect { to, .. } => to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    /// Current location (the target of the last redirect, if any)
    location: Option<Destination>,
    /// Destination to return to after signing in
    return_to: Option<Destination>,
    /// Outcome the presentation layer is settled on
    settled: Option<GuardOutcome>,
}

/// Session-aware router.
pub struct NavigationController {
    policy: RoutePolicy,
    unknown_session: UnknownSessionBehavior,
    store: Arc<SessionStore>,
    state: Mutex<ControllerState>,
}

impl NavigationController {
    pub fn new(policy: RoutePolicy, unknown_session: UnknownSessionBehavior, store: Arc<SessionStore>) -> Self {
        Self {
            policy,
            unknown_session,
            store,
            state: Mutex::new(ControllerState::default()),
        }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    pub fn location(&self) -> Option<Destination> {
        self.lock().location.clone()
    }

    /// Destination remembered for after sign-in, if any.
    pub fn return_to(&self) -> Option<Destination> {
        self.lock().return_to.clone()
    }

    /// Requests `destination` under the current session flag.
    pub fn navigate(&self, destination: impl Into<Destination>) -> GuardOutcome {
        let destination = destination.into();
        let flag = self.store.current();
        let mut state = self.lock();
        let outcome = self.resolve(&mut state, destination, &flag);
        tracing::debug!("[NavigationController] navigate -> {:?}", outcome);
        outcome
    }

    /// Re-evaluates the current location after a flag change.
    ///
    /// Returns the new outcome only when it differs from what is already
    /// shown, so repeated notifications never produce duplicate redirects.
    pub fn on_flag_change(&self, flag: &SessionFlag) -> Option<GuardOutcome> {
        let mut state = self.lock();
        let location = state.location.clone()?;
        let before = state.settled.clone();

        let outcome = self.resolve(&mut state, location, flag);
        if before == state.settled {
            return None;
        }
        tracing::debug!("[NavigationController] session change -> {:?}", outcome);
        Some(outcome)
    }

    /// Subscribes to the session store; `on_outcome` receives every new
    /// outcome. Dropping the returned guard detaches the controller.
    pub fn attach<F>(self: &Arc<Self>, on_outcome: F) -> Subscription
    where
        F: Fn(&GuardOutcome) + Send + Sync + 'static,
    {
        let controller = Arc::downgrade(self);
        self.store.subscribe(move |flag| {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            if let Some(outcome) = controller.on_flag_change(flag) {
                on_outcome(&outcome);
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Gates `destination`, updates the location, and records what ends up
    /// on screen.
    fn resolve(&self, state: &mut ControllerState, destination: Destination, flag: &SessionFlag) -> GuardOutcome {
        let outcome = self.evaluate(state, &destination, flag);

        match &outcome {
            GuardOutcome::Redirect { to, return_to } => {
                state.return_to = return_to.clone();
                state.location = Some(to.clone());
                state.settled = Some(GuardOutcome::Render { destination: to.clone() });
            }
            GuardOutcome::Render { destination } | GuardOutcome::Pending { destination } => {
                // Leaving the sign-in pages for anything else abandons the
                // pending return.
                if matches!(outcome, GuardOutcome::Render { .. }) && !self.policy.is_auth_entry(destination) {
                    state.return_to = None;
                }
                state.location = Some(destination.clone());
                state.settled = Some(outcome.clone());
            }
        }
        outcome
    }

    fn evaluate(&self, state: &ControllerState, destination: &Destination, flag: &SessionFlag) -> GuardOutcome {
        if flag.is_authenticated() && self.policy.is_auth_entry(destination) {
            let to = state
                .return_to
                .clone()
                .unwrap_or_else(|| self.policy.home().clone());
            return GuardOutcome::Redirect { to, return_to: None };
        }

        match self.policy.can_enter(destination, flag) {
            NavigationDecision::Allow => GuardOutcome::Render {
                destination: destination.clone(),
            },
            NavigationDecision::RedirectToLogin { .. }
                if !flag.is_known() && self.unknown_session == UnknownSessionBehavior::Defer =>
            {
                GuardOutcome::Pending {
                    destination: destination.clone(),
                }
            }
            NavigationDecision::RedirectToLogin { return_to } => GuardOutcome::Redirect {
                to: self.policy.login().clone(),
                return_to: Some(return_to),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiverse_core::session::Identity;

    fn controller(behavior: UnknownSessionBehavior) -> (Arc<NavigationController>, Arc<SessionStore>) {
        let store = SessionStore::shared();
        let controller = Arc::new(NavigationController::new(RoutePolicy::default(), behavior, store.clone()));
        (controller, store)
    }

    fn render(path: &str) -> GuardOutcome {
        GuardOutcome::Render {
            destination: Destination::new(path),
        }
    }

    fn to_login(from: &str) -> GuardOutcome {
        GuardOutcome::Redirect {
            to: Destination::new("/login"),
            return_to: Some(Destination::new(from)),
        }
    }

    #[test]
    fn test_unknown_redirects_by_default() {
        let (controller, _store) = controller(UnknownSessionBehavior::Redirect);
        assert_eq!(controller.navigate("/applications"), to_login("/applications"));
        assert_eq!(controller.location(), Some(Destination::new("/login")));
        assert_eq!(controller.return_to(), Some(Destination::new("/applications")));
    }

    #[test]
    fn test_defer_waits_for_session() {
        let (controller, store) = controller(UnknownSessionBehavior::Defer);
        assert_eq!(
            controller.navigate("/profile"),
            GuardOutcome::Pending {
                destination: Destination::new("/profile")
            }
        );

        store.on_session_change(Some(Identity::new("u1")));
        assert_eq!(
            controller.on_flag_change(&store.current()),
            Some(render("/profile"))
        );
    }

    #[test]
    fn test_defer_then_signed_out_redirects() {
        let (controller, _store) = controller(UnknownSessionBehavior::Defer);
        controller.navigate("/applications");
        assert_eq!(
            controller.on_flag_change(&SessionFlag::Unauthenticated),
            Some(to_login("/applications"))
        );
    }

    #[test]
    fn test_returns_after_sign_in() {
        let (controller, _store) = controller(UnknownSessionBehavior::Redirect);
        controller.navigate("/applications?q=chat");

        // Unknown -> Unauthenticated while on the login page changes nothing
        assert_eq!(controller.on_flag_change(&SessionFlag::Unauthenticated), None);

        let signed_in = SessionFlag::Authenticated(Identity::new("u1"));
        assert_eq!(
            controller.on_flag_change(&signed_in),
            Some(GuardOutcome::Redirect {
                to: Destination::new("/applications?q=chat"),
                return_to: None,
            })
        );
        assert_eq!(controller.location(), Some(Destination::new("/applications?q=chat")));
        assert_eq!(controller.return_to(), None);

        // same flag again: nothing new
        assert_eq!(controller.on_flag_change(&signed_in), None);
    }

    #[test]
    fn test_abandoned_return_is_forgotten() {
        let (controller, store) = controller(UnknownSessionBehavior::Redirect);
        store.on_session_change(None);
        assert_eq!(controller.navigate("/profile"), to_login("/profile"));

        assert_eq!(controller.navigate("/blog"), render("/blog"));
        assert_eq!(controller.return_to(), None);
        assert_eq!(controller.navigate("/login"), render("/login"));

        store.on_session_change(Some(Identity::new("u1")));
        assert_eq!(
            controller.on_flag_change(&store.current()),
            Some(GuardOutcome::Redirect {
                to: Destination::new("/"),
                return_to: None,
            })
        );
    }

    #[test]
    fn test_return_survives_moving_between_sign_in_pages() {
        let (controller, store) = controller(UnknownSessionBehavior::Redirect);
        store.on_session_change(None);
        controller.navigate("/applications");
        assert_eq!(controller.navigate("/signup"), render("/signup"));
        assert_eq!(controller.navigate("/login"), render("/login"));
        assert_eq!(controller.return_to(), Some(Destination::new("/applications")));
    }

    #[test]
    fn test_signed_in_user_leaves_login_for_home() {
        let (controller, store) = controller(UnknownSessionBehavior::Redirect);
        store.on_session_change(Some(Identity::new("u1")));
        assert_eq!(
            controller.navigate("/login"),
            GuardOutcome::Redirect {
                to: Destination::new("/"),
                return_to: None,
            }
        );
    }

    #[test]
    fn test_sign_out_on_protected_page() {
        let (controller, store) = controller(UnknownSessionBehavior::Redirect);
        store.on_session_change(Some(Identity::new("u1")));
        assert_eq!(controller.navigate("/profile"), render("/profile"));

        assert_eq!(
            controller.on_flag_change(&SessionFlag::Unauthenticated),
            Some(to_login("/profile"))
        );
    }

    #[test]
    fn test_public_pages_unaffected_by_flag() {
        let (controller, _store) = controller(UnknownSessionBehavior::Redirect);
        assert_eq!(controller.navigate("/blog"), render("/blog"));
        assert_eq!(controller.on_flag_change(&SessionFlag::Unauthenticated), None);
        assert_eq!(
            controller.on_flag_change(&SessionFlag::Authenticated(Identity::new("u1"))),
            None
        );
    }

    #[test]
    fn test_attach_delivers_outcomes() {
        let (controller, store) = controller(UnknownSessionBehavior::Redirect);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let subscription = controller.attach(move |outcome| s.lock().unwrap().push(outcome.clone()));

        controller.navigate("/applications");
        store.on_session_change(None);
        store.on_session_change(Some(Identity::new("u1")));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![GuardOutcome::Redirect {
                to: Destination::new("/applications"),
                return_to: None,
            }]
        );

        drop(subscription);
        store.on_session_change(None);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
