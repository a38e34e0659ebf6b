use tracing::debug;

use super::route::Route;
use crate::session::SessionHandle;

/// The two states the guard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the route (inside the navigation shell when protected).
    Render(Route),
    /// Go somewhere else instead.
    Redirect(Route),
}

/// Gates the protected view tree on the presence of an access token.
///
/// The state is read from the store on every check and never cached. The
/// token is not validated against the backend: a present but expired token
/// passes until the first request using it is rejected.
#[derive(Clone)]
pub struct SessionGuard {
    session: SessionHandle,
}

impl SessionGuard {
    pub fn new(session: SessionHandle) -> Self {
        SessionGuard { session }
    }

    pub async fn state(&self) -> AuthState {
        if self.session.is_authenticated().await {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Decide what to do with a request for `route`.
    pub async fn check(&self, route: Route) -> GuardDecision {
        if route == Route::Root {
            return GuardDecision::Redirect(Route::Dashboard);
        }
        if !route.is_protected() {
            return GuardDecision::Render(route);
        }
        match self.state().await {
            AuthState::Authenticated => GuardDecision::Render(route),
            AuthState::Unauthenticated => {
                debug!("No access token; {} redirects to {}", route, Route::LOGIN);
                GuardDecision::Redirect(Route::LOGIN)
            }
        }
    }
}
