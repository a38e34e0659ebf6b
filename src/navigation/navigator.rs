use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info};

use super::guard::{GuardDecision, SessionGuard};
use super::route::Route;
use crate::session::{SessionEvent, SessionHandle};

/// Upper bound on guard redirects followed for one navigation.
const MAX_REDIRECTS: usize = 4;

/// Captured by a view when it starts work; stale once the user has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    pub route: Route,
    generation: u64,
}

/// Where a navigation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub route: Route,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.requested != self.route
    }
}

struct NavState {
    route: Route,
    /// Bumped on every route change; outstanding tickets become stale.
    generation: u64,
    /// Bumped on hard redirects only.
    reloads: u64,
}

/// Owns the active route and applies the session guard to every navigation.
///
/// It listens for [`SessionEvent::Invalidated`] and answers with a hard
/// redirect: the route becomes login and all view state is discarded.
/// Pending events are applied before the route is read, so the route
/// observed right after an invalidation is already the login route.
pub struct Navigator {
    guard: SessionGuard,
    state: Mutex<NavState>,
    events: Mutex<broadcast::Receiver<SessionEvent>>,
}

impl Navigator {
    pub fn new(session: &SessionHandle) -> Self {
        Navigator {
            guard: SessionGuard::new(session.clone()),
            state: Mutex::new(NavState {
                route: Route::Root,
                generation: 0,
                reloads: 0,
            }),
            events: Mutex::new(session.subscribe()),
        }
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    fn state(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply any session events published since the last look.
    pub fn sync(&self) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match events.try_recv() {
                Ok(SessionEvent::Invalidated(reason)) => {
                    debug!("Session invalidated ({})", reason.as_str());
                    self.hard_redirect(Route::LOGIN);
                }
                Ok(SessionEvent::Established) => {}
                // Missed events can only have been session changes; the
                // guard re-reads the store on the next navigation anyway.
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn hard_redirect(&self, route: Route) {
        let mut state = self.state();
        info!(
            event_name = "client.navigation.hard_redirect",
            event_domain = "navigation",
            from = state.route.path(),
            to = route.path(),
            "discarding view state and redirecting"
        );
        state.route = route;
        state.generation += 1;
        state.reloads += 1;
    }

    /// Navigate to `requested`, following guard redirects. The guard runs
    /// on every call.
    pub async fn navigate(&self, requested: Route) -> Navigation {
        self.sync();
        let mut target = requested;
        let mut resolved = None;
        for _ in 0..MAX_REDIRECTS {
            match self.guard.check(target).await {
                GuardDecision::Render(route) => {
                    resolved = Some(route);
                    break;
                }
                GuardDecision::Redirect(next) => {
                    debug!("{} redirected to {}", target, next);
                    target = next;
                }
            }
        }
        let route = resolved.unwrap_or(Route::LOGIN);

        let mut state = self.state();
        state.route = route;
        state.generation += 1;
        debug!("Now at {}", route);
        Navigation { requested, route }
    }

    /// The active route, with pending session events applied first.
    pub fn current_route(&self) -> Route {
        self.sync();
        self.state().route
    }

    /// How many hard redirects have happened.
    pub fn reloads(&self) -> u64 {
        self.sync();
        self.state().reloads
    }

    pub fn ticket(&self) -> ViewTicket {
        self.sync();
        let state = self.state();
        ViewTicket {
            route: state.route,
            generation: state.generation,
        }
    }

    /// Whether the view holding `ticket` is still the one on screen.
    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        self.sync();
        self.state().generation == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Session;
    use crate::session::InvalidationReason;
    use crate::store::memory_store::MemoryStore;
    use std::sync::Arc;

    fn navigator_with(session: Session) -> (Navigator, SessionHandle) {
        let handle = SessionHandle::new(Arc::new(MemoryStore::with_session(session)));
        (Navigator::new(&handle), handle)
    }

    #[tokio::test]
    async fn test_root_lands_on_dashboard_when_logged_in() {
        let (navigator, _) = navigator_with(Session::new("a1", "r1"));
        let nav = navigator.navigate(Route::Root).await;
        assert_eq!(nav.route, Route::Dashboard);
        assert_eq!(navigator.current_route(), Route::Dashboard);
    }

    #[tokio::test]
    async fn test_root_lands_on_login_when_logged_out() {
        let (navigator, _) = navigator_with(Session::default());
        let nav = navigator.navigate(Route::Root).await;
        assert_eq!(nav.route, Route::Login);
        assert!(nav.was_redirected());
    }

    #[tokio::test]
    async fn test_invalidation_forces_login_route() {
        let (navigator, handle) = navigator_with(Session::new("a1", "r1"));
        navigator.navigate(Route::EmailHistory).await;
        let ticket = navigator.ticket();

        handle
            .invalidate(InvalidationReason::Unauthorized)
            .await
            .unwrap();

        assert_eq!(navigator.current_route(), Route::Login);
        assert!(!navigator.is_current(&ticket));
        assert_eq!(navigator.reloads(), 1);
    }

    #[tokio::test]
    async fn test_navigation_makes_old_tickets_stale() {
        let (navigator, _) = navigator_with(Session::new("a1", "r1"));
        navigator.navigate(Route::Dashboard).await;
        let ticket = navigator.ticket();
        assert!(navigator.is_current(&ticket));

        navigator.navigate(Route::Profile).await;
        assert!(!navigator.is_current(&ticket));
        assert_eq!(navigator.reloads(), 0);
    }

    #[tokio::test]
    async fn test_login_event_does_not_move_route() {
        let (navigator, handle) = navigator_with(Session::default());
        navigator.navigate(Route::Login).await;
        handle.establish(Session::new("a1", "r1")).await.unwrap();
        assert_eq!(navigator.current_route(), Route::Login);
        assert_eq!(navigator.navigate(Route::Dashboard).await.route, Route::Dashboard);
    }
}
