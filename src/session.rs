//! Session lifecycle on top of the token store.
//!
//! Every write to the stored credentials goes through [`SessionHandle`] so
//! that listeners learn about it. Clearing the session publishes
//! [`SessionEvent::Invalidated`]; the navigator reacts to it with a hard
//! redirect to the login route, so transport code never touches navigation.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::models::{AuthenticatedUser, Session};
use crate::store::TokenStore;

const EVENT_CAPACITY: usize = 16;

/// Why a session was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The user asked to log out.
    Logout,
    /// The backend answered 401 to some request.
    Unauthorized,
}

impl InvalidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidationReason::Logout => "logout",
            InvalidationReason::Unauthorized => "unauthorized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// New credentials were written after a successful login.
    Established,
    /// Credentials were removed; whoever shows views must go back to login.
    Invalidated(InvalidationReason),
}

/// Shared, cloneable handle on the session: the store plus an event channel.
#[derive(Clone)]
pub struct SessionHandle {
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        SessionHandle { store, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn store_name(&self) -> &str {
        self.store.get_name()
    }

    /// The session as currently stored.
    pub async fn current(&self) -> Result<Session, String> {
        self.store.get().await
    }

    /// The non-empty access token, read fresh from the store.
    pub async fn access_token(&self) -> Result<Option<String>, String> {
        Ok(self.current().await?.access_token().map(str::to_string))
    }

    /// Whether a non-empty access token is stored right now. An unreadable
    /// store counts as logged out.
    pub async fn is_authenticated(&self) -> bool {
        match self.current().await {
            Ok(session) => session.is_authenticated(),
            Err(e) => {
                warn!("Token store '{}' unreadable: {}", self.store_name(), e);
                false
            }
        }
    }

    /// Decoded identity of the stored access token, recomputed on every call.
    pub async fn user(&self) -> Option<AuthenticatedUser> {
        let token = self.access_token().await.ok().flatten()?;
        AuthenticatedUser::from_access_token(&token)
    }

    /// Persist freshly issued credentials, replacing whatever was stored.
    pub async fn establish(&self, session: Session) -> Result<(), String> {
        self.store.set(&session).await?;
        info!(
            event_name = "client.session.established",
            event_domain = "session",
            store = self.store_name(),
            "session established"
        );
        let _ = self.events.send(SessionEvent::Established);
        Ok(())
    }

    /// Destroy the stored credentials and tell listeners to redirect to login.
    ///
    /// The event is published even when clearing the store fails, so the
    /// user still ends up on the login route.
    pub async fn invalidate(&self, reason: InvalidationReason) -> Result<(), String> {
        let cleared = self.store.clear().await;
        info!(
            event_name = "client.session.invalidated",
            event_domain = "session",
            reason = reason.as_str(),
            store = self.store_name(),
            "session invalidated"
        );
        let _ = self.events.send(SessionEvent::Invalidated(reason));
        cleared
    }

    pub async fn logout(&self) -> Result<(), String> {
        self.invalidate(InvalidationReason::Logout).await
    }
}
