use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::TokenStore;
use crate::models::Session;

/// A store that keeps the session in process memory only.
pub struct MemoryStore {
    session: Mutex<Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            session: Mutex::new(Session::default()),
        }
    }

    /// Start out with `session` already stored.
    pub fn with_session(session: Session) -> Self {
        MemoryStore {
            session: Mutex::new(session),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn get(&self) -> Result<Session, String> {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(session.clone())
    }

    async fn set(&self, session: &Session) -> Result<(), String> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Session::default();
        Ok(())
    }

    fn get_name(&self) -> &str {
        "memory"
    }
}
