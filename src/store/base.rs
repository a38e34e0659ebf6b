use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::StoreConfig;
use crate::models::Session;

/// Storage key under which the access token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "authToken";
/// Storage key under which the refresh token is persisted.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// The TokenStore trait abstracts durable session storage (get, set, clear).
///
/// Implementations do no locking of their own beyond what their medium
/// needs: writes are last-write-wins.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored session. Missing storage reads as an empty session.
    async fn get(&self) -> Result<Session, String>;
    /// Replace the stored session. Absent halves are removed, so a
    /// subsequent `get` returns exactly `session`.
    async fn set(&self, session: &Session) -> Result<(), String>;
    /// Remove both tokens.
    async fn clear(&self) -> Result<(), String>;
    fn get_name(&self) -> &str;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub fn create_store(config: &StoreConfig) -> Arc<dyn TokenStore> {
    match config {
        StoreConfig::File(file_config) => {
            info!(
                "Using file token store at {}",
                file_config.path.display()
            );
            Arc::new(FileStore::new(file_config))
        }
        StoreConfig::Memory => {
            info!("Using in-memory token store; the session ends with the process.");
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::file_store::FileStoreConfig;

    #[test]
    fn test_create_store_picks_backend() {
        assert_eq!(create_store(&StoreConfig::Memory).get_name(), "memory");
        let file = create_store(&StoreConfig::File(FileStoreConfig {
            path: "session.json".into(),
        }));
        assert_eq!(file.get_name(), "file");
    }
}
