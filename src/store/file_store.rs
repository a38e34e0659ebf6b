use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::models::Session;

/// The config struct for the file-backed store.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        FileStoreConfig {
            path: PathBuf::from(".phishguard/session.json"),
        }
    }
}

/// A durable key-value store: one flat JSON object of string values, in
/// which the tokens live under fixed keys. Unrelated keys are preserved.
///
/// The file is written with owner-only permissions on unix.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(config: &FileStoreConfig) -> Self {
        FileStore {
            path: config.path.clone(),
        }
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, String> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(format!(
                    "Failed to read token store {}: {}",
                    self.path.display(),
                    e
                ))
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            format!(
                "Failed to parse token store {}: {}",
                self.path.display(),
                e
            )
        })
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), String> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(format!(
                    "Failed to remove token store {}: {}",
                    self.path.display(),
                    e
                )),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize token store: {}", e))?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| format!("Failed to open {} for writing: {}", self.path.display(), e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| format!("Failed to write to {}: {}", self.path.display(), e))?;
        file.flush()
            .await
            .map_err(|e| format!("Failed to flush {}: {}", self.path.display(), e))?;
        Ok(())
    }
}

fn put(entries: &mut BTreeMap<String, String>, key: &str, value: &Option<String>) {
    match value {
        Some(v) => {
            entries.insert(key.to_string(), v.clone());
        }
        None => {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl TokenStore for FileStore {
    async fn get(&self) -> Result<Session, String> {
        let mut entries = self.read_entries().await?;
        Ok(Session {
            access_token: entries.remove(ACCESS_TOKEN_KEY),
            refresh_token: entries.remove(REFRESH_TOKEN_KEY),
        })
    }

    async fn set(&self, session: &Session) -> Result<(), String> {
        let mut entries = self.read_entries().await?;
        put(&mut entries, ACCESS_TOKEN_KEY, &session.access_token);
        put(&mut entries, REFRESH_TOKEN_KEY, &session.refresh_token);
        debug!("Writing session to {}", self.path.display());
        self.write_entries(&entries).await
    }

    async fn clear(&self) -> Result<(), String> {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                // An unreadable file cannot hold a usable session; drop it.
                warn!("{}; removing it", e);
                BTreeMap::new()
            }
        };
        entries.remove(ACCESS_TOKEN_KEY);
        entries.remove(REFRESH_TOKEN_KEY);
        debug!("Clearing session in {}", self.path.display());
        self.write_entries(&entries).await
    }

    fn get_name(&self) -> &str {
        "file"
    }
}
