use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::Mutex as StdMutex,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Key/value persistence for client-side session state.
///
/// Mirrors browser local storage: flat string keys, string values, no
/// transactions. Implementations must tolerate concurrent callers; the last
/// write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    async fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Stores all keys in one pretty-printed JSON object on disk.
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write cycles inside this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, ApiError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Like `read_all`, but an unparseable file reads as empty so the next
    /// write replaces it. The flag tells whether the file must be rewritten.
    async fn read_for_write(&self) -> Result<(BTreeMap<String, String>, bool), ApiError> {
        match self.read_all().await {
            Ok(entries) => Ok((entries, false)),
            Err(ApiError::Decode(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "discarding unreadable session file"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.read_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.read_for_write().await?;
        if entries.remove(key).is_some() || corrupt {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}

/// Volatile store, used by tests and embedders that keep the session in memory.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: StdMutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.entries().remove(key);
        Ok(())
    }
}
