//! Host key-value storage for the settings object
//!
//! The host owns persistence; the plugin only hands it a JSON value to keep.
//! [`FileStore`] persists that value as TOML for running outside a host, and
//! [`MemoryStore`] backs tests and the simulated host.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted settings object, `None` when nothing was saved yet
    async fn load_data(&self) -> Result<Option<Value>>;

    /// Replace the persisted settings object
    async fn save_data(&self, data: &Value) -> Result<()>;
}

/// Settings persisted as a TOML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_tilde(path.as_ref()),
        }
    }

    /// Store at the default location
    pub fn at_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the settings file path
    /// Always uses ~/.config/smoothscroll/settings.toml on all platforms
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("smoothscroll")
            .join("settings.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn load_data(&self) -> Result<Option<Value>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let data: Value = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Some(data))
    }

    async fn save_data(&self, data: &Value) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(data).map_err(|e| Error::Config(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), "Saved settings");

        Ok(())
    }
}

/// In-memory store that counts saves
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<Value>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Mutex::new(Some(data)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored object
    pub fn data(&self) -> Option<Value> {
        self.data.lock().ok().and_then(|data| data.clone())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load_data(&self) -> Result<Option<Value>> {
        let data = self
            .data
            .lock()
            .map_err(|_| Error::Other("settings store lock poisoned".to_string()))?;
        Ok(data.clone())
    }

    async fn save_data(&self, data: &Value) -> Result<()> {
        let mut stored = self
            .data
            .lock()
            .map_err(|_| Error::Other("settings store lock poisoned".to_string()))?;
        *stored = Some(data.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}
