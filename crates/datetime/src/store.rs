//! Preference store abstraction.
//!
//! The store is the collaborator that owns the user's persisted display
//! preferences. The cache in [`crate::cache`] sits in front of it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::pattern::DisplayPreferences;

/// Source of truth for display preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch the current preferences.
    async fn load(&self) -> Result<DisplayPreferences>;

    /// Persist new preferences.
    async fn save(&self, prefs: &DisplayPreferences) -> Result<()>;
}

/// Preferences kept in a JSON file.
///
/// A missing file reads as the default preferences.
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Create a store backed by `path`. The file is not touched until used.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for JsonFilePreferenceStore {
    async fn load(&self) -> Result<DisplayPreferences> {
        match fs::read_to_string(&self.path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No preference file, using defaults");
                Ok(DisplayPreferences::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, prefs: &DisplayPreferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json.as_bytes()).await?;
        Ok(())
    }
}

/// In-memory preference store.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    prefs: Mutex<DisplayPreferences>,
}

impl InMemoryPreferenceStore {
    /// Create a store holding `prefs`.
    pub fn new(prefs: DisplayPreferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load(&self) -> Result<DisplayPreferences> {
        Ok(*self.prefs.lock().await)
    }

    async fn save(&self, prefs: &DisplayPreferences) -> Result<()> {
        *self.prefs.lock().await = *prefs;
        Ok(())
    }
}
