//! Persisted operator settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use warden_core::{Credentials, ReactionPolicy, RuntimeConfig};
use warden_error::SettingsError;

/// Everything the operator configured, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last credentials that authenticated successfully.
    pub credentials: Option<Credentials>,
    /// Watched communities; the first one is the target.
    pub communities: Vec<String>,
    /// Reactions to apply.
    pub reactions: ReactionPolicy,
    /// Identities that never receive reactions.
    pub protected: Vec<String>,
}

impl Settings {
    /// Runtime configuration derived from these settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_control::Settings;
    ///
    /// let settings = Settings {
    ///     communities: vec!["rust".to_string(), "golang".to_string()],
    ///     protected: vec!["alice".to_string()],
    ///     ..Settings::default()
    /// };
    /// let config = settings.runtime_config();
    /// assert_eq!(config.target_community, "rust");
    /// assert!(config.is_protected("alice"));
    /// ```
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            target_community: self.communities.first().cloned().unwrap_or_default(),
            protected: self.protected.iter().cloned().collect(),
            reactions: self.reactions.clone(),
        }
    }

    /// Target community, if any.
    pub fn target(&self) -> Option<&str> {
        self.communities
            .first()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }
}

/// JSON file holding [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the settings, writing defaults first if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created, or is not
    /// valid settings JSON.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            info!("Created default settings file");
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::io(&self.path, &e))?;
        let settings = serde_json::from_str(&content)?;
        debug!("Settings loaded");
        Ok(settings)
    }

    /// Write the settings as pretty JSON, replacing the file in one rename.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    #[instrument(skip(self, settings), fields(path = %self.path.display()))]
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, &e))?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        let staging = staging_path(&self.path);
        std::fs::write(&staging, json).map_err(|e| SettingsError::io(&staging, &e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| SettingsError::io(&self.path, &e))?;
        debug!("Settings saved");
        Ok(())
    }

    /// Load, apply `f`, and save.
    ///
    /// # Errors
    ///
    /// Returns the first load or save error.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<Settings, SettingsError> {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
