//! Application configuration.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use warden_core::Credentials;
use warden_error::{ConfigError, WardenResult};
use warden_runtime::{Journal, LoopPolicy};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../warden.toml");

/// Journal retention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Entries kept in memory per runtime.
    pub capacity: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            capacity: Journal::DEFAULT_CAPACITY,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
    /// Append a plain-text copy of every log line to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

/// Top-level configuration for the `warden` binary.
///
/// Sources, later ones winning:
/// 1. Bundled defaults (`warden.toml` shipped with the crate)
/// 2. `~/.config/warden/warden.toml` (optional)
/// 3. `./warden.toml` (optional), or the explicit file passed to [`WardenConfig::load`]
/// 4. `WARDEN_*` environment variables, `__` separating sections
///    (`WARDEN_LOOP__BATCH_SIZE=10`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// Poll loop timing.
    #[serde(rename = "loop")]
    pub loop_policy: LoopPolicy,
    /// Journal retention.
    pub journal: JournalConfig,
    /// Where operator settings are stored.
    pub settings_path: PathBuf,
    /// Log output.
    pub log: LogConfig,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            loop_policy: LoopPolicy::default(),
            journal: JournalConfig::default(),
            settings_path: PathBuf::from("config/settings.json"),
            log: LogConfig::default(),
        }
    }
}

impl WardenConfig {
    /// Load configuration from all sources.
    ///
    /// An explicit `path` must exist; the implicit user files are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or the result
    /// fails validation.
    #[instrument]
    pub fn load(path: Option<&Path>) -> WardenResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration from a single file, without user files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> WardenResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`WardenConfig::load`], reading environment overrides from `env`
    /// instead of the process environment when given.
    ///
    /// # Errors
    ///
    /// Same as [`WardenConfig::load`].
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> WardenResult<Self> {
        debug!("Loading configuration: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/warden/warden.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("warden").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("WARDEN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the loop depends on.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid loop policy or a zero journal capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.loop_policy.validate()?;
        if self.journal.capacity == 0 {
            return Err(ConfigError::new("journal capacity must be at least 1"));
        }
        Ok(())
    }
}

/// Environment variables holding credentials.
pub const CREDENTIAL_VARS: [&str; 5] = [
    "WARDEN_IDENTITY",
    "WARDEN_SECRET",
    "WARDEN_APP_KEY",
    "WARDEN_APP_SECRET",
    "WARDEN_CLIENT_SIGNATURE",
];

/// Credentials from the process environment (after `.env` is loaded).
///
/// Returns `None` when none of [`CREDENTIAL_VARS`] is set.
pub fn env_credentials() -> Option<Credentials> {
    credentials_from(|name| std::env::var(name).ok())
}

/// Credentials assembled from `lookup`; the client signature defaults to
/// `warden/<version>`.
///
/// # Examples
///
/// ```
/// use warden::credentials_from;
///
/// let creds = credentials_from(|name| match name {
///     "WARDEN_IDENTITY" => Some("bot".to_string()),
///     "WARDEN_SECRET" => Some("pw".to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(creds.identity(), "bot");
/// assert!(creds.client_signature().starts_with("warden/"));
/// assert_eq!(creds.missing_fields(), vec!["application_key", "application_secret"]);
///
/// assert!(credentials_from(|_| None).is_none());
/// ```
pub fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
    let [identity, secret, key, app_secret, signature] = CREDENTIAL_VARS.map(&lookup);
    if [&identity, &secret, &key, &app_secret, &signature]
        .iter()
        .all(|v| v.is_none())
    {
        return None;
    }

    Some(Credentials::new(
        identity.unwrap_or_default(),
        secret.unwrap_or_default(),
        key.unwrap_or_default(),
        app_secret.unwrap_or_default(),
        signature.unwrap_or_else(|| concat!("warden/", env!("CARGO_PKG_VERSION")).to_string()),
    ))
}
