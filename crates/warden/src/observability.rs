//! Tracing subscriber setup.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name recorded at startup
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "debug") used when `RUST_LOG` is unset
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
    /// Append-only activity log written alongside the console output
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            log_file: None,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Also append log lines to `path`, creating it and its directory if needed.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Plain-text layer writing to the configured log file, if any.
    fn file_layer<S>(&self) -> std::io::Result<Option<Box<dyn Layer<S> + Send + Sync>>>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let Some(path) = &self.log_file else {
            return Ok(None);
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_writer(Mutex::new(file))
                .boxed(),
        ))
    }

    /// Filter from `RUST_LOG`, falling back to the configured level.
    fn filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
            _ => EnvFilter::try_new(&self.log_level),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the level directive is invalid or a subscriber is
/// already installed.
pub fn init_observability(config: &ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = config.filter()?;
    let file_layer = config.file_layer()?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        json = config.json_logs,
        file = ?config.log_file,
        "Observability initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected() {
        let config = ObservabilityConfig::default().with_log_level("info,[=");
        if env::var(EnvFilter::DEFAULT_ENV).is_err() {
            assert!(config.filter().is_err());
        }
    }

    #[test]
    fn log_lines_reach_the_activity_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("activity.log");
        let config = ObservabilityConfig::default().with_log_file(&path);

        let layer = config.file_layer().unwrap().unwrap();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(identity = "bob", "Bot started");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Bot started"));
        assert!(contents.contains("identity=\"bob\""));
        assert!(!contents.contains('\u{1b}'));
    }

    #[test]
    fn no_file_layer_without_path() {
        let config = ObservabilityConfig::default();
        assert!(config.file_layer::<tracing_subscriber::Registry>().unwrap().is_none());
    }

    #[test]
    fn module_directives_are_accepted() {
        let config = ObservabilityConfig::default().with_log_level("warn,warden_runtime=debug");
        if env::var(EnvFilter::DEFAULT_ENV).is_err() {
            assert!(config.filter().is_ok());
        }
    }
}
