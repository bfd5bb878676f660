//! Configuration loading and typed config structures for the Tidepool
//! simulation.
//!
//! The canonical configuration lives in `tidepool-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads and validates the file. Every
//! field has a default, so an absent or empty file yields a playable tank.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tidepool_creatures::TankRules;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `tidepool-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Tank identity and randomness.
    #[serde(default)]
    pub tank: TankConfig,

    /// Tick and economy tunables.
    #[serde(default)]
    pub rules: TankRules,

    /// Random event behavior.
    #[serde(default)]
    pub events: EventsConfig,

    /// Save slot backend.
    #[serde(default)]
    pub store: StoreConfig,

    /// Command API server.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scheduler timing and boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `DRAGONFLY_URL` overrides `store.dragonfly_url`
    /// - `TIDEPOOL_SAVE_DIR` overrides `store.save_dir`
    /// - `TIDEPOOL_API_PORT` overrides `api.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    /// (with env overrides applied).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override settings with environment variables when set.
    ///
    /// This allows container deployments to point at a store or move the
    /// API port without modifying the YAML config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DRAGONFLY_URL") {
            self.store.dragonfly_url = val;
        }
        if let Ok(val) = std::env::var("TIDEPOOL_SAVE_DIR") {
            self.store.save_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("TIDEPOOL_API_PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.api.port = port,
                Err(_) => tracing::warn!(value = %val, "Ignoring invalid TIDEPOOL_API_PORT"),
            }
        }
    }
}

/// Tank identity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TankConfig {
    /// Human-readable tank name.
    #[serde(default = "default_tank_name")]
    pub name: String,

    /// Random seed for reproducibility. When absent the generator is seeded
    /// from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            name: default_tank_name(),
            seed: None,
        }
    }
}

/// How the event generator picks a definition from its pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSelection {
    /// Always the first definition in the pool.
    #[default]
    First,
    /// A uniformly random definition.
    Uniform,
}

/// Random event configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventsConfig {
    /// Selection policy over the event pool.
    #[serde(default)]
    pub selection: EventSelection,

    /// Advisory lifetime of a triggered event in milliseconds.
    #[serde(default = "default_event_lifetime_ms")]
    pub lifetime_ms: u64,

    /// Whether the scheduler discards events past their expiry. Off by
    /// default: an event stays active until the player resolves it.
    #[serde(default)]
    pub expire_on_tick: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            selection: EventSelection::default(),
            lifetime_ms: default_event_lifetime_ms(),
            expire_on_tick: false,
        }
    }
}

/// Which save slot backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process memory only; nothing survives a restart.
    Memory,
    /// One file per key under `save_dir`.
    #[default]
    File,
    /// Dragonfly (or any Redis-compatible server).
    Dragonfly,
}

/// Save slot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Key of the save slot.
    #[serde(default = "default_save_key")]
    pub save_key: String,

    /// Directory for the file backend.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,

    /// Dragonfly (Redis-compatible) URL.
    #[serde(default = "default_dragonfly_url")]
    pub dragonfly_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            save_key: default_save_key(),
            save_dir: default_save_dir(),
            dragonfly_url: default_dragonfly_url(),
        }
    }
}

/// Command API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Whether the HTTP server is started.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Port to bind.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_api_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Scheduler configuration.
///
/// A value of 0 for `max_ticks` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum number of ticks before the scheduler stops (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_tank_name() -> String {
    "Tidepool".to_owned()
}

const fn default_event_lifetime_ms() -> u64 {
    5000
}

fn default_save_key() -> String {
    "TIDEPOOL_TANK_SAVE_V1".to_owned()
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_dragonfly_url() -> String {
    "redis://localhost:6379".to_owned()
}

const fn default_api_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_true() -> bool {
    true
}
