//! Configuration loading
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 arrive together as [`ConfigOverrides`] (the binary's argument
//! parser reads the environment when an argument is absent).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "BANDCAT_CONFIG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Which persistence backend serves the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process-local list, lost on restart
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

impl FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            other => Err(Error::Config(format!(
                "unknown store '{}' (expected 'memory' or 'sqlite')",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Memory => f.write_str("memory"),
            StoreKind::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub store: Option<StoreKind>,
    pub database_path: Option<PathBuf>,
    pub seed: Option<bool>,
    pub log_level: Option<String>,
}

/// Settings given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub store: Option<StoreKind>,
    pub database_path: Option<PathBuf>,
    pub seed: Option<bool>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub database_path: PathBuf,
    /// Start with the four example bands (SQLite: only when empty)
    pub seed: bool,
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreKind::default(),
            database_path: default_database_path(),
            seed: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Merge overrides over the file config over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            store: overrides.store.or(file.store).unwrap_or(defaults.store),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or(defaults.database_path),
            seed: overrides.seed.or(file.seed).unwrap_or(defaults.seed),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the TOML config file.
///
/// An explicit path (argument, then [`CONFIG_ENV_VAR`]) is returned even if
/// it does not exist; the platform default is returned only when present.
pub fn locate_config_file(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("bandcat").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load the TOML config file.
///
/// A missing file is not fatal: a warning is logged and defaults apply.
/// A file that exists but does not parse is a configuration error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        info!("No config file found, using defaults");
        return Ok(TomlConfig::default());
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(TomlConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// Default SQLite database location for the platform
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bandcat").join("bandcat.db"))
        .unwrap_or_else(|| PathBuf::from("./bandcat_data/bandcat.db"))
}
