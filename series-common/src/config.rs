//! Service configuration
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_AB_ID: &str = "1";

pub const ENV_HOST: &str = "SERIES_HOST";
pub const ENV_PORT: &str = "SERIES_PORT";
pub const ENV_DATA_DIR: &str = "SERIES_DATA_DIR";
pub const ENV_ENRICHMENT_URL: &str = "SERIES_ENRICHMENT_URL";

const CONFIG_DIR_NAME: &str = "series-service";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub enrichment_url: Option<String>,
    pub ab_id: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub enrichment_url: Option<String>,
    pub ab_id: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Directory of JSON data files; `None` starts with an empty catalog
    pub data_dir: Option<PathBuf>,
    /// Enrichment gateway URL; `None` disables enrichment
    pub enrichment_url: Option<String>,
    pub ab_id: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: None,
            enrichment_url: None,
            ab_id: DEFAULT_AB_ID.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the configuration from CLI values, environment and TOML file
    pub fn resolve(cli: CliOverrides, file: Option<TomlConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = ServiceConfig::default();

        let port = match cli.port {
            Some(port) => port,
            None => match env_var(ENV_PORT) {
                Some(raw) => raw.parse().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw))
                })?,
                None => file.port.unwrap_or(defaults.port),
            },
        };

        Ok(Self {
            host: cli
                .host
                .or_else(|| env_var(ENV_HOST))
                .or(file.host)
                .unwrap_or(defaults.host),
            port,
            data_dir: cli
                .data_dir
                .or_else(|| env_var(ENV_DATA_DIR).map(PathBuf::from))
                .or(file.data_dir),
            enrichment_url: cli
                .enrichment_url
                .or_else(|| env_var(ENV_ENRICHMENT_URL))
                .or(file.enrichment_url),
            ab_id: cli.ab_id.or(file.ab_id).unwrap_or(defaults.ab_id),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Non-empty environment variable value
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Default config file location for the platform
///
/// e.g. `~/.config/series-service/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the TOML config file
///
/// Uses `explicit` when given, otherwise the platform default. A missing
/// file is not an error (returns `None`); an unreadable or malformed one is.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    if !path.exists() {
        if explicit.is_some() {
            warn!("Config file not found: {} (using defaults)", path.display());
        } else {
            debug!("No config file at {}", path.display());
        }
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;
    Ok(Some(config))
}
