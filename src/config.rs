use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::score::ScoringConfig;

/// Environment variable naming an alternate config path.
pub const CONFIG_PATH_ENV: &str = "RIFT_SCOUT_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing client credentials: set lcu.port and lcu.token, or LCU_PORT and LCU_TOKEN")]
    MissingCredentials,
}

/// Service configuration, loaded once at startup.
///
/// The scoring table is all-or-nothing: if the document carries a
/// `scoring` section, every weight must be present (only `enabled` has a
/// default) and a missing field fails startup. Without the section the
/// built-in table applies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default)]
    pub lcu: LcuConfig,
    #[serde(default)]
    pub auto_accept: bool,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Connection credentials for the local client. Discovering these is not
/// this service's job; they come from the document or the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LcuConfig {
    pub port: Option<u16>,
    pub token: Option<String>,
}

impl AppConfig {
    /// Loads configuration from `path`, the `RIFT_SCOUT_CONFIG` path, or
    /// `config.json`. A missing default file just means defaults; an
    /// unreadable or malformed explicit file is fatal.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some() || std::env::var(CONFIG_PATH_ENV).is_ok();
        let path = path.map(Path::to_path_buf).unwrap_or_else(|| {
            std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
        });
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolved client credentials, config first, environment second.
    pub fn credentials(&self) -> Result<(u16, String), ConfigError> {
        let port = self.lcu.port.or_else(|| {
            std::env::var("LCU_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
        });
        let token = self
            .lcu
            .token
            .clone()
            .or_else(|| std::env::var("LCU_TOKEN").ok());
        match (port, token) {
            (Some(port), Some(token)) => Ok((port, token)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}
