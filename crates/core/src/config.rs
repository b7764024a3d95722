use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{error::ConfigError, state::Tab};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the analysis service
    pub base_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub timeout_secs: Option<u64>,
    /// Fallback tracing filter when RUST_LOG is not set
    pub log_filter: String,
    pub default_tab: Tab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            log_filter: "warn".to_string(),
            default_tab: Tab::default(),
        }
    }
}

/// `<config dir>/clipgrade/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipgrade").join("config.toml"))
}

impl Config {
    /// Load from an explicit path, or from the default location when it exists.
    /// Without either, returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Self::default().validated(),
            },
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&raw, &path)
    }

    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validated()
    }

    /// Apply command line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self.validated()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url,
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        Ok(self)
    }
}
