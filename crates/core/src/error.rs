use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
