use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides `base_url`
pub const API_URL_ENV: &str = "DATACLEAN_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/data_processing/";
pub const DEFAULT_TOKEN_PATH: &str = "~/.dataclean/storage.json";
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_string()
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    // Remote service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // Durable storage for the session token
    #[serde(default = "default_token_path")]
    pub token_path: String,

    // Rows printed after an upload
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_path: default_token_path(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults.
    /// `DATACLEAN_API_URL` is applied on top either way.
    pub fn load_or_default(path: &str) -> Result<Self> {
        let config = if Path::new(path).exists() {
            Self::load(path)?
        } else {
            info!("No config file at {}, using defaults", path);
            Self::default()
        };

        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            info!("Using API URL from {}: {}", API_URL_ENV, url);
            self.base_url = url;
        }
        self
    }
}
