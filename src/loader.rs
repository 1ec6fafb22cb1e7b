// src/loader.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::convert::Infallible;
use log::{info, error};

use crate::models::site::SiteConfig;
use crate::utils::LoadError;

/// Where the page configuration lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Url(String),
}

impl FromStr for ConfigSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

async fn fetch_config_text(source: &ConfigSource) -> Result<String, LoadError> {
    match source {
        ConfigSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        ConfigSource::Url(url) => {
            let response = reqwest::get(url).await?.error_for_status()?;
            Ok(response.text().await?)
        }
    }
}

/// Reads and validates the page configuration. Called once per process; a
/// failure leaves the page in its "no config" state.
pub async fn load(source: &ConfigSource) -> Result<SiteConfig, LoadError> {
    info!("Loading page config from {}...", source);

    let result = async {
        let text = fetch_config_text(source).await?;
        let config: SiteConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok::<_, LoadError>(config)
    }
    .await;

    match &result {
        Ok(config) => info!(
            "Loaded config for {}:{} with {} downloads",
            config.server_address,
            config.server_port,
            config.downloads.len()
        ),
        Err(e) => error!("Failed to load config from {}: {}", source, e),
    }
    result
}
