// src/models/site.rs
use serde::{Deserialize, Serialize};

use crate::utils::LoadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    pub name: String,
    pub file: String,
}

/// Static page configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub server_address: String,
    pub server_port: u16,
    #[serde(rename = "github", alias = "socialLink", default)]
    pub social_link: String,
    #[serde(default)]
    pub downloads: Vec<Download>,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.server_address.trim().is_empty() {
            return Err(LoadError::Invalid("serverAddress must not be empty".to_string()));
        }
        // u16 already bounds the top of the range
        if self.server_port == 0 {
            return Err(LoadError::Invalid("serverPort must be between 1 and 65535".to_string()));
        }
        Ok(())
    }
}
