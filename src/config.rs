use std::env;
use std::time::Duration;

use crate::loader::ConfigSource;
use crate::status::poller::DEFAULT_POLL_INTERVAL;
use crate::status::probe::DEFAULT_API_BASE;

#[derive(Debug, Clone)]
pub struct Config {
    // Where the page config lives (file path or http(s) URL)
    pub config_source: String,

    // Status API
    pub status_api_base: String,
    pub poll_interval_ms: u64,
    pub probe_timeout_secs: u64,

    // Presentation
    pub clipboard_cmd: Option<String>,
    pub page_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_source: "public/config.json".to_string(),
            status_api_base: DEFAULT_API_BASE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            probe_timeout_secs: 10,
            clipboard_cmd: None,
            page_title: "Server Status".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            config_source: lookup("CONFIG_SOURCE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.config_source),

            status_api_base: lookup("STATUS_API_BASE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.status_api_base),

            poll_interval_ms: lookup("POLL_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .filter(|&ms: &u64| ms > 0)
                .unwrap_or(defaults.poll_interval_ms),

            probe_timeout_secs: lookup("PROBE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(defaults.probe_timeout_secs),

            clipboard_cmd: lookup("CLIPBOARD_CMD").filter(|v| !v.trim().is_empty()),

            page_title: lookup("PAGE_TITLE").unwrap_or(defaults.page_title),
        }
    }

    pub fn config_source(&self) -> ConfigSource {
        match self.config_source.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
