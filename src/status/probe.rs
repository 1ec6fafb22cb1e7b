// src/status/probe.rs
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};

use crate::models::server::{PlayerCounts, RawStatus, ServerStatus};
use crate::utils::{format_status_target, ProbeError};

pub const DEFAULT_API_BASE: &str = "https://api.mcsrvstat.us/3";

// mcsrvstat.us refuses requests without a descriptive user agent
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One status check against some provider. Implementations never fail: any
/// problem is reported as the offline status.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn probe(&self, address: &str, port: u16) -> ServerStatus;
}

/// Probe backed by the public mcsrvstat.us API.
#[derive(Debug, Clone)]
pub struct McsrvstatProbe {
    client: reqwest::Client,
    api_base: String,
}

impl McsrvstatProbe {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_raw(&self, address: &str, port: u16) -> Result<RawStatus, ProbeError> {
        let url = format!("{}/{}", self.api_base, format_status_target(address, port));
        debug!("Querying server status at {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl StatusProbe for McsrvstatProbe {
    async fn probe(&self, address: &str, port: u16) -> ServerStatus {
        let result = self.fetch_raw(address, port).await;
        if let Err(e) = &result {
            warn!("Status check for {} failed, reporting offline: {}", format_status_target(address, port), e);
        }
        normalize(result)
    }
}

/// Maps a provider result onto the page's status shape. Total: every error
/// becomes [`ServerStatus::offline`].
pub fn normalize(result: Result<RawStatus, ProbeError>) -> ServerStatus {
    match result {
        Ok(raw) => from_raw(raw),
        Err(_) => ServerStatus::offline(),
    }
}

fn from_raw(raw: RawStatus) -> ServerStatus {
    if !raw.online.unwrap_or(false) {
        return ServerStatus::offline();
    }

    let server_name = raw.motd
        .and_then(|motd| motd.clean)
        .and_then(|lines| lines.into_iter().next());

    let (players, roster) = match raw.players {
        Some(p) => (
            Some(PlayerCounts {
                online: p.online.unwrap_or(0),
                max: p.max.unwrap_or(0),
            }),
            p.list.unwrap_or_default(),
        ),
        None => (None, Vec::new()),
    };

    // Roster first, then info lines. Names present in both are kept twice.
    let player_names: Vec<String> = roster
        .into_iter()
        .filter_map(|player| player.name)
        .chain(raw.info.and_then(|info| info.clean).unwrap_or_default())
        .collect();

    ServerStatus {
        online: true,
        server_name,
        version: raw.version,
        players,
        player_names: if player_names.is_empty() { None } else { Some(player_names) },
    }
}
