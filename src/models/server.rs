// src/models/server.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounts {
    pub online: u32,
    pub max: u32,
}

/// Normalized status of the game server as shown on the page.
///
/// An offline value never carries detail: every optional field is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<PlayerCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_names: Option<Vec<String>>,
}

impl ServerStatus {
    pub const fn offline() -> Self {
        Self {
            online: false,
            server_name: None,
            version: None,
            players: None,
            player_names: None,
        }
    }
}

// Shape of the mcsrvstat.us v3 response, restricted to the fields we read.
// Everything is optional; unknown fields are ignored by serde.

#[derive(Debug, Default, Deserialize)]
pub struct RawStatus {
    pub online: Option<bool>,
    pub motd: Option<RawLines>,
    pub version: Option<String>,
    pub players: Option<RawPlayers>,
    pub info: Option<RawLines>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLines {
    // `null` and a missing key both mean "no lines"
    pub clean: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPlayers {
    pub online: Option<u32>,
    pub max: Option<u32>,
    pub list: Option<Vec<RawPlayer>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPlayer {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_serializes_to_bare_flag() {
        let json = serde_json::to_string(&ServerStatus::offline()).unwrap();
        assert_eq!(json, r#"{"online":false}"#);
    }

    #[test]
    fn online_serializes_camel_case() {
        let status = ServerStatus {
            online: true,
            server_name: Some("Hub".to_string()),
            version: None,
            players: Some(PlayerCounts { online: 1, max: 10 }),
            player_names: Some(vec!["Alice".to_string()]),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "online": true,
                "serverName": "Hub",
                "players": { "online": 1, "max": 10 },
                "playerNames": ["Alice"],
            })
        );
    }

    #[test]
    fn raw_status_ignores_unknown_fields() {
        let raw: RawStatus = serde_json::from_str(
            r#"{"online":true,"ip":"1.2.3.4","port":25565,"players":{"online":2,"max":8,"list":[{"name":"Steve","uuid":"abc"}]}}"#,
        )
        .unwrap();
        assert_eq!(raw.online, Some(true));
        let players = raw.players.unwrap();
        assert_eq!(players.online, Some(2));
        assert_eq!(players.list.unwrap()[0].name.as_deref(), Some("Steve"));
        assert!(raw.motd.is_none());
    }
}
