// src/utils.rs
use std::fmt;
use std::net::IpAddr;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Http(reqwest::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read config: {}", e),
            Self::Http(e) => write!(f, "Failed to fetch config: {}", e),
            Self::Parse(e) => write!(f, "Malformed config: {}", e),
            Self::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Why a probe failed. Never leaves the status module: every variant is
/// normalized to the offline status.
#[derive(Debug)]
pub enum ProbeError {
    Request(reqwest::Error),
    Status(u16),
    Body(serde_json::Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) if e.is_timeout() => write!(f, "Status request timed out: {}", e),
            Self::Request(e) => write!(f, "Status request failed: {}", e),
            Self::Status(code) => write!(f, "Status API answered with HTTP {}", code),
            Self::Body(e) => write!(f, "Malformed status response: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(code) => Self::Status(code.as_u16()),
            None => Self::Request(e),
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Body(e)
    }
}

/// Formats the `address:port` key the status API expects, bracketing IPv6
/// literals.
pub fn format_status_target(address: &str, port: u16) -> String {
    let address = address.trim();
    match address.parse::<IpAddr>() {
        Ok(IpAddr::V6(_)) => format!("[{}]:{}", address, port),
        _ => format!("{}:{}", address, port),
    }
}
