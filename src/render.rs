// src/render.rs
use std::fmt::Write;

use crate::clipboard::CopyMethod;
use crate::models::server::ServerStatus;
use crate::models::site::SiteConfig;

/// Renders the status page as plain text.
pub fn render_page(config: &SiteConfig, status: Option<&ServerStatus>, copied: Option<CopyMethod>) -> String {
    let mut out = String::new();

    let heading = match status {
        None => "...",
        Some(s) if s.online => s.server_name.as_deref().unwrap_or_default(),
        Some(_) => "Server offline",
    };
    let _ = writeln!(out, "{}", heading);

    if let Some(ServerStatus { online: true, version: Some(version), .. }) = status {
        let _ = writeln!(out, "Minecraft {}", version);
    }

    match status {
        None => {
            let _ = writeln!(out, "Checking...");
        }
        Some(s) if s.online => {
            let (online, max) = s.players.map(|p| (p.online, p.max)).unwrap_or((0, 0));
            let _ = writeln!(out, "Online {}/{}", online, max);
        }
        Some(_) => {
            let _ = writeln!(out, "Offline");
        }
    }

    if let Some(ServerStatus { online: true, player_names: Some(names), .. }) = status {
        let _ = writeln!(out, "Players: {}", names.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Address: {}", config.server_address);
    match copied {
        Some(CopyMethod::Clipboard) => {
            let _ = writeln!(out, "Copied to clipboard!");
        }
        Some(CopyMethod::Manual) => {
            let _ = writeln!(out, "Clipboard unavailable, copy this address: {}", config.server_address);
        }
        None => {}
    }

    if !config.downloads.is_empty() {
        let _ = writeln!(out, "Downloads:");
        for download in &config.downloads {
            let _ = writeln!(out, "  {} - {}", download.name, download.file);
        }
    }

    if !config.social_link.is_empty() {
        let _ = writeln!(out, "{}", config.social_link);
    }

    out
}

/// OSC 0 sequence that sets the terminal window title.
pub fn terminal_title(title: &str) -> String {
    let clean: String = title.chars().filter(|c| !c.is_control()).collect();
    format!("\x1b]0;{}\x07", clean)
}
