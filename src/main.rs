// src/main.rs
mod clipboard;
mod config;
mod loader;
mod models;
mod render;
mod status;
mod storage;
mod utils;

#[cfg(test)]
mod test_support;

use std::io::Write;
use std::sync::Arc;
use env_logger::Env;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::clipboard::{copy_with_fallback, ClipboardWriter, CommandClipboard, CopiedPulse, ManualClipboard};
use crate::config::Config;
use crate::models::site::SiteConfig;
use crate::status::poller::StatusPoller;
use crate::status::probe::McsrvstatProbe;
use crate::storage::memory::StatusStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();

    // No config means nothing to show; stay up until asked to stop.
    let site = match loader::load(&config.config_source()).await {
        Ok(site) => Arc::new(site),
        Err(e) => {
            warn!("No page config available ({}), rendering nothing", e);
            tokio::signal::ctrl_c().await?;
            return Ok(());
        }
    };

    let probe = McsrvstatProbe::new(&config.status_api_base, config.probe_timeout()).map_err(|e| {
        error!("Failed to build status client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("Failed to build status client: {}", e))
    })?;

    let store = Arc::new(StatusStore::new());
    let mut poller = StatusPoller::new(Arc::new(probe), config.poll_interval());
    {
        let store = store.clone();
        poller.start_polling(&site.server_address, site.server_port, move |status| store.publish(status));
    }

    let primary: Option<Box<dyn ClipboardWriter>> = config
        .clipboard_cmd
        .as_deref()
        .and_then(CommandClipboard::from_command_line)
        .map(|command| Box::new(command) as Box<dyn ClipboardWriter>);
    let pulse = CopiedPulse::default();

    let mut status_rx = store.subscribe();
    let mut copied_rx = pulse.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    info!("Press 'c' + Enter to copy the server address, 'q' + Enter or Ctrl-C to quit");
    redraw(&site, &store, &pulse, &config.page_title);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                redraw(&site, &store, &pulse, &config.page_title);
            }
            changed = copied_rx.changed() => {
                if changed.is_ok() {
                    redraw(&site, &store, &pulse, &config.page_title);
                }
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match line.trim() {
                    "c" => {
                        if let Err(e) = copy_with_fallback(primary.as_deref(), &ManualClipboard, &site.server_address, &pulse).await {
                            error!("Failed to copy server address: {}", e);
                        }
                    }
                    "q" => break,
                    _ => {}
                },
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!("Stopped reading stdin: {}", e);
                    stdin_open = false;
                }
            },
        }
    }

    info!("Shutting down");
    if poller.is_polling() {
        poller.shutdown().await;
    }

    print!("{}", render::terminal_title(&config.page_title));
    std::io::stdout().flush()
}

fn redraw(site: &SiteConfig, store: &StatusStore, pulse: &CopiedPulse, default_title: &str) {
    let status = store.current();
    let page = render::render_page(site, status.as_ref(), pulse.copied());

    print!("{}\x1b[2J\x1b[H{}", render::terminal_title(&store.page_title(default_title)), page);
    if let Err(e) = std::io::stdout().flush() {
        warn!("Failed to flush page: {}", e);
    }
}
