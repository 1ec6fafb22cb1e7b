// src/storage/memory.rs
use tokio::sync::watch;

use crate::models::server::ServerStatus;

/// Latest known server status. `None` until the first probe completes.
///
/// Written only by the poll callback; any number of readers may subscribe.
/// Also remembers the last name the server was seen online under, which the
/// page keeps as its title until teardown.
#[derive(Debug)]
pub struct StatusStore {
    tx: watch::Sender<Option<ServerStatus>>,
    title: watch::Sender<Option<String>>,
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        let (title, _) = watch::channel(None);
        Self { tx, title }
    }

    /// Swaps in a freshly probed status, replacing the previous one whole.
    pub fn publish(&self, status: ServerStatus) {
        if let Some(name) = online_name(&status) {
            self.title.send_if_modified(|current| {
                if current.as_deref() == Some(name) {
                    false
                } else {
                    *current = Some(name.to_string());
                    true
                }
            });
        }
        self.tx.send_replace(Some(status));
    }

    pub fn current(&self) -> Option<ServerStatus> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ServerStatus>> {
        self.tx.subscribe()
    }

    /// Name from the most recent online status that carried one, or
    /// `default_title` if there has been none yet. Going offline does not
    /// reset it.
    pub fn page_title(&self, default_title: &str) -> String {
        self.title
            .borrow()
            .clone()
            .unwrap_or_else(|| default_title.to_string())
    }
}

fn online_name(status: &ServerStatus) -> Option<&str> {
    match status {
        ServerStatus { online: true, server_name: Some(name), .. } => Some(name.as_str()),
        _ => None,
    }
}
