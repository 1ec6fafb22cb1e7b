// src/status/poller.rs
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::models::server::ServerStatus;
use crate::status::probe::StatusProbe;
use crate::utils::format_status_target;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(60_000);

/// Cancellation handle for a running poll schedule.
///
/// Cancelling stops future ticks. A probe already in flight runs to
/// completion but its result is dropped.
#[must_use = "dropping the handle leaves the schedule running; call cancel() on teardown"]
#[derive(Debug)]
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels and waits for the poll task to wind down.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

/// Starts probing `address:port` now and then every `every`, handing each
/// result to `on_update`.
pub fn start_polling<P, F>(
    probe: Arc<P>,
    address: String,
    port: u16,
    every: Duration,
    on_update: F,
) -> PollHandle
where
    P: StatusProbe + ?Sized + 'static,
    F: Fn(ServerStatus) + Send + Sync + 'static,
{
    let token = CancellationToken::new();
    let cancelled = token.clone();
    // interval() panics on a zero period
    let every = every.max(Duration::from_millis(1));

    info!("Polling {} every {:?}", format_status_target(&address, port), every);

    let task = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let status = probe.probe(&address, port).await;
            if cancelled.is_cancelled() {
                debug!("Dropping status for {}:{} after cancellation", address, port);
                break;
            }
            debug!("Status for {}:{}: online={}", address, port, status.online);
            on_update(status);
        }

        debug!("Poll schedule for {}:{} stopped", address, port);
    });

    PollHandle { token, task }
}

/// Owns at most one active poll schedule.
pub struct StatusPoller {
    probe: Arc<dyn StatusProbe>,
    every: Duration,
    active: Option<PollHandle>,
}

impl StatusPoller {
    pub fn new(probe: Arc<dyn StatusProbe>, every: Duration) -> Self {
        Self {
            probe,
            every,
            active: None,
        }
    }

    /// Replaces any running schedule with one for `address:port`.
    pub fn start_polling<F>(&mut self, address: &str, port: u16, on_update: F)
    where
        F: Fn(ServerStatus) + Send + Sync + 'static,
    {
        self.stop();
        self.active = Some(start_polling(
            self.probe.clone(),
            address.to_string(),
            port,
            self.every,
            on_update,
        ));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.active.as_ref().map(|h| !h.is_cancelled()).unwrap_or(false)
    }

    /// Cancels the active schedule and waits for its task to finish.
    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.shutdown().await;
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
