/**
 * Periodic resource synchronization.
 *
 * One `ResourceMonitor` per polled resource kind. Starting it spawns a poll
 * loop that fetches immediately and then once per configured interval,
 * publishing every outcome on the monitor's update or failure stream.
 * Fetches are fired and forgotten: a fetch that outlives the interval may
 * overlap the next one, and a fetch in flight when the loop stops still
 * completes and publishes.
 */
use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::config::{SHUTDOWN_CHANNEL_CAPACITY, SyncConfig};
use super::snapshot::{FetchFailure, ResourceKind, ResourceSnapshot};
use super::subscription::EventChannel;
use crate::docker::invoker::RemoteInvoker;

/// The two streams a monitor publishes on.
#[derive(Debug, Default)]
pub struct MonitorEvents {
    pub updates: EventChannel<ResourceSnapshot>,
    pub failures: EventChannel<FetchFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Running,
}

pub struct ResourceMonitor {
    kind: ResourceKind,
    invoker: Arc<dyn RemoteInvoker>,
    events: Arc<MonitorEvents>,
    config: SyncConfig,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl ResourceMonitor {
    #[must_use]
    pub fn new(kind: ResourceKind, invoker: Arc<dyn RemoteInvoker>) -> Self {
        Self::with_config(kind, invoker, SyncConfig::default())
    }

    #[must_use]
    pub fn with_config(
        kind: ResourceKind,
        invoker: Arc<dyn RemoteInvoker>,
        config: SyncConfig,
    ) -> Self {
        Self {
            kind,
            invoker,
            events: Arc::new(MonitorEvents::default()),
            config,
            shutdown_tx: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn state(&self) -> SyncState {
        if self.shutdown_tx.is_some() {
            SyncState::Running
        } else {
            SyncState::Idle
        }
    }

    #[must_use]
    pub fn events(&self) -> Arc<MonitorEvents> {
        self.events.clone()
    }

    pub async fn subscribe_updates(&self) -> (String, mpsc::Receiver<ResourceSnapshot>) {
        self.events.updates.subscribe().await
    }

    pub async fn subscribe_failures(&self) -> (String, mpsc::Receiver<FetchFailure>) {
        self.events.failures.subscribe().await
    }

    /// Begin polling: one immediate fetch, then one per interval. Calling
    /// this while already running is a no-op; a monitor never holds more
    /// than one live poll loop.
    pub fn start(&mut self) {
        if self.shutdown_tx.is_some() {
            debug!("poll loop for {} already running, ignoring start", self.kind);
            return;
        }

        let (shutdown_tx, shutdown_rx) = mpsc::channel(SHUTDOWN_CHANNEL_CAPACITY);
        self.shutdown_tx = Some(shutdown_tx);

        let invoker = self.invoker.clone();
        let events = self.events.clone();
        let kind = self.kind;
        let interval = self.config.interval;

        tokio::spawn(async move {
            Self::run_poll_loop(invoker, kind, events, interval, shutdown_rx).await;
        });
    }

    /// Cancel the scheduled polling. Safe to call when idle. A fetch
    /// already dispatched may still publish after this returns.
    pub fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.try_send(());
            info!("🛑 poll loop stop requested for {}", self.kind);
        }
    }

    /// One manual refresh, off-cadence. Outcomes go to the same streams as
    /// scheduled ticks; nothing is ever raised to the caller.
    pub async fn fetch_once(&self) {
        Self::run_fetch(self.invoker.clone(), self.kind, self.events.clone()).await;
    }

    async fn run_poll_loop(
        invoker: Arc<dyn RemoteInvoker>,
        kind: ResourceKind,
        events: Arc<MonitorEvents>,
        interval: std::time::Duration,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        info!("🔄 poll loop started for {kind} every {}ms", interval.as_millis());

        loop {
            tokio::spawn(Self::run_fetch(invoker.clone(), kind, events.clone()));

            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("🛑 poll loop stopped for {kind}");
                    break;
                }
                () = sleep(interval) => {}
            }
        }
    }

    async fn run_fetch(
        invoker: Arc<dyn RemoteInvoker>,
        kind: ResourceKind,
        events: Arc<MonitorEvents>,
    ) {
        match invoker.invoke(kind.list_command(), json!({})).await {
            Ok(payload) => {
                debug!("✅ fetch succeeded for {kind}");
                events
                    .updates
                    .publish(ResourceSnapshot { kind, payload })
                    .await;
            }
            Err(err) => {
                warn!("❌ fetch failed for {kind}: {err}");
                events
                    .failures
                    .publish(FetchFailure::from_invoke(&err))
                    .await;
            }
        }
    }
}

impl Drop for ResourceMonitor {
    // Tearing down the owning view must also tear down the timer
    fn drop(&mut self) {
        self.stop();
    }
}
