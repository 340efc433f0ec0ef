//! Periodic artifact reclamation
//!
//! A recurring sweep over the incoming and derived directories, deleting
//! anything older than the retention window. The task is owned by the process
//! lifecycle: started once at startup, handle aborted on shutdown.

use std::sync::Arc;
use std::time::Duration;

use avifpress_storage::{ArtifactStore, SweepStats};
use tokio::time::interval;

pub struct Reaper {
    store: Arc<ArtifactStore>,
    retention: Duration,
    period: Duration,
}

impl Reaper {
    pub fn new(store: Arc<ArtifactStore>, retention: Duration, period: Duration) -> Self {
        Reaper {
            store,
            retention,
            period,
        }
    }

    /// Start the background sweep. The first tick fires immediately, then on
    /// the configured period. Returns a JoinHandle for shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(self.period);

            loop {
                sweep_interval.tick().await;

                let stats = self.sweep_once().await;
                tracing::info!(
                    examined = stats.examined,
                    removed = stats.removed,
                    failed = stats.failed,
                    retention_secs = self.retention.as_secs(),
                    "Sweep completed"
                );
            }
        })
    }

    /// One sweep pass. Never raises; per-file failures are logged and counted
    /// inside the store.
    pub async fn sweep_once(&self) -> SweepStats {
        self.store.sweep_older_than(self.retention).await
    }
}
