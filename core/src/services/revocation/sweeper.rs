//! Periodic purge of stale revocation entries
//!
//! Stale entries are already ignored by lookups; the sweep only bounds the
//! memory held by tokens nobody presents again.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use fc_shared::config::RevocationConfig;

use super::registry::{RevocationRegistry, SweepReport};

/// Background task that sweeps a revocation registry on a fixed interval
pub struct RevocationSweeper {
    registry: Arc<RevocationRegistry>,
    config: RevocationConfig,
}

impl RevocationSweeper {
    /// Create a new sweeper
    pub fn new(registry: Arc<RevocationRegistry>, config: RevocationConfig) -> Self {
        Self { registry, config }
    }

    /// Run a single sweep now
    pub fn run_once(&self) -> SweepReport {
        let report = self.registry.sweep();
        if report.removed > 0 {
            info!(
                "Revocation sweep removed {} stale entries, {} remaining",
                report.removed, report.remaining
            );
        }
        report
    }

    /// Start sweeping as a background task
    ///
    /// The first sweep runs one full interval after start. Returns `None`
    /// when sweeping is disabled in configuration. Must be called from
    /// within a tokio runtime.
    pub fn start(self: Arc<Self>) -> Option<SweeperHandle> {
        if !self.config.sweep_enabled {
            warn!("Revocation sweep is disabled");
            return None;
        }

        let period = Duration::from_secs(self.config.sweep_interval_seconds.max(1));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            info!(
                "Revocation sweeper started - will run every {} seconds",
                period.as_secs()
            );

            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        self.run_once();
                    }
                    // Fires on an explicit shutdown or when the handle is dropped
                    _ = &mut shutdown_rx => {
                        info!("Revocation sweeper stopped");
                        break;
                    }
                }
            }
        });

        Some(SweeperHandle {
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a running sweeper
pub struct SweeperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for its task to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.task.await {
            error!("Revocation sweeper task failed: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
