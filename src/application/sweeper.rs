//! SessionSweeper - background eviction of abandoned wizard sessions.
//!
//! A user who walks away mid-wizard leaves a session behind. The sweeper
//! wakes up every `interval` and evicts sessions idle for longer than `ttl`.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | How often to sweep |
//! | `ttl` | 1h | Idle time after which a session is evicted |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, warn};

use super::handlers::wizard::WizardController;
use crate::domain::wizard::WizardError;

/// Configuration for the SessionSweeper service.
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    pub interval: Duration,
    pub ttl: Duration,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            ttl: Duration::from_secs(3600),
        }
    }
}

impl SessionSweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Background service that evicts idle sessions.
pub struct SessionSweeper {
    controller: Arc<WizardController>,
    config: SessionSweeperConfig,
}

impl SessionSweeper {
    pub fn new(controller: Arc<WizardController>, config: SessionSweeperConfig) -> Self {
        Self { controller, config }
    }

    /// Runs the sweep loop until the shutdown signal flips to `true`.
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        debug!(
            interval_secs = self.config.interval.as_secs(),
            ttl_secs = self.config.ttl.as_secs(),
            "session sweeper started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("session sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(err) = self.sweep_once().await {
                        warn!(error = %err, "session sweep failed");
                    }
                }
            }
        }
    }

    /// Runs exactly one sweep, returning the number of evicted sessions.
    pub async fn sweep_once(&self) -> Result<usize, WizardError> {
        self.controller.evict_idle(self.config.ttl).await
    }
}
