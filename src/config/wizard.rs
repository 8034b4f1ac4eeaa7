//! Wizard configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for both timings: one year.
pub const MAX_SESSION_TIMING_SECS: u64 = 365 * 24 * 60 * 60;

/// Wizard session and catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Sessions untouched for longer than this are evicted
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// How often the sweeper looks for idle sessions
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// YAML catalog replacing the built-in criteria
    pub catalog_path: Option<PathBuf>,
}

impl WizardConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate wizard configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let in_range = |secs: u64| (1..=MAX_SESSION_TIMING_SECS).contains(&secs);
        if !in_range(self.session_ttl_secs) || !in_range(self.sweep_interval_secs) {
            return Err(ValidationError::InvalidSessionTiming);
        }
        Ok(())
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            catalog_path: None,
        }
    }
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_sweep_interval() -> u64 {
    60
}
