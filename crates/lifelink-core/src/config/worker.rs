//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background sweep worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron schedule for the unmatched-request sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_schedule() -> String {
    // every 10 minutes
    "0 */10 * * * *".to_string()
}
