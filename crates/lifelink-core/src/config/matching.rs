//! Matching engine configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for donor matching and dispatch fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum number of days between donations before a donor is
    /// eligible again.
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: i64,
    /// Radius in kilometres within which a donor is considered "nearby"
    /// and ranked by distance.
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,
    /// Maximum number of concurrent outbound sends during batch dispatch.
    #[serde(default = "default_dispatch_concurrency")]
    pub dispatch_concurrency: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cooldown_days: default_cooldown_days(),
            nearby_radius_km: default_nearby_radius(),
            dispatch_concurrency: default_dispatch_concurrency(),
        }
    }
}

fn default_cooldown_days() -> i64 {
    90
}

fn default_nearby_radius() -> f64 {
    50.0
}

fn default_dispatch_concurrency() -> usize {
    4
}
