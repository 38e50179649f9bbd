//! Urgency level enumeration for blood requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency level attached to a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "urgency_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// Routine stock replenishment.
    Low,
    /// Scheduled procedure.
    Medium,
    /// Urgent need.
    High,
    /// Life-threatening emergency.
    Critical,
}

impl UrgencyLevel {
    /// Return the numeric priority (higher = more urgent).
    pub fn numeric_priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Return the urgency as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid urgency level: '{s}'. Expected one of: low, medium, high, critical"
            ))),
        }
    }
}
