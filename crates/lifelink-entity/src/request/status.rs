//! Blood request lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a blood request.
///
/// Transitions are forward-only: `Pending → Matched → Fulfilled`, with
/// `Cancelled` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a match.
    Pending,
    /// At least one donor has accepted.
    Matched,
    /// The donation took place.
    Fulfilled,
    /// Withdrawn by the requester.
    Cancelled,
}

impl RequestStatus {
    /// Check if the request is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Cancelled)
    }

    /// Check whether moving to `next` is a legal forward transition.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Matched)
                | (Self::Pending, Self::Cancelled)
                | (Self::Matched, Self::Fulfilled)
                | (Self::Matched, Self::Cancelled)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Matched => "matched",
            Self::Fulfilled => "fulfilled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "matched" => Ok(Self::Matched),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid request status: '{s}'. Expected one of: pending, matched, fulfilled, cancelled"
            ))),
        }
    }
}
