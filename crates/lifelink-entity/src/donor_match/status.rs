//! Match lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery/response lifecycle of a donor match.
///
/// State only ever moves forward:
/// `Pending → Notified → {Accepted, Declined}`, `Accepted → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Created, not yet notified.
    Pending,
    /// Notification delivered to the donor.
    Notified,
    /// Donor agreed to donate.
    Accepted,
    /// Donor declined.
    Declined,
    /// Donation completed.
    Completed,
}

impl MatchStatus {
    /// Check if the match is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Completed)
    }

    /// Check whether moving to `next` is a legal forward transition.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Notified)
                | (Self::Notified, Self::Accepted)
                | (Self::Notified, Self::Declined)
                | (Self::Accepted, Self::Completed)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Notified => "notified",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "notified" => Ok(Self::Notified),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "completed" => Ok(Self::Completed),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid match status: '{s}'. Expected one of: pending, notified, accepted, declined, completed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(MatchStatus::Pending.can_transition_to(MatchStatus::Notified));
        assert!(MatchStatus::Notified.can_transition_to(MatchStatus::Accepted));
        assert!(MatchStatus::Notified.can_transition_to(MatchStatus::Declined));
        assert!(MatchStatus::Accepted.can_transition_to(MatchStatus::Completed));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!MatchStatus::Notified.can_transition_to(MatchStatus::Pending));
        assert!(!MatchStatus::Accepted.can_transition_to(MatchStatus::Notified));
        assert!(!MatchStatus::Completed.can_transition_to(MatchStatus::Accepted));
    }

    #[test]
    fn test_self_transition_rejected() {
        for status in [
            MatchStatus::Pending,
            MatchStatus::Notified,
            MatchStatus::Accepted,
            MatchStatus::Declined,
            MatchStatus::Completed,
        ] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(MatchStatus::Declined.is_terminal());
        assert!(MatchStatus::Completed.is_terminal());
        assert!(!MatchStatus::Notified.is_terminal());
    }
}
