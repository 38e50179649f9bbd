//! Notification template kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which message template a notification was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Donor was matched with a request.
    Matched,
    /// Donor accepted the request.
    Accepted,
    /// Donor declined the request.
    Declined,
    /// Donation completed.
    Completed,
    /// No donors found for a request; sent to the requester.
    NoMatch,
    /// Free-form text supplied by an operator.
    Manual,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Completed => "completed",
            Self::NoMatch => "no_match",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "matched" => Ok(Self::Matched),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "completed" => Ok(Self::Completed),
            "no_match" | "no-match" => Ok(Self::NoMatch),
            "manual" => Ok(Self::Manual),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid notification kind: '{s}'"
            ))),
        }
    }
}
