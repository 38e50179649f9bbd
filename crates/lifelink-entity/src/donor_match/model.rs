//! Donor match entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MatchStatus;

/// A proposed pairing between one blood request and one donor.
///
/// At most one match may exist per `(request_id, donor_id)` pair; the
/// storage layer enforces this with a composite uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DonorMatch {
    /// Unique match identifier.
    pub id: Uuid,
    /// The blood request this match belongs to.
    pub request_id: Uuid,
    /// The matched donor.
    pub donor_id: Uuid,
    /// Delivery/response lifecycle status.
    pub status: MatchStatus,
    /// Stamped at creation and re-stamped on successful notification.
    pub notified_at: DateTime<Utc>,
    /// When the match was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    /// The blood request to pair.
    pub request_id: Uuid,
    /// The donor to pair.
    pub donor_id: Uuid,
    /// Creation timestamp supplied by the caller for determinism.
    pub notified_at: DateTime<Utc>,
}
