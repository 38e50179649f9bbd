//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lifelink_entity::donor::BloodType;
use lifelink_entity::donor_match::MatchStatus;
use lifelink_entity::request::BloodRequest;
use lifelink_service::matching::MatchCandidate;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// One match with its donor context and ranking distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidateResponse {
    /// Match id.
    pub match_id: Uuid,
    /// Request id.
    pub request_id: Uuid,
    /// Donor id.
    pub donor_id: Uuid,
    /// Match status.
    pub status: MatchStatus,
    /// Notification timestamp.
    pub notified_at: DateTime<Utc>,
    /// Donor name.
    pub donor_name: String,
    /// Donor blood type.
    pub donor_blood_type: BloodType,
    /// Donor phone number.
    pub donor_phone: String,
    /// Donor location string, if any.
    pub donor_location: Option<String>,
    /// Donor availability flag.
    pub donor_availability: bool,
    /// Great-circle distance to the request, where rankable. Computed
    /// per response, never persisted.
    pub distance_km: Option<f64>,
}

impl From<MatchCandidate> for MatchCandidateResponse {
    fn from(candidate: MatchCandidate) -> Self {
        Self {
            match_id: candidate.donor_match.id,
            request_id: candidate.donor_match.request_id,
            donor_id: candidate.donor.id,
            status: candidate.donor_match.status,
            notified_at: candidate.donor_match.notified_at,
            donor_name: candidate.donor.name,
            donor_blood_type: candidate.donor.blood_type,
            donor_phone: candidate.donor.phone,
            donor_location: candidate.donor.location,
            donor_availability: candidate.donor.availability_status,
            distance_km: candidate.distance_km.map(|km| (km * 100.0).round() / 100.0),
        }
    }
}

/// Auto-match result: the request plus the matches created this run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoMatchResponse {
    /// The matched request.
    pub request: BloodRequest,
    /// Matches created by this invocation, in dispatch order.
    pub matches: Vec<MatchCandidateResponse>,
}

/// All matches recorded for a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesForRequestResponse {
    /// The request.
    pub request: BloodRequest,
    /// Every match with donor context.
    pub matches: Vec<MatchCandidateResponse>,
}
