//! Blood request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::RequestStatus;
use super::urgency::UrgencyLevel;
use crate::donor::blood_type::BloodType;

/// A request for blood submitted by a facility.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BloodRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Name of the patient needing blood.
    pub patient_name: String,
    /// Requested ABO/Rh blood type.
    pub blood_type: BloodType,
    /// Name of the requesting facility.
    pub hospital: String,
    /// City of the facility.
    pub city: String,
    /// GPS coordinates as `"lat,long"` (optional).
    pub location: Option<String>,
    /// Requester contact number — used for no-match notifications.
    pub contact_number: String,
    /// Urgency of the request.
    pub urgency: UrgencyLevel,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to open a new blood request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBloodRequest {
    /// Name of the patient needing blood.
    pub patient_name: String,
    /// Requested ABO/Rh blood type.
    pub blood_type: BloodType,
    /// Name of the requesting facility.
    pub hospital: String,
    /// City of the facility.
    pub city: String,
    /// GPS coordinates as `"lat,long"` (optional).
    pub location: Option<String>,
    /// Requester contact number.
    pub contact_number: String,
    /// Urgency of the request.
    pub urgency: UrgencyLevel,
}

/// Data for updating an existing request. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBloodRequest {
    /// New patient name.
    pub patient_name: Option<String>,
    /// New facility name.
    pub hospital: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New GPS coordinates.
    pub location: Option<String>,
    /// New requester contact number.
    pub contact_number: Option<String>,
    /// New urgency.
    pub urgency: Option<UrgencyLevel>,
    /// New lifecycle status.
    pub status: Option<RequestStatus>,
}
