//! Request DTOs with validation.
//!
//! Enumerated fields (blood type, urgency, statuses) arrive as strings
//! and are parsed with `FromStr` in the handlers, so an unknown value
//! is a 400 rather than a serde rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register a donor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDonorRequest {
    /// Full name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Blood type in sign notation, e.g. `"A+"`.
    #[validate(length(min = 2, max = 3))]
    pub blood_type: String,
    /// Phone number.
    #[validate(length(min = 7, max = 20, message = "A phone number is required"))]
    pub phone: String,
    /// Email (optional).
    #[validate(email)]
    pub email: Option<String>,
    /// City of residence.
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    /// GPS coordinates as `"lat,long"` (optional).
    pub location: Option<String>,
    /// Initial availability; defaults to available.
    #[serde(default = "default_true")]
    pub availability_status: bool,
}

/// Update a donor. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDonorRequest {
    /// New full name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New phone number.
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
    /// New email.
    #[validate(email)]
    pub email: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New GPS coordinates.
    pub location: Option<String>,
    /// New availability flag.
    pub availability_status: Option<bool>,
    /// New last-donation timestamp.
    pub last_donation_date: Option<DateTime<Utc>>,
}

/// Open a blood request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBloodRequestRequest {
    /// Patient name.
    #[validate(length(min = 1, max = 100, message = "Patient name is required"))]
    pub patient_name: String,
    /// Requested blood type in sign notation.
    #[validate(length(min = 2, max = 3))]
    pub blood_type: String,
    /// Requesting facility name.
    #[validate(length(min = 1, max = 100))]
    pub hospital: String,
    /// City of the facility.
    #[validate(length(min = 1, max = 50))]
    pub city: String,
    /// GPS coordinates as `"lat,long"` (optional).
    pub location: Option<String>,
    /// Requester contact number.
    #[validate(length(min = 7, max = 20, message = "A contact number is required"))]
    pub contact_number: String,
    /// Urgency level; defaults to `"medium"`.
    #[serde(default = "default_urgency")]
    pub urgency: String,
}

/// Update a blood request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBloodRequestRequest {
    /// New patient name.
    #[validate(length(min = 1, max = 100))]
    pub patient_name: Option<String>,
    /// New facility name.
    pub hospital: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New GPS coordinates.
    pub location: Option<String>,
    /// New requester contact number.
    #[validate(length(min = 7, max = 20))]
    pub contact_number: Option<String>,
    /// New urgency level.
    pub urgency: Option<String>,
    /// New lifecycle status.
    pub status: Option<String>,
}

/// Update a match's status (external response recording).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateMatchRequest {
    /// Target status: `accepted`, `declined`, `completed`, or `notified`.
    #[validate(length(min = 1))]
    pub status: String,
}

/// Manually create and send a notification.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    /// Recipient donor.
    pub donor_id: Uuid,
    /// Related request (optional).
    pub request_id: Option<Uuid>,
    /// Message text to send verbatim.
    #[validate(length(min = 1, max = 1000, message = "A message is required"))]
    pub message: String,
}

/// Administrative override of a recorded notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    /// Corrected message text.
    #[validate(length(min = 1, max = 1000))]
    pub message: Option<String>,
    /// Corrected delivery status.
    pub status: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_urgency() -> String {
    "medium".to_string()
}
