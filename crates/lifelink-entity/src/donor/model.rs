//! Donor entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::blood_type::BloodType;

/// A registered donor in the LifeLink directory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donor {
    /// Unique donor identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// ABO/Rh blood type.
    pub blood_type: BloodType,
    /// Phone number — the address outbound notifications are sent to.
    pub phone: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// City of residence.
    pub city: String,
    /// GPS coordinates as a `"lat,long"` string (optional).
    pub location: Option<String>,
    /// Whether the donor is currently willing to donate.
    pub availability_status: bool,
    /// When the donor last donated, if ever.
    pub last_donation_date: Option<DateTime<Utc>>,
    /// When the donor was registered.
    pub created_at: DateTime<Utc>,
    /// When the donor was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a new donor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonor {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// ABO/Rh blood type.
    pub blood_type: BloodType,
    /// Phone number.
    pub phone: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// City of residence.
    pub city: String,
    /// GPS coordinates as `"lat,long"` (optional).
    pub location: Option<String>,
    /// Initial availability (defaults to available).
    pub availability_status: bool,
}

/// Data for updating an existing donor. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDonor {
    /// New full name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New GPS coordinates.
    pub location: Option<String>,
    /// New availability flag.
    pub availability_status: Option<bool>,
    /// New last-donation timestamp (set by the donation recorder).
    pub last_donation_date: Option<DateTime<Utc>>,
}
