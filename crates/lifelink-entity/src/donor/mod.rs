//! Donor entity and blood type enumeration.

pub mod blood_type;
pub mod model;

pub use blood_type::BloodType;
pub use model::{CreateDonor, Donor, UpdateDonor};
