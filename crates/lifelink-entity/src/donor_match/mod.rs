//! Donor match entity and status enumeration.

pub mod model;
pub mod status;

pub use model::{DonorMatch, NewMatch};
pub use status::MatchStatus;
