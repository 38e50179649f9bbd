//! Donor matching: compatibility rules, eligibility window, proximity
//! ranking, and the engine that orchestrates them.

pub mod compatibility;
pub mod eligibility;
pub mod engine;
pub mod proximity;

pub use compatibility::compatible_donor_types;
pub use eligibility::is_eligible;
pub use engine::{MatchCandidate, MatchEngine};
pub use proximity::{Coordinates, CoordinateError, distance_km, parse_coordinates};
