//! Donor eligibility window.

use chrono::{DateTime, Duration, Utc};

use lifelink_entity::donor::Donor;

/// Check whether a donor may donate at `now`.
///
/// True iff the donor is marked available and either has never donated
/// or the cooldown interval has fully elapsed since the last donation.
/// `now` is injected by the caller so the check is deterministic under
/// test.
pub fn is_eligible(donor: &Donor, now: DateTime<Utc>, cooldown: Duration) -> bool {
    if !donor.availability_status {
        return false;
    }
    match donor.last_donation_date {
        None => true,
        Some(last) => now - last > cooldown,
    }
}
