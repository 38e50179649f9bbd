//! Human-readable message templates.

use lifelink_entity::donor::Donor;
use lifelink_entity::request::BloodRequest;

/// Message sent to a donor when they are matched with a request.
pub fn matched_message(donor: &Donor, request: &BloodRequest) -> String {
    format!(
        "Hello {}, you have been matched with a blood request. \
         Blood type needed: {}, Hospital: {}, Urgency: {}. \
         Please respond if you can donate.",
        donor.name, request.blood_type, request.hospital, request.urgency
    )
}

/// Message sent to a donor after they accept a request.
pub fn accepted_message(donor: &Donor, request: &BloodRequest) -> String {
    format!(
        "Thank you {} for accepting to donate for {} at {}.",
        donor.name, request.patient_name, request.hospital
    )
}

/// Message sent to a donor after they decline a request.
pub fn declined_message(_donor: &Donor, request: &BloodRequest) -> String {
    format!(
        "You declined the donation request for {}.",
        request.patient_name
    )
}

/// Message sent to a donor after their donation is recorded.
pub fn completed_message(_donor: &Donor, request: &BloodRequest) -> String {
    format!(
        "Thank you for your donation! You helped save a life at {}.",
        request.hospital
    )
}

/// Message sent to the requester when no donors have been found.
pub fn no_match_message(request: &BloodRequest) -> String {
    format!(
        "We regret to inform you that no matching donors have been found yet \
         for your blood request (type {}). We will continue searching and \
         notify you when a match is found.",
        request.blood_type
    )
}
