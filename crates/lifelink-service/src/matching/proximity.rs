//! Great-circle distance and proximity ranking.

use thiserror::Error;

use lifelink_entity::donor::Donor;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A parsed latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees, [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, [-180, 180].
    pub long: f64,
}

/// Why a `"lat,long"` string could not be parsed.
///
/// Parse failures are deliberately explicit values rather than being
/// swallowed: a donor with a bad location is excluded from proximity
/// ordering but still matched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// The string is not two comma-separated components.
    #[error("expected 'lat,long', got '{0}'")]
    Malformed(String),
    /// A component is not a finite number.
    #[error("non-numeric coordinate component: '{0}'")]
    NonNumeric(String),
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("coordinate out of range: {0}")]
    OutOfRange(f64),
}

/// Parse a `"lat,long"` string into [`Coordinates`].
pub fn parse_coordinates(s: &str) -> Result<Coordinates, CoordinateError> {
    let mut parts = s.split(',');
    let (Some(lat_str), Some(long_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CoordinateError::Malformed(s.to_string()));
    };

    let lat = parse_component(lat_str)?;
    let long = parse_component(long_str)?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateError::OutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&long) {
        return Err(CoordinateError::OutOfRange(long));
    }

    Ok(Coordinates { lat, long })
}

fn parse_component(s: &str) -> Result<f64, CoordinateError> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| CoordinateError::NonNumeric(s.trim().to_string()))?;
    if !value.is_finite() {
        return Err(CoordinateError::NonNumeric(s.trim().to_string()));
    }
    Ok(value)
}

/// Haversine great-circle distance between two points, in kilometres.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_long = (b.long - a.long).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_long / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Order donors for dispatch from `origin`.
///
/// Donors within `radius_km` come first, ascending by distance. Everyone
/// else (too far, no location, or an unparseable location) follows in
/// the original order, never dropped. The attached distance is `None`
/// exactly when the donor could not be ranked.
pub fn rank_by_proximity(
    origin: Coordinates,
    donors: Vec<Donor>,
    radius_km: f64,
) -> Vec<(Donor, Option<f64>)> {
    let mut near: Vec<(Donor, f64)> = Vec::new();
    let mut other: Vec<(Donor, Option<f64>)> = Vec::new();

    for donor in donors {
        match donor.location.as_deref().map(parse_coordinates) {
            Some(Ok(coords)) => {
                let km = distance_km(origin, coords);
                if km <= radius_km {
                    near.push((donor, km));
                } else {
                    other.push((donor, Some(km)));
                }
            }
            Some(Err(err)) => {
                tracing::debug!(donor_id = %donor.id, error = %err, "Donor location unrankable");
                other.push((donor, None));
            }
            None => other.push((donor, None)),
        }
    }

    near.sort_by(|a, b| a.1.total_cmp(&b.1));

    near.into_iter()
        .map(|(donor, km)| (donor, Some(km)))
        .chain(other)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifelink_entity::donor::BloodType;
    use uuid::Uuid;

    fn donor_at(location: Option<&str>) -> Donor {
        let now = chrono::Utc::now();
        Donor {
            id: Uuid::new_v4(),
            name: "Donor".into(),
            age: 28,
            blood_type: BloodType::ONeg,
            phone: "+254711111111".into(),
            email: None,
            city: "Nairobi".into(),
            location: location.map(str::to_string),
            availability_status: true,
            last_donation_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parse_valid_coordinates() {
        let c = parse_coordinates("-1.2921, 36.8219").unwrap();
        assert!((c.lat - -1.2921).abs() < 1e-9);
        assert!((c.long - 36.8219).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        assert!(matches!(
            parse_coordinates("nairobi"),
            Err(CoordinateError::Malformed(_))
        ));
        assert!(matches!(
            parse_coordinates("1.0,2.0,3.0"),
            Err(CoordinateError::Malformed(_))
        ));
        assert!(matches!(
            parse_coordinates("abc,36.8"),
            Err(CoordinateError::NonNumeric(_))
        ));
        assert!(matches!(
            parse_coordinates("95.0,36.8"),
            Err(CoordinateError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_zero_distance() {
        let origin = Coordinates { lat: 0.0, long: 0.0 };
        assert_eq!(distance_km(origin, origin), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude_is_about_111_km() {
        let a = Coordinates { lat: 0.0, long: 0.0 };
        let b = Coordinates { lat: 1.0, long: 0.0 };
        let km = distance_km(a, b);
        assert!((km - 111.2).abs() < 1.0, "got {km}");
    }

    #[test]
    fn test_rank_orders_near_donors_ascending_and_keeps_the_rest() {
        let origin = Coordinates { lat: 0.0, long: 0.0 };
        let at_origin = donor_at(Some("0.0,0.0"));
        let one_degree = donor_at(Some("1.0,0.0"));
        let far = donor_at(Some("40.0,40.0"));
        let unrankable = donor_at(Some("garbage"));
        let no_location = donor_at(None);

        let ranked = rank_by_proximity(
            origin,
            vec![
                far.clone(),
                one_degree.clone(),
                unrankable.clone(),
                at_origin.clone(),
                no_location.clone(),
            ],
            200.0,
        );

        assert_eq!(ranked.len(), 5, "no donor may be dropped");
        // near set sorted ascending: origin (0 km) then one degree (~111 km)
        assert_eq!(ranked[0].0.id, at_origin.id);
        assert_eq!(ranked[1].0.id, one_degree.id);
        // remainder keeps input order: far, unrankable, no_location
        assert_eq!(ranked[2].0.id, far.id);
        assert_eq!(ranked[3].0.id, unrankable.id);
        assert_eq!(ranked[4].0.id, no_location.id);
        assert!(ranked[3].1.is_none());
        assert!(ranked[4].1.is_none());
    }

    #[test]
    fn test_fifty_km_threshold() {
        let origin = Coordinates { lat: 0.0, long: 0.0 };
        // ~0.44 degrees of latitude is ~49 km; 0.5 degrees is ~55.6 km
        let inside = donor_at(Some("0.44,0.0"));
        let outside = donor_at(Some("0.5,0.0"));

        let ranked = rank_by_proximity(origin, vec![outside.clone(), inside.clone()], 50.0);

        assert_eq!(ranked[0].0.id, inside.id);
        assert_eq!(ranked[1].0.id, outside.id);
        assert!(ranked[1].1.unwrap() > 50.0);
    }
}
