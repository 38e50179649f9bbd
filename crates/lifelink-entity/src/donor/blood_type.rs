//! ABO/Rh blood type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight ABO/Rh blood types.
///
/// Stored in PostgreSQL as the `blood_type` enum using the conventional
/// sign notation (`"A+"`, `"O-"`, ...), which is also the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blood_type")]
pub enum BloodType {
    /// O negative — universal donor.
    #[serde(rename = "O-")]
    #[sqlx(rename = "O-")]
    ONeg,
    /// O positive.
    #[serde(rename = "O+")]
    #[sqlx(rename = "O+")]
    OPos,
    /// A negative.
    #[serde(rename = "A-")]
    #[sqlx(rename = "A-")]
    ANeg,
    /// A positive.
    #[serde(rename = "A+")]
    #[sqlx(rename = "A+")]
    APos,
    /// B negative.
    #[serde(rename = "B-")]
    #[sqlx(rename = "B-")]
    BNeg,
    /// B positive.
    #[serde(rename = "B+")]
    #[sqlx(rename = "B+")]
    BPos,
    /// AB negative.
    #[serde(rename = "AB-")]
    #[sqlx(rename = "AB-")]
    AbNeg,
    /// AB positive — universal recipient.
    #[serde(rename = "AB+")]
    #[sqlx(rename = "AB+")]
    AbPos,
}

impl BloodType {
    /// All eight blood types, in a stable order.
    pub const ALL: [Self; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::AbNeg,
        Self::AbPos,
    ];

    /// Return the type in sign notation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::AbNeg => "AB-",
            Self::AbPos => "AB+",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = lifelink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "O-" => Ok(Self::ONeg),
            "O+" => Ok(Self::OPos),
            "A-" => Ok(Self::ANeg),
            "A+" => Ok(Self::APos),
            "B-" => Ok(Self::BNeg),
            "B+" => Ok(Self::BPos),
            "AB-" => Ok(Self::AbNeg),
            "AB+" => Ok(Self::AbPos),
            _ => Err(lifelink_core::AppError::validation(format!(
                "Invalid blood type: '{s}'. Expected one of: O-, O+, A-, A+, B-, B+, AB-, AB+"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_sign_notations() {
        for bt in BloodType::ALL {
            let parsed: BloodType = bt.as_str().parse().expect("should parse");
            assert_eq!(parsed, bt);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ab+".parse::<BloodType>().unwrap(), BloodType::AbPos);
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        assert!("C+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_serde_uses_sign_notation() {
        let json = serde_json::to_string(&BloodType::ONeg).unwrap();
        assert_eq!(json, "\"O-\"");
        let back: BloodType = serde_json::from_str("\"AB+\"").unwrap();
        assert_eq!(back, BloodType::AbPos);
    }
}
