//! Patient/caregiver role.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown role {0:?}, expected \"patient\" or \"caregiver\"")]
pub struct RoleParseError(pub String);

/// The two kinds of person the registry tracks.
///
/// Patients and caregivers share the same record shape but live in separate
/// tables; the role value selects which one an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Patient,
    Caregiver,
}

impl PersonRole {
    /// Human-readable label, used in statuses and error messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Caregiver => "caregiver",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PersonRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "caregiver" => Ok(Self::Caregiver),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Patient".parse::<PersonRole>().ok(), Some(PersonRole::Patient));
        assert_eq!(
            "CAREGIVER".parse::<PersonRole>().ok(),
            Some(PersonRole::Caregiver)
        );
        assert!("nurse".parse::<PersonRole>().is_err());
    }

    #[test]
    fn labels_match_display() {
        assert_eq!(PersonRole::Patient.to_string(), "patient");
        assert_eq!(PersonRole::Caregiver.label(), "caregiver");
    }
}
