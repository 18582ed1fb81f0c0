use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

/// Unique identifier for a shipment.
///
/// Generated once when the cargo is booked and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(Uuid);

impl TrackingId {
    /// Creates a new random tracking ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a tracking ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TrackingId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidTrackingId {
                value: s.to_string(),
            })
    }
}

impl From<Uuid> for TrackingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// UN/LOCODE-style location code, e.g. `USNYC`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnLocode(String);

impl UnLocode {
    /// Required length of a location code.
    pub const LENGTH: usize = 5;

    /// Parses a location code, normalising it to upper case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref();
        if code.len() != Self::LENGTH || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidLocationCode {
                code: code.to_string(),
            });
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnLocode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UnLocode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UnLocode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnLocode> for String {
    fn from(code: UnLocode) -> Self {
        code.0
    }
}

impl AsRef<str> for UnLocode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifies a voyage, e.g. `V100`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoyageNumber(String);

impl VoyageNumber {
    /// Creates a voyage number; surrounding whitespace is dropped.
    pub fn new(number: impl AsRef<str>) -> Result<Self, ValidationError> {
        let number = number.as_ref().trim();
        if number.is_empty() {
            return Err(ValidationError::EmptyVoyageNumber);
        }
        Ok(Self(number.to_string()))
    }

    /// Returns the voyage number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoyageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VoyageNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VoyageNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VoyageNumber> for String {
    fn from(number: VoyageNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for VoyageNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
