use common::UnLocode;
use serde::Serialize;

/// A port or terminal. Reference data; only the code matters for search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    code: UnLocode,
    name: String,
    country: String,
}

impl Location {
    /// Creates a location.
    pub fn new(code: UnLocode, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            country: country.into(),
        }
    }

    /// Returns the location code.
    pub fn code(&self) -> &UnLocode {
        &self.code
    }

    /// Returns the human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the country name.
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.code, self.name, self.country)
    }
}
