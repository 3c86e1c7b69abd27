//! Dog records and breed names returned by the adoption service.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::DogId;

/// A breed name as listed by `GET /dogs/breeds`.
///
/// Opaque to the client: it is only ever echoed back as a search filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreedName(String);

impl BreedName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BreedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BreedName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for BreedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An adoptable dog.
///
/// Identity is [`Dog::id`]; records are never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    /// Photo URL.
    pub img: String,
    pub name: String,
    /// Age in years.
    pub age: u32,
    pub zip_code: String,
    pub breed: BreedName,
}

impl Dog {
    /// One-line summary used by list rows: `"Rex (Beagle, 3y) 10001"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {}y) {}",
            self.name, self.breed, self.age, self.zip_code
        )
    }
}
