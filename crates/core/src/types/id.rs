//! Newtype id for dog records.
//!
//! The adoption service issues opaque string ids. Wrapping them keeps a dog id
//! from being confused with a breed name or any other string in the API.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a dog record, as issued by the adoption service.
///
/// Serializes as a bare JSON string, which is also the format persisted in
/// the favorites entry.
///
/// # Example
///
/// ```rust
/// # use dogmatch_core::DogId;
/// let id = DogId::new("VXGFTIcBOvEgQ5OCx40W");
/// assert_eq!(id.as_str(), "VXGFTIcBOvEgQ5OCx40W");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"VXGFTIcBOvEgQ5OCx40W\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(String);

impl DogId {
    /// Create a new id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DogId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<DogId> for String {
    fn from(id: DogId) -> Self {
        id.0
    }
}

impl AsRef<str> for DogId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
