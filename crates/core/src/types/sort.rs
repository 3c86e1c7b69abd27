//! Sort order for dog searches.
//!
//! The service takes sort as a single `"field:direction"` query value, e.g.
//! `breed:asc`. [`SortOrder`] parses and prints exactly that form.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised when parsing a sort order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SortOrderError {
    #[error("invalid sort field: {0} (expected breed, name or age)")]
    Field(String),
    #[error("invalid sort direction: {0} (expected asc or desc)")]
    Direction(String),
    #[error("invalid sort order: {0} (expected field:direction)")]
    Format(String),
}

/// Field the search results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Breed,
    Name,
    Age,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breed => write!(f, "breed"),
            Self::Name => write!(f, "name"),
            Self::Age => write!(f, "age"),
        }
    }
}

impl FromStr for SortField {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breed" => Ok(Self::Breed),
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            _ => Err(SortOrderError::Field(s.to_owned())),
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortOrderError::Direction(s.to_owned())),
        }
    }
}

/// A sort field plus direction. Defaults to `breed:asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Human-readable label for menus, e.g. `Breed (A-Z)`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match (self.field, self.direction) {
            (SortField::Breed, SortDirection::Asc) => "Breed (A-Z)",
            (SortField::Breed, SortDirection::Desc) => "Breed (Z-A)",
            (SortField::Name, SortDirection::Asc) => "Name (A-Z)",
            (SortField::Name, SortDirection::Desc) => "Name (Z-A)",
            (SortField::Age, SortDirection::Asc) => "Age (youngest first)",
            (SortField::Age, SortDirection::Desc) => "Age (oldest first)",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .split_once(':')
            .ok_or_else(|| SortOrderError::Format(s.to_owned()))?;

        Ok(Self {
            field: field.trim().parse()?,
            direction: direction.trim().parse()?,
        })
    }
}
