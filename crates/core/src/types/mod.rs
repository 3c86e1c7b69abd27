//! Core types for dogmatch.
//!
//! This module provides type-safe wrappers for the adoption domain.

pub mod credential;
pub mod dog;
pub mod email;
pub mod favorites;
pub mod id;
pub mod search;
pub mod sort;

pub use credential::{Credential, CredentialError};
pub use dog::{BreedName, Dog};
pub use email::{Email, EmailError};
pub use favorites::FavoriteSet;
pub use id::DogId;
pub use search::{PAGE_SIZE, SearchQuery, SearchResult, clamp_page, page_count};
pub use sort::{SortDirection, SortField, SortOrder, SortOrderError};
