//! "Generate match": ask the service to pick one dog out of the favorites.

use dogmatch_core::{Dog, DogId, FavoriteSet};
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::api::{AdoptionApi, ApiError};

/// Errors from [`MatchGenerator::generate`].
#[derive(Debug, Error)]
pub enum MatchError {
    /// No favorites to match from. A user-input problem, not a failure.
    #[error("Please select at least one dog to generate a match.")]
    NoFavorites,

    /// A service call failed.
    #[error("Match request failed: {0}")]
    Api(#[from] ApiError),

    /// The matched id did not resolve to a record.
    #[error("Matched dog {0} was not returned by the service")]
    NotFound(DogId),
}

/// Holds the most recent match.
#[derive(Debug, Clone, Default)]
pub struct MatchGenerator {
    current: Option<Dog>,
}

impl MatchGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last successful match, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Dog> {
        self.current.as_ref()
    }

    /// Request a match from `favorites` and resolve it to a full record.
    ///
    /// Makes no call when `favorites` is empty. The stored match only changes
    /// when both calls succeed.
    ///
    /// # Errors
    ///
    /// - [`MatchError::NoFavorites`] if `favorites` is empty
    /// - [`MatchError::Api`] if either service call fails
    /// - [`MatchError::NotFound`] if the matched id has no record
    #[instrument(skip(self, api, favorites), fields(candidates = favorites.len()))]
    pub async fn generate<A: AdoptionApi>(
        &mut self,
        api: &A,
        favorites: &FavoriteSet,
    ) -> Result<&Dog, MatchError> {
        if favorites.is_empty() {
            return Err(MatchError::NoFavorites);
        }

        let matched = api
            .generate_match(favorites.ids())
            .await
            .inspect_err(|e| error!(error = %e, "Error generating match"))?;

        let dogs = api
            .fetch_dogs(std::slice::from_ref(&matched))
            .await
            .inspect_err(|e| error!(error = %e, matched = %matched, "Error fetching matched dog"))?;

        let dog = dogs
            .into_iter()
            .find(|dog| dog.id == matched)
            .ok_or(MatchError::NotFound(matched))?;

        debug!(matched = %dog.id, name = %dog.name, "Match found");
        Ok(self.current.insert(dog))
    }
}
