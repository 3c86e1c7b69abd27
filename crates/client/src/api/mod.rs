//! Adoption service API.
//!
//! [`AdoptionApi`] is the request/response contract the rest of the crate
//! depends on. [`SessionClient`] implements it over HTTP with a cookie jar
//! holding the session established by [`AdoptionApi::login`].
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `login` | `POST /auth/login {name, email}` |
//! | `list_breeds` | `GET /dogs/breeds` |
//! | `search` | `GET /dogs/search?size&from&sort&breeds[]` |
//! | `fetch_dogs` | `POST /dogs [ids]` |
//! | `generate_match` | `POST /dogs/match [ids]` |

mod client;
mod error;

use std::collections::HashMap;
use std::future::Future;

use dogmatch_core::{BreedName, Credential, Dog, DogId, SearchQuery, SearchResult};

pub use client::{DEFAULT_API_BASE_URL, MAX_IDS_PER_REQUEST, SessionClient, search_params};
pub use error::ApiError;

/// Request/response contract of the adoption service.
///
/// Implementations hold whatever session state the transport needs; callers
/// only see these operations. No implementation retries.
pub trait AdoptionApi {
    /// Open a session. Succeeds on any 2xx response.
    fn login(&self, credential: &Credential) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// All breed names, in service order.
    fn list_breeds(&self) -> impl Future<Output = Result<Vec<BreedName>, ApiError>> + Send;

    /// One page of dog ids for `query`, in service order.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResult, ApiError>> + Send;

    /// Full records for `ids`. An empty slice returns an empty list without
    /// issuing a request.
    fn fetch_dogs(&self, ids: &[DogId]) -> impl Future<Output = Result<Vec<Dog>, ApiError>> + Send;

    /// Ask the service to pick one dog out of `ids`.
    ///
    /// Callers must not pass an empty slice; implementations reject it with
    /// [`ApiError::EmptyMatchRequest`].
    fn generate_match(&self, ids: &[DogId])
    -> impl Future<Output = Result<DogId, ApiError>> + Send;
}

/// A shared reference forwards to the referent, so one session can serve
/// several components.
impl<T: AdoptionApi> AdoptionApi for &T {
    fn login(&self, credential: &Credential) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).login(credential)
    }

    fn list_breeds(&self) -> impl Future<Output = Result<Vec<BreedName>, ApiError>> + Send {
        (**self).list_breeds()
    }

    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchResult, ApiError>> + Send {
        (**self).search(query)
    }

    fn fetch_dogs(&self, ids: &[DogId]) -> impl Future<Output = Result<Vec<Dog>, ApiError>> + Send {
        (**self).fetch_dogs(ids)
    }

    fn generate_match(&self, ids: &[DogId])
    -> impl Future<Output = Result<DogId, ApiError>> + Send {
        (**self).generate_match(ids)
    }
}

/// Order `dogs` to follow `ids`.
///
/// The service is free to return records in any order; display order must
/// follow the id list. Ids with no record are skipped.
#[must_use]
pub fn arrange_by_ids(ids: &[DogId], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut by_id: HashMap<DogId, Dog> = dogs
        .into_iter()
        .map(|dog| (dog.id.clone(), dog))
        .collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
