//! In-memory fake of the adoption service.
//!
//! [`FakeApi`] serves a fixed catalog of dogs, records every request it
//! receives and can be told to fail the next call to an endpoint. It follows
//! the same contract as [`SessionClient`](crate::SessionClient): an empty
//! `fetch_dogs` is answered locally and is not recorded.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use dogmatch_core::{
    BreedName, Credential, Dog, DogId, SearchQuery, SearchResult, SortDirection, SortField,
};

use crate::api::{AdoptionApi, ApiError};

/// Endpoint selector for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Breeds,
    Search,
    Dogs,
    Match,
}

/// A request received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login { name: String, email: String },
    ListBreeds,
    Search(SearchQuery),
    FetchDogs(Vec<DogId>),
    GenerateMatch(Vec<DogId>),
}

/// Fake adoption service over a fixed catalog.
#[derive(Debug, Default)]
pub struct FakeApi {
    catalog: Vec<Dog>,
    require_session: bool,
    logged_in: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashSet<Endpoint>>,
    match_pick: Mutex<Option<DogId>>,
}

impl FakeApi {
    /// Serve `catalog` without requiring a login first.
    #[must_use]
    pub fn new(catalog: Vec<Dog>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Answer every call except `login` with `Unauthorized` until a login succeeds.
    #[must_use]
    pub const fn requiring_session(mut self) -> Self {
        self.require_session = true;
        self
    }

    /// Fail the next call to `endpoint` with a 500.
    pub fn fail_next(&self, endpoint: Endpoint) {
        lock(&self.failures).insert(endpoint);
    }

    /// Make `generate_match` answer with `id` instead of the first candidate.
    pub fn pick_match(&self, id: DogId) {
        *lock(&self.match_pick) = Some(id);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// The search queries received so far, oldest first.
    #[must_use]
    pub fn searches(&self) -> Vec<SearchQuery> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                Call::Search(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, endpoint: Endpoint, call: Call) -> Result<(), ApiError> {
        lock(&self.calls).push(call);

        if lock(&self.failures).remove(&endpoint) {
            return Err(ApiError::Api {
                status: 500,
                message: format!("injected {endpoint:?} failure"),
            });
        }

        if self.require_session && endpoint != Endpoint::Login && !*lock(&self.logged_in) {
            return Err(ApiError::Unauthorized("no session".to_owned()));
        }

        Ok(())
    }

    fn breeds(&self) -> Vec<BreedName> {
        let mut breeds: Vec<BreedName> = self.catalog.iter().map(|d| d.breed.clone()).collect();
        breeds.sort();
        breeds.dedup();
        breeds
    }
}

impl AdoptionApi for FakeApi {
    async fn login(&self, credential: &Credential) -> Result<(), ApiError> {
        self.record(
            Endpoint::Login,
            Call::Login {
                name: credential.name().to_owned(),
                email: credential.email().to_string(),
            },
        )?;
        *lock(&self.logged_in) = true;
        Ok(())
    }

    async fn list_breeds(&self) -> Result<Vec<BreedName>, ApiError> {
        self.record(Endpoint::Breeds, Call::ListBreeds)?;
        Ok(self.breeds())
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ApiError> {
        self.record(Endpoint::Search, Call::Search(query.clone()))?;

        let mut matches: Vec<&Dog> = self
            .catalog
            .iter()
            .filter(|dog| query.breed().is_none_or(|breed| dog.breed == *breed))
            .collect();

        let sort = query.sort();
        matches.sort_by(|a, b| {
            let ordering = match sort.field {
                SortField::Breed => a.breed.cmp(&b.breed),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Age => a.age.cmp(&b.age),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = u32::try_from(matches.len()).unwrap_or(u32::MAX);
        let result_ids = matches
            .into_iter()
            .skip(query.offset() as usize)
            .take(dogmatch_core::PAGE_SIZE as usize)
            .map(|dog| dog.id.clone())
            .collect();

        Ok(SearchResult { result_ids, total })
    }

    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.record(Endpoint::Dogs, Call::FetchDogs(ids.to_vec()))?;

        // Catalog order, not request order; callers must rearrange
        Ok(self
            .catalog
            .iter()
            .filter(|dog| ids.contains(&dog.id))
            .cloned()
            .collect())
    }

    async fn generate_match(&self, ids: &[DogId]) -> Result<DogId, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::EmptyMatchRequest);
        }

        self.record(Endpoint::Match, Call::GenerateMatch(ids.to_vec()))?;

        let picked = lock(&self.match_pick).clone();
        match picked {
            Some(id) => Ok(id),
            None => ids
                .first()
                .cloned()
                .ok_or(ApiError::EmptyMatchRequest),
        }
    }
}

/// Build a catalog record with a placeholder photo and zip code.
#[must_use]
pub fn sample_dog(id: &str, name: &str, breed: &str, age: u32) -> Dog {
    Dog {
        id: DogId::new(id),
        img: format!("https://images.example.com/{id}.jpg"),
        name: name.to_owned(),
        age,
        zip_code: "10001".to_owned(),
        breed: BreedName::new(breed),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
