//! HTTP implementation of [`AdoptionApi`].

use dogmatch_core::{BreedName, Credential, Dog, DogId, PAGE_SIZE, SearchQuery, SearchResult};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use super::AdoptionApi;
use super::error::ApiError;

/// Base URL of the public adoption service.
pub const DEFAULT_API_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Largest id list the service accepts in one `POST /dogs` body.
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Adoption service client holding the session cookie.
///
/// The cookie set by `login` lives in this client's own cookie jar and is
/// sent with every later request. Clones share the jar, so a clone handed to
/// another component stays logged in.
#[derive(Clone)]
pub struct SessionClient {
    /// HTTP client with cookie store enabled.
    client: Client,
    /// Service base URL, always ending in `/`.
    base_url: Url,
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(rename = "match")]
    matched: DogId,
}

impl SessionClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_ids<T: DeserializeOwned>(
        &self,
        path: &str,
        ids: &[DogId],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(ids)
            .send()
            .await?;

        decode(check_status(response).await?).await
    }
}

impl AdoptionApi for SessionClient {
    #[instrument(skip(self, credential), fields(email = %credential.email()))]
    async fn login(&self, credential: &Credential) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("auth/login")?)
            .json(credential)
            .send()
            .await?;

        check_status(response).await?;
        debug!("Session established");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_breeds(&self) -> Result<Vec<BreedName>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("dogs/breeds")?)
            .send()
            .await?;

        let breeds: Vec<BreedName> = decode(check_status(response).await?).await?;
        debug!(count = breeds.len(), "Fetched breeds");
        Ok(breeds)
    }

    #[instrument(skip(self), fields(page = query.page(), sort = %query.sort()))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, ApiError> {
        let response = self
            .client
            .get(self.endpoint("dogs/search")?)
            .query(&search_params(query))
            .send()
            .await?;

        let result: SearchResult = decode(check_status(response).await?).await?;
        debug!(
            ids = result.result_ids.len(),
            total = result.total,
            "Search returned"
        );
        Ok(result)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>, ApiError> {
        let mut dogs = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let batch: Vec<Dog> = self.post_ids("dogs", chunk).await?;
            dogs.extend(batch);
        }

        Ok(dogs)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn generate_match(&self, ids: &[DogId]) -> Result<DogId, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::EmptyMatchRequest);
        }

        let response: MatchResponse = self.post_ids("dogs/match", ids).await?;
        debug!(matched = %response.matched, "Match generated");
        Ok(response.matched)
    }
}

/// Query string for `GET /dogs/search`.
///
/// The breed filter is only included when set.
#[must_use]
pub fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("size", PAGE_SIZE.to_string()),
        ("from", query.offset().to_string()),
        ("sort", query.sort().to_string()),
    ];

    if let Some(breed) = query.breed() {
        params.push(("breeds[]", breed.to_string()));
    }

    params
}

/// Map non-success statuses to errors, keeping the response body as the message.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        error!(status = status.as_u16(), "Adoption service refused the session");
        return Err(ApiError::Unauthorized(message));
    }

    error!(status = status.as_u16(), message = %message, "Adoption service error");
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
