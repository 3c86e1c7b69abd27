//! Dogmatch Client - everything between the terminal and the adoption service.
//!
//! # Components
//!
//! - [`api`] - [`AdoptionApi`] trait and the cookie-carrying [`SessionClient`]
//! - [`storage`] - Durable key-value storage ([`FileStore`], [`MemoryStore`])
//! - [`favorites`] - [`FavoritesStore`] persisted under the `favorites` key, and
//!   the derived [`FavoriteDogs`] records
//! - [`search`] - [`SearchController`] owning breed/page/sort and the result page
//! - [`matcher`] - [`MatchGenerator`] for the "generate match" action
//! - [`config`] - [`ClientConfig`] loaded from the environment
//!
//! # Data Flow
//!
//! ```text
//! view -> controller/store -> SessionClient -> adoption service
//!      <- controller/store <- (sequence/revision check) <-
//! ```
//!
//! Every component that talks to the service is generic over [`AdoptionApi`],
//! so the session is injected rather than global. Responses are tagged with
//! the sequence number (searches) or revision (favorites) they were issued
//! for, and stale ones are dropped.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod favorites;
pub mod matcher;
mod outcome;
pub mod search;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{AdoptionApi, ApiError, SessionClient};
pub use config::{ClientConfig, ConfigError};
pub use favorites::{FAVORITES_KEY, FavoriteDogs, FavoritesSnapshot, FavoritesStore};
pub use matcher::{MatchError, MatchGenerator};
pub use outcome::Outcome;
pub use search::{SearchController, SearchState, SearchTicket};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
