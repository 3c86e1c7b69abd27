//! Dogmatch Core - Shared domain types.
//!
//! This crate provides the types used across all dogmatch components:
//! - `client` - Session client, favorites store, search controller, match generator
//! - `cli` - Terminal front end (`dogmatch shell`)
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. Pagination math and favorite-set semantics live
//! here so they can be tested without a network.
//!
//! # Modules
//!
//! - [`types`] - Dog records, ids, credentials, sort orders, search queries and favorites

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
