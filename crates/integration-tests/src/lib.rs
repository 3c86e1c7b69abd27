//! Integration tests for dogmatch.
//!
//! # Running Tests
//!
//! ```bash
//! # Workflow and persistence tests (no network)
//! cargo test -p dogmatch-integration-tests
//!
//! # Include tests against the live adoption service
//! cargo test -p dogmatch-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `workflow` - Login, search, favorites and match flows against
//!   [`FakeApi`](dogmatch_client::testing::FakeApi)
//! - `favorites_persistence` - Favorites on disk through
//!   [`FileStore`](dogmatch_client::FileStore)
//! - `live_service` - [`SessionClient`](dogmatch_client::SessionClient)
//!   against the real service (ignored by default)

use dogmatch_client::testing::sample_dog;
use dogmatch_core::Dog;

/// Two breeds: 3 Beagles (`b1`..`b3`) and 12 Poodles (`p01`..`p12`).
///
/// Poodles span two pages, so paging inside a breed filter is observable.
#[must_use]
pub fn two_breed_catalog() -> Vec<Dog> {
    let beagles = ["Ace", "Bo", "Cy"]
        .iter()
        .zip(1u32..)
        .map(|(name, n)| sample_dog(&format!("b{n}"), name, "Beagle", n));

    let poodles = (1u32..=12).map(|n| {
        let name = format!("Poodle {n:02}");
        sample_dog(&format!("p{n:02}"), &name, "Poodle", n)
    });

    beagles.chain(poodles).collect()
}

/// Base URL for the live service (configurable via environment).
#[must_use]
pub fn live_base_url() -> String {
    std::env::var("DOGMATCH_API_BASE_URL")
        .unwrap_or_else(|_| dogmatch_client::api::DEFAULT_API_BASE_URL.to_string())
}
