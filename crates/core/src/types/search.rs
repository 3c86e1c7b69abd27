//! Search query and result types, plus pagination math.

use serde::{Deserialize, Serialize};

use super::dog::BreedName;
use super::id::DogId;
use super::sort::SortOrder;

/// Fixed number of results per page.
pub const PAGE_SIZE: u32 = 10;

/// Number of pages needed to show `total` results.
///
/// Zero results means zero pages.
#[must_use]
pub const fn page_count(total: u32) -> u32 {
    total.div_ceil(PAGE_SIZE)
}

/// The (breed, page, sort) tuple driving the current result page.
///
/// Pages are 1-based. Every setter returns a new query that differs from the
/// receiver in exactly one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    breed: Option<BreedName>,
    page: u32,
    sort: SortOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            breed: None,
            page: 1,
            sort: SortOrder::default(),
        }
    }
}

impl SearchQuery {
    #[must_use]
    pub const fn breed(&self) -> Option<&BreedName> {
        self.breed.as_ref()
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Offset of the first result on this page (`from` on the wire).
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    /// Replace the breed filter. `None` means all breeds.
    #[must_use]
    pub fn with_breed(&self, breed: Option<BreedName>) -> Self {
        Self {
            breed,
            ..self.clone()
        }
    }

    /// Replace the page. Page 0 is treated as page 1.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort(&self, sort: SortOrder) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }
}

/// Clamp a requested page to `[1, max(1, page_count(total))]`.
///
/// Without a known total only the lower bound applies.
#[must_use]
pub fn clamp_page(page: u32, total: Option<u32>) -> u32 {
    let page = page.max(1);
    match total {
        Some(total) => page.min(page_count(total).max(1)),
        None => page,
    }
}

/// One page of search results as returned by `GET /dogs/search`.
///
/// `result_ids` keeps the server's order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub result_ids: Vec<DogId>,
    pub total: u32,
}
