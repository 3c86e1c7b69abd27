//! Search controller: breed/page/sort state and the current result page.
//!
//! # States
//!
//! ```text
//! Idle --resolve--> Resolved (dogs, total) --resolve--> Resolved ...
//! ```
//!
//! Every change of breed, page or sort issues a [`SearchTicket`] carrying a
//! new sequence number. Responses are applied only while their ticket is the
//! latest one; anything older is dropped, whatever order responses arrive
//! in. An id list is held as pending until its records arrive, and the
//! page, total and dogs on display change together only when the page
//! resolves. The previous page stays visible while a new one loads, and a
//! failed search leaves it untouched.

use dogmatch_core::{
    BreedName, Dog, DogId, SearchQuery, SearchResult, SortOrder, clamp_page, page_count,
};
use tracing::{debug, error, instrument};

use crate::api::{AdoptionApi, arrange_by_ids};
use crate::outcome::Outcome;

/// A search issued for one query, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// The page on display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search has completed yet.
    #[default]
    Idle,
    /// Records are known for the page.
    Resolved { dogs: Vec<Dog>, total: u32 },
}

/// Id list applied for a ticket whose records are still being fetched.
#[derive(Debug)]
struct PendingListing {
    seq: u64,
    ids: Vec<DogId>,
    total: u32,
}

/// Owns the search query and the page of dogs on display.
#[derive(Debug, Default)]
pub struct SearchController {
    query: SearchQuery,
    /// Sequence number of the latest issued ticket.
    latest: u64,
    /// Sequence number of the latest ticket that finished, resolved or failed.
    settled: u64,
    /// Query that produced `state`.
    shown: SearchQuery,
    state: SearchState,
    pending: Option<PendingListing>,
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Dogs on display. At most one page.
    #[must_use]
    pub fn dogs(&self) -> &[Dog] {
        match &self.state {
            SearchState::Idle => &[],
            SearchState::Resolved { dogs, .. } => dogs.as_slice(),
        }
    }

    /// Total matches reported for the page on display.
    #[must_use]
    pub const fn total(&self) -> Option<u32> {
        match &self.state {
            SearchState::Idle => None,
            SearchState::Resolved { total, .. } => Some(*total),
        }
    }

    /// Number of pages for the known total; 0 when nothing matched or nothing
    /// is known yet.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        page_count(self.total().unwrap_or(0))
    }

    /// Whether the latest issued search has not finished yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.latest != self.settled
    }

    /// Whether `ticket` is still the latest issued search.
    #[must_use]
    pub const fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Filter by `breed`, or show all breeds with `None`.
    pub fn select_breed(&mut self, breed: Option<BreedName>) -> SearchTicket {
        let query = self.query.with_breed(breed);
        self.issue(query)
    }

    pub fn set_sort(&mut self, sort: SortOrder) -> SearchTicket {
        let query = self.query.with_sort(sort);
        self.issue(query)
    }

    /// Go to `page`, clamped to the pages the known total allows.
    pub fn set_page(&mut self, page: u32) -> SearchTicket {
        let query = self.query.with_page(clamp_page(page, self.total()));
        self.issue(query)
    }

    pub fn next_page(&mut self) -> SearchTicket {
        self.set_page(self.query.page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> SearchTicket {
        self.set_page(self.query.page().saturating_sub(1))
    }

    /// Re-issue the current query unchanged.
    pub fn refresh(&mut self) -> SearchTicket {
        let query = self.query.clone();
        self.issue(query)
    }

    fn issue(&mut self, query: SearchQuery) -> SearchTicket {
        self.latest += 1;
        self.query = query.clone();

        debug!(seq = self.latest, ?query, "Search issued");

        SearchTicket {
            seq: self.latest,
            query,
        }
    }

    /// Apply the id list for `ticket`.
    ///
    /// An empty id list resolves the page immediately; otherwise the list is
    /// held until [`apply_resolved`](Self::apply_resolved). Returns `false`
    /// if the ticket was superseded and the result dropped.
    pub fn apply_listing(&mut self, ticket: &SearchTicket, result: SearchResult) -> bool {
        if !self.is_current(ticket) {
            debug!(seq = ticket.seq, latest = self.latest, "Dropping stale listing");
            return false;
        }

        let SearchResult { result_ids, total } = result;

        if result_ids.is_empty() {
            self.commit(ticket, Vec::new(), total);
        } else {
            self.pending = Some(PendingListing {
                seq: ticket.seq,
                ids: result_ids,
                total,
            });
        }

        true
    }

    /// Apply the records for `ticket`'s id list, in id order.
    ///
    /// Returns `false` if the ticket was superseded, or if its listing was
    /// never applied.
    pub fn apply_resolved(&mut self, ticket: &SearchTicket, dogs: Vec<Dog>) -> bool {
        if !self.is_current(ticket) {
            debug!(seq = ticket.seq, latest = self.latest, "Dropping stale records");
            return false;
        }

        let Some(listing) = self.pending.take_if(|pending| pending.seq == ticket.seq) else {
            return false;
        };

        let dogs = arrange_by_ids(&listing.ids, dogs);
        self.commit(ticket, dogs, listing.total);
        true
    }

    fn commit(&mut self, ticket: &SearchTicket, dogs: Vec<Dog>, total: u32) {
        self.settled = ticket.seq;
        self.shown = ticket.query.clone();
        self.state = SearchState::Resolved { dogs, total };
        self.pending = None;
    }

    /// Settle a failed `ticket`. The query goes back to the one on display.
    fn abandon(&mut self, ticket: &SearchTicket) {
        if !self.is_current(ticket) {
            return;
        }

        self.settled = ticket.seq;
        self.pending = None;
        self.query = self.shown.clone();
    }

    /// Run `ticket` to completion: search, then resolve the ids to records.
    ///
    /// Each stage is applied only if the ticket is still current. Failures
    /// are logged and leave the displayed page as it was.
    #[instrument(skip(self, api, ticket), fields(seq = ticket.seq))]
    pub async fn run<A: AdoptionApi>(&mut self, api: &A, ticket: SearchTicket) -> Outcome {
        let result = match api.search(&ticket.query).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Error fetching dogs");
                self.abandon(&ticket);
                return Outcome::Failed;
            }
        };

        if !self.apply_listing(&ticket, result) {
            return Outcome::Superseded;
        }

        let ids = match &self.pending {
            Some(pending) if pending.seq == ticket.seq => pending.ids.clone(),
            _ => return Outcome::Applied,
        };

        let dogs = match api.fetch_dogs(&ids).await {
            Ok(dogs) => dogs,
            Err(e) => {
                error!(error = %e, "Error fetching dog details");
                self.abandon(&ticket);
                return Outcome::Failed;
            }
        };

        if self.apply_resolved(&ticket, dogs) {
            Outcome::Applied
        } else {
            Outcome::Superseded
        }
    }
}
