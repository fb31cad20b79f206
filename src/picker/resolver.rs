//! Query resolution
//!
//! A query is either a coordinate literal, answered locally, or a place
//! name, answered by the geocoder. Geocoder failures never escape: they
//! are logged and reported as an empty, `failed` lookup.
//!
//! Place searches suspend, so a newer query can be issued before an older
//! search returns. [`Staleness`] hands out tickets so the caller can tell
//! whether a finished search still belongs to the latest query.

use crate::coord;
use crate::geo::GeoBackend;
use crate::picker::{Candidate, CandidateList, Query};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lookup {
    pub candidates: CandidateList,
    /// True when the geocoder could not be reached or answered garbage
    pub failed: bool,
}

/// Resolves queries into candidates
#[derive(Debug)]
pub struct Resolver<G> {
    geocoder: Arc<G>,
    limit: usize,
}

impl<G> Clone for Resolver<G> {
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
            limit: self.limit,
        }
    }
}

impl<G: GeoBackend> Resolver<G> {
    /// Create a resolver asking for at most `limit` places per search
    pub fn new(geocoder: Arc<G>, limit: usize) -> Self {
        Self {
            geocoder,
            limit: limit.max(1),
        }
    }

    /// Answer a coordinate literal without touching the network
    pub fn resolve_local(&self, query: &Query) -> Option<CandidateList> {
        coord::parse_literal(query.text()).map(|coords| vec![Candidate::synthesized(coords)])
    }

    /// Resolve a query, reporting whether a remote search failed
    pub async fn lookup(&self, query: &Query) -> Lookup {
        if let Some(candidates) = self.resolve_local(query) {
            return Lookup {
                candidates,
                failed: false,
            };
        }

        debug!(query = %query.text(), limit = self.limit, "Searching places");

        match self.geocoder.search(query.text(), self.limit).await {
            Ok(locations) => {
                let candidates: CandidateList = locations
                    .into_iter()
                    .filter_map(Candidate::fetched)
                    .take(self.limit)
                    .collect();
                debug!(query = %query.text(), count = candidates.len(), "Place search finished");
                Lookup {
                    candidates,
                    failed: false,
                }
            }
            Err(e) => {
                warn!(query = %query.text(), error = %e, "Place search failed");
                Lookup {
                    candidates: Vec::new(),
                    failed: true,
                }
            }
        }
    }

    /// Resolve a query into candidates; failures yield an empty list
    pub async fn resolve(&self, query: &Query) -> CandidateList {
        self.lookup(query).await.candidates
    }
}

/// Identifies one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Tracks which issued query is the latest
#[derive(Debug, Default)]
pub struct Staleness {
    latest: u64,
}

impl Staleness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new query, superseding all earlier ones
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Supersede every outstanding ticket without issuing a new one
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
