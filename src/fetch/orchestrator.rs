//! Ticketed request issuing with last-issued-wins delivery.
//!
//! Every [`FetchOrchestrator::issue`] call allocates a fresh ticket *before*
//! anything suspends and records it as the latest outstanding one. When the
//! transport returns, the result is delivered only if its ticket is still the
//! latest; otherwise it is dropped as [`FetchOutcome::Superseded`]. A slow
//! answer to an old query therefore never overwrites a newer one, whatever
//! order the responses arrive in.

use super::transport::SharedTransport;
use crate::model::{FetchError, PageResult, QueryState};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sentinel for "no outstanding ticket". Real tickets start at 1.
const NO_TICKET: u64 = 0;

/// Correlation token for one issued request. Never leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket(u64);

/// Settled request as seen by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// This request is still the latest one; its result is current.
    Delivered {
        /// The snapshot the request was issued for.
        query: QueryState,
        /// The page, or why there is none.
        result: Result<PageResult, FetchError>,
    },
    /// A newer request was issued after this one; the result was discarded.
    Superseded,
}

impl FetchOutcome {
    /// Whether this outcome carries a result.
    pub fn is_delivered(&self) -> bool {
        matches!(self, FetchOutcome::Delivered { .. })
    }
}

/// Future returned by [`FetchOrchestrator::issue`].
pub type PendingFetch = Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'static>>;

/// Issues searches and filters out stale results.
///
/// Owns the only piece of shared mutable state in the controller: the latest
/// outstanding ticket.
pub struct FetchOrchestrator {
    transport: SharedTransport,
    next_ticket: AtomicU64,
    latest: Arc<AtomicU64>,
}

impl FetchOrchestrator {
    /// Create an orchestrator over a transport.
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            transport,
            next_ticket: AtomicU64::new(1),
            latest: Arc::new(AtomicU64::new(NO_TICKET)),
        }
    }

    /// Issue a request for `query`.
    ///
    /// The ticket is allocated now, so call order defines which request wins
    /// even if the returned futures are polled in a different order.
    pub fn issue(&self, query: QueryState) -> PendingFetch {
        let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        self.latest.store(ticket.0, Ordering::SeqCst);
        debug!(ticket = ticket.0, page = query.page(), search = query.search(), "issued fetch");

        let transport = Arc::clone(&self.transport);
        let latest = Arc::clone(&self.latest);

        Box::pin(async move {
            let result = transport.fetch_page(&query).await;

            // Clear the ticket only if it is still ours.
            let current = latest.compare_exchange(
                ticket.0,
                NO_TICKET,
                Ordering::SeqCst,
                Ordering::SeqCst,
            );
            if current.is_err() {
                debug!(ticket = ticket.0, "discarded superseded fetch");
                return FetchOutcome::Superseded;
            }

            if let Err(err) = &result {
                warn!(ticket = ticket.0, error = %err, "fetch failed");
            }
            FetchOutcome::Delivered { query, result }
        })
    }

    /// Issue a request and wait for it to settle.
    pub async fn request(&self, query: QueryState) -> FetchOutcome {
        self.issue(query).await
    }

    /// Whether a request is issued and not yet delivered.
    pub fn has_outstanding(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != NO_TICKET
    }
}

impl std::fmt::Debug for FetchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOrchestrator")
            .field("has_outstanding", &self.has_outstanding())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
