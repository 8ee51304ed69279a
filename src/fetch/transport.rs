//! Transport seam between the orchestrator and the search endpoint.

use crate::model::{FetchError, PageResult, QueryState};
use async_trait::async_trait;
use std::sync::Arc;

/// Performs one remote search for a query snapshot.
///
/// Implementations own timeouts and connection handling. A transport does not
/// know about tickets; stale results are filtered by the orchestrator.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Fetch the page described by `query`.
    async fn fetch_page(&self, query: &QueryState) -> Result<PageResult, FetchError>;
}

/// Shared handle to a transport.
pub type SharedTransport = Arc<dyn SearchTransport>;
