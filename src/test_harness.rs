//! Test doubles for controller scenarios.
//!
//! [`ScriptedTransport`] answers searches from a script keyed by search text,
//! with a per-route latency so tests can force responses to arrive out of
//! order under tokio's paused clock.

use crate::fetch::SearchTransport;
use crate::model::{FetchError, Item, PageResult, QueryState};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Canned answer for one search text.
#[derive(Debug, Clone)]
pub struct Route {
    pub latency: Duration,
    pub response: Result<PageResult, FetchError>,
}

/// Transport that replays scripted responses after a simulated latency.
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    fallback: Route,
    calls: Mutex<Vec<QueryState>>,
}

impl ScriptedTransport {
    /// Transport whose unscripted searches return `fallback` immediately.
    pub fn new(fallback: PageResult) -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            fallback: Route {
                latency: Duration::ZERO,
                response: Ok(fallback),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the answer for a search text.
    pub fn route(
        self,
        search: &str,
        latency_ms: u64,
        response: Result<PageResult, FetchError>,
    ) -> Self {
        self.routes.lock().unwrap().insert(
            search.to_string(),
            Route {
                latency: Duration::from_millis(latency_ms),
                response,
            },
        );
        self
    }

    /// Every query the transport has been asked for, in call order.
    pub fn calls(&self) -> Vec<QueryState> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn fetch_page(&self, query: &QueryState) -> Result<PageResult, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(query.search())
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        tokio::time::sleep(route.latency).await;
        route.response
    }
}

/// Item with only a name and a category.
pub fn item(name: &str) -> Item {
    Item {
        name: name.to_string(),
        version: Some("1.0".to_string()),
        category: Some("Utilities".to_string()),
        ..Item::default()
    }
}

/// Page holding the named items; `total` is the match count across pages.
pub fn page_of(names: &[&str], total: u64) -> PageResult {
    PageResult {
        items: names.iter().map(|n| item(n)).collect(),
        total,
        page: 1,
        per_page: 9,
    }
}
