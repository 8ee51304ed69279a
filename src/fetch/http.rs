//! `reqwest`-backed transport for the search endpoint.

use super::transport::SearchTransport;
use crate::model::{FetchError, PageResult, QueryState};
use crate::parser::parse_page;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// HTTP transport issuing `GET <endpoint>?search=..&category=..&page=..&per_page=..`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build a transport for `endpoint` with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns a `network` error if the endpoint is not an absolute URL or the
    /// client cannot be constructed.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FetchError::network(format!("invalid endpoint '{endpoint}': {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network(format!("failed to build http client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Full request URL for a query snapshot.
    pub fn request_url(&self, query: &QueryState) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(query.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn fetch_page(&self, query: &QueryState) -> Result<PageResult, FetchError> {
        let url = self.request_url(query);
        debug!(%url, "requesting page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::server(format!("status {}", status.as_u16())));
        }

        let body = response.bytes().await?;
        parse_page(&body)
    }
}
