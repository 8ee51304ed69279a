//! Search requests (impure edge).
//!
//! - [`SearchTransport`]: the remote call, implemented by [`HttpTransport`]
//! - [`FetchOrchestrator`]: tickets and last-issued-wins delivery

pub mod http;
pub mod orchestrator;
pub mod transport;

pub use http::HttpTransport;
pub use orchestrator::{FetchOrchestrator, FetchOutcome, PendingFetch};
pub use transport::{SearchTransport, SharedTransport};
