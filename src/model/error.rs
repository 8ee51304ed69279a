//! Error types for shelfview.
//!
//! Errors are `thiserror` enums per concern, composed with `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`FetchError`] - a search request failed (network, server status, payload shape).
//!   Always recoverable: the controller renders a placeholder and keeps going.
//! - [`ControllerError`] - an input entry point was called with a value the
//!   controller cannot represent, or the controller has shut down.
//! - [`AppError`] - top-level wrapper for setup and rendering failures.

use std::fmt;
use thiserror::Error;

/// Top-level error for wiring a controller: configuration, logging, rendering.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// A render target failed to draw.
    #[error("Render error: {0}")]
    Render(#[from] crate::view::RenderError),

    /// An input was rejected.
    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),
}

// ===== FetchError =====

/// Failure category of a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Transport failure: unreachable endpoint, connection reset, timeout.
    Network,
    /// The endpoint answered with a non-success status.
    Server,
    /// The payload does not have the expected shape.
    Decode,
}

impl FetchErrorKind {
    /// Lowercase category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Network => "network",
            FetchErrorKind::Server => "server",
            FetchErrorKind::Decode => "decode",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search request that did not produce a page.
///
/// # Examples
///
/// ```
/// use shelfview::model::{FetchError, FetchErrorKind};
///
/// let err = FetchError::server("status 503");
/// assert_eq!(err.kind(), FetchErrorKind::Server);
/// assert_eq!(err.to_string(), "server error: status 503");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    /// Build an error of any kind.
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    /// Non-success response status.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Server, message)
    }

    /// Malformed payload.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, message)
    }

    /// Failure category.
    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    /// Human-readable detail.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::server(format!("status {}", status.as_u16()))
        } else {
            FetchError::network(err.to_string())
        }
    }
}

// ===== ControllerError =====

/// Rejected input or a controller that is no longer running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Page size outside the selector's choices.
    #[error("Unsupported page size {0} (expected one of 6, 9, 12, 24)")]
    InvalidPerPage(u32),

    /// Grid column count below the minimum.
    #[error("Unsupported column count {0} (minimum is 2)")]
    InvalidColumns(u8),

    /// View mode name not recognised.
    #[error("Unknown view mode '{0}'")]
    UnknownViewMode(String),

    /// `set_tag` called on a controller configured without tag filtering.
    #[error("Tag filtering is not enabled for this controller")]
    TagFilterDisabled,

    /// The controller's event loop has stopped.
    #[error("Controller is closed")]
    Closed,
}
