//! shelfview
//!
//! Race-safe view controller for a paginated software catalog search
//! endpoint.
//!
//! The crate follows a Pure Core / Impure Shell split:
//! - pure: [`model`], [`parser`], [`view_state`], [`state`]
//! - impure: [`fetch`] (HTTP), [`runtime`] (tokio event loop), [`view`]
//!   (render targets), [`config`], [`logging`]
//!
//! A typical embedding loads a [`config::ResolvedConfig`], calls
//! [`integration::connect`] with a render target, spawns
//! [`runtime::ControllerRuntime::run`], and drives the view through the
//! returned [`runtime::ControllerHandle`].

pub mod config;
pub mod fetch;
pub mod integration;
pub mod logging;
pub mod model;
pub mod parser;
pub mod runtime;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
