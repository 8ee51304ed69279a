//! Wiring from a config file to a running controller.
//!
//! These functions do the one-time setup around the pure core: resolve the
//! configuration, install logging, build the HTTP transport, and pair a
//! [`ControllerRuntime`] with its [`ControllerHandle`].

use crate::config::{load_config_with_precedence, merge_config, ResolvedConfig};
use crate::fetch::SharedTransport;
use crate::logging;
use crate::model::AppError;
use crate::runtime::{ControllerHandle, ControllerRuntime};
use crate::view::RenderTarget;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Resolve configuration from `config_path`, or the default path when `None`.
///
/// # Errors
///
/// [`AppError::Config`] when a config file exists but cannot be read or parsed.
pub fn load(config_path: Option<PathBuf>) -> Result<ResolvedConfig, AppError> {
    let file = load_config_with_precedence(config_path)?;
    Ok(merge_config(file))
}

/// Install file logging with the configured path and level.
///
/// # Errors
///
/// [`AppError::Logging`] when the subscriber cannot be installed.
pub fn init_logging(config: &ResolvedConfig) -> Result<(), AppError> {
    logging::init(&config.log_file_path, &config.log_level)?;
    info!(path = ?config.log_file_path, "logging initialized");
    Ok(())
}

/// Build a controller talking to the configured HTTP endpoint.
///
/// # Errors
///
/// [`AppError::Config`] when a configured value is out of range or the
/// endpoint is not an absolute URL.
pub fn connect<R>(
    config: &ResolvedConfig,
    target: R,
) -> Result<(ControllerHandle, ControllerRuntime<R>), AppError>
where
    R: RenderTarget,
{
    let transport: SharedTransport = Arc::new(config.transport()?);
    connect_with(config, transport, target)
}

/// Build a controller over any transport.
///
/// # Errors
///
/// [`AppError::Config`] when a configured value is out of range.
pub fn connect_with<R>(
    config: &ResolvedConfig,
    transport: SharedTransport,
    target: R,
) -> Result<(ControllerHandle, ControllerRuntime<R>), AppError>
where
    R: RenderTarget,
{
    let controller_config = config.controller_config()?;
    info!(
        endpoint = %config.endpoint,
        animations = controller_config.animations,
        "controller configured"
    );
    Ok(ControllerRuntime::new(
        controller_config,
        transport,
        target,
        config.timing,
    ))
}
