//! Configuration file loading with precedence handling.

use crate::fetch::HttpTransport;
use crate::model::{Columns, PerPage, ViewMode};
use crate::runtime::{Timing, DEFAULT_ENTER, DEFAULT_LEAVE, DEFAULT_STAGGER};
use crate::state::ControllerConfig;
use crate::view_state::{Renderer, DEFAULT_DOWNLOAD_BASE, DEFAULT_ICON};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Search endpoint used when the config file names none.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/software";

/// Request timeout used when the config file names none.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Tracing level directive used when the config file names none.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A field parsed but holds a value the controller cannot use.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; missing fields fall back to built-in defaults.
/// Corresponds to `~/.config/shelfview/config.toml`:
///
/// ```toml
/// endpoint = "http://catalog.local/api/software"
/// animations = true
/// tag_filter_enabled = true
/// per_page = 12
/// columns = 4
/// view_mode = "list"
/// leave_ms = 150
/// enter_ms = 250
/// stagger_ms = 40
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Search endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Run leave/enter cues.
    #[serde(default)]
    pub animations: Option<bool>,

    /// Offer the tag filter.
    #[serde(default)]
    pub tag_filter_enabled: Option<bool>,

    /// Initial page size.
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Initial grid column count.
    #[serde(default)]
    pub columns: Option<u8>,

    /// Initial view mode, `"grid"` or `"list"`.
    #[serde(default)]
    pub view_mode: Option<String>,

    /// Leave cue duration in milliseconds.
    #[serde(default)]
    pub leave_ms: Option<u64>,

    /// Enter cue base duration in milliseconds.
    #[serde(default)]
    pub enter_ms: Option<u64>,

    /// Per-node reveal delay in milliseconds.
    #[serde(default)]
    pub stagger_ms: Option<u64>,

    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Root prepended to item download paths.
    #[serde(default)]
    pub download_base: Option<String>,

    /// Icon shown for items without one.
    #[serde(default)]
    pub default_icon: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Tracing level directive, e.g. `"debug"` or `"shelfview=trace"`.
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Values are stored as read; [`ResolvedConfig::controller_config`] validates
/// the ones the controller constrains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// Run leave/enter cues.
    pub animations: bool,
    /// Offer the tag filter.
    pub tag_filter_enabled: bool,
    /// Initial page size.
    pub per_page: u32,
    /// Initial grid column count.
    pub columns: u8,
    /// Initial view mode name.
    pub view_mode: String,
    /// Cue durations.
    pub timing: Timing,
    /// HTTP request timeout.
    pub request_timeout: Duration,
    /// Root prepended to item download paths.
    pub download_base: String,
    /// Icon shown for items without one.
    pub default_icon: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Tracing level directive.
    pub log_level: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            animations: true,
            tag_filter_enabled: false,
            per_page: PerPage::default().get(),
            columns: Columns::default().get(),
            view_mode: ViewMode::default().as_str().to_string(),
            timing: Timing::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            download_base: DEFAULT_DOWNLOAD_BASE.to_string(),
            default_icon: DEFAULT_ICON.to_string(),
            log_file_path: default_log_path(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Capability flags and initial query values for a controller.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when `per_page`, `columns` or
    /// `view_mode` is outside what the controller accepts.
    pub fn controller_config(&self) -> Result<ControllerConfig, ConfigError> {
        let invalid = |field: &'static str| {
            move |err: crate::model::ControllerError| ConfigError::InvalidValue {
                field,
                reason: err.to_string(),
            }
        };

        Ok(ControllerConfig {
            animations: self.animations,
            tag_filter_enabled: self.tag_filter_enabled,
            per_page: PerPage::new(self.per_page).map_err(invalid("per_page"))?,
            view_mode: ViewMode::parse(&self.view_mode).map_err(invalid("view_mode"))?,
            columns: Columns::new(self.columns).map_err(invalid("columns"))?,
            renderer: Renderer::new(self.default_icon.clone(), self.download_base.clone()),
        })
    }

    /// HTTP transport for the configured endpoint and timeout.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] when the endpoint is not an absolute URL.
    pub fn transport(&self) -> Result<HttpTransport, ConfigError> {
        HttpTransport::new(&self.endpoint, self.request_timeout).map_err(|err| {
            ConfigError::InvalidValue {
                field: "endpoint",
                reason: err.message().to_string(),
            }
        })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/shelfview/shelfview.log` on Linux, the platform
/// state directory elsewhere, or `shelfview.log` in the current directory when
/// none can be determined.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("shelfview").join("shelfview.log"),
        None => PathBuf::from("shelfview.log"),
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/shelfview/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shelfview").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument
/// 2. Default path `~/.config/shelfview/config.toml`
///
/// Missing config files are NOT errors.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match config_path.or_else(default_config_path) {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let millis = |value: Option<u64>, fallback: Duration| {
        value.map(Duration::from_millis).unwrap_or(fallback)
    };

    ResolvedConfig {
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        animations: config.animations.unwrap_or(defaults.animations),
        tag_filter_enabled: config
            .tag_filter_enabled
            .unwrap_or(defaults.tag_filter_enabled),
        per_page: config.per_page.unwrap_or(defaults.per_page),
        columns: config.columns.unwrap_or(defaults.columns),
        view_mode: config.view_mode.unwrap_or(defaults.view_mode),
        timing: Timing {
            leave: millis(config.leave_ms, DEFAULT_LEAVE),
            enter: millis(config.enter_ms, DEFAULT_ENTER),
            stagger_step: millis(config.stagger_ms, DEFAULT_STAGGER),
        },
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        download_base: config.download_base.unwrap_or(defaults.download_base),
        default_icon: config.default_icon.unwrap_or(defaults.default_icon),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        log_level: config.log_level.unwrap_or(defaults.log_level),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
