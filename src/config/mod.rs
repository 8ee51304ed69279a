//! Configuration module.
//!
//! A TOML file supplies capability flags, initial view values, cue timings,
//! the endpoint and logging settings. Missing keys fall back to defaults.

pub mod loader;

pub use loader::{
    default_config_path, default_log_path, load_config_file, load_config_with_precedence,
    merge_config, ConfigError, ConfigFile, ResolvedConfig,
};
