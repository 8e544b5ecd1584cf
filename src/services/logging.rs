//! `env_logger` setup from [`LogConfig`].
//!
//! The configured level is the baseline. Directives from the environment
//! (`RUST_LOG` by default) are applied on top and win for the targets they
//! name.

use env_logger::{Builder, Env};

use crate::config::LogConfig;

/// A logger builder at the configured level, overridden by `env`.
///
/// Unknown level names fall back to `info` rather than being read as a
/// module filter.
pub fn log_builder(config: &LogConfig, env: Env<'_>) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(config.level_filter());
    builder.parse_env(env);
    builder
}
