//! Clock configuration.
//!
//! Uses `heapless::String` so the same types work in `no_std` hosts and on
//! desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_digiclock::config::{ClockConfig, Config, LogConfig};
//!
//! // Use defaults: element "digital-clock", one tick per second
//! let config = Config::default();
//! assert_eq!(config.clock.display_id.as_str(), "digital-clock");
//!
//! // Or customize
//! let config = Config::default()
//!     .with_clock(ClockConfig::default().with_display_id("lobby-clock"))
//!     .with_log(LogConfig::default().with_level("debug"));
//! ```

use core::str::FromStr;

use heapless::String as HString;
use log::LevelFilter;

/// Maximum length for config strings (identifiers, log levels)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Identifier of the display the clock renders into by default.
pub const DEFAULT_DISPLAY_ID: &str = "digital-clock";

/// Default refresh cadence in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Create a ShortString from a &str, truncating at a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut end = s.len().min(MAX_SHORT_STRING);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut hs = ShortString::new();
    let _ = hs.push_str(&s[..end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Clock controller configuration
    pub clock: ClockConfig,
    /// Diagnostics configuration
    pub log: LogConfig,
}

impl Config {
    /// Set clock configuration
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    /// Set log configuration
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

// ============================================================================
// Clock Config
// ============================================================================

/// Clock controller configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Identifier the display is resolved by
    pub display_id: ShortString,
    /// Refresh interval in milliseconds (never zero)
    pub interval_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            display_id: short_string(DEFAULT_DISPLAY_ID),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl ClockConfig {
    /// Set the display identifier
    pub fn with_display_id(mut self, id: &str) -> Self {
        self.display_id = short_string(id);
        self
    }

    /// Set the refresh interval, at least 1ms
    pub fn with_interval_ms(mut self, ms: u32) -> Self {
        self.interval_ms = ms.max(1);
        self
    }
}

// ============================================================================
// Log Config
// ============================================================================

/// Diagnostics configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogConfig {
    /// Log level name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: ShortString,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: short_string("info"),
        }
    }
}

impl LogConfig {
    /// Set the log level name
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = short_string(level);
        self
    }

    /// Parsed level, falling back to `Info` for unknown names
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.level.as_str()).unwrap_or(LevelFilter::Info)
    }
}

// ============================================================================
// Tests
// ============================================================================
