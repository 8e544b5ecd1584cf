//! # rs-digiclock
//!
//! A digital `HH:MM:SS` clock controller that runs against any host: a
//! terminal, an embedded display, a web page, or deterministic test mocks.
//!
//! ## Features
//!
//! - **Host abstraction**: Traits for the display, the wall clock, and the timer
//! - **One timer, always**: Starting again cancels the previous registration
//! - **Never throws**: Time failures render `00:00:00`, missing displays make the clock inert
//! - **Visibility refresh**: Coming back on screen re-renders immediately
//!
//! ## Architecture
//!
//! - `traits` - Host abstractions
//! - `format` - Unit padding and `HH:MM:SS` rendering
//! - `clock` - The controller that ties everything together
//! - `config` - Display id, tick interval, log level
//! - `hal` - Concrete hosts (mock for testing, desktop for the terminal)
//! - `services` - Tokio runtime (requires `runtime` feature)
//!
//! ## Example
//!
//! ```rust
//! use rs_digiclock::{
//!     ClockController,
//!     hal::{MockDocument, MockScheduler, MockWallClock},
//! };
//!
//! let mut document = MockDocument::new().with_element("digital-clock");
//! let mut clock = ClockController::new(
//!     &mut document,
//!     MockWallClock::at(23, 0, 0),
//!     MockScheduler::new(),
//! );
//!
//! clock.initialize();
//! assert_eq!(clock.display().unwrap().text(), "23:00:00");
//! assert!(clock.is_running());
//!
//! clock.stop();
//! assert!(!clock.is_running());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// The clock controller, its events, and state snapshots.
pub mod clock;
/// Time-unit and `HH:MM:SS` formatting.
pub mod format;
/// Host implementations: mocks for testing, desktop for the terminal.
pub mod hal;
/// Host collaborator traits.
pub mod traits;

/// Shared configuration.
pub mod config;

/// Async host services (feature-gated).
#[cfg(feature = "runtime")]
pub mod services;

// Re-exports for convenience
pub use clock::{ClockCommand, ClockController, ClockEvent, ClockState};
pub use format::{format_unit, TimeOfDay, TimeString, FALLBACK_TIME};
pub use traits::{
    DisplayResolver, Scheduler, TextDisplay, TimeError, TimerId, Visibility, WallClock,
};

// Config re-exports
pub use config::{ClockConfig, Config, LogConfig};
