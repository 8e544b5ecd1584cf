//! Trait definitions for the clock's host collaborators.
//!
//! This module defines the seams that let the clock controller run against
//! any host: a browser page, a terminal, an embedded display, or the mocks
//! used in tests.
//!
//! # Submodules
//!
//! - `display`: Writable text surface and its lookup by identifier
//! - `time`: Local wall-clock source and the time-path error
//! - `scheduler`: Repeating timer registration and cancellation
//! - `visibility`: Host visibility states
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`TextDisplay`] | Overwrite the rendered text |
//! | [`DisplayResolver`] | Resolve the display once by id |
//! | [`WallClock`] | Current local time of day |
//! | [`Scheduler`] | Cancellable repeating timers |

pub mod display;
pub mod scheduler;
pub mod time;
pub mod visibility;

pub use display::*;
pub use scheduler::*;
pub use time::*;
pub use visibility::*;
