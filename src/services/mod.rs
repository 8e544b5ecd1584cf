//! Async host services for the clock controller.
//!
//! - `runtime` feature: tokio-driven [`ClockService`] with cancellable
//!   timer tasks, a visibility broadcast, and a command handle, plus
//!   `env_logger` setup from [`LogConfig`](crate::config::LogConfig)
//!
//! The controller itself stays synchronous; the service owns it inside one
//! task and feeds it events, so no locking is needed.
//!
//! ```ignore
//! use rs_digiclock::services::{ClockService, VisibilityPublisher};
//!
//! let visibility = VisibilityPublisher::new();
//! let service = ClockService::new(&config.clock, &mut document, LocalClock::new());
//! let handle = service.handle();
//!
//! tokio::spawn(service.run(visibility.subscribe(), shutdown));
//! handle.restart();
//! ```

#[cfg(feature = "runtime")]
pub mod logging;
#[cfg(feature = "runtime")]
pub mod runtime;

#[cfg(feature = "runtime")]
pub use logging::log_builder;
#[cfg(feature = "runtime")]
pub use runtime::*;
