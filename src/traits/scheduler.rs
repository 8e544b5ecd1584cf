//! Recurring timer host.
//!
//! The clock never sleeps or spins; it registers a repeating timer with the
//! host and the host delivers each firing back as
//! [`ClockController::on_timer`](crate::ClockController::on_timer) with the
//! id it handed out. Firings carrying any other id are ignored, so a
//! cancelled registration can never render.

use core::fmt;

/// Opaque handle for one repeating timer registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerId(pub u32);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Periodic timer registration API.
///
/// # Implementation Notes
///
/// - Firings are approximate; drift is neither reported nor corrected
/// - The first firing happens one full interval after registration
/// - `cancel` must tolerate ids that are unknown or already cancelled
///
/// # Example
///
/// ```rust
/// use rs_digiclock::traits::Scheduler;
/// use rs_digiclock::hal::MockScheduler;
///
/// let mut scheduler = MockScheduler::new();
/// let id = scheduler.schedule_repeating(1000);
///
/// assert_eq!(scheduler.advance(2500), vec![id, id]);
///
/// scheduler.cancel(id);
/// assert!(scheduler.advance(5000).is_empty());
/// ```
pub trait Scheduler {
    /// Registers a timer firing every `interval_ms` milliseconds.
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerId;

    /// Cancels a registration. No-op for unknown ids.
    fn cancel(&mut self, id: TimerId);
}
