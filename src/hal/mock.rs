//! Mock implementations for testing without a real host.
//!
//! This module provides test doubles for every host trait, so the clock can
//! be driven deterministically: time only moves when a test moves it.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockDisplay`] | [`TextDisplay`] | Records every write |
//! | [`MockDocument`] | [`DisplayResolver`] | Registered element ids |
//! | [`MockWallClock`] | [`WallClock`] | Settable, advanceable, failable time |
//! | [`MockScheduler`] | [`Scheduler`] | Virtual-time repeating timers |
//!
//! # Example
//!
//! ```rust
//! use rs_digiclock::ClockController;
//! use rs_digiclock::hal::{MockDocument, MockScheduler, MockWallClock};
//!
//! let mut document = MockDocument::new().with_element("digital-clock");
//! let mut clock = ClockController::new(
//!     &mut document,
//!     MockWallClock::at(23, 59, 58),
//!     MockScheduler::new(),
//! );
//! clock.initialize();
//!
//! for _ in 0..3 {
//!     clock.clock_mut().advance(1000);
//!     for id in clock.scheduler_mut().advance(1000) {
//!         clock.on_timer(id);
//!     }
//! }
//!
//! let writes = &clock.display().unwrap().writes;
//! assert_eq!(writes, &["23:59:58", "23:59:59", "00:00:00", "00:00:01"]);
//! ```
//!
//! [`TextDisplay`]: crate::traits::TextDisplay
//! [`DisplayResolver`]: crate::traits::DisplayResolver
//! [`WallClock`]: crate::traits::WallClock
//! [`Scheduler`]: crate::traits::Scheduler

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::format::TimeOfDay;
use crate::traits::{DisplayResolver, Scheduler, TextDisplay, TimeError, TimerId, WallClock};

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

// ============================================================================
// Display Mocks
// ============================================================================

/// Error returned by a [`MockDisplay`] that rejects writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockDisplayError;

/// Mock display for testing.
///
/// Records every successful write in order. Set `reject_writes` to simulate a
/// surface that fails.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::hal::MockDisplay;
/// use rs_digiclock::traits::TextDisplay;
///
/// let mut display = MockDisplay::new();
/// display.set_text("12:00:00").unwrap();
/// display.set_text("12:00:01").unwrap();
///
/// assert_eq!(display.text(), "12:00:01");
/// assert_eq!(display.writes.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// Every successful write, oldest first.
    pub writes: Vec<String>,
    /// Number of rejected writes.
    pub failed_writes: usize,
    /// When true, `set_text` fails.
    pub reject_writes: bool,
}

impl MockDisplay {
    /// Creates a display with no writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a display that rejects every write.
    pub fn broken() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Current text content (empty before the first write).
    pub fn text(&self) -> &str {
        self.writes.last().map(String::as_str).unwrap_or("")
    }
}

impl TextDisplay for MockDisplay {
    type Error = MockDisplayError;

    fn set_text(&mut self, text: &str) -> Result<(), MockDisplayError> {
        if self.reject_writes {
            self.failed_writes += 1;
            return Err(MockDisplayError);
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// Mock document that hands out [`MockDisplay`]s for registered ids.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::hal::MockDocument;
/// use rs_digiclock::traits::DisplayResolver;
///
/// let mut document = MockDocument::new().with_element("digital-clock");
///
/// assert!(document.resolve("digital-clock").is_some());
/// assert!(document.resolve("missing").is_none());
/// assert_eq!(document.lookups(), ["digital-clock", "missing"]);
/// ```
#[derive(Debug, Default)]
pub struct MockDocument {
    elements: Vec<(String, bool)>,
    lookups: Vec<String>,
}

impl MockDocument {
    /// Creates a document with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element that accepts writes.
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.push((id.to_string(), false));
        self
    }

    /// Registers an element whose writes always fail.
    pub fn with_broken_element(mut self, id: &str) -> Self {
        self.elements.push((id.to_string(), true));
        self
    }

    /// Every id looked up so far, in order.
    pub fn lookups(&self) -> &[String] {
        &self.lookups
    }
}

impl DisplayResolver for MockDocument {
    type Display = MockDisplay;

    fn resolve(&mut self, id: &str) -> Option<MockDisplay> {
        self.lookups.push(id.to_string());
        self.elements
            .iter()
            .find(|(element, _)| element == id)
            .map(|(_, broken)| {
                if *broken {
                    MockDisplay::broken()
                } else {
                    MockDisplay::new()
                }
            })
    }
}

// ============================================================================
// Time Mocks
// ============================================================================

/// Mock wall clock for testing.
///
/// Keeps milliseconds since midnight, wrapping at 24 hours. A reading can be
/// pinned to an arbitrary (even invalid) [`TimeOfDay`], or the clock can be
/// made to fail.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::hal::MockWallClock;
/// use rs_digiclock::traits::{TimeError, WallClock};
/// use rs_digiclock::format::TimeOfDay;
///
/// let mut clock = MockWallClock::at(9, 5, 3);
/// clock.advance(500);
/// assert_eq!(clock.now(), Ok(TimeOfDay::new(9, 5, 3)));
///
/// clock.advance(500);
/// assert_eq!(clock.now(), Ok(TimeOfDay::new(9, 5, 4)));
///
/// clock.set_failing(true);
/// assert_eq!(clock.now(), Err(TimeError::Unavailable));
/// ```
#[derive(Debug, Default)]
pub struct MockWallClock {
    millis_of_day: u64,
    pinned: Option<TimeOfDay>,
    failing: bool,
}

impl MockWallClock {
    /// Creates a clock at midnight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at the given time.
    pub fn at(hours: u32, minutes: u32, seconds: u32) -> Self {
        let mut clock = Self::new();
        clock.set(hours, minutes, seconds);
        clock
    }

    /// Moves to the given time (wrapping at 24 hours) and clears any pinned reading.
    pub fn set(&mut self, hours: u32, minutes: u32, seconds: u32) {
        let seconds = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
        self.millis_of_day = (seconds * 1000) % MILLIS_PER_DAY;
        self.pinned = None;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.millis_of_day = (self.millis_of_day + ms % MILLIS_PER_DAY) % MILLIS_PER_DAY;
    }

    /// Pins `now()` to a fixed reading until the next `set`.
    pub fn set_reading(&mut self, reading: TimeOfDay) {
        self.pinned = Some(reading);
    }

    /// Makes `now()` fail with [`TimeError::Unavailable`].
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Milliseconds since midnight.
    pub fn millis_of_day(&self) -> u64 {
        self.millis_of_day
    }
}

impl WallClock for MockWallClock {
    type Error = TimeError;

    fn now(&self) -> Result<TimeOfDay, TimeError> {
        if self.failing {
            return Err(TimeError::Unavailable);
        }
        Ok(self
            .pinned
            .unwrap_or_else(|| TimeOfDay::from_seconds_of_day(self.millis_of_day / 1000)))
    }
}

// ============================================================================
// Scheduler Mock
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct MockTimer {
    id: TimerId,
    interval_ms: u64,
    next_fire_ms: u64,
}

/// Mock scheduler running on virtual time.
///
/// Nothing fires until [`advance`](Self::advance) is called; it returns the
/// firings in chronological order for the test to deliver.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::hal::MockScheduler;
/// use rs_digiclock::traits::Scheduler;
///
/// let mut scheduler = MockScheduler::new();
/// let slow = scheduler.schedule_repeating(1000);
/// let fast = scheduler.schedule_repeating(400);
///
/// assert_eq!(scheduler.advance(1000), vec![fast, fast, slow]);
/// assert_eq!(scheduler.active_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockScheduler {
    now_ms: u64,
    next_id: u32,
    timers: Vec<MockTimer>,
    started: usize,
    cancelled: usize,
}

impl MockScheduler {
    /// Creates a scheduler at virtual time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances virtual time, returning every firing in order.
    ///
    /// Timers due at the same instant fire in registration order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let target = self.now_ms + ms;
        let mut fired = Vec::new();

        loop {
            let next = self
                .timers
                .iter_mut()
                .filter(|t| t.next_fire_ms <= target)
                .min_by_key(|t| (t.next_fire_ms, t.id));
            let Some(timer) = next else {
                break;
            };
            self.now_ms = timer.next_fire_ms;
            timer.next_fire_ms += timer.interval_ms;
            fired.push(timer.id);
        }

        self.now_ms = target;
        fired
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live registrations.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// True if `id` is registered and not cancelled.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Total registrations ever made.
    pub fn started(&self) -> usize {
        self.started
    }

    /// Total cancellations of live registrations.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for MockScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.started += 1;

        let interval_ms = u64::from(interval_ms.max(1));
        self.timers.push(MockTimer {
            id,
            interval_ms,
            next_fire_ms: self.now_ms + interval_ms,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        if self.timers.len() != before {
            self.cancelled += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
