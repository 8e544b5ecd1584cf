//! Wall-clock time source.

use core::fmt;

use crate::format::TimeOfDay;

/// Errors on the time read/format path.
///
/// Neither variant ever leaves the clock controller; both are logged and
/// replaced with [`FALLBACK_TIME`](crate::format::FALLBACK_TIME).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeError {
    /// The host could not provide the current time.
    Unavailable,
    /// The reading did not fit the `HH:MM:SS` layout.
    Format,
}

impl TimeError {
    /// Returns the error as a short lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeError::Unavailable => "time unavailable",
            TimeError::Format => "time does not fit HH:MM:SS",
        }
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimeError {}

/// Source of the current local time of day.
///
/// Unlike a monotonic tick source, this is the host's wall clock in its local
/// timezone. There is no timezone parameter and no UTC option.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::traits::WallClock;
/// use rs_digiclock::hal::MockWallClock;
///
/// let clock = MockWallClock::at(9, 5, 3);
/// let now = clock.now().unwrap();
/// assert_eq!((now.hours, now.minutes, now.seconds), (9, 5, 3));
/// ```
pub trait WallClock {
    /// Error type for time reads.
    type Error: fmt::Debug;

    /// Reads the current local time of day.
    fn now(&self) -> Result<TimeOfDay, Self::Error>;
}
