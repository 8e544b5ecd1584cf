//! Time-of-day formatting.
//!
//! All formatting writes into fixed-capacity [`heapless::String`] buffers,
//! so the render path never allocates. The `HH:MM:SS` buffer is exactly
//! eight bytes: a reading whose units need more than two digits does not fit
//! and surfaces as [`TimeError::Format`].
//!
//! # Example
//!
//! ```rust
//! use rs_digiclock::format::{format_unit, TimeOfDay};
//!
//! assert_eq!(format_unit(3).as_str(), "03");
//! assert_eq!(format_unit(14).as_str(), "14");
//!
//! let time = TimeOfDay::new(9, 5, 3);
//! assert_eq!(time.to_time_string().unwrap().as_str(), "09:05:03");
//! ```

use core::fmt::{self, Write};

use heapless::String as HString;

use crate::traits::TimeError;

/// Capacity of a formatted unit; `u32::MAX` has ten digits.
pub const MAX_UNIT_DIGITS: usize = 10;

/// Length of a rendered `HH:MM:SS` string.
pub const TIME_STRING_LEN: usize = 8;

/// A single formatted time unit.
pub type UnitString = HString<MAX_UNIT_DIGITS>;

/// A rendered `HH:MM:SS` string.
pub type TimeString = HString<TIME_STRING_LEN>;

/// Text rendered when the time cannot be read or formatted.
///
/// Indistinguishable from a legitimate midnight reading.
pub const FALLBACK_TIME: &str = "00:00:00";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Zero-pads a time unit to width two.
///
/// No range validation: values with more than two digits are returned as-is.
///
/// # Examples
///
/// ```
/// use rs_digiclock::format::format_unit;
///
/// assert_eq!(format_unit(0).as_str(), "00");
/// assert_eq!(format_unit(9).as_str(), "09");
/// assert_eq!(format_unit(59).as_str(), "59");
/// assert_eq!(format_unit(123).as_str(), "123");
/// ```
pub fn format_unit(value: u32) -> UnitString {
    let mut out = UnitString::new();
    // Cannot overflow: the buffer holds every u32.
    let _ = write!(out, "{:02}", value);
    out
}

/// Returns [`FALLBACK_TIME`] as a [`TimeString`].
pub fn fallback_time() -> TimeString {
    let mut out = TimeString::new();
    let _ = out.push_str(FALLBACK_TIME);
    out
}

/// A wall-clock reading: hours, minutes and seconds in the local timezone.
///
/// Fields are public and unchecked; a misbehaving source may report values
/// outside 0-23 / 0-59. [`to_time_string`](Self::to_time_string) is where
/// such readings are caught.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    /// Hours, expected 0-23.
    pub hours: u32,
    /// Minutes, expected 0-59.
    pub minutes: u32,
    /// Seconds, expected 0-59.
    pub seconds: u32,
}

impl TimeOfDay {
    /// 00:00:00.
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    /// Creates a reading without validating it.
    #[inline]
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Builds a reading from seconds since midnight, wrapping at 24 hours.
    ///
    /// ```
    /// use rs_digiclock::format::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_seconds_of_day(3_723), TimeOfDay::new(1, 2, 3));
    /// assert_eq!(TimeOfDay::from_seconds_of_day(86_400), TimeOfDay::MIDNIGHT);
    /// ```
    pub const fn from_seconds_of_day(seconds: u64) -> Self {
        let s = seconds % SECONDS_PER_DAY;
        Self::new((s / 3600) as u32, ((s / 60) % 60) as u32, (s % 60) as u32)
    }

    /// Returns true when every unit is within its clock range.
    pub const fn is_valid(&self) -> bool {
        self.hours < 24 && self.minutes < 60 && self.seconds < 60
    }

    /// Renders the reading as `HH:MM:SS`.
    ///
    /// Returns [`TimeError::Format`] when a unit needs more than two digits.
    pub fn to_time_string(&self) -> Result<TimeString, TimeError> {
        let mut out = TimeString::new();
        write!(out, "{}", self).map_err(|_| TimeError::Format)?;
        Ok(out)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            format_unit(self.hours),
            format_unit(self.minutes),
            format_unit(self.seconds)
        )
    }
}
