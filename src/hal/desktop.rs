//! Desktop host implementations (requires `std`).
//!
//! - [`LocalClock`]: the system wall clock in the local timezone, via `chrono`
//! - [`TerminalDisplay`]: rewrites a single terminal line in place
//! - [`TerminalDocument`]: resolves named terminal displays

use std::io::{self, Stdout, Write};

use chrono::{Local, NaiveTime, Timelike};

use crate::format::TimeOfDay;
use crate::traits::{DisplayResolver, TextDisplay, TimeError, WallClock};

impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        TimeOfDay::new(time.hour(), time.minute(), time.second())
    }
}

/// System wall clock in the host's local timezone.
///
/// # Example
///
/// ```rust
/// use rs_digiclock::hal::LocalClock;
/// use rs_digiclock::traits::WallClock;
///
/// let now = LocalClock::new().now().unwrap();
/// assert!(now.is_valid());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl LocalClock {
    /// Creates a local clock.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl WallClock for LocalClock {
    type Error = TimeError;

    fn now(&self) -> Result<TimeOfDay, TimeError> {
        Ok(Local::now().time().into())
    }
}

/// Terminal line display.
///
/// Each write returns the cursor to the start of the line and overwrites it,
/// so the clock ticks in place.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl TerminalDisplay<Stdout> {
    /// Display on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextDisplay for TerminalDisplay<W> {
    type Error = io::Error;

    fn set_text(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "\r{}", text)?;
        self.out.flush()
    }
}

/// Resolves terminal displays by id.
///
/// Only ids registered with [`with_element`](Self::with_element) resolve.
///
/// ```rust
/// use rs_digiclock::hal::TerminalDocument;
/// use rs_digiclock::traits::DisplayResolver;
///
/// let mut document = TerminalDocument::new().with_element("digital-clock");
/// assert!(document.resolve("digital-clock").is_some());
/// assert!(document.resolve("other").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TerminalDocument {
    elements: Vec<String>,
}

impl TerminalDocument {
    /// Creates a document with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element id.
    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.push(id.to_string());
        self
    }
}

impl DisplayResolver for TerminalDocument {
    type Display = TerminalDisplay<Stdout>;

    fn resolve(&mut self, id: &str) -> Option<Self::Display> {
        self.elements
            .iter()
            .any(|element| element == id)
            .then(TerminalDisplay::stdout)
    }
}
