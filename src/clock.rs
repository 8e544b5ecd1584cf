//! The clock controller.
//!
//! This module provides [`ClockController`], which owns the display handle
//! and the single repeating timer, and renders `HH:MM:SS` on every tick.
//!
//! # Overview
//!
//! The controller:
//! - Resolves its display once, at construction
//! - Renders immediately on [`initialize`](ClockController::initialize), then
//!   once per timer firing
//! - Renders once extra when the host becomes visible again
//! - Never propagates an error: failures are logged and replaced with
//!   [`FALLBACK_TIME`]
//!
//! The host delivers its callbacks as plain method calls, so the controller is
//! a single-threaded state machine with no locks.
//!
//! # Example
//!
//! ```rust
//! use rs_digiclock::{
//!     ClockController, Visibility,
//!     hal::{MockDocument, MockScheduler, MockWallClock},
//! };
//!
//! let mut document = MockDocument::new().with_element("digital-clock");
//! let mut clock = ClockController::new(
//!     &mut document,
//!     MockWallClock::at(9, 5, 3),
//!     MockScheduler::new(),
//! );
//!
//! clock.initialize();
//! assert_eq!(clock.display().unwrap().text(), "09:05:03");
//!
//! // The host advances its timers and hands the firings back
//! clock.clock_mut().advance(1000);
//! for id in clock.scheduler_mut().advance(1000) {
//!     clock.on_timer(id);
//! }
//! assert_eq!(clock.display().unwrap().text(), "09:05:04");
//!
//! // Coming back on screen renders without waiting for the next tick
//! clock.on_visibility_change(Visibility::Hidden);
//! clock.on_visibility_change(Visibility::Visible);
//! assert_eq!(clock.display().unwrap().writes.len(), 3);
//! ```

use log::{debug, error, trace, warn};

use crate::config::ClockConfig;
use crate::format::{fallback_time, TimeString, FALLBACK_TIME};
use crate::traits::{DisplayResolver, Scheduler, TextDisplay, TimerId, Visibility, WallClock};

/// Explicit control requests for a running clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ClockCommand {
    /// (Re)acquire the repeating timer.
    Start,
    /// Cancel the repeating timer.
    Stop,
    /// Stop, render once, start.
    Restart,
    /// Render once without touching the timer.
    Render,
}

impl ClockCommand {
    /// Returns the command as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClockCommand::Start => "start",
            ClockCommand::Stop => "stop",
            ClockCommand::Restart => "restart",
            ClockCommand::Render => "render",
        }
    }

    /// Parse a command from text input (trimmed, case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_digiclock::ClockCommand;
    ///
    /// assert_eq!(ClockCommand::from_text("restart"), Some(ClockCommand::Restart));
    /// assert_eq!(ClockCommand::from_text(" Stop\n"), Some(ClockCommand::Stop));
    /// assert_eq!(ClockCommand::from_text("pause"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        [
            ClockCommand::Start,
            ClockCommand::Stop,
            ClockCommand::Restart,
            ClockCommand::Render,
        ]
        .into_iter()
        .find(|cmd| s.eq_ignore_ascii_case(cmd.as_str()))
    }
}

/// Everything a host can deliver to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    /// A repeating timer fired.
    Tick(TimerId),
    /// The host reported a visibility transition.
    VisibilityChanged(Visibility),
    /// An explicit control request.
    Command(ClockCommand),
}

impl From<ClockCommand> for ClockEvent {
    fn from(cmd: ClockCommand) -> Self {
        ClockEvent::Command(cmd)
    }
}

impl From<Visibility> for ClockEvent {
    fn from(visibility: Visibility) -> Self {
        ClockEvent::VisibilityChanged(visibility)
    }
}

/// Digital clock controller.
///
/// # Type Parameters
///
/// - `D`: The display handle ([`TextDisplay`])
/// - `C`: The wall-clock source ([`WallClock`])
/// - `S`: The timer host ([`Scheduler`])
///
/// # Invariants
///
/// - At most one repeating timer is owned at any time
/// - A controller without a display never renders and never owns a timer
pub struct ClockController<D: TextDisplay, C: WallClock, S: Scheduler> {
    display: Option<D>,
    clock: C,
    scheduler: S,
    timer: Option<TimerId>,
    interval_ms: u32,
    visibility: Visibility,
    initialized: bool,
    last_rendered: Option<TimeString>,
    render_count: u32,
}

impl<D: TextDisplay, C: WallClock, S: Scheduler> ClockController<D, C, S> {
    /// Create a controller rendering into the default `"digital-clock"` display.
    pub fn new<R>(resolver: &mut R, clock: C, scheduler: S) -> Self
    where
        R: DisplayResolver<Display = D>,
    {
        Self::with_config(&ClockConfig::default(), resolver, clock, scheduler)
    }

    /// Create a controller from explicit configuration.
    ///
    /// The display is resolved here and never again.
    pub fn with_config<R>(config: &ClockConfig, resolver: &mut R, clock: C, scheduler: S) -> Self
    where
        R: DisplayResolver<Display = D>,
    {
        let display = resolver.resolve(config.display_id.as_str());
        if display.is_none() {
            error!(
                "clock display '{}' not found; clock is inert",
                config.display_id
            );
        }

        Self {
            display,
            clock,
            scheduler,
            timer: None,
            interval_ms: config.interval_ms.max(1),
            visibility: Visibility::Visible,
            initialized: false,
            last_rendered: None,
            render_count: 0,
        }
    }

    /// Host entry point: render once and start ticking.
    ///
    /// Meant to be called exactly once, after the host is ready. Further calls
    /// are ignored. Does nothing on an inert controller.
    pub fn initialize(&mut self) {
        if self.initialized {
            warn!("clock already initialized");
            return;
        }
        self.initialized = true;

        if self.display.is_none() {
            debug!("clock has no display; skipping initialization");
            return;
        }

        self.render();
        self.start();
    }

    /// The current local time as `HH:MM:SS`, or [`FALLBACK_TIME`] on failure.
    pub fn current_time_string(&self) -> TimeString {
        let reading = match self.clock.now() {
            Ok(reading) => reading,
            Err(e) => {
                error!("error reading current time: {:?}", e);
                return fallback_time();
            }
        };

        match reading.to_time_string() {
            Ok(text) => text,
            Err(e) => {
                error!("error formatting current time {:?}: {}", reading, e);
                fallback_time()
            }
        }
    }

    /// Write the current time into the display, if there is one.
    pub fn render(&mut self) {
        let text = self.current_time_string();

        let Some(display) = self.display.as_mut() else {
            return;
        };

        if let Err(e) = display.set_text(text.as_str()) {
            warn!("clock display write failed: {:?}", e);
            return;
        }

        trace!("rendered {}", text);
        self.render_count = self.render_count.wrapping_add(1);
        self.last_rendered = Some(text);
    }

    /// Acquire a fresh repeating timer, cancelling any owned one first.
    pub fn start(&mut self) {
        if self.display.is_none() {
            debug!("clock has no display; not starting timer");
            return;
        }

        if let Some(old) = self.timer.take() {
            self.scheduler.cancel(old);
            debug!("cancelled {}", old);
        }

        let id = self.scheduler.schedule_repeating(self.interval_ms);
        debug!("started {} every {}ms", id, self.interval_ms);
        self.timer = Some(id);
    }

    /// Cancel the owned timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            debug!("stopped {}", id);
        }
    }

    /// Stop, render once, then start again.
    ///
    /// The display is fresh as soon as this returns.
    pub fn restart(&mut self) {
        self.stop();
        self.render();
        self.start();
    }

    /// Handle a timer firing delivered by the host.
    ///
    /// Renders only when `id` is the timer this controller currently owns.
    pub fn on_timer(&mut self, id: TimerId) {
        if self.timer == Some(id) {
            self.render();
        } else {
            trace!("ignoring stale {}", id);
        }
    }

    /// Handle a visibility transition reported by the host.
    ///
    /// A hidden-to-visible transition renders once immediately. The timer is
    /// left untouched.
    pub fn on_visibility_change(&mut self, visibility: Visibility) {
        let previous = self.visibility;
        self.visibility = visibility;

        if previous == Visibility::Hidden && visibility == Visibility::Visible {
            debug!("clock visible again; refreshing");
            self.render();
        }
    }

    /// Apply a control command.
    pub fn apply_command(&mut self, cmd: ClockCommand) {
        match cmd {
            ClockCommand::Start => self.start(),
            ClockCommand::Stop => self.stop(),
            ClockCommand::Restart => self.restart(),
            ClockCommand::Render => self.render(),
        }
    }

    /// Dispatch any host event.
    pub fn handle_event(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::Tick(id) => self.on_timer(id),
            ClockEvent::VisibilityChanged(visibility) => self.on_visibility_change(visibility),
            ClockEvent::Command(cmd) => self.apply_command(cmd),
        }
    }

    /// Snapshot for diagnostics and status endpoints.
    pub fn state(&self) -> ClockState {
        ClockState {
            running: self.timer.is_some(),
            display_attached: self.display.is_some(),
            visibility: self.visibility,
            last_rendered: self.last_rendered.clone(),
            render_count: self.render_count,
        }
    }

    /// The resolved display, if any.
    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    /// True when a display was resolved at construction.
    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// The currently owned timer, if any.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// True while a repeating timer is owned.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Last visibility reported by the host.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Refresh cadence in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// The wall-clock source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the wall-clock source.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The timer host.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the timer host.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Clock state snapshot.
///
/// `last_rendered` is `Some("00:00:00")` both at midnight and after a failed
/// time read; the two are not distinguished.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockState {
    /// A repeating timer is owned.
    pub running: bool,
    /// A display was resolved at construction.
    pub display_attached: bool,
    /// Last visibility reported by the host.
    pub visibility: Visibility,
    /// Text of the most recent successful write.
    pub last_rendered: Option<TimeString>,
    /// Number of successful writes.
    pub render_count: u32,
}

impl ClockState {
    /// True when the last write was `"00:00:00"`.
    ///
    /// Holds both at a real midnight and after a time failure.
    pub fn shows_midnight_text(&self) -> bool {
        self.last_rendered.as_deref() == Some(FALLBACK_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TimeOfDay;
    use crate::hal::{MockDocument, MockScheduler, MockWallClock};

    type TestClock = ClockController<crate::hal::MockDisplay, MockWallClock, MockScheduler>;

    fn clock_at(h: u32, m: u32, s: u32) -> TestClock {
        let mut document = MockDocument::new().with_element("digital-clock");
        ClockController::new(&mut document, MockWallClock::at(h, m, s), MockScheduler::new())
    }

    fn inert_clock() -> TestClock {
        let mut document = MockDocument::new();
        ClockController::new(&mut document, MockWallClock::at(1, 2, 3), MockScheduler::new())
    }

    // =========================================================================
    // ClockCommand
    // =========================================================================

    #[test]
    fn command_from_text() {
        assert_eq!(ClockCommand::from_text("start"), Some(ClockCommand::Start));
        assert_eq!(ClockCommand::from_text("STOP"), Some(ClockCommand::Stop));
        assert_eq!(ClockCommand::from_text(" restart "), Some(ClockCommand::Restart));
        assert_eq!(ClockCommand::from_text("render"), Some(ClockCommand::Render));
        assert_eq!(ClockCommand::from_text(""), None);
        assert_eq!(ClockCommand::from_text("go"), None);
    }

    #[test]
    fn event_conversions() {
        assert_eq!(
            ClockEvent::from(ClockCommand::Stop),
            ClockEvent::Command(ClockCommand::Stop)
        );
        assert_eq!(
            ClockEvent::from(Visibility::Hidden),
            ClockEvent::VisibilityChanged(Visibility::Hidden)
        );
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn resolves_default_display() {
        let clock = clock_at(0, 0, 0);
        assert!(clock.has_display());
        assert!(!clock.is_running());
        assert_eq!(clock.interval_ms(), 1000);
        assert_eq!(clock.visibility(), Visibility::Visible);
    }

    #[test]
    fn resolves_configured_display() {
        let mut document = MockDocument::new().with_element("lobby");
        let config = ClockConfig::default().with_display_id("lobby");
        let clock = ClockController::with_config(
            &config,
            &mut document,
            MockWallClock::at(0, 0, 0),
            MockScheduler::new(),
        );
        assert!(clock.has_display());
        assert_eq!(document.lookups(), ["lobby"]);
    }

    #[test]
    fn missing_display_is_inert() {
        let clock = inert_clock();
        assert!(!clock.has_display());
        assert!(clock.display().is_none());
    }

    // =========================================================================
    // current_time_string
    // =========================================================================

    #[test]
    fn current_time_string_examples() {
        assert_eq!(clock_at(9, 5, 3).current_time_string().as_str(), "09:05:03");
        assert_eq!(clock_at(23, 0, 0).current_time_string().as_str(), "23:00:00");
    }

    #[test]
    fn current_time_string_read_failure() {
        let mut clock = clock_at(12, 34, 56);
        clock.clock_mut().set_failing(true);
        assert_eq!(clock.current_time_string().as_str(), FALLBACK_TIME);
    }

    #[test]
    fn current_time_string_format_failure() {
        let mut clock = clock_at(12, 34, 56);
        clock.clock_mut().set_reading(TimeOfDay::new(123, 0, 0));
        assert_eq!(clock.current_time_string().as_str(), FALLBACK_TIME);
    }

    // =========================================================================
    // render
    // =========================================================================

    #[test]
    fn render_writes_display() {
        let mut clock = clock_at(7, 8, 9);
        clock.render();
        assert_eq!(clock.display().unwrap().text(), "07:08:09");
        assert_eq!(clock.state().render_count, 1);
    }

    #[test]
    fn render_is_idempotent() {
        let mut clock = clock_at(7, 8, 9);
        clock.render();
        clock.render();
        let display = clock.display().unwrap();
        assert_eq!(display.writes.len(), 2);
        assert_eq!(display.writes[0], display.writes[1]);
    }

    #[test]
    fn render_on_inert_does_nothing() {
        let mut clock = inert_clock();
        clock.render();
        assert_eq!(clock.state().render_count, 0);
        assert!(clock.state().last_rendered.is_none());
    }

    #[test]
    fn render_write_failure_is_swallowed() {
        let mut document = MockDocument::new().with_broken_element("digital-clock");
        let mut clock = ClockController::new(
            &mut document,
            MockWallClock::at(1, 1, 1),
            MockScheduler::new(),
        );
        clock.render();

        assert_eq!(clock.state().render_count, 0);
        assert!(clock.state().last_rendered.is_none());
        assert_eq!(clock.display().unwrap().failed_writes, 1);
    }

    // =========================================================================
    // Timer ownership
    // =========================================================================

    #[test]
    fn start_twice_owns_one_timer() {
        let mut clock = clock_at(0, 0, 0);
        clock.start();
        let first = clock.timer().unwrap();
        clock.start();
        let second = clock.timer().unwrap();

        assert_ne!(first, second);
        assert_eq!(clock.scheduler().active_count(), 1);
        assert!(!clock.scheduler().is_active(first));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut clock = clock_at(0, 0, 0);
        clock.stop();
        clock.start();
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert_eq!(clock.scheduler().active_count(), 0);
    }

    #[test]
    fn start_on_inert_does_nothing() {
        let mut clock = inert_clock();
        clock.start();
        assert!(!clock.is_running());
        assert_eq!(clock.scheduler().active_count(), 0);
    }

    #[test]
    fn stale_timer_ignored() {
        let mut clock = clock_at(0, 0, 0);
        clock.start();
        let stale = clock.timer().unwrap();
        clock.restart();
        let before = clock.state().render_count;

        clock.on_timer(stale);
        assert_eq!(clock.state().render_count, before);

        clock.on_timer(clock.timer().unwrap());
        assert_eq!(clock.state().render_count, before + 1);
    }

    // =========================================================================
    // initialize
    // =========================================================================

    #[test]
    fn initialize_renders_and_starts() {
        let mut clock = clock_at(10, 0, 0);
        clock.initialize();
        assert!(clock.is_running());
        assert_eq!(clock.display().unwrap().text(), "10:00:00");
    }

    #[test]
    fn initialize_twice_renders_once() {
        let mut clock = clock_at(10, 0, 0);
        clock.initialize();
        let timer = clock.timer();
        clock.initialize();
        assert_eq!(clock.state().render_count, 1);
        assert_eq!(clock.timer(), timer);
    }

    #[test]
    fn initialize_inert() {
        let mut clock = inert_clock();
        clock.initialize();
        assert!(!clock.is_running());
        assert_eq!(clock.scheduler().started(), 0);
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    #[test]
    fn visible_to_visible_does_not_render() {
        let mut clock = clock_at(0, 0, 0);
        clock.on_visibility_change(Visibility::Visible);
        assert_eq!(clock.state().render_count, 0);
    }

    #[test]
    fn hiding_does_not_render() {
        let mut clock = clock_at(0, 0, 0);
        clock.on_visibility_change(Visibility::Hidden);
        assert_eq!(clock.state().render_count, 0);
        assert_eq!(clock.state().visibility, Visibility::Hidden);
    }

    #[test]
    fn restoring_visibility_renders_once() {
        let mut clock = clock_at(0, 0, 0);
        clock.on_visibility_change(Visibility::Hidden);
        clock.on_visibility_change(Visibility::Visible);
        assert_eq!(clock.state().render_count, 1);
    }

    #[test]
    fn restoring_visibility_keeps_timer() {
        let mut clock = clock_at(0, 0, 0);
        clock.initialize();
        let timer = clock.timer();
        clock.on_visibility_change(Visibility::Hidden);
        clock.on_visibility_change(Visibility::Visible);
        assert_eq!(clock.timer(), timer);
        assert_eq!(clock.scheduler().started(), 1);
    }

    // =========================================================================
    // Events and state
    // =========================================================================

    #[test]
    fn handle_event_dispatch() {
        let mut clock = clock_at(0, 0, 0);
        clock.handle_event(ClockCommand::Start.into());
        assert!(clock.is_running());

        let id = clock.timer().unwrap();
        clock.handle_event(ClockEvent::Tick(id));
        assert_eq!(clock.state().render_count, 1);

        clock.handle_event(Visibility::Hidden.into());
        clock.handle_event(Visibility::Visible.into());
        assert_eq!(clock.state().render_count, 2);

        clock.handle_event(ClockCommand::Render.into());
        assert_eq!(clock.state().render_count, 3);

        clock.handle_event(ClockCommand::Stop.into());
        assert!(!clock.is_running());
    }

    #[test]
    fn state_snapshot() {
        let mut clock = clock_at(0, 0, 0);
        assert_eq!(
            clock.state(),
            ClockState {
                running: false,
                display_attached: true,
                visibility: Visibility::Visible,
                last_rendered: None,
                render_count: 0,
            }
        );

        clock.initialize();
        let state = clock.state();
        assert!(state.running);
        assert!(state.shows_midnight_text());
        assert_eq!(state.last_rendered.as_deref(), Some("00:00:00"));
    }
}
