//! Tokio host for the clock controller.
//!
//! [`ClockService`] owns a [`ClockController`] and drives it from one task,
//! multiplexing:
//!
//! - timer firings from [`TokioScheduler`] (one spawned `interval` task per
//!   registration; cancelling aborts the task)
//! - visibility changes from a [`VisibilitySubscription`]
//! - commands sent through a [`ClockHandle`]
//! - a shutdown future
//!
//! # Example
//!
//! ```ignore
//! use rs_digiclock::hal::{LocalClock, TerminalDocument};
//! use rs_digiclock::services::{ClockService, VisibilityPublisher};
//!
//! let visibility = VisibilityPublisher::new();
//! let mut document = TerminalDocument::new().with_element("digital-clock");
//! let service = ClockService::new(&config.clock, &mut document, LocalClock::new());
//! let handle = service.handle();
//!
//! let subscription = visibility.subscribe();
//! service.run(subscription, tokio::signal::ctrl_c()).await;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use log::{debug, trace, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::{ClockCommand, ClockController, ClockEvent};
use crate::config::ClockConfig;
use crate::traits::{DisplayResolver, Scheduler, TextDisplay, TimerId, Visibility, WallClock};

/// Capacity of the visibility broadcast; slower subscribers skip ahead.
const VISIBILITY_CAPACITY: usize = 16;

// ============================================================================
// Scheduler
// ============================================================================

/// [`Scheduler`] backed by tokio timers.
///
/// Each registration spawns a task that sends its [`TimerId`] into a channel
/// every interval. Must be used from inside a tokio runtime.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
    next_id: u32,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its firings arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (ticks, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            ticks,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    /// Number of live timer tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, interval_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let period = Duration::from_millis(u64::from(interval_ms.max(1)));
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(id).is_err() {
                    // Receiver gone: the service has shut down.
                    break;
                }
            }
        });

        self.tasks.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ============================================================================
// Visibility
// ============================================================================

/// Source of host visibility transitions.
///
/// Consumers [`subscribe`](Self::subscribe) explicitly and
/// [`unsubscribe`](VisibilitySubscription::unsubscribe) when done.
#[derive(Clone)]
pub struct VisibilityPublisher {
    tx: broadcast::Sender<Visibility>,
}

impl VisibilityPublisher {
    /// Create a publisher with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(VISIBILITY_CAPACITY);
        Self { tx }
    }

    /// Report a visibility transition. Returns the number of subscribers reached.
    pub fn publish(&self, visibility: Visibility) -> usize {
        self.tx.send(visibility).unwrap_or(0)
    }

    /// Start receiving transitions published from now on.
    pub fn subscribe(&self) -> VisibilitySubscription {
        VisibilitySubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for VisibilityPublisher {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscription to a [`VisibilityPublisher`].
pub struct VisibilitySubscription {
    rx: broadcast::Receiver<Visibility>,
}

impl VisibilitySubscription {
    /// Next transition, or `None` once every publisher is gone.
    pub async fn recv(&mut self) -> Option<Visibility> {
        loop {
            match self.rx.recv().await {
                Ok(visibility) => return Some(visibility),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("visibility subscriber lagged; skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Stop receiving transitions.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

// ============================================================================
// Handle
// ============================================================================

/// Cloneable sender for controlling a running [`ClockService`].
///
/// All methods return `false` once the service has stopped.
#[derive(Clone)]
pub struct ClockHandle {
    tx: mpsc::UnboundedSender<ClockCommand>,
}

impl ClockHandle {
    /// Send any command.
    pub fn send(&self, cmd: ClockCommand) -> bool {
        self.tx.send(cmd).is_ok()
    }

    /// Acquire the repeating timer.
    pub fn start(&self) -> bool {
        self.send(ClockCommand::Start)
    }

    /// Cancel the repeating timer.
    pub fn stop(&self) -> bool {
        self.send(ClockCommand::Stop)
    }

    /// Stop, render, start.
    pub fn restart(&self) -> bool {
        self.send(ClockCommand::Restart)
    }

    /// Render once.
    pub fn render(&self) -> bool {
        self.send(ClockCommand::Render)
    }
}

// ============================================================================
// Service
// ============================================================================

/// A clock controller driven by tokio.
pub struct ClockService<D: TextDisplay, C: WallClock> {
    controller: ClockController<D, C, TokioScheduler>,
    ticks: mpsc::UnboundedReceiver<TimerId>,
    commands: mpsc::UnboundedReceiver<ClockCommand>,
    command_tx: mpsc::UnboundedSender<ClockCommand>,
}

impl<D: TextDisplay, C: WallClock> ClockService<D, C> {
    /// Build the controller, resolving its display through `resolver`.
    pub fn new<R>(config: &ClockConfig, resolver: &mut R, clock: C) -> Self
    where
        R: DisplayResolver<Display = D>,
    {
        let (scheduler, ticks) = TokioScheduler::new();
        let controller = ClockController::with_config(config, resolver, clock, scheduler);
        let (command_tx, commands) = mpsc::unbounded_channel();

        Self {
            controller,
            ticks,
            commands,
            command_tx,
        }
    }

    /// A handle for sending commands once the service runs.
    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            tx: self.command_tx.clone(),
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &ClockController<D, C, TokioScheduler> {
        &self.controller
    }

    /// Initialize the controller and process events until `shutdown` resolves.
    ///
    /// On exit the timer is stopped, the subscription is dropped, and the
    /// controller is handed back.
    pub async fn run<F>(
        self,
        mut visibility: VisibilitySubscription,
        shutdown: F,
    ) -> ClockController<D, C, TokioScheduler>
    where
        F: Future,
    {
        let Self {
            mut controller,
            mut ticks,
            mut commands,
            command_tx,
        } = self;
        // Only external handles keep the command channel open.
        drop(command_tx);

        let mut visibility_open = true;
        let mut commands_open = true;
        tokio::pin!(shutdown);

        controller.initialize();
        debug!("clock service running");

        loop {
            let event = tokio::select! {
                biased;
                _ = &mut shutdown => break,
                Some(id) = ticks.recv() => ClockEvent::Tick(id),
                cmd = commands.recv(), if commands_open => match cmd {
                    Some(cmd) => ClockEvent::Command(cmd),
                    None => {
                        commands_open = false;
                        continue;
                    }
                },
                change = visibility.recv(), if visibility_open => match change {
                    Some(v) => ClockEvent::VisibilityChanged(v),
                    None => {
                        debug!("visibility publisher closed");
                        visibility_open = false;
                        continue;
                    }
                },
            };
            trace!("clock event {:?}", event);
            controller.handle_event(event);
        }

        controller.stop();
        visibility.unsubscribe();
        debug!("clock service stopped");
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn scheduler_fires_after_interval() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let id = scheduler.schedule_repeating(1000);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv(), Ok(id));
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_cancel_stops_firings() {
        let (mut scheduler, mut rx) = TokioScheduler::new();
        let id = scheduler.schedule_repeating(100);
        assert_eq!(scheduler.active_count(), 1);

        scheduler.cancel(id);
        scheduler.cancel(id);
        assert_eq!(scheduler.active_count(), 0);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn visibility_publish_and_unsubscribe() {
        let publisher = VisibilityPublisher::new();
        assert_eq!(publisher.publish(Visibility::Hidden), 0);

        let mut sub = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);
        assert_eq!(publisher.publish(Visibility::Hidden), 1);
        assert_eq!(sub.recv().await, Some(Visibility::Hidden));

        sub.unsubscribe();
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn visibility_closed_when_publisher_dropped() {
        let publisher = VisibilityPublisher::new();
        let mut sub = publisher.subscribe();
        drop(publisher);
        assert_eq!(sub.recv().await, None);
    }
}
