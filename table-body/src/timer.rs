//! Deferred effects: trailing-edge debounce and frame scheduling.
//!
//! Nothing here spawns tasks. Timers are plain deadlines owned by the
//! component and fired by polling with the current time, the same way the
//! event loop drives animations. [`sleep_until_optional`] lets an async
//! host wait for the next deadline.

use std::time::{Duration, Instant};

/// Trailing-edge debounce holding the most recent argument.
///
/// Each trigger replaces the pending argument and pushes the deadline to
/// `now + delay`; the argument is released once, after the window elapses
/// following the last trigger.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, superseding anything still pending.
    pub fn trigger(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Host frame-scheduling capability (`requestAnimationFrame` or similar).
pub trait FrameScheduler: Send + Sync {
    /// When a callback requested at `now` should run.
    fn next_frame(&self, now: Instant) -> Instant;
}

/// Fallback scheduler: a fixed delay standing in for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFrameTimer {
    pub interval: Duration,
}

impl FixedFrameTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedFrameTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl FrameScheduler for FixedFrameTimer {
    fn next_frame(&self, now: Instant) -> Instant {
        now + self.interval
    }
}

/// Earliest of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Sleep until the deadline, or forever when there is none.
pub async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}
