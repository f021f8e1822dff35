//! Autoplay scheduling.
//!
//! Autoplay holds at most one interval. Whenever the conditions change the
//! carousel calls [`Autoplay::reconcile`], which starts or stops that interval
//! so it exists exactly while autoplay may run. Suspension therefore cancels
//! the interval, and resuming starts a fresh full period.

use std::time::Duration;

use crate::timer::{TimerDriver, TimerToken};

/// Snapshot of everything that can hold autoplay back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AutoplayGate {
    /// Number of slides.
    pub slide_count: usize,
    /// The user prefers reduced motion.
    pub reduced_motion: bool,
    /// The pointer hovers the carousel.
    pub hovered: bool,
    /// A pointer is pressed on the track.
    pub pointer_down: bool,
    /// Focus is inside the carousel.
    pub focused: bool,
}

/// Autoplay settings and the interval it currently holds.
#[derive(Debug, Clone)]
pub struct Autoplay {
    enabled: bool,
    pause_on_hover: bool,
    interval: Duration,
    token: Option<TimerToken>,
}

impl Autoplay {
    /// Create an autoplay controller. Nothing is scheduled until the first
    /// [`reconcile`](Self::reconcile).
    #[must_use]
    pub const fn new(enabled: bool, interval: Duration, pause_on_hover: bool) -> Self {
        Self {
            enabled,
            pause_on_hover,
            interval,
            token: None,
        }
    }

    /// Whether autoplay may run under `gate`.
    #[must_use]
    pub const fn may_run(&self, gate: &AutoplayGate) -> bool {
        if !self.enabled || gate.reduced_motion || gate.slide_count < 2 {
            return false;
        }
        let suspended = (self.pause_on_hover && gate.hovered) || gate.pointer_down || gate.focused;
        !suspended
    }

    /// Start or stop the interval to match `gate`.
    pub fn reconcile<D: TimerDriver>(&mut self, timers: &mut D, gate: &AutoplayGate) {
        match (self.may_run(gate), self.token) {
            (true, None) => {
                let token = timers.start_interval(self.interval);
                tracing::debug!(%token, interval = ?self.interval, "Autoplay started");
                self.token = Some(token);
            }
            (false, Some(_)) => self.stop(timers),
            _ => {}
        }
    }

    /// Drop the current interval and start a fresh one if allowed.
    pub fn restart<D: TimerDriver>(&mut self, timers: &mut D, gate: &AutoplayGate) {
        if let Some(token) = self.token.take() {
            timers.cancel(token);
        }
        self.reconcile(timers, gate);
    }

    /// Cancel the interval if one is held.
    pub fn stop<D: TimerDriver>(&mut self, timers: &mut D) {
        if let Some(token) = self.token.take() {
            timers.cancel(token);
            tracing::debug!(%token, "Autoplay stopped");
        }
    }

    /// Whether `token` is the interval autoplay holds.
    #[must_use]
    pub fn owns(&self, token: TimerToken) -> bool {
        self.token == Some(token)
    }

    /// Whether an interval is currently scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.token.is_some()
    }
}
