//! # Timer Capability
//!
//! The carousel never reads a clock. It asks a [`TimerDriver`] for a
//! recurring interval and is told when that interval fires. Hosts decide what
//! time means: the browser binding and the replay tool both use
//! [`ManualTimers`], advanced from `requestAnimationFrame` or from a script.

use std::fmt;
use std::time::Duration;

/// Handle to one scheduled interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Create a token from a raw id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of recurring timer callbacks.
///
/// The driver only schedules; delivering a fire to the carousel is the
/// host's job (see [`Carousel::on_timer`](crate::Carousel::on_timer)).
pub trait TimerDriver {
    /// Schedule a callback every `period`, first firing one full period from
    /// now.
    fn start_interval(&mut self, period: Duration) -> TimerToken;

    /// Stop an interval. Unknown or already cancelled tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy)]
struct PendingInterval {
    token: TimerToken,
    period: Duration,
    due: Duration,
}

/// Deterministic timer driver over virtual time.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_token: u64,
    pending: Vec<PendingInterval>,
}

impl ManualTimers {
    /// Create a driver at time zero with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of scheduled intervals.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether `token` is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    /// Time of the next fire, if anything is scheduled.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Advance time and collect the intervals that fell due, ordered by the
    /// time they first fell due.
    ///
    /// Each interval appears at most once however many periods the step
    /// covers; its next fire moves to the first period boundary after the
    /// new time.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerToken> {
        let until = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();
        for slot in self.pending.iter_mut().filter(|p| p.due <= until) {
            fired.push((slot.due, slot.token));
            slot.due = next_boundary_after(slot.due, slot.period, until);
        }
        self.now = until;
        fired.sort_unstable();
        fired.into_iter().map(|(_, token)| token).collect()
    }
}

/// First `due + k * period` (k >= 1) strictly after `until`.
fn next_boundary_after(due: Duration, period: Duration, until: Duration) -> Duration {
    let period_ns = period.as_nanos().max(1);
    let periods = (until - due).as_nanos() / period_ns + 1;
    let skip = period_ns.saturating_mul(periods);
    let skip = Duration::new(
        u64::try_from(skip / 1_000_000_000).unwrap_or(u64::MAX),
        u32::try_from(skip % 1_000_000_000).unwrap_or(0),
    );
    due.saturating_add(skip)
}

impl TimerDriver for ManualTimers {
    fn start_interval(&mut self, period: Duration) -> TimerToken {
        // A zero period has no next boundary.
        let period = period.max(Duration::from_millis(1));
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending.push(PendingInterval {
            token,
            period,
            due: self.now.saturating_add(period),
        });
        token
    }

    fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|p| p.token != token);
    }
}
