//! Scenario playback.

use std::time::Duration;

use carousel_core::{Carousel, IndexQueue, InputOutcome, ManualTimers, Navigation};
use serde::Serialize;

use crate::error::ReplayResult;
use crate::scenario::{Scenario, ScriptStep};

/// Engine state after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// One-based step number.
    pub step: usize,
    /// Virtual time after the step, in milliseconds.
    pub elapsed_ms: u64,
    /// Rendered slide.
    pub active_index: usize,
    /// Live-region text.
    pub announcement: String,
    /// Indices passed to the observer during the step.
    pub notified: Vec<usize>,
    /// Whether the autoplay interval is armed.
    pub autoplay_running: bool,
    /// Intervals scheduled on the timer driver.
    pub pending_timers: usize,
    /// Input outcome, for input steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<InputOutcome>,
    /// Autoplay fires, for wait steps. Missed periods collapse into one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fires: Vec<Navigation>,
}

/// A carousel being driven through a scenario.
#[derive(Debug)]
pub struct Replay {
    carousel: Carousel<ManualTimers>,
    observed: IndexQueue,
    notified: Vec<usize>,
    accept_proposals: bool,
    step: usize,
}

impl Replay {
    /// Build the carousel for `scenario` and apply its track width.
    ///
    /// With `accept_proposals`, every index offered to the observer of a
    /// controlled carousel is immediately synced back, the way a host that
    /// stores the index in its own state would.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the slides or options.
    pub fn new(scenario: &Scenario, accept_proposals: bool) -> ReplayResult<Self> {
        let observed = IndexQueue::new();
        let mut carousel =
            Carousel::with_manual_timers(scenario.slides.clone(), scenario.options.clone())?
                .with_observer(observed.observer());
        carousel.on_resize(scenario.track_width);

        Ok(Self {
            carousel,
            observed,
            notified: Vec::new(),
            accept_proposals,
            step: 0,
        })
    }

    /// The carousel under replay.
    #[must_use]
    pub const fn carousel(&self) -> &Carousel<ManualTimers> {
        &self.carousel
    }

    /// Apply one step and report the resulting state.
    pub fn apply(&mut self, step: &ScriptStep) -> StepRecord {
        self.step += 1;
        let (outcome, fires) = match step {
            ScriptStep::Wait { wait_ms } => (None, self.wait(Duration::from_millis(*wait_ms))),
            ScriptStep::Input(input) => {
                let outcome = self.carousel.dispatch(input);
                self.collect_notifications();
                (Some(outcome), Vec::new())
            }
        };
        tracing::trace!(step = self.step, ?outcome, fires = fires.len(), "Step applied");
        self.record(outcome, fires)
    }

    /// Advance virtual time. A wait longer than the interval fires once, like
    /// a page returning from the background.
    fn wait(&mut self, elapsed: Duration) -> Vec<Navigation> {
        let fires = self.carousel.advance(elapsed);
        self.collect_notifications();
        fires
    }

    fn collect_notifications(&mut self) {
        let observed = self.observed.drain();
        if self.accept_proposals && self.carousel.is_controlled() {
            if let Some(&last) = observed.last() {
                self.carousel.sync_external_index(last);
            }
        }
        self.notified.extend(observed);
    }

    fn record(&mut self, outcome: Option<InputOutcome>, fires: Vec<Navigation>) -> StepRecord {
        let timers = self.carousel.timers();
        StepRecord {
            step: self.step,
            elapsed_ms: u64::try_from(timers.now().as_millis()).unwrap_or(u64::MAX),
            active_index: self.carousel.active_index(),
            announcement: self.carousel.announcement().to_string(),
            notified: std::mem::take(&mut self.notified),
            autoplay_running: self.carousel.is_autoplay_running(),
            pending_timers: timers.pending_count(),
            outcome,
            fires,
        }
    }
}

/// Replay every step of `scenario`.
///
/// # Errors
///
/// Returns an error if the engine rejects the slides or options.
pub fn run(scenario: &Scenario, accept_proposals: bool) -> ReplayResult<Vec<StepRecord>> {
    let mut replay = Replay::new(scenario, accept_proposals)?;
    let records = scenario
        .steps
        .iter()
        .map(|step| replay.apply(step))
        .collect();
    tracing::info!(
        steps = scenario.steps.len(),
        active = replay.carousel().active_index(),
        "Replay finished"
    );
    Ok(records)
}
