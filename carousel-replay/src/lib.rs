//! # Carousel Replay
//!
//! Headless host for the showroom carousel engine.
//!
//! Loads a JSON scenario, feeds its steps to a [`carousel_core::Carousel`]
//! running on virtual time, and reports the engine state after every step.
//! Used to reproduce interaction bugs without a browser.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p carousel-replay -- scenarios/hero-reel.json --pretty
//! ```
//!
//! ## Scenario format
//!
//! ```json
//! {
//!   "slides": [{ "label": "Front" }, { "label": "Interior" }],
//!   "options": { "autoPlay": true, "autoPlayIntervalMs": 1000 },
//!   "trackWidth": 1000,
//!   "steps": [
//!     { "waitMs": 1500 },
//!     { "type": "pointer", "data": { "phase": "down", "pointerId": 1, "x": 500 } },
//!     { "type": "next" }
//!   ]
//! }
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - What to replay and how to print it
//! - `Scenario` / `ScriptStep` - The scenario file
//! - `Replay` - Drives the engine and produces one `StepRecord` per step

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod error;
mod replay;
mod scenario;

pub use error::{ReplayError, ReplayResult};
pub use replay::{run, Replay, StepRecord};
pub use scenario::{Scenario, ScriptStep, DEFAULT_TRACK_WIDTH};

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for carousel-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "carousel-replay")]
#[command(about = "Replay a carousel interaction scenario headlessly")]
#[command(version)]
pub struct CliArgs {
    /// Scenario file (JSON)
    pub scenario: PathBuf,

    /// Act as a controlled-mode owner that accepts every proposed index
    #[arg(long, env = "CAROUSEL_ACCEPT_PROPOSALS")]
    pub accept_proposals: bool,

    /// Override the scenario's track width in pixels
    #[arg(long)]
    pub track_width: Option<f32>,

    /// Pretty-print records instead of one JSON object per line
    #[arg(long)]
    pub pretty: bool,
}

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Scenario file to load.
    pub scenario: PathBuf,
    /// Feed every proposal back as an external index sync.
    pub accept_proposals: bool,
    /// Track width override.
    pub track_width: Option<f32>,
    /// Pretty-print output records.
    pub pretty: bool,
}

impl ReplayConfig {
    /// Configuration replaying `scenario` with default settings.
    #[must_use]
    pub fn new(scenario: impl Into<PathBuf>) -> Self {
        Self {
            scenario: scenario.into(),
            accept_proposals: false,
            track_width: None,
            pretty: false,
        }
    }

    /// Load the scenario file and apply overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scenario.
    pub fn load_scenario(&self) -> ReplayResult<Scenario> {
        let mut scenario = Scenario::load(&self.scenario)?;
        if let Some(width) = self.track_width {
            scenario.track_width = width;
        }
        Ok(scenario)
    }
}

impl From<CliArgs> for ReplayConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            scenario: args.scenario,
            accept_proposals: args.accept_proposals,
            track_width: args.track_width,
            pretty: args.pretty,
        }
    }
}
