//! Scenario files.

use std::path::Path;
use std::time::Duration;

use carousel_core::{CarouselInput, CarouselOptions, Slide};
use serde::Deserialize;

use crate::error::{ReplayError, ReplayResult};

/// Track width used when a scenario does not give one.
pub const DEFAULT_TRACK_WIDTH: f32 = 1000.0;

fn default_track_width() -> f32 {
    DEFAULT_TRACK_WIDTH
}

/// A recorded interaction to replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Scenario {
    /// Slides, in order.
    pub slides: Vec<Slide>,
    /// Carousel options.
    #[serde(default)]
    pub options: CarouselOptions,
    /// Track width in pixels, applied before the first step.
    #[serde(default = "default_track_width")]
    pub track_width: f32,
    /// Steps, applied in order.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Let virtual time pass.
    Wait {
        /// Milliseconds to advance.
        #[serde(rename = "waitMs")]
        wait_ms: u64,
    },
    /// Deliver an input to the carousel.
    Input(CarouselInput),
}

impl ScriptStep {
    /// How long a wait step lasts; `None` for inputs.
    #[must_use]
    pub fn wait(&self) -> Option<Duration> {
        match self {
            Self::Wait { wait_ms } => Some(Duration::from_millis(*wait_ms)),
            Self::Input(_) => None,
        }
    }
}

impl Scenario {
    /// Parse a scenario from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Parse`] if the JSON is malformed or has unknown
    /// keys.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Read`] if the file cannot be read, or
    /// [`ReplayError::Parse`] if its contents are not a scenario.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            slides = scenario.slides.len(),
            steps = scenario.steps.len(),
            "Scenario loaded"
        );
        Ok(scenario)
    }
}
