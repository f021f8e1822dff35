//! Construction-time carousel configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};

/// Default autoplay period in milliseconds.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 6000;

/// Region label used when none is configured.
pub const DEFAULT_ARIA_LABEL: &str = "Carousel";

/// Options recognized when creating a carousel.
///
/// Keys use camelCase so the same JSON works from the browser binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct CarouselOptions {
    /// Wrap index arithmetic modulo slide count instead of clamping.
    #[serde(rename = "loop")]
    pub loop_slides: bool,
    /// Advance forward on a timer.
    pub auto_play: bool,
    /// Autoplay period in milliseconds.
    pub auto_play_interval_ms: u64,
    /// Suspend autoplay while the pointer hovers the carousel.
    pub pause_on_hover: bool,
    /// When present, the caller owns the active index.
    pub controlled_index: Option<usize>,
    /// Starting index for a carousel that owns its index.
    pub initial_index: usize,
    /// Render the dot selector.
    pub show_dots: bool,
    /// The user prefers reduced motion: no transitions, no autoplay.
    pub reduced_motion: bool,
    /// Accessible name of the carousel region.
    pub aria_label: String,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            loop_slides: false,
            auto_play: false,
            auto_play_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            pause_on_hover: false,
            controlled_index: None,
            initial_index: 0,
            show_dots: true,
            reduced_motion: false,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
        }
    }
}

impl CarouselOptions {
    /// Parse options from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Serialization`] for malformed JSON, unknown
    /// keys, or values of the wrong type (a negative interval included).
    pub fn from_json(json: &str) -> CarouselResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the options against the slide list they will drive.
    ///
    /// # Errors
    ///
    /// - [`CarouselError::InvalidInterval`] when the autoplay interval is zero.
    /// - [`CarouselError::InitialIndexOutOfRange`] when the initial index does
    ///   not address one of `slide_count` slides. An empty slide list accepts
    ///   any initial index.
    pub fn validate(&self, slide_count: usize) -> CarouselResult<()> {
        if self.auto_play_interval_ms == 0 {
            return Err(CarouselError::InvalidInterval);
        }
        if !self.is_controlled() && slide_count > 0 && self.initial_index >= slide_count {
            return Err(CarouselError::InitialIndexOutOfRange {
                index: self.initial_index,
                count: slide_count,
            });
        }
        Ok(())
    }

    /// Autoplay period.
    #[must_use]
    pub const fn auto_play_interval(&self) -> Duration {
        Duration::from_millis(self.auto_play_interval_ms)
    }

    /// Whether the caller owns the index.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.controlled_index.is_some()
    }
}
