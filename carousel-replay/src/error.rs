//! Replay errors.

use std::path::PathBuf;

use carousel_core::CarouselError;
use thiserror::Error;

/// Errors raised while loading or starting a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The scenario file could not be read.
    #[error("Failed to read scenario {}: {source}", path.display())]
    Read {
        /// Scenario path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario is not valid JSON or has the wrong shape.
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// The engine rejected the scenario's slides or options.
    #[error(transparent)]
    Carousel(#[from] CarouselError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
