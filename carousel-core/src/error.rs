//! Error types for carousel construction.

use thiserror::Error;

/// Result type for carousel operations.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Configuration errors reported while building a carousel.
///
/// Navigation, drag handling and autoplay never fail; only the options a
/// carousel is created with can be rejected.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Initial index does not address a slide.
    #[error("Initial index {index} is out of range for {count} slides")]
    InitialIndexOutOfRange {
        /// The requested starting index.
        index: usize,
        /// Number of slides supplied.
        count: usize,
    },

    /// Autoplay interval of zero.
    #[error("Autoplay interval must be greater than zero")]
    InvalidInterval,

    /// Options or slides could not be parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
