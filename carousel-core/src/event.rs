//! Input events for carousel interaction.

use serde::{Deserialize, Serialize};

/// Identifier the browser assigns to each active pointer.
pub type PointerId = i32;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Pointer pressed on the track.
    Down,
    /// Pointer moved.
    Move,
    /// Pointer released.
    Up,
    /// Pointer cancelled by the platform (e.g., scroll takeover).
    Cancel,
    /// Pointer left the track.
    Leave,
}

impl PointerPhase {
    /// Whether this phase closes a drag session.
    #[must_use]
    pub const fn ends_session(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::Leave)
    }
}

/// A single pointer event on the carousel track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Pointer identifier (distinguishes touch points).
    pub pointer_id: PointerId,
    /// Horizontal position in client coordinates.
    pub x: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, pointer_id: PointerId, x: f32) -> Self {
        Self {
            phase,
            pointer_id,
            x,
        }
    }

    /// Pointer pressed.
    #[must_use]
    pub const fn down(pointer_id: PointerId, x: f32) -> Self {
        Self::new(PointerPhase::Down, pointer_id, x)
    }

    /// Pointer moved.
    #[must_use]
    pub const fn moved(pointer_id: PointerId, x: f32) -> Self {
        Self::new(PointerPhase::Move, pointer_id, x)
    }

    /// Pointer released.
    #[must_use]
    pub const fn up(pointer_id: PointerId, x: f32) -> Self {
        Self::new(PointerPhase::Up, pointer_id, x)
    }
}

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKey {
    /// Show the previous slide.
    ArrowLeft,
    /// Show the next slide.
    ArrowRight,
}

impl NavigationKey {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// All inputs a carousel can receive from its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum CarouselInput {
    /// Pointer event on the track.
    Pointer(PointerEvent),

    /// Key pressed while the carousel has focus.
    Key {
        /// DOM key name.
        key: String,
    },

    /// Layout changed; carries the new track width in pixels.
    Resize {
        /// Track width in pixels.
        track_width: f32,
    },

    /// Pointer entered or left the carousel.
    Hover {
        /// Whether the pointer is over the carousel.
        hovered: bool,
    },

    /// Focus entered or left the carousel.
    Focus {
        /// Whether focus is inside the carousel.
        focused: bool,
    },

    /// Reduced-motion preference changed.
    ReducedMotion {
        /// Whether the user asks for reduced motion.
        reduce: bool,
    },

    /// Direct selection (dot or thumbnail).
    Select {
        /// Proposed index, normalized before use.
        index: i64,
    },

    /// Next button.
    Next,

    /// Previous button.
    Previous,

    /// The caller supplies a new controlled index.
    Sync {
        /// Caller-owned index.
        index: usize,
    },
}
