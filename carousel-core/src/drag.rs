//! # Drag Tracking
//!
//! Turns a pointer stream into swipe decisions.
//!
//! ```text
//!            down                 |dx| > 14px
//!   Idle ──────────▶ Tracking ──────────────▶ Dragging
//!    ▲                  │                        │
//!    └──── up / cancel / leave (matching id) ────┘
//! ```
//!
//! The pointer is only captured once the activation threshold is crossed, so
//! a press that never moves far enough still reaches the slide as a click.

use crate::event::PointerId;

/// Horizontal travel before a press becomes a drag, in pixels.
pub const DRAG_ACTIVATION_PX: f32 = 14.0;

/// Fraction of the track width a release must exceed to change slides.
pub const SWIPE_THRESHOLD_RATIO: f32 = 0.15;

/// One in-progress pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the session.
    pub pointer_id: PointerId,
    /// Horizontal position at pointer-down.
    pub start_x: f32,
    /// Displacement since pointer-down.
    pub delta_x: f32,
}

impl DragSession {
    const fn new(pointer_id: PointerId, start_x: f32) -> Self {
        Self {
            pointer_id,
            start_x,
            delta_x: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Tracking(DragSession),
    Dragging(DragSession),
}

/// Direction a released swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right: reveal the previous slide.
    Previous,
    /// Finger moved left: reveal the next slide.
    Next,
}

/// Result of closing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragRelease {
    /// Navigation the swipe asks for, if it passed the threshold.
    pub swipe: Option<SwipeDirection>,
    /// Whether the session had crossed the activation threshold.
    pub was_dragging: bool,
}

/// What `begin` did with a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A new session started.
    Started,
    /// Another pointer already owns the open session.
    Ignored,
}

/// Drag session state machine.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `pointer_id`.
    ///
    /// A second pointer going down while a session is open is ignored. The
    /// same pointer going down again (its release was lost) restarts.
    pub fn begin(&mut self, pointer_id: PointerId, x: f32) -> BeginOutcome {
        if let Some(open) = self.session() {
            if open.pointer_id != pointer_id {
                tracing::trace!(
                    open = open.pointer_id,
                    ignored = pointer_id,
                    "Secondary pointer ignored"
                );
                return BeginOutcome::Ignored;
            }
        }
        self.state = DragState::Tracking(DragSession::new(pointer_id, x));
        BeginOutcome::Started
    }

    /// Record movement. Returns `true` exactly once per session: on the move
    /// that crosses the activation threshold, when the host should capture
    /// the pointer.
    pub fn track(&mut self, pointer_id: PointerId, x: f32) -> bool {
        match &mut self.state {
            DragState::Tracking(session) if session.pointer_id == pointer_id => {
                session.delta_x = x - session.start_x;
                if session.delta_x.abs() > DRAG_ACTIVATION_PX {
                    let session = *session;
                    self.state = DragState::Dragging(session);
                    tracing::trace!(pointer_id, delta_x = session.delta_x, "Drag activated");
                    return true;
                }
                false
            }
            DragState::Dragging(session) if session.pointer_id == pointer_id => {
                session.delta_x = x - session.start_x;
                false
            }
            _ => false,
        }
    }

    /// Close the session owned by `pointer_id` and decide the swipe.
    ///
    /// A track that has not been measured (`track_width <= 0`) never swipes.
    /// Returns `None` when no session is open for that pointer.
    pub fn finish(&mut self, pointer_id: PointerId, track_width: f32) -> Option<DragRelease> {
        let (session, was_dragging) = match self.state {
            DragState::Tracking(session) => (session, false),
            DragState::Dragging(session) => (session, true),
            DragState::Idle => return None,
        };
        if session.pointer_id != pointer_id {
            return None;
        }
        self.state = DragState::Idle;

        let threshold = track_width * SWIPE_THRESHOLD_RATIO;
        let swipe = if track_width.is_nan() || track_width <= 0.0 {
            tracing::trace!(pointer_id, "Release on unmeasured track");
            None
        } else if session.delta_x > threshold {
            Some(SwipeDirection::Previous)
        } else if session.delta_x < -threshold {
            Some(SwipeDirection::Next)
        } else {
            None
        };
        Some(DragRelease {
            swipe,
            was_dragging,
        })
    }

    /// Drop any open session without deciding a swipe.
    ///
    /// Returns the session that was cleared, if one was open.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let open = self.session();
        self.state = DragState::Idle;
        open
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        match self.state {
            DragState::Idle => None,
            DragState::Tracking(session) | DragState::Dragging(session) => Some(session),
        }
    }

    /// Whether a session is open.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Whether the open session crossed the activation threshold.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Current displacement, zero when idle.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.session().map_or(0.0, |session| session.delta_x)
    }
}
