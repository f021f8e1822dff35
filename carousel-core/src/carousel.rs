//! # Carousel Engine
//!
//! Reconciles pointer drags, arrow keys, autoplay fires and direct selection
//! into one active slide.
//!
//! ## Ownership
//!
//! ```text
//! Owned     propose ──▶ commit ──▶ observer(index) ──▶ announce, restart autoplay
//! External  propose ──▶ observer(index)            (caller decides)
//!           sync_external_index(i) ──▶ announce, restart autoplay
//! ```
//!
//! Every handler is total: unknown pointers, empty slide lists and events
//! after [`Carousel::dispose`] degrade to no-ops.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::autoplay::{Autoplay, AutoplayGate};
use crate::drag::{BeginOutcome, DragSession, DragTracker, SwipeDirection};
use crate::error::CarouselResult;
use crate::event::{CarouselInput, NavigationKey, PointerEvent, PointerId, PointerPhase};
use crate::index::{normalize, signed, ExternalIndex, IndexOwner, OwnedIndex};
use crate::options::CarouselOptions;
use crate::render::{self, ControlsView, RegionView, SlideView, TrackStyle};
use crate::slide::Slide;
use crate::timer::{ManualTimers, TimerDriver, TimerToken};

/// Callback receiving each new (or proposed) active index.
pub type IndexObserver = Box<dyn FnMut(usize)>;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    /// The normalized target equals the current slide; nothing happened.
    #[default]
    Unchanged,
    /// The carousel owns its index and moved.
    Moved {
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
    /// The caller owns the index; the observer was offered `to`.
    Proposed {
        /// Proposed index.
        to: usize,
    },
}

impl Navigation {
    /// Whether the observer was called.
    #[must_use]
    pub const fn notified(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Pointer capture change the host must apply to the track element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureChange {
    /// Call `setPointerCapture(id)`.
    Capture(PointerId),
    /// Call `releasePointerCapture(id)`.
    Release(PointerId),
}

/// What the host must do after a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerResponse {
    /// Capture change to apply, if any.
    pub capture: Option<CaptureChange>,
    /// Swallow the click the browser synthesizes after this release.
    pub suppress_click: bool,
    /// Navigation caused by the event.
    pub navigation: Navigation,
}

/// What the host must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    /// Call `preventDefault()` on the key event.
    pub prevent_default: bool,
    /// Navigation caused by the key.
    pub navigation: Navigation,
}

/// Result of [`Carousel::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InputOutcome {
    /// Pointer event handled.
    Pointer(PointerResponse),
    /// Key event handled.
    Key(KeyResponse),
    /// Button or selection handled.
    Navigation(Navigation),
    /// External index sync; `false` when the carousel owns its index.
    Synced(bool),
    /// Environment state updated (hover, focus, resize, reduced motion).
    Updated,
}

#[derive(Debug, Clone, Copy)]
enum NavigationSource {
    Button,
    Keyboard,
    Swipe,
    Autoplay,
    Selection,
}

#[derive(Debug, Clone, Copy, Default)]
struct Interaction {
    hovered: bool,
    focused: bool,
    pointer_down: bool,
}

/// The carousel engine.
///
/// Generic over its [`TimerDriver`] so hosts choose where timer fires come
/// from. Dropping the carousel disposes it, releasing its interval.
#[allow(clippy::struct_excessive_bools)]
pub struct Carousel<D: TimerDriver = ManualTimers> {
    slides: Vec<Slide>,
    loop_slides: bool,
    show_dots: bool,
    aria_label: String,
    index: IndexOwner,
    observer: Option<IndexObserver>,
    drag: DragTracker,
    interaction: Interaction,
    reduced_motion: bool,
    track_width: f32,
    autoplay: Autoplay,
    timers: D,
    announcement: String,
    disposed: bool,
}

impl<D: TimerDriver> Carousel<D> {
    /// Create a carousel over `slides`.
    ///
    /// Autoplay starts immediately when the options allow it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when [`CarouselOptions::validate`]
    /// rejects the options.
    pub fn new(slides: Vec<Slide>, options: CarouselOptions, timers: D) -> CarouselResult<Self> {
        options.validate(slides.len())?;

        let index = match options.controlled_index {
            Some(supplied) => IndexOwner::External(ExternalIndex::new(supplied)),
            None => IndexOwner::Owned(OwnedIndex::new(normalize(
                signed(options.initial_index),
                slides.len(),
                options.loop_slides,
            ))),
        };

        let auto_play_interval = options.auto_play_interval();
        let mut carousel = Self {
            loop_slides: options.loop_slides,
            show_dots: options.show_dots,
            aria_label: options.aria_label,
            index,
            observer: None,
            drag: DragTracker::new(),
            interaction: Interaction::default(),
            reduced_motion: options.reduced_motion,
            track_width: 0.0,
            autoplay: Autoplay::new(
                options.auto_play,
                auto_play_interval,
                options.pause_on_hover,
            ),
            timers,
            announcement: String::new(),
            disposed: false,
            slides,
        };
        carousel.announcement = render::announcement(carousel.active_index(), carousel.slides.len());
        carousel.reconcile_autoplay();

        tracing::debug!(
            slides = carousel.slides.len(),
            controlled = carousel.is_controlled(),
            active = carousel.active_index(),
            "Carousel created"
        );
        Ok(carousel)
    }

    /// Attach the index observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(usize) + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    /// Replace the index observer.
    pub fn set_observer(&mut self, observer: impl FnMut(usize) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// The slides, in order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// The slide currently rendered. Always `< max(slide_count, 1)`.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.normalize(signed(self.index.raw()))
    }

    /// Whether the caller owns the index.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.index.is_external()
    }

    /// Whether index arithmetic wraps.
    #[must_use]
    pub const fn loops(&self) -> bool {
        self.loop_slides
    }

    /// Live-region text for the active slide.
    #[must_use]
    pub fn announcement(&self) -> &str {
        &self.announcement
    }

    /// Map a proposal onto a valid index under this carousel's loop rule.
    #[must_use]
    pub fn normalize(&self, proposed: i64) -> usize {
        normalize(proposed, self.slides.len(), self.loop_slides)
    }

    /// The open drag session, if any.
    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.session()
    }

    /// Whether the open session crossed the drag activation threshold.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Whether a pointer is pressed on the track.
    #[must_use]
    pub const fn is_pointer_down(&self) -> bool {
        self.interaction.pointer_down
    }

    /// Whether the pointer hovers the carousel.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.interaction.hovered
    }

    /// Whether focus is inside the carousel.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.interaction.focused
    }

    /// Whether reduced motion is in effect.
    #[must_use]
    pub const fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Last measured track width in pixels.
    #[must_use]
    pub const fn track_width(&self) -> f32 {
        self.track_width
    }

    /// Whether an autoplay interval is scheduled.
    #[must_use]
    pub const fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The timer driver.
    #[must_use]
    pub const fn timers(&self) -> &D {
        &self.timers
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Move one slide forward.
    pub fn go_to_next(&mut self) -> Navigation {
        self.step(1, NavigationSource::Button)
    }

    /// Move one slide back.
    pub fn go_to_previous(&mut self) -> Navigation {
        self.step(-1, NavigationSource::Button)
    }

    /// Move to `index`, normalized first.
    pub fn go_to(&mut self, index: i64) -> Navigation {
        self.propose(index, NavigationSource::Selection)
    }

    /// Supply a new index as the external owner.
    ///
    /// Returns `false` (and changes nothing) when the carousel owns its index.
    /// The observer is not called: the caller already knows.
    pub fn sync_external_index(&mut self, index: usize) -> bool {
        if self.disposed {
            return false;
        }
        let before = self.active_index();
        match &mut self.index {
            IndexOwner::External(external) => external.sync(index),
            IndexOwner::Owned(_) => {
                tracing::warn!(index, "External index supplied to a carousel that owns its index");
                return false;
            }
        }
        let after = self.active_index();
        if after != before {
            tracing::debug!(from = before, to = after, "External index synced");
            self.index_changed();
        }
        true
    }

    fn step(&mut self, delta: i64, source: NavigationSource) -> Navigation {
        let current = signed(self.active_index());
        self.propose(current.saturating_add(delta), source)
    }

    fn propose(&mut self, proposed: i64, source: NavigationSource) -> Navigation {
        if self.disposed {
            return Navigation::Unchanged;
        }
        let from = self.active_index();
        let to = self.normalize(proposed);
        if to == from {
            tracing::trace!(index = from, ?source, "Navigation at boundary ignored");
            return Navigation::Unchanged;
        }

        match &mut self.index {
            IndexOwner::Owned(owned) => {
                owned.set(to);
                tracing::debug!(from, to, ?source, "Active slide changed");
                self.notify(to);
                self.index_changed();
                Navigation::Moved { from, to }
            }
            IndexOwner::External(_) => {
                tracing::debug!(from, to, ?source, "Active slide proposed");
                self.notify(to);
                Navigation::Proposed { to }
            }
        }
    }

    fn notify(&mut self, index: usize) {
        if let Some(observer) = self.observer.as_mut() {
            observer(index);
        }
    }

    fn index_changed(&mut self) {
        self.announcement = render::announcement(self.active_index(), self.slides.len());
        let gate = self.gate();
        self.autoplay.restart(&mut self.timers, &gate);
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    /// Route a pointer event to its handler.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> PointerResponse {
        match event.phase {
            phase if phase.ends_session() => self.on_pointer_up(event.pointer_id),
            PointerPhase::Down => self.on_pointer_down(event.pointer_id, event.x),
            _ => self.on_pointer_move(event.pointer_id, event.x),
        }
    }

    /// Pointer pressed. Opens a session without capturing the pointer.
    pub fn on_pointer_down(&mut self, pointer_id: PointerId, x: f32) -> PointerResponse {
        if self.disposed {
            return PointerResponse::default();
        }
        if self.drag.begin(pointer_id, x) == BeginOutcome::Started {
            self.interaction.pointer_down = true;
            self.reconcile_autoplay();
        }
        PointerResponse::default()
    }

    /// Pointer moved. Requests capture when the drag activates.
    pub fn on_pointer_move(&mut self, pointer_id: PointerId, x: f32) -> PointerResponse {
        if self.disposed {
            return PointerResponse::default();
        }
        let capture = self
            .drag
            .track(pointer_id, x)
            .then_some(CaptureChange::Capture(pointer_id));
        PointerResponse {
            capture,
            ..PointerResponse::default()
        }
    }

    /// Pointer released, cancelled or left the track.
    ///
    /// Closes the session and swipes if the release passed 15% of the track
    /// width. The host is asked to swallow the follow-up click when the
    /// session had become a drag or swiped. Hosts whose layout can change
    /// without a resize notification call
    /// [`set_track_width`](Self::set_track_width) first.
    pub fn on_pointer_up(&mut self, pointer_id: PointerId) -> PointerResponse {
        if self.disposed {
            return PointerResponse::default();
        }
        let Some(release) = self.drag.finish(pointer_id, self.track_width) else {
            tracing::trace!(pointer_id, "Release without matching session ignored");
            return PointerResponse::default();
        };

        let navigation = match release.swipe {
            Some(SwipeDirection::Previous) => self.step(-1, NavigationSource::Swipe),
            Some(SwipeDirection::Next) => self.step(1, NavigationSource::Swipe),
            None => Navigation::Unchanged,
        };

        self.interaction.pointer_down = false;
        self.reconcile_autoplay();

        PointerResponse {
            capture: release
                .was_dragging
                .then_some(CaptureChange::Release(pointer_id)),
            suppress_click: release.was_dragging || release.swipe.is_some(),
            navigation,
        }
    }

    /// Record a fresh track measurement without touching the open session.
    ///
    /// Until a positive width is known, releases never swipe.
    pub fn set_track_width(&mut self, track_width: f32) {
        self.track_width = track_width.max(0.0);
    }

    /// Layout changed. Any open session is cancelled without navigating.
    ///
    /// Returns `true` if a session was cancelled.
    pub fn on_resize(&mut self, track_width: f32) -> bool {
        self.track_width = track_width.max(0.0);
        if self.disposed {
            return false;
        }
        let Some(session) = self.drag.cancel() else {
            return false;
        };
        tracing::trace!(
            pointer_id = session.pointer_id,
            delta_x = session.delta_x,
            "Resize cancelled drag"
        );
        self.interaction.pointer_down = false;
        self.reconcile_autoplay();
        true
    }

    // ------------------------------------------------------------------
    // Keyboard and environment
    // ------------------------------------------------------------------

    /// Key pressed while focused. Arrow keys navigate.
    pub fn on_key(&mut self, key: &str) -> KeyResponse {
        if self.disposed {
            return KeyResponse::default();
        }
        let navigation = match NavigationKey::from_key(key) {
            Some(NavigationKey::ArrowLeft) => self.step(-1, NavigationSource::Keyboard),
            Some(NavigationKey::ArrowRight) => self.step(1, NavigationSource::Keyboard),
            None => return KeyResponse::default(),
        };
        KeyResponse {
            prevent_default: true,
            navigation,
        }
    }

    /// Pointer entered or left the carousel.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.interaction.hovered = hovered;
        self.reconcile_autoplay();
    }

    /// Focus entered or left the carousel.
    pub fn set_focused(&mut self, focused: bool) {
        self.interaction.focused = focused;
        self.reconcile_autoplay();
    }

    /// Reduced-motion preference changed.
    pub fn set_reduced_motion(&mut self, reduce: bool) {
        self.reduced_motion = reduce;
        self.reconcile_autoplay();
    }

    // ------------------------------------------------------------------
    // Autoplay
    // ------------------------------------------------------------------

    /// Deliver a timer fire. Fires for intervals this carousel no longer
    /// holds are ignored.
    pub fn on_timer(&mut self, token: TimerToken) -> Navigation {
        if self.disposed || !self.autoplay.owns(token) {
            tracing::trace!(%token, "Stale timer fire ignored");
            return Navigation::Unchanged;
        }
        self.step(1, NavigationSource::Autoplay)
    }

    fn gate(&self) -> AutoplayGate {
        AutoplayGate {
            slide_count: self.slides.len(),
            reduced_motion: self.reduced_motion,
            hovered: self.interaction.hovered,
            pointer_down: self.interaction.pointer_down,
            focused: self.interaction.focused,
        }
    }

    fn reconcile_autoplay(&mut self) {
        if self.disposed {
            return;
        }
        let gate = self.gate();
        self.autoplay.reconcile(&mut self.timers, &gate);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Track placement: follows the finger while a session is open, and
    /// animates otherwise unless reduced motion is requested.
    #[must_use]
    pub fn track_style(&self) -> TrackStyle {
        TrackStyle {
            active_index: self.active_index(),
            drag_offset_px: self.drag.offset(),
            animated: !self.drag.is_active() && !self.reduced_motion,
        }
    }

    /// Per-slide render state.
    #[must_use]
    pub fn slide_views(&self) -> Vec<SlideView> {
        let active = self.active_index();
        self.slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                index,
                key: slide.key_or_default(index),
                label: slide.label_or_default(index),
                hidden: index != active,
            })
            .collect()
    }

    /// The labelled region wrapping the carousel.
    #[must_use]
    pub fn region(&self) -> RegionView {
        RegionView::new(&self.aria_label)
    }

    /// Arrow buttons and dots.
    #[must_use]
    pub fn controls(&self) -> ControlsView {
        ControlsView::build(
            self.active_index(),
            self.slides.len(),
            self.loop_slides,
            self.show_dots,
        )
    }

    // ------------------------------------------------------------------
    // Dispatch and lifecycle
    // ------------------------------------------------------------------

    /// Route any host input to its handler.
    pub fn dispatch(&mut self, input: &CarouselInput) -> InputOutcome {
        match input {
            CarouselInput::Pointer(event) => InputOutcome::Pointer(self.on_pointer_event(event)),
            CarouselInput::Key { key } => InputOutcome::Key(self.on_key(key)),
            CarouselInput::Resize { track_width } => {
                self.on_resize(*track_width);
                InputOutcome::Updated
            }
            CarouselInput::Hover { hovered } => {
                self.set_hovered(*hovered);
                InputOutcome::Updated
            }
            CarouselInput::Focus { focused } => {
                self.set_focused(*focused);
                InputOutcome::Updated
            }
            CarouselInput::ReducedMotion { reduce } => {
                self.set_reduced_motion(*reduce);
                InputOutcome::Updated
            }
            CarouselInput::Select { index } => InputOutcome::Navigation(self.go_to(*index)),
            CarouselInput::Next => InputOutcome::Navigation(self.go_to_next()),
            CarouselInput::Previous => InputOutcome::Navigation(self.go_to_previous()),
            CarouselInput::Sync { index } => InputOutcome::Synced(self.sync_external_index(*index)),
        }
    }

    /// Release the autoplay interval and drop any drag session. Every later
    /// call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.autoplay.stop(&mut self.timers);
        self.drag.cancel();
        self.interaction = Interaction::default();
        self.disposed = true;
        tracing::debug!("Carousel disposed");
    }
}

impl Carousel<ManualTimers> {
    /// Create a carousel driven by a fresh [`ManualTimers`].
    ///
    /// # Errors
    ///
    /// Same as [`Carousel::new`].
    pub fn with_manual_timers(
        slides: Vec<Slide>,
        options: CarouselOptions,
    ) -> CarouselResult<Self> {
        Self::new(slides, options, ManualTimers::new())
    }

    /// Advance virtual time and deliver the autoplay fire, if one fell due.
    ///
    /// Periods missed during a long gap (a backgrounded tab, a long replay
    /// wait) collapse into a single fire, the way a throttled browser timer
    /// catches up. Hosts step in frames to see every period.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Navigation> {
        self.timers
            .advance(elapsed)
            .into_iter()
            .map(|token| self.on_timer(token))
            .collect()
    }
}

impl<D: TimerDriver> Drop for Carousel<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<D: TimerDriver + fmt::Debug> fmt::Debug for Carousel<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("slides", &self.slides.len())
            .field("index", &self.index)
            .field("loop_slides", &self.loop_slides)
            .field("drag", &self.drag)
            .field("interaction", &self.interaction)
            .field("reduced_motion", &self.reduced_motion)
            .field("autoplay", &self.autoplay)
            .field("timers", &self.timers)
            .field("has_observer", &self.observer.is_some())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
