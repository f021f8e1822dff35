//! # Host Plumbing
//!
//! Pieces a host embedding needs around the engine when its callbacks may
//! re-enter it (script callbacks in the browser binding):
//!
//! - [`IndexQueue`] buffers observer calls made while the engine is borrowed,
//!   so they can be delivered once the borrow is released.
//! - [`ClickGuard`] remembers that the click following a drag release must be
//!   swallowed.
//! - [`frame_elapsed`] turns a frame delta in milliseconds into a duration.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Observer calls waiting for delivery.
#[derive(Debug, Clone, Default)]
pub struct IndexQueue {
    pending: Rc<RefCell<Vec<usize>>>,
}

impl IndexQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer that appends to this queue, for
    /// [`Carousel::with_observer`](crate::Carousel::with_observer).
    pub fn observer(&self) -> impl FnMut(usize) + 'static {
        let pending = Rc::clone(&self.pending);
        move |index| pending.borrow_mut().push(index)
    }

    /// Take every queued index, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<usize> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    /// Drop queued indices without delivering them.
    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }

    /// Number of queued indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

/// One-shot guard for the click a browser synthesizes after `pointerup`.
#[derive(Debug, Default)]
pub struct ClickGuard {
    armed: Cell<bool>,
}

impl ClickGuard {
    /// Create a disarmed guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the guard after a release of type `event_type` that asked for
    /// click suppression. Only `pointerup` is followed by a click; cancel and
    /// leave disarm it.
    pub fn arm_after(&self, event_type: &str) {
        self.armed.set(event_type == "pointerup");
    }

    /// Whether the click being handled must be swallowed. Disarms the guard.
    pub fn take(&self) -> bool {
        self.armed.replace(false)
    }

    /// Whether the guard is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }
}

/// Convert a frame delta in milliseconds into a duration.
///
/// Returns `None` for deltas that cannot advance time: non-positive,
/// non-finite, or too large to represent.
#[must_use]
pub fn frame_elapsed(elapsed_ms: f64) -> Option<Duration> {
    if elapsed_ms <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(elapsed_ms / 1000.0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Carousel, CarouselOptions, Slide};

    #[test]
    fn queue_delivers_in_order_and_empties() {
        let queue = IndexQueue::new();
        let mut observer = queue.observer();
        observer(2);
        observer(0);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![2, 0]);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn queued_delivery_may_reenter_engine() {
        let queue = IndexQueue::new();
        let carousel = Rc::new(RefCell::new(
            Carousel::with_manual_timers(vec![Slide::default(); 4], CarouselOptions::default())
                .unwrap()
                .with_observer(queue.observer()),
        ));

        carousel.borrow_mut().go_to_next();

        // The engine borrow above has ended; delivery can call back in.
        let mut seen = Vec::new();
        for index in queue.drain() {
            seen.push(index);
            let mut engine = carousel.borrow_mut();
            assert_eq!(engine.active_index(), index);
            engine.go_to_next();
        }
        assert_eq!(seen, vec![1]);
        assert_eq!(queue.drain(), vec![2]);
        assert_eq!(carousel.borrow().announcement(), "Slide 3 of 4");
    }

    #[test]
    fn queue_clear_drops_pending() {
        let queue = IndexQueue::new();
        let mut observer = queue.observer();
        observer(3);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn click_guard_arms_only_after_pointerup() {
        let guard = ClickGuard::new();
        guard.arm_after("pointerup");
        assert!(guard.is_armed());
        assert!(guard.take());
        assert!(!guard.take());

        guard.arm_after("pointercancel");
        assert!(!guard.take());

        guard.arm_after("pointerup");
        guard.arm_after("pointerleave");
        assert!(!guard.take());
    }

    #[test]
    fn frame_elapsed_rejects_unusable_deltas() {
        assert_eq!(frame_elapsed(16.0), Some(Duration::from_millis(16)));
        assert_eq!(frame_elapsed(0.0), None);
        assert_eq!(frame_elapsed(-5.0), None);
        assert_eq!(frame_elapsed(f64::NAN), None);
        assert_eq!(frame_elapsed(f64::INFINITY), None);
        assert_eq!(frame_elapsed(1e300), None);
    }
}
