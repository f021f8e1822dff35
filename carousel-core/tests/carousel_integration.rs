//! Carousel Integration Tests
//!
//! Exercises the engine through its public API:
//! - Wrap and clamp navigation
//! - Swipe thresholds on a 1000px track
//! - Autoplay timing, suspension and disposal
//! - Controlled (caller-owned) index

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use carousel_core::{
    normalize, CaptureChange, Carousel, CarouselError, CarouselOptions, ManualTimers, Navigation,
    Slide,
};
use proptest::prelude::*;

const TRACK_WIDTH: f32 = 1000.0;

fn slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| {
            Slide::new(serde_json::json!({ "src": format!("/vehicles/gt-{i}.jpg") }))
                .with_label(format!("Grand tourer image {}", i + 1))
        })
        .collect()
}

/// Build a carousel with a recording observer and a measured track.
fn carousel(
    count: usize,
    options: CarouselOptions,
) -> (Carousel<ManualTimers>, Rc<RefCell<Vec<usize>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut carousel = Carousel::with_manual_timers(slides(count), options)
        .expect("valid options")
        .with_observer(move |index| sink.borrow_mut().push(index));
    carousel.on_resize(TRACK_WIDTH);
    (carousel, calls)
}

fn looping() -> CarouselOptions {
    CarouselOptions {
        loop_slides: true,
        ..CarouselOptions::default()
    }
}

fn autoplaying(interval_ms: u64) -> CarouselOptions {
    CarouselOptions {
        loop_slides: true,
        auto_play: true,
        auto_play_interval_ms: interval_ms,
        ..CarouselOptions::default()
    }
}

/// Press at the middle of the track, move by `delta_x`, release.
fn swipe(carousel: &mut Carousel<ManualTimers>, pointer_id: i32, delta_x: f32) -> Navigation {
    carousel.on_pointer_down(pointer_id, 500.0);
    carousel.on_pointer_move(pointer_id, 500.0 + delta_x);
    carousel.on_pointer_up(pointer_id).navigation
}

// ============================================================================
// Wrap and Clamp
// ============================================================================

#[test]
fn test_loop_wraps_in_both_directions() {
    let (mut carousel, calls) = carousel(5, looping());

    assert_eq!(
        carousel.go_to_previous(),
        Navigation::Moved { from: 0, to: 4 }
    );
    assert_eq!(carousel.active_index(), 4);

    assert_eq!(carousel.go_to_next(), Navigation::Moved { from: 4, to: 0 });
    assert_eq!(carousel.active_index(), 0);
    assert_eq!(*calls.borrow(), vec![4, 0]);
}

#[test]
fn test_clamp_at_start_does_not_notify() {
    let (mut carousel, calls) = carousel(5, CarouselOptions::default());

    assert_eq!(carousel.go_to_previous(), Navigation::Unchanged);
    assert_eq!(carousel.active_index(), 0);
    assert!(calls.borrow().is_empty());
    assert_eq!(carousel.announcement(), "Slide 1 of 5");
}

#[test]
fn test_clamp_at_end_does_not_notify() {
    let (mut carousel, calls) = carousel(5, CarouselOptions::default());
    carousel.go_to(4);
    calls.borrow_mut().clear();

    assert_eq!(carousel.go_to_next(), Navigation::Unchanged);
    assert_eq!(carousel.active_index(), 4);
    assert!(calls.borrow().is_empty());
    assert!(carousel.controls().next_disabled);
}

#[test]
fn test_announcement_tracks_index() {
    let (mut carousel, _) = carousel(3, looping());
    carousel.go_to_next();
    assert_eq!(carousel.announcement(), "Slide 2 of 3");
    carousel.go_to(-1);
    assert_eq!(carousel.announcement(), "Slide 3 of 3");
}

#[test]
fn test_out_of_range_initial_index_is_rejected() {
    let options = CarouselOptions {
        initial_index: 5,
        ..CarouselOptions::default()
    };
    let result = Carousel::with_manual_timers(slides(5), options);
    assert!(matches!(
        result,
        Err(CarouselError::InitialIndexOutOfRange { index: 5, count: 5 })
    ));
}

proptest! {
    #[test]
    fn prop_index_stays_in_range(
        count in 0usize..8,
        wrap in any::<bool>(),
        steps in proptest::collection::vec(any::<bool>(), 0..40),
    ) {
        let options = CarouselOptions { loop_slides: wrap, ..CarouselOptions::default() };
        let (mut carousel, _) = carousel(count, options);
        for forward in steps {
            if forward {
                carousel.go_to_next();
            } else {
                carousel.go_to_previous();
            }
            prop_assert!(carousel.active_index() < count.max(1));
        }
    }

    #[test]
    fn prop_normalize_is_idempotent(
        proposed in any::<i64>(),
        count in 0usize..64,
        wrap in any::<bool>(),
    ) {
        let once = normalize(proposed, count, wrap);
        let twice = normalize(i64::try_from(once).unwrap(), count, wrap);
        prop_assert_eq!(once, twice);
        prop_assert!(once < count.max(1));
    }
}

// ============================================================================
// Swipe Workflow
// ============================================================================

#[test]
fn test_short_drag_does_not_navigate() {
    let (mut carousel, calls) = carousel(5, CarouselOptions::default());

    // 140px on a 1000px track is 14%, under the 15% threshold.
    assert_eq!(swipe(&mut carousel, 1, -140.0), Navigation::Unchanged);
    assert_eq!(swipe(&mut carousel, 1, 140.0), Navigation::Unchanged);
    assert_eq!(carousel.active_index(), 0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_left_swipe_goes_next_once() {
    let (mut carousel, calls) = carousel(5, CarouselOptions::default());

    assert_eq!(
        swipe(&mut carousel, 1, -200.0),
        Navigation::Moved { from: 0, to: 1 }
    );
    assert_eq!(*calls.borrow(), vec![1]);
}

#[test]
fn test_right_swipe_goes_previous_once() {
    let (mut carousel, calls) = carousel(5, CarouselOptions::default());
    carousel.go_to(3);
    calls.borrow_mut().clear();

    assert_eq!(
        swipe(&mut carousel, 1, 200.0),
        Navigation::Moved { from: 3, to: 2 }
    );
    assert_eq!(*calls.borrow(), vec![2]);
}

#[test]
fn test_drag_release_suppresses_click_and_releases_capture() {
    let (mut carousel, _) = carousel(5, CarouselOptions::default());

    carousel.on_pointer_down(7, 500.0);
    let moved = carousel.on_pointer_move(7, 300.0);
    assert_eq!(moved.capture, Some(CaptureChange::Capture(7)));

    let released = carousel.on_pointer_up(7);
    assert!(released.suppress_click);
    assert_eq!(released.capture, Some(CaptureChange::Release(7)));
    assert!(carousel.drag_session().is_none());
}

#[test]
fn test_cancel_and_leave_end_session_like_up() {
    use carousel_core::{PointerEvent, PointerPhase};

    let (mut carousel, _) = carousel(5, CarouselOptions::default());
    for phase in [PointerPhase::Cancel, PointerPhase::Leave] {
        carousel.on_pointer_event(&PointerEvent::down(1, 500.0));
        carousel.on_pointer_event(&PointerEvent::moved(1, 250.0));
        let response = carousel.on_pointer_event(&PointerEvent::new(phase, 1, 250.0));
        assert!(response.navigation.notified());
        assert!(carousel.drag_session().is_none());
    }
    assert_eq!(carousel.active_index(), 2);
}

#[test]
fn test_tap_on_unmeasured_track_does_not_navigate() {
    let mut carousel = Carousel::with_manual_timers(slides(5), CarouselOptions::default())
        .expect("valid options");
    carousel.go_to(2);

    carousel.on_pointer_down(1, 500.0);
    carousel.on_pointer_move(1, 497.0);
    let response = carousel.on_pointer_up(1);

    assert_eq!(response.navigation, Navigation::Unchanged);
    assert!(!response.suppress_click);
    assert_eq!(carousel.active_index(), 2);

    // A real drag still gets no swipe until the track is measured.
    assert_eq!(swipe(&mut carousel, 1, -300.0), Navigation::Unchanged);
    carousel.set_track_width(TRACK_WIDTH);
    assert_eq!(
        swipe(&mut carousel, 1, -300.0),
        Navigation::Moved { from: 2, to: 3 }
    );
}

#[test]
fn test_track_width_measured_mid_drag_keeps_session() {
    let (mut carousel, _) = carousel(3, CarouselOptions::default());
    carousel.on_pointer_down(1, 500.0);
    carousel.on_pointer_move(1, 400.0);

    // The track shrank without a window resize.
    carousel.set_track_width(500.0);
    assert!(carousel.is_dragging());

    let response = carousel.on_pointer_up(1);
    assert_eq!(response.navigation, Navigation::Moved { from: 0, to: 1 });
    assert!(response.suppress_click);
}

#[test]
fn test_swipe_below_drag_activation_still_suppresses_click() {
    let (mut carousel, _) = carousel(3, CarouselOptions::default());
    carousel.set_track_width(60.0);

    carousel.on_pointer_down(1, 500.0);
    assert_eq!(carousel.on_pointer_move(1, 490.0).capture, None);
    let response = carousel.on_pointer_up(1);

    assert_eq!(response.navigation, Navigation::Moved { from: 0, to: 1 });
    assert_eq!(response.capture, None);
    assert!(response.suppress_click);
}

// ============================================================================
// Autoplay
// ============================================================================

#[test]
fn test_autoplay_advances_three_times_and_wraps() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));

    // 31 frames of 100ms.
    let fired: usize = (0..31)
        .map(|_| carousel.advance(Duration::from_millis(100)).len())
        .sum();

    assert_eq!(fired, 3);
    assert_eq!(*calls.borrow(), vec![1, 2, 0]);
    assert_eq!(carousel.active_index(), 0);
}

#[test]
fn test_pointer_down_suspends_and_release_restarts_full_interval() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));

    carousel.advance(Duration::from_millis(600));
    carousel.on_pointer_down(1, 500.0);
    assert!(!carousel.is_autoplay_running());
    assert_eq!(carousel.timers().pending_count(), 0);

    // Held well past the first deadline: nothing fires.
    carousel.advance(Duration::from_millis(2000));
    assert!(calls.borrow().is_empty());

    // Release without a qualifying swipe.
    carousel.on_pointer_move(1, 520.0);
    carousel.on_pointer_up(1);
    assert!(carousel.is_autoplay_running());

    carousel.advance(Duration::from_millis(999));
    assert!(calls.borrow().is_empty());
    carousel.advance(Duration::from_millis(1));
    assert_eq!(*calls.borrow(), vec![1]);
}

#[test]
fn test_hover_pauses_only_with_pause_on_hover() {
    let (mut plain, plain_calls) = carousel(3, autoplaying(1000));
    plain.set_hovered(true);
    plain.advance(Duration::from_millis(1000));
    assert_eq!(*plain_calls.borrow(), vec![1]);

    let options = CarouselOptions {
        pause_on_hover: true,
        ..autoplaying(1000)
    };
    let (mut pausing, pausing_calls) = carousel(3, options);
    pausing.set_hovered(true);
    pausing.advance(Duration::from_millis(5000));
    assert!(pausing_calls.borrow().is_empty());

    pausing.set_hovered(false);
    pausing.advance(Duration::from_millis(1000));
    assert_eq!(*pausing_calls.borrow(), vec![1]);
}

#[test]
fn test_focus_suspends_autoplay() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));
    carousel.set_focused(true);
    carousel.advance(Duration::from_millis(4000));
    assert!(calls.borrow().is_empty());
    carousel.set_focused(false);
    carousel.advance(Duration::from_millis(1000));
    assert_eq!(*calls.borrow(), vec![1]);
}

#[test]
fn test_reduced_motion_disables_autoplay() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));
    carousel.set_reduced_motion(true);
    assert!(!carousel.is_autoplay_running());
    carousel.advance(Duration::from_millis(5000));
    assert!(calls.borrow().is_empty());
    assert!(!carousel.track_style().animated);
}

#[test]
fn test_single_slide_never_autoplays() {
    let (carousel, _) = carousel(1, autoplaying(1000));
    assert!(!carousel.is_autoplay_running());
    assert_eq!(carousel.timers().pending_count(), 0);
}

#[test]
fn test_manual_navigation_restarts_interval() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));
    carousel.advance(Duration::from_millis(800));
    carousel.go_to_next();
    carousel.advance(Duration::from_millis(800));
    assert_eq!(*calls.borrow(), vec![1]);
    carousel.advance(Duration::from_millis(200));
    assert_eq!(*calls.borrow(), vec![1, 2]);
}

#[test]
fn test_long_gap_fires_once() {
    let options = CarouselOptions {
        loop_slides: true,
        auto_play: true,
        ..CarouselOptions::default()
    };
    let (mut carousel, calls) = carousel(5, options);

    // A backgrounded tab returning after ten minutes.
    let fired = carousel.advance(Duration::from_secs(600));
    assert_eq!(fired, vec![Navigation::Moved { from: 0, to: 1 }]);
    assert_eq!(*calls.borrow(), vec![1]);

    // The next fire is a full interval after the catch-up.
    carousel.advance(Duration::from_millis(5999));
    assert_eq!(*calls.borrow(), vec![1]);
    carousel.advance(Duration::from_millis(1));
    assert_eq!(*calls.borrow(), vec![1, 2]);

    assert_eq!(carousel.advance(Duration::MAX).len(), 1);
}

#[test]
fn test_dispose_leaves_no_pending_timer() {
    let (mut carousel, calls) = carousel(3, autoplaying(1000));
    assert_eq!(carousel.timers().pending_count(), 1);

    carousel.dispose();

    assert_eq!(carousel.timers().pending_count(), 0);
    carousel.advance(Duration::from_millis(10_000));
    assert!(calls.borrow().is_empty());
}

// ============================================================================
// Controlled Mode
// ============================================================================

#[test]
fn test_controlled_next_proposes_without_rendering() {
    let options = CarouselOptions {
        controlled_index: Some(0),
        ..CarouselOptions::default()
    };
    let (mut carousel, calls) = carousel(4, options);

    assert_eq!(carousel.go_to_next(), Navigation::Proposed { to: 1 });
    assert_eq!(*calls.borrow(), vec![1]);
    assert_eq!(carousel.active_index(), 0);

    // The caller may accept something else entirely.
    assert!(carousel.sync_external_index(3));
    assert_eq!(carousel.active_index(), 3);
    assert_eq!(*calls.borrow(), vec![1]);
}

#[test]
fn test_controlled_autoplay_keeps_proposing() {
    let options = CarouselOptions {
        controlled_index: Some(0),
        ..autoplaying(1000)
    };
    let (mut carousel, calls) = carousel(3, options);

    carousel.advance(Duration::from_millis(1000));
    carousel.advance(Duration::from_millis(1000));
    assert_eq!(*calls.borrow(), vec![1, 1]);
    assert_eq!(carousel.active_index(), 0);
}
