//! WebAssembly bindings for carousel-core.
//!
//! The page forwards DOM events to a [`WasmCarousel`] and drives its timer
//! from `requestAnimationFrame`:
//!
//! ```text
//! const carousel = new WasmCarousel(track, slidesJson, optionsJson, onChange);
//! track.addEventListener('pointerdown', (e) => carousel.pointerDown(e));
//! track.addEventListener('pointerup', (e) => carousel.pointerUp(e));
//! track.addEventListener('click', (e) => carousel.click(e), true);
//! requestAnimationFrame(function frame(t) { carousel.tick(t - last); ... });
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent, PointerEvent, Window};

use crate::host::{frame_elapsed, ClickGuard, IndexQueue};
use crate::{CaptureChange, Carousel, CarouselOptions, ManualTimers, Slide};

type SharedCarousel = Rc<RefCell<Carousel<ManualTimers>>>;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Initialize the carousel WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Window `resize` listener, removed when dropped.
struct ResizeSubscription {
    window: Window,
    listener: Closure<dyn FnMut()>,
}

impl ResizeSubscription {
    fn subscribe(
        window: Window,
        engine: &SharedCarousel,
        track: &HtmlElement,
    ) -> Result<Self, JsValue> {
        let engine = Rc::clone(engine);
        let track = track.clone();
        let listener = Closure::<dyn FnMut()>::new(move || {
            if let Ok(mut carousel) = engine.try_borrow_mut() {
                carousel.on_resize(track_width(&track));
            }
        });
        window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
        Ok(Self { window, listener })
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("resize", self.listener.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "Failed to remove resize listener");
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn track_width(track: &HtmlElement) -> f32 {
    track.client_width() as f32
}

#[allow(clippy::cast_precision_loss)]
fn client_x(event: &MouseEvent) -> f32 {
    event.client_x() as f32
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Carousel instance for WASM.
#[wasm_bindgen]
pub struct WasmCarousel {
    engine: SharedCarousel,
    track: HtmlElement,
    notifications: IndexQueue,
    on_change: Option<js_sys::Function>,
    resize: RefCell<Option<ResizeSubscription>>,
    click_guard: ClickGuard,
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Create a carousel bound to `track`.
    ///
    /// # Errors
    ///
    /// Returns an error string if the slides or options JSON is invalid, the
    /// options are rejected, or the resize listener cannot be registered.
    #[wasm_bindgen(constructor)]
    pub fn new(
        track: HtmlElement,
        slides_json: &str,
        options_json: &str,
        on_change: Option<js_sys::Function>,
    ) -> Result<WasmCarousel, String> {
        let slides = Slide::list_from_json(slides_json).map_err(|e| e.to_string())?;
        let mut options = CarouselOptions::from_json(options_json).map_err(|e| e.to_string())?;

        let window = web_sys::window();
        if let Some(window) = &window {
            options.reduced_motion |= prefers_reduced_motion(window);
        }

        let notifications = IndexQueue::new();
        let mut carousel = Carousel::with_manual_timers(slides, options)
            .map_err(|e| e.to_string())?
            .with_observer(notifications.observer());
        carousel.set_track_width(track_width(&track));
        let engine = Rc::new(RefCell::new(carousel));

        let resize = window
            .map(|window| ResizeSubscription::subscribe(window, &engine, &track))
            .transpose()
            .map_err(|err| format!("Failed to subscribe to resize: {err:?}"))?;

        Ok(Self {
            engine,
            track,
            notifications,
            on_change,
            resize: RefCell::new(resize),
            click_guard: ClickGuard::new(),
        })
    }

    /// Forward `pointerdown`.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, event: &PointerEvent) {
        self.engine
            .borrow_mut()
            .on_pointer_down(event.pointer_id(), client_x(event));
        self.flush();
    }

    /// Forward `pointermove`.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, event: &PointerEvent) {
        let response = self
            .engine
            .borrow_mut()
            .on_pointer_move(event.pointer_id(), client_x(event));
        self.apply_capture(response.capture);
    }

    /// Forward `pointerup`, `pointercancel` and `pointerleave`.
    ///
    /// The track is measured again first, so a layout change without a
    /// window resize still gets the right swipe threshold.
    ///
    /// Returns `true` when the click that follows will be swallowed.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, event: &PointerEvent) -> bool {
        let width = track_width(&self.track);
        let response = {
            let mut engine = self.engine.borrow_mut();
            engine.set_track_width(width);
            engine.on_pointer_up(event.pointer_id())
        };
        self.apply_capture(response.capture);
        if response.suppress_click {
            event.prevent_default();
            event.stop_propagation();
            self.click_guard.arm_after(&event.type_());
        }
        self.flush();
        response.suppress_click
    }

    /// Forward `click` (register in the capture phase). Swallows the click
    /// synthesized after a drag.
    pub fn click(&self, event: &MouseEvent) {
        if self.click_guard.take() {
            event.prevent_default();
            event.stop_propagation();
        }
    }

    /// Forward `keydown`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, event: &KeyboardEvent) {
        let response = self.engine.borrow_mut().on_key(&event.key());
        if response.prevent_default {
            event.prevent_default();
        }
        self.flush();
    }

    /// Pointer entered (`true`) or left (`false`) the carousel.
    #[wasm_bindgen(js_name = setHovered)]
    pub fn set_hovered(&self, hovered: bool) {
        self.engine.borrow_mut().set_hovered(hovered);
    }

    /// Focus entered (`true`) or left (`false`) the carousel.
    #[wasm_bindgen(js_name = setFocused)]
    pub fn set_focused(&self, focused: bool) {
        self.engine.borrow_mut().set_focused(focused);
    }

    /// Reduced-motion media query changed.
    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&self, reduce: bool) {
        self.engine.borrow_mut().set_reduced_motion(reduce);
    }

    /// Next button.
    pub fn next(&self) {
        self.engine.borrow_mut().go_to_next();
        self.flush();
    }

    /// Previous button.
    pub fn previous(&self) {
        self.engine.borrow_mut().go_to_previous();
        self.flush();
    }

    /// Dot selection.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: i32) {
        self.engine.borrow_mut().go_to(i64::from(index));
        self.flush();
    }

    /// Supply the caller-owned index (controlled mode).
    #[wasm_bindgen(js_name = syncIndex)]
    pub fn sync_index(&self, index: u32) -> bool {
        let index = usize::try_from(index).unwrap_or(usize::MAX);
        self.engine.borrow_mut().sync_external_index(index)
    }

    /// Advance the autoplay clock by `elapsed_ms`. Unusable deltas (NaN,
    /// negative, absurdly large) are ignored; a long gap fires at most once.
    pub fn tick(&self, elapsed_ms: f64) {
        let Some(elapsed) = frame_elapsed(elapsed_ms) else {
            return;
        };
        self.engine.borrow_mut().advance(elapsed);
        self.flush();
    }

    /// Re-measure the track (e.g. from a `ResizeObserver`).
    pub fn measure(&self) {
        let width = track_width(&self.track);
        self.engine.borrow_mut().on_resize(width);
    }

    /// Currently rendered slide.
    #[wasm_bindgen(js_name = activeIndex)]
    #[must_use]
    pub fn active_index(&self) -> u32 {
        u32::try_from(self.engine.borrow().active_index()).unwrap_or(u32::MAX)
    }

    /// Live-region text.
    #[must_use]
    pub fn announcement(&self) -> String {
        self.engine.borrow().announcement().to_string()
    }

    /// CSS `transform` for the track.
    #[wasm_bindgen(js_name = trackTransform)]
    #[must_use]
    pub fn track_transform(&self) -> String {
        self.engine.borrow().track_style().transform_css()
    }

    /// CSS `transition` for the track.
    #[wasm_bindgen(js_name = trackTransition)]
    #[must_use]
    pub fn track_transition(&self) -> String {
        self.engine.borrow().track_style().transition_css().to_string()
    }

    /// Slide render state as JSON.
    #[wasm_bindgen(js_name = getSlidesJson)]
    #[must_use]
    pub fn get_slides_json(&self) -> String {
        serde_json::to_string(&self.engine.borrow().slide_views()).unwrap_or_default()
    }

    /// Region role and label as JSON.
    #[wasm_bindgen(js_name = getRegionJson)]
    #[must_use]
    pub fn get_region_json(&self) -> String {
        serde_json::to_string(&self.engine.borrow().region()).unwrap_or_default()
    }

    /// Arrow and dot state as JSON.
    #[wasm_bindgen(js_name = getControlsJson)]
    #[must_use]
    pub fn get_controls_json(&self) -> String {
        serde_json::to_string(&self.engine.borrow().controls()).unwrap_or_default()
    }

    /// Remove listeners and stop autoplay.
    pub fn dispose(&self) {
        self.resize.borrow_mut().take();
        self.engine.borrow_mut().dispose();
        self.notifications.clear();
    }
}

impl WasmCarousel {
    fn apply_capture(&self, change: Option<CaptureChange>) {
        let result = match change {
            Some(CaptureChange::Capture(id)) => self.track.set_pointer_capture(id),
            Some(CaptureChange::Release(id)) => self.track.release_pointer_capture(id),
            None => return,
        };
        if let Err(err) = result {
            tracing::trace!(?err, "Pointer capture change rejected");
        }
    }

    /// Deliver queued index notifications once the engine is no longer
    /// borrowed, so the callback may call back into this instance.
    fn flush(&self) {
        let pending = self.notifications.drain();
        let Some(callback) = &self.on_change else {
            return;
        };
        for index in pending {
            let value = JsValue::from(u32::try_from(index).unwrap_or(u32::MAX));
            if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                tracing::warn!(?err, "Index change callback threw");
            }
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::Event;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const THREE_SLIDES: &str = "[{},{},{}]";

    fn detached_track() -> HtmlElement {
        web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }

    fn fire_window_resize() {
        let window = web_sys::window().unwrap();
        window
            .dispatch_event(&Event::new("resize").unwrap())
            .unwrap();
    }

    #[wasm_bindgen_test]
    fn resize_listener_cancels_drag_until_dropped() {
        let window = web_sys::window().unwrap();
        let engine: SharedCarousel = Rc::new(RefCell::new(
            Carousel::with_manual_timers(vec![Slide::default(); 3], CarouselOptions::default())
                .unwrap(),
        ));
        let subscription =
            ResizeSubscription::subscribe(window, &engine, &detached_track()).unwrap();

        engine.borrow_mut().on_pointer_down(1, 100.0);
        fire_window_resize();
        assert!(engine.borrow().drag_session().is_none());

        drop(subscription);
        engine.borrow_mut().on_pointer_down(1, 100.0);
        fire_window_resize();
        assert!(engine.borrow().drag_session().is_some());
    }

    #[wasm_bindgen_test]
    fn dispose_removes_resize_listener() {
        let carousel = WasmCarousel::new(detached_track(), THREE_SLIDES, "{}", None).unwrap();
        assert!(carousel.resize.borrow().is_some());

        carousel.dispose();
        assert!(carousel.resize.borrow().is_none());
        fire_window_resize();
    }

    #[wasm_bindgen_test]
    fn tick_ignores_unusable_deltas_and_coalesces_gaps() {
        let carousel = WasmCarousel::new(
            detached_track(),
            THREE_SLIDES,
            r#"{"loop":true,"autoPlay":true,"autoPlayIntervalMs":1000}"#,
            None,
        )
        .unwrap();
        carousel.set_reduced_motion(false);

        for delta in [f64::NAN, f64::INFINITY, -16.0, 0.0, 1e300] {
            carousel.tick(delta);
        }
        assert_eq!(carousel.active_index(), 0);

        carousel.tick(600_000.0);
        assert_eq!(carousel.active_index(), 1);
    }

    #[wasm_bindgen_test]
    fn change_callback_receives_each_index() {
        let callback = js_sys::Function::new_with_args(
            "index",
            "globalThis.__carouselSeen = (globalThis.__carouselSeen || []).concat([index]);",
        );
        let carousel =
            WasmCarousel::new(detached_track(), THREE_SLIDES, "{}", Some(callback)).unwrap();

        carousel.next();
        carousel.go_to(2);

        let seen = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__carouselSeen"))
            .unwrap();
        let seen: Vec<f64> = js_sys::Array::from(&seen)
            .iter()
            .filter_map(|value| value.as_f64())
            .collect();
        assert_eq!(seen, vec![1.0, 2.0]);
        assert_eq!(carousel.announcement(), "Slide 3 of 3");
    }

    #[wasm_bindgen_test]
    fn unmeasured_track_release_does_not_swipe() {
        let carousel = WasmCarousel::new(detached_track(), THREE_SLIDES, "{}", None).unwrap();
        let response = {
            let mut engine = carousel.engine.borrow_mut();
            engine.on_pointer_down(1, 500.0);
            engine.on_pointer_move(1, 100.0);
            engine.on_pointer_up(1)
        };
        assert!(response.suppress_click);
        assert_eq!(carousel.active_index(), 0);
    }
}
