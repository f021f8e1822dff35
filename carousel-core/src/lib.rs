//! # Showroom Carousel Core
//!
//! Carousel engine for the showroom's vehicle galleries and hero reel.
//! Compiles to WASM so the same state machine runs in the browser and in
//! headless replay.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             carousel-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Index Ownership   │  Input Handling        │
//! │  - Owned / External│  - Pointer drag        │
//! │  - Wrap or clamp   │  - Arrow keys          │
//! │  - Announcements   │  - Hover / focus       │
//! ├─────────────────────────────────────────────┤
//! │  Autoplay          │  Render Views          │
//! │  - Timer driver    │  - Track transform     │
//! │  - Suspension      │  - Slides, dots, arrows│
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod autoplay;
pub mod carousel;
pub mod drag;
pub mod error;
pub mod event;
pub mod host;
pub mod index;
pub mod options;
pub mod render;
pub mod slide;
pub mod timer;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use autoplay::{Autoplay, AutoplayGate};
pub use carousel::{
    CaptureChange, Carousel, IndexObserver, InputOutcome, KeyResponse, Navigation,
    PointerResponse,
};
pub use drag::{DragSession, DragTracker, SwipeDirection, DRAG_ACTIVATION_PX, SWIPE_THRESHOLD_RATIO};
pub use error::{CarouselError, CarouselResult};
pub use event::{CarouselInput, NavigationKey, PointerEvent, PointerId, PointerPhase};
pub use host::{frame_elapsed, ClickGuard, IndexQueue};
pub use index::{normalize, IndexOwner};
pub use options::{CarouselOptions, DEFAULT_ARIA_LABEL, DEFAULT_AUTOPLAY_INTERVAL_MS};
pub use render::{ControlsView, DotView, RegionView, SlideView, TrackStyle};
pub use slide::Slide;
pub use timer::{ManualTimers, TimerDriver, TimerToken};

/// Carousel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
