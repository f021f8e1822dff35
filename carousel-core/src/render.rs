//! View models the host renders from.

use serde::Serialize;

/// Transition applied while the track settles on a slide.
pub const TRACK_TRANSITION: &str = "transform 500ms ease";

/// Horizontal placement of the slide track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackStyle {
    /// Slide the track is aligned to.
    pub active_index: usize,
    /// Live drag displacement in pixels, zero when no session is open.
    pub drag_offset_px: f32,
    /// Whether position changes should animate.
    pub animated: bool,
}

impl TrackStyle {
    /// CSS `transform` value.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!(
            "translateX(calc(-{} * 100% + {}px))",
            self.active_index, self.drag_offset_px
        )
    }

    /// CSS `transition` value.
    #[must_use]
    pub const fn transition_css(&self) -> &'static str {
        if self.animated {
            TRACK_TRANSITION
        } else {
            "none"
        }
    }
}

/// The labelled region wrapping the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView {
    /// `role` attribute.
    pub role: &'static str,
    /// `aria-roledescription` attribute.
    pub role_description: &'static str,
    /// `aria-label` attribute.
    pub label: String,
}

impl RegionView {
    pub(crate) fn new(label: &str) -> Self {
        Self {
            role: "region",
            role_description: "carousel",
            label: label.to_string(),
        }
    }
}

/// One slide as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideView {
    /// Position in the slide list.
    pub index: usize,
    /// Stable key for the host's diffing.
    pub key: String,
    /// Accessibility label.
    pub label: String,
    /// Hidden from assistive technology (every slide but the active one).
    pub hidden: bool,
}

/// A dot in the slide selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DotView {
    /// Slide the dot selects.
    pub index: usize,
    /// Accessibility label.
    pub label: String,
    /// Whether this dot marks the active slide.
    pub active: bool,
}

/// Previous/next buttons and the dot selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsView {
    /// Whether the arrow buttons are rendered at all.
    pub show_arrows: bool,
    /// Previous button is disabled (first slide, no loop).
    pub previous_disabled: bool,
    /// Next button is disabled (last slide, no loop).
    pub next_disabled: bool,
    /// Dots, empty when hidden.
    pub dots: Vec<DotView>,
}

impl ControlsView {
    pub(crate) fn build(
        active: usize,
        slide_count: usize,
        loop_slides: bool,
        show_dots: bool,
    ) -> Self {
        let multiple = slide_count > 1;
        let dots = if multiple && show_dots {
            (0..slide_count)
                .map(|index| DotView {
                    index,
                    label: format!("Go to slide {}", index + 1),
                    active: index == active,
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            show_arrows: multiple,
            previous_disabled: !loop_slides && active == 0,
            next_disabled: !loop_slides && active + 1 >= slide_count,
            dots,
        }
    }
}

/// Live-region text for the active slide, empty without slides.
#[must_use]
pub fn announcement(active: usize, slide_count: usize) -> String {
    if slide_count == 0 {
        return String::new();
    }
    format!("Slide {} of {}", active + 1, slide_count)
}
