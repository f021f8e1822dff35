//! Slides - the units a carousel presents one at a time.

use serde::{Deserialize, Serialize};

/// One renderable unit shown by a carousel.
///
/// The carousel never inspects `content`; it only orders slides and decides
/// which one is visible. Hosts put whatever they need to render the slide in
/// there (an image URL, a vehicle id, a template name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Stable key used by the host when diffing rendered slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Accessibility label announced for this slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Opaque render payload.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Slide {
    /// Create a slide carrying only render content.
    #[must_use]
    pub fn new(content: serde_json::Value) -> Self {
        Self {
            key: None,
            label: None,
            content,
        }
    }

    /// Set the stable key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the accessibility label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label for the slide at `index`, falling back to `Slide {n}`.
    #[must_use]
    pub fn label_or_default(&self, index: usize) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| format!("Slide {}", index + 1))
    }

    /// Key for the slide at `index`, falling back to its position.
    #[must_use]
    pub fn key_or_default(&self, index: usize) -> String {
        self.key.clone().unwrap_or_else(|| index.to_string())
    }

    /// Parse a slide list from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Serialization`](crate::CarouselError) if the
    /// JSON is not an array of slides.
    pub fn list_from_json(json: &str) -> crate::CarouselResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
