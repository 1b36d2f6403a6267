//! Rendering model for the document root.
//!
//! The session never touches a document directly. It publishes a [`ViewState`] and a
//! renderer turns that into root classes and a root font size.

use serde::{Serialize, Serializer};
use std::sync::atomic::{AtomicBool, Ordering};

/// Root font size in tenths of a rem, kept within [0.8, 1.5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontScale(u8);

impl FontScale {
    pub const MIN: FontScale = FontScale(8);
    pub const MAX: FontScale = FontScale(15);
    pub const DEFAULT: FontScale = FontScale(10);

    pub fn increased(self) -> Self {
        FontScale((self.0 + 1).min(Self::MAX.0))
    }

    pub fn decreased(self) -> Self {
        FontScale(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    pub fn as_rem(self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// Size relative to the default, as announced to the user (e.g. 110).
    pub fn percent(self) -> u32 {
        u32::from(self.0) * 10
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Serialize for FontScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.as_rem())
    }
}

/// Process-wide keyboard navigation flag: set by Tab, cleared by a mouse press.
static KEYBOARD_NAVIGATION: AtomicBool = AtomicBool::new(false);

/// Record a key press. Only Tab switches to keyboard navigation.
pub fn note_key_down(key: &str) {
    if key == "Tab" {
        KEYBOARD_NAVIGATION.store(true, Ordering::Relaxed);
    }
}

pub fn note_mouse_down() {
    KEYBOARD_NAVIGATION.store(false, Ordering::Relaxed);
}

pub fn keyboard_navigation() -> bool {
    KEYBOARD_NAVIGATION.load(Ordering::Relaxed)
}

/// Everything a renderer needs to style the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub high_contrast: bool,
    pub dyslexia_friendly: bool,
    pub grayscale: bool,
    pub keyboard_navigation: bool,
    pub font_scale: FontScale,
}

impl ViewState {
    /// Classes to set on the root element, in a stable order.
    pub fn root_classes(&self) -> Vec<&'static str> {
        [
            (self.high_contrast, "high-contrast"),
            (self.keyboard_navigation, "keyboard-nav"),
            (self.dyslexia_friendly, "dyslexia-friendly"),
            (self.grayscale, "grayscale"),
        ]
        .into_iter()
        .filter_map(|(on, class)| on.then_some(class))
        .collect()
    }

    /// Value for the root `class` attribute.
    pub fn root_class_attr(&self) -> String {
        self.root_classes().join(" ")
    }

    /// Value for the root `font-size` style.
    pub fn root_font_size(&self) -> String {
        format!("{:.1}rem", self.font_scale.as_rem())
    }
}
