//! Root style reflection
//!
//! Mirrors the preference state onto the root element's class list and
//! attributes. The web host copies [`RootStyle`] onto `<html>`; other hosts
//! read the same classes to pick their styles.

use crate::preferences::PreferenceObserver;
use crate::theme::{AppearanceMode, ColorPalette, PreferenceState};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Attribute carrying the font size token
pub const FONT_SIZE_ATTRIBUTE: &str = "data-font-size";

/// Class present while high contrast is on
pub const HIGH_CONTRAST_CLASS: &str = "theme-high-contrast";

/// Class list and attributes of the root element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootStyle {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

impl RootStyle {
    /// Empty root style
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a class is present
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add a class
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    /// Remove a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Classes in sorted order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Read an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Space-separated class list, as written to the `class` attribute
    pub fn class_list(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

/// Write the preference state onto a root style
///
/// Only the classes and attribute owned by the preferences are touched.
pub fn apply_preferences(root: &mut RootStyle, state: &PreferenceState) {
    for mode in AppearanceMode::ALL {
        root.remove_class(mode.as_str());
    }
    root.add_class(state.appearance_mode.as_str());

    for class in ColorPalette::ALL.iter().filter_map(ColorPalette::class_name) {
        root.remove_class(class);
    }
    if let Some(class) = state.color_palette.class_name() {
        root.add_class(class);
    }

    root.set_attribute(FONT_SIZE_ATTRIBUTE, state.font_size.as_str());

    if state.contrast_level.is_high() {
        root.add_class(HIGH_CONTRAST_CLASS);
    } else {
        root.remove_class(HIGH_CONTRAST_CLASS);
    }
}

/// Observer that keeps a shared [`RootStyle`] in sync with the store
#[derive(Debug, Clone, Default)]
pub struct StyleReflector {
    root: Arc<RwLock<RootStyle>>,
}

impl StyleReflector {
    /// Reflector over a fresh root style
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflector over an existing root style, keeping its other classes
    pub fn with_root(root: RootStyle) -> Self {
        Self { root: Arc::new(RwLock::new(root)) }
    }

    /// Current root style
    pub fn snapshot(&self) -> RootStyle {
        self.root.read().clone()
    }
}

impl PreferenceObserver for StyleReflector {
    fn preferences_changed(&self, state: &PreferenceState) {
        apply_preferences(&mut self.root.write(), state);
    }
}
