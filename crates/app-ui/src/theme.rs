//! Preference dimensions and theme tables
//!
//! Each of the four user-facing appearance settings is a closed enum with a
//! canonical lowercase token. The token is what gets persisted and what the
//! root style surface carries.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::{ColorPalette, FontSize, PreferenceState, ThemeColors};
//!
//! let state = PreferenceState::default();
//! assert_eq!(state.font_size.scale().base, 16);
//! assert_eq!(ColorPalette::Pink.accent().primary, "#EC4899");
//!
//! let colors = ThemeColors::resolve(&state);
//! assert_eq!(colors.background, "#FFFFFF");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A color represented as a hex or rgba() string
pub type Color = &'static str;

/// Error returned when a token does not name a value of a dimension
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {dimension} value: {value}")]
pub struct ParsePreferenceError {
    /// Dimension being parsed
    pub dimension: &'static str,
    /// Rejected input
    pub value: String,
}

impl ParsePreferenceError {
    fn new(dimension: &'static str, value: &str) -> Self {
        Self { dimension, value: value.to_string() }
    }
}

// =============================================================================
// Appearance Mode
// =============================================================================

/// Light/dark display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    /// Light mode
    #[default]
    Light,
    /// Dark mode
    Dark,
}

impl AppearanceMode {
    /// All modes
    pub const ALL: [AppearanceMode; 2] = [AppearanceMode::Light, AppearanceMode::Dark];

    /// Persisted token and root class name
    pub fn as_str(&self) -> &'static str {
        match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            AppearanceMode::Light => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
        }
    }

    /// Whether this is the dark mode
    pub fn is_dark(&self) -> bool {
        matches!(self, AppearanceMode::Dark)
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppearanceMode {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(AppearanceMode::Light),
            "dark" => Ok(AppearanceMode::Dark),
            _ => Err(ParsePreferenceError::new("appearance mode", s)),
        }
    }
}

// =============================================================================
// Color Palette
// =============================================================================

/// Accent color palette applied on top of the appearance mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorPalette {
    /// Built-in palette, no extra class
    #[default]
    Default,
    /// Purple accent
    Purple,
    /// Pink accent
    Pink,
    /// Blue accent
    Blue,
    /// Green accent
    Green,
}

/// Accent colors of a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentColors {
    /// Main accent
    pub primary: Color,
    /// Lighter variant
    pub light: Color,
    /// Darker variant
    pub dark: Color,
}

impl ColorPalette {
    /// All palettes, `Default` first
    pub const ALL: [ColorPalette; 5] = [
        ColorPalette::Default,
        ColorPalette::Purple,
        ColorPalette::Pink,
        ColorPalette::Blue,
        ColorPalette::Green,
    ];

    /// Persisted token
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorPalette::Default => "default",
            ColorPalette::Purple => "purple",
            ColorPalette::Pink => "pink",
            ColorPalette::Blue => "blue",
            ColorPalette::Green => "green",
        }
    }

    /// Root class for this palette, `None` for the default palette
    pub fn class_name(&self) -> Option<&'static str> {
        match self {
            ColorPalette::Default => None,
            ColorPalette::Purple => Some("theme-purple"),
            ColorPalette::Pink => Some("theme-pink"),
            ColorPalette::Blue => Some("theme-blue"),
            ColorPalette::Green => Some("theme-green"),
        }
    }

    /// Accent colors. The default palette uses the blue accent.
    pub fn accent(&self) -> AccentColors {
        match self {
            ColorPalette::Default | ColorPalette::Blue => {
                AccentColors { primary: "#1877F2", light: "#60A5FA", dark: "#1565D8" }
            }
            ColorPalette::Purple => {
                AccentColors { primary: "#A855F7", light: "#C084FC", dark: "#9333EA" }
            }
            ColorPalette::Pink => {
                AccentColors { primary: "#EC4899", light: "#F472B6", dark: "#DB2777" }
            }
            ColorPalette::Green => {
                AccentColors { primary: "#22C55E", light: "#4ADE80", dark: "#16A34A" }
            }
        }
    }

    /// Label shown in the settings screen
    pub fn display_name(&self) -> &'static str {
        match self {
            ColorPalette::Default => "Default",
            ColorPalette::Purple => "Purple",
            ColorPalette::Pink => "Pink",
            ColorPalette::Blue => "Blue",
            ColorPalette::Green => "Green",
        }
    }

    /// What the palette stands for
    pub fn description(&self) -> &'static str {
        match self {
            ColorPalette::Default => "Standard CampusTrace colors",
            ColorPalette::Purple => "Gender & Development awareness",
            ColorPalette::Pink => "Breast cancer awareness",
            ColorPalette::Blue => "Autism awareness & accessibility",
            ColorPalette::Green => "Environmental awareness",
        }
    }
}

impl fmt::Display for ColorPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorPalette {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(ColorPalette::Default),
            "purple" => Ok(ColorPalette::Purple),
            "pink" => Ok(ColorPalette::Pink),
            "blue" => Ok(ColorPalette::Blue),
            "green" => Ok(ColorPalette::Green),
            _ => Err(ParsePreferenceError::new("color palette", s)),
        }
    }
}

// =============================================================================
// Font Size
// =============================================================================

/// Accessibility font size setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Small text
    Small,
    /// Standard text
    #[default]
    Medium,
    /// Large text
    Large,
    /// Extra large text
    XLarge,
}

/// Point sizes for each text role at a given font size setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontScale {
    /// Captions and badges
    pub tiny: u16,
    /// Secondary text
    pub small: u16,
    /// Body text
    pub base: u16,
    /// Emphasized body text
    pub medium: u16,
    /// Section headings
    pub large: u16,
    /// Screen titles
    pub xlarge: u16,
    /// Hero text
    pub xxlarge: u16,
}

impl FontSize {
    /// All font sizes, smallest first
    pub const ALL: [FontSize; 4] =
        [FontSize::Small, FontSize::Medium, FontSize::Large, FontSize::XLarge];

    /// Persisted token and `data-font-size` value
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
            FontSize::XLarge => "xlarge",
        }
    }

    /// Point sizes for this setting
    pub fn scale(&self) -> FontScale {
        match self {
            FontSize::Small => FontScale {
                tiny: 10,
                small: 12,
                base: 14,
                medium: 16,
                large: 18,
                xlarge: 20,
                xxlarge: 24,
            },
            FontSize::Medium => FontScale {
                tiny: 11,
                small: 13,
                base: 16,
                medium: 18,
                large: 20,
                xlarge: 24,
                xxlarge: 28,
            },
            FontSize::Large => FontScale {
                tiny: 12,
                small: 14,
                base: 18,
                medium: 20,
                large: 22,
                xlarge: 26,
                xxlarge: 32,
            },
            FontSize::XLarge => FontScale {
                tiny: 13,
                small: 15,
                base: 20,
                medium: 22,
                large: 24,
                xlarge: 28,
                xxlarge: 36,
            },
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            "xlarge" => Ok(FontSize::XLarge),
            _ => Err(ParsePreferenceError::new("font size", s)),
        }
    }
}

// =============================================================================
// Contrast Level
// =============================================================================

/// Normal or high-contrast rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLevel {
    /// Regular contrast
    #[default]
    Normal,
    /// High contrast
    High,
}

impl ContrastLevel {
    /// All contrast levels
    pub const ALL: [ContrastLevel; 2] = [ContrastLevel::Normal, ContrastLevel::High];

    /// Persisted token
    pub fn as_str(&self) -> &'static str {
        match self {
            ContrastLevel::Normal => "normal",
            ContrastLevel::High => "high",
        }
    }

    /// The other level
    pub fn toggled(self) -> Self {
        match self {
            ContrastLevel::Normal => ContrastLevel::High,
            ContrastLevel::High => ContrastLevel::Normal,
        }
    }

    /// Whether high contrast is on
    pub fn is_high(&self) -> bool {
        matches!(self, ContrastLevel::High)
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContrastLevel {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(ContrastLevel::Normal),
            "high" => Ok(ContrastLevel::High),
            _ => Err(ParsePreferenceError::new("contrast level", s)),
        }
    }
}

// =============================================================================
// Preference State
// =============================================================================

/// Current value of every preference dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceState {
    /// Light or dark
    pub appearance_mode: AppearanceMode,
    /// Accent palette
    pub color_palette: ColorPalette,
    /// Text size
    pub font_size: FontSize,
    /// Contrast treatment
    pub contrast_level: ContrastLevel,
}

// =============================================================================
// Semantic Colors
// =============================================================================

/// Semantic colors for the current preference combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Accent colors
    pub accent: AccentColors,
    /// Screen background
    pub background: Color,
    /// Raised surfaces
    pub surface: Color,
    /// Card background
    pub card: Color,
    /// Primary text
    pub text: Color,
    /// Secondary text
    pub text_secondary: Color,
    /// Tertiary text
    pub text_tertiary: Color,
    /// Borders
    pub border: Color,
    /// Dividers
    pub divider: Color,
    /// Success status
    pub success: Color,
    /// Error status
    pub error: Color,
    /// Warning status
    pub warning: Color,
    /// Info status
    pub info: Color,
    /// Modal overlay
    pub overlay: Color,
    /// Drop shadow
    pub shadow: Color,
}

impl ThemeColors {
    /// Resolve colors. High contrast takes precedence over dark mode.
    pub fn resolve(state: &PreferenceState) -> Self {
        let dark = state.appearance_mode.is_dark();
        // (high contrast, dark, light)
        let pick = |hc: Color, d: Color, l: Color| -> Color {
            if state.contrast_level.is_high() {
                hc
            } else if dark {
                d
            } else {
                l
            }
        };
        let status = |hc: Color, normal: Color| -> Color {
            if state.contrast_level.is_high() {
                hc
            } else {
                normal
            }
        };

        Self {
            accent: state.color_palette.accent(),
            background: pick("#000000", "#1A1A1A", "#FFFFFF"),
            surface: pick("#000000", "#2A2A2A", "#FAFAFA"),
            card: pick("#000000", "#2A2A2A", "#FFFFFF"),
            text: pick("#FFFFFF", "#FFFFFF", "#000000"),
            text_secondary: pick("#FFFFFF", "#9CA3AF", "#6B7280"),
            text_tertiary: pick("#FFFFFF", "#6B7280", "#9CA3AF"),
            border: pick("#FFFFFF", "#3A3A3A", "#E5E7EB"),
            divider: pick("#FFFFFF", "#2A2A2A", "#F3F4F6"),
            success: status("#00FF00", "#10B981"),
            error: status("#FF0000", "#EF4444"),
            warning: status("#FFFF00", "#F59E0B"),
            info: status("#00FFFF", "#3B82F6"),
            overlay: "rgba(0, 0, 0, 0.5)",
            shadow: if dark { "rgba(0, 0, 0, 0.8)" } else { "rgba(0, 0, 0, 0.1)" },
        }
    }
}
