//! Slide descriptions coming in (as proposed by the LLM) and positioned text-box
//! descriptors going out to the presentation serializer.

use serde::{Deserialize, Serialize};

use crate::deck::theme::Palette;
use crate::layout::{FontBounds, Layout, Rect};

// ────────────────────────────────────────────────────────────────────────────
// Input: slide descriptions
// ────────────────────────────────────────────────────────────────────────────

/// One slide as described by the model. Tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideSpec {
    Title {
        #[serde(default)]
        title: String,
        #[serde(default)]
        subtitle: Option<String>,
    },
    Bullets {
        #[serde(default)]
        title: String,
        #[serde(default)]
        bullets: Vec<String>,
    },
    Text {
        #[serde(default)]
        title: String,
        #[serde(default)]
        body: String,
    },
    Grid {
        #[serde(default)]
        title: String,
        #[serde(default)]
        items: Vec<GridItemSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItemSpec {
    pub heading: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub slides: Vec<SlideSpec>,
}

/// Per-request overrides. Anything left out falls back to the service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckOptions {
    pub layout_name: Option<String>,
    pub color_scheme: Option<String>,
    pub max_font_size: Option<u8>,
    pub min_font_size: Option<u8>,
    pub margin_factor: Option<f32>,
    pub max_bullets_per_slide: Option<usize>,
}

/// Fully resolved settings for one assembly run.
#[derive(Debug, Clone)]
pub struct DeckSettings {
    pub layout: Layout,
    pub palette: Palette,
    /// Bounds for body text; titles search from their own larger maximum.
    pub font_bounds: FontBounds,
    pub margin_factor: f32,
    /// Inset of the safe area from the canvas edge, in inches.
    pub slide_margin: f32,
    pub word_break_threshold: f32,
    pub max_bullets_per_slide: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Output: positioned descriptors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    Title,
    Subtitle,
    Body,
    Bullets,
    /// Background shape of a grid cell. Carries no text.
    Cell,
    CellHeading,
    CellBody,
}

/// A text box (or filled shape) ready for the serializer's drawing primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBoxDescriptor {
    pub role: ElementRole,
    pub text: String,
    pub rect: Rect,
    pub font_size: u8,
    /// False when the text could not fit at the floor size and was truncated.
    pub fits: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Render each `\n`-separated line as a bullet point.
    pub bullet: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedSlide {
    pub index: usize,
    /// Index of the `SlideSpec` this slide was produced from.
    pub source_index: usize,
    /// True for the second and later slides produced from one description.
    pub continuation: bool,
    pub background: String,
    pub elements: Vec<TextBoxDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub layout: Layout,
    pub safe_area: Rect,
    pub palette: Palette,
    pub slides: Vec<PositionedSlide>,
    /// Number of elements left with `fits: false`.
    pub overflow_count: usize,
}
