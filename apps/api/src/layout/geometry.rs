//! Slide canvas presets and the rectangle type shared by the fit engine.
//!
//! All lengths are inches, matching the drawing API of the presentation serializer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Rect
// ────────────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in slide coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True if the two rectangles share any interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Splits off a band of `height` from the top. Returns `(top, rest)`.
    /// The band is capped at the rectangle's own height.
    pub fn split_top(&self, height: f32) -> (Rect, Rect) {
        let band = height.min(self.height).max(0.0);
        (
            Rect::new(self.x, self.y, self.width, band),
            Rect::new(self.x, self.y + band, self.width, self.height - band),
        )
    }

    /// Shrinks the rectangle by `amount` on every side, never below zero size.
    pub fn inset(&self, amount: f32) -> Rect {
        let width = (self.width - 2.0 * amount).max(0.0);
        let height = (self.height - 2.0 * amount).max(0.0);
        Rect::new(self.x + amount, self.y + amount, width, height)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout presets
// ────────────────────────────────────────────────────────────────────────────

/// Named slide canvas presets. Serialized under the names the serializer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutPreset {
    #[serde(rename = "LAYOUT_16x9")]
    Widescreen16x9,
    #[serde(rename = "LAYOUT_16x10")]
    Widescreen16x10,
    #[serde(rename = "LAYOUT_4x3")]
    Standard4x3,
    #[serde(rename = "LAYOUT_WIDE")]
    Wide,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 4] = [
        LayoutPreset::Widescreen16x9,
        LayoutPreset::Widescreen16x10,
        LayoutPreset::Standard4x3,
        LayoutPreset::Wide,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LayoutPreset::Widescreen16x9 => "LAYOUT_16x9",
            LayoutPreset::Widescreen16x10 => "LAYOUT_16x10",
            LayoutPreset::Standard4x3 => "LAYOUT_4x3",
            LayoutPreset::Wide => "LAYOUT_WIDE",
        }
    }

    /// Canvas `(width, height)` in inches.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            LayoutPreset::Widescreen16x9 => (10.0, 5.625),
            LayoutPreset::Widescreen16x10 => (10.0, 6.25),
            LayoutPreset::Standard4x3 => (10.0, 7.5),
            LayoutPreset::Wide => (13.333, 7.5),
        }
    }

    pub fn layout(&self) -> Layout {
        let (width, height) = self.dimensions();
        Layout {
            preset: *self,
            width,
            height,
        }
    }
}

impl Default for LayoutPreset {
    fn default() -> Self {
        LayoutPreset::Widescreen16x9
    }
}

impl fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout '{0}' (expected one of LAYOUT_16x9, LAYOUT_16x10, LAYOUT_4x3, LAYOUT_WIDE)")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutPreset {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LayoutPreset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLayout(trimmed.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout / safe area
// ────────────────────────────────────────────────────────────────────────────

/// A concrete slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub preset: LayoutPreset,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    /// The full canvas as a rectangle at the origin.
    pub fn canvas(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The margin-inset content region.
    ///
    /// Width and height are floored at zero, so `x + width <= self.width` holds for
    /// any non-negative margin.
    pub fn safe_area(&self, margin: f32) -> Rect {
        let margin = margin.max(0.0);
        let x = margin.min(self.width);
        let y = margin.min(self.height);
        Rect::new(
            x,
            y,
            (self.width - 2.0 * margin).max(0.0),
            (self.height - 2.0 * margin).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_dimensions() {
        let layout = LayoutPreset::Widescreen16x9.layout();
        assert_eq!(layout.width, 10.0);
        assert_eq!(layout.height, 5.625);
        assert_eq!(LayoutPreset::Standard4x3.layout().height, 7.5);
    }

    #[test]
    fn test_preset_parses_by_name() {
        assert_eq!(
            "LAYOUT_16x9".parse::<LayoutPreset>().unwrap(),
            LayoutPreset::Widescreen16x9
        );
        assert_eq!(
            "layout_wide".parse::<LayoutPreset>().unwrap(),
            LayoutPreset::Wide
        );
        assert!("LAYOUT_A4".parse::<LayoutPreset>().is_err());
    }

    #[test]
    fn test_unknown_layout_error_names_choices() {
        let err = "LAYOUT_A4".parse::<LayoutPreset>().unwrap_err();
        assert_eq!(err, UnknownLayout("LAYOUT_A4".to_string()));
        let err: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(
            err.to_string(),
            "unknown layout 'LAYOUT_A4' (expected one of LAYOUT_16x9, LAYOUT_16x10, LAYOUT_4x3, LAYOUT_WIDE)"
        );
    }

    #[test]
    fn test_preset_serializes_under_serializer_name() {
        let json = serde_json::to_string(&LayoutPreset::Widescreen16x10).unwrap();
        assert_eq!(json, "\"LAYOUT_16x10\"");
    }

    #[test]
    fn test_safe_area_stays_inside_canvas() {
        for preset in LayoutPreset::ALL {
            let layout = preset.layout();
            for margin in [0.0, 0.25, 0.5, 3.0, 10.0] {
                let area = layout.safe_area(margin);
                assert!(area.width >= 0.0 && area.height >= 0.0);
                assert!(
                    area.right() <= layout.width + 1e-5,
                    "{preset} margin {margin}: right edge {} past {}",
                    area.right(),
                    layout.width
                );
                assert!(area.bottom() <= layout.height + 1e-5);
            }
        }
    }

    #[test]
    fn test_safe_area_default_margin() {
        let area = LayoutPreset::Widescreen16x9.layout().safe_area(0.5);
        assert_eq!(area, Rect::new(0.5, 0.5, 9.0, 4.625));
    }

    #[test]
    fn test_rect_overlap_ignores_touching_edges() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        let c = Rect::new(0.5, 0.5, 1.0, 1.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_split_top_caps_band() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        let (top, rest) = r.split_top(0.5);
        assert_eq!(top.height, 0.5);
        assert_eq!(rest.y, 0.5);
        assert_eq!(rest.height, 1.5);

        let (top, rest) = r.split_top(5.0);
        assert_eq!(top.height, 2.0);
        assert_eq!(rest.height, 0.0);
    }
}
