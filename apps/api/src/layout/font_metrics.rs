//! Static font-metric table used by every fitting routine.
//!
//! Line heights and average character widths are in inches at the given point size.
//! This is an intentional approximation: one average glyph width per size, no kerning,
//! no per-character lookup. Text measured with it is an estimate of what the renderer
//! will draw, good enough to keep boxes from overflowing.
//!
//! Values follow `line_height = size × 1.2 / 72` and `char_width = size × 0.5 / 72`,
//! rounded to three places.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Approximate metrics for one point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetric {
    pub size: u8,
    /// Baseline-to-baseline distance in inches.
    pub line_height: f32,
    /// Average advance width of one character in inches.
    pub char_width: f32,
}

/// Immutable metric lookup, sorted ascending by `size`.
///
/// Both `line_height` and `char_width` increase strictly with `size`.
#[derive(Debug)]
pub struct FontMetricTable {
    entries: &'static [FontMetric],
}

// ────────────────────────────────────────────────────────────────────────────
// Static table
// ────────────────────────────────────────────────────────────────────────────

const fn m(size: u8, line_height: f32, char_width: f32) -> FontMetric {
    FontMetric {
        size,
        line_height,
        char_width,
    }
}

#[rustfmt::skip]
static STANDARD_ENTRIES: [FontMetric; 13] = [
    m(8,  0.133, 0.056),
    m(10, 0.167, 0.069),
    m(12, 0.200, 0.083),
    m(14, 0.233, 0.097),
    m(16, 0.267, 0.111),
    m(18, 0.300, 0.125),
    m(20, 0.333, 0.139),
    m(22, 0.367, 0.153),
    m(24, 0.400, 0.167),
    m(26, 0.433, 0.181),
    m(28, 0.467, 0.194),
    m(30, 0.500, 0.208),
    m(32, 0.533, 0.222),
];

static STANDARD_TABLE: FontMetricTable = FontMetricTable {
    entries: &STANDARD_ENTRIES,
};

/// Returns the process-wide metric table.
pub fn standard_metrics() -> &'static FontMetricTable {
    &STANDARD_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

impl FontMetricTable {
    pub fn smallest(&self) -> u8 {
        self.entries.first().map(|e| e.size).unwrap_or(0)
    }

    pub fn largest(&self) -> u8 {
        self.entries.last().map(|e| e.size).unwrap_or(0)
    }

    /// Metric for `size`: the entry with the greatest size not above `size`,
    /// or the smallest entry when `size` is below the table. Sizes are snapped, so
    /// callers that report a size should keep it within `smallest()..=largest()`.
    pub fn metric(&self, size: u8) -> FontMetric {
        self.entries
            .iter()
            .rev()
            .find(|e| e.size <= size)
            .or_else(|| self.entries.first())
            .copied()
            .unwrap_or(FontMetric {
                size,
                line_height: f32::from(size) * 1.2 / 72.0,
                char_width: f32::from(size) * 0.5 / 72.0,
            })
    }

    /// Table sizes within `[min, max]`, largest first.
    pub fn candidates(&self, max: u8, min: u8) -> impl Iterator<Item = &FontMetric> + '_ {
        self.entries
            .iter()
            .rev()
            .filter(move |e| e.size <= max && e.size >= min)
    }

    /// Whole characters that fit on one line of `width` at `size`.
    pub fn chars_per_line(&self, width: f32, size: u8) -> usize {
        floor_count(width / self.metric(size).char_width)
    }

    /// Whole lines that fit in `height` at `size`.
    pub fn lines_per_box(&self, height: f32, size: u8) -> usize {
        floor_count(height / self.metric(size).line_height)
    }
}

/// Floors a non-negative ratio to a count. NaN and negatives become 0.
fn floor_count(ratio: f32) -> usize {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.floor() as usize
    } else if ratio == f32::INFINITY {
        usize::MAX
    } else {
        0
    }
}
