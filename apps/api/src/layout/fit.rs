//! Font-size search: the largest candidate size at which text fits a container.
//!
//! Widths are estimated as `characters × char_width`, heights as `lines × line_height`.
//! Neither search ever fails. When no candidate fits, the floor size is returned with
//! `fits: false` and the caller decides whether to truncate, split, or accept overflow.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontMetricTable;

pub const DEFAULT_MAX_FONT_SIZE: u8 = 24;
pub const MIN_FONT_SIZE: u8 = 8;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of a font-size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size: u8,
    /// False when no candidate satisfied both constraints and `font_size` is the floor.
    pub fits: bool,
}

/// Inclusive bounds on the font-size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontBounds {
    pub max: u8,
    pub min: u8,
}

impl Default for FontBounds {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX_FONT_SIZE,
            min: MIN_FONT_SIZE,
        }
    }
}

/// Text wrapped to the width of its container at the chosen size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedText {
    pub font_size: u8,
    pub fits: bool,
    pub lines: Vec<String>,
}

impl FittedText {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Explicit-line search
// ────────────────────────────────────────────────────────────────────────────

/// Picks the largest size in `[8, max_font_size]` at which every `\n`-separated line
/// fits `container_width` and all lines together fit `container_height`.
pub fn calculate_optimal_font_size(
    text: &str,
    container_width: f32,
    container_height: f32,
    max_font_size: u8,
    metrics: &FontMetricTable,
) -> FitResult {
    calculate_optimal_font_size_within(
        text,
        container_width,
        container_height,
        FontBounds {
            max: max_font_size,
            min: MIN_FONT_SIZE,
        },
        metrics,
    )
}

/// Same search with a caller-supplied floor.
pub fn calculate_optimal_font_size_within(
    text: &str,
    container_width: f32,
    container_height: f32,
    bounds: FontBounds,
    metrics: &FontMetricTable,
) -> FitResult {
    let lines: Vec<&str> = text.split('\n').collect();
    let line_count = lines.len() as f32;
    let max_line_length = lines
        .iter()
        .map(|l| l.trim_end_matches('\r').chars().count())
        .max()
        .unwrap_or(0) as f32;

    for metric in metrics.candidates(bounds.max, bounds.min) {
        if max_line_length * metric.char_width > container_width {
            continue;
        }
        if line_count * metric.line_height > container_height {
            continue;
        }
        return FitResult {
            font_size: metric.size,
            fits: true,
        };
    }

    FitResult {
        font_size: bounds.min,
        fits: false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapped search
// ────────────────────────────────────────────────────────────────────────────

/// Like [`calculate_optimal_font_size_within`], but word-wraps each explicit line to the
/// container width at every candidate before checking the height.
pub fn fit_paragraph(
    text: &str,
    container_width: f32,
    container_height: f32,
    bounds: FontBounds,
    metrics: &FontMetricTable,
) -> FittedText {
    for metric in metrics.candidates(bounds.max, bounds.min) {
        let per_line = metrics.chars_per_line(container_width, metric.size);
        if per_line == 0 {
            continue;
        }
        let lines = wrap_text(text, per_line);
        if lines.len() as f32 * metric.line_height <= container_height {
            return FittedText {
                font_size: metric.size,
                fits: true,
                lines,
            };
        }
    }

    let per_line = metrics.chars_per_line(container_width, bounds.min);
    FittedText {
        font_size: bounds.min,
        fits: false,
        lines: wrap_text(text, per_line),
    }
}

/// Greedy word wrap at `max_chars` characters per line.
///
/// Explicit `\n` breaks are kept. Words longer than a line are hard-broken.
/// With `max_chars == 0` the explicit lines come back unwrapped.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let explicit = text.split('\n').map(|l| l.trim_end_matches('\r'));
    if max_chars == 0 {
        return explicit.map(str::to_string).collect();
    }

    let mut out = Vec::new();
    for line in explicit {
        let mut current = String::new();
        let mut current_len = 0usize;
        let mut pushed_any = false;

        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-break words that can never fit on a line of their own.
            while word.len() > max_chars {
                if current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                out.push(word.into_iter().collect());
                pushed_any = true;
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > max_chars {
                out.push(std::mem::take(&mut current));
                pushed_any = true;
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        if current_len > 0 || !pushed_any {
            out.push(current);
        }
    }
    out
}
