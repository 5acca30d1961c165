//! Character-budget truncation and splitting of over-long text into sequential boxes.
//!
//! All lengths are counted in `char`s, never bytes.

use crate::layout::fit::wrap_text;
use crate::layout::font_metrics::FontMetricTable;

pub const ELLIPSIS: &str = "...";
const ELLIPSIS_LEN: usize = 3;

/// A break at whitespace is only taken when it falls past this fraction of a box's
/// capacity. Earlier whitespace would waste too much of the box, so the slice is
/// hard-cut at the capacity instead.
pub const WORD_BREAK_THRESHOLD: f32 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Truncation
// ────────────────────────────────────────────────────────────────────────────

/// Cuts `text` to at most `max_chars` characters, ending in `...` when cut.
///
/// Budgets below 3 leave no room for the marker and are hard-cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < ELLIPSIS_LEN {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - ELLIPSIS_LEN).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Truncates each `\n`-separated line to the container's per-line budget at `font_size`.
///
/// Lines past the container's line budget are dropped; the last kept line is then
/// marked with `...`.
pub fn truncate_to_container(
    text: &str,
    container_width: f32,
    container_height: f32,
    font_size: u8,
    metrics: &FontMetricTable,
) -> String {
    let per_line = metrics.chars_per_line(container_width, font_size);
    let max_lines = metrics.lines_per_box(container_height, font_size);

    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| truncate_text(l.trim_end_matches('\r'), per_line))
        .collect();

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = mark_continued(last, per_line);
        }
    }
    lines.join("\n")
}

fn mark_continued(line: &str, per_line: usize) -> String {
    if per_line < ELLIPSIS_LEN {
        return line.chars().take(per_line).collect();
    }
    let keep = line.chars().count().min(per_line - ELLIPSIS_LEN);
    let mut out: String = line.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Splitting
// ────────────────────────────────────────────────────────────────────────────

/// Splits `text` into boxes that each hold at most one container's worth of characters
/// at `font_size`. Returns `[text]` unchanged when it already fits.
pub fn split_into_boxes(
    text: &str,
    container_width: f32,
    container_height: f32,
    font_size: u8,
    metrics: &FontMetricTable,
) -> Vec<String> {
    split_into_boxes_with_threshold(
        text,
        container_width,
        container_height,
        font_size,
        metrics,
        WORD_BREAK_THRESHOLD,
    )
}

/// [`split_into_boxes`] with an explicit word-break threshold (fraction of capacity).
pub fn split_into_boxes_with_threshold(
    text: &str,
    container_width: f32,
    container_height: f32,
    font_size: u8,
    metrics: &FontMetricTable,
    word_break_threshold: f32,
) -> Vec<String> {
    let per_line = metrics.chars_per_line(container_width, font_size);
    let max_lines = metrics.lines_per_box(container_height, font_size);
    // A zero-capacity box would never make progress.
    let capacity = per_line.saturating_mul(max_lines).max(1);

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= capacity {
        return vec![text.to_string()];
    }

    let min_break = capacity as f32 * word_break_threshold;
    let mut boxes = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = start.saturating_add(capacity).min(chars.len());
        if end < chars.len() {
            let slice = &chars[start..end];
            if let Some(pos) = slice.iter().rposition(|c| c.is_whitespace()) {
                if pos > 0 && pos as f32 > min_break {
                    end = start + pos;
                }
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            boxes.push(chunk.to_string());
        }
        start = end;
    }

    if boxes.is_empty() {
        boxes.push(String::new());
    }
    boxes
}

/// Chunks `items` into groups of at most `max_per_box`, preserving order.
///
/// `max_per_box == 0` is treated as 1. An empty input yields one empty box.
pub fn split_items_into_boxes<T: Clone>(items: &[T], max_per_box: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    items
        .chunks(max_per_box.max(1))
        .map(<[T]>::to_vec)
        .collect()
}

/// Splits prose into boxes by wrapped lines at `font_size`.
///
/// Each box holds at most as many wrapped lines as fit the container, so every box fits
/// at `font_size`. Lines inside a box are joined with `\n` at the wrap points.
pub fn split_wrapped_into_boxes(
    text: &str,
    container_width: f32,
    container_height: f32,
    font_size: u8,
    metrics: &FontMetricTable,
) -> Vec<String> {
    let line_height = metrics.metric(font_size).line_height;
    let mut max_lines = metrics.lines_per_box(container_height, font_size).max(1);
    // floor(h / lh) * lh can land a hair above h in f32.
    while max_lines > 1 && max_lines as f32 * line_height > container_height {
        max_lines -= 1;
    }

    let lines = wrap_text(text, metrics.chars_per_line(container_width, font_size));
    let boxes: Vec<String> = lines.chunks(max_lines).map(|chunk| chunk.join("\n")).collect();
    if boxes.is_empty() {
        vec![String::new()]
    } else {
        boxes
    }
}

/// Packs bullet items greedily into boxes by their wrapped line count at `font_size`.
///
/// An item taller than a whole box gets a box of its own.
pub fn pack_items_into_boxes(
    items: &[String],
    container_width: f32,
    container_height: f32,
    font_size: u8,
    metrics: &FontMetricTable,
) -> Vec<Vec<String>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }

    let per_line = metrics.chars_per_line(container_width, font_size);
    let max_lines = metrics.lines_per_box(container_height, font_size).max(1);

    let mut boxes: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut used = 0usize;

    for item in items {
        let lines = wrap_text(item, per_line).len().max(1);
        if !current.is_empty() && used + lines > max_lines {
            boxes.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(item.clone());
        used += lines;
    }
    if !current.is_empty() {
        boxes.push(current);
    }
    boxes
}
