//! Final clamp that keeps every placed element on the canvas.
//!
//! Runs after font fitting and splitting, since both can recommend containers that
//! reach past the edge.

use crate::layout::geometry::{Layout, Rect};

/// Clamps `rect` onto the canvas of `layout`.
///
/// Width and height are capped at the canvas size, then the origin is pulled back so
/// the rectangle does not cross the right or bottom edge. Idempotent.
pub fn validate_position(rect: Rect, layout: &Layout) -> Rect {
    clamp_within(rect, &layout.canvas())
}

/// Clamps `rect` into an arbitrary bounding rectangle. Same rules as
/// [`validate_position`], measured from `bounds`' origin.
pub fn clamp_within(rect: Rect, bounds: &Rect) -> Rect {
    let width = rect.width.min(bounds.width);
    let height = rect.height.min(bounds.height);

    let max_x = bounds.x + (bounds.width - width).max(0.0);
    let max_y = bounds.y + (bounds.height - height).max(0.0);

    Rect {
        x: rect.x.max(bounds.x).min(max_x),
        y: rect.y.max(bounds.y).min(max_y),
        width,
        height,
    }
}
