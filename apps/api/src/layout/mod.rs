// Content-fit engine: font-size search, truncation/splitting, grid tiling, bounds clamp.
// Every function here is pure. The only shared data is the static metric table,
// which is read-only and handed out by reference.

pub mod bounds;
pub mod fit;
pub mod font_metrics;
pub mod geometry;
pub mod grid;
pub mod splitter;

// Re-export the public API consumed by the deck assembler and handlers.
pub use bounds::{clamp_within, validate_position};
pub use fit::{
    calculate_optimal_font_size, calculate_optimal_font_size_within, fit_paragraph, FitResult,
    FittedText, FontBounds,
};
pub use font_metrics::{standard_metrics, FontMetricTable};
pub use geometry::{Layout, LayoutPreset, Rect};
pub use grid::layout_items_in_grid;
pub use splitter::{
    pack_items_into_boxes, split_into_boxes_with_threshold, split_items_into_boxes,
    split_wrapped_into_boxes, truncate_to_container,
};
