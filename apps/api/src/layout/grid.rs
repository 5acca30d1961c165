//! Even `rows × cols` tiling of a safe area, with gutters left between cells.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::Rect;

/// Fraction of each grid slot a cell occupies; the rest is gutter.
pub const DEFAULT_MARGIN_FACTOR: f32 = 0.9;

/// One drawable cell of a grid, tagged with its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

/// Tiles `safe_area` into `rows × cols` slots and returns one cell per slot in row-major
/// order. Each cell sits at its slot's top-left corner, shrunk by `margin_factor`.
///
/// `rows` and `cols` must be positive. Zero yields no cells.
pub fn calculate_grid_layout(
    safe_area: &Rect,
    rows: usize,
    cols: usize,
    margin_factor: f32,
) -> Vec<GridCell> {
    let cell_width = safe_area.width / cols as f32;
    let cell_height = safe_area.height / rows as f32;

    let mut cells = Vec::with_capacity(rows.saturating_mul(cols));
    for row in 0..rows {
        for col in 0..cols {
            cells.push(GridCell {
                row,
                col,
                rect: Rect::new(
                    safe_area.x + col as f32 * cell_width,
                    safe_area.y + row as f32 * cell_height,
                    cell_width * margin_factor,
                    cell_height * margin_factor,
                ),
            });
        }
    }
    cells
}

/// Near-square `(rows, cols)` for `item_count` items, wider than tall when uneven.
pub fn grid_dimensions(item_count: usize) -> (usize, usize) {
    if item_count == 0 {
        return (0, 0);
    }
    let cols = (item_count as f64).sqrt().ceil() as usize;
    let rows = item_count.div_ceil(cols);
    (rows, cols)
}

/// Cells for exactly `item_count` items, using [`grid_dimensions`].
pub fn layout_items_in_grid(
    safe_area: &Rect,
    item_count: usize,
    margin_factor: f32,
) -> Vec<GridCell> {
    let (rows, cols) = grid_dimensions(item_count);
    let mut cells = calculate_grid_layout(safe_area, rows, cols, margin_factor);
    cells.truncate(item_count);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn area() -> Rect {
        Rect::new(0.5, 0.5, 9.0, 4.625)
    }

    #[test]
    fn test_two_by_three_row_major() {
        let sa = area();
        let cells = calculate_grid_layout(&sa, 2, 3, DEFAULT_MARGIN_FACTOR);
        assert_eq!(cells.len(), 6);

        let order: Vec<(usize, usize)> = cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);

        let cell_height = sa.height / 2.0;
        assert_eq!(cells[0].rect.x, sa.x);
        assert_eq!(cells[0].rect.y, sa.y);
        assert!((cells[5].rect.y - (sa.y + cell_height)).abs() < EPS);
        assert!((cells[5].rect.x - (sa.x + 2.0 * sa.width / 3.0)).abs() < EPS);
    }

    #[test]
    fn test_cells_shrunk_by_margin_factor() {
        let sa = area();
        let cells = calculate_grid_layout(&sa, 1, 2, 0.9);
        assert!((cells[0].rect.width - 4.5 * 0.9).abs() < EPS);
        assert!((cells[0].rect.height - sa.height * 0.9).abs() < EPS);
    }

    #[test]
    fn test_zero_rows_yields_no_cells() {
        assert!(calculate_grid_layout(&area(), 0, 3, 0.9).is_empty());
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(0), (0, 0));
        assert_eq!(grid_dimensions(1), (1, 1));
        assert_eq!(grid_dimensions(4), (2, 2));
        assert_eq!(grid_dimensions(5), (2, 3));
        assert_eq!(grid_dimensions(6), (2, 3));
        assert_eq!(grid_dimensions(7), (3, 3));
    }

    #[test]
    fn test_layout_items_in_grid_truncates() {
        let cells = layout_items_in_grid(&area(), 5, DEFAULT_MARGIN_FACTOR);
        assert_eq!(cells.len(), 5);
        assert_eq!((cells[4].row, cells[4].col), (1, 1));
    }

    proptest! {
        #[test]
        fn prop_grid_partitions_safe_area(
            x in 0.0f32..2.0,
            y in 0.0f32..2.0,
            w in 0.5f32..12.0,
            h in 0.5f32..7.0,
            rows in 1usize..6,
            cols in 1usize..6,
            margin in 0.1f32..=1.0,
        ) {
            let sa = Rect::new(x, y, w, h);
            let cells = calculate_grid_layout(&sa, rows, cols, margin);
            prop_assert_eq!(cells.len(), rows * cols);

            for cell in &cells {
                prop_assert!(cell.rect.x >= sa.x - EPS);
                prop_assert!(cell.rect.y >= sa.y - EPS);
                prop_assert!(cell.rect.right() <= sa.right() + EPS);
                prop_assert!(cell.rect.bottom() <= sa.bottom() + EPS);
            }
            for (i, a) in cells.iter().enumerate() {
                for b in &cells[i + 1..] {
                    let shrunk = Rect::new(
                        b.rect.x + EPS,
                        b.rect.y + EPS,
                        (b.rect.width - 2.0 * EPS).max(0.0),
                        (b.rect.height - 2.0 * EPS).max(0.0),
                    );
                    prop_assert!(!a.rect.overlaps(&shrunk), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
}
