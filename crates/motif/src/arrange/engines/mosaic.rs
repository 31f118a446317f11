//! Mosaic grid arrangement.

use motif_core::{
    canvas::CanvasBounds,
    geometry::{Bounds, Point, Size},
    palette::mosaic_color,
    placement::Placement,
};

use crate::arrange::GenerateError;

use super::ArrangementEngine;

/// Tiles the whole canvas with a grid of solid cells.
///
/// The grid has `columns` columns and `round(columns * height / width)` rows,
/// so cells stay close to square. Cells are produced row by row, and the
/// `i`-th cell is filled with palette entry `i % 5`; the configured color and
/// element size are not used.
#[derive(Debug)]
pub struct Mosaic {
    columns: usize,
    rows: usize,
    cell: Size,
}

impl Mosaic {
    /// Sizes the grid for `canvas`.
    ///
    /// Fails with [`GenerateError::GridTooLarge`] when the canvas is so much
    /// taller than wide that the cell count does not fit in a `usize`.
    pub(crate) fn new(canvas: CanvasBounds, columns: usize) -> Result<Self, GenerateError> {
        let rows = if columns == 0 {
            0
        } else {
            let exact = (columns as f32 * canvas.height() / canvas.width()).round();
            let rows = exact as usize;
            // `as usize` saturates, so compare before trusting the cast.
            let saturated = !exact.is_finite() || exact >= usize::MAX as f32;
            if saturated || columns.checked_mul(rows).is_none() {
                return Err(GenerateError::GridTooLarge {
                    columns,
                    rows: exact,
                });
            }
            rows
        };
        let cell = if rows == 0 {
            Size::default()
        } else {
            Size::new(
                canvas.width() / columns as f32,
                canvas.height() / rows as f32,
            )
        };
        Ok(Self {
            columns,
            rows,
            cell,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of every cell in the grid
    pub fn cell(&self) -> Size {
        self.cell
    }
}

impl ArrangementEngine for Mosaic {
    fn len(&self) -> usize {
        // Checked in `new`.
        self.columns * self.rows
    }

    fn place(&self, index: usize) -> Placement {
        let row = index / self.columns;
        let column = index % self.columns;
        let top_left = Point::new(
            column as f32 * self.cell.width(),
            row as f32 * self.cell.height(),
        );
        Placement::new(
            Bounds::new_from_top_left(top_left, self.cell),
            mosaic_color(index),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use motif_core::palette::MOSAIC_PALETTE;

    use super::*;

    #[test]
    fn test_grid_dimensions() {
        let engine = Mosaic::new(CanvasBounds::new(1000.0, 500.0), 10).unwrap();

        assert_eq!(engine.rows(), 5);
        assert_eq!(engine.len(), 50);
        assert_approx_eq!(f32, engine.cell().width(), 100.0);
        assert_approx_eq!(f32, engine.cell().height(), 100.0);
    }

    #[test]
    fn test_rows_are_rounded() {
        // 3 * 500 / 1000 = 1.5 rounds away from zero
        let engine = Mosaic::new(CanvasBounds::new(1000.0, 500.0), 3).unwrap();
        assert_eq!(engine.rows(), 2);

        // 1 * 400 / 1000 = 0.4 rounds to an empty grid
        let engine = Mosaic::new(CanvasBounds::new(1000.0, 400.0), 1).unwrap();
        assert_eq!(engine.rows(), 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_palette_cycles_row_major() {
        let engine = Mosaic::new(CanvasBounds::new(1000.0, 400.0), 5).unwrap();
        assert_eq!(engine.rows(), 2);

        let fills: Vec<_> = (0..engine.len())
            .map(|i| engine.place(i).fill_color().to_string())
            .collect();
        let expected: Vec<_> = [0, 1, 2, 3, 4, 0, 1, 2, 3, 4]
            .iter()
            .map(|i| MOSAIC_PALETTE[*i].to_string())
            .collect();

        assert_eq!(fills, expected);
    }

    #[test]
    fn test_cells_tile_the_canvas() {
        let engine = Mosaic::new(CanvasBounds::new(600.0, 400.0), 3).unwrap();
        assert_eq!(engine.rows(), 2);

        let last = engine.place(engine.len() - 1);
        assert_approx_eq!(f32, last.x(), 400.0);
        assert_approx_eq!(f32, last.y(), 200.0);
        assert_approx_eq!(f32, last.x() + last.width(), 600.0);
        assert_approx_eq!(f32, last.y() + last.height(), 400.0);

        let second_row = engine.place(3);
        assert_approx_eq!(f32, second_row.x(), 0.0);
        assert_approx_eq!(f32, second_row.y(), 200.0);
    }

    #[test]
    fn test_overflowing_grid_rejected() {
        let result = Mosaic::new(CanvasBounds::new(1.0, 1e30), 64);
        assert!(matches!(
            result,
            Err(GenerateError::GridTooLarge { columns: 64, .. })
        ));

        // A tall canvas whose cell count still fits is accepted.
        let engine = Mosaic::new(CanvasBounds::new(1.0, 1e6), 2).unwrap();
        assert_eq!(engine.rows(), 2_000_000);
        assert_eq!(engine.len(), 4_000_000);
    }

    #[test]
    fn test_single_column_square_canvas() {
        let engine = Mosaic::new(CanvasBounds::new(500.0, 500.0), 1).unwrap();
        assert_eq!(engine.len(), 1);

        let placement = engine.place(0);
        assert_approx_eq!(f32, placement.width(), 500.0);
        assert_approx_eq!(f32, placement.height(), 500.0);
        assert_eq!(placement.rotation_degrees(), None);
    }
}
