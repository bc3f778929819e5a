//! Clipped square windows around a cell
//!
//! The same window is used for risk aggregation (radius = floored wind
//! speed) and for fire spread (radius 1), so both see identical neighbourhood
//! semantics at the grid edges.

/// Inclusive index range around a cell, clamped to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryWindow {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl BoundaryWindow {
    /// Window of `padding` cells around `(row, col)` in a `rows x cols` grid
    ///
    /// Never returns indices outside `[0, extent - 1]`. A padding of zero
    /// yields the cell itself.
    pub fn around(row: usize, col: usize, padding: usize, rows: usize, cols: usize) -> Self {
        debug_assert!(row < rows && col < cols);
        Self {
            row_min: row.saturating_sub(padding),
            row_max: row.saturating_add(padding).min(rows - 1),
            col_min: col.saturating_sub(padding),
            col_max: col.saturating_add(padding).min(cols - 1),
        }
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> usize {
        (self.row_max - self.row_min + 1) * (self.col_max - self.col_min + 1)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_min..=self.row_max).contains(&row) && (self.col_min..=self.col_max).contains(&col)
    }

    /// Iterate over every `(row, col)` in the window, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (col_min, col_max) = (self.col_min, self.col_max);
        (self.row_min..=self.row_max).flat_map(move |r| (col_min..=col_max).map(move |c| (r, c)))
    }
}

/// Free-function form of [`BoundaryWindow::around`]
pub fn boundary_coordinates(
    padding: usize,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> BoundaryWindow {
    BoundaryWindow::around(row, col, padding, rows, cols)
}
