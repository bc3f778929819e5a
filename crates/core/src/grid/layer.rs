//! Rectangular row-major grid shared by every terrain layer
//!
//! All coordinates are `(row, col)`: `row` indexes lines of the source CSV,
//! `col` the position within a line. Storage is a flat `Vec` in row-major
//! order (`row * cols + col`).

use crate::core_types::{FireState, VegetationType};
use crate::error::{BushfireError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Row-major 2D container with fixed, non-zero dimensions
///
/// Deserialisation goes through [`Grid::from_vec`], so a decoded grid obeys
/// the same shape checks as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridData<T>")]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

/// Unchecked wire form of a [`Grid`]
#[derive(Deserialize)]
struct GridData<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<GridData<T>> for Grid<T> {
    type Error = BushfireError;

    fn try_from(data: GridData<T>) -> Result<Self> {
        Self::from_vec(data.rows, data.cols, data.cells)
    }
}

/// Vegetation class per cell, `None` for no-data
pub type VegetationTypeLayer = Grid<Option<VegetationType>>;
/// Vegetation density in `[0, 1]` per cell, `None` for no-data
pub type DensityLayer = Grid<Option<f64>>;
/// Wind speed per cell, `None` meaning calm
pub type WindSpeedLayer = Grid<Option<f64>>;
/// Fire state per cell, `None` for non-burnable
pub type FireStateGrid = Grid<Option<FireState>>;

impl<T> Grid<T> {
    /// Build a grid from row-major cells
    ///
    /// # Errors
    /// Returns `EmptyGrid` if either dimension is zero and `CellCount` if
    /// `cells.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(BushfireError::EmptyGrid);
        }
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(BushfireError::CellCount {
                rows,
                cols,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from nested rows, all of which must have equal length
    ///
    /// # Errors
    /// Returns `EmptyGrid` for no rows or empty rows and `DimensionMismatch`
    /// for ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(row_count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(BushfireError::DimensionMismatch {
                    layer: "rows",
                    expected: (row_count, cols),
                    found: (row_count, row.len()),
                });
            }
            cells.extend(row);
        }
        Self::from_vec(row_count, cols, cells)
    }

    /// Build a grid by evaluating `f(row, col)` for every cell
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert!(rows > 0 && cols > 0, "grid must be non-empty, got {rows}x{cols}");
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Cell at `(row, col)`, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Mutable cell at `(row, col)`, `None` when out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Row-major slice of all cells
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.cols)
    }

    /// Iterate over `((row, col), &cell)` in row-major order
    pub fn indexed_iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / cols, i % cols), cell))
    }

    /// New grid of the same dimensions with `f` applied to every cell
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Check that `other` has the same dimensions
    ///
    /// # Errors
    /// Returns `DimensionMismatch` naming `layer` when the shapes differ.
    pub fn ensure_same_dimensions<U>(&self, other: &Grid<U>, layer: &'static str) -> Result<()> {
        if self.dimensions() == other.dimensions() {
            Ok(())
        } else {
            Err(BushfireError::DimensionMismatch {
                layer,
                expected: self.dimensions(),
                found: other.dimensions(),
            })
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    ///
    /// # Panics
    /// If `rows` or `cols` is zero.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        assert!(rows > 0 && cols > 0, "grid must be non-empty, got {rows}x{cols}");
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<Option<T>> {
    /// Number of no-data cells
    pub fn count_blank(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[self.idx(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let idx = self.idx(row, col);
        &mut self.cells[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_indexing() {
        let grid = Grid::from_fn(3, 4, |r, c| r * 10 + c);
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid[(0, 0)], 0);
        assert_eq!(grid[(1, 2)], 12);
        assert_eq!(grid[(2, 3)], 23);
        assert_eq!(grid.as_slice()[4], 10);
        assert_eq!(grid.row(2), &[20, 21, 22, 23]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::filled(2, 2, 1_u8);
        assert!(grid.get(1, 1).is_some());
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        assert!(matches!(err, BushfireError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_rows_rejects_empty_input() {
        let err = Grid::<u8>::from_rows(Vec::new()).unwrap_err();
        assert_eq!(err, BushfireError::EmptyGrid);
    }

    #[test]
    fn test_from_vec_checks_shape() {
        assert_eq!(
            Grid::<u8>::from_vec(3, 0, Vec::new()).unwrap_err(),
            BushfireError::EmptyGrid
        );
        assert_eq!(
            Grid::from_vec(2, 3, vec![0_u8; 5]).unwrap_err(),
            BushfireError::CellCount {
                rows: 2,
                cols: 3,
                found: 5,
            }
        );
        assert!(Grid::from_vec(2, 3, vec![0_u8; 6]).is_ok());
    }

    #[test]
    #[should_panic(expected = "grid must be non-empty")]
    fn test_filled_rejects_zero_columns() {
        let _ = Grid::filled(2, 0, Some(FireState::Unburnt));
    }

    #[test]
    #[should_panic(expected = "grid must be non-empty")]
    fn test_from_fn_rejects_zero_rows() {
        let _ = Grid::from_fn(0, 4, |r, c| r + c);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let grid: Grid<Option<f64>> =
            serde_json::from_str(r#"{"rows": 1, "cols": 2, "cells": [0.5, null]}"#).unwrap();
        assert_eq!(grid[(0, 1)], None);

        let wrong_count =
            serde_json::from_str::<Grid<u8>>(r#"{"rows": 2, "cols": 2, "cells": [1, 2, 3]}"#);
        assert!(wrong_count.is_err());

        let no_columns = serde_json::from_str::<Grid<u8>>(r#"{"rows": 3, "cols": 0, "cells": []}"#);
        assert!(no_columns.is_err());
    }

    #[test]
    fn test_serde_round_trip_keeps_layout() {
        let grid = Grid::from_fn(2, 3, |r, c| r * 3 + c);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid<usize> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_indexed_iter_visits_row_major() {
        let grid = Grid::from_fn(2, 3, |r, c| (r, c));
        for ((r, c), cell) in grid.indexed_iter() {
            assert_eq!((r, c), *cell);
        }
        assert_eq!(grid.indexed_iter().count(), 6);
    }

    #[test]
    fn test_count_blank() {
        let grid = Grid::from_rows(vec![vec![Some(1.0), None], vec![None, Some(0.5)]]).unwrap();
        assert_eq!(grid.count_blank(), 2);
    }

    #[test]
    fn test_ensure_same_dimensions() {
        let a = Grid::filled(2, 3, 0_u8);
        let b = Grid::filled(2, 3, 'x');
        let c = Grid::filled(3, 2, 'x');
        assert!(a.ensure_same_dimensions(&b, "b").is_ok());
        assert_eq!(
            a.ensure_same_dimensions(&c, "c").unwrap_err(),
            BushfireError::DimensionMismatch {
                layer: "c",
                expected: (2, 3),
                found: (3, 2),
            }
        );
    }
}
