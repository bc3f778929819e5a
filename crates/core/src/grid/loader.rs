//! Terrain layer ingestion from comma-separated text grids
//!
//! Every dataset is a rectangular text grid: one row per line, cells
//! separated by `,`. An empty cell is the no-data marker and becomes `None`
//! in the loaded layer, distinct from a numeric zero.
//!
//! - vegetation type: free-text labels (`Shrubland`, `Pine Forest`, ...)
//! - vegetation density: real numbers in `[0, 1]`
//! - wind speed: non-negative real numbers
//! - bushfire: `0` (unburnt) or `1` (burning)

use crate::core_types::{FireState, VegetationType};
use crate::error::{BushfireError, Result};
use crate::grid::{
    DensityLayer, FireStateGrid, Grid, TerrainLayers, VegetationTypeLayer, WindSpeedLayer,
};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

fn io_error(path: &Path, err: &io::Error) -> BushfireError {
    if err.kind() == io::ErrorKind::NotFound {
        BushfireError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        BushfireError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Load a raw text grid, one `Vec<String>` per line
///
/// Trailing blank lines are dropped. Rows are not required to be equal length
/// here; the typed loaders enforce that.
///
/// # Errors
/// Returns `NotFound` if the file does not exist and `Io` for any other read
/// failure.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;

    let mut lines: Vec<&str> = contents.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let dataset: Vec<Vec<String>> = lines
        .into_iter()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();

    debug!("Read {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Load a typed layer, converting empty cells to `None`
///
/// `parse` is only called for non-empty cells; returning `None` from it
/// reports a `Parse` error naming `expected`.
fn load_layer<T>(
    path: &Path,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Grid<Option<T>>> {
    let dataset = load_dataset(path)?;
    let cols = dataset.first().map_or(0, Vec::len);

    let mut rows = Vec::with_capacity(dataset.len());
    for (line_idx, raw_row) in dataset.iter().enumerate() {
        if raw_row.len() != cols {
            return Err(BushfireError::RaggedRow {
                path: path.to_path_buf(),
                line: line_idx + 1,
                expected: cols,
                found: raw_row.len(),
            });
        }

        let mut row = Vec::with_capacity(cols);
        for (col_idx, raw) in raw_row.iter().enumerate() {
            if raw.is_empty() {
                row.push(None);
                continue;
            }
            let value = parse(raw).ok_or_else(|| BushfireError::Parse {
                path: path.to_path_buf(),
                line: line_idx + 1,
                column: col_idx + 1,
                value: raw.clone(),
                expected,
            })?;
            row.push(Some(value));
        }
        rows.push(row);
    }

    let grid = Grid::from_rows(rows)?;
    info!(
        "Loaded {}x{} layer from {} ({} no-data cells)",
        grid.rows(),
        grid.cols(),
        path.display(),
        grid.count_blank()
    );
    Ok(grid)
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Load the vegetation type map
///
/// # Errors
/// See [`load_dataset`]; additionally `RaggedRow` or `EmptyGrid`.
pub fn load_vegetation_type(path: impl AsRef<Path>) -> Result<VegetationTypeLayer> {
    load_layer(path.as_ref(), "a vegetation label", VegetationType::from_cell)
}

/// Load the vegetation density map
///
/// # Errors
/// `Parse` if a cell is not a number in `[0, 1]`, plus the errors of
/// [`load_dataset`].
pub fn load_vegetation_density(path: impl AsRef<Path>) -> Result<DensityLayer> {
    load_layer(path.as_ref(), "a density in [0, 1]", |raw| {
        parse_non_negative(raw).filter(|v| *v <= 1.0)
    })
}

/// Load the wind speed map
///
/// # Errors
/// `Parse` if a cell is not a non-negative number, plus the errors of
/// [`load_dataset`].
pub fn load_wind_speed(path: impl AsRef<Path>) -> Result<WindSpeedLayer> {
    load_layer(path.as_ref(), "a non-negative wind speed", parse_non_negative)
}

/// Load a bushfire (fire state) map
///
/// # Errors
/// `Parse` if a cell is not an integer, plus the errors of [`load_dataset`].
pub fn load_bushfire(path: impl AsRef<Path>) -> Result<FireStateGrid> {
    load_layer(path.as_ref(), "a fire state (0 or 1)", FireState::from_cell)
}

/// Render a fire-state grid in the same CSV format the loader reads
pub fn bushfire_to_csv(grid: &FireStateGrid) -> String {
    let mut out = String::with_capacity(grid.len() * 2);
    for row in grid.iter_rows() {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if let Some(state) = cell {
                out.push_str(state.as_cell());
            }
        }
        out.push('\n');
    }
    out
}

/// Render a numeric layer (e.g. a risk matrix) as CSV with fixed precision
pub fn real_grid_to_csv(grid: &Grid<f64>, precision: usize) -> String {
    let mut out = String::with_capacity(grid.len() * (precision + 3));
    for row in grid.iter_rows() {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            // Writing into a String cannot fail
            let _ = write!(out, "{value:.precision$}");
        }
        out.push('\n');
    }
    out
}

/// Write a fire-state grid to `path`
///
/// # Errors
/// Returns `Io` if the file cannot be written.
pub fn write_bushfire(path: impl AsRef<Path>, grid: &FireStateGrid) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bushfire_to_csv(grid)).map_err(|e| io_error(path, &e))?;
    info!("Wrote {}x{} fire state to {}", grid.rows(), grid.cols(), path.display());
    Ok(())
}

/// Write a numeric layer to `path` with fixed precision
///
/// # Errors
/// Returns `Io` if the file cannot be written.
pub fn write_real_grid(path: impl AsRef<Path>, grid: &Grid<f64>, precision: usize) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, real_grid_to_csv(grid, precision)).map_err(|e| io_error(path, &e))?;
    info!("Wrote {}x{} grid to {}", grid.rows(), grid.cols(), path.display());
    Ok(())
}

impl TerrainLayers {
    /// Load all three terrain layers and validate their dimensions
    ///
    /// # Errors
    /// Any loader error, or `DimensionMismatch` if the files disagree.
    pub fn load(
        vegetation_type: impl AsRef<Path>,
        vegetation_density: impl AsRef<Path>,
        wind_speed: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::new(
            load_vegetation_type(vegetation_type)?,
            load_vegetation_density(vegetation_density)?,
            load_wind_speed(wind_speed)?,
        )
    }
}
