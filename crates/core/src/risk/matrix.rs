//! Full-grid risk matrix
//!
//! Built once per run from the static terrain layers and immutable
//! afterwards. Per-cell work only reads the layers, so rows are evaluated in
//! parallel; the matrix and its maximum are complete before any stochastic
//! stepping starts.

use crate::error::{BushfireError, Result};
use crate::grid::{DensityLayer, Grid, TerrainLayers, VegetationTypeLayer, WindSpeedLayer};
use crate::risk::fire_risk;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Aggregated fire risk for every cell plus the maximum value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMatrix {
    risk: Grid<f64>,
    max_risk: f64,
}

impl RiskMatrix {
    /// Compute the risk matrix for validated terrain
    pub fn from_terrain(terrain: &TerrainLayers) -> Self {
        build(
            terrain.rows(),
            terrain.cols(),
            &terrain.vegetation_type,
            &terrain.vegetation_density,
            &terrain.wind_speed,
        )
    }

    /// Risk of the cell at `(row, col)`
    #[inline]
    pub fn risk(&self, row: usize, col: usize) -> f64 {
        self.risk[(row, col)]
    }

    /// Maximum risk over the whole matrix
    #[inline]
    pub fn max_risk(&self) -> f64 {
        self.max_risk
    }

    /// Risk at `(row, col)` divided by the maximum, `0.0` if the maximum is zero
    #[inline]
    pub fn normalized(&self, row: usize, col: usize) -> f64 {
        if self.max_risk > 0.0 {
            self.risk[(row, col)] / self.max_risk
        } else {
            0.0
        }
    }

    /// Underlying grid of risk values
    pub fn grid(&self) -> &Grid<f64> {
        &self.risk
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.risk.dimensions()
    }

    /// Mean risk over all cells
    pub fn mean_risk(&self) -> f64 {
        self.risk.as_slice().iter().sum::<f64>() / self.risk.len() as f64
    }

    /// Split into `(grid, max_risk)`
    pub fn into_parts(self) -> (Grid<f64>, f64) {
        (self.risk, self.max_risk)
    }
}

fn build(
    rows: usize,
    cols: usize,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
    wind_speed: &WindSpeedLayer,
) -> RiskMatrix {
    let cells: Vec<f64> = (0..rows)
        .into_par_iter()
        .map(|row| {
            (0..cols)
                .map(|col| fire_risk(row, col, vegetation_type, vegetation_density, wind_speed))
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<Vec<f64>>>()
        .into_iter()
        .flatten()
        .collect();

    let max_risk = cells.iter().copied().fold(0.0_f64, f64::max);
    let risk = Grid::from_fn(rows, cols, |row, col| cells[row * cols + col]);

    if max_risk > 0.0 {
        info!("Computed {}x{} risk matrix, max risk {:.4}", rows, cols, max_risk);
    } else {
        warn!(
            "Computed {}x{} risk matrix with zero max risk, no cell can ignite stochastically",
            rows, cols
        );
    }

    RiskMatrix { risk, max_risk }
}

/// Compute the risk matrix of a `rows x cols` terrain
///
/// # Errors
/// Returns `DimensionMismatch` if any layer is not `rows x cols`.
pub fn compute_risk_matrix(
    rows: usize,
    cols: usize,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
    wind_speed: &WindSpeedLayer,
) -> Result<RiskMatrix> {
    let check = |layer: &'static str, found: (usize, usize)| {
        if found == (rows, cols) {
            Ok(())
        } else {
            Err(BushfireError::DimensionMismatch {
                layer,
                expected: (rows, cols),
                found,
            })
        }
    };
    check("vegetation_type", vegetation_type.dimensions())?;
    check("vegetation_density", vegetation_density.dimensions())?;
    check("wind_speed", wind_speed.dimensions())?;

    Ok(build(rows, cols, vegetation_type, vegetation_density, wind_speed))
}
