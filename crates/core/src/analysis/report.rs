//! Terrain summaries: cell counts and covered area per vegetation class
//!
//! Each cell is a 100 m x 100 m square (10 000 m²). The vegetated area of a
//! cell is its density times the cell area.

use crate::core_types::VegetationType;
use crate::error::{BushfireError, Result};
use crate::grid::{DensityLayer, Grid, TerrainLayers, VegetationTypeLayer, WindSpeedLayer};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Area of one grid cell in square metres
pub const CELL_AREA_SQ_M: f64 = 10_000.0;

/// Number of cells per vegetation class, no-data cells excluded
pub fn vegetation_type_counts(
    vegetation_type: &VegetationTypeLayer,
) -> FxHashMap<VegetationType, usize> {
    let mut counts = FxHashMap::default();
    for veg in vegetation_type.as_slice().iter().flatten() {
        *counts.entry(veg.clone()).or_insert(0) += 1;
    }
    counts
}

/// Cell counts per vegetation class, sorted by label
pub fn count_cells(vegetation_type: &VegetationTypeLayer) -> Vec<(VegetationType, usize)> {
    let mut counts: Vec<_> = vegetation_type_counts(vegetation_type).into_iter().collect();
    counts.sort_by(|a, b| a.0.label().cmp(b.0.label()));
    counts
}

/// Vegetated area in m² per vegetation class, sorted by label
///
/// Cells with a vegetation label but no density reading add no area.
pub fn count_area(
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
) -> Vec<(VegetationType, f64)> {
    let mut areas: FxHashMap<VegetationType, f64> = FxHashMap::default();
    for (veg, density) in vegetation_type
        .as_slice()
        .iter()
        .zip(vegetation_density.as_slice())
    {
        if let Some(veg) = veg {
            *areas.entry(veg.clone()).or_insert(0.0) += density.unwrap_or(0.0) * CELL_AREA_SQ_M;
        }
    }
    let mut areas: Vec<_> = areas.into_iter().collect();
    areas.sort_by(|a, b| a.0.label().cmp(b.0.label()));
    areas
}

/// Highest wind reading, `None` if the layer has no readings at all
pub fn highest_wind_speed(wind_speed: &WindSpeedLayer) -> Option<f64> {
    wind_speed
        .as_slice()
        .iter()
        .flatten()
        .copied()
        .reduce(f64::max)
}

/// Number of no-data cells in any optional layer
pub fn count_blank_values<T>(grid: &Grid<Option<T>>) -> usize {
    grid.count_blank()
}

/// One vegetation class in a [`TerrainReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VegetationTally {
    pub vegetation_type: String,
    pub cells: usize,
    pub area_sq_m: f64,
}

/// Summary of a terrain, serialisable for machine-readable output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerrainReport {
    pub rows: usize,
    pub cols: usize,
    pub vegetation: Vec<VegetationTally>,
    pub blank_vegetation_cells: usize,
    pub highest_wind_speed: Option<f64>,
}

impl TerrainReport {
    /// Summarise a terrain bundle
    pub fn from_terrain(terrain: &TerrainLayers) -> Self {
        let areas: FxHashMap<VegetationType, f64> =
            count_area(terrain.vegetation_type(), terrain.vegetation_density())
                .into_iter()
                .collect();
        let vegetation = count_cells(terrain.vegetation_type())
            .into_iter()
            .map(|(veg, cells)| VegetationTally {
                area_sq_m: areas.get(&veg).copied().unwrap_or(0.0),
                vegetation_type: veg.label().to_string(),
                cells,
            })
            .collect();

        Self {
            rows: terrain.rows(),
            cols: terrain.cols(),
            vegetation,
            blank_vegetation_cells: count_blank_values(terrain.vegetation_type()),
            highest_wind_speed: highest_wind_speed(terrain.wind_speed()),
        }
    }

    /// Pretty-printed JSON form of the report
    ///
    /// # Errors
    /// `Encode` if serialisation fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BushfireError::Encode(e.to_string()))
    }
}
