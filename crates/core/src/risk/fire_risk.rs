//! Per-cell fire risk
//!
//! The cell risk of one terrain cell is `sqrt(offset + density)` where the
//! offset depends on the vegetation class. The aggregated risk of a cell
//! depends on the wind reading there:
//!
//! - calm (no reading, or `floor(wind) == 0`): the cell's own risk
//! - windy: the sum of cell risks over the clipped window of radius
//!   `floor(wind)` around the cell, excluding the cell itself
//!
//! High local wind imports fuel risk from a wider neighbourhood; calm
//! conditions reduce the estimate to the cell's own fuel.

use crate::core_types::VegetationType;
use crate::grid::{
    BoundaryWindow, DensityLayer, TerrainLayers, VegetationTypeLayer, WindSpeedLayer,
};

/// Risk contribution of a single vegetated cell
///
/// `density` is expected in `[0, 1]`; the result is always non-negative and
/// non-decreasing in `density` for a fixed vegetation class.
#[inline]
pub fn fire_risk_cell(vegetation_type: &VegetationType, density: f64) -> f64 {
    (vegetation_type.base_offset() + density).max(0.0).sqrt()
}

/// Cell risk at `(row, col)`, zero for no-data vegetation or density
#[inline]
fn cell_contribution(
    row: usize,
    col: usize,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
) -> f64 {
    match (&vegetation_type[(row, col)], vegetation_density[(row, col)]) {
        (Some(veg), Some(density)) => fire_risk_cell(veg, density),
        _ => 0.0,
    }
}

/// Search radius implied by a wind reading; zero means calm
#[inline]
pub fn wind_radius(wind_speed: Option<f64>) -> usize {
    match wind_speed {
        Some(speed) if speed.is_finite() && speed >= 1.0 => speed.floor() as usize,
        _ => 0,
    }
}

/// Aggregated fire risk of the cell at `(row, col)`
///
/// The three layers must share dimensions and `(row, col)` must be inside
/// them; [`TerrainLayers`] guarantees the former.
pub fn fire_risk(
    row: usize,
    col: usize,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
    wind_speed: &WindSpeedLayer,
) -> f64 {
    let radius = wind_radius(wind_speed[(row, col)]);
    if radius == 0 {
        return cell_contribution(row, col, vegetation_type, vegetation_density);
    }

    let (rows, cols) = vegetation_type.dimensions();
    BoundaryWindow::around(row, col, radius, rows, cols)
        .cells()
        .filter(|&cell| cell != (row, col))
        .map(|(r, c)| cell_contribution(r, c, vegetation_type, vegetation_density))
        .sum()
}

impl TerrainLayers {
    /// Aggregated fire risk of the cell at `(row, col)`
    pub fn fire_risk(&self, row: usize, col: usize) -> f64 {
        fire_risk(
            row,
            col,
            &self.vegetation_type,
            &self.vegetation_density,
            &self.wind_speed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use approx::assert_relative_eq;

    fn uniform_terrain(rows: usize, cols: usize, wind: Option<f64>) -> TerrainLayers {
        TerrainLayers::new(
            Grid::filled(rows, cols, Some(VegetationType::Shrubland)),
            Grid::filled(rows, cols, Some(0.5)),
            Grid::filled(rows, cols, wind),
        )
        .unwrap()
    }

    #[test]
    fn test_fire_risk_cell_offsets() {
        assert_relative_eq!(fire_risk_cell(&VegetationType::Shrubland, 0.5), 0.7_f64.sqrt());
        assert_relative_eq!(fire_risk_cell(&VegetationType::PineForest, 0.3), 0.5_f64.sqrt());
        assert_relative_eq!(fire_risk_cell(&VegetationType::Arboretum, 0.5), 0.6_f64.sqrt());
        assert_relative_eq!(fire_risk_cell(&VegetationType::GolfCourse, 0.2), 0.25_f64.sqrt());
        assert_relative_eq!(
            fire_risk_cell(&VegetationType::Other("Grassland".into()), 0.49),
            0.7
        );
    }

    #[test]
    fn test_fire_risk_cell_non_negative_and_monotonic() {
        let kinds = [
            VegetationType::Shrubland,
            VegetationType::Arboretum,
            VegetationType::UrbanVegetation,
            VegetationType::Other("Scrub".into()),
        ];
        for veg in &kinds {
            let mut previous = fire_risk_cell(veg, 0.0);
            assert!(previous >= 0.0);
            for step in 1..=100 {
                let risk = fire_risk_cell(veg, f64::from(step) / 100.0);
                assert!(risk >= previous, "{veg} not monotonic at {step}");
                previous = risk;
            }
        }
    }

    #[test]
    fn test_wind_radius() {
        assert_eq!(wind_radius(None), 0);
        assert_eq!(wind_radius(Some(0.0)), 0);
        assert_eq!(wind_radius(Some(0.99)), 0);
        assert_eq!(wind_radius(Some(1.0)), 1);
        assert_eq!(wind_radius(Some(3.7)), 3);
    }

    #[test]
    fn test_calm_cell_uses_own_risk() {
        let terrain = uniform_terrain(3, 3, Some(0.0));
        assert_relative_eq!(terrain.fire_risk(1, 1), 0.7_f64.sqrt());

        let terrain = uniform_terrain(3, 3, None);
        assert_relative_eq!(terrain.fire_risk(0, 2), 0.7_f64.sqrt());
    }

    #[test]
    fn test_windy_cell_sums_neighbours_excluding_centre() {
        // wind 3 covers the whole clipped 3x3 grid, centre excluded
        let terrain = uniform_terrain(3, 3, Some(3.0));
        let risk = terrain.fire_risk(1, 1);
        assert_relative_eq!(risk, 8.0 * 0.7_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(risk, 6.693, epsilon = 1e-3);
    }

    #[test]
    fn test_windy_corner_cell_is_clipped() {
        let terrain = uniform_terrain(5, 5, Some(1.5));
        // radius 1 at a corner: 2x2 window minus centre
        assert_relative_eq!(terrain.fire_risk(0, 0), 3.0 * 0.7_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let mut veg = Grid::filled(3, 3, Some(VegetationType::Shrubland));
        veg[(0, 0)] = None;
        veg[(1, 1)] = None;
        let mut density = Grid::filled(3, 3, Some(0.5));
        density[(0, 0)] = None;
        let terrain = TerrainLayers::new(veg, density, Grid::filled(3, 3, Some(2.0))).unwrap();

        // centre has no vegetation but still aggregates its neighbours
        assert_relative_eq!(terrain.fire_risk(1, 1), 7.0 * 0.7_f64.sqrt(), epsilon = 1e-12);

        let calm = TerrainLayers::calm(
            terrain.vegetation_type().clone(),
            terrain.vegetation_density().clone(),
        )
        .unwrap();
        assert_eq!(calm.fire_risk(0, 0), 0.0);
    }
}
