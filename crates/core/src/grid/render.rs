//! Plain-text rendering of grids for terminal output
//!
//! Fire state: `' '` non-burnable, `'.'` unburnt, `'#'` burning.
//! Real-valued layers are shaded by their fraction of the layer maximum.

use crate::grid::{FireStateGrid, Grid};

/// Shade ramp from lowest to highest, one char per band
const SHADES: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '%', '@'];

/// Render a fire-state grid, one text line per row
pub fn render_fire_state(grid: &FireStateGrid) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|cell| match cell {
            None => ' ',
            Some(state) if state.is_burning() => '#',
            Some(_) => '.',
        }));
        out.push('\n');
    }
    out
}

/// Render a non-negative real grid as a shade map relative to `max`
///
/// A `max` of zero or below renders every cell with the lowest shade.
pub fn render_heatmap(grid: &Grid<f64>, max: f64) -> String {
    let top = SHADES.len() - 1;
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in grid.iter_rows() {
        out.extend(row.iter().map(|&value| {
            if max <= 0.0 {
                return SHADES[0];
            }
            let band = ((value / max).clamp(0.0, 1.0) * top as f64).round() as usize;
            SHADES[band.min(top)]
        }));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::FireState;

    #[test]
    fn test_render_fire_state() {
        let grid = Grid::from_rows(vec![
            vec![None, Some(FireState::Unburnt)],
            vec![Some(FireState::Burning), Some(FireState::Unburnt)],
        ])
        .unwrap();
        assert_eq!(render_fire_state(&grid), " .\n#.\n");
    }

    #[test]
    fn test_render_heatmap_extremes() {
        let grid = Grid::from_rows(vec![vec![0.0, 4.0, 2.0]]).unwrap();
        assert_eq!(render_heatmap(&grid, 4.0), " @=\n");
        assert_eq!(render_heatmap(&grid, 0.0), "   \n");
    }
}
