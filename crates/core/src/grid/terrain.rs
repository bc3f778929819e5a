//! Static terrain layers for one simulation run
//!
//! `TerrainLayers` bundles vegetation type, vegetation density and wind speed
//! and guarantees at construction that all three share the same dimensions.
//! Everything downstream (risk aggregation, spread) indexes the layers
//! without re-checking bounds.

use crate::error::{BushfireError, Result};
use crate::grid::{DensityLayer, VegetationTypeLayer, WindSpeedLayer};
use serde::{Deserialize, Serialize};

/// Validated bundle of the three read-only terrain layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TerrainData")]
pub struct TerrainLayers {
    pub(crate) vegetation_type: VegetationTypeLayer,
    pub(crate) vegetation_density: DensityLayer,
    pub(crate) wind_speed: WindSpeedLayer,
}

/// Unchecked wire form, validated through [`TerrainLayers::new`]
#[derive(Deserialize)]
struct TerrainData {
    vegetation_type: VegetationTypeLayer,
    vegetation_density: DensityLayer,
    wind_speed: WindSpeedLayer,
}

impl TryFrom<TerrainData> for TerrainLayers {
    type Error = BushfireError;

    fn try_from(data: TerrainData) -> Result<Self> {
        Self::new(data.vegetation_type, data.vegetation_density, data.wind_speed)
    }
}

impl TerrainLayers {
    /// Bundle three layers, checking their dimensions once
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if density or wind disagree with the
    /// vegetation type layer.
    pub fn new(
        vegetation_type: VegetationTypeLayer,
        vegetation_density: DensityLayer,
        wind_speed: WindSpeedLayer,
    ) -> Result<Self> {
        vegetation_type.ensure_same_dimensions(&vegetation_density, "vegetation_density")?;
        vegetation_type.ensure_same_dimensions(&wind_speed, "wind_speed")?;
        Ok(Self {
            vegetation_type,
            vegetation_density,
            wind_speed,
        })
    }

    /// Terrain with no wind reading anywhere
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the two layers disagree.
    pub fn calm(
        vegetation_type: VegetationTypeLayer,
        vegetation_density: DensityLayer,
    ) -> Result<Self> {
        let wind_speed =
            WindSpeedLayer::filled(vegetation_type.rows(), vegetation_type.cols(), None);
        Self::new(vegetation_type, vegetation_density, wind_speed)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.vegetation_type.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.vegetation_type.cols()
    }

    /// `(rows, cols)` shared by all layers
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.vegetation_type.dimensions()
    }

    pub fn vegetation_type(&self) -> &VegetationTypeLayer {
        &self.vegetation_type
    }

    pub fn vegetation_density(&self) -> &DensityLayer {
        &self.vegetation_density
    }

    pub fn wind_speed(&self) -> &WindSpeedLayer {
        &self.wind_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::VegetationType;
    use crate::grid::Grid;

    #[test]
    fn test_matching_layers_accepted() {
        let veg = Grid::filled(2, 3, Some(VegetationType::Shrubland));
        let density = Grid::filled(2, 3, Some(0.5));
        let wind = Grid::filled(2, 3, Some(1.0));
        let terrain = TerrainLayers::new(veg, density, wind).unwrap();
        assert_eq!(terrain.dimensions(), (2, 3));
    }

    #[test]
    fn test_mismatched_wind_rejected() {
        let veg = Grid::filled(2, 3, Some(VegetationType::Shrubland));
        let density = Grid::filled(2, 3, Some(0.5));
        let wind = Grid::filled(3, 3, Some(1.0));
        let err = TerrainLayers::new(veg, density, wind).unwrap_err();
        assert_eq!(
            err,
            BushfireError::DimensionMismatch {
                layer: "wind_speed",
                expected: (2, 3),
                found: (3, 3),
            }
        );
    }

    #[test]
    fn test_calm_terrain_has_no_wind() {
        let veg = Grid::filled(2, 2, Some(VegetationType::Arboretum));
        let density = Grid::filled(2, 2, Some(0.1));
        let terrain = TerrainLayers::calm(veg, density).unwrap();
        assert_eq!(terrain.wind_speed().count_blank(), 4);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_layers() {
        let terrain = TerrainLayers::new(
            Grid::filled(2, 2, Some(VegetationType::Shrubland)),
            Grid::filled(2, 2, Some(0.5)),
            Grid::filled(2, 2, Some(3.0)),
        )
        .unwrap();
        let mut value = serde_json::to_value(&terrain).unwrap();

        let back: TerrainLayers = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, terrain);

        value["wind_speed"] = serde_json::to_value(Grid::filled(1, 1, Some(3.0))).unwrap();
        let err = serde_json::from_value::<TerrainLayers>(value).unwrap_err();
        assert!(err.to_string().contains("wind_speed"), "{err}");
    }
}
