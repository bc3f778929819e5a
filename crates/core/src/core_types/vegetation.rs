//! Vegetation classes found in the terrain datasets
//!
//! Each class carries a base offset that is added to the cell's vegetation
//! density before taking the square root in the cell risk function:
//!
//! | class                          | offset |
//! |--------------------------------|--------|
//! | Shrubland, Pine Forest         | 0.2    |
//! | Arboretum                      | 0.1    |
//! | Urban Vegetation, Golf Course  | 0.05   |
//! | anything else                  | 0.0    |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vegetation class of a single terrain cell
///
/// No-data cells are modelled as `Option<VegetationType>::None` at the layer
/// level, never as a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationType {
    Shrubland,
    PineForest,
    Arboretum,
    UrbanVegetation,
    GolfCourse,
    /// Any other non-empty label, kept verbatim for reporting
    Other(String),
}

impl VegetationType {
    /// Offset added to density by the cell risk function
    #[must_use]
    pub fn base_offset(&self) -> f64 {
        match self {
            VegetationType::Shrubland | VegetationType::PineForest => 0.2,
            VegetationType::Arboretum => 0.1,
            VegetationType::UrbanVegetation | VegetationType::GolfCourse => 0.05,
            VegetationType::Other(_) => 0.0,
        }
    }

    /// Label as it appears in the source datasets
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            VegetationType::Shrubland => "Shrubland",
            VegetationType::PineForest => "Pine Forest",
            VegetationType::Arboretum => "Arboretum",
            VegetationType::UrbanVegetation => "Urban Vegetation",
            VegetationType::GolfCourse => "Golf Course",
            VegetationType::Other(label) => label,
        }
    }

    /// Parse a raw dataset cell. Empty text is a no-data cell.
    #[must_use]
    pub fn from_cell(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(match raw {
            "Shrubland" => VegetationType::Shrubland,
            "Pine Forest" => VegetationType::PineForest,
            "Arboretum" => VegetationType::Arboretum,
            "Urban Vegetation" => VegetationType::UrbanVegetation,
            "Golf Course" => VegetationType::GolfCourse,
            other => VegetationType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for VegetationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
