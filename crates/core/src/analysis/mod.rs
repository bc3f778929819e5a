//! Post-processing: grid comparison and terrain reporting

pub mod comparison;
pub mod report;

pub use comparison::compare;
pub use report::{
    count_area, count_blank_values, count_cells, highest_wind_speed, vegetation_type_counts,
    TerrainReport, VegetationTally, CELL_AREA_SQ_M,
};
