//! Bushfire Risk and Spread Core Library
//!
//! Grid-based bushfire analysis over static terrain layers (vegetation type,
//! vegetation density, wind speed):
//! - per-cell fire risk aggregated over a wind-dependent neighbourhood
//! - a full-grid risk matrix and its maximum, used for normalisation
//! - timestep fire spread, deterministic or risk-driven stochastic
//! - agreement scoring of a simulated fire against a reference grid
//!
//! All coordinates are `(row, col)`. No-data cells are `None` in every layer.
//!
//! ```no_run
//! use bushfire_core::{load_bushfire, SimulationConfig, SpreadSimulation, TerrainLayers};
//!
//! # fn main() -> bushfire_core::Result<()> {
//! let terrain = TerrainLayers::load("vegetation_type.csv", "vegetation_density.csv", "wind.csv")?;
//! let fire = load_bushfire("bushfire.csv")?;
//! let config = SimulationConfig { steps: 3, ..SimulationConfig::default() };
//! let mut sim = SpreadSimulation::from_config(fire, &terrain, &config)?;
//! sim.run(config.steps, &mut config.rng());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod core_types;
pub mod error;
pub mod grid;
pub mod risk;
pub mod simulation;

// Re-export core types
pub use core_types::{FireState, VegetationType};
pub use error::{BushfireError, Result};

// Re-export grid and ingestion
pub use grid::{
    boundary_coordinates, load_bushfire, load_dataset, load_vegetation_density,
    load_vegetation_type, load_wind_speed, write_bushfire, BoundaryWindow, DensityLayer,
    FireStateGrid, Grid, TerrainLayers, VegetationTypeLayer, WindSpeedLayer,
};

// Re-export the risk and spread engine
pub use analysis::{compare, TerrainReport};
pub use risk::{compute_risk_matrix, fire_risk, fire_risk_cell, RiskMatrix};
pub use simulation::{
    burning_count, simulate_deterministic, simulate_stochastic, FixedThreshold,
    NeighborExclusion, SimulationConfig, SimulationStats, SpreadMode, SpreadRule,
    SpreadSimulation, StochasticRule, UniformSource,
};
