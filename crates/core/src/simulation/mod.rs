//! Timestep fire spread
//!
//! Each step:
//! 1. snapshot every burning cell
//! 2. for each snapshot cell, visit its radius-1 window (8-neighbourhood,
//!    clipped at the edges)
//! 3. apply the spread rule to every cell in that window
//!
//! The snapshot is taken before any ignition in the step, so a cell ignited
//! during step `k` only starts spreading in step `k + 1`: fire advances at
//! most one ring per step. Burning cells never revert.

pub mod config;
pub mod ignition;
pub mod random;

pub use config::SimulationConfig;
pub use ignition::{NeighborExclusion, SpreadMode, SpreadRule, StochasticRule};
pub use random::{FixedThreshold, UniformSource};

use crate::core_types::FireState;
use crate::error::Result;
use crate::grid::{
    BoundaryWindow, DensityLayer, FireStateGrid, TerrainLayers, VegetationTypeLayer,
    WindSpeedLayer,
};
use crate::risk::{compute_risk_matrix, RiskMatrix};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Radius of the spread window around a burning cell
const SPREAD_RADIUS: usize = 1;

/// Running totals for a simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Steps executed so far
    pub steps_run: u32,
    /// Cells currently burning
    pub burning_cells: usize,
    /// Cells that went from unburnt to burning in the last step
    pub ignitions_last_step: usize,
    /// Cells ignited since the simulation was created
    pub total_ignitions: usize,
}

/// Fire-state grid advanced one whole timestep at a time
#[derive(Debug, Clone)]
pub struct SpreadSimulation {
    fire_state: FireStateGrid,
    rule: SpreadRule,
    stats: SimulationStats,
}

impl SpreadSimulation {
    /// Create a simulation over `fire_state`
    ///
    /// # Errors
    /// For a stochastic rule, `DimensionMismatch` if the risk matrix does not
    /// cover the fire-state grid and `Config` for an invalid threshold range.
    pub fn new(fire_state: FireStateGrid, rule: SpreadRule) -> Result<Self> {
        if let SpreadRule::Stochastic(stochastic) = &rule {
            fire_state.ensure_same_dimensions(stochastic.risk.grid(), "risk_matrix")?;
            config::validate_thresholds(stochastic.threshold_min, stochastic.threshold_max)?;
        }
        let stats = SimulationStats {
            burning_cells: burning_count(&fire_state),
            ..SimulationStats::default()
        };
        Ok(Self {
            fire_state,
            rule,
            stats,
        })
    }

    /// Deterministic simulation over `fire_state`
    pub fn deterministic(fire_state: FireStateGrid) -> Self {
        let burning_cells = burning_count(&fire_state);
        Self {
            fire_state,
            rule: SpreadRule::Deterministic,
            stats: SimulationStats {
                burning_cells,
                ..SimulationStats::default()
            },
        }
    }

    /// Build a simulation from configuration, computing the risk matrix
    /// when the mode is stochastic
    ///
    /// # Errors
    /// `DimensionMismatch` if `fire_state` and `terrain` disagree, `Config`
    /// for an invalid threshold range.
    pub fn from_config(
        fire_state: FireStateGrid,
        terrain: &TerrainLayers,
        config: &SimulationConfig,
    ) -> Result<Self> {
        fire_state.ensure_same_dimensions(terrain.vegetation_type(), "vegetation_type")?;
        config.validate()?;
        let rule = match config.mode {
            SpreadMode::Deterministic => SpreadRule::Deterministic,
            SpreadMode::Stochastic => SpreadRule::Stochastic(
                StochasticRule::new(RiskMatrix::from_terrain(terrain), config.exclusion)
                    .with_thresholds(config.threshold_min, config.threshold_max),
            ),
        };
        Self::new(fire_state, rule)
    }

    pub fn fire_state(&self) -> &FireStateGrid {
        &self.fire_state
    }

    pub fn into_fire_state(self) -> FireStateGrid {
        self.fire_state
    }

    pub fn rule(&self) -> &SpreadRule {
        &self.rule
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Advance one timestep; returns the number of new ignitions
    ///
    /// `source` is only consulted by the stochastic rule.
    pub fn step<S: UniformSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let (rows, cols) = self.fire_state.dimensions();

        let burning: Vec<(usize, usize)> = self
            .fire_state
            .indexed_iter()
            .filter(|(_, cell)| matches!(cell, Some(FireState::Burning)))
            .map(|(pos, _)| pos)
            .collect();

        let mut ignitions = 0;
        for &origin in &burning {
            let window = BoundaryWindow::around(origin.0, origin.1, SPREAD_RADIUS, rows, cols);
            for candidate in window.cells() {
                let ignite = match &self.rule {
                    SpreadRule::Deterministic => self.fire_state[candidate].is_some(),
                    SpreadRule::Stochastic(rule) => {
                        // One draw per candidate, whether or not it is eligible
                        let threshold = source.uniform(rule.threshold_min, rule.threshold_max);
                        rule.exclusion.is_eligible(origin, candidate)
                            && self.fire_state[candidate] == Some(FireState::Unburnt)
                            && rule.risk.normalized(candidate.0, candidate.1) > threshold
                    }
                };
                if ignite {
                    let cell = &mut self.fire_state[candidate];
                    if *cell == Some(FireState::Unburnt) {
                        ignitions += 1;
                    }
                    *cell = Some(FireState::Burning);
                }
            }
        }

        self.stats.steps_run += 1;
        self.stats.ignitions_last_step = ignitions;
        self.stats.total_ignitions += ignitions;
        self.stats.burning_cells += ignitions;

        debug!(
            "Step {}: {} sources, {} ignitions, {} burning",
            self.stats.steps_run,
            burning.len(),
            ignitions,
            self.stats.burning_cells
        );
        ignitions
    }

    /// Advance `steps` timesteps; `steps == 0` leaves the grid untouched
    pub fn run<S: UniformSource + ?Sized>(
        &mut self,
        steps: u32,
        source: &mut S,
    ) -> SimulationStats {
        for _ in 0..steps {
            self.step(source);
        }
        info!(
            "Ran {} {:?} steps: {} burning, {} ignited",
            steps,
            self.rule.mode(),
            self.stats.burning_cells,
            self.stats.total_ignitions
        );
        self.stats
    }
}

/// Number of burning cells in a fire-state grid
pub fn burning_count(fire_state: &FireStateGrid) -> usize {
    fire_state
        .as_slice()
        .iter()
        .filter(|cell| matches!(cell, Some(FireState::Burning)))
        .count()
}

/// Spread fire deterministically for `steps` timesteps
///
/// Every burnable cell next to a burning cell ignites each step. The terrain
/// layers do not affect this rule and are only checked for shape.
///
/// # Errors
/// `DimensionMismatch` if either layer disagrees with `fire_state`.
pub fn simulate_deterministic(
    fire_state: FireStateGrid,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
    steps: u32,
) -> Result<FireStateGrid> {
    fire_state.ensure_same_dimensions(vegetation_type, "vegetation_type")?;
    fire_state.ensure_same_dimensions(vegetation_density, "vegetation_density")?;

    let mut sim = SpreadSimulation::deterministic(fire_state);
    sim.run(steps, &mut FixedThreshold(0.0));
    Ok(sim.into_fire_state())
}

/// Spread fire stochastically for `steps` timesteps
///
/// Computes the risk matrix from the terrain layers, then ignites window
/// cells whose normalised risk beats a threshold drawn from `source` in
/// `[0.1, 0.4)`.
///
/// # Errors
/// `DimensionMismatch` if any layer disagrees with `fire_state`.
pub fn simulate_stochastic<S: UniformSource + ?Sized>(
    fire_state: FireStateGrid,
    steps: u32,
    vegetation_type: &VegetationTypeLayer,
    vegetation_density: &DensityLayer,
    wind_speed: &WindSpeedLayer,
    source: &mut S,
    exclusion: NeighborExclusion,
) -> Result<FireStateGrid> {
    let (rows, cols) = fire_state.dimensions();
    let risk = compute_risk_matrix(rows, cols, vegetation_type, vegetation_density, wind_speed)?;

    let mut sim = SpreadSimulation::new(
        fire_state,
        SpreadRule::Stochastic(StochasticRule::new(risk, exclusion)),
    )?;
    sim.run(steps, source);
    Ok(sim.into_fire_state())
}
