//! Ignition rules applied to each cell of a burning cell's window

use crate::risk::RiskMatrix;
use serde::{Deserialize, Serialize};

/// Lower bound of the stochastic ignition threshold
pub const DEFAULT_THRESHOLD_MIN: f64 = 0.1;
/// Upper bound (exclusive) of the stochastic ignition threshold
pub const DEFAULT_THRESHOLD_MAX: f64 = 0.4;

/// Which neighbours of a burning cell are eligible for stochastic ignition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborExclusion {
    /// Skip every candidate sharing the source's row or column, so only the
    /// four diagonal neighbours can ignite. Matches the historical model
    /// output.
    #[default]
    SharedRowOrColumn,
    /// Skip only the source cell itself
    SourceCellOnly,
}

impl NeighborExclusion {
    /// Whether `candidate` may be ignited from `source`
    #[inline]
    pub fn is_eligible(self, source: (usize, usize), candidate: (usize, usize)) -> bool {
        match self {
            NeighborExclusion::SharedRowOrColumn => {
                source.0 != candidate.0 && source.1 != candidate.1
            }
            NeighborExclusion::SourceCellOnly => source != candidate,
        }
    }
}

/// Spread mode selector used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadMode {
    #[default]
    Deterministic,
    Stochastic,
}

/// Risk-driven ignition parameters
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticRule {
    pub(crate) risk: RiskMatrix,
    pub(crate) exclusion: NeighborExclusion,
    pub(crate) threshold_min: f64,
    pub(crate) threshold_max: f64,
}

impl StochasticRule {
    /// Default threshold range `[0.1, 0.4)`
    pub fn new(risk: RiskMatrix, exclusion: NeighborExclusion) -> Self {
        Self {
            risk,
            exclusion,
            threshold_min: DEFAULT_THRESHOLD_MIN,
            threshold_max: DEFAULT_THRESHOLD_MAX,
        }
    }

    /// Override the threshold range; `min < max` is checked by
    /// [`SpreadSimulation::new`](crate::simulation::SpreadSimulation::new)
    pub fn with_thresholds(mut self, min: f64, max: f64) -> Self {
        self.threshold_min = min;
        self.threshold_max = max;
        self
    }

    pub fn risk(&self) -> &RiskMatrix {
        &self.risk
    }

    pub fn exclusion(&self) -> NeighborExclusion {
        self.exclusion
    }
}

/// How a burning cell ignites the cells in its radius-1 window
#[derive(Debug, Clone, PartialEq)]
pub enum SpreadRule {
    /// Every burnable cell in the window catches fire
    Deterministic,
    /// Cells catch fire when normalised risk beats a random threshold
    Stochastic(StochasticRule),
}

impl SpreadRule {
    pub fn mode(&self) -> SpreadMode {
        match self {
            SpreadRule::Deterministic => SpreadMode::Deterministic,
            SpreadRule::Stochastic(_) => SpreadMode::Stochastic,
        }
    }
}
