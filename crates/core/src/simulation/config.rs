//! Run configuration
//!
//! Loaded from JSON or built in code; command-line flags override individual
//! fields on top of a loaded file.
//!
//! ```json
//! {
//!   "steps": 5,
//!   "mode": "stochastic",
//!   "exclusion": "source-cell-only",
//!   "seed": 42
//! }
//! ```

use crate::error::{BushfireError, Result};
use crate::simulation::ignition::{
    NeighborExclusion, SpreadMode, DEFAULT_THRESHOLD_MAX, DEFAULT_THRESHOLD_MIN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of timesteps to run
    pub steps: u32,
    /// Deterministic or stochastic spread
    pub mode: SpreadMode,
    /// Neighbour eligibility for stochastic ignition
    pub exclusion: NeighborExclusion,
    /// Seed for the threshold source; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Lower bound of the ignition threshold
    pub threshold_min: f64,
    /// Upper bound (exclusive) of the ignition threshold
    pub threshold_max: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 1,
            mode: SpreadMode::Deterministic,
            exclusion: NeighborExclusion::SharedRowOrColumn,
            seed: None,
            threshold_min: DEFAULT_THRESHOLD_MIN,
            threshold_max: DEFAULT_THRESHOLD_MAX,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    ///
    /// # Errors
    /// `NotFound`/`Io` if the file cannot be read, `Config` if it does not
    /// parse or fails [`validate`](Self::validate).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BushfireError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                BushfireError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    /// `Config` if the text does not parse or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BushfireError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the threshold range
    ///
    /// # Errors
    /// `Config` if either bound is not finite or `min >= max`.
    pub fn validate(&self) -> Result<()> {
        validate_thresholds(self.threshold_min, self.threshold_max)
    }

    /// Threshold source for this run
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub(crate) fn validate_thresholds(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(BushfireError::Config(format!(
            "threshold bounds must be finite, got [{min}, {max})"
        )));
    }
    if min >= max {
        return Err(BushfireError::Config(format!(
            "threshold_min must be below threshold_max, got [{min}, {max})"
        )));
    }
    Ok(())
}
