//! Per-cell fire state
//!
//! A fire-state cell is tri-state at the layer level:
//! - `None`: non-burnable, outside the analysis area
//! - `Some(FireState::Unburnt)`: burnable, not yet on fire (`0` in CSV)
//! - `Some(FireState::Burning)`: on fire (`1` in CSV)
//!
//! Within a simulation run the transition `Unburnt -> Burning` is one-way.

use serde::{Deserialize, Serialize};

/// State of a burnable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireState {
    Unburnt,
    Burning,
}

impl FireState {
    /// Parse a non-empty dataset cell. Any non-zero integer counts as burning.
    #[must_use]
    pub fn from_cell(raw: &str) -> Option<Self> {
        let value: i64 = raw.trim().parse().ok()?;
        Some(if value == 0 {
            FireState::Unburnt
        } else {
            FireState::Burning
        })
    }

    /// CSV representation (`0` / `1`)
    #[must_use]
    pub const fn as_cell(self) -> &'static str {
        match self {
            FireState::Unburnt => "0",
            FireState::Burning => "1",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_burning(self) -> bool {
        matches!(self, FireState::Burning)
    }
}
