//! Agreement between two fire-state grids
//!
//! Used to score a simulated grid against a reference (ground truth). Only
//! cells that are burnable in the reference count towards the ratio.

use crate::error::{BushfireError, Result};
use crate::grid::FireStateGrid;

/// Fraction of reference-burnable cells whose state matches `candidate`
///
/// Returns a value in `[0, 1]`.
///
/// # Errors
/// `DimensionMismatch` if the grids differ in shape and `UndefinedRatio` if
/// `reference` has no burnable cells.
pub fn compare(reference: &FireStateGrid, candidate: &FireStateGrid) -> Result<f64> {
    reference.ensure_same_dimensions(candidate, "candidate")?;

    let (total, matching) = reference
        .as_slice()
        .iter()
        .zip(candidate.as_slice())
        .filter(|(r, _)| r.is_some())
        .fold((0_usize, 0_usize), |(total, matching), (r, c)| {
            (total + 1, matching + usize::from(r == c))
        });

    if total == 0 {
        return Err(BushfireError::UndefinedRatio);
    }
    Ok(matching as f64 / total as f64)
}
