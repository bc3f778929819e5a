//! Error type shared by ingestion, validation and analysis
//!
//! All computations in this crate are pure functions over in-memory grids, so
//! there are no transient failures. Errors fall into three groups:
//! - missing or malformed input (file absent, bad cell, ragged rows)
//! - precondition failures (layers with mismatched dimensions), checked once
//!   at the boundary before any simulation work starts
//! - degenerate input (comparing against a grid with no burnable cells)

use std::path::PathBuf;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, BushfireError>;

/// Errors that can occur while loading terrain or running an analysis
#[derive(Debug, Clone, PartialEq)]
pub enum BushfireError {
    /// Input file does not exist
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },
    /// Input/output failure other than a missing file
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error message
        message: String,
    },
    /// A cell could not be parsed into the layer's value type
    Parse {
        /// Source file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// 1-based column number
        column: usize,
        /// Raw cell text
        value: String,
        /// What the cell should have contained
        expected: &'static str,
    },
    /// A row has a different number of cells than the first row
    RaggedRow {
        /// Source file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Cell count of the first row
        expected: usize,
        /// Cell count of the offending row
        found: usize,
    },
    /// A grid with zero rows or zero columns
    EmptyGrid,
    /// Flat cell storage does not hold `rows * cols` cells
    CellCount {
        rows: usize,
        cols: usize,
        /// Number of cells supplied
        found: usize,
    },
    /// Two layers that must share dimensions do not
    DimensionMismatch {
        /// Name of the layer that disagrees
        layer: &'static str,
        /// Expected `(rows, cols)`
        expected: (usize, usize),
        /// Actual `(rows, cols)`
        found: (usize, usize),
    },
    /// Agreement ratio requested against a reference with no burnable cells
    UndefinedRatio,
    /// Invalid simulation configuration
    Config(String),
    /// A result could not be encoded for output
    Encode(String),
}

impl std::fmt::Display for BushfireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BushfireError::NotFound { path } => {
                write!(f, "The specified file could not be found: {}", path.display())
            }
            BushfireError::Io { path, message } => {
                write!(f, "Failed to access {}: {message}", path.display())
            }
            BushfireError::Parse {
                path,
                line,
                column,
                value,
                expected,
            } => write!(
                f,
                "{}:{line}:{column}: expected {expected}, got '{value}'",
                path.display()
            ),
            BushfireError::RaggedRow {
                path,
                line,
                expected,
                found,
            } => write!(
                f,
                "{}:{line}: row has {found} cells, expected {expected}",
                path.display()
            ),
            BushfireError::EmptyGrid => write!(f, "Grid has no cells"),
            BushfireError::CellCount { rows, cols, found } => write!(
                f,
                "A {rows}x{cols} grid needs {} cells, got {found}",
                rows.saturating_mul(*cols)
            ),
            BushfireError::DimensionMismatch {
                layer,
                expected,
                found,
            } => write!(
                f,
                "Layer '{layer}' is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            BushfireError::UndefinedRatio => {
                write!(f, "Reference grid has no burnable cells, ratio is undefined")
            }
            BushfireError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            BushfireError::Encode(msg) => write!(f, "Failed to encode output: {msg}"),
        }
    }
}

impl std::error::Error for BushfireError {}
