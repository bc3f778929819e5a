//! Fire risk estimation from static terrain layers

pub mod fire_risk;
pub mod matrix;

pub use fire_risk::{fire_risk, fire_risk_cell, wind_radius};
pub use matrix::{compute_risk_matrix, RiskMatrix};
