//! Core cell types

pub mod fire_state;
pub mod vegetation;

pub use fire_state::FireState;
pub use vegetation::VegetationType;
