//! Grid container, windowing geometry, terrain layers and their ingestion

pub mod layer;
pub mod loader;
pub mod render;
pub mod terrain;
pub mod window;

// Re-export main types
pub use layer::*;
pub use loader::*;
pub use render::*;
pub use terrain::*;
pub use window::*;
