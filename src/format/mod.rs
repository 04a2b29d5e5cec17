//! FDD format geometry and constants

/// Format constants
pub mod constants;
/// Disk geometry and CHS linearization
pub mod geometry;

pub use constants::*;
pub use geometry::Geometry;
