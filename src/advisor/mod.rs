//! Target advisor: tire pressure recommendations and alignment sanity checks.

pub mod geometry;
pub mod tire;

pub use geometry::*;
pub use tire::*;
