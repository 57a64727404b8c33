//! Catalog data: preset vehicles and tire compound reference curves.

pub mod catalog;
pub mod compound;
pub mod preset;

pub use catalog::*;
pub use compound::*;
pub use preset::*;
