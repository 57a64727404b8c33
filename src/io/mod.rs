//! Input/output helpers.
//!
//! - overrides JSON files (`overrides`)
//! - setup report exports (`export`)

pub mod export;
pub mod overrides;

pub use export::*;
pub use overrides::*;
