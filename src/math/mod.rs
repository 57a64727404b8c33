//! Mathematical utilities: suspension rates and curve interpolation.

pub mod interp;
pub mod suspension;

pub use interp::*;
pub use suspension::*;
