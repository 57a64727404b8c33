//! `chassis-setup` library crate.
//!
//! The binary (`chassis`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the resolve/compute pair can be embedded in other front-ends
//!
//! Flow: `data` (preset catalog) → `resolve` (preset + overrides → setup) →
//! `report::compute` (math, transfer, advisor → report with diagnostics).

pub mod advisor;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod resolve;
pub mod transfer;
