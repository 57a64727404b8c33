//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - vehicle vocabulary (`Layout`, `Axle`, `Corner`, `SetupField`)
//! - confidence-tagged catalog values (`Confidence`, `Tagged`)
//! - the resolved setup (`FixedChassisParams`, `TunableParams`, `VehicleSetup`)
//! - compute outputs (`WheelState`, `Diagnostic`, `SetupReport`)

pub mod types;

pub use types::*;
