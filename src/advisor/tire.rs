//! Tire pressure targets.
//!
//! A preset's pressures were tuned for its static corner loads on its default
//! compound. The advisor keeps them unless the load moves far from that
//! reference, then follows the compound's reference curve proportionally.

use crate::data::PressureCurve;
use crate::domain::{Axle, SetupField, VehicleSetup};

/// Relative load deviation inside which the preset pressure is kept unchanged.
pub const PRESSURE_LOAD_TOLERANCE: f64 = 0.10;

/// Recommend a pressure (bar) for a corner carrying `corner_load_kg`.
///
/// Within ±10% of `reference_load_kg` this is `optimal_pressure_bar` unchanged.
/// Otherwise the pressure is scaled by `curve(load) / curve(reference)`.
pub fn recommend_tire_pressure(
    corner_load_kg: f64,
    reference_load_kg: f64,
    optimal_pressure_bar: f64,
    curve: &PressureCurve,
) -> f64 {
    if reference_load_kg <= 0.0 {
        return optimal_pressure_bar;
    }
    let deviation = (corner_load_kg - reference_load_kg).abs() / reference_load_kg;
    if deviation <= PRESSURE_LOAD_TOLERANCE {
        return optimal_pressure_bar;
    }
    optimal_pressure_bar * curve.pressure_at(corner_load_kg) / curve.pressure_at(reference_load_kg)
}

/// Target pressure for one corner of a setup.
///
/// `reference_load_kg` is the corner's static load; `corner_load_kg` is what it
/// carries now (the same value for a static report). When the user switched
/// compound without also setting a pressure, the preset pressure is first
/// carried over to the new compound at the reference load. Without a curve for
/// the selected compound the setup pressure is returned unchanged.
pub fn target_pressure(setup: &VehicleSetup, axle: Axle, corner_load_kg: f64, reference_load_kg: f64) -> f64 {
    let base = setup.tunable.tire.pressure(axle);
    let Some(selected) = setup.tire_curves.selected.as_ref() else {
        return base;
    };

    let compound_changed = setup.tunable.tire.compound != setup.reference_tire.compound;
    let base = match (&setup.tire_curves.reference, compound_changed) {
        (Some(reference), true) if !setup.is_overridden(SetupField::tire_pressure(axle)) => {
            base * selected.pressure_at(reference_load_kg) / reference.pressure_at(reference_load_kg)
        }
        _ => base,
    };

    recommend_tire_pressure(corner_load_kg, reference_load_kg, base, selected)
}
