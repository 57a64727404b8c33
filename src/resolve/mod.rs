//! Parameter resolution: preset + overrides → `VehicleSetup`.
//!
//! Rules:
//! 1. A tunable field takes the override when one is given, else the preset value.
//! 2. Fixed chassis fields always come from the preset.
//! 3. Hard physical bounds are enforced on the resolved value, whatever its
//!    source. A catalog row with a zero motion ratio is as unusable as an
//!    override with one.
//!
//! Camber and toe only have to be finite here. Whether a value is *sensible*
//! is a compute-time diagnostic, not a resolution failure.

pub mod overrides;

use std::collections::BTreeMap;

pub use overrides::UserOverrides;

use crate::data::PresetRecord;
use crate::domain::{
    DamperSettings, FixedChassisParams, GeometrySettings, Provenance, SetupField, TireCurves,
    TireSettings, TunableParams, VehicleSetup,
};
use crate::error::ResolutionError;

/// Closed/open interval used for hard bounds.
#[derive(Debug, Clone, Copy)]
struct Bound {
    min: f64,
    max: f64,
    min_exclusive: bool,
}

impl Bound {
    fn contains(self, v: f64) -> bool {
        let above = if self.min_exclusive { v > self.min } else { v >= self.min };
        v.is_finite() && above && v <= self.max
    }
}

const POSITIVE: Bound = Bound { min: 0.0, max: f64::INFINITY, min_exclusive: true };
/// ARB rates and damper forces: zero is a real value ("no bar").
const NON_NEGATIVE: Bound = Bound { min: 0.0, max: f64::INFINITY, min_exclusive: false };
const MOTION_RATIO: Bound = Bound { min: 0.0, max: 1.2, min_exclusive: true };
const PERCENT: Bound = Bound { min: 0.0, max: 100.0, min_exclusive: false };
const TIRE_PRESSURE_BAR: Bound = Bound { min: 0.0, max: 6.0, min_exclusive: true };
const ANGLE: Bound = Bound { min: f64::NEG_INFINITY, max: f64::INFINITY, min_exclusive: false };

fn bound_for(field: SetupField) -> Bound {
    match field {
        SetupField::FrontArbRate
        | SetupField::RearArbRate
        | SetupField::FrontBump
        | SetupField::FrontRebound
        | SetupField::RearBump
        | SetupField::RearRebound => NON_NEGATIVE,
        SetupField::FrontMotionRatio | SetupField::RearMotionRatio => MOTION_RATIO,
        SetupField::WeightFrontPct => PERCENT,
        SetupField::FrontTirePressure | SetupField::RearTirePressure => TIRE_PRESSURE_BAR,
        SetupField::FrontCamber | SetupField::RearCamber | SetupField::FrontToe | SetupField::RearToe => ANGLE,
        _ => POSITIVE,
    }
}

fn check(field: SetupField, value: f64) -> Result<f64, ResolutionError> {
    let bound = bound_for(field);
    if bound.contains(value) {
        Ok(value)
    } else {
        Err(ResolutionError::OutOfRange(field, value, bound.min, bound.max))
    }
}

/// Accumulates resolved values and where each came from.
struct Resolver<'a> {
    preset: &'a PresetRecord,
    overrides: &'a UserOverrides,
    provenance: BTreeMap<SetupField, Provenance>,
}

impl<'a> Resolver<'a> {
    fn fixed(&mut self, field: SetupField) -> Result<f64, ResolutionError> {
        let tagged = self
            .preset
            .params
            .get(field)
            .ok_or_else(|| ResolutionError::MissingRequiredField(field.to_string()))?;
        self.provenance.insert(field, Provenance::Catalog(tagged.confidence()));
        check(field, tagged.value())
    }

    fn tunable(&mut self, field: SetupField, default: f64) -> Result<f64, ResolutionError> {
        let value = match self.overrides.value(field) {
            Some(v) => {
                self.provenance.insert(field, Provenance::Override);
                v
            }
            None => {
                self.provenance
                    .insert(field, Provenance::Catalog(self.preset.confidence(field)));
                default
            }
        };
        check(field, value)
    }

    fn chassis_tunable(&mut self, field: SetupField) -> Result<f64, ResolutionError> {
        let default = self
            .preset
            .params
            .get(field)
            .map(|t| t.value())
            .ok_or_else(|| ResolutionError::MissingRequiredField(field.to_string()))?;
        self.tunable(field, default)
    }
}

/// Merge `overrides` into `preset`, producing a fully populated setup.
pub fn resolve(preset: &PresetRecord, overrides: &UserOverrides) -> Result<VehicleSetup, ResolutionError> {
    let mut r = Resolver {
        preset,
        overrides,
        provenance: BTreeMap::new(),
    };

    let fixed = FixedChassisParams {
        layout: preset.layout,
        front_track_mm: r.fixed(SetupField::FrontTrack)?,
        rear_track_mm: r.fixed(SetupField::RearTrack)?,
        wheelbase_mm: r.fixed(SetupField::Wheelbase)?,
        cg_height_mm: r.fixed(SetupField::CgHeight)?,
        weight_front_pct: r.fixed(SetupField::WeightFrontPct)?,
        total_weight_kg: r.fixed(SetupField::TotalWeight)?,
    };

    let defaults = &preset.tire_defaults;
    let compound = match &overrides.tire_compound {
        Some(c) => {
            let c = c.trim();
            if c.is_empty() {
                return Err(ResolutionError::MissingRequiredField(SetupField::TireCompound.to_string()));
            }
            r.provenance.insert(SetupField::TireCompound, Provenance::Override);
            c.to_string()
        }
        None => {
            r.provenance.insert(
                SetupField::TireCompound,
                Provenance::Catalog(preset.confidence(SetupField::TireCompound)),
            );
            defaults.compound.clone()
        }
    };
    let tire = TireSettings {
        front_pressure: r.tunable(SetupField::FrontTirePressure, defaults.front_pressure)?,
        rear_pressure: r.tunable(SetupField::RearTirePressure, defaults.rear_pressure)?,
        compound,
    };

    let g = &preset.geometry_defaults;
    let geometry = GeometrySettings {
        front_camber: r.tunable(SetupField::FrontCamber, g.front_camber)?,
        rear_camber: r.tunable(SetupField::RearCamber, g.rear_camber)?,
        front_toe: r.tunable(SetupField::FrontToe, g.front_toe)?,
        rear_toe: r.tunable(SetupField::RearToe, g.rear_toe)?,
    };

    let dampers = match preset.damper_defaults {
        Some(d) => Some(DamperSettings {
            front_bump: r.tunable(SetupField::FrontBump, d.front_bump)?,
            front_rebound: r.tunable(SetupField::FrontRebound, d.front_rebound)?,
            rear_bump: r.tunable(SetupField::RearBump, d.rear_bump)?,
            rear_rebound: r.tunable(SetupField::RearRebound, d.rear_rebound)?,
        }),
        None if overrides.touches_dampers() => {
            return Err(ResolutionError::NotAdjustable("damper".to_string()));
        }
        None => None,
    };

    let tunable = TunableParams {
        front_spring_rate: r.chassis_tunable(SetupField::FrontSpringRate)?,
        rear_spring_rate: r.chassis_tunable(SetupField::RearSpringRate)?,
        front_arb_rate: r.chassis_tunable(SetupField::FrontArbRate)?,
        rear_arb_rate: r.chassis_tunable(SetupField::RearArbRate)?,
        front_motion_ratio: r.chassis_tunable(SetupField::FrontMotionRatio)?,
        rear_motion_ratio: r.chassis_tunable(SetupField::RearMotionRatio)?,
        tire,
        geometry,
        dampers,
    };

    let tire_curves = TireCurves {
        reference: preset.compounds.curve(&defaults.compound).cloned(),
        selected: preset.compounds.curve(&tunable.tire.compound).cloned(),
    };

    tracing::debug!(
        vehicle = preset.id.as_str(),
        overrides = overrides.fields().len(),
        "resolved setup"
    );

    Ok(VehicleSetup {
        vehicle_id: preset.id.clone(),
        name: preset.name.clone(),
        fixed,
        tunable,
        reference_tire: defaults.clone(),
        provenance: r.provenance,
        tire_curves,
    })
}
