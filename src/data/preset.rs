//! Preset records: one vehicle's baseline chassis, tire, geometry and damper data.
//!
//! Catalog entries are deserialized loosely (`VehicleEntry`, every number
//! optional) and turned into a `PresetRecord` on lookup. A missing number is
//! reported as `MissingRequiredField` at that point rather than failing the
//! whole catalog, because partially collected vehicles are normal in the data.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::data::compound::CompoundTable;
use crate::domain::{
    Confidence, DamperSettings, GeometrySettings, Layout, SetupField, Tagged, TireSettings,
};
use crate::error::ResolutionError;

/// Baseline chassis parameters, each tagged with its catalog confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetParams {
    pub front_spring_rate: Tagged,
    pub rear_spring_rate: Tagged,
    pub front_arb_rate: Tagged,
    pub rear_arb_rate: Tagged,
    pub front_track: Tagged,
    pub rear_track: Tagged,
    pub front_motion_ratio: Tagged,
    pub rear_motion_ratio: Tagged,
    pub weight_front_pct: Tagged,
    pub total_weight: Tagged,
    pub cg_height: Tagged,
    pub wheelbase: Tagged,
}

impl PresetParams {
    pub fn get(&self, field: SetupField) -> Option<Tagged> {
        let v = match field {
            SetupField::FrontSpringRate => self.front_spring_rate,
            SetupField::RearSpringRate => self.rear_spring_rate,
            SetupField::FrontArbRate => self.front_arb_rate,
            SetupField::RearArbRate => self.rear_arb_rate,
            SetupField::FrontTrack => self.front_track,
            SetupField::RearTrack => self.rear_track,
            SetupField::FrontMotionRatio => self.front_motion_ratio,
            SetupField::RearMotionRatio => self.rear_motion_ratio,
            SetupField::WeightFrontPct => self.weight_front_pct,
            SetupField::TotalWeight => self.total_weight,
            SetupField::CgHeight => self.cg_height,
            SetupField::Wheelbase => self.wheelbase,
            _ => return None,
        };
        Some(v)
    }
}

/// One vehicle of the catalog. Read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRecord {
    pub id: String,
    pub name: String,
    pub layout: Layout,
    pub params: PresetParams,
    pub tire_defaults: TireSettings,
    pub geometry_defaults: GeometrySettings,
    /// `None`: the vehicle's dampers are not adjustable.
    pub damper_defaults: Option<DamperSettings>,
    /// Confidence of the non-`params` fields (tires, geometry, dampers).
    pub defaults_confidence: BTreeMap<SetupField, Confidence>,
    /// Compound reference data of the catalog this preset came from.
    pub compounds: Arc<CompoundTable>,
}

impl PresetRecord {
    /// Catalog confidence of any field; fields without an entry are `Unknown`.
    pub fn confidence(&self, field: SetupField) -> Confidence {
        match self.params.get(field) {
            Some(tagged) => tagged.confidence(),
            None => self
                .defaults_confidence
                .get(&field)
                .copied()
                .unwrap_or(Confidence::Unknown),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ParamsEntry {
    front_spring_rate: Option<f64>,
    rear_spring_rate: Option<f64>,
    front_arb_rate: Option<f64>,
    rear_arb_rate: Option<f64>,
    front_track: Option<f64>,
    rear_track: Option<f64>,
    front_motion_ratio: Option<f64>,
    rear_motion_ratio: Option<f64>,
    weight_front_pct: Option<f64>,
    total_weight: Option<f64>,
    cg_height: Option<f64>,
    wheelbase: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TireEntry {
    compound: Option<String>,
    front_optimal_pressure: Option<f64>,
    rear_optimal_pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GeometryEntry {
    front_camber: Option<f64>,
    rear_camber: Option<f64>,
    front_toe: Option<f64>,
    rear_toe: Option<f64>,
}

/// A catalog vehicle as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VehicleEntry {
    pub(crate) name: String,
    pub(crate) layout: Layout,
    #[serde(default)]
    params: ParamsEntry,
    #[serde(default)]
    tire_defaults: TireEntry,
    #[serde(default)]
    geometry_defaults: GeometryEntry,
    #[serde(default)]
    damper_defaults: Option<DamperSettings>,
    #[serde(default)]
    confidence: BTreeMap<String, Confidence>,
}

impl VehicleEntry {
    pub(crate) fn to_record(
        &self,
        id: &str,
        compounds: &Arc<CompoundTable>,
    ) -> Result<PresetRecord, ResolutionError> {
        let confidence = self.parsed_confidence(id);
        let tag = |field: SetupField, value: Option<f64>| -> Result<Tagged, ResolutionError> {
            let value = value.ok_or_else(|| ResolutionError::MissingRequiredField(field.to_string()))?;
            let level = confidence.get(&field).copied().unwrap_or(Confidence::Unknown);
            Ok(Tagged::new(value, level))
        };
        let require = |field: SetupField, value: Option<f64>| -> Result<f64, ResolutionError> {
            value.ok_or_else(|| ResolutionError::MissingRequiredField(field.to_string()))
        };

        let p = &self.params;
        let params = PresetParams {
            front_spring_rate: tag(SetupField::FrontSpringRate, p.front_spring_rate)?,
            rear_spring_rate: tag(SetupField::RearSpringRate, p.rear_spring_rate)?,
            front_arb_rate: tag(SetupField::FrontArbRate, p.front_arb_rate)?,
            rear_arb_rate: tag(SetupField::RearArbRate, p.rear_arb_rate)?,
            front_track: tag(SetupField::FrontTrack, p.front_track)?,
            rear_track: tag(SetupField::RearTrack, p.rear_track)?,
            front_motion_ratio: tag(SetupField::FrontMotionRatio, p.front_motion_ratio)?,
            rear_motion_ratio: tag(SetupField::RearMotionRatio, p.rear_motion_ratio)?,
            weight_front_pct: tag(SetupField::WeightFrontPct, p.weight_front_pct)?,
            total_weight: tag(SetupField::TotalWeight, p.total_weight)?,
            cg_height: tag(SetupField::CgHeight, p.cg_height)?,
            wheelbase: tag(SetupField::Wheelbase, p.wheelbase)?,
        };

        let t = &self.tire_defaults;
        let compound = t
            .compound
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ResolutionError::MissingRequiredField(SetupField::TireCompound.to_string()))?;
        let tire_defaults = TireSettings {
            compound: compound.to_string(),
            front_pressure: require(SetupField::FrontTirePressure, t.front_optimal_pressure)?,
            rear_pressure: require(SetupField::RearTirePressure, t.rear_optimal_pressure)?,
        };

        let g = &self.geometry_defaults;
        let geometry_defaults = GeometrySettings {
            front_camber: require(SetupField::FrontCamber, g.front_camber)?,
            rear_camber: require(SetupField::RearCamber, g.rear_camber)?,
            front_toe: require(SetupField::FrontToe, g.front_toe)?,
            rear_toe: require(SetupField::RearToe, g.rear_toe)?,
        };

        let defaults_confidence = confidence
            .into_iter()
            .filter(|(field, _)| !is_chassis_param(*field))
            .collect();

        Ok(PresetRecord {
            id: id.to_string(),
            name: self.name.clone(),
            layout: self.layout,
            params,
            tire_defaults,
            geometry_defaults,
            damper_defaults: self.damper_defaults,
            defaults_confidence,
            compounds: Arc::clone(compounds),
        })
    }

    fn parsed_confidence(&self, id: &str) -> BTreeMap<SetupField, Confidence> {
        let mut out = BTreeMap::new();
        for (key, level) in &self.confidence {
            match SetupField::from_key(key) {
                Some(field) => {
                    out.insert(field, *level);
                }
                None => tracing::debug!(vehicle = id, key = key.as_str(), "ignoring unknown confidence key"),
            }
        }
        out
    }
}

/// Fields that live in `PresetParams`.
fn is_chassis_param(field: SetupField) -> bool {
    matches!(
        field,
        SetupField::FrontSpringRate
            | SetupField::RearSpringRate
            | SetupField::FrontArbRate
            | SetupField::RearArbRate
            | SetupField::FrontTrack
            | SetupField::RearTrack
            | SetupField::FrontMotionRatio
            | SetupField::RearMotionRatio
            | SetupField::WeightFrontPct
            | SetupField::TotalWeight
            | SetupField::CgHeight
            | SetupField::Wheelbase
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_json(params: &str) -> String {
        format!(
            r#"{{
                "name": "Test Car",
                "layout": "FR",
                "params": {params},
                "tire_defaults": {{ "compound": "street", "front_optimal_pressure": 2.2, "rear_optimal_pressure": 2.1 }},
                "geometry_defaults": {{ "front_camber": -1.0, "rear_camber": -1.5, "front_toe": 0.0, "rear_toe": 0.1 }},
                "confidence": {{ "front_spring_rate": "confirmed", "front_camber": "estimated", "damper_adjustable": "confirmed" }}
            }}"#
        )
    }

    const FULL_PARAMS: &str = r#"{
        "front_spring_rate": 30, "rear_spring_rate": 25,
        "front_arb_rate": 400, "rear_arb_rate": 0,
        "front_track": 1450, "rear_track": 1460,
        "front_motion_ratio": 0.9, "rear_motion_ratio": 0.8,
        "weight_front_pct": 52, "total_weight": 1200,
        "cg_height": 480, "wheelbase": 2500
    }"#;

    #[test]
    fn full_entry_builds_tagged_record() {
        let entry: VehicleEntry = serde_json::from_str(&entry_json(FULL_PARAMS)).unwrap();
        let record = entry.to_record("test_car", &Arc::new(CompoundTable::default())).unwrap();

        assert_eq!(record.params.front_spring_rate, Tagged::Confirmed(30.0));
        assert_eq!(record.params.rear_spring_rate, Tagged::Unknown(25.0));
        // Zero ARB is a value, not a missing field.
        assert_eq!(record.params.rear_arb_rate.value(), 0.0);
        assert_eq!(record.confidence(SetupField::FrontCamber), Confidence::Estimated);
        assert_eq!(record.confidence(SetupField::RearToe), Confidence::Unknown);
        assert!(record.damper_defaults.is_none());
    }

    #[test]
    fn missing_param_is_reported_by_name() {
        let params = FULL_PARAMS.replace("\"cg_height\": 480,", "");
        let entry: VehicleEntry = serde_json::from_str(&entry_json(&params)).unwrap();
        let err = entry.to_record("test_car", &Arc::new(CompoundTable::default())).unwrap_err();
        assert_eq!(err, ResolutionError::MissingRequiredField("cg_height".to_string()));
    }

    #[test]
    fn compound_id_is_trimmed_and_blank_is_missing() {
        let padded = entry_json(FULL_PARAMS).replace("\"compound\": \"street\"", "\"compound\": \" street \"");
        let entry: VehicleEntry = serde_json::from_str(&padded).unwrap();
        let record = entry.to_record("test_car", &Arc::new(CompoundTable::default())).unwrap();
        assert_eq!(record.tire_defaults.compound, "street");

        let blank = entry_json(FULL_PARAMS).replace("\"compound\": \"street\"", "\"compound\": \"  \"");
        let entry: VehicleEntry = serde_json::from_str(&blank).unwrap();
        let err = entry.to_record("test_car", &Arc::new(CompoundTable::default())).unwrap_err();
        assert_eq!(err, ResolutionError::MissingRequiredField("tire_compound".to_string()));
    }
}
