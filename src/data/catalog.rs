//! The preset catalog: vehicles and compound reference data, read-only.
//!
//! A catalog is a JSON document:
//!
//! ```text
//! { "version": "...", "updated": "YYYY-MM-DD",
//!   "compounds": { id: { "name": ..., "curve": [[load_kg, pressure_bar], ...] } },
//!   "vehicles":  { id: { "name", "layout", "params", "tire_defaults",
//!                        "geometry_defaults", "damper_defaults"?, "confidence" } } }
//! ```
//!
//! The crate ships a sample catalog compiled in with `include_str!`; it is parsed
//! once per process and never written to.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::data::compound::{CompoundReference, CompoundTable};
use crate::data::preset::{PresetRecord, VehicleEntry};
use crate::domain::{Layout, VehicleSetup};
use crate::error::{CatalogError, ResolutionError};
use crate::resolve::{UserOverrides, resolve};

const EMBEDDED_JSON: &str = include_str!("../../assets/presets.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: String,
    updated: NaiveDate,
    #[serde(default)]
    compounds: BTreeMap<String, CompoundReference>,
    vehicles: BTreeMap<String, VehicleEntry>,
}

/// A short listing line for one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub layout: Layout,
}

#[derive(Debug)]
pub struct Catalog {
    version: String,
    updated: NaiveDate,
    compounds: Arc<CompoundTable>,
    vehicles: BTreeMap<String, VehicleEntry>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if file.vehicles.is_empty() {
            return Err(CatalogError::InvalidEntry(
                "vehicles".to_string(),
                "catalog has no vehicles".to_string(),
            ));
        }
        for (id, vehicle) in &file.vehicles {
            if id.trim().is_empty() {
                return Err(CatalogError::InvalidEntry(id.clone(), "empty vehicle id".to_string()));
            }
            if vehicle.name.trim().is_empty() {
                return Err(CatalogError::InvalidEntry(id.clone(), "empty vehicle name".to_string()));
            }
        }

        let compounds = CompoundTable::new(file.compounds);
        if compounds.is_empty() {
            tracing::warn!(
                version = file.version.as_str(),
                "catalog has no compound curves, pressure targets stay at setup values"
            );
        }
        tracing::debug!(
            version = file.version.as_str(),
            vehicles = file.vehicles.len(),
            compounds = compounds.len(),
            "catalog loaded"
        );

        Ok(Self {
            version: file.version,
            updated: file.updated,
            compounds: Arc::new(compounds),
            vehicles: file.vehicles,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The catalog compiled into the crate.
    pub fn embedded() -> Result<&'static Catalog, CatalogError> {
        static EMBEDDED: OnceLock<Result<Catalog, String>> = OnceLock::new();
        match EMBEDDED.get_or_init(|| Catalog::from_json_str(EMBEDDED_JSON).map_err(|e| e.to_string())) {
            Ok(catalog) => Ok(catalog),
            Err(msg) => Err(CatalogError::Embedded(msg.clone())),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn updated(&self) -> NaiveDate {
        self.updated
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Vehicle ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vehicles.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.vehicles.iter().map(|(id, v)| CatalogEntry {
            id: id.as_str(),
            name: v.name.as_str(),
            layout: v.layout,
        })
    }

    pub fn compounds(&self) -> &CompoundTable {
        &self.compounds
    }

    /// Look up one vehicle as a fully populated preset record.
    pub fn preset(&self, id: &str) -> Result<PresetRecord, ResolutionError> {
        let entry = self
            .vehicles
            .get(id)
            .ok_or_else(|| ResolutionError::UnknownPresetId(id.to_string()))?;
        entry.to_record(id, &self.compounds)
    }

    /// Resolve a preset by id with overrides given as JSON.
    ///
    /// An empty string means "no overrides".
    pub fn resolve(&self, id: &str, overrides_json: &str) -> Result<VehicleSetup, ResolutionError> {
        let preset = self.preset(id)?;
        let overrides = if overrides_json.trim().is_empty() {
            UserOverrides::default()
        } else {
            UserOverrides::from_json(overrides_json)?
        };
        resolve(&preset, &overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, SetupField};

    #[test]
    fn embedded_catalog_parses_and_every_preset_resolves() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        for id in catalog.ids() {
            let setup = catalog.resolve(id, "").unwrap_or_else(|e| panic!("{id}: {e}"));
            assert_eq!(setup.vehicle_id, id);
        }
    }

    #[test]
    fn embedded_catalog_compounds_cover_every_preset() {
        let catalog = Catalog::embedded().unwrap();
        for id in catalog.ids() {
            let preset = catalog.preset(id).unwrap();
            assert!(
                catalog.compounds().contains(&preset.tire_defaults.compound),
                "{id} uses unknown compound {}",
                preset.tire_defaults.compound
            );
        }
    }

    #[test]
    fn embedded_catalog_is_shared() {
        let a = Catalog::embedded().unwrap() as *const Catalog;
        let b = Catalog::embedded().unwrap() as *const Catalog;
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_id_is_reported() {
        let catalog = Catalog::embedded().unwrap();
        let err = catalog.resolve("no_such_car", "{}").unwrap_err();
        assert_eq!(err, ResolutionError::UnknownPresetId("no_such_car".to_string()));
    }

    #[test]
    fn incomplete_vehicle_fails_only_on_lookup() {
        let json = r#"{
            "version": "test", "updated": "2024-05-01",
            "vehicles": {
                "half_done": { "name": "Half Done", "layout": "FF", "params": { "front_spring_rate": 30 } }
            }
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let err = catalog.preset("half_done").unwrap_err();
        assert!(matches!(err, ResolutionError::MissingRequiredField(_)));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let json = r#"{ "version": "test", "updated": "2024-05-01", "vehicles": {} }"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::InvalidEntry(_, _))
        ));
    }

    #[test]
    fn confidence_tags_survive_lookup() {
        let catalog = Catalog::embedded().unwrap();
        let preset = catalog.preset("porsche_911_996").unwrap();
        assert_eq!(preset.confidence(SetupField::TotalWeight), Confidence::Confirmed);
        assert_eq!(preset.confidence(SetupField::CgHeight), Confidence::Estimated);
    }

    #[test]
    fn padded_compound_id_still_finds_its_curve() {
        let json = r#"{
            "version": "test", "updated": "2024-05-01",
            "compounds": { "street": { "name": "Street", "curve": [[200, 1.8], [600, 2.6]] } },
            "vehicles": {
                "padded": {
                    "name": "Padded", "layout": "FR",
                    "params": {
                        "front_spring_rate": 30, "rear_spring_rate": 25,
                        "front_arb_rate": 400, "rear_arb_rate": 0,
                        "front_track": 1450, "rear_track": 1460,
                        "front_motion_ratio": 0.9, "rear_motion_ratio": 0.8,
                        "weight_front_pct": 52, "total_weight": 1200,
                        "cg_height": 480, "wheelbase": 2500
                    },
                    "tire_defaults": { "compound": "street ", "front_optimal_pressure": 2.2, "rear_optimal_pressure": 2.1 },
                    "geometry_defaults": { "front_camber": -1.0, "rear_camber": -1.5, "front_toe": 0.0, "rear_toe": 0.1 }
                }
            }
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let preset = catalog.preset("padded").unwrap();
        assert_eq!(preset.tire_defaults.compound, "street");

        let setup = catalog.resolve("padded", "").unwrap();
        assert_eq!(setup.tunable.tire, preset.tire_defaults);
        assert_eq!(setup.reference_tire, preset.tire_defaults);
        assert!(setup.tire_curves.reference.is_some());
        assert!(setup.tire_curves.selected.is_some());
        assert!(!setup.is_overridden(SetupField::TireCompound));
    }

    #[test]
    fn unknown_layout_fails_to_parse() {
        let json = r#"{
            "version": "test", "updated": "2024-05-01",
            "vehicles": { "x": { "name": "X", "layout": "FWD" } }
        }"#;
        assert!(matches!(Catalog::from_json_str(json), Err(CatalogError::Parse(_))));
    }
}
