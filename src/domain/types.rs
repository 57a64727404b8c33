//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - read from the preset catalog
//! - carried through resolution and computation
//! - exported to JSON alongside a report

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::PressureCurve;

/// Drivetrain layout as spelled in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "FF")]
    Ff,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "RR")]
    Rr,
    #[serde(rename = "MR")]
    Mr,
    #[serde(rename = "AWD")]
    Awd,
    #[serde(rename = "4WD")]
    FourWd,
    #[serde(rename = "FMR")]
    Fmr,
    #[serde(rename = "MR-AWD")]
    MrAwd,
    #[serde(rename = "FF-AWD")]
    FfAwd,
}

impl Layout {
    pub const ALL: [Layout; 9] = [
        Layout::Ff,
        Layout::Fr,
        Layout::Rr,
        Layout::Mr,
        Layout::Awd,
        Layout::FourWd,
        Layout::Fmr,
        Layout::MrAwd,
        Layout::FfAwd,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Layout::Ff => "FF",
            Layout::Fr => "FR",
            Layout::Rr => "RR",
            Layout::Mr => "MR",
            Layout::Awd => "AWD",
            Layout::FourWd => "4WD",
            Layout::Fmr => "FMR",
            Layout::MrAwd => "MR-AWD",
            Layout::FfAwd => "FF-AWD",
        }
    }

    /// Front-engine, front-biased layouts (transverse FF platforms).
    pub fn is_front_driven(self) -> bool {
        matches!(self, Layout::Ff | Layout::FfAwd)
    }

    /// Engine behind the driver (mid or rear).
    pub fn is_rear_engined(self) -> bool {
        matches!(self, Layout::Rr | Layout::Mr | Layout::MrAwd)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axle {
    Front,
    Rear,
}

impl Axle {
    pub const BOTH: [Axle; 2] = [Axle::Front, Axle::Rear];

    pub fn as_str(self) -> &'static str {
        match self {
            Axle::Front => "front",
            Axle::Rear => "rear",
        }
    }
}

/// One of the four wheels.
///
/// Arrays of per-corner values are always ordered `[FL, FR, RL, RR]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Corner {
    FL,
    FR,
    RL,
    RR,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::FL, Corner::FR, Corner::RL, Corner::RR];

    pub fn as_str(self) -> &'static str {
        match self {
            Corner::FL => "FL",
            Corner::FR => "FR",
            Corner::RL => "RL",
            Corner::RR => "RR",
        }
    }

    /// Position in a `[FL, FR, RL, RR]` array.
    pub fn index(self) -> usize {
        match self {
            Corner::FL => 0,
            Corner::FR => 1,
            Corner::RL => 2,
            Corner::RR => 3,
        }
    }

    pub fn axle(self) -> Axle {
        match self {
            Corner::FL | Corner::FR => Axle::Front,
            Corner::RL | Corner::RR => Axle::Rear,
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much the catalog trusts a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Confirmed,
    Estimated,
    Unknown,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Confirmed => "confirmed",
            Confidence::Estimated => "estimated",
            Confidence::Unknown => "unknown",
        }
    }
}

/// A catalog value paired with its confidence.
///
/// `Unknown` values are still valid numeric inputs; the tag only travels along
/// as provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tagged {
    Confirmed(f64),
    Estimated(f64),
    Unknown(f64),
}

impl Tagged {
    pub fn new(value: f64, confidence: Confidence) -> Self {
        match confidence {
            Confidence::Confirmed => Tagged::Confirmed(value),
            Confidence::Estimated => Tagged::Estimated(value),
            Confidence::Unknown => Tagged::Unknown(value),
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Tagged::Confirmed(v) | Tagged::Estimated(v) | Tagged::Unknown(v) => v,
        }
    }

    pub fn confidence(self) -> Confidence {
        match self {
            Tagged::Confirmed(_) => Confidence::Confirmed,
            Tagged::Estimated(_) => Confidence::Estimated,
            Tagged::Unknown(_) => Confidence::Unknown,
        }
    }
}

/// Every named input of a setup.
///
/// The string form is the key used in catalog confidence maps and in
/// overrides JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupField {
    FrontSpringRate,
    RearSpringRate,
    FrontArbRate,
    RearArbRate,
    FrontTrack,
    RearTrack,
    FrontMotionRatio,
    RearMotionRatio,
    WeightFrontPct,
    TotalWeight,
    CgHeight,
    Wheelbase,
    TireCompound,
    FrontTirePressure,
    RearTirePressure,
    FrontCamber,
    RearCamber,
    FrontToe,
    RearToe,
    FrontBump,
    FrontRebound,
    RearBump,
    RearRebound,
}

impl SetupField {
    pub const ALL: [SetupField; 23] = [
        SetupField::FrontSpringRate,
        SetupField::RearSpringRate,
        SetupField::FrontArbRate,
        SetupField::RearArbRate,
        SetupField::FrontTrack,
        SetupField::RearTrack,
        SetupField::FrontMotionRatio,
        SetupField::RearMotionRatio,
        SetupField::WeightFrontPct,
        SetupField::TotalWeight,
        SetupField::CgHeight,
        SetupField::Wheelbase,
        SetupField::TireCompound,
        SetupField::FrontTirePressure,
        SetupField::RearTirePressure,
        SetupField::FrontCamber,
        SetupField::RearCamber,
        SetupField::FrontToe,
        SetupField::RearToe,
        SetupField::FrontBump,
        SetupField::FrontRebound,
        SetupField::RearBump,
        SetupField::RearRebound,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SetupField::FrontSpringRate => "front_spring_rate",
            SetupField::RearSpringRate => "rear_spring_rate",
            SetupField::FrontArbRate => "front_arb_rate",
            SetupField::RearArbRate => "rear_arb_rate",
            SetupField::FrontTrack => "front_track",
            SetupField::RearTrack => "rear_track",
            SetupField::FrontMotionRatio => "front_motion_ratio",
            SetupField::RearMotionRatio => "rear_motion_ratio",
            SetupField::WeightFrontPct => "weight_front_pct",
            SetupField::TotalWeight => "total_weight",
            SetupField::CgHeight => "cg_height",
            SetupField::Wheelbase => "wheelbase",
            SetupField::TireCompound => "tire_compound",
            SetupField::FrontTirePressure => "front_tire_pressure",
            SetupField::RearTirePressure => "rear_tire_pressure",
            SetupField::FrontCamber => "front_camber",
            SetupField::RearCamber => "rear_camber",
            SetupField::FrontToe => "front_toe",
            SetupField::RearToe => "rear_toe",
            SetupField::FrontBump => "front_bump",
            SetupField::FrontRebound => "front_rebound",
            SetupField::RearBump => "rear_bump",
            SetupField::RearRebound => "rear_rebound",
        }
    }

    pub fn from_key(key: &str) -> Option<SetupField> {
        SetupField::ALL.into_iter().find(|f| f.as_str() == key)
    }

    /// Fields the user may change in street-car mode.
    pub fn is_tunable(self) -> bool {
        !matches!(
            self,
            SetupField::FrontTrack
                | SetupField::RearTrack
                | SetupField::WeightFrontPct
                | SetupField::TotalWeight
                | SetupField::CgHeight
                | SetupField::Wheelbase
        )
    }

    pub fn spring_rate(axle: Axle) -> SetupField {
        match axle {
            Axle::Front => SetupField::FrontSpringRate,
            Axle::Rear => SetupField::RearSpringRate,
        }
    }

    pub fn tire_pressure(axle: Axle) -> SetupField {
        match axle {
            Axle::Front => SetupField::FrontTirePressure,
            Axle::Rear => SetupField::RearTirePressure,
        }
    }

    pub fn camber(axle: Axle) -> SetupField {
        match axle {
            Axle::Front => SetupField::FrontCamber,
            Axle::Rear => SetupField::RearCamber,
        }
    }

    pub fn toe(axle: Axle) -> SetupField {
        match axle {
            Axle::Front => SetupField::FrontToe,
            Axle::Rear => SetupField::RearToe,
        }
    }
}

impl fmt::Display for SetupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tire defaults from the catalog, or the tunable tire block of a setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireSettings {
    pub compound: String,
    /// bar
    pub front_pressure: f64,
    /// bar
    pub rear_pressure: f64,
}

impl TireSettings {
    pub fn pressure(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_pressure,
            Axle::Rear => self.rear_pressure,
        }
    }
}

/// Static alignment, degrees. Negative camber is top-in; positive toe is toe-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySettings {
    pub front_camber: f64,
    pub rear_camber: f64,
    pub front_toe: f64,
    pub rear_toe: f64,
}

impl GeometrySettings {
    pub fn camber(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_camber,
            Axle::Rear => self.rear_camber,
        }
    }

    pub fn toe(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_toe,
            Axle::Rear => self.rear_toe,
        }
    }
}

/// Damper forces (N) for vehicles with adjustable dampers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamperSettings {
    pub front_bump: f64,
    pub front_rebound: f64,
    pub rear_bump: f64,
    pub rear_rebound: f64,
}

/// Chassis parameters that street-car mode never lets the user change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixedChassisParams {
    pub layout: Layout,
    pub front_track_mm: f64,
    pub rear_track_mm: f64,
    pub wheelbase_mm: f64,
    pub cg_height_mm: f64,
    /// 0–100
    pub weight_front_pct: f64,
    pub total_weight_kg: f64,
}

impl FixedChassisParams {
    pub fn track_mm(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_track_mm,
            Axle::Rear => self.rear_track_mm,
        }
    }
}

/// The adjustable subset of a setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TunableParams {
    /// N/mm
    pub front_spring_rate: f64,
    /// N/mm
    pub rear_spring_rate: f64,
    /// Nm/deg; 0 means no bar.
    pub front_arb_rate: f64,
    /// Nm/deg; 0 means no bar.
    pub rear_arb_rate: f64,
    pub front_motion_ratio: f64,
    pub rear_motion_ratio: f64,
    pub tire: TireSettings,
    pub geometry: GeometrySettings,
    /// `None` for non-adjustable damper hardware.
    pub dampers: Option<DamperSettings>,
}

impl TunableParams {
    pub fn spring_rate(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_spring_rate,
            Axle::Rear => self.rear_spring_rate,
        }
    }

    pub fn arb_rate(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_arb_rate,
            Axle::Rear => self.rear_arb_rate,
        }
    }

    pub fn motion_ratio(&self, axle: Axle) -> f64 {
        match axle {
            Axle::Front => self.front_motion_ratio,
            Axle::Rear => self.rear_motion_ratio,
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Catalog(Confidence),
    Override,
}

/// Reference pressure curves the advisor needs, captured at resolution time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TireCurves {
    /// Curve of the compound the preset pressures were tuned for.
    pub reference: Option<PressureCurve>,
    /// Curve of the compound actually selected.
    pub selected: Option<PressureCurve>,
}

/// A fully populated setup: preset defaults with overrides applied.
///
/// Produced by `resolve::resolve`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSetup {
    pub vehicle_id: String,
    pub name: String,
    pub fixed: FixedChassisParams,
    pub tunable: TunableParams,
    /// The preset's tire defaults (what the baseline pressures were tuned for).
    pub reference_tire: TireSettings,
    pub provenance: BTreeMap<SetupField, Provenance>,
    #[serde(skip)]
    pub tire_curves: TireCurves,
}

impl VehicleSetup {
    pub fn provenance_of(&self, field: SetupField) -> Option<Provenance> {
        self.provenance.get(&field).copied()
    }

    pub fn is_overridden(&self, field: SetupField) -> bool {
        self.provenance_of(field) == Some(Provenance::Override)
    }
}

/// Acceleration input for a dynamic load case, in g.
///
/// Positive lateral is a right-hand turn (left wheels outside); positive
/// longitudinal is acceleration (load moves rearward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadCase {
    pub lateral_g: f64,
    pub longitudinal_g: f64,
}

impl LoadCase {
    /// Both accelerations are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lateral_g.is_finite() && self.longitudinal_g.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedRange {
    pub min: f64,
    pub max: f64,
}

impl ExpectedRange {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// One compute-time finding.
///
/// `code` is a stable message key; rendering it into prose is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub field: String,
    pub code: &'static str,
    pub observed: f64,
    pub expected: Option<ExpectedRange>,
}

impl Diagnostic {
    pub fn new(severity: Severity, field: impl Into<String>, code: &'static str, observed: f64) -> Self {
        Self {
            severity,
            field: field.into(),
            code,
            observed,
            expected: None,
        }
    }

    pub fn info(field: impl Into<String>, code: &'static str, observed: f64) -> Self {
        Self::new(Severity::Info, field, code, observed)
    }

    pub fn warning(field: impl Into<String>, code: &'static str, observed: f64) -> Self {
        Self::new(Severity::Warning, field, code, observed)
    }

    pub fn error(field: impl Into<String>, code: &'static str, observed: f64) -> Self {
        Self::new(Severity::Error, field, code, observed)
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.expected = Some(ExpectedRange { min, max });
        self
    }
}

/// Derived per-corner state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelState {
    pub corner: Corner,
    pub static_load_kg: f64,
    /// Present when the report was computed for a load case.
    pub dynamic_load_kg: Option<f64>,
    pub wheel_rate_n_per_mm: f64,
    pub ride_frequency_hz: f64,
    pub target_pressure_bar: f64,
    pub camber_deg: f64,
    pub toe_deg: f64,
}

/// Roll stiffness per axle (Nm/deg) and the front share (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollStiffness {
    pub front_nm_per_deg: f64,
    pub rear_nm_per_deg: f64,
    pub front_pct: f64,
}

/// A field whose catalog value is not confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProvenanceNote {
    pub field: SetupField,
    pub confidence: Confidence,
}

/// Everything `report::compute` derives from one setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupReport {
    pub vehicle_id: String,
    pub wheels: [WheelState; 4],
    pub roll: RollStiffness,
    pub load_case: Option<LoadCase>,
    pub diagnostics: Vec<Diagnostic>,
    pub provenance: Vec<ProvenanceNote>,
}

impl SetupReport {
    pub fn wheel(&self, corner: Corner) -> &WheelState {
        &self.wheels[corner.index()]
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trips_catalog_spelling() {
        for layout in Layout::ALL {
            let json = serde_json::to_string(&layout).unwrap();
            assert_eq!(json, format!("\"{}\"", layout.display_name()));
            let back: Layout = serde_json::from_str(&json).unwrap();
            assert_eq!(back, layout);
        }
    }

    #[test]
    fn setup_field_keys_are_unique_and_parse_back() {
        for field in SetupField::ALL {
            assert_eq!(SetupField::from_key(field.as_str()), Some(field));
        }
        assert_eq!(SetupField::from_key("damper_adjustable"), None);
    }

    #[test]
    fn tagged_keeps_value_and_confidence_together() {
        let t = Tagged::new(38.5, Confidence::Estimated);
        assert_eq!(t, Tagged::Estimated(38.5));
        assert_eq!(t.value(), 38.5);
        assert_eq!(t.confidence(), Confidence::Estimated);
    }

    #[test]
    fn fixed_fields_are_not_tunable() {
        assert!(!SetupField::Wheelbase.is_tunable());
        assert!(!SetupField::FrontTrack.is_tunable());
        assert!(SetupField::FrontSpringRate.is_tunable());
        assert!(SetupField::RearArbRate.is_tunable());
    }
}
