//! Setup reports: derived wheel states, roll stiffness and diagnostics.
//!
//! `compute` never fails. Anything questionable about a setup (odd camber,
//! wheel lift, a soft corner) becomes a `Diagnostic` in the report; hard
//! input errors were already rejected by the resolver.
//!
//! Diagnostics are emitted in a fixed order so two reports of the same setup
//! compare equal:
//! - tire compound
//! - camber and toe, front then rear
//! - per-corner ride frequency, FL → RR
//! - axle balance (wheel-rate bias, roll vs weight distribution)
//! - per-corner load checks, FL → RR (or one error for a non-finite load case)

pub mod format;

pub use format::*;

use crate::advisor::{camber_sanity, target_pressure, toe_sanity};
use crate::domain::{
    Axle, Confidence, Corner, Diagnostic, LoadCase, Provenance, ProvenanceNote, RollStiffness, SetupReport,
    VehicleSetup, WheelState,
};
use crate::math::{axle_roll_stiffness, ride_frequency, roll_stiffness_distribution, wheel_rate};
use crate::transfer::{corner_loads_for, lifted_corners, static_corner_loads};

/// Comfortable street ride frequency band (Hz).
pub const RIDE_FREQUENCY_MIN_HZ: f64 = 0.8;
pub const RIDE_FREQUENCY_MAX_HZ: f64 = 3.5;

/// Nose-heavy front-driven cars above this front weight share get the
/// wheel-rate bias check.
pub const NOSE_HEAVY_FRONT_PCT: f64 = 55.0;
pub const MAX_FRONT_REAR_WHEEL_RATE_RATIO: f64 = 1.5;

/// Allowed gap (percentage points) between roll stiffness and weight distribution.
pub const ROLL_WEIGHT_TOLERANCE_PCT: f64 = 15.0;

/// Share of total weight above which a single corner is flagged.
pub const CORNER_OVERLOAD_SHARE: f64 = 0.95;

/// Static report for a setup.
pub fn compute(setup: &VehicleSetup) -> SetupReport {
    build(setup, None)
}

/// Report with dynamic corner loads for one steady-state load case.
pub fn compute_with_load_case(setup: &VehicleSetup, load_case: LoadCase) -> SetupReport {
    build(setup, Some(load_case))
}

fn build(setup: &VehicleSetup, load_case: Option<LoadCase>) -> SetupReport {
    let f = &setup.fixed;
    let t = &setup.tunable;

    let static_loads = static_corner_loads(f.total_weight_kg, f.weight_front_pct, f.front_track_mm, f.rear_track_mm);
    let dynamic_loads = load_case
        .filter(LoadCase::is_finite)
        .map(|lc| corner_loads_for(setup, lc));

    let wheels = Corner::ALL.map(|corner| {
        let axle = corner.axle();
        let static_load = static_loads[corner.index()];
        let dynamic_load = dynamic_loads.map(|loads| loads[corner.index()]);
        let rate = wheel_rate(t.spring_rate(axle), t.motion_ratio(axle));
        let frequency = if static_load > 0.0 { ride_frequency(rate, static_load) } else { 0.0 };

        WheelState {
            corner,
            static_load_kg: static_load,
            dynamic_load_kg: dynamic_load,
            wheel_rate_n_per_mm: rate,
            ride_frequency_hz: frequency,
            target_pressure_bar: target_pressure(setup, axle, dynamic_load.unwrap_or(static_load), static_load),
            camber_deg: t.geometry.camber(axle),
            toe_deg: t.geometry.toe(axle),
        }
    });

    let front_roll = axle_roll_stiffness(
        wheels[Corner::FL.index()].wheel_rate_n_per_mm,
        t.front_arb_rate,
        f.front_track_mm,
    );
    let rear_roll = axle_roll_stiffness(
        wheels[Corner::RL.index()].wheel_rate_n_per_mm,
        t.rear_arb_rate,
        f.rear_track_mm,
    );
    let roll = RollStiffness {
        front_nm_per_deg: front_roll,
        rear_nm_per_deg: rear_roll,
        front_pct: roll_stiffness_distribution(front_roll, rear_roll),
    };

    let mut diagnostics = Vec::new();
    tire_diagnostics(setup, &mut diagnostics);
    geometry_diagnostics(setup, &mut diagnostics);
    ride_diagnostics(&wheels, &mut diagnostics);
    balance_diagnostics(setup, &wheels, &roll, &mut diagnostics);
    match (load_case, dynamic_loads) {
        (_, Some(loads)) => load_diagnostics(f.total_weight_kg, &loads, &mut diagnostics),
        (Some(lc), None) => {
            let observed = if lc.lateral_g.is_finite() { lc.longitudinal_g } else { lc.lateral_g };
            diagnostics.push(Diagnostic::error("load_case", "load_case_not_finite", observed));
        }
        (None, None) => {}
    }

    tracing::debug!(
        vehicle = %setup.vehicle_id,
        load_case = ?load_case,
        diagnostics = diagnostics.len(),
        "computed setup report"
    );

    SetupReport {
        vehicle_id: setup.vehicle_id.clone(),
        wheels,
        roll,
        load_case,
        diagnostics,
        provenance: provenance_notes(setup),
    }
}

fn tire_diagnostics(setup: &VehicleSetup, out: &mut Vec<Diagnostic>) {
    if setup.tire_curves.selected.is_none() {
        out.push(Diagnostic::warning("tire_compound", "unknown_compound", 0.0));
    }
}

fn geometry_diagnostics(setup: &VehicleSetup, out: &mut Vec<Diagnostic>) {
    let g = &setup.tunable.geometry;
    for axle in Axle::BOTH {
        out.extend(camber_sanity(g.camber(axle), setup.fixed.layout, axle));
    }
    for axle in Axle::BOTH {
        out.extend(toe_sanity(g.toe(axle), axle));
    }
}

fn ride_diagnostics(wheels: &[WheelState; 4], out: &mut Vec<Diagnostic>) {
    for w in wheels {
        let field = format!("ride_frequency_{}", w.corner.as_str().to_lowercase());
        if w.static_load_kg <= 0.0 {
            out.push(Diagnostic::error(field, "corner_unloaded", w.static_load_kg));
        } else if !(RIDE_FREQUENCY_MIN_HZ..=RIDE_FREQUENCY_MAX_HZ).contains(&w.ride_frequency_hz) {
            out.push(
                Diagnostic::warning(field, "ride_frequency_out_of_range", w.ride_frequency_hz)
                    .with_range(RIDE_FREQUENCY_MIN_HZ, RIDE_FREQUENCY_MAX_HZ),
            );
        }
    }
}

fn balance_diagnostics(setup: &VehicleSetup, wheels: &[WheelState; 4], roll: &RollStiffness, out: &mut Vec<Diagnostic>) {
    let f = &setup.fixed;

    let front_rate = wheels[Corner::FL.index()].wheel_rate_n_per_mm;
    let rear_rate = wheels[Corner::RL.index()].wheel_rate_n_per_mm;
    if f.layout.is_front_driven()
        && f.weight_front_pct > NOSE_HEAVY_FRONT_PCT
        && front_rate > MAX_FRONT_REAR_WHEEL_RATE_RATIO * rear_rate
    {
        out.push(
            Diagnostic::warning("front_spring_rate", "front_wheel_rate_bias", front_rate / rear_rate)
                .with_range(0.0, MAX_FRONT_REAR_WHEEL_RATE_RATIO),
        );
    }

    if (roll.front_pct - f.weight_front_pct).abs() > ROLL_WEIGHT_TOLERANCE_PCT {
        out.push(
            Diagnostic::warning("roll_distribution", "roll_weight_mismatch", roll.front_pct).with_range(
                (f.weight_front_pct - ROLL_WEIGHT_TOLERANCE_PCT).max(0.0),
                (f.weight_front_pct + ROLL_WEIGHT_TOLERANCE_PCT).min(100.0),
            ),
        );
    }
}

fn load_diagnostics(total_weight_kg: f64, loads: &[f64; 4], out: &mut Vec<Diagnostic>) {
    let lifted = lifted_corners(loads);
    for corner in Corner::ALL {
        let load = loads[corner.index()];
        let field = format!("load_{}", corner.as_str().to_lowercase());
        if lifted.contains(&corner) {
            out.push(Diagnostic::warning(field, "wheel_lift", load).with_range(0.0, total_weight_kg));
        } else if load > CORNER_OVERLOAD_SHARE * total_weight_kg {
            out.push(
                Diagnostic::info(field, "corner_overloaded", load)
                    .with_range(0.0, CORNER_OVERLOAD_SHARE * total_weight_kg),
            );
        }
    }
}

/// Catalog values the report relies on that are not confirmed.
fn provenance_notes(setup: &VehicleSetup) -> Vec<ProvenanceNote> {
    setup
        .provenance
        .iter()
        .filter_map(|(&field, &source)| match source {
            Provenance::Catalog(confidence @ (Confidence::Estimated | Confidence::Unknown)) => {
                Some(ProvenanceNote { field, confidence })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Catalog;
    use crate::domain::{SetupField, Severity, Tagged};
    use crate::resolve::{UserOverrides, resolve};

    fn setup_with(id: &str, overrides: &str) -> VehicleSetup {
        Catalog::embedded().unwrap().resolve(id, overrides).unwrap()
    }

    fn codes(report: &SetupReport) -> Vec<&'static str> {
        report.diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn compute_is_idempotent() {
        for id in Catalog::embedded().unwrap().ids() {
            let s = setup_with(id, "");
            assert_eq!(compute(&s), compute(&s), "{id}");
            let lc = LoadCase { lateral_g: 0.9, longitudinal_g: -0.4 };
            assert_eq!(compute_with_load_case(&s, lc), compute_with_load_case(&s, lc), "{id}");
        }
    }

    #[test]
    fn stock_roadster_is_clean() {
        let report = compute(&setup_with("mazda_mx5_na", ""));
        assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        assert_eq!(report.load_case, None);
        assert!(report.wheels.iter().all(|w| w.dynamic_load_kg.is_none()));
    }

    #[test]
    fn extreme_camber_is_an_error_diagnostic() {
        let s = setup_with("mazda_mx5_na", r#"{"front_camber": -15.0}"#);
        let report = compute(&s);
        assert!(report.has_errors());
        let d = report.diagnostics.iter().find(|d| d.field == "front_camber").unwrap();
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(report.wheel(Corner::FL).camber_deg, -15.0);
    }

    #[test]
    fn wheel_state_carries_rates_and_loads() {
        let s = setup_with("porsche_911_996", "");
        let report = compute(&s);
        let fl = report.wheel(Corner::FL);
        assert!((fl.static_load_kg - 262.2).abs() < 1e-9);
        assert!((fl.wheel_rate_n_per_mm - 30.0 * 0.95 * 0.95).abs() < 1e-12);
        assert!(fl.ride_frequency_hz > RIDE_FREQUENCY_MIN_HZ);
        assert_eq!(fl.target_pressure_bar, 2.0);
        assert_eq!(report.wheel(Corner::RR).target_pressure_bar, 2.5);
    }

    #[test]
    fn roll_distribution_sums_axles() {
        let report = compute(&setup_with("toyota_gr86_zn8", ""));
        let r = report.roll;
        let expected = r.front_nm_per_deg / (r.front_nm_per_deg + r.rear_nm_per_deg) * 100.0;
        assert_eq!(r.front_pct, expected);
        assert!(r.front_pct > 50.0 && r.front_pct < 70.0);
    }

    #[test]
    fn missing_rear_bar_skews_roll_distribution() {
        // De Dion rear with no bar: roll stiffness sits far forward of the weight.
        let report = compute(&setup_with("alfa_romeo_75_twin_spark", ""));
        assert!(codes(&report).contains(&"roll_weight_mismatch"));
    }

    #[test]
    fn stiff_front_on_nose_heavy_ff_is_flagged() {
        let report = compute(&setup_with("honda_civic_type_r_ek9", r#"{"front_spring_rate": 80}"#));
        let d = report.diagnostics.iter().find(|d| d.code == "front_wheel_rate_bias").unwrap();
        assert_eq!(d.severity, Severity::Warning);
        assert!(d.observed > MAX_FRONT_REAR_WHEEL_RATE_RATIO);

        // Same springs on a rear-driven car are not this check's business.
        let rwd = compute(&setup_with("toyota_gr86_zn8", r#"{"front_spring_rate": 80}"#));
        assert!(!codes(&rwd).contains(&"front_wheel_rate_bias"));
    }

    #[test]
    fn very_soft_spring_drops_below_ride_band() {
        let report = compute(&setup_with("mazda_mx5_na", r#"{"front_spring_rate": 2}"#));
        let fields: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|d| d.code == "ride_frequency_out_of_range")
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, ["ride_frequency_fl", "ride_frequency_fr"]);
    }

    #[test]
    fn wheel_lift_is_a_warning() {
        let s = setup_with("suzuki_jimny_jb64", "");
        let report = compute_with_load_case(&s, LoadCase { lateral_g: 2.0, longitudinal_g: 0.0 });
        let lift = report.diagnostics.iter().find(|d| d.code == "wheel_lift").unwrap();
        assert_eq!(lift.field, "load_fr");
        assert_eq!(lift.severity, Severity::Warning);
        assert!(report.wheel(Corner::FR).dynamic_load_kg.unwrap() < 0.0);
    }

    #[test]
    fn near_total_load_on_one_corner_is_info() {
        let s = setup_with("suzuki_jimny_jb64", "");
        let report = compute_with_load_case(&s, LoadCase { lateral_g: 2.0, longitudinal_g: -2.0 });
        let d = report.diagnostics.iter().find(|d| d.code == "corner_overloaded").unwrap();
        assert_eq!(d.field, "load_fl");
        assert_eq!(d.severity, Severity::Info);
    }

    #[test]
    fn non_finite_load_case_is_an_error_without_dynamic_loads() {
        let s = setup_with("mazda_mx5_na", "");
        for lc in [
            LoadCase { lateral_g: f64::NAN, longitudinal_g: 0.0 },
            LoadCase { lateral_g: 0.5, longitudinal_g: f64::INFINITY },
        ] {
            let report = compute_with_load_case(&s, lc);
            assert!(report.wheels.iter().all(|w| w.dynamic_load_kg.is_none()), "{lc:?}");
            let d = report.diagnostics.iter().find(|d| d.field == "load_case").unwrap();
            assert_eq!(d.code, "load_case_not_finite");
            assert_eq!(d.severity, Severity::Error);
            assert!(!codes(&report).contains(&"wheel_lift"));
            assert!(!codes(&report).contains(&"corner_overloaded"));
        }
    }

    #[test]
    fn fully_nose_loaded_car_reports_unloaded_rear_corners() {
        let mut preset = Catalog::embedded().unwrap().preset("toyota_gr86_zn8").unwrap();
        preset.params.weight_front_pct = Tagged::Confirmed(100.0);
        let s = resolve(&preset, &UserOverrides::default()).unwrap();
        let report = compute(&s);

        let unloaded: Vec<&str> = report
            .diagnostics
            .iter()
            .filter(|d| d.code == "corner_unloaded")
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(unloaded, ["ride_frequency_rl", "ride_frequency_rr"]);
        assert!(report.diagnostics.iter().filter(|d| d.code == "corner_unloaded").all(|d| d.severity == Severity::Error));
        assert_eq!(report.wheel(Corner::RL).ride_frequency_hz, 0.0);
        assert!(report.roll.front_pct.is_finite());
    }

    #[test]
    fn unknown_compound_warns_and_keeps_pressure() {
        let s = setup_with("toyota_mr2_sw20", r#"{"tire_compound": "vintage_bias_ply"}"#);
        let report = compute(&s);
        assert_eq!(report.diagnostics[0].code, "unknown_compound");
        assert_eq!(report.wheel(Corner::FL).target_pressure_bar, 2.1);
    }

    #[test]
    fn dynamic_load_moves_pressure_target() {
        let s = setup_with("toyota_gr86_zn8", "");
        let report = compute_with_load_case(&s, LoadCase { lateral_g: 1.0, longitudinal_g: 0.0 });
        let fl = report.wheel(Corner::FL);
        let fr = report.wheel(Corner::FR);
        assert!(fl.target_pressure_bar > s.tunable.tire.front_pressure);
        assert!(fr.target_pressure_bar < s.tunable.tire.front_pressure);
    }

    #[test]
    fn unconfirmed_catalog_values_are_noted() {
        let report = compute(&setup_with("porsche_911_996", ""));
        assert!(
            report
                .provenance
                .iter()
                .any(|n| n.field == SetupField::CgHeight && n.confidence == Confidence::Estimated)
        );
        assert!(!report.provenance.iter().any(|n| n.field == SetupField::TotalWeight));
    }
}
