//! Formatted terminal output for setups, the catalog listing and audits.
//!
//! Formatting stays here so the math and resolution code never touch strings
//! meant for humans.

use crate::data::Catalog;
use crate::domain::{Diagnostic, Provenance, SetupField, SetupReport, Severity, VehicleSetup};
use crate::error::ResolutionError;

/// Outcome of resolving and computing one preset during an audit.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: String,
    pub outcome: Result<SetupReport, ResolutionError>,
}

impl AuditEntry {
    pub fn is_failure(&self) -> bool {
        match &self.outcome {
            Ok(report) => report.has_errors(),
            Err(_) => true,
        }
    }
}

/// One line per preset: id, layout, weight, name.
pub fn format_catalog_list(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== chassis - preset catalog v{} ({}) ===\n",
        catalog.version(),
        catalog.updated()
    ));

    out.push_str(format!("{:<28} {:<7} {:>8} {:<32}\n", "id", "layout", "kg", "name").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<28} {:-<7} {:-<8} {:-<32}\n", "", "", "", "").trim_end());
    out.push('\n');

    for entry in catalog.entries() {
        let weight = catalog
            .preset(entry.id)
            .map(|p| format!("{:.0}", p.params.total_weight.value()))
            .unwrap_or_else(|_| "?".to_string());
        out.push_str(
            format!(
                "{:<28} {:<7} {:>8} {:<32}\n",
                truncate(entry.id, 28),
                entry.layout.display_name(),
                weight,
                truncate(entry.name, 32),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    let compounds: Vec<&str> = catalog.compounds().ids().collect();
    out.push_str(&format!("\nCompounds: {}\n", compounds.join(", ")));
    out.push_str(&format!("{} presets\n", catalog.len()));
    out
}

/// Full setup report: chassis summary, wheel table, roll split, diagnostics.
pub fn format_report(setup: &VehicleSetup, report: &SetupReport) -> String {
    let f = &setup.fixed;
    let t = &setup.tunable;
    let mut out = String::new();

    out.push_str(&format!("=== {} ({}) ===\n", setup.name, setup.vehicle_id));
    out.push_str(&format!(
        "Layout: {} | weight={:.0}kg | front={:.1}% | cg={:.0}mm | wheelbase={:.0}mm\n",
        f.layout.display_name(),
        f.total_weight_kg,
        f.weight_front_pct,
        f.cg_height_mm,
        f.wheelbase_mm,
    ));
    out.push_str(&format!(
        "Track: front={:.0}mm rear={:.0}mm\n",
        f.front_track_mm, f.rear_track_mm
    ));
    out.push_str(&format!(
        "Springs: {:.1}/{:.1} N/mm | ARB: {:.0}/{:.0} Nm/deg | MR: {:.2}/{:.2}\n",
        t.front_spring_rate, t.rear_spring_rate, t.front_arb_rate, t.rear_arb_rate, t.front_motion_ratio, t.rear_motion_ratio,
    ));
    out.push_str(&format!("Tires: {}", t.tire.compound));
    if t.tire.compound != setup.reference_tire.compound {
        out.push_str(&format!(" (preset: {})", setup.reference_tire.compound));
    }
    out.push('\n');
    match &t.dampers {
        Some(d) => out.push_str(&format!(
            "Dampers: bump {:.0}/{:.0} rebound {:.0}/{:.0}\n",
            d.front_bump, d.rear_bump, d.front_rebound, d.rear_rebound
        )),
        None => out.push_str("Dampers: not adjustable\n"),
    }
    if let Some(lc) = report.load_case {
        out.push_str(&format!(
            "Load case: lateral={:+.2}g longitudinal={:+.2}g\n",
            lc.lateral_g, lc.longitudinal_g
        ));
    }

    out.push('\n');
    out.push_str(&format_wheel_table(report));

    out.push_str(&format!(
        "\nRoll stiffness: front={:.0} rear={:.0} Nm/deg | front share={:.1}% (weight {:.1}%)\n",
        report.roll.front_nm_per_deg, report.roll.rear_nm_per_deg, report.roll.front_pct, f.weight_front_pct,
    ));

    let overridden: Vec<&str> = overridden_fields(setup).into_iter().map(SetupField::as_str).collect();
    if !overridden.is_empty() {
        out.push_str(&format!("Overrides: {}\n", overridden.join(", ")));
    }

    out.push_str("\nDiagnostics:\n");
    if report.diagnostics.is_empty() {
        out.push_str("  (none)\n");
    }
    for d in &report.diagnostics {
        out.push_str(&format!("  {}\n", format_diagnostic(d)));
    }

    if !report.provenance.is_empty() {
        out.push_str("\nUnconfirmed catalog values:\n");
        for note in &report.provenance {
            out.push_str(&format!("  {:<22} {}\n", note.field.as_str(), note.confidence.as_str()));
        }
    }

    out
}

fn format_wheel_table(report: &SetupReport) -> String {
    let mut out = String::new();
    let dynamic = report.load_case.is_some();

    let header = format!(
        "{:<6} {:>9} {:>9} {:>10} {:>8} {:>8} {:>8} {:>7}",
        "corner", "static", "dynamic", "wheel_N/mm", "ride_Hz", "p_bar", "camber", "toe"
    );
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<9} {:-<9} {:-<10} {:-<8} {:-<8} {:-<8} {:-<7}", "", "", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for w in &report.wheels {
        let dyn_load = match (dynamic, w.dynamic_load_kg) {
            (true, Some(v)) => format!("{v:.1}"),
            _ => "-".to_string(),
        };
        out.push_str(
            format!(
                "{:<6} {:>9.1} {:>9} {:>10.2} {:>8.2} {:>8.2} {:>8.2} {:>7.2}",
                w.corner.as_str(),
                w.static_load_kg,
                dyn_load,
                w.wheel_rate_n_per_mm,
                w.ride_frequency_hz,
                w.target_pressure_bar,
                w.camber_deg,
                w.toe_deg,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// `[warning] front_camber: positive_front_camber (observed 0.50, expected [-3.00, 0.00])`
pub fn format_diagnostic(d: &Diagnostic) -> String {
    let mut s = format!("[{}] {}: {} (observed {:.2}", d.severity.as_str(), d.field, d.code, d.observed);
    if let Some(range) = d.expected {
        s.push_str(&format!(", expected [{:.2}, {:.2}]", range.min, range.max));
    }
    s.push(')');
    s
}

/// Audit table: one row per preset with diagnostic counts.
pub fn format_audit(entries: &[AuditEntry], only_errors: bool) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<28} {:>5} {:>5} {:>5}  {:<8}\n", "id", "err", "warn", "info", "status").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<28} {:-<5} {:-<5} {:-<5}  {:-<8}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    let mut failures = 0usize;
    for entry in entries {
        if entry.is_failure() {
            failures += 1;
        } else if only_errors {
            continue;
        }
        let row = match &entry.outcome {
            Ok(report) => format!(
                "{:<28} {:>5} {:>5} {:>5}  {:<8}",
                truncate(&entry.id, 28),
                report.count(Severity::Error),
                report.count(Severity::Warning),
                report.count(Severity::Info),
                if report.has_errors() { "FAIL" } else { "ok" },
            ),
            Err(e) => format!("{:<28} {:>5} {:>5} {:>5}  unresolvable: {e}", truncate(&entry.id, 28), "-", "-", "-"),
        };
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("\n{} presets audited, {} failing\n", entries.len(), failures));
    out
}

/// Fields the user overrode, in `SetupField` order.
pub fn overridden_fields(setup: &VehicleSetup) -> Vec<SetupField> {
    setup
        .provenance
        .iter()
        .filter(|(_, p)| **p == Provenance::Override)
        .map(|(f, _)| *f)
        .collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
