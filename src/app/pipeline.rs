//! Shared resolve → compute logic behind `chassis show` and `chassis audit`.
//!
//! The app module only parses arguments and prints; everything that turns a
//! preset id into a report goes through here.

use std::path::Path;

use rayon::prelude::*;

use crate::data::Catalog;
use crate::domain::{LoadCase, SetupReport, VehicleSetup};
use crate::error::AppError;
use crate::report::{AuditEntry, compute, compute_with_load_case};
use crate::resolve::{UserOverrides, resolve};

/// Outputs of a single `chassis show` run.
#[derive(Debug, Clone)]
pub struct ShowOutput {
    pub setup: VehicleSetup,
    pub report: SetupReport,
}

/// Resolve one preset with optional overrides and compute its report.
///
/// A load case is only applied when at least one acceleration is given.
pub fn run_show(
    catalog: &Catalog,
    id: &str,
    overrides_path: Option<&Path>,
    load_case: Option<LoadCase>,
) -> Result<ShowOutput, AppError> {
    let overrides = match overrides_path {
        Some(path) => crate::io::read_overrides(path)?,
        None => UserOverrides::default(),
    };

    let preset = catalog.preset(id)?;
    let setup = resolve(&preset, &overrides)?;
    let report = match load_case {
        Some(lc) => compute_with_load_case(&setup, lc),
        None => compute(&setup),
    };

    Ok(ShowOutput { setup, report })
}

/// Resolve and compute every preset in the catalog, in id order.
///
/// Presets are independent, so the work fans out across the rayon pool.
pub fn run_audit(catalog: &Catalog) -> Vec<AuditEntry> {
    let ids: Vec<&str> = catalog.ids().collect();
    ids.par_iter()
        .map(|id| {
            let outcome = catalog.preset(id).and_then(|preset| resolve(&preset, &UserOverrides::default()));
            AuditEntry {
                id: id.to_string(),
                outcome: outcome.map(|setup| compute(&setup)),
            }
        })
        .collect()
}
