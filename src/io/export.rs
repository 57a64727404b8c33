//! Export a computed setup report to JSON.
//!
//! The export carries the resolved setup alongside the report so a saved file
//! is self-describing: which catalog it came from, which fields the user
//! changed, and every derived value.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{SetupField, SetupReport, VehicleSetup};
use crate::error::AppError;
use crate::report::overridden_fields;

/// On-disk schema of `chassis show --export`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    pub tool: &'static str,
    pub catalog_version: &'a str,
    pub catalog_updated: NaiveDate,
    pub overridden: Vec<SetupField>,
    pub setup: &'a VehicleSetup,
    pub report: &'a SetupReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(
        catalog_version: &'a str,
        catalog_updated: NaiveDate,
        setup: &'a VehicleSetup,
        report: &'a SetupReport,
    ) -> Self {
        Self {
            tool: "chassis",
            catalog_version,
            catalog_updated,
            overridden: overridden_fields(setup),
            setup,
            report,
        }
    }
}

/// Write a report export as pretty JSON.
pub fn write_report_json(path: &Path, export: &ReportExport<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::new(4, format!("Failed to write report JSON: {e}")))?;

    tracing::debug!(path = %path.display(), vehicle = %export.setup.vehicle_id, "wrote report export");
    Ok(())
}
