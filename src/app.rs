//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main:
//! - loads `.env` and parses CLI arguments
//! - installs the stderr log subscriber
//! - picks the catalog (file or built-in)
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::Level;

use crate::cli::{AuditArgs, Command, ShowArgs};
use crate::data::Catalog;
use crate::domain::LoadCase;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `chassis` binary.
pub fn run() -> Result<(), AppError> {
    // Must run before parsing so `CHASSIS_CATALOG` from `.env` reaches clap.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    init_logging(cli.verbose);

    let owned;
    let catalog: &Catalog = match &cli.catalog {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading catalog file");
            owned = Catalog::from_path(path)
                .map_err(|e| AppError::new(2, format!("Failed to load catalog '{}': {e}", path.display())))?;
            &owned
        }
        None => Catalog::embedded()?,
    };

    match cli.command {
        Command::List => {
            print!("{}", crate::report::format_catalog_list(catalog));
            Ok(())
        }
        Command::Show(args) => handle_show(catalog, args),
        Command::Audit(args) => handle_audit(catalog, args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(false)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {e}");
    }
}

fn handle_show(catalog: &Catalog, args: ShowArgs) -> Result<(), AppError> {
    let out = pipeline::run_show(catalog, &args.id, args.overrides.as_deref(), load_case_from_args(&args)?)?;

    print!("{}", crate::report::format_report(&out.setup, &out.report));

    if let Some(path) = &args.export {
        let export = crate::io::ReportExport::new(catalog.version(), catalog.updated(), &out.setup, &out.report);
        crate::io::write_report_json(path, &export)?;
        println!("\nWrote {}", path.display());
    }
    Ok(())
}

fn handle_audit(catalog: &Catalog, args: AuditArgs) -> Result<(), AppError> {
    let entries = pipeline::run_audit(catalog);
    print!("{}", crate::report::format_audit(&entries, args.only_errors));

    let failing = entries.iter().filter(|e| e.is_failure()).count();
    if failing > 0 {
        return Err(AppError::new(3, format!("{failing} preset(s) failed the audit.")));
    }
    Ok(())
}

/// `None` unless at least one acceleration was given; the other defaults to 0 g.
/// A non-finite acceleration is an input error (exit 2).
pub fn load_case_from_args(args: &ShowArgs) -> Result<Option<LoadCase>, AppError> {
    if args.lateral_g.is_none() && args.longitudinal_g.is_none() {
        return Ok(None);
    }
    let load_case = LoadCase {
        lateral_g: args.lateral_g.unwrap_or(0.0),
        longitudinal_g: args.longitudinal_g.unwrap_or(0.0),
    };
    if !load_case.is_finite() {
        return Err(AppError::new(
            2,
            format!(
                "Load case must be finite (lateral={}g, longitudinal={}g).",
                load_case.lateral_g, load_case.longitudinal_g
            ),
        ));
    }
    Ok(Some(load_case))
}
