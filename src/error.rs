//! Error types.
//!
//! - `ResolutionError`: a preset + overrides could not become a `VehicleSetup`
//! - `CatalogError`: a catalog file could not be loaded
//! - `AppError`: what the `chassis` binary reports, with its exit code
//!
//! Compute-time problems are never errors; they are `Diagnostic`s on the report.

use std::io;

use crate::domain::SetupField;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("`{0}` = {1} is out of range [{2}, {3}]")]
    OutOfRange(SetupField, f64, f64, f64),
    #[error("unknown preset id `{0}`")]
    UnknownPresetId(String),
    #[error("preset is missing required field `{0}`")]
    MissingRequiredField(String),
    #[error("invalid overrides. `{0}`")]
    MalformedOverrides(String),
    #[error("`{0}` is not adjustable on this vehicle")]
    NotAdjustable(String),
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("io error. `{0}`")]
    Io(#[from] io::Error),
    #[error("catalog decode error. `{0}`")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalog entry `{0}`. `{1}`")]
    InvalidEntry(String, String),
    #[error("embedded catalog is unusable. `{0}`")]
    Embedded(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ResolutionError> for AppError {
    fn from(e: ResolutionError) -> Self {
        AppError::new(3, format!("Cannot resolve setup: {e}"))
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::new(2, format!("Cannot load catalog: {e}"))
    }
}
