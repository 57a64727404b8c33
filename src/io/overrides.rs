//! Read user overrides from a JSON file.

use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::resolve::UserOverrides;

/// Read and parse an overrides file.
///
/// A missing or unreadable file is an input error (exit 2); a file that
/// parses as JSON but names unknown or fixed fields is a resolution error
/// (exit 3).
pub fn read_overrides(path: &Path) -> Result<UserOverrides, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read overrides '{}': {e}", path.display())))?;
    let overrides = UserOverrides::from_json(&text)?;
    tracing::debug!(path = %path.display(), fields = overrides.fields().len(), "loaded overrides");
    Ok(overrides)
}
