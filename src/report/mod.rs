//! Reporting utilities: text reports and JSON output.

use serde::Serialize;

use crate::error::{AppError, EXIT_STORAGE};

mod format;

pub use format::{format_catalog, format_dose, format_frailty, format_grace, format_hemo, format_pericarditis, format_sofa};

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(EXIT_STORAGE, format!("Failed to encode JSON: {e}")))
}
