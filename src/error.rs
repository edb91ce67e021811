//! Error types.
//!
//! - `AppError` is what the `cicu` binary surfaces: a message plus a process exit code.
//! - `CalcIssue` explains why a calculator produced no result. Calculators never fail
//!   for well-typed numeric input; they degrade to absent outputs and this type names
//!   the cause.

use crate::store::StoreError;

/// Exit code for usage and configuration problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for a snapshot that does not exist.
pub const EXIT_NOT_FOUND: u8 = 3;
/// Exit code for unreadable/corrupt snapshots and storage I/O.
pub const EXIT_STORAGE: u8 = 4;

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

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::NotFound(_) => EXIT_NOT_FOUND,
            StoreError::InvalidKey(_) => EXIT_USAGE,
            StoreError::Corrupt { .. } | StoreError::Io { .. } => EXIT_STORAGE,
        };
        AppError::new(code, err.to_string())
    }
}

/// Why a calculator returned no result for an output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcIssue {
    /// A required field is absent (or negative where only non-negative values make sense).
    #[error("incomplete input: {field} is required")]
    IncompleteInput { field: &'static str },
    /// A denominator is zero or too small to divide by.
    #[error("cannot compute {quantity}: denominator is zero or too small")]
    DivisionGuard { quantity: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_distinct_exit_codes() {
        let nf: AppError = StoreError::NotFound("case-7".into()).into();
        assert_eq!(nf.exit_code(), EXIT_NOT_FOUND);

        let bad: AppError = StoreError::InvalidKey("../x".into()).into();
        assert_eq!(bad.exit_code(), EXIT_USAGE);

        let corrupt: AppError = StoreError::Corrupt {
            key: "case-7".into(),
            reason: "eof".into(),
        }
        .into();
        assert_eq!(corrupt.exit_code(), EXIT_STORAGE);
        assert!(corrupt.to_string().contains("case-7"));
    }

    #[test]
    fn calc_issue_messages_name_the_field() {
        let issue = CalcIssue::IncompleteInput { field: "age" };
        assert_eq!(issue.to_string(), "incomplete input: age is required");
    }
}
