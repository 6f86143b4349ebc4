//! Error types and exit codes for obsidianize
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (export root missing or not a directory)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing or invalid export root (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while fixing an export
#[derive(Error, Debug)]
pub enum ConvertError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("export root not found: {path:?}")]
    ExportNotFound { path: PathBuf },

    #[error("export root is not a directory: {path:?}")]
    NotADirectory { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ConvertError::UsageError(_) => ExitCode::Usage,

            ConvertError::ExportNotFound { .. } | ConvertError::NotADirectory { .. } => {
                ExitCode::Data
            }

            ConvertError::Io(_) | ConvertError::Json(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            ConvertError::UsageError(_) => "usage_error",
            ConvertError::ExportNotFound { .. } => "export_not_found",
            ConvertError::NotADirectory { .. } => "not_a_directory",
            ConvertError::Io(_) => "io_error",
            ConvertError::Json(_) => "json_error",
        }
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
