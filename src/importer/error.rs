// ==========================================
// Cutting list analyzer - import error types
// ==========================================
// Tooling: thiserror derive
// ==========================================

use crate::domain::types::ErrorCode;
use thiserror::Error;

/// Errors raised while loading or analyzing a sheet
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (expected .xlsx/.xlsm/.xlsb/.xls/.ods/.csv)")]
    UnsupportedFormat(String),

    #[error("File read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Content errors =====
    #[error("Worksheet is empty: {0}")]
    EmptyWorksheet(String),

    #[error("No product sections found in {0}")]
    NoProductsFound(String),

    // ===== Configuration errors =====
    #[error("Config read failed (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== Generic errors =====
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// Typed code embedded in a failed ExcelParseResult
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ImportError::FileNotFound(_) => ErrorCode::FileNotFound,
            ImportError::UnsupportedFormat(_) => ErrorCode::InvalidFormat,
            ImportError::EmptyWorksheet(_) => ErrorCode::EmptyWorksheet,
            ImportError::NoProductsFound(_) => ErrorCode::NoProductsFound,
            _ => ErrorCode::ParseFailed,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ConfigReadError {
            key: "*".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
