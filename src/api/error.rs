// ==========================================
// Cutting list analyzer - API error type
// ==========================================
// Responsibilities: turn analysis outcomes into caller-facing errors
// ==========================================

use crate::domain::parse_result::ExcelParseResult;
use crate::domain::types::ErrorCode;
use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Analysis ran but produced `success: false`
    #[error("analysis failed [{code}]: {message}")]
    AnalysisFailed { code: ErrorCode, message: String },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Domain error code carried by this error, if any
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ApiError::AnalysisFailed { code, .. } => Some(*code),
            ApiError::Import(e) => Some(e.error_code()),
            _ => None,
        }
    }
}

impl From<&ExcelParseResult> for ApiError {
    fn from(result: &ExcelParseResult) -> Self {
        match result.primary_error() {
            Some(issue) => ApiError::AnalysisFailed {
                code: issue.code,
                message: issue.message.clone(),
            },
            None => ApiError::AnalysisFailed {
                code: ErrorCode::ParseFailed,
                message: format!("analysis of {} failed", result.context.file_name),
            },
        }
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_keeps_code() {
        let err = ApiError::from(ImportError::FileNotFound("a.xlsx".to_string()));
        assert_eq!(err.error_code(), Some(ErrorCode::FileNotFound));
        assert_eq!(ApiError::NotFound("x".to_string()).error_code(), None);
    }

    #[test]
    fn test_analysis_failed_message() {
        let err = ApiError::AnalysisFailed {
            code: ErrorCode::NoProductsFound,
            message: "nothing".to_string(),
        };
        assert_eq!(err.to_string(), "analysis failed [NO_PRODUCTS_FOUND]: nothing");
    }
}
