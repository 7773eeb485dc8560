// ==========================================
// Cutting list analyzer - core library
// ==========================================
// Heuristic extraction of work orders and profile cuts
// from loosely structured aluminum-profile cutting lists
// Stack: calamine + regex + tracing + tokio
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - value objects
pub mod domain;

// Import layer - files into grids, cell normalization
pub mod importer;

// Config layer - tunable thresholds
pub mod config;

// Engine layer - heuristics and the analyzer
pub mod engine;

// API layer - query surface
pub mod api;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    CellValue, ErrorCode, ExcelParseResult, HeaderPattern, ParseIssue, ProductGroup,
    ProductSection, ProfileItem, Severity, SheetRow, WorkOrderItem, WorkOrderSourceType,
};

pub use config::{AnalyzerSettings, ConfigManager};

pub use engine::{DataExtractor, ExcelAnalysis, ExcelAnalyzer, PatternDetector};

pub use api::{ApiError, ApiResult, CuttingListApi, CuttingListMetrics};

pub use importer::{DataCleaner, ImportError, ImportResult};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "cutting-list-analyzer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
