// ==========================================
// Cutting list analyzer - domain model
// ==========================================
// Value objects of the extraction pipeline.
// No file access, no heuristics.
// ==========================================

pub mod cell;
pub mod parse_result;
pub mod sheet;
pub mod types;
pub mod work_order;

// Re-exports
pub use cell::{cell_at, CellValue, SheetRow};
pub use parse_result::{
    ExcelParseResult, ParseContext, ParseIssue, ParseMetrics, ParseSummary, ProductGroup,
    ProductGroupMetadata, ValidationSummary,
};
pub use sheet::{ColumnMapping, HeaderPattern, ProductSection};
pub use types::{ErrorCode, Severity, SheetField, WorkOrderSourceType};
pub use work_order::{
    ProfileItem, WorkOrderItem, WorkOrderMetadata, WorkOrderSource, AUTO_ID_PREFIX,
    FALLBACK_ID_PREFIX,
};
