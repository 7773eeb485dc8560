// ==========================================
// Cutting list analyzer - API layer
// ==========================================
// Responsibilities: async query surface for callers
// (CLI, HTTP handlers) over an analysis result
// ==========================================

pub mod cutting_list_api;
pub mod error;

// Re-exports
pub use cutting_list_api::{CuttingListApi, CuttingListMetrics};
pub use error::{ApiError, ApiResult};
