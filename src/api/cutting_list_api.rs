// ==========================================
// Cutting list analyzer - cutting list API
// ==========================================
// Responsibilities: query surface over one analyzer's result
// (product names, work orders per product, aggregate metrics)
// Analysis is lazy: the first query runs it, later queries
// hit the analyzer's cache until refresh.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::parse_result::ExcelParseResult;
use crate::domain::work_order::WorkOrderItem;
use crate::engine::excel_analyzer::ExcelAnalysis;
use crate::importer::data_cleaner::DataCleaner;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// ==========================================
// CuttingListMetrics
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingListMetrics {
    pub product_count: usize,
    pub work_order_count: usize,
    pub profile_count: usize,
    pub total_quantity: u64,
    pub average_confidence: f64,
    pub warning_count: usize,
    pub critical_product_count: usize, // groups with isValid == false
    pub elapsed_ms: u64,
}

impl From<&ExcelParseResult> for CuttingListMetrics {
    fn from(result: &ExcelParseResult) -> Self {
        let group_warnings: usize = result.product_groups.iter().map(|g| g.validation.warnings).sum();
        Self {
            product_count: result.summary.total_products,
            work_order_count: result.summary.total_work_orders,
            profile_count: result.summary.total_profiles,
            total_quantity: result.summary.total_quantity,
            average_confidence: result.metrics.average_confidence,
            warning_count: result.warnings.len() + group_warnings,
            critical_product_count: result
                .product_groups
                .iter()
                .filter(|g| !g.validation.is_valid)
                .count(),
            elapsed_ms: result.metrics.elapsed_ms,
        }
    }
}

// ==========================================
// CuttingListApi
// ==========================================
pub struct CuttingListApi<A: ExcelAnalysis> {
    analyzer: Mutex<A>,
}

impl<A: ExcelAnalysis> CuttingListApi<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer: Mutex::new(analyzer),
        }
    }

    /// Full result; Err when the analysis itself failed
    pub async fn analyze(&self) -> ApiResult<ExcelParseResult> {
        let result = self.analyzer.lock().await.analyze().await;
        if result.success {
            Ok(result)
        } else {
            warn!(
                file = %result.context.file_name,
                code = ?result.primary_error().map(|e| e.code),
                "analysis unsuccessful"
            );
            Err(ApiError::from(&result))
        }
    }

    /// Product names in sheet order
    pub async fn product_names(&self) -> ApiResult<Vec<String>> {
        let result = self.analyze().await?;
        Ok(result.summary.product_names)
    }

    /// Work orders of one product; names match ignoring case and spacing
    pub async fn work_orders_by_product(&self, product_name: &str) -> ApiResult<Vec<WorkOrderItem>> {
        let key = DataCleaner::normalize_for_matching(product_name);
        if key.is_empty() {
            return Err(ApiError::InvalidInput("product name is empty".to_string()));
        }

        let result = self.analyze().await?;
        let group = result
            .product_groups
            .into_iter()
            .find(|g| DataCleaner::normalize_for_matching(&g.product_name) == key)
            .ok_or_else(|| ApiError::NotFound(format!("product '{}'", product_name)))?;

        debug!(product_name = %group.product_name, work_orders = group.work_orders.len(), "work orders by product");
        Ok(group.work_orders)
    }

    pub async fn metrics(&self) -> ApiResult<CuttingListMetrics> {
        let result = self.analyze().await?;
        Ok(CuttingListMetrics::from(&result))
    }

    /// Drop the cached result and analyze again
    pub async fn refresh(&self) -> ApiResult<ExcelParseResult> {
        {
            let mut analyzer = self.analyzer.lock().await;
            analyzer.clear_cache();
        }
        info!("cutting list refresh requested");
        self.analyze().await
    }
}
