// ==========================================
// Cutting list analyzer - analysis result
// ==========================================
// ExcelParseResult is the single JSON-serializable output of one
// analysis run; consumers (cutting-list service, HTTP layer) treat
// it as read-only.
// ==========================================

use crate::domain::sheet::HeaderPattern;
use crate::domain::types::{ErrorCode, Severity};
use crate::domain::work_order::WorkOrderItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ParseIssue - one typed error / warning
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseIssue {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

impl ParseIssue {
    pub fn new(code: ErrorCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            row_index: None,
            work_order_id: None,
            product_name: None,
        }
    }

    pub fn at_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    pub fn for_work_order(mut self, work_order_id: impl Into<String>) -> Self {
        self.work_order_id = Some(work_order_id.into());
        self
    }

    pub fn for_product(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }
}

// ==========================================
// ValidationSummary - per product group
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub is_valid: bool, // critical_errors == 0
    pub critical_errors: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub issues: Vec<ParseIssue>,
}

impl ValidationSummary {
    pub fn from_issues(issues: Vec<ParseIssue>) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
        let critical_errors = count(Severity::Critical);
        Self {
            is_valid: critical_errors == 0,
            critical_errors,
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            issues,
        }
    }
}

// ==========================================
// ProductGroup
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroupMetadata {
    pub start_row: usize,
    pub end_row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    pub data_row_count: usize,
    pub work_order_count: usize,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductGroup {
    pub product_name: String,
    pub work_orders: Vec<WorkOrderItem>,
    pub confidence: f64, // the owning section's confidence
    pub metadata: ProductGroupMetadata,
    pub validation: ValidationSummary,
    pub total_profiles: usize,
    pub total_quantity: u64,
    pub profile_types: Vec<String>, // unique, first-seen order
}

// ==========================================
// ParseContext / ParseMetrics / ParseSummary
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseContext {
    pub analysis_id: String,
    pub file_name: String,
    pub file_path: String,
    pub parsed_at: DateTime<Utc>,
    pub total_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_header: Option<HeaderPattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetrics {
    pub elapsed_ms: u64,
    pub memory_delta_bytes: u64, // estimated size of the loaded grid
    pub average_confidence: f64,
    pub processed_rows: usize,
    pub skipped_rows: usize,
    pub total_rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSummary {
    pub total_products: usize,
    pub total_work_orders: usize,
    pub total_profiles: usize,
    pub total_quantity: u64,
    pub product_names: Vec<String>,
    pub profile_types: Vec<String>,
}

impl ParseSummary {
    pub fn from_groups(groups: &[ProductGroup]) -> Self {
        let mut profile_types: Vec<String> = Vec::new();
        for group in groups {
            for profile_type in &group.profile_types {
                if !profile_types.contains(profile_type) {
                    profile_types.push(profile_type.clone());
                }
            }
        }

        Self {
            total_products: groups.len(),
            total_work_orders: groups.iter().map(|g| g.work_orders.len()).sum(),
            total_profiles: groups.iter().map(|g| g.total_profiles).sum(),
            total_quantity: groups.iter().map(|g| g.total_quantity).sum(),
            product_names: groups.iter().map(|g| g.product_name.clone()).collect(),
            profile_types,
        }
    }
}

// ==========================================
// ExcelParseResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelParseResult {
    pub success: bool,
    pub product_groups: Vec<ProductGroup>,
    pub errors: Vec<ParseIssue>,
    pub warnings: Vec<ParseIssue>,
    pub context: ParseContext,
    pub metrics: ParseMetrics,
    pub summary: ParseSummary,
}

impl ExcelParseResult {
    /// Fatal outcome: no usable product groups, one top-level error
    pub fn failure(context: ParseContext, error: ParseIssue, elapsed_ms: u64) -> Self {
        let total_rows = context.total_rows;
        Self {
            success: false,
            product_groups: Vec::new(),
            errors: vec![error],
            warnings: Vec::new(),
            context,
            metrics: ParseMetrics {
                elapsed_ms,
                total_rows,
                skipped_rows: total_rows,
                ..Default::default()
            },
            summary: ParseSummary::default(),
        }
    }

    /// First top-level error, if any
    pub fn primary_error(&self) -> Option<&ParseIssue> {
        self.errors.first()
    }
}
