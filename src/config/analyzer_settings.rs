// ==========================================
// Cutting list analyzer - settings snapshot
// ==========================================
// Read once when an analyzer is built; heuristics take
// plain values instead of going back to the config store.
// ==========================================

use crate::config::analyzer_config_trait::AnalyzerConfigReader;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerSettings {
    pub header_row_index: usize,
    pub header_scan_limit: usize,
    pub header_min_confidence: f64,
    pub header_early_exit_confidence: f64,
    pub product_scan_window: usize,
    pub product_scan_columns: usize,
    pub section_scan_limit: usize,
    pub product_min_confidence: f64,
    pub product_boundary_confidence: f64,
    pub product_backtrack_limit: usize,
    pub high_quantity_threshold: u32,
    pub quantity_overflow_threshold: u32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            header_row_index: 3,
            header_scan_limit: 50,
            header_min_confidence: 0.5,
            header_early_exit_confidence: 0.7,
            product_scan_window: 50,
            product_scan_columns: 8,
            section_scan_limit: 200,
            product_min_confidence: 0.4,
            product_boundary_confidence: 0.7,
            product_backtrack_limit: 20,
            high_quantity_threshold: 1000,
            quantity_overflow_threshold: 10000,
        }
    }
}

impl AnalyzerSettings {
    pub fn from_reader(reader: &dyn AnalyzerConfigReader) -> Self {
        Self {
            header_row_index: reader.get_header_row_index(),
            header_scan_limit: reader.get_header_scan_limit(),
            header_min_confidence: reader.get_header_min_confidence(),
            header_early_exit_confidence: reader.get_header_early_exit_confidence(),
            product_scan_window: reader.get_product_scan_window(),
            product_scan_columns: reader.get_product_scan_columns(),
            section_scan_limit: reader.get_section_scan_limit(),
            product_min_confidence: reader.get_product_min_confidence(),
            product_boundary_confidence: reader.get_product_boundary_confidence(),
            product_backtrack_limit: reader.get_product_backtrack_limit(),
            high_quantity_threshold: reader.get_high_quantity_threshold(),
            quantity_overflow_threshold: reader.get_quantity_overflow_threshold(),
        }
    }
}
