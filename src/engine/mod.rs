// ==========================================
// Cutting list analyzer - engine layer
// ==========================================
// Responsibilities: heuristics over an in-memory grid
// (header / section / work-order detection, validation)
// and the analyzer that runs them end to end
// ==========================================

pub mod data_extractor;
pub mod excel_analyzer;
pub mod pattern_detector;
pub mod validation;

// Re-exports
pub use data_extractor::{DataExtractor, ExtractionOutcome};
pub use excel_analyzer::{ExcelAnalysis, ExcelAnalyzer};
pub use pattern_detector::{PatternDetector, ProductNameCandidate};
pub use validation::GroupValidator;
