// ==========================================
// Cutting list analyzer - import layer
// ==========================================
// Responsibilities: spreadsheet bytes → row-major cell grid,
// cell normalization helpers
// Formats: xlsx / xlsm / xlsb / xls / ods (calamine), csv
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod sheet_parser_trait;

// Re-exports
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvSheetParser, ExcelSheetParser, UniversalSheetParser};
pub use sheet_parser_trait::SheetParser;
