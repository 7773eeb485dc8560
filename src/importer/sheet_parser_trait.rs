// ==========================================
// Cutting list analyzer - sheet parser trait
// ==========================================
// Interface only; implementations live in file_parser.rs
// ==========================================

use crate::domain::cell::SheetRow;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// SheetParser Trait
// ==========================================
// Implementors: ExcelSheetParser, CsvSheetParser, UniversalSheetParser
pub trait SheetParser: Send + Sync {
    /// Parse the first worksheet of an in-memory file into a row-major grid
    ///
    /// # Parameters
    /// - bytes: raw file content
    /// - source: file name used in error messages
    ///
    /// # Returns
    /// - Ok(Vec<SheetRow>): rows in sheet order, absolute positions preserved
    /// - Err: unreadable content / no worksheet
    fn parse_bytes(&self, bytes: &[u8], source: &str) -> ImportResult<Vec<SheetRow>>;

    /// Parse a file from disk (blocking)
    fn parse_file(&self, file_path: &Path) -> ImportResult<Vec<SheetRow>> {
        let bytes = std::fs::read(file_path)?;
        self.parse_bytes(&bytes, &file_path.display().to_string())
    }
}
