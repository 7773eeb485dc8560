// ==========================================
// Cutting list analyzer - file parsers
// ==========================================
// Stage 0: read the first worksheet into a grid of CellValue
// Supports: Excel (.xlsx/.xlsm/.xlsb/.xls) / ODS / CSV
// ==========================================

use crate::domain::cell::{CellValue, SheetRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_parser_trait::SheetParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Extensions accepted by UniversalSheetParser
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"];

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelSheetParser;

impl SheetParser for ExcelSheetParser {
    fn parse_bytes(&self, bytes: &[u8], source: &str) -> ImportResult<Vec<SheetRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::EmptyWorksheet(format!("{}: workbook has no worksheets", source)))??;

        // calamine ranges start at the first used cell; pad back to absolute positions
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<SheetRow> = vec![Vec::new(); row_offset];
        for data_row in range.rows() {
            let mut row: SheetRow = vec![CellValue::Empty; col_offset];
            row.extend(data_row.iter().map(convert_cell));
            rows.push(row);
        }

        debug!(
            source = %source,
            rows = rows.len(),
            row_offset = row_offset,
            col_offset = col_offset,
            "worksheet loaded"
        );
        Ok(rows)
    }
}

/// calamine cell → CellValue (dates kept as dates)
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Date(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(CellValue::Date)
            .unwrap_or_else(|_| CellValue::from(s.as_str())),
        Data::DurationIso(s) => CellValue::from(s.as_str()),
    }
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvSheetParser;

impl SheetParser for CsvSheetParser {
    fn parse_bytes(&self, bytes: &[u8], source: &str) -> ImportResult<Vec<SheetRow>> {
        let delimiter = detect_delimiter(bytes);
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // header position is detected, not assumed
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::from).collect());
        }

        debug!(source = %source, rows = rows.len(), delimiter = %(delimiter as char), "csv loaded");
        Ok(rows)
    }
}

/// ';' is common in Turkish-locale exports where ',' is the decimal separator
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or(&[]);
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

// ==========================================
// Universal parser (dispatch on extension)
// ==========================================
pub struct UniversalSheetParser;

impl UniversalSheetParser {
    /// Lowercased extension, validated against SUPPORTED_EXTENSIONS
    pub fn extension_of(file_path: &Path) -> ImportResult<String> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(ImportError::UnsupportedFormat(file_path.display().to_string()))
        }
    }

    /// Parse bytes according to the extension of `file_path`
    pub fn parse_for_path(&self, file_path: &Path, bytes: &[u8]) -> ImportResult<Vec<SheetRow>> {
        let source = file_path.display().to_string();
        match Self::extension_of(file_path)?.as_str() {
            "csv" => CsvSheetParser.parse_bytes(bytes, &source),
            _ => ExcelSheetParser.parse_bytes(bytes, &source),
        }
    }
}

impl SheetParser for UniversalSheetParser {
    fn parse_bytes(&self, bytes: &[u8], source: &str) -> ImportResult<Vec<SheetRow>> {
        self.parse_for_path(Path::new(source), bytes)
    }

    fn parse_file(&self, file_path: &Path) -> ImportResult<Vec<SheetRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        Self::extension_of(file_path)?;
        let bytes = std::fs::read(file_path)?;
        self.parse_for_path(file_path, &bytes)
    }
}
