// ==========================================
// Cutting list analyzer - cell values
// ==========================================
// A row is an ordered, fixed-index sequence of cells:
// column position carries meaning, so rows are never compacted.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Atomic value read from a worksheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

/// One worksheet row
pub type SheetRow = Vec<CellValue>;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Cell at `col`, or `Empty` past the end of a short row
pub fn cell_at(row: &[CellValue], col: usize) -> &CellValue {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_past_row_end() {
        let row: SheetRow = vec!["A".into(), 2.0.into()];
        assert_eq!(cell_at(&row, 0), &CellValue::Text("A".to_string()));
        assert_eq!(cell_at(&row, 9), &CellValue::Empty);
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert!(CellValue::from("   ").is_empty());
        assert!(CellValue::Text("  ".to_string()).is_empty());
        assert!(!CellValue::from(0.0).is_empty());
        assert!(CellValue::from(None::<&str>).is_empty());
    }
}
