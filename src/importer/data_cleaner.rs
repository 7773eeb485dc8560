// ==========================================
// Cutting list analyzer - text normalization
// ==========================================
// Responsibilities: cell → text / number coercion,
// Turkish-aware matching normalization, type guards.
// Normalized text is only ever used for matching, never for display.
// ==========================================

use crate::domain::cell::CellValue;
use chrono::{NaiveDateTime, SecondsFormat};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Optional unit word after a count ("12 adet", "5 pcs")
    static ref QUANTITY_TEXT: Regex =
        Regex::new(r"(?i)^\+?\d+(?:[.,]\d+)*\s*(?:adet|ad\.?|pcs|pc)?$").unwrap();
}

pub struct DataCleaner;

impl DataCleaner {
    /// Trimmed display text of a cell
    ///
    /// - dates → ISO-8601 (UTC, millisecond precision)
    /// - integral numbers print without a fractional part
    /// - Empty → ""
    pub fn to_text(cell: &CellValue) -> String {
        match cell {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => Self::format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(dt) => Self::format_date(dt),
        }
    }

    /// Numeric value of a cell, or None when nothing unambiguous can be read
    ///
    /// Text keeps only digits, separators and signs. When both '.' and ','
    /// appear, the right-most one is the decimal separator; a lone comma is
    /// the decimal point.
    pub fn to_number(cell: &CellValue) -> Option<f64> {
        match cell {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => Self::parse_number_text(s),
            _ => None,
        }
    }

    pub fn parse_number_text(value: &str) -> Option<f64> {
        let filtered: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'))
            .collect();

        if !filtered.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let last_dot = filtered.rfind('.');
        let last_comma = filtered.rfind(',');
        let normalized = match (last_dot, last_comma) {
            (Some(dot), Some(comma)) if comma > dot => filtered.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => filtered.replace(',', ""),
            (None, Some(_)) if filtered.matches(',').count() > 1 => filtered.replace(',', ""),
            (None, Some(_)) => filtered.replace(',', "."),
            (Some(_), None) if filtered.matches('.').count() > 1 => filtered.replace('.', ""),
            _ => filtered,
        };

        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Positive whole quantity of a cell
    ///
    /// Text must look like a count ("10", "12,0", "12 adet"); values that
    /// only contain digits somewhere ("25X25") are rejected, and so are
    /// fractional amounts ("2,5") rather than rounded.
    pub fn to_quantity(cell: &CellValue) -> Option<u32> {
        let value = match cell {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) if QUANTITY_TEXT.is_match(s.trim()) => Self::parse_number_text(s),
            _ => None,
        }?;

        if value.fract() != 0.0 {
            return None;
        }
        if value >= 1.0 && value <= f64::from(u32::MAX) {
            Some(value as u32)
        } else {
            None
        }
    }

    /// Lowercase, fold Turkish diacritics to ASCII, collapse whitespace
    pub fn normalize_for_matching(value: &str) -> String {
        let mut folded = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                'İ' | 'I' | 'ı' | 'î' | 'Î' => folded.push('i'),
                'Ç' | 'ç' => folded.push('c'),
                'Ğ' | 'ğ' => folded.push('g'),
                'Ö' | 'ö' => folded.push('o'),
                'Ş' | 'ş' => folded.push('s'),
                'Ü' | 'ü' | 'û' | 'Û' => folded.push('u'),
                'Â' | 'â' => folded.push('a'),
                // combining dot above left behind by other normalizations
                '\u{0307}' => {}
                other => folded.extend(other.to_lowercase()),
            }
        }
        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Matching form of a cell's text
    pub fn normalized_text(cell: &CellValue) -> String {
        Self::normalize_for_matching(&Self::to_text(cell))
    }

    // ==========================================
    // Type guards
    // ==========================================

    pub fn is_blank(cell: &CellValue) -> bool {
        cell.is_empty()
    }

    pub fn is_date(cell: &CellValue) -> bool {
        matches!(cell, CellValue::Date(_))
    }

    /// Text made only of digits, separators and signs
    pub fn is_numeric_like(value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty()
            && trimmed.chars().any(|c| c.is_ascii_digit())
            && trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+' | ' '))
    }

    // ==========================================
    // Formatting helpers
    // ==========================================

    fn format_number(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{:.0}", value)
        } else {
            value.to_string()
        }
    }

    fn format_date(value: &NaiveDateTime) -> String {
        value
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_text() {
        assert_eq!(DataCleaner::to_text(&CellValue::from("  KAPALI ALT ")), "KAPALI ALT");
        assert_eq!(DataCleaner::to_text(&CellValue::Empty), "");
        assert_eq!(DataCleaner::to_text(&CellValue::from(2351151.0)), "2351151");
        assert_eq!(DataCleaner::to_text(&CellValue::from(12.5)), "12.5");
        assert_eq!(DataCleaner::to_text(&CellValue::from(true)), "true");

        let date = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            DataCleaner::to_text(&CellValue::Date(date)),
            "2024-01-05T00:00:00.000Z"
        );
    }

    #[test]
    fn test_to_number_separators() {
        let european = DataCleaner::to_number(&CellValue::from("1.234,56")).unwrap();
        let plain = DataCleaner::to_number(&CellValue::from("1234.56")).unwrap();
        assert!((european - 1234.56).abs() < 1e-9);
        assert!((plain - 1234.56).abs() < 1e-9);

        assert_eq!(DataCleaner::to_number(&CellValue::from("12,5")), Some(12.5));
        assert_eq!(DataCleaner::to_number(&CellValue::from("1,234.56")), Some(1234.56));
        assert_eq!(DataCleaner::to_number(&CellValue::from("1.234.567")), Some(1234567.0));
        assert_eq!(DataCleaner::to_number(&CellValue::from("-7")), Some(-7.0));
        assert_eq!(DataCleaner::to_number(&CellValue::from(42.0)), Some(42.0));
    }

    #[test]
    fn test_to_number_signals_absence() {
        assert_eq!(DataCleaner::to_number(&CellValue::from("")), None);
        assert_eq!(DataCleaner::to_number(&CellValue::Empty), None);
        assert_eq!(DataCleaner::to_number(&CellValue::from("abc")), None);
        assert_eq!(DataCleaner::to_number(&CellValue::from("5-10")), None);
        assert_eq!(DataCleaner::to_number(&CellValue::from(f64::NAN)), None);
    }

    #[test]
    fn test_to_quantity() {
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(10.0)), Some(10));
        assert_eq!(DataCleaner::to_quantity(&CellValue::from("12")), Some(12));
        assert_eq!(DataCleaner::to_quantity(&CellValue::from("12 adet")), Some(12));
        assert_eq!(DataCleaner::to_quantity(&CellValue::from("25X25")), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(0.0)), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(-3.0)), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::Empty), None);
    }

    #[test]
    fn test_to_quantity_rejects_fractions() {
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(2.5)), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(1.4)), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::from("2,5")), None);
        assert_eq!(DataCleaner::to_quantity(&CellValue::from("12,0")), Some(12));
        assert_eq!(DataCleaner::to_quantity(&CellValue::from(0.4)), None);
    }

    #[test]
    fn test_normalize_for_matching() {
        assert_eq!(DataCleaner::normalize_for_matching("İş Emri"), "is emri");
        assert_eq!(DataCleaner::normalize_for_matching("  ÖLÇÜ  "), "olcu");
        assert_eq!(
            DataCleaner::normalize_for_matching("PREMIUM   FRAME SİSTEMİ"),
            "premium frame sistemi"
        );
        assert_eq!(DataCleaner::normalize_for_matching("Sip. Adet"), "sip. adet");
        assert_eq!(DataCleaner::normalize_for_matching("ÇĞŞÜ"), "cgsu");
    }

    #[test]
    fn test_type_guards() {
        assert!(DataCleaner::is_blank(&CellValue::from("   ")));
        assert!(!DataCleaner::is_blank(&CellValue::from("x")));
        assert!(DataCleaner::is_numeric_like("1.234,56"));
        assert!(!DataCleaner::is_numeric_like("25X25"));
        assert!(!DataCleaner::is_numeric_like(""));
    }
}
