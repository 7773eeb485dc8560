use super::core::PatternDetector;
use super::header::is_header_keyword;
use super::product_name::is_product_vocabulary;
use super::profile_type::is_profile_type;
use crate::domain::cell::CellValue;
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Specific shapes first, generic last; all run on the uppercased value
    static ref WORK_ORDER_PATTERNS: Vec<Regex> = [
        r"^\d{4,7}$",                           // 2349448
        r"^\d{8,12}$",                          // long ERP numbers
        r"^[A-Z]\d{3,8}$",                      // R3020
        r"^[A-Z]{2,3}\d{3,8}$",                 // AB12345
        r"^WO[-_]?\d{3,10}$",                   // WO-123456
        r"^IE[-_]?\d{3,10}$",                   // IE-2024
        r"^[A-Z]{1,4}[-_.]\d{3,8}$",            // SIP-4411
        r"^\d{2,6}[/-]\d{1,6}$",                // 2024/118
        r"^[A-Z]{1,4}\d{0,6}[/-]\d{1,6}$",      // PR24/7
        r"^\d{3,8}[A-Z]{1,3}$",                 // 235115A
        r"^[A-Z]{1,3}\d{2,6}[A-Z]{1,3}$",       // K2210B
        r"^\d{3,8}[-_][A-Z0-9]{1,4}$",          // 2351151-2
        r"^[A-Z0-9]{3,12}$",                    // generic
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref RELAXED_PATTERN: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9._/-]{2,14}$").unwrap();

    static ref DATE_LIKE: Regex = Regex::new(r"^\d{1,4}[./-]\d{1,2}[./-]\d{1,4}").unwrap();

    // 25X25, 40*40*2
    static ref DIMENSION_LIKE: Regex = Regex::new(r"^\d+(?:[.,]\d+)?[X*]\d+").unwrap();
}

// Normalized words that are never work-order IDs
const NON_ID_WORDS: [&str; 40] = [
    "is emri", "siparis", "tarih", "versiyon", "renk", "not", "notlar", "aciklama", "ebat",
    "profil", "profile", "olcu", "adet", "miktar", "toplam", "genel", "kutu", "kapali", "acik",
    "alt", "ust", "sistem", "sistemi", "beyaz", "siyah", "gri", "antrasit", "bronz", "eloksal",
    "krem", "ral", "sip", "hafta", "sayfa", "boy", "uzunluk", "total", "qty", "quantity", "page",
];

/// Field names, profile vocabulary and product words read as
/// letters-only codes but are sheet text
fn is_sheet_vocabulary(trimmed: &str, normalized: &str) -> bool {
    NON_ID_WORDS.contains(&normalized)
        || is_header_keyword(normalized)
        || is_profile_type(trimmed)
        || is_product_vocabulary(normalized)
}

pub(super) fn is_valid_work_order_id(value: &str) -> bool {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if !(3..=20).contains(&length) || trimmed.chars().any(char::is_whitespace) {
        return false;
    }

    if is_sheet_vocabulary(trimmed, &DataCleaner::normalize_for_matching(trimmed)) {
        return false;
    }

    if DATE_LIKE.is_match(trimmed) {
        return false;
    }

    // decimals are quantities or measurements
    if DataCleaner::is_numeric_like(trimmed) && trimmed.contains(['.', ',']) {
        return false;
    }

    let upper = trimmed.to_uppercase();
    if DIMENSION_LIKE.is_match(&upper) {
        return false;
    }

    WORK_ORDER_PATTERNS.iter().any(|p| p.is_match(&upper)) || RELAXED_PATTERN.is_match(&upper)
}

impl PatternDetector {
    /// Work-order ID check on a raw string
    ///
    /// `"2349448"`, `"R3020"`, `"WO-123456"` and letters-only codes
    /// like `"ABCDE"` pass; field names (`"adet"`), profile and color
    /// words, dates and dimensions do not.
    pub fn is_valid_work_order_id(&self, value: &str) -> bool {
        is_valid_work_order_id(value)
    }

    /// Work-order ID carried by a cell, if any
    ///
    /// Numbers count only when integral; dates and booleans never do.
    pub fn work_order_id_of(&self, cell: &CellValue) -> Option<String> {
        let text = match cell {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) if n.fract() == 0.0 && *n > 0.0 => DataCleaner::to_text(cell),
            _ => return None,
        };
        is_valid_work_order_id(&text).then_some(text)
    }
}
