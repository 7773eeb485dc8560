use super::core::PatternDetector;
use super::header::is_header_keyword;
use super::profile_type::is_profile_type;
use super::work_order_id::is_valid_work_order_id;
use crate::domain::cell::{CellValue, SheetRow};
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;

/// A cell that reads like a product name
#[derive(Debug, Clone, PartialEq)]
pub struct ProductNameCandidate {
    pub name: String,
    pub row_index: usize,
    pub column: usize,
    pub confidence: f64,
}

// Real product names the generic scoring under-rates
const KNOWN_PRODUCTS: [&str; 14] = [
    "giyotin sistemi",
    "giyotin cam",
    "surme sistemi",
    "pergole",
    "pergola",
    "cam balkon",
    "kupeste",
    "zip perde",
    "kis bahcesi",
    "dusakabin",
    "katlanir cam",
    "sabit cam",
    "tente sistemi",
    "korkuluk sistemi",
];

const COLOR_WORDS: [&str; 10] = [
    "beyaz", "siyah", "gri", "antrasit", "bronz", "eloksal", "ham", "krem", "white", "black",
];

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 100;

lazy_static! {
    static ref PURE_NUMBER: Regex = Regex::new(r"^[\d\s.,/:+-]+$").unwrap();
    static ref PAGE_MARKER: Regex =
        Regex::new(r"^(hafta|week|sayfa|page|sf)\.?\s*:?\s*\d*$|^\d+\.?\s*(hafta|week)$").unwrap();
    static ref BARE_DIMENSION: Regex = Regex::new(
        r"^\d+(?:[.,]\d+)?\s*[x*]\s*\d+(?:[.,]\d+)?(?:\s*[x*]\s*\d+(?:[.,]\d+)?)?\s*(mm|cm|m)?$"
    )
    .unwrap();

    static ref CATEGORY: Regex = Regex::new(
        r"\b(sistem|system|seri|series|pencere|window|cephe|facade|korkuluk|railing|giyotin|surme|sliding|cam|glass|panel|pergol|balkon|kupeste|perde|dolap|vitrin|dus|kabin|tente|bahce)"
    )
    .unwrap();
    static ref SIZE_SUFFIX: Regex =
        Regex::new(r"\d+\s*'?\s*(lik|luk|li|lu)\b|\b\d+\s*(mm|cm)\b").unwrap();
    static ref QUALITY: Regex = Regex::new(
        r"\b(premium|lux|luks|deluxe|standart|standard|ekonomik|economy|pro|plus|elite|super|gold|klasik|classic|eco)\b"
    )
    .unwrap();
    static ref MATERIAL: Regex = Regex::new(
        r"\b(aluminyum|aluminum|aluminium|alu|celik|steel|pvc|paslanmaz|inox|ahsap|wood)\b"
    )
    .unwrap();
    static ref FEATURE: Regex = Regex::new(
        r"\b(isicamli|yalitimli|thermal|motorlu|motorized|otomatik|automatic|katlanir|folding|surgulu|izolasyonlu|cift)\b"
    )
    .unwrap();

    // Matched on the original text: case carries the signal
    static ref CAPITALIZED_PHRASE: Regex =
        Regex::new(r"^\p{Lu}[\w'.-]*(?:\s+[\p{Lu}\d][\w'.-]*)+$").unwrap();
    static ref CAPITAL_RUN: Regex = Regex::new(r"\p{Lu}{3,}").unwrap();
}

fn is_known_product(normalized: &str) -> bool {
    KNOWN_PRODUCTS.contains(&normalized)
}

/// Known product names, their single words, and color words
pub(super) fn is_product_vocabulary(normalized: &str) -> bool {
    is_known_product(normalized)
        || COLOR_WORDS.contains(&normalized)
        || KNOWN_PRODUCTS
            .iter()
            .any(|p| p.split(' ').any(|word| word == normalized))
}

fn looks_like_product(original: &str, normalized: &str) -> bool {
    CATEGORY.is_match(normalized)
        || CAPITALIZED_PHRASE.is_match(original)
        || SIZE_SUFFIX.is_match(normalized)
        || QUALITY.is_match(normalized)
        || MATERIAL.is_match(normalized)
        || CAPITAL_RUN.is_match(original)
}

pub(super) fn is_valid_product_name(value: &str) -> bool {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return false;
    }

    let normalized = DataCleaner::normalize_for_matching(trimmed);
    if is_known_product(&normalized) {
        return true;
    }

    if PURE_NUMBER.is_match(&normalized)
        || is_header_keyword(&normalized)
        || COLOR_WORDS.contains(&normalized.as_str())
        || PAGE_MARKER.is_match(&normalized)
        || BARE_DIMENSION.is_match(&normalized)
    {
        return false;
    }

    let has_category = CATEGORY.is_match(&normalized);
    let single_word = !normalized.contains(' ');
    if is_profile_type(trimmed) && (!has_category || single_word) {
        return false;
    }
    let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
    if !has_category && has_digit && is_valid_work_order_id(trimmed) {
        return false;
    }

    looks_like_product(trimmed, &normalized)
}

pub(super) fn product_name_confidence(value: &str, row_index: usize, column: usize) -> f64 {
    let normalized = DataCleaner::normalize_for_matching(value);
    if is_known_product(&normalized) {
        return 1.0;
    }

    if normalized.chars().count() < MIN_NAME_LENGTH || PURE_NUMBER.is_match(&normalized) {
        return 0.0;
    }

    let word_count = normalized.split_whitespace().count();
    if word_count == 1 && is_header_keyword(&normalized) {
        return 0.0;
    }

    let has_category = CATEGORY.is_match(&normalized);
    let has_quality = QUALITY.is_match(&normalized);

    let mut confidence: f64 = 0.5;
    if column == 0 {
        confidence += 0.1;
    }
    if row_index < 10 {
        confidence += 0.05;
    }
    if has_category {
        confidence += 0.2;
    }
    if SIZE_SUFFIX.is_match(&normalized) {
        confidence += 0.1;
    }
    if has_quality {
        confidence += 0.15;
    }
    if FEATURE.is_match(&normalized) {
        confidence += 0.1;
    }
    if word_count == 1 && !has_category && !has_quality {
        confidence -= 0.2;
    }

    confidence.clamp(0.0, 1.0)
}

impl PatternDetector {
    pub fn is_valid_product_name(&self, value: &str) -> bool {
        is_valid_product_name(value)
    }

    /// Confidence in [0,1] that `value` at (row, column) names a product
    pub fn product_name_confidence(&self, value: &str, row_index: usize, column: usize) -> f64 {
        product_name_confidence(value, row_index, column)
    }

    /// Product-name candidate held by one cell
    pub(super) fn product_name_at(
        &self,
        row: &SheetRow,
        row_index: usize,
        column: usize,
    ) -> Option<ProductNameCandidate> {
        let CellValue::Text(text) = row.get(column)? else {
            return None;
        };
        if !is_valid_product_name(text) {
            return None;
        }

        let confidence = product_name_confidence(text, row_index, column);
        (confidence > 0.0).then(|| ProductNameCandidate {
            name: text.trim().to_string(),
            row_index,
            column,
            confidence,
        })
    }

    /// Every valid product name in rows `start..end`, first
    /// `product_scan_columns` columns, in row-major order.
    /// Data rows never carry product names.
    pub fn find_product_name_candidates(
        &self,
        rows: &[SheetRow],
        start: usize,
        end: usize,
    ) -> Vec<ProductNameCandidate> {
        let end = end.min(rows.len());
        let mut candidates = Vec::new();
        for row_index in start..end {
            let row = &rows[row_index];
            if self.is_data_row(row) {
                continue;
            }
            let columns = row.len().min(self.settings.product_scan_columns);
            for column in 0..columns {
                if let Some(candidate) = self.product_name_at(row, row_index, column) {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }
}
