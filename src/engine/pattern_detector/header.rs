use super::core::PatternDetector;
use crate::domain::cell::{CellValue, SheetRow};
use crate::domain::sheet::{ColumnMapping, HeaderPattern};
use crate::domain::types::SheetField;
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

// Minimum distinct fields for a header row
const MIN_DETECTED_FIELDS: usize = 3;

/// One header-cell rule: matched against normalized cell text
struct FieldDefinition {
    pattern: Regex,
    field: SheetField,
    weight: f64,
}

fn definition(pattern: &str, field: SheetField, weight: f64) -> FieldDefinition {
    FieldDefinition {
        pattern: Regex::new(pattern).unwrap(),
        field,
        weight,
    }
}

lazy_static! {
    // Order matters: the first matching definition claims the cell.
    // Sip quantity must precede the plain quantity rules.
    static ref FIELD_DEFINITIONS: Vec<FieldDefinition> = vec![
        definition(
            r"^(is emri|is emri no|is emri numarasi|siparis no|siparis numarasi|work order|work order no|wo|wo no)$",
            SheetField::WorkOrderId,
            1.0,
        ),
        definition(r"^(emir|emir no|is no|order|order no)$", SheetField::WorkOrderId, 0.7),
        definition(r"^sip\.?\s?(adet|miktar)i?$", SheetField::SipQuantity, 1.0),
        definition(
            r"^(siparis adedi|siparis miktari|order qty|order quantity)$",
            SheetField::SipQuantity,
            0.7,
        ),
        definition(r"^(tarih|date)$", SheetField::Date, 1.0),
        definition(r"^(teslim tarihi|siparis tarihi|termin|due date)$", SheetField::Date, 0.7),
        definition(r"^(versiyon|version|revizyon|rev)$", SheetField::Version, 1.0),
        definition(r"^(ver\.?|v)$", SheetField::Version, 0.6),
        definition(r"^(renk|color|colour)$", SheetField::Color, 1.0),
        definition(r"^(boya|renk kodu|ral)$", SheetField::Color, 0.7),
        definition(r"^(not|notlar|aciklama|note|notes)$", SheetField::Note, 1.0),
        definition(r"^(aciklamalar|yorum|comment|remarks)$", SheetField::Note, 0.6),
        definition(r"^(ebat|boyut|size)$", SheetField::Size, 1.0),
        definition(r"^(ebatlar|boyutlar|dimension|dimensions)$", SheetField::Size, 0.6),
        definition(r"^(profil|profile)$", SheetField::Profile, 1.0),
        definition(
            r"^(profil tipi|profil turu|profil adi|profile type|malzeme)$",
            SheetField::Profile,
            0.7,
        ),
        definition(r"^(olcu|measurement|boy|uzunluk)$", SheetField::Measurement, 1.0),
        definition(
            r"^(olcu\s*\(?mm\)?|olculer|kesim olcusu|length)$",
            SheetField::Measurement,
            0.7,
        ),
        definition(r"^(adet|miktar|quantity|qty)$", SheetField::Quantity, 1.0),
        definition(
            r"^(adet sayisi|toplam adet|kesim adedi|pcs)$",
            SheetField::Quantity,
            0.7,
        ),
    ];
}

/// True when normalized text is a known column title
pub(super) fn is_header_keyword(normalized: &str) -> bool {
    FIELD_DEFINITIONS.iter().any(|d| d.pattern.is_match(normalized))
}

/// Highest weight any definition assigns to `field`
fn max_weight(field: SheetField) -> f64 {
    FIELD_DEFINITIONS
        .iter()
        .filter(|d| d.field == field)
        .map(|d| d.weight)
        .fold(0.0, f64::max)
}

impl PatternDetector {
    /// Score one row as a header
    ///
    /// Returns None when fewer than half of the required fields
    /// (profile / measurement / quantity) or fewer than 3 distinct
    /// fields are found.
    pub fn detect_header_pattern(&self, row: &SheetRow, row_index: usize) -> Option<HeaderPattern> {
        let mut columns = ColumnMapping::default();
        let mut best_weights: Vec<(SheetField, f64)> = Vec::new();

        for (col, cell) in row.iter().enumerate() {
            let text = match cell {
                CellValue::Text(s) if !s.trim().is_empty() => DataCleaner::normalize_for_matching(s),
                _ => continue,
            };

            let Some(def) = FIELD_DEFINITIONS.iter().find(|d| d.pattern.is_match(&text)) else {
                continue;
            };

            match best_weights.iter_mut().find(|(f, _)| *f == def.field) {
                Some((_, weight)) if *weight >= def.weight => {}
                Some((_, weight)) => {
                    *weight = def.weight;
                    columns.set(def.field, col);
                }
                None => {
                    best_weights.push((def.field, def.weight));
                    columns.set(def.field, col);
                }
            }
        }

        let detected_fields = best_weights.len();
        let required_total = SheetField::ALL.iter().filter(|f| f.is_required()).count();
        let required_found = best_weights.iter().filter(|(f, _)| f.is_required()).count();

        if required_found * 2 < required_total || detected_fields < MIN_DETECTED_FIELDS {
            return None;
        }

        let matched: f64 = best_weights.iter().map(|(_, w)| w).sum();
        let possible: f64 = best_weights.iter().map(|(f, _)| max_weight(*f)).sum();
        let confidence = if possible > 0.0 { matched / possible } else { 0.0 };

        Some(HeaderPattern {
            columns,
            confidence,
            row_index,
            detected_fields,
        })
    }

    /// Locate the header row
    ///
    /// The conventional row is tried first; below the minimum
    /// confidence, up to `header_scan_limit` rows from `start_index`
    /// are scanned and the best pattern kept.
    pub fn detect_header_row(&self, rows: &[SheetRow], start_index: usize) -> Option<HeaderPattern> {
        let conventional_row = self.settings.header_row_index;
        let conventional = rows
            .get(conventional_row)
            .and_then(|row| self.detect_header_pattern(row, conventional_row));

        if let Some(pattern) = &conventional {
            if pattern.confidence >= self.settings.header_min_confidence {
                debug!(
                    row_index = pattern.row_index,
                    confidence = pattern.confidence,
                    detected_fields = pattern.detected_fields,
                    "header found at conventional row"
                );
                return conventional;
            }
        }

        let end = rows.len().min(start_index.saturating_add(self.settings.header_scan_limit));
        let mut best = conventional;

        for row_index in start_index..end {
            let Some(pattern) = self.detect_header_pattern(&rows[row_index], row_index) else {
                continue;
            };

            if best.as_ref().map_or(true, |b| pattern.confidence > b.confidence) {
                best = Some(pattern);
            }

            if best
                .as_ref()
                .map_or(false, |b| b.confidence > self.settings.header_early_exit_confidence)
            {
                break;
            }
        }

        match &best {
            Some(pattern) => debug!(
                row_index = pattern.row_index,
                confidence = pattern.confidence,
                "header found by scan"
            ),
            None => debug!(start_index = start_index, end = end, "no header row found"),
        }
        best
    }
}
