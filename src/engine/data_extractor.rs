// ==========================================
// Cutting list analyzer - data extractor
// ==========================================
// Responsibilities: group a section's data rows into work
// orders and pull profile / measurement / quantity items
// Input: sheet grid + ProductSection (+ optional header hint)
// Output: ordered WorkOrderItem list + row-level issues
// ==========================================

use crate::domain::cell::{cell_at, CellValue, SheetRow};
use crate::domain::parse_result::ParseIssue;
use crate::domain::sheet::{ColumnMapping, HeaderPattern, ProductSection};
use crate::domain::types::{ErrorCode, Severity, SheetField, WorkOrderSourceType};
use crate::domain::work_order::{
    ProfileItem, WorkOrderItem, WorkOrderMetadata, WorkOrderSource, AUTO_ID_PREFIX,
    FALLBACK_ID_PREFIX,
};
use crate::engine::pattern_detector::PatternDetector;
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

// Columns that may carry work-order IDs
const ID_COLUMNS: [usize; 3] = [0, 1, 2];

// (profile, measurement, quantity, profile must be recognized)
const COLUMN_STRATEGIES: [(usize, usize, usize, bool); 3] =
    [(7, 8, 9, false), (6, 7, 8, true), (8, 9, 10, true)];

const PLAUSIBLE_QUANTITY_LIMIT: u32 = 10000;

// IDs sharing a date or version column must be plain serials
const METADATA_ID_MIN_DIGITS: usize = 4;

lazy_static! {
    // 25X25, 40*40*2, 1200 mm
    static ref DIMENSION: Regex = Regex::new(
        r"(?i)\d+(?:[.,]\d+)?\s*[x*×]\s*\d+|\d+(?:[.,]\d+)?\s*(mm|cm|mt|m|metre)\b"
    )
    .unwrap();
}

// ==========================================
// ExtractionOutcome
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub work_orders: Vec<WorkOrderItem>,
    pub issues: Vec<ParseIssue>,
    pub processed_rows: Vec<usize>, // rows that produced a profile
    pub skipped_rows: Vec<usize>,
}

/// Work order under construction
struct WorkOrderBuilder {
    work_order_id: String,
    metadata: WorkOrderMetadata,
    row_index: usize,
    source: WorkOrderSource,
    profiles: Vec<ProfileItem>,
}

impl WorkOrderBuilder {
    fn new(
        work_order_id: String,
        metadata: WorkOrderMetadata,
        row_index: usize,
        source_type: WorkOrderSourceType,
        parent_work_order_id: Option<String>,
    ) -> Self {
        Self {
            work_order_id,
            metadata,
            row_index,
            source: WorkOrderSource {
                source_type,
                parent_work_order_id,
                original_row_index: row_index,
            },
            profiles: Vec::new(),
        }
    }

    /// None when no profile was extracted
    fn build(self) -> Option<WorkOrderItem> {
        if self.profiles.is_empty() {
            return None;
        }

        let confidence =
            self.profiles.iter().map(|p| p.confidence).sum::<f64>() / self.profiles.len() as f64;
        let total_quantity = self.profiles.iter().map(|p| u64::from(p.quantity)).sum();

        Some(WorkOrderItem {
            work_order_id: self.work_order_id,
            profiles: self.profiles,
            metadata: self.metadata,
            row_index: self.row_index,
            confidence,
            source: self.source,
            total_quantity,
        })
    }
}

/// Builders in first-seen order, addressable by ID
#[derive(Default)]
struct WorkOrderBook {
    builders: Vec<WorkOrderBuilder>,
    index: HashMap<String, usize>,
}

impl WorkOrderBook {
    fn position(&self, work_order_id: &str) -> Option<usize> {
        self.index.get(work_order_id).copied()
    }

    fn open(&mut self, builder: WorkOrderBuilder) -> usize {
        let position = self.builders.len();
        self.index.insert(builder.work_order_id.clone(), position);
        self.builders.push(builder);
        position
    }

    fn finish(self) -> Vec<WorkOrderItem> {
        self.builders.into_iter().filter_map(WorkOrderBuilder::build).collect()
    }
}

// ==========================================
// DataExtractor
// ==========================================
pub struct DataExtractor {
    detector: PatternDetector,
}

impl DataExtractor {
    pub fn new(detector: PatternDetector) -> Self {
        Self { detector }
    }

    /// Work orders of one section
    ///
    /// Rows with an ID open (or re-enter) that work order; rows
    /// without one join the current work order. Rows before any ID
    /// become singleton `AUTO-<row+1>` work orders. Work orders
    /// without profiles are dropped.
    pub fn extract_work_orders(
        &self,
        rows: &[SheetRow],
        section: &ProductSection,
        header: Option<&HeaderPattern>,
    ) -> ExtractionOutcome {
        let mapping = header.map(|h| &h.columns);
        let mut book = WorkOrderBook::default();
        let mut current: Option<usize> = None;
        let mut outcome = ExtractionOutcome::default();

        for &row_index in &section.data_rows {
            let Some(row) = rows.get(row_index) else {
                continue;
            };

            let target = match self.open_for_ids(&mut book, row, row_index, mapping) {
                Some(position) => {
                    current = Some(position);
                    position
                }
                None => match current {
                    Some(position) => position,
                    None => {
                        let id = format!("{}{}", AUTO_ID_PREFIX, row_index + 1);
                        debug!(row_index = row_index, work_order_id = %id, "row before any work-order ID, generating one");
                        book.open(WorkOrderBuilder::new(
                            id,
                            self.extract_metadata(row, mapping),
                            row_index,
                            WorkOrderSourceType::Inherited,
                            None,
                        ))
                    }
                },
            };

            match self.extract_profile(row, row_index, mapping) {
                Some(profile) => {
                    trace!(
                        row_index = row_index,
                        profile_type = %profile.profile_type,
                        quantity = profile.quantity,
                        confidence = profile.confidence,
                        "profile extracted"
                    );
                    book.builders[target].profiles.push(profile);
                    outcome.processed_rows.push(row_index);
                }
                None => {
                    self.record_skipped(&mut outcome, row, row_index, mapping, &book.builders[target]);
                }
            }
        }

        outcome.work_orders = book.finish();
        debug!(
            product_name = %section.product_name,
            work_orders = outcome.work_orders.len(),
            processed_rows = outcome.processed_rows.len(),
            skipped_rows = outcome.skipped_rows.len(),
            "section extracted"
        );
        outcome
    }

    /// Looser last-chance pass for sections the main pass left empty
    ///
    /// Any non-numeric text followed 1..=4 columns later by a
    /// quantity is taken as a profile. Rows without an ID share one
    /// `FALLBACK-<start_row+1>` work order.
    pub fn extract_fallback(&self, rows: &[SheetRow], section: &ProductSection) -> ExtractionOutcome {
        let mut book = WorkOrderBook::default();
        let mut current: Option<usize> = None;
        let mut outcome = ExtractionOutcome::default();
        let fallback_id = format!("{}{}", FALLBACK_ID_PREFIX, section.start_row + 1);

        for &row_index in &section.data_rows {
            let Some(row) = rows.get(row_index) else {
                continue;
            };

            let target = match self.open_for_ids(&mut book, row, row_index, None) {
                Some(position) => {
                    current = Some(position);
                    position
                }
                None => match (current, book.position(&fallback_id)) {
                    (Some(position), _) | (None, Some(position)) => position,
                    (None, None) => book.open(WorkOrderBuilder::new(
                        fallback_id.clone(),
                        self.extract_metadata(row, None),
                        row_index,
                        WorkOrderSourceType::Inherited,
                        None,
                    )),
                },
            };

            match self.scan_loose(row, row_index) {
                Some(profile) => {
                    book.builders[target].profiles.push(profile);
                    outcome.processed_rows.push(row_index);
                }
                None => outcome.skipped_rows.push(row_index),
            }
        }

        outcome.work_orders = book.finish();
        debug!(
            product_name = %section.product_name,
            work_orders = outcome.work_orders.len(),
            "fallback extraction finished"
        );
        outcome
    }

    /// Empty work order standing in for a section nothing could be
    /// extracted from, so the product still shows up
    pub fn placeholder_work_order(&self, rows: &[SheetRow], section: &ProductSection) -> WorkOrderItem {
        let row_index = section.data_rows.first().copied().unwrap_or(section.start_row);
        let metadata = rows
            .get(row_index)
            .map(|row| self.extract_metadata(row, None))
            .unwrap_or_default();

        WorkOrderItem {
            work_order_id: format!("{}{}", FALLBACK_ID_PREFIX, section.start_row + 1),
            profiles: Vec::new(),
            metadata,
            row_index,
            confidence: 0.0,
            source: WorkOrderSource {
                source_type: WorkOrderSourceType::Inherited,
                parent_work_order_id: None,
                original_row_index: row_index,
            },
            total_quantity: 0,
        }
    }

    // ==========================================
    // Work-order IDs and metadata
    // ==========================================

    /// Distinct IDs in columns 0..=2, in column order
    ///
    /// The date and version columns only yield separator-free IDs
    /// with at least four digits, so `"05/01"` or `"12-5"` there stay
    /// metadata.
    pub fn work_order_ids(&self, row: &SheetRow, mapping: Option<&ColumnMapping>) -> Vec<String> {
        let metadata_columns = [SheetField::Date, SheetField::Version].map(|field| {
            mapping.map_or(field.conventional_column(), |m| m.column_or_default(field))
        });

        let mut ids: Vec<String> = Vec::new();
        for column in ID_COLUMNS {
            let Some(id) = self.detector.work_order_id_of(cell_at(row, column)) else {
                continue;
            };
            if metadata_columns.contains(&column) && !is_plain_serial(&id) {
                trace!(column, value = %id, "metadata value not taken as work-order ID");
                continue;
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Open the work order named by the row's IDs, or return the
    /// existing one; None when the row has no ID
    fn open_for_ids(
        &self,
        book: &mut WorkOrderBook,
        row: &SheetRow,
        row_index: usize,
        mapping: Option<&ColumnMapping>,
    ) -> Option<usize> {
        let ids = self.work_order_ids(row, mapping);
        if ids.is_empty() {
            return None;
        }

        let work_order_id = ids.join("+");
        if let Some(position) = book.position(&work_order_id) {
            return Some(position);
        }

        let (source_type, parent) = if ids.len() > 1 {
            (WorkOrderSourceType::Merged, Some(ids[0].clone()))
        } else {
            (WorkOrderSourceType::Direct, None)
        };

        Some(book.open(WorkOrderBuilder::new(
            work_order_id,
            self.extract_metadata(row, mapping),
            row_index,
            source_type,
            parent,
        )))
    }

    /// Metadata from header-mapped columns, falling back to the
    /// conventional layout; blank values are omitted
    pub fn extract_metadata(&self, row: &SheetRow, mapping: Option<&ColumnMapping>) -> WorkOrderMetadata {
        let read = |field: SheetField| -> Option<String> {
            let column = match mapping {
                Some(m) => m.column_or_default(field),
                None => field.conventional_column(),
            };
            let text = DataCleaner::to_text(cell_at(row, column));
            (!text.is_empty()).then_some(text)
        };

        WorkOrderMetadata {
            date: read(SheetField::Date),
            version: read(SheetField::Version),
            color: read(SheetField::Color),
            note: read(SheetField::Note),
            sip_quantity: read(SheetField::SipQuantity),
            size: read(SheetField::Size),
        }
    }

    // ==========================================
    // Profile extraction
    // ==========================================

    /// Header-mapped triple, then the fixed column strategies, then
    /// a scan of the whole row
    pub fn extract_profile(
        &self,
        row: &SheetRow,
        row_index: usize,
        mapping: Option<&ColumnMapping>,
    ) -> Option<ProfileItem> {
        if let Some(m) = mapping {
            if let (Some(p), Some(ms), Some(q)) = (m.profile, m.measurement, m.quantity) {
                if let Some(item) = self.profile_from_columns(row, row_index, (p, ms, q), false) {
                    return Some(item);
                }
            }
        }

        for (p, ms, q, strict) in COLUMN_STRATEGIES {
            if let Some(item) = self.profile_from_columns(row, row_index, (p, ms, q), strict) {
                return Some(item);
            }
        }

        self.scan_row(row, row_index)
    }

    fn profile_from_columns(
        &self,
        row: &SheetRow,
        row_index: usize,
        (profile_col, measurement_col, quantity_col): (usize, usize, usize),
        require_profile_type: bool,
    ) -> Option<ProfileItem> {
        let CellValue::Text(profile) = cell_at(row, profile_col) else {
            return None;
        };
        let profile = profile.trim();
        if profile.is_empty() || DataCleaner::is_numeric_like(profile) {
            return None;
        }
        if require_profile_type && !self.detector.is_profile_type(profile) {
            return None;
        }

        let quantity = DataCleaner::to_quantity(cell_at(row, quantity_col))?;
        let measurement = DataCleaner::to_text(cell_at(row, measurement_col));
        Some(self.profile_item(profile, measurement, quantity, row_index))
    }

    /// Profile-type cell followed 2..=4 columns later by a quantity
    fn scan_row(&self, row: &SheetRow, row_index: usize) -> Option<ProfileItem> {
        for (column, cell) in row.iter().enumerate() {
            let CellValue::Text(text) = cell else {
                continue;
            };
            if !self.detector.is_profile_type(text) {
                continue;
            }

            for offset in 2..=4 {
                if let Some(quantity) = DataCleaner::to_quantity(cell_at(row, column + offset)) {
                    let measurement = first_text_between(row, column + 1, column + offset);
                    return Some(self.profile_item(text.trim(), measurement, quantity, row_index));
                }
            }
        }
        None
    }

    /// Any non-numeric text followed 1..=4 columns later by a quantity
    fn scan_loose(&self, row: &SheetRow, row_index: usize) -> Option<ProfileItem> {
        for (column, cell) in row.iter().enumerate() {
            let CellValue::Text(text) = cell else {
                continue;
            };
            let text = text.trim();
            if text.is_empty() || DataCleaner::is_numeric_like(text) {
                continue;
            }
            if ID_COLUMNS.contains(&column) && self.detector.is_valid_work_order_id(text) {
                continue;
            }

            for offset in 1..=4 {
                if let Some(quantity) = DataCleaner::to_quantity(cell_at(row, column + offset)) {
                    let measurement = first_text_between(row, column + 1, column + offset);
                    return Some(self.profile_item(text, measurement, quantity, row_index));
                }
            }
        }
        None
    }

    fn profile_item(
        &self,
        profile_type: &str,
        measurement: String,
        quantity: u32,
        row_index: usize,
    ) -> ProfileItem {
        let confidence = self.profile_confidence(profile_type, &measurement, quantity);
        ProfileItem {
            profile_type: profile_type.to_string(),
            measurement,
            quantity,
            row_index,
            confidence,
        }
    }

    /// Base 0.5; +0.3 known vocabulary; +0.2 dimension/unit in the
    /// measurement (+0.1 if merely non-trivial); +0.1 plausible
    /// quantity; capped at 1.0
    pub fn profile_confidence(&self, profile_type: &str, measurement: &str, quantity: u32) -> f64 {
        let mut confidence: f64 = 0.5;

        if self.detector.is_known_profile_vocabulary(profile_type) {
            confidence += 0.3;
        }

        if DIMENSION.is_match(measurement) {
            confidence += 0.2;
        } else if measurement.chars().count() > 2 {
            confidence += 0.1;
        }

        if quantity > 0 && quantity < PLAUSIBLE_QUANTITY_LIMIT {
            confidence += 0.1;
        }

        confidence.min(1.0)
    }

    fn record_skipped(
        &self,
        outcome: &mut ExtractionOutcome,
        row: &SheetRow,
        row_index: usize,
        mapping: Option<&ColumnMapping>,
        work_order: &WorkOrderBuilder,
    ) {
        outcome.skipped_rows.push(row_index);

        let quantity_col = mapping
            .map(|m| m.column_or_default(SheetField::Quantity))
            .unwrap_or_else(|| SheetField::Quantity.conventional_column());
        let quantity_cell = cell_at(row, quantity_col);
        if !quantity_cell.is_empty() && DataCleaner::to_quantity(quantity_cell).is_none() {
            let raw = DataCleaner::to_text(quantity_cell);
            debug!(row_index = row_index, raw_quantity = %raw, "invalid quantity");
            outcome.issues.push(
                ParseIssue::new(
                    ErrorCode::InvalidQuantity,
                    Severity::Warning,
                    format!("Row {}: quantity '{}' is not a positive whole number", row_index + 1, raw),
                )
                .at_row(row_index)
                .for_work_order(work_order.work_order_id.clone()),
            );
        }
    }
}

/// First non-blank cell text in columns `from..to`
fn first_text_between(row: &SheetRow, from: usize, to: usize) -> String {
    (from..to)
        .map(|c| cell_at(row, c))
        .find(|c| !c.is_empty())
        .map(DataCleaner::to_text)
        .unwrap_or_default()
}

fn is_plain_serial(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric())
        && id.chars().filter(char::is_ascii_digit).count() >= METADATA_ID_MIN_DIGITS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(values: &[&str]) -> SheetRow {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    fn data_row(id: &str, profile: &str, measurement: &str, quantity: &str) -> SheetRow {
        row_of(&[id, "", "", "", "", "", "", profile, measurement, quantity])
    }

    fn section_over(rows: &[SheetRow]) -> ProductSection {
        ProductSection {
            product_name: "PREMIUM FRAME SİSTEMİ".to_string(),
            start_row: 0,
            end_row: rows.len().saturating_sub(1),
            header_row: None,
            data_rows: (0..rows.len()).collect(),
            confidence: 0.9,
        }
    }

    fn extractor() -> DataExtractor {
        DataExtractor::new(PatternDetector::new())
    }

    #[test]
    fn test_rows_inherit_current_work_order() {
        let rows = vec![
            row_of(&[
                "2351151", "05.01.2024", "", "BEYAZ", "", "", "", "KAPALI ALT", "25X25", "10",
            ]),
            data_row("", "ACIK UST", "30X30", "4"),
            data_row("2351599", "RONDOLU", "1200", "2"),
        ];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        assert_eq!(outcome.work_orders.len(), 2);
        let first = &outcome.work_orders[0];
        assert_eq!(first.work_order_id, "2351151");
        assert_eq!(first.profiles.len(), 2);
        assert_eq!(first.total_quantity, 14);
        assert_eq!(first.metadata.color.as_deref(), Some("BEYAZ"));
        assert_eq!(first.metadata.date.as_deref(), Some("05.01.2024"));
        assert_eq!(first.metadata.note, None);
        assert_eq!(first.source.source_type, WorkOrderSourceType::Direct);
        assert_eq!(first.inherited_rows(), vec![1]);
        assert_eq!(outcome.processed_rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_composite_ids_merge() {
        let rows = vec![row_of(&[
            "2351151", "2351599", "", "", "", "", "", "KAPALI ALT", "25X25", "3",
        ])];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        let work_order = &outcome.work_orders[0];
        assert_eq!(work_order.work_order_id, "2351151+2351599");
        assert_eq!(work_order.component_ids(), vec!["2351151", "2351599"]);
        assert_eq!(work_order.source.source_type, WorkOrderSourceType::Merged);
        assert_eq!(work_order.source.parent_work_order_id.as_deref(), Some("2351151"));
    }

    #[test]
    fn test_dates_and_versions_are_not_composite_ids() {
        let rows = vec![row_of(&[
            "2351151", "05/01", "12-5", "", "", "", "", "KAPALI ALT", "25X25", "3",
        ])];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        let work_order = &outcome.work_orders[0];
        assert_eq!(work_order.work_order_id, "2351151");
        assert_eq!(work_order.source.source_type, WorkOrderSourceType::Direct);
        assert_eq!(work_order.metadata.date.as_deref(), Some("05/01"));
        assert_eq!(work_order.metadata.version.as_deref(), Some("12-5"));

        // a header can move the version column out of the ID range
        let mut mapping = ColumnMapping::default();
        mapping.set(SheetField::Version, 4);
        let ids = extractor().work_order_ids(&rows[0], Some(&mapping));
        assert_eq!(ids, vec!["2351151", "12-5"]);
    }

    #[test]
    fn test_rows_before_any_id_get_generated_ids() {
        let rows = vec![
            data_row("", "KAPALI ALT", "25X25", "10"),
            data_row("", "ACIK UST", "25X25", "5"),
        ];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        let ids: Vec<&str> = outcome.work_orders.iter().map(|w| w.work_order_id.as_str()).collect();
        assert_eq!(ids, vec!["AUTO-1", "AUTO-2"]);
        assert!(outcome.work_orders.iter().all(|w| w.has_generated_id()));
        assert_eq!(outcome.work_orders[0].source.source_type, WorkOrderSourceType::Inherited);
    }

    #[test]
    fn test_repeated_id_reuses_work_order() {
        let rows = vec![
            data_row("2351151", "KAPALI ALT", "25X25", "10"),
            data_row("2351152", "ACIK UST", "25X25", "1"),
            data_row("2351151", "RONDOLU", "40", "2"),
        ];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        assert_eq!(outcome.work_orders.len(), 2);
        assert_eq!(outcome.work_orders[0].profiles.len(), 2);
        assert_eq!(outcome.work_orders[0].total_quantity, 12);
    }

    #[test]
    fn test_work_orders_without_profiles_dropped() {
        let rows = vec![
            row_of(&["2351151", "", "", "BEYAZ"]),
            row_of(&["2351151", "", "", "BEYAZ", "", "", "", "KAPALI ALT", "", "abc"]),
        ];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        assert!(outcome.work_orders.is_empty());
        assert_eq!(outcome.skipped_rows, vec![0, 1]);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].code, ErrorCode::InvalidQuantity);
        assert_eq!(outcome.issues[0].row_index, Some(1));
    }

    #[test]
    fn test_fractional_quantity_is_reported_not_rounded() {
        let rows = vec![data_row("2351151", "KAPALI ALT", "25X25", "2,5")];

        let outcome = extractor().extract_work_orders(&rows, &section_over(&rows), None);

        assert!(outcome.work_orders.is_empty());
        assert_eq!(outcome.skipped_rows, vec![0]);
        assert_eq!(outcome.issues[0].code, ErrorCode::InvalidQuantity);
        assert!(outcome.issues[0].message.contains("2,5"));
    }

    #[test]
    fn test_shifted_columns_and_row_scan() {
        let extractor = extractor();

        // profile in column 6
        let shifted = row_of(&["", "", "", "", "", "", "KAPALI ALT", "25X25", "8"]);
        let item = extractor.extract_profile(&shifted, 0, None).unwrap();
        assert_eq!((item.profile_type.as_str(), item.quantity), ("KAPALI ALT", 8));

        // column 6 text that is not a profile type is not accepted there
        let plain = row_of(&["", "", "", "", "", "", "ACIL", "25X25", "8"]);
        assert!(extractor.extract_profile(&plain, 0, None).is_none());

        // profile far right, quantity three columns later
        let scanned = row_of(&[
            "", "", "", "", "", "", "", "", "", "", "", "RONDOLU", "600", "", "5",
        ]);
        let item = extractor.extract_profile(&scanned, 0, None).unwrap();
        assert_eq!(item.measurement, "600");
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn test_header_mapping_tried_first() {
        let mut mapping = ColumnMapping::default();
        mapping.set(SheetField::Profile, 1);
        mapping.set(SheetField::Measurement, 2);
        mapping.set(SheetField::Quantity, 3);

        let row = row_of(&["R3020", "Özel Kayıt", "1450", "6"]);
        let item = extractor().extract_profile(&row, 0, Some(&mapping)).unwrap();

        assert_eq!(item.profile_type, "Özel Kayıt");
        assert_eq!(item.quantity, 6);
    }

    #[test]
    fn test_profile_confidence() {
        let extractor = extractor();

        assert_eq!(extractor.profile_confidence("KAPALI ALT", "25X25", 10), 1.0);
        assert!((extractor.profile_confidence("ÖZEL", "600", 10) - 0.7).abs() < 1e-9);
        assert!((extractor.profile_confidence("ÖZEL", "", 20000) - 0.5).abs() < 1e-9);
        assert!((extractor.profile_confidence("ÖZEL", "1200 mm", 3) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_groups_unidentified_rows() {
        let rows = vec![
            row_of(&["", "", "", "", "Özel parça", "", "3"]),
            row_of(&["", "", "", "", "Ara bağlantı", "40", "2"]),
        ];
        let mut section = section_over(&rows);
        section.start_row = 4;

        let outcome = extractor().extract_fallback(&rows, &section);

        assert_eq!(outcome.work_orders.len(), 1);
        let work_order = &outcome.work_orders[0];
        assert_eq!(work_order.work_order_id, "FALLBACK-5");
        assert_eq!(work_order.profiles.len(), 2);
        assert_eq!(work_order.profiles[1].measurement, "");
        assert_eq!(work_order.profiles[1].quantity, 40);
    }
}
