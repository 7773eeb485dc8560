use super::core::PatternDetector;
use super::product_name::ProductNameCandidate;
use crate::domain::cell::{cell_at, CellValue, SheetRow};
use crate::domain::sheet::{HeaderPattern, ProductSection};
use crate::domain::types::SheetField;
use crate::importer::data_cleaner::DataCleaner;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

/// Name of the section synthesized when no product name is found
pub const FALLBACK_SECTION_NAME: &str = "All Items";

const FALLBACK_SECTION_CONFIDENCE: f64 = 0.3;
const INFERRED_NAME_CONFIDENCE: f64 = 0.5;

lazy_static! {
    static ref FRAME_KEYWORDS: Regex = Regex::new(r"\b(kasa|frame|cerceve)\b").unwrap();
    static ref PROFILE_KEYWORDS: Regex =
        Regex::new(r"\b(profil|profile|kutu|box|boru|tube)\b").unwrap();
}

/// Where a section's name came from and where its data starts
struct SectionAnchor {
    name: String,
    name_row: usize,
    first_row: usize,
    confidence: f64,
}

impl From<&ProductNameCandidate> for SectionAnchor {
    fn from(candidate: &ProductNameCandidate) -> Self {
        Self {
            name: candidate.name.clone(),
            name_row: candidate.row_index,
            first_row: candidate.row_index + 1,
            confidence: candidate.confidence,
        }
    }
}

impl PatternDetector {
    // ==========================================
    // Row classification
    // ==========================================

    /// Data row: some non-blank cell AND (column 0 holds a work-order
    /// ID, or column 7 a profile type with a quantity in column 9 or a
    /// measurement in column 8)
    pub fn is_data_row(&self, row: &SheetRow) -> bool {
        if row.iter().all(CellValue::is_empty) {
            return false;
        }

        let id_column = SheetField::WorkOrderId.conventional_column();
        if self.work_order_id_of(cell_at(row, id_column)).is_some() {
            return true;
        }

        let has_profile = match cell_at(row, SheetField::Profile.conventional_column()) {
            CellValue::Text(s) => self.is_profile_type(s),
            _ => false,
        };
        if !has_profile {
            return false;
        }

        DataCleaner::to_quantity(cell_at(row, SheetField::Quantity.conventional_column())).is_some()
            || !cell_at(row, SheetField::Measurement.conventional_column()).is_empty()
    }

    // ==========================================
    // Section detection
    // ==========================================

    /// Split the whole sheet into product sections
    ///
    /// Always scans from row 0: product names may sit above or
    /// between header and data blocks. Sections with colliding
    /// normalized names are merged; with no named section at all,
    /// every data row lands in one "All Items" section.
    pub fn detect_product_sections(
        &self,
        rows: &[SheetRow],
        header: Option<&HeaderPattern>,
    ) -> Vec<ProductSection> {
        let mut sections = Vec::new();
        let mut cursor = 0;

        while cursor < rows.len() {
            let window_end = rows.len().min(cursor + self.settings.product_scan_window);
            let candidates = self.find_product_name_candidates(rows, cursor, window_end);

            let anchor = match self.select_candidate(&candidates) {
                Some(candidate) => SectionAnchor::from(candidate),
                None => match self.infer_section_anchor(rows, cursor, window_end) {
                    Some(anchor) => anchor,
                    None => {
                        cursor += 1;
                        continue;
                    }
                },
            };

            let section = self.collect_section(rows, anchor, header);
            debug!(
                product_name = %section.product_name,
                start_row = section.start_row,
                end_row = section.end_row,
                data_rows = section.data_rows.len(),
                confidence = section.confidence,
                "product section detected"
            );

            cursor = (section.end_row + 1).max(cursor + 1);
            sections.push(section);
        }

        let mut merged = merge_sections(sections);

        if merged.is_empty() {
            if let Some(fallback) = self.fallback_section(rows, header) {
                info!(data_rows = fallback.data_rows.len(), "no product names found, using fallback section");
                merged.push(fallback);
            }
        }

        merged
    }

    /// Earliest strong candidate, else the strongest acceptable one
    fn select_candidate<'a>(
        &self,
        candidates: &'a [ProductNameCandidate],
    ) -> Option<&'a ProductNameCandidate> {
        if let Some(strong) = candidates
            .iter()
            .find(|c| c.confidence > self.settings.product_boundary_confidence)
        {
            return Some(strong);
        }

        candidates
            .iter()
            .filter(|c| c.confidence > self.settings.product_min_confidence)
            .fold(None, |best: Option<&ProductNameCandidate>, c| match best {
                Some(b) if b.confidence >= c.confidence => Some(b),
                _ => Some(c),
            })
    }

    /// Name a section from its first data row: look back for a
    /// product name, else derive a generic category
    fn infer_section_anchor(
        &self,
        rows: &[SheetRow],
        start: usize,
        end: usize,
    ) -> Option<SectionAnchor> {
        let data_row = (start..end).find(|r| self.is_data_row(&rows[*r]))?;

        let floor = data_row.saturating_sub(self.settings.product_backtrack_limit);
        for row_index in (floor..data_row).rev() {
            let row = &rows[row_index];
            if self.is_data_row(row) {
                continue;
            }
            let columns = row.len().min(self.settings.product_scan_columns);
            if let Some(candidate) = (0..columns).find_map(|c| self.product_name_at(row, row_index, c)) {
                debug!(
                    product_name = %candidate.name,
                    name_row = row_index,
                    data_row = data_row,
                    "product name found behind data row"
                );
                return Some(SectionAnchor {
                    name: candidate.name,
                    name_row: row_index,
                    first_row: data_row,
                    confidence: candidate.confidence,
                });
            }
        }

        let category = self.infer_category(&rows[data_row])?;
        debug!(product_name = category, data_row = data_row, "product category inferred");
        Some(SectionAnchor {
            name: category.to_string(),
            name_row: data_row,
            first_row: data_row,
            confidence: INFERRED_NAME_CONFIDENCE,
        })
    }

    fn infer_category(&self, row: &SheetRow) -> Option<&'static str> {
        let texts: Vec<String> = row
            .iter()
            .filter_map(CellValue::as_text)
            .map(DataCleaner::normalize_for_matching)
            .collect();

        if texts.iter().any(|t| FRAME_KEYWORDS.is_match(t)) {
            Some("FRAME SYSTEM")
        } else if texts.iter().any(|t| PROFILE_KEYWORDS.is_match(t)) {
            Some("PROFILE SYSTEM")
        } else if texts.iter().any(|t| self.is_profile_type(t)) {
            Some("ALUMINUM PROFILE")
        } else {
            None
        }
    }

    /// Collect data rows after the anchor until a distinct strong
    /// product name appears
    fn collect_section(
        &self,
        rows: &[SheetRow],
        anchor: SectionAnchor,
        header: Option<&HeaderPattern>,
    ) -> ProductSection {
        let key = DataCleaner::normalize_for_matching(&anchor.name);
        let end = rows
            .len()
            .min(anchor.name_row + 1 + self.settings.section_scan_limit);

        let mut data_rows = Vec::new();
        for row_index in anchor.first_row..end {
            let row = &rows[row_index];
            if self.is_data_row(row) {
                data_rows.push(row_index);
                continue;
            }
            if row_index > anchor.name_row && self.starts_new_section(row, row_index, &key) {
                break;
            }
        }

        let start_row = anchor.name_row;
        let end_row = data_rows.last().copied().unwrap_or(start_row);
        let header_row = header
            .map(|h| h.row_index)
            .filter(|r| (start_row..=end_row).contains(r));

        ProductSection {
            product_name: anchor.name,
            start_row,
            end_row,
            header_row,
            data_rows,
            confidence: anchor.confidence,
        }
    }

    fn starts_new_section(&self, row: &SheetRow, row_index: usize, current_key: &str) -> bool {
        let columns = row.len().min(self.settings.product_scan_columns);
        (0..columns)
            .filter_map(|c| self.product_name_at(row, row_index, c))
            .any(|c| {
                c.confidence > self.settings.product_boundary_confidence
                    && DataCleaner::normalize_for_matching(&c.name) != current_key
            })
    }

    fn fallback_section(
        &self,
        rows: &[SheetRow],
        header: Option<&HeaderPattern>,
    ) -> Option<ProductSection> {
        let data_rows: Vec<usize> = (0..rows.len()).filter(|r| self.is_data_row(&rows[*r])).collect();
        let start_row = *data_rows.first()?;
        let end_row = *data_rows.last()?;

        Some(ProductSection {
            product_name: FALLBACK_SECTION_NAME.to_string(),
            start_row,
            end_row,
            header_row: header.map(|h| h.row_index),
            data_rows,
            confidence: FALLBACK_SECTION_CONFIDENCE,
        })
    }
}

/// Merge sections whose names match case/whitespace-insensitively,
/// keeping first-seen order
pub(super) fn merge_sections(sections: Vec<ProductSection>) -> Vec<ProductSection> {
    let mut merged: Vec<(String, ProductSection)> = Vec::new();

    for section in sections {
        let key = DataCleaner::normalize_for_matching(&section.product_name);
        match merged.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                debug!(
                    product_name = %existing.product_name,
                    merged_start = section.start_row,
                    "merging duplicate product section"
                );
                existing.start_row = existing.start_row.min(section.start_row);
                existing.end_row = existing.end_row.max(section.end_row);
                existing.header_row = existing.header_row.or(section.header_row);
                existing.confidence = existing.confidence.max(section.confidence);
                existing.data_rows.extend(section.data_rows);
                existing.data_rows.sort_unstable();
                existing.data_rows.dedup();
            }
            None => merged.push((key, section)),
        }
    }

    merged.into_iter().map(|(_, section)| section).collect()
}
