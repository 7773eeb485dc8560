// ==========================================
// Cutting list analyzer - sheet structure
// ==========================================
// Header column mapping and product sections discovered by
// the pattern detector. Both are hints for extraction, never
// hard constraints.
// ==========================================

use crate::domain::types::SheetField;
use serde::{Deserialize, Serialize};

// ==========================================
// ColumnMapping - logical field → column index
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_quantity: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<usize>,
}

impl ColumnMapping {
    pub fn get(&self, field: SheetField) -> Option<usize> {
        match field {
            SheetField::WorkOrderId => self.work_order_id,
            SheetField::Date => self.date,
            SheetField::Version => self.version,
            SheetField::Color => self.color,
            SheetField::Note => self.note,
            SheetField::SipQuantity => self.sip_quantity,
            SheetField::Size => self.size,
            SheetField::Profile => self.profile,
            SheetField::Measurement => self.measurement,
            SheetField::Quantity => self.quantity,
        }
    }

    pub fn set(&mut self, field: SheetField, column: usize) {
        let slot = match field {
            SheetField::WorkOrderId => &mut self.work_order_id,
            SheetField::Date => &mut self.date,
            SheetField::Version => &mut self.version,
            SheetField::Color => &mut self.color,
            SheetField::Note => &mut self.note,
            SheetField::SipQuantity => &mut self.sip_quantity,
            SheetField::Size => &mut self.size,
            SheetField::Profile => &mut self.profile,
            SheetField::Measurement => &mut self.measurement,
            SheetField::Quantity => &mut self.quantity,
        };
        *slot = Some(column);
    }

    /// Mapped column, or the conventional one
    pub fn column_or_default(&self, field: SheetField) -> usize {
        self.get(field).unwrap_or_else(|| field.conventional_column())
    }

    pub fn mapped_count(&self) -> usize {
        SheetField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }
}

// ==========================================
// HeaderPattern - detected header row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderPattern {
    pub columns: ColumnMapping,
    pub confidence: f64, // 0..1
    pub row_index: usize,
    pub detected_fields: usize,
}

// ==========================================
// ProductSection - rows belonging to one product name
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSection {
    pub product_name: String,
    pub start_row: usize,
    pub end_row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<usize>,
    pub data_rows: Vec<usize>, // sorted ascending, no duplicates
    pub confidence: f64,
}
