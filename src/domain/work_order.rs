// ==========================================
// Cutting list analyzer - work orders and profile items
// ==========================================
// ProductGroup 1..* WorkOrderItem 1..* ProfileItem
// ==========================================

use crate::domain::types::WorkOrderSourceType;
use serde::{Deserialize, Serialize};

/// Prefix of IDs synthesized for rows seen before any work-order ID
pub const AUTO_ID_PREFIX: &str = "AUTO-";

/// Prefix of IDs synthesized by the last-chance fallback pass
pub const FALLBACK_ID_PREFIX: &str = "FALLBACK-";

// ==========================================
// ProfileItem - one profile / measurement / quantity triple
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileItem {
    pub profile_type: String,
    pub measurement: String, // free text, unit ambiguous
    pub quantity: u32,       // > 0
    pub row_index: usize,
    pub confidence: f64,
}

// ==========================================
// WorkOrderMetadata
// ==========================================
// Absent values are left out of the JSON entirely
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl WorkOrderMetadata {
    pub fn is_empty(&self) -> bool {
        self == &WorkOrderMetadata::default()
    }
}

// ==========================================
// WorkOrderSource - where the work order's ID came from
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderSource {
    #[serde(rename = "type")]
    pub source_type: WorkOrderSourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_work_order_id: Option<String>,
    pub original_row_index: usize,
}

// ==========================================
// WorkOrderItem
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderItem {
    pub work_order_id: String, // may be a '+'-joined composite
    pub profiles: Vec<ProfileItem>,
    pub metadata: WorkOrderMetadata,
    pub row_index: usize,
    pub confidence: f64, // mean of the profiles' confidences
    pub source: WorkOrderSource,
    pub total_quantity: u64,
}

impl WorkOrderItem {
    /// True when the ID was synthesized rather than read from the sheet
    pub fn has_generated_id(&self) -> bool {
        self.work_order_id.starts_with(AUTO_ID_PREFIX)
            || self.work_order_id.starts_with(FALLBACK_ID_PREFIX)
    }

    /// Rows that carried no ID of their own and joined this work order
    pub fn inherited_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .profiles
            .iter()
            .map(|p| p.row_index)
            .filter(|r| *r != self.row_index)
            .collect();
        rows.dedup();
        rows
    }

    /// Individual IDs of a composite ('+'-joined) work order
    pub fn component_ids(&self) -> Vec<&str> {
        self.work_order_id.split('+').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(row_index: usize, quantity: u32) -> ProfileItem {
        ProfileItem {
            profile_type: "KAPALI ALT".to_string(),
            measurement: "25X25".to_string(),
            quantity,
            row_index,
            confidence: 1.0,
        }
    }

    fn work_order(id: &str, row_index: usize, profiles: Vec<ProfileItem>) -> WorkOrderItem {
        WorkOrderItem {
            work_order_id: id.to_string(),
            total_quantity: profiles.iter().map(|p| u64::from(p.quantity)).sum(),
            profiles,
            metadata: WorkOrderMetadata::default(),
            row_index,
            confidence: 1.0,
            source: WorkOrderSource {
                source_type: WorkOrderSourceType::Direct,
                parent_work_order_id: None,
                original_row_index: row_index,
            },
        }
    }

    #[test]
    fn test_generated_id_detection() {
        assert!(work_order("AUTO-5", 4, vec![]).has_generated_id());
        assert!(work_order("FALLBACK-1", 0, vec![]).has_generated_id());
        assert!(!work_order("2351151", 4, vec![]).has_generated_id());
    }

    #[test]
    fn test_inherited_rows() {
        let wo = work_order("2351151", 4, vec![profile(4, 1), profile(5, 2), profile(6, 3)]);
        assert_eq!(wo.inherited_rows(), vec![5, 6]);
        assert_eq!(wo.total_quantity, 6);
    }

    #[test]
    fn test_component_ids() {
        let wo = work_order("2351151+2351599", 4, vec![]);
        assert_eq!(wo.component_ids(), vec!["2351151", "2351599"]);
    }

    #[test]
    fn test_metadata_skips_absent_fields() {
        let metadata = WorkOrderMetadata {
            color: Some("BEYAZ".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json, serde_json::json!({ "color": "BEYAZ" }));
        assert!(WorkOrderMetadata::default().is_empty());
    }
}
