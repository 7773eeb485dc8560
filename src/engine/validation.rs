// ==========================================
// Cutting list analyzer - product group validation
// ==========================================
// Responsibilities: turn extracted work orders into per-product
// issues (confidence thresholds, generated/inherited IDs,
// quantity limits, missing measurements)
// Issues never remove data; they only annotate it.
// ==========================================

use crate::config::AnalyzerSettings;
use crate::domain::parse_result::ParseIssue;
use crate::domain::types::{ErrorCode, Severity};
use crate::domain::work_order::WorkOrderItem;

const ERROR_CONFIDENCE: f64 = 0.3;
const WARNING_CONFIDENCE: f64 = 0.7;

pub struct GroupValidator {
    high_quantity_threshold: u32,
    quantity_overflow_threshold: u32,
}

impl GroupValidator {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            high_quantity_threshold: settings.high_quantity_threshold,
            quantity_overflow_threshold: settings.quantity_overflow_threshold,
        }
    }

    /// Issues for one product group, tagged with its name
    pub fn validate(&self, product_name: &str, work_orders: &[WorkOrderItem]) -> Vec<ParseIssue> {
        let mut issues = Vec::new();

        for work_order in work_orders {
            self.validate_work_order(work_order, &mut issues);
        }

        if work_orders.iter().all(|w| w.profiles.is_empty()) {
            issues.push(ParseIssue::new(
                ErrorCode::MissingProfile,
                Severity::Warning,
                format!("No profiles extracted for '{}'", product_name),
            ));
        }

        if work_orders.iter().all(WorkOrderItem::has_generated_id) {
            issues.push(ParseIssue::new(
                ErrorCode::MissingWorkOrder,
                Severity::Warning,
                format!("No work-order number found for '{}'", product_name),
            ));
        }

        issues
            .into_iter()
            .map(|issue| issue.for_product(product_name))
            .collect()
    }

    fn validate_work_order(&self, work_order: &WorkOrderItem, issues: &mut Vec<ParseIssue>) {
        let id = work_order.work_order_id.as_str();
        let confidence = work_order.confidence;

        let confidence_issue = if confidence <= 0.0 || work_order.profiles.is_empty() {
            Some((
                ErrorCode::MissingProfile,
                Severity::Critical,
                format!("Work order {} has no usable profile data", id),
            ))
        } else if confidence < ERROR_CONFIDENCE {
            Some((
                ErrorCode::InvalidFormat,
                Severity::Error,
                format!("Work order {} extracted with very low confidence ({:.2})", id, confidence),
            ))
        } else if confidence < WARNING_CONFIDENCE {
            Some((
                ErrorCode::InvalidFormat,
                Severity::Warning,
                format!("Work order {} extracted with low confidence ({:.2})", id, confidence),
            ))
        } else {
            None
        };

        if let Some((code, severity, message)) = confidence_issue {
            issues.push(
                ParseIssue::new(code, severity, message)
                    .at_row(work_order.row_index)
                    .for_work_order(id),
            );
        }

        if work_order.has_generated_id() {
            issues.push(
                ParseIssue::new(
                    ErrorCode::GeneratedId,
                    Severity::Info,
                    format!("Work-order number generated as {}", id),
                )
                .at_row(work_order.row_index)
                .for_work_order(id),
            );
        }

        let inherited = work_order.inherited_rows();
        if let Some(first) = inherited.first() {
            issues.push(
                ParseIssue::new(
                    ErrorCode::InheritedId,
                    Severity::Info,
                    format!("{} row(s) inherited work order {}", inherited.len(), id),
                )
                .at_row(*first)
                .for_work_order(id),
            );
        }

        for profile in &work_order.profiles {
            if profile.measurement.trim().is_empty() {
                issues.push(
                    ParseIssue::new(
                        ErrorCode::MissingMeasurement,
                        Severity::Warning,
                        format!("{} has no measurement", profile.profile_type),
                    )
                    .at_row(profile.row_index)
                    .for_work_order(id),
                );
            }

            if profile.quantity >= self.quantity_overflow_threshold {
                issues.push(
                    ParseIssue::new(
                        ErrorCode::QuantityOverflow,
                        Severity::Error,
                        format!("Quantity {} exceeds {}", profile.quantity, self.quantity_overflow_threshold),
                    )
                    .at_row(profile.row_index)
                    .for_work_order(id),
                );
            } else if profile.quantity >= self.high_quantity_threshold {
                issues.push(
                    ParseIssue::new(
                        ErrorCode::HighQuantity,
                        Severity::Warning,
                        format!("Unusually high quantity {}", profile.quantity),
                    )
                    .at_row(profile.row_index)
                    .for_work_order(id),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_result::ValidationSummary;
    use crate::domain::types::WorkOrderSourceType;
    use crate::domain::work_order::{ProfileItem, WorkOrderMetadata, WorkOrderSource};

    fn profile(row_index: usize, measurement: &str, quantity: u32, confidence: f64) -> ProfileItem {
        ProfileItem {
            profile_type: "KAPALI ALT".to_string(),
            measurement: measurement.to_string(),
            quantity,
            row_index,
            confidence,
        }
    }

    fn work_order(id: &str, row_index: usize, profiles: Vec<ProfileItem>) -> WorkOrderItem {
        let confidence = if profiles.is_empty() {
            0.0
        } else {
            profiles.iter().map(|p| p.confidence).sum::<f64>() / profiles.len() as f64
        };
        WorkOrderItem {
            work_order_id: id.to_string(),
            total_quantity: profiles.iter().map(|p| u64::from(p.quantity)).sum(),
            profiles,
            metadata: WorkOrderMetadata::default(),
            row_index,
            confidence,
            source: WorkOrderSource {
                source_type: WorkOrderSourceType::Direct,
                parent_work_order_id: None,
                original_row_index: row_index,
            },
        }
    }

    fn codes(issues: &[ParseIssue]) -> Vec<ErrorCode> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_clean_group_has_no_issues() {
        let validator = GroupValidator::new(&AnalyzerSettings::default());
        let issues = validator.validate("CAM BALKON", &[work_order("2351151", 4, vec![profile(4, "25X25", 10, 1.0)])]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_confidence_thresholds() {
        let validator = GroupValidator::new(&AnalyzerSettings::default());

        let low = validator.validate("X", &[work_order("2351151", 1, vec![profile(1, "600", 3, 0.5)])]);
        assert_eq!(low[0].code, ErrorCode::InvalidFormat);
        assert_eq!(low[0].severity, Severity::Warning);

        let very_low = validator.validate("X", &[work_order("2351151", 1, vec![profile(1, "600", 3, 0.2)])]);
        assert_eq!(very_low[0].severity, Severity::Error);

        let empty = validator.validate("X", &[work_order("FALLBACK-1", 1, vec![])]);
        let summary = ValidationSummary::from_issues(empty);
        assert!(!summary.is_valid);
        assert_eq!(summary.critical_errors, 1);
        assert!(summary.issues.iter().all(|i| i.product_name.as_deref() == Some("X")));
    }

    #[test]
    fn test_item_level_issues() {
        let validator = GroupValidator::new(&AnalyzerSettings::default());
        let issues = validator.validate(
            "X",
            &[work_order(
                "AUTO-3",
                2,
                vec![profile(2, "", 1500, 0.9), profile(3, "25X25", 12000, 0.9)],
            )],
        );

        assert_eq!(
            codes(&issues),
            vec![
                ErrorCode::GeneratedId,
                ErrorCode::InheritedId,
                ErrorCode::MissingMeasurement,
                ErrorCode::HighQuantity,
                ErrorCode::QuantityOverflow,
                ErrorCode::MissingWorkOrder,
            ]
        );
        assert_eq!(issues[1].row_index, Some(3));
    }

    #[test]
    fn test_thresholds_follow_settings() {
        let settings = AnalyzerSettings {
            high_quantity_threshold: 50,
            ..Default::default()
        };
        let validator = GroupValidator::new(&settings);
        let issues = validator.validate("X", &[work_order("2351151", 1, vec![profile(1, "600", 60, 0.9)])]);
        assert_eq!(codes(&issues), vec![ErrorCode::HighQuantity]);
    }
}
