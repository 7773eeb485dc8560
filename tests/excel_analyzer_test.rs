// ==========================================
// ExcelAnalyzer integration tests
// ==========================================
// Real workbooks on disk through the full pipeline
// ==========================================


use cutting_list_analyzer::config::{config_keys, ConfigManager};
use cutting_list_analyzer::domain::{ErrorCode, Severity, WorkOrderSourceType};
use cutting_list_analyzer::engine::{ExcelAnalysis, ExcelAnalyzer};
use cutting_list_analyzer::logging;
use test_helpers::{data_row, premium_frame_sheet, temp_file, to_grid, write_csv, write_xlsx, HEADER};

#[tokio::test]
async fn test_premium_frame_sheet_end_to_end() {
    logging::init_test();

    let file = write_xlsx(&premium_frame_sheet()).expect("write xlsx");
    let mut analyzer = ExcelAnalyzer::new(file.path());

    let result = analyzer.analyze().await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.errors.is_empty());
    assert_eq!(result.product_groups.len(), 1);

    let group = &result.product_groups[0];
    assert_eq!(group.product_name, "PREMIUM FRAME SİSTEMİ");
    assert_eq!(group.work_orders.len(), 1);
    assert_eq!(group.metadata.header_row, Some(3));
    assert_eq!(group.metadata.data_row_count, 3);
    assert!(!group.metadata.used_fallback);

    let work_order = &group.work_orders[0];
    assert_eq!(work_order.work_order_id, "2351151");
    assert_eq!(work_order.source.source_type, WorkOrderSourceType::Direct);
    assert_eq!(work_order.metadata.color.as_deref(), Some("BEYAZ"));
    assert_eq!(work_order.profiles.len(), 1);

    let profile = &work_order.profiles[0];
    assert_eq!(profile.profile_type, "KAPALI ALT");
    assert_eq!(profile.measurement, "25X25");
    assert_eq!(profile.quantity, 10);
    assert!(profile.confidence >= 0.8);

    assert_eq!(result.context.header_row, Some(3));
    assert_eq!(result.summary.total_quantity, 10);
    assert_eq!(result.summary.profile_types, vec!["KAPALI ALT".to_string()]);
    assert_eq!(result.metrics.processed_rows, 1);
    assert!(result.metrics.average_confidence >= 0.8);
}

#[tokio::test]
async fn test_two_ids_on_one_row_form_composite() {
    let mut composite = data_row("2351151", "KAPALI ALT", "25X25", "10");
    composite[1] = "2351599";
    let rows = vec![vec!["GİYOTİN SİSTEMİ"], HEADER.to_vec(), composite];

    let file = write_xlsx(&rows).expect("write xlsx");
    let result = ExcelAnalyzer::new(file.path()).analyze().await;

    assert!(result.success);
    let work_orders = &result.product_groups[0].work_orders;
    assert_eq!(work_orders.len(), 1);
    assert_eq!(work_orders[0].work_order_id, "2351151+2351599");
    assert_eq!(work_orders[0].source.source_type, WorkOrderSourceType::Merged);
    assert_eq!(
        work_orders[0].source.parent_work_order_id.as_deref(),
        Some("2351151")
    );
}

#[tokio::test]
async fn test_repeated_analysis_uses_cache() {
    let file = write_xlsx(&premium_frame_sheet()).expect("write xlsx");
    let mut analyzer = ExcelAnalyzer::new(file.path());

    let first = analyzer.analyze().await;
    let second = analyzer.analyze().await;
    assert_eq!(first, second);
    assert!(analyzer.cached_result().is_some());

    analyzer.clear_cache();
    assert!(analyzer.cached_result().is_none());

    let third = analyzer.analyze().await;
    assert_ne!(third.context.analysis_id, first.context.analysis_id);
    assert_eq!(third.product_groups, first.product_groups);
    assert_eq!(third.summary, first.summary);
}

#[tokio::test]
async fn test_missing_file_fails_cleanly() {
    let mut analyzer = ExcelAnalyzer::new("definitely/not/here.xlsx");
    let result = analyzer.analyze().await;

    assert!(!result.success);
    assert!(result.product_groups.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::FileNotFound);
    assert_eq!(result.errors[0].severity, Severity::Critical);
    assert_eq!(result.context.file_name, "here.xlsx");

    // failures are not cached
    assert!(analyzer.cached_result().is_none());
}

#[tokio::test]
async fn test_zero_byte_file_is_empty_worksheet() {
    let file = temp_file(".xlsx").expect("temp file");
    let result = ExcelAnalyzer::new(file.path()).analyze().await;

    assert!(!result.success);
    assert_eq!(result.errors[0].code, ErrorCode::EmptyWorksheet);
}

#[tokio::test]
async fn test_unsupported_extension_is_invalid_format() {
    let file = write_csv(&premium_frame_sheet()).expect("write csv");
    let renamed = file.path().with_extension("txt");
    std::fs::copy(file.path(), &renamed).expect("copy");

    let result = ExcelAnalyzer::new(&renamed).analyze().await;
    let _ = std::fs::remove_file(&renamed);

    assert!(!result.success);
    assert_eq!(result.errors[0].code, ErrorCode::InvalidFormat);
}

#[tokio::test]
async fn test_corrupt_workbook_is_parse_failed() {
    let file = write_csv(&[vec!["not", "a", "zip"]]).expect("write csv");
    let renamed = file.path().with_extension("xlsx");
    std::fs::copy(file.path(), &renamed).expect("copy");

    let result = ExcelAnalyzer::new(&renamed).analyze().await;
    let _ = std::fs::remove_file(&renamed);

    assert!(!result.success);
    assert_eq!(result.errors[0].code, ErrorCode::ParseFailed);
}

#[tokio::test]
async fn test_csv_input_matches_xlsx() {
    let xlsx = write_xlsx(&premium_frame_sheet()).expect("write xlsx");
    let csv = write_csv(&premium_frame_sheet()).expect("write csv");

    let from_xlsx = ExcelAnalyzer::new(xlsx.path()).analyze().await;
    let from_csv = ExcelAnalyzer::new(csv.path()).analyze().await;

    assert!(from_csv.success);
    assert_eq!(from_csv.summary, from_xlsx.summary);
}

#[test]
fn test_duplicate_product_names_collapse() {
    let rows = to_grid(&[
        vec!["PREMIUM FRAME SİSTEMİ"],
        data_row("2351151", "KAPALI ALT", "25X25", "10"),
        data_row("2351152", "ACIK UST", "30X30", "4"),
        vec!["GİYOTİN SİSTEMİ"],
        data_row("2351153", "KAPALI ALT", "25X25", "2"),
        vec!["premium  frame sistemi"],
        data_row("2351154", "RONDOLU", "40", "6"),
    ]);

    let result = ExcelAnalyzer::new("dupes.xlsx").analyze_rows("dupes.xlsx", rows);

    assert!(result.success);
    assert_eq!(result.product_groups.len(), 2);

    let premium = &result.product_groups[0];
    assert_eq!(premium.metadata.data_row_count, 3);
    let ids: Vec<&str> = premium.work_orders.iter().map(|w| w.work_order_id.as_str()).collect();
    assert_eq!(ids, vec!["2351151", "2351152", "2351154"]);
    assert_eq!(premium.total_quantity, 20);
    assert_eq!(
        result.summary.product_names,
        vec!["PREMIUM FRAME SİSTEMİ".to_string(), "GİYOTİN SİSTEMİ".to_string()]
    );
}

#[test]
fn test_section_without_profiles_still_reported() {
    let rows = to_grid(&[
        vec!["CAM BALKON"],
        vec!["2351151", "", "", "BEYAZ"],
        vec!["2351151", "", "", "BEYAZ"],
    ]);

    let result = ExcelAnalyzer::new("bare.xlsx").analyze_rows("bare.xlsx", rows);

    assert!(result.success);
    assert_eq!(result.product_groups.len(), 1);

    let group = &result.product_groups[0];
    assert!(group.metadata.used_fallback);
    assert_eq!(group.work_orders.len(), 1);
    assert!(group.work_orders[0].profiles.is_empty());
    assert_eq!(group.work_orders[0].work_order_id, "FALLBACK-1");
    assert_eq!(group.work_orders[0].metadata.color.as_deref(), Some("BEYAZ"));
    assert!(!group.validation.is_valid);
    assert!(group.validation.critical_errors >= 1);
    assert_eq!(group.total_profiles, 0);
}

#[test]
fn test_sheet_without_products_fails() {
    let rows = to_grid(&[vec!["Hafta 12"], vec!["12", "34"], vec!["toplam"]]);

    let result = ExcelAnalyzer::new("notes.xlsx").analyze_rows("notes.xlsx", rows);

    assert!(!result.success);
    assert_eq!(result.errors[0].code, ErrorCode::NoProductsFound);
    assert!(result.product_groups.is_empty());
}

#[test]
fn test_config_thresholds_reach_validation() {
    let mut config = ConfigManager::new();
    config.set(config_keys::HIGH_QUANTITY_THRESHOLD, "5");

    let rows = to_grid(&premium_frame_sheet());
    let result = ExcelAnalyzer::with_config("cfg.xlsx", &config).analyze_rows("cfg.xlsx", rows);

    let issues = &result.product_groups[0].validation.issues;
    assert!(issues.iter().any(|i| i.code == ErrorCode::HighQuantity));
}
