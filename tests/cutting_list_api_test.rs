// ==========================================
// CuttingListApi integration tests
// ==========================================


use async_trait::async_trait;
use cutting_list_analyzer::api::{ApiError, CuttingListApi};
use cutting_list_analyzer::domain::{ErrorCode, ExcelParseResult};
use cutting_list_analyzer::engine::{ExcelAnalysis, ExcelAnalyzer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_helpers::{data_row, premium_frame_sheet, to_grid, write_xlsx};

/// Serves a precomputed result and counts how often it is asked
struct CountingAnalysis {
    result: ExcelParseResult,
    runs: Arc<AtomicUsize>,
    cached: bool,
}

#[async_trait]
impl ExcelAnalysis for CountingAnalysis {
    async fn analyze(&mut self) -> ExcelParseResult {
        if !self.cached {
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.cached = true;
        }
        self.result.clone()
    }

    fn clear_cache(&mut self) {
        self.cached = false;
    }
}

fn two_product_result() -> ExcelParseResult {
    let rows = to_grid(&[
        vec!["PREMIUM FRAME SİSTEMİ"],
        data_row("2351151", "KAPALI ALT", "25X25", "10"),
        data_row("2351152", "ACIK UST", "30X30", "4"),
        vec!["GİYOTİN SİSTEMİ"],
        data_row("2351153", "KAPALI ALT", "25X25", "2"),
    ]);
    ExcelAnalyzer::new("two.xlsx").analyze_rows("two.xlsx", rows)
}

fn counting_api(result: ExcelParseResult) -> (CuttingListApi<CountingAnalysis>, Arc<AtomicUsize>) {
    let runs = Arc::new(AtomicUsize::new(0));
    let api = CuttingListApi::new(CountingAnalysis {
        result,
        runs: runs.clone(),
        cached: false,
    });
    (api, runs)
}

#[tokio::test]
async fn test_product_names_in_sheet_order() {
    let (api, _) = counting_api(two_product_result());

    let names = api.product_names().await.unwrap();
    assert_eq!(names, vec!["PREMIUM FRAME SİSTEMİ", "GİYOTİN SİSTEMİ"]);
}

#[tokio::test]
async fn test_work_orders_by_product_ignores_case_and_spacing() {
    let (api, _) = counting_api(two_product_result());

    let work_orders = api.work_orders_by_product("  premium   frame sistemi ").await.unwrap();
    let ids: Vec<&str> = work_orders.iter().map(|w| w.work_order_id.as_str()).collect();
    assert_eq!(ids, vec!["2351151", "2351152"]);

    let unknown = api.work_orders_by_product("Cam Balkon").await;
    assert!(matches!(unknown, Err(ApiError::NotFound(_))));

    let blank = api.work_orders_by_product("   ").await;
    assert!(matches!(blank, Err(ApiError::InvalidInput(_))));
}

#[tokio::test]
async fn test_metrics_and_refresh() {
    let (api, runs) = counting_api(two_product_result());

    let metrics = api.metrics().await.unwrap();
    assert_eq!(metrics.product_count, 2);
    assert_eq!(metrics.work_order_count, 3);
    assert_eq!(metrics.profile_count, 3);
    assert_eq!(metrics.total_quantity, 16);
    assert_eq!(metrics.critical_product_count, 0);

    api.product_names().await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    api.refresh().await.unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_analysis_surfaces_code() {
    let api = CuttingListApi::new(ExcelAnalyzer::new("missing/cutting-list.xlsx"));

    match api.product_names().await {
        Err(ApiError::AnalysisFailed { code, .. }) => assert_eq!(code, ErrorCode::FileNotFound),
        other => panic!("expected AnalysisFailed, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_api_over_real_workbook() {
    let file = write_xlsx(&premium_frame_sheet()).expect("write xlsx");
    let api = CuttingListApi::new(ExcelAnalyzer::new(file.path()));

    let work_orders = api.work_orders_by_product("PREMIUM FRAME SİSTEMİ").await.unwrap();
    assert_eq!(work_orders.len(), 1);
    assert_eq!(work_orders[0].total_quantity, 10);

    let refreshed = api.refresh().await.unwrap();
    assert_eq!(refreshed.summary.total_profiles, 1);
}
