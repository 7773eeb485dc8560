// ==========================================
// Cutting list analyzer - Excel analyzer
// ==========================================
// Responsibilities: run the full extraction for one file and
// cache the result for the analyzer's lifetime
// Flow: validate → load → header → sections → extract
//       → aggregate → cache
// ==========================================
// The public entry point never returns Err and never panics
// on malformed input: failures become `success: false`.
// ==========================================

use crate::config::{AnalyzerConfigReader, AnalyzerSettings};
use crate::domain::cell::{CellValue, SheetRow};
use crate::domain::parse_result::{
    ExcelParseResult, ParseContext, ParseIssue, ParseMetrics, ParseSummary, ProductGroup,
    ProductGroupMetadata, ValidationSummary,
};
use crate::domain::sheet::{HeaderPattern, ProductSection};
use crate::domain::types::{ErrorCode, Severity};
use crate::domain::work_order::WorkOrderItem;
use crate::engine::data_extractor::DataExtractor;
use crate::engine::pattern_detector::PatternDetector;
use crate::engine::validation::GroupValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalSheetParser;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ExcelAnalysis Trait
// ==========================================
// Implementors: ExcelAnalyzer
#[async_trait]
pub trait ExcelAnalysis: Send {
    /// Analyze the bound file; cached after the first success
    async fn analyze(&mut self) -> ExcelParseResult;

    /// Drop the cached result so the next analyze re-reads the file
    fn clear_cache(&mut self);
}

// ==========================================
// ExcelAnalyzer
// ==========================================
pub struct ExcelAnalyzer {
    file_path: PathBuf,
    detector: PatternDetector,
    extractor: DataExtractor,
    validator: GroupValidator,
    parser: UniversalSheetParser,
    cache: Option<ExcelParseResult>,
}

impl ExcelAnalyzer {
    /// Analyzer with default thresholds
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self::with_settings(file_path, AnalyzerSettings::default())
    }

    /// Analyzer reading its thresholds from a config source
    pub fn with_config(file_path: impl Into<PathBuf>, config: &dyn AnalyzerConfigReader) -> Self {
        Self::with_settings(file_path, AnalyzerSettings::from_reader(config))
    }

    pub fn with_settings(file_path: impl Into<PathBuf>, settings: AnalyzerSettings) -> Self {
        let detector = PatternDetector::with_settings(settings.clone());
        Self {
            file_path: file_path.into(),
            extractor: DataExtractor::new(detector.clone()),
            validator: GroupValidator::new(&settings),
            detector,
            parser: UniversalSheetParser,
            cache: None,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        self.detector.settings()
    }

    pub fn cached_result(&self) -> Option<&ExcelParseResult> {
        self.cache.as_ref()
    }

    /// Run the pipeline on rows already in memory (no file access,
    /// no caching)
    pub fn analyze_rows(&self, file_name: &str, rows: Vec<SheetRow>) -> ExcelParseResult {
        let started = Instant::now();
        let context = self.new_context(file_name, rows.len());
        self.run_guarded(context, &rows, started)
    }

    // ==========================================
    // Stage 1-2: validate + load
    // ==========================================

    async fn load_rows(&self) -> ImportResult<Vec<SheetRow>> {
        let path = self.file_path.as_path();
        let file = path.display().to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| ImportError::FileNotFound(file.clone()))?;
        if !metadata.is_file() {
            return Err(ImportError::FileNotFound(file));
        }
        if metadata.len() == 0 {
            return Err(ImportError::EmptyWorksheet(file));
        }

        UniversalSheetParser::extension_of(path)?;

        let bytes = tokio::fs::read(path).await?;
        let rows = self.parser.parse_for_path(path, &bytes)?;
        debug!(file = %file, rows = rows.len(), bytes = bytes.len(), "sheet loaded");
        Ok(rows)
    }

    fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.display().to_string())
    }

    fn new_context(&self, file_name: &str, total_rows: usize) -> ParseContext {
        ParseContext {
            analysis_id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            file_path: self.file_path.display().to_string(),
            parsed_at: Utc::now(),
            total_rows,
            header_row: None,
            detected_header: None,
        }
    }

    // ==========================================
    // Stage 3-6: heuristics + aggregation
    // ==========================================

    /// Pipeline with every error and panic turned into a failed result
    fn run_guarded(&self, context: ParseContext, rows: &[SheetRow], started: Instant) -> ExcelParseResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_pipeline(context.clone(), rows, started)
        }));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!(file = %context.file_name, error = %e, code = %e.error_code(), "analysis failed");
                ExcelParseResult::failure(context, issue_from_error(&e), elapsed_ms(started))
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(file = %context.file_name, panic = %message, "analysis panicked");
                let issue = ParseIssue::new(ErrorCode::ParseFailed, Severity::Critical, message);
                ExcelParseResult::failure(context, issue, elapsed_ms(started))
            }
        }
    }

    fn run_pipeline(
        &self,
        mut context: ParseContext,
        rows: &[SheetRow],
        started: Instant,
    ) -> ImportResult<ExcelParseResult> {
        if rows.iter().all(|row| row.iter().all(CellValue::is_empty)) {
            return Err(ImportError::EmptyWorksheet(context.file_name.clone()));
        }

        let mut warnings = Vec::new();

        // ===== Header =====
        let header = self.detector.detect_header_row(rows, 0);
        match &header {
            Some(h) => info!(
                row_index = h.row_index,
                confidence = h.confidence,
                detected_fields = h.detected_fields,
                "header detected"
            ),
            None => {
                warn!(file = %context.file_name, "no header row found, using conventional columns");
                warnings.push(ParseIssue::new(
                    ErrorCode::NoHeaderFound,
                    Severity::Warning,
                    "No header row found; conventional column layout assumed",
                ));
            }
        }
        context.header_row = header.as_ref().map(|h| h.row_index);
        context.detected_header = header.clone();

        // ===== Sections =====
        let sections = self.detector.detect_product_sections(rows, header.as_ref());
        if sections.is_empty() {
            return Err(ImportError::NoProductsFound(context.file_name.clone()));
        }
        info!(sections = sections.len(), "product sections detected");

        // ===== Extraction =====
        let mut groups = Vec::new();
        let mut processed: BTreeSet<usize> = BTreeSet::new();

        for section in &sections {
            if section.data_rows.is_empty() {
                warn!(product_name = %section.product_name, row_index = section.start_row, "product without data rows skipped");
                warnings.push(
                    ParseIssue::new(
                        ErrorCode::MissingWorkOrder,
                        Severity::Warning,
                        format!("'{}' has no data rows and was skipped", section.product_name),
                    )
                    .at_row(section.start_row)
                    .for_product(section.product_name.clone()),
                );
                continue;
            }

            groups.push(self.build_group(rows, section, header.as_ref(), &mut processed));
        }

        if groups.is_empty() {
            return Err(ImportError::NoProductsFound(context.file_name.clone()));
        }

        // ===== Aggregation =====
        let metrics = self.compute_metrics(rows, &groups, processed.len(), started);
        let summary = ParseSummary::from_groups(&groups);

        info!(
            products = summary.total_products,
            work_orders = summary.total_work_orders,
            profiles = summary.total_profiles,
            total_quantity = summary.total_quantity,
            elapsed_ms = metrics.elapsed_ms,
            "analysis completed"
        );

        Ok(ExcelParseResult {
            success: true,
            product_groups: groups,
            errors: Vec::new(),
            warnings,
            context,
            metrics,
            summary,
        })
    }

    /// Extract, fall back, validate and total one section
    fn build_group(
        &self,
        rows: &[SheetRow],
        section: &ProductSection,
        header: Option<&HeaderPattern>,
        processed: &mut BTreeSet<usize>,
    ) -> ProductGroup {
        let mut outcome = self.extractor.extract_work_orders(rows, section, header);
        let mut used_fallback = false;

        if outcome.work_orders.is_empty() {
            used_fallback = true;
            info!(product_name = %section.product_name, data_rows = section.data_rows.len(), "no work orders extracted, trying fallback pass");

            let fallback = self.extractor.extract_fallback(rows, section);
            if fallback.work_orders.is_empty() {
                warn!(product_name = %section.product_name, "fallback pass found nothing, keeping empty work order");
                outcome.work_orders = vec![self.extractor.placeholder_work_order(rows, section)];
            } else {
                outcome.work_orders = fallback.work_orders;
                outcome.processed_rows = fallback.processed_rows;
                outcome.skipped_rows = fallback.skipped_rows;
            }
        }

        processed.extend(outcome.processed_rows.iter().copied());

        let work_orders = outcome.work_orders;
        let mut issues: Vec<ParseIssue> = outcome
            .issues
            .into_iter()
            .map(|issue| issue.for_product(section.product_name.clone()))
            .collect();
        issues.extend(self.validator.validate(&section.product_name, &work_orders));

        let mut profile_types: Vec<String> = Vec::new();
        for profile in work_orders.iter().flat_map(|w| w.profiles.iter()) {
            if !profile_types.contains(&profile.profile_type) {
                profile_types.push(profile.profile_type.clone());
            }
        }

        let validation = ValidationSummary::from_issues(issues);
        if !validation.is_valid {
            warn!(
                product_name = %section.product_name,
                critical_errors = validation.critical_errors,
                "product group has critical issues"
            );
        }

        ProductGroup {
            product_name: section.product_name.clone(),
            confidence: section.confidence,
            metadata: ProductGroupMetadata {
                start_row: section.start_row,
                end_row: section.end_row,
                header_row: section.header_row,
                data_row_count: section.data_rows.len(),
                work_order_count: work_orders.len(),
                used_fallback,
            },
            validation,
            total_profiles: work_orders.iter().map(|w| w.profiles.len()).sum(),
            total_quantity: work_orders.iter().map(|w| w.total_quantity).sum(),
            profile_types,
            work_orders,
        }
    }

    fn compute_metrics(
        &self,
        rows: &[SheetRow],
        groups: &[ProductGroup],
        processed_rows: usize,
        started: Instant,
    ) -> ParseMetrics {
        let scored: Vec<&WorkOrderItem> = groups
            .iter()
            .flat_map(|g| g.work_orders.iter())
            .filter(|w| !w.profiles.is_empty())
            .collect();
        let average_confidence = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|w| w.confidence).sum::<f64>() / scored.len() as f64
        };

        ParseMetrics {
            elapsed_ms: elapsed_ms(started),
            memory_delta_bytes: estimate_grid_bytes(rows),
            average_confidence,
            processed_rows,
            skipped_rows: rows.len().saturating_sub(processed_rows),
            total_rows: rows.len(),
        }
    }
}

#[async_trait]
impl ExcelAnalysis for ExcelAnalyzer {
    #[instrument(skip(self), fields(file = %self.file_path.display()))]
    async fn analyze(&mut self) -> ExcelParseResult {
        if let Some(cached) = &self.cache {
            debug!(analysis_id = %cached.context.analysis_id, "returning cached analysis");
            return cached.clone();
        }

        let started = Instant::now();
        let file_name = self.file_name();

        let result = match self.load_rows().await {
            Ok(rows) => {
                let context = self.new_context(&file_name, rows.len());
                self.run_guarded(context, &rows, started)
            }
            Err(e) => {
                error!(error = %e, code = %e.error_code(), "sheet could not be loaded");
                let context = self.new_context(&file_name, 0);
                ExcelParseResult::failure(context, issue_from_error(&e), elapsed_ms(started))
            }
        };

        if result.success {
            self.cache = Some(result.clone());
        }
        result
    }

    fn clear_cache(&mut self) {
        debug!(file = %self.file_path.display(), "analysis cache cleared");
        self.cache = None;
    }
}

fn issue_from_error(error: &ImportError) -> ParseIssue {
    ParseIssue::new(error.error_code(), Severity::Critical, error.to_string())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Approximate heap footprint of the loaded grid
fn estimate_grid_bytes(rows: &[SheetRow]) -> u64 {
    let cell_size = std::mem::size_of::<CellValue>();
    let row_size = std::mem::size_of::<SheetRow>();
    let bytes: usize = rows
        .iter()
        .map(|row| {
            let text: usize = row
                .iter()
                .map(|cell| match cell {
                    CellValue::Text(s) => s.capacity(),
                    _ => 0,
                })
                .sum();
            row_size + row.capacity() * cell_size + text
        })
        .sum();
    bytes as u64
}
