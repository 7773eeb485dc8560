// ==========================================
// Cutting list analyzer - analyzer config reader trait
// ==========================================
// Read-only view of the heuristic thresholds; no writes,
// no business logic.
// ==========================================

// ==========================================
// AnalyzerConfigReader Trait
// ==========================================
// Implementors: ConfigManager (key/value store with defaults)
pub trait AnalyzerConfigReader: Send + Sync {
    // ===== Header detection =====

    /// Row where the header conventionally sits
    ///
    /// # Default
    /// - 3
    fn get_header_row_index(&self) -> usize;

    /// Rows scanned when the conventional header row is not confident
    ///
    /// # Default
    /// - 50
    fn get_header_scan_limit(&self) -> usize;

    /// Below this the conventional row triggers a scan
    ///
    /// # Default
    /// - 0.5
    fn get_header_min_confidence(&self) -> f64;

    /// Scan stops early once a header beats this
    ///
    /// # Default
    /// - 0.7
    fn get_header_early_exit_confidence(&self) -> f64;

    // ===== Product sections =====

    /// Rows searched for a product name from the cursor
    ///
    /// # Default
    /// - 50
    fn get_product_scan_window(&self) -> usize;

    /// Leading columns searched for a product name
    ///
    /// # Default
    /// - 8
    fn get_product_scan_columns(&self) -> usize;

    /// Rows collected after a product name
    ///
    /// # Default
    /// - 200
    fn get_section_scan_limit(&self) -> usize;

    /// Minimum confidence for a product-name candidate
    ///
    /// # Default
    /// - 0.4
    fn get_product_min_confidence(&self) -> f64;

    /// A distinct name above this ends the current section
    ///
    /// # Default
    /// - 0.7
    fn get_product_boundary_confidence(&self) -> f64;

    /// Rows searched backwards from a data row for a product name
    ///
    /// # Default
    /// - 20
    fn get_product_backtrack_limit(&self) -> usize;

    // ===== Validation =====

    /// Quantities at or above this raise HIGH_QUANTITY
    ///
    /// # Default
    /// - 1000
    fn get_high_quantity_threshold(&self) -> u32;

    /// Quantities at or above this raise QUANTITY_OVERFLOW
    ///
    /// # Default
    /// - 10000
    fn get_quantity_overflow_threshold(&self) -> u32;
}
