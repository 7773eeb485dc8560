// ==========================================
// Cutting list analyzer - config manager
// ==========================================
// Responsibilities: load / query / override configuration
// Storage: flat key-value map (JSON file + environment overrides)
// ==========================================

use crate::config::analyzer_config_trait::AnalyzerConfigReader;
use crate::config::analyzer_settings::AnalyzerSettings;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    pub const HEADER_ROW_INDEX: &str = "header_row_index";
    pub const HEADER_SCAN_LIMIT: &str = "header_scan_limit";
    pub const HEADER_MIN_CONFIDENCE: &str = "header_min_confidence";
    pub const HEADER_EARLY_EXIT_CONFIDENCE: &str = "header_early_exit_confidence";
    pub const PRODUCT_SCAN_WINDOW: &str = "product_scan_window";
    pub const PRODUCT_SCAN_COLUMNS: &str = "product_scan_columns";
    pub const SECTION_SCAN_LIMIT: &str = "section_scan_limit";
    pub const PRODUCT_MIN_CONFIDENCE: &str = "product_min_confidence";
    pub const PRODUCT_BOUNDARY_CONFIDENCE: &str = "product_boundary_confidence";
    pub const PRODUCT_BACKTRACK_LIMIT: &str = "product_backtrack_limit";
    pub const HIGH_QUANTITY_THRESHOLD: &str = "high_quantity_threshold";
    pub const QUANTITY_OVERFLOW_THRESHOLD: &str = "quantity_overflow_threshold";

    pub const ALL: [&str; 12] = [
        HEADER_ROW_INDEX,
        HEADER_SCAN_LIMIT,
        HEADER_MIN_CONFIDENCE,
        HEADER_EARLY_EXIT_CONFIDENCE,
        PRODUCT_SCAN_WINDOW,
        PRODUCT_SCAN_COLUMNS,
        SECTION_SCAN_LIMIT,
        PRODUCT_MIN_CONFIDENCE,
        PRODUCT_BOUNDARY_CONFIDENCE,
        PRODUCT_BACKTRACK_LIMIT,
        HIGH_QUANTITY_THRESHOLD,
        QUANTITY_OVERFLOW_THRESHOLD,
    ];
}

/// Prefix of per-key environment overrides (CUTTING_LIST_HEADER_ROW_INDEX=4)
pub const ENV_PREFIX: &str = "CUTTING_LIST_";

// ==========================================
// ConfigManager
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// Empty store: every getter returns its default
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Load a flat JSON object (`{"header_row_index": 4, ...}`)
    pub fn from_json_file(path: &Path) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw)?;

        let values = parsed
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        debug!(path = %path.display(), "config file loaded");
        Ok(Self { values })
    }

    /// `<config dir>/cutting-list-analyzer/config.json`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cutting-list-analyzer").join("config.json"))
    }

    /// Default config file if present, then environment overrides
    pub fn load_default() -> Self {
        let manager = match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_json_file(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
                Self::new()
            }),
            _ => Self::new(),
        };
        manager.with_env_overrides()
    }

    /// Apply CUTTING_LIST_<KEY> environment variables
    pub fn with_env_overrides(mut self) -> Self {
        for key in config_keys::ALL {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(value) = std::env::var(&var) {
                debug!(key = key, env = %var, "config overridden from environment");
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Raw configured value
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.trim())
    }

    fn get_config_or_default<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Copy,
    {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
                warn!(config_key = key, raw_value = %raw, "malformed config value, using default");
                default
            }),
        }
    }

    fn get_ratio_or_default(&self, key: &str, default: f64) -> f64 {
        let value = self.get_config_or_default(key, default);
        if (0.0..=1.0).contains(&value) {
            value
        } else {
            warn!(config_key = key, value = value, "confidence outside [0,1], using default");
            default
        }
    }

    /// Snapshot of every effective value, as JSON
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        let settings = AnalyzerSettings::from_reader(self);
        let snapshot: BTreeMap<String, serde_json::Value> =
            match serde_json::to_value(&settings)? {
                serde_json::Value::Object(map) => map.into_iter().collect(),
                _ => {
                    return Err(ImportError::InternalError(
                        "settings did not serialize to an object".to_string(),
                    ))
                }
            };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

// ==========================================
// AnalyzerConfigReader implementation
// ==========================================
impl AnalyzerConfigReader for ConfigManager {
    // ===== Header detection =====

    fn get_header_row_index(&self) -> usize {
        let default = AnalyzerSettings::default().header_row_index;
        self.get_config_or_default(config_keys::HEADER_ROW_INDEX, default)
    }

    fn get_header_scan_limit(&self) -> usize {
        let default = AnalyzerSettings::default().header_scan_limit;
        self.get_config_or_default(config_keys::HEADER_SCAN_LIMIT, default)
    }

    fn get_header_min_confidence(&self) -> f64 {
        let default = AnalyzerSettings::default().header_min_confidence;
        self.get_ratio_or_default(config_keys::HEADER_MIN_CONFIDENCE, default)
    }

    fn get_header_early_exit_confidence(&self) -> f64 {
        let default = AnalyzerSettings::default().header_early_exit_confidence;
        self.get_ratio_or_default(config_keys::HEADER_EARLY_EXIT_CONFIDENCE, default)
    }

    // ===== Product sections =====

    fn get_product_scan_window(&self) -> usize {
        let default = AnalyzerSettings::default().product_scan_window;
        self.get_config_or_default(config_keys::PRODUCT_SCAN_WINDOW, default)
    }

    fn get_product_scan_columns(&self) -> usize {
        let default = AnalyzerSettings::default().product_scan_columns;
        self.get_config_or_default(config_keys::PRODUCT_SCAN_COLUMNS, default)
    }

    fn get_section_scan_limit(&self) -> usize {
        let default = AnalyzerSettings::default().section_scan_limit;
        self.get_config_or_default(config_keys::SECTION_SCAN_LIMIT, default)
    }

    fn get_product_min_confidence(&self) -> f64 {
        let default = AnalyzerSettings::default().product_min_confidence;
        self.get_ratio_or_default(config_keys::PRODUCT_MIN_CONFIDENCE, default)
    }

    fn get_product_boundary_confidence(&self) -> f64 {
        let default = AnalyzerSettings::default().product_boundary_confidence;
        self.get_ratio_or_default(config_keys::PRODUCT_BOUNDARY_CONFIDENCE, default)
    }

    fn get_product_backtrack_limit(&self) -> usize {
        let default = AnalyzerSettings::default().product_backtrack_limit;
        self.get_config_or_default(config_keys::PRODUCT_BACKTRACK_LIMIT, default)
    }

    // ===== Validation =====

    fn get_high_quantity_threshold(&self) -> u32 {
        let default = AnalyzerSettings::default().high_quantity_threshold;
        self.get_config_or_default(config_keys::HIGH_QUANTITY_THRESHOLD, default)
    }

    fn get_quantity_overflow_threshold(&self) -> u32 {
        let default = AnalyzerSettings::default().quantity_overflow_threshold;
        self.get_config_or_default(config_keys::QUANTITY_OVERFLOW_THRESHOLD, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_empty() {
        let config = ConfigManager::new();
        assert_eq!(AnalyzerSettings::from_reader(&config), AnalyzerSettings::default());
    }

    #[test]
    fn test_override_and_malformed_value() {
        let mut config = ConfigManager::new();
        config.set(config_keys::HEADER_ROW_INDEX, "5");
        config.set(config_keys::SECTION_SCAN_LIMIT, "lots");
        config.set(config_keys::PRODUCT_MIN_CONFIDENCE, "1.7");

        assert_eq!(config.get_header_row_index(), 5);
        assert_eq!(config.get_section_scan_limit(), 200);
        assert_eq!(config.get_product_min_confidence(), 0.4);
    }

    #[test]
    fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"header_row_index": 2, "high_quantity_threshold": "500"}}"#
        )
        .unwrap();

        let config = ConfigManager::from_json_file(temp_file.path()).unwrap();
        assert_eq!(config.get_header_row_index(), 2);
        assert_eq!(config.get_high_quantity_threshold(), 500);
        assert_eq!(config.get_quantity_overflow_threshold(), 10000);
    }

    #[test]
    fn test_invalid_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();
        assert!(ConfigManager::from_json_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_config_snapshot() {
        let mut config = ConfigManager::new();
        config.set(config_keys::PRODUCT_SCAN_WINDOW, "30");
        let snapshot: serde_json::Value =
            serde_json::from_str(&config.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot["productScanWindow"], 30);
        assert_eq!(snapshot["headerRowIndex"], 3);
    }
}
