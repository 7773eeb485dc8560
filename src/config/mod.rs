// ==========================================
// Cutting list analyzer - configuration
// ==========================================
// Responsibilities: heuristic thresholds with defaults,
// file + environment overrides
// ==========================================

pub mod analyzer_config_trait;
pub mod analyzer_settings;
pub mod config_manager;

// Re-exports
pub use analyzer_config_trait::AnalyzerConfigReader;
pub use analyzer_settings::AnalyzerSettings;
pub use config_manager::{config_keys, ConfigManager};
