use crate::config::AnalyzerSettings;

// ==========================================
// PatternDetector
// ==========================================
// Stateless apart from the threshold snapshot; every
// heuristic is a pure function of the grid it is given.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    pub(super) settings: AnalyzerSettings,
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }
}
