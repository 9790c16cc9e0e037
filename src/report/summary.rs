/// Run summary: one serializable record of what the four analyses found.
///
/// Written as JSON next to the spreadsheet so a run's headline numbers can
/// be diffed or archived without re-reading the console output.

use std::path::Path;

use serde::Serialize;

use crate::config::ensure_parent_dir;
use crate::model::AnalysisError;

#[derive(Debug, Clone, Serialize)]
pub struct TopMedicationsSummary {
    pub top_medication: String,
    pub top_spend: f64,
    pub medications_ranked: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationSummary {
    pub coefficient: f64,
    pub age_groups: usize,
    /// True when |r| >= 0.2 (the "noticeable correlation" branch).
    pub noticeable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationSummary {
    pub cost_threshold: f64,
    pub utilization_threshold: f64,
    pub segment_counts: Vec<(String, usize)>,
    pub high_priority_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationSummary {
    pub total_spend: f64,
    pub top_1_share_pct: f64,
    pub top_5_share_pct: f64,
}

/// Everything one run produced, in analysis order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub top_medications: TopMedicationsSummary,
    pub correlation: CorrelationSummary,
    pub segmentation: SegmentationSummary,
    pub concentration: ConcentrationSummary,
}

impl RunSummary {
    /// Serialize to pretty JSON at `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), AnalysisError> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::Export(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
