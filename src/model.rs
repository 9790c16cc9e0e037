/// Core data types for the medication spend analytics service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no query logic — only types and the error enum
/// that every fallible operation in the pipeline returns.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Aggregate row types
// ---------------------------------------------------------------------------

/// Total spend for one medication, as returned by the mart-level
/// `GROUP BY medication_description` aggregations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationSpend {
    pub medication: String,
    pub total_spend: f64,
}

/// One (age, summed medication cost) point for the correlation analysis.
/// Age is kept as f64 because `DATE_PART` returns double precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeCostPoint {
    pub age: f64,
    pub total_cost: f64,
}

/// Per-patient utilization and spend, produced by the outer-join aggregate
/// in the segmentation analysis. Patients with no encounters or medications
/// still appear here with zero counts — that is the point of the outer join,
/// and the segmentation thresholds depend on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientActivity {
    pub patient_id: String,
    pub patient_name: String,
    pub total_encounters: i64,
    pub total_med_cost: f64,
}

// ---------------------------------------------------------------------------
// Segment labels
// ---------------------------------------------------------------------------

/// Quadrant label assigned to each patient by comparing spend and
/// utilization against the population's 75th-percentile thresholds.
///
/// `ALL` lists the four segments in the fixed display order used by the
/// count chart and the console report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    HighCostHighUtil,
    HighCostLowUtil,
    LowCostHighUtil,
    LowCostLowUtil,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::HighCostHighUtil,
        Segment::HighCostLowUtil,
        Segment::LowCostHighUtil,
        Segment::LowCostLowUtil,
    ];
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::HighCostHighUtil => write!(f, "HighCost - HighUtil"),
            Segment::HighCostLowUtil => write!(f, "HighCost - LowUtil"),
            Segment::LowCostHighUtil => write!(f, "LowCost - HighUtil"),
            Segment::LowCostLowUtil => write!(f, "LowCost - LowUtil"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while configuring, connecting, querying, or
/// writing analysis outputs.
///
/// `NoData` carries the name of the analysis that came up empty, so an
/// empty table fails with a readable message instead of an out-of-bounds
/// access on the first row.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Missing or invalid configuration, detected before any DB contact.
    #[error("configuration error: {0}")]
    Config(String),
    /// The initial connection could not be established.
    #[error("database connection failed: {0}")]
    Connection(#[source] postgres::Error),
    /// A query failed after a successful connection.
    #[error("query failed: {0}")]
    Query(#[from] postgres::Error),
    /// An analysis query returned no usable rows.
    #[error("no data available for analysis: {0}")]
    NoData(&'static str),
    /// Chart rendering failed.
    #[error("chart rendering failed: {0}")]
    Chart(String),
    /// Spreadsheet export failed.
    #[error("spreadsheet export failed: {0}")]
    Export(String),
    /// Filesystem error while preparing or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
