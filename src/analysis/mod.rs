/// The four descriptive analyses.
///
/// Each one is independent: one read query against the warehouse, an
/// aggregation, a chart, and a printed interpretation. They share the
/// connection serially but no state.
///
/// Submodules:
/// - `top_medications` — top 10 medications by total spend.
/// - `age_correlation` — Pearson correlation of age vs. summed cost.
/// - `segmentation` — four-quadrant patient segmentation + xlsx export.
/// - `concentration` — Pareto share of the top medications.

pub mod age_correlation;
pub mod concentration;
pub mod segmentation;
pub mod top_medications;
