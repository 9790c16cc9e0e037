/// Output rendering for the pipeline.
///
/// Submodules:
/// - `charts` — PNG rendering for the bar, scatter, and count charts.
/// - `excel` — spreadsheet export of the high-priority patient list.
/// - `summary` — serializable run summary written as JSON.

pub mod charts;
pub mod excel;
pub mod summary;
