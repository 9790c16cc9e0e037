/// Medication spend analytics service.
///
/// Runs four descriptive analyses over a claims/medications warehouse —
/// top-cost medications, age/cost correlation, four-quadrant patient
/// segmentation, and cost concentration — producing charts, a console
/// report, a spreadsheet export, and a JSON run summary.

pub mod analysis;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod segment;
pub mod stats;
