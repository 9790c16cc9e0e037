/// Chart rendering for the four analyses.
///
/// Each function takes already-aggregated rows and an output path, creates
/// the output directory if needed, and renders a PNG. All plotters errors
/// are flattened into `AnalysisError::Chart` — the caller only needs to
/// know that the chart did not land on disk — and a failed render removes
/// any partially-written file.

use std::path::Path;

use plotters::prelude::*;

use crate::config::ensure_parent_dir;
use crate::model::{AgeCostPoint, AnalysisError, MedicationSpend, Segment};

const BAR_CHART_SIZE: (u32, u32) = (1200, 600);
const SCATTER_SIZE: (u32, u32) = (1000, 600);

fn chart_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

/// Remove a partially-written chart file when rendering fails, so a
/// broken run never leaves a truncated image behind.
fn cleanup_on_err<T>(path: &Path, result: Result<T, AnalysisError>) -> Result<T, AnalysisError> {
    if result.is_err() {
        let _ = std::fs::remove_file(path);
    }
    result
}

// ---------------------------------------------------------------------------
// Horizontal bar chart (top medications, concentration shares)
// ---------------------------------------------------------------------------

/// Horizontal bars, medication names on the y axis. `rows` must already be
/// sorted in the order they should appear; values are whatever the caller
/// puts in `total_spend` (dollars or share percentages), labeled by `x_desc`.
pub fn horizontal_bar(
    title: &str,
    x_desc: &str,
    rows: &[MedicationSpend],
    path: &Path,
) -> Result<(), AnalysisError> {
    if rows.is_empty() {
        return Err(AnalysisError::NoData("horizontal bar chart"));
    }
    ensure_parent_dir(path)?;
    cleanup_on_err(path, render_horizontal_bar(title, x_desc, rows, path))
}

fn render_horizontal_bar(
    title: &str,
    x_desc: &str,
    rows: &[MedicationSpend],
    path: &Path,
) -> Result<(), AnalysisError> {
    let max_spend = rows
        .iter()
        .map(|r| r.total_spend)
        .fold(f64::MIN, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(280)
        .build_cartesian_2d(0.0..max_spend * 1.05, (0..rows.len()).into_segmented())
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .y_labels(rows.len())
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if *i < rows.len() => rows[*i].medication.clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, r)| {
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(i)),
                    (r.total_spend, SegmentValue::Exact(i + 1)),
                ],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Scatter plot (age vs. cost)
// ---------------------------------------------------------------------------

/// Scatter of per-age summed medication cost. The caller folds the
/// correlation coefficient into `title`.
pub fn scatter(title: &str, points: &[AgeCostPoint], path: &Path) -> Result<(), AnalysisError> {
    if points.is_empty() {
        return Err(AnalysisError::NoData("scatter chart"));
    }
    ensure_parent_dir(path)?;
    cleanup_on_err(path, render_scatter(title, points, path))
}

fn render_scatter(title: &str, points: &[AgeCostPoint], path: &Path) -> Result<(), AnalysisError> {
    let max_age = points.iter().map(|p| p.age).fold(f64::MIN, f64::max).max(1.0);
    let max_cost = points
        .iter()
        .map(|p| p.total_cost)
        .fold(f64::MIN, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..max_age * 1.05, 0.0..max_cost * 1.05)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Age (years)")
        .y_desc("Total Medication Cost ($)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new((p.age, p.total_cost), 4, BLUE.mix(0.5).filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Count plot (segmentation)
// ---------------------------------------------------------------------------

/// Vertical bars, one per segment, in the fixed order of `Segment::ALL`.
pub fn segment_counts(
    title: &str,
    counts: &[(Segment, usize)],
    path: &Path,
) -> Result<(), AnalysisError> {
    if counts.is_empty() {
        return Err(AnalysisError::NoData("segment count chart"));
    }
    ensure_parent_dir(path)?;
    cleanup_on_err(path, render_segment_counts(title, counts, path))
}

fn render_segment_counts(
    title: &str,
    counts: &[(Segment, usize)],
    path: &Path,
) -> Result<(), AnalysisError> {
    let max_count = counts.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, SCATTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0..counts.len()).into_segmented(), 0..max_count + 1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Patients")
        .x_labels(counts.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if *i < counts.len() => counts[*i].0.to_string(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, n))| {
            Rectangle::new(
                [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *n)],
                MAGENTA.mix(0.6).filled(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_png(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join("medspend_chart_tests").join(name)
    }

    #[test]
    fn test_horizontal_bar_rejects_empty_rows() {
        let result = horizontal_bar("empty", "Total Spend ($)", &[], &tmp_png("empty_bar.png"));
        assert!(matches!(result, Err(AnalysisError::NoData(_))));
    }

    #[test]
    fn test_horizontal_bar_writes_a_file() {
        let rows = vec![
            MedicationSpend {
                medication: "drug a".to_string(),
                total_spend: 500.0,
            },
            MedicationSpend {
                medication: "drug b".to_string(),
                total_spend: 300.0,
            },
        ];
        let path = tmp_png("bar.png");
        horizontal_bar("Top Medications", "Total Spend ($)", &rows, &path)
            .expect("chart should render");
        assert!(path.is_file());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_scatter_writes_a_file() {
        let points = vec![
            AgeCostPoint {
                age: 30.0,
                total_cost: 120.0,
            },
            AgeCostPoint {
                age: 62.0,
                total_cost: 910.0,
            },
        ];
        let path = tmp_png("scatter.png");
        scatter("Age vs Cost (r=0.42)", &points, &path).expect("chart should render");
        assert!(path.is_file());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_segment_counts_writes_a_file() {
        let counts: Vec<(Segment, usize)> =
            Segment::ALL.iter().map(|s| (*s, 3usize)).collect();
        let path = tmp_png("segments.png");
        segment_counts("Patient Segmentation", &counts, &path).expect("chart should render");
        assert!(path.is_file());
        let _ = std::fs::remove_file(&path);
    }
}
