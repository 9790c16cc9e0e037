/// Analysis 3: four-quadrant patient segmentation.
///
/// Aggregates per-patient encounters and medication spend with an outer
/// join (patients with no activity still count), cuts the population at
/// the 75th percentile on both dimensions, charts the segment counts, and
/// exports the HighCost-HighUtil patients to a spreadsheet.

use postgres::Client;

use crate::config::Settings;
use crate::logging::{self, Stage};
use crate::model::{AnalysisError, PatientActivity, Segment};
use crate::report::summary::SegmentationSummary;
use crate::report::{charts, excel};
use crate::segment::{classify, SegmentThresholds};

const CHART_FILE: &str = "patient_segmentation.png";
const EXPORT_FILE: &str = "high_priority_patients.xlsx";

const PATIENT_ACTIVITY_QUERY: &str = r#"
    SELECT
        p."Id" AS patient_id,
        p."FIRST" || ' ' || p."LAST" AS patient_name,
        COUNT(DISTINCT e."Id") AS total_encounters,
        COALESCE(SUM(m.total_cost), 0)::FLOAT8 AS total_med_cost
    FROM raw.patients p
    LEFT JOIN raw.encounters e ON p."Id" = e."PATIENT"
    LEFT JOIN mart.medications m ON p."Id" = m.patient_id
    GROUP BY 1, 2
"#;

pub fn run(client: &mut Client, settings: &Settings) -> Result<SegmentationSummary, AnalysisError> {
    println!("\n👥 ANALYSIS 3: Patient Segmentation (4-Quadrant)");

    let patients = fetch_patient_activity(client)?;
    let thresholds = SegmentThresholds::from_population(&patients)
        .ok_or(AnalysisError::NoData("patient segmentation"))?;

    println!("\n📐 SEGMENTATION LOGIC:");
    println!(
        "   - High Cost Threshold : >= ${:.2} (Top 25%)",
        thresholds.cost
    );
    println!(
        "   - High Util Threshold : >= {:.0} Visits (Top 25%)",
        thresholds.utilization
    );

    let counts = segment_counts(&patients, &thresholds);

    let chart_path = settings.viz_dir.join(CHART_FILE);
    charts::segment_counts("Patient Segmentation Distribution", &counts, &chart_path)?;
    logging::info(
        Stage::Chart,
        &format!("🎉 Chart saved: {}", chart_path.display()),
    );

    println!("\n🚨 EXPORTING HIGH PRIORITY LIST:");
    let high_priority = high_priority_list(&patients, &thresholds);
    let export_path = settings.analysis_dir.join(EXPORT_FILE);
    excel::write_patient_list(&high_priority, &export_path)?;
    logging::info(
        Stage::Export,
        &format!("📁 Client-ready spreadsheet saved to: {}", export_path.display()),
    );
    println!("   ℹ️  Total High Priority Patients: {}", high_priority.len());

    Ok(SegmentationSummary {
        cost_threshold: thresholds.cost,
        utilization_threshold: thresholds.utilization,
        segment_counts: counts
            .iter()
            .map(|(s, n)| (s.to_string(), *n))
            .collect(),
        high_priority_count: high_priority.len(),
    })
}

/// Per-segment patient counts in the fixed display order of
/// `Segment::ALL`, zero-filled so all four bars always appear.
pub fn segment_counts(
    patients: &[PatientActivity],
    thresholds: &SegmentThresholds,
) -> Vec<(Segment, usize)> {
    let mut counts: Vec<(Segment, usize)> = Segment::ALL.iter().map(|s| (*s, 0)).collect();

    for patient in patients {
        let label = classify(patient.total_med_cost, patient.total_encounters, thresholds);
        if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == label) {
            entry.1 += 1;
        }
    }

    counts
}

/// HighCost-HighUtil patients, sorted descending by spend. The sort is
/// stable, so equal-cost patients keep their query order.
pub fn high_priority_list(
    patients: &[PatientActivity],
    thresholds: &SegmentThresholds,
) -> Vec<PatientActivity> {
    let mut list: Vec<PatientActivity> = patients
        .iter()
        .filter(|p| {
            classify(p.total_med_cost, p.total_encounters, thresholds)
                == Segment::HighCostHighUtil
        })
        .cloned()
        .collect();

    list.sort_by(|a, b| {
        b.total_med_cost
            .partial_cmp(&a.total_med_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    list
}

fn fetch_patient_activity(client: &mut Client) -> Result<Vec<PatientActivity>, AnalysisError> {
    let rows = client.query(PATIENT_ACTIVITY_QUERY, &[])?;
    logging::debug(
        Stage::Query,
        &format!("patient-activity query returned {} rows", rows.len()),
    );

    Ok(rows
        .iter()
        .map(|row| PatientActivity {
            patient_id: row.get(0),
            patient_name: row.get(1),
            total_encounters: row.get(2),
            total_med_cost: row.get(3),
        })
        .collect())
}
