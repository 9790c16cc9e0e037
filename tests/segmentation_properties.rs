//! Segmentation and concentration property tests.
//!
//! These exercise the analytical contract end to end without a database:
//! thresholds computed from a population, every patient classified, the
//! high-priority export filtered and sorted, and concentration shares
//! derived from a spend ranking.

use medspend_service::analysis::concentration::{concentration, share_percentages};
use medspend_service::analysis::segmentation::{high_priority_list, segment_counts};
use medspend_service::model::{MedicationSpend, PatientActivity, Segment};
use medspend_service::segment::{classify, SegmentThresholds};

fn patient(id: &str, encounters: i64, cost: f64) -> PatientActivity {
    PatientActivity {
        patient_id: id.to_string(),
        patient_name: format!("Patient {}", id),
        total_encounters: encounters,
        total_med_cost: cost,
    }
}

/// A small mixed population with activity on both dimensions, including
/// zero-activity patients (the outer join guarantees those exist).
fn sample_population() -> Vec<PatientActivity> {
    vec![
        patient("p01", 0, 0.0),
        patient("p02", 1, 25.0),
        patient("p03", 2, 110.0),
        patient("p04", 3, 480.0),
        patient("p05", 8, 1500.0),
        patient("p06", 9, 75.0),
        patient("p07", 1, 2100.0),
        patient("p08", 6, 900.0),
        patient("p09", 2, 60.0),
        patient("p10", 7, 3000.0),
    ]
}

// ---------------------------------------------------------------------------
// Partition properties
// ---------------------------------------------------------------------------

#[test]
fn test_every_patient_gets_exactly_one_segment() {
    let population = sample_population();
    let thresholds = SegmentThresholds::from_population(&population)
        .expect("non-empty population must yield thresholds");

    let counts = segment_counts(&population, &thresholds);
    let total: usize = counts.iter().map(|(_, n)| n).sum();

    assert_eq!(
        total,
        population.len(),
        "the four segments must partition the population with no overlap or omission"
    );
}

#[test]
fn test_segment_label_is_determined_by_the_two_predicates() {
    let thresholds = SegmentThresholds {
        cost: 50.0,
        utilization: 2.0,
    };

    for cost in [0.0, 49.9, 50.0, 51.0, 500.0] {
        for encounters in [0i64, 1, 2, 3, 20] {
            let label = classify(cost, encounters, &thresholds);
            let high_cost = cost >= thresholds.cost;
            let high_util = (encounters as f64) >= thresholds.utilization;

            let expected = match (high_cost, high_util) {
                (true, true) => Segment::HighCostHighUtil,
                (true, false) => Segment::HighCostLowUtil,
                (false, true) => Segment::LowCostHighUtil,
                (false, false) => Segment::LowCostLowUtil,
            };
            assert_eq!(
                label, expected,
                "label for (cost={}, encounters={}) must follow the two predicates",
                cost, encounters
            );
        }
    }
}

#[test]
fn test_high_spend_single_visit_patient_lands_in_high_cost_low_util() {
    let thresholds = SegmentThresholds {
        cost: 50.0,
        utilization: 2.0,
    };
    assert_eq!(classify(100.0, 1, &thresholds), Segment::HighCostLowUtil);
    assert_eq!(classify(100.0, 1, &thresholds).to_string(), "HighCost - LowUtil");
}

// ---------------------------------------------------------------------------
// Order independence
// ---------------------------------------------------------------------------

#[test]
fn test_permuted_population_yields_identical_segment_counts() {
    let population = sample_population();
    let thresholds = SegmentThresholds::from_population(&population).unwrap();
    let baseline = segment_counts(&population, &thresholds);

    // A few deterministic permutations of the same rows.
    let mut reversed = population.clone();
    reversed.reverse();
    let mut rotated = population.clone();
    rotated.rotate_left(3);
    let mut swapped = population.clone();
    swapped.swap(0, 9);
    swapped.swap(2, 5);

    for permuted in [reversed, rotated, swapped] {
        let t = SegmentThresholds::from_population(&permuted)
            .expect("permutation cannot empty the population");
        assert_eq!(t, thresholds, "thresholds must not depend on row order");
        assert_eq!(
            segment_counts(&permuted, &t),
            baseline,
            "segment counts must not depend on row order"
        );
    }
}

// ---------------------------------------------------------------------------
// High-priority export contract
// ---------------------------------------------------------------------------

#[test]
fn test_exported_rows_satisfy_both_thresholds_and_are_sorted() {
    let population = sample_population();
    let thresholds = SegmentThresholds::from_population(&population).unwrap();

    let exported = high_priority_list(&population, &thresholds);
    assert!(!exported.is_empty(), "sample population has high/high patients");

    for row in &exported {
        assert!(
            row.total_med_cost >= thresholds.cost,
            "{} exported below the cost threshold",
            row.patient_id
        );
        assert!(
            (row.total_encounters as f64) >= thresholds.utilization,
            "{} exported below the utilization threshold",
            row.patient_id
        );
    }

    for pair in exported.windows(2) {
        assert!(
            pair[0].total_med_cost >= pair[1].total_med_cost,
            "export must be sorted descending by cost"
        );
    }

    // Export count + the other three segments must account for everyone.
    let counts = segment_counts(&population, &thresholds);
    assert_eq!(counts[0].1, exported.len());
}

// ---------------------------------------------------------------------------
// Concentration shares
// ---------------------------------------------------------------------------

#[test]
fn test_concentration_shares_are_consistent() {
    let rows = vec![
        MedicationSpend { medication: "a".into(), total_spend: 500.0 },
        MedicationSpend { medication: "b".into(), total_spend: 300.0 },
        MedicationSpend { medication: "c".into(), total_spend: 100.0 },
        MedicationSpend { medication: "d".into(), total_spend: 100.0 },
    ];

    let breakdown = concentration(&rows).expect("positive spend must yield shares");
    assert!((breakdown.top_1_share_pct - 50.0).abs() < 1e-9);
    assert!((breakdown.top_5_share_pct - 100.0).abs() < 1e-9);
    assert!(breakdown.top_1_share_pct <= breakdown.top_5_share_pct);
    assert!(breakdown.top_5_share_pct <= 100.0 + 1e-9);

    let shares = share_percentages(&rows).unwrap();
    let sum: f64 = shares.iter().sum();
    assert!(
        (sum - 100.0).abs() < 1e-9,
        "per-medication shares must sum to 100, got {}",
        sum
    );
}
