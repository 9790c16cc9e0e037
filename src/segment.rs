/// Quadrant segmentation thresholds and classification.
///
/// Thresholds are the 75th percentiles of spend and utilization computed
/// over the full patient population for one run — they are recomputed from
/// current data every time, never persisted. Classification is a pure
/// function of one patient's numbers against those two thresholds, so it
/// is unit-testable without a database.

use crate::model::{PatientActivity, Segment};
use crate::stats::percentile;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Quantile used for both the cost and the utilization cut. Patients at or
/// above the cut are "high" on that dimension (top quartile).
pub const HIGH_QUANTILE: f64 = 0.75;

/// The two independent cuts a patient is compared against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentThresholds {
    pub cost: f64,
    pub utilization: f64,
}

impl SegmentThresholds {
    /// Compute both thresholds over the full population.
    ///
    /// Returns `None` for an empty population — there is no quartile of
    /// nothing, and the caller reports that as a no-data condition.
    pub fn from_population(patients: &[PatientActivity]) -> Option<SegmentThresholds> {
        let costs: Vec<f64> = patients.iter().map(|p| p.total_med_cost).collect();
        let encounters: Vec<f64> = patients.iter().map(|p| p.total_encounters as f64).collect();

        Some(SegmentThresholds {
            cost: percentile(&costs, HIGH_QUANTILE)?,
            utilization: percentile(&encounters, HIGH_QUANTILE)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Assign exactly one quadrant label.
///
/// Both comparisons are inclusive: a patient sitting exactly on a
/// threshold counts as "high" for that dimension.
pub fn classify(cost: f64, encounters: i64, t: &SegmentThresholds) -> Segment {
    let high_cost = cost >= t.cost;
    let high_util = (encounters as f64) >= t.utilization;

    match (high_cost, high_util) {
        (true, true) => Segment::HighCostHighUtil,
        (true, false) => Segment::HighCostLowUtil,
        (false, true) => Segment::LowCostHighUtil,
        (false, false) => Segment::LowCostLowUtil,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: &str, encounters: i64, cost: f64) -> PatientActivity {
        PatientActivity {
            patient_id: id.to_string(),
            patient_name: format!("Patient {}", id),
            total_encounters: encounters,
            total_med_cost: cost,
        }
    }

    const T: SegmentThresholds = SegmentThresholds {
        cost: 50.0,
        utilization: 2.0,
    };

    // --- Quadrant assignment ------------------------------------------------

    #[test]
    fn test_all_four_quadrants_are_reachable() {
        assert_eq!(classify(100.0, 5, &T), Segment::HighCostHighUtil);
        assert_eq!(classify(100.0, 1, &T), Segment::HighCostLowUtil);
        assert_eq!(classify(10.0, 5, &T), Segment::LowCostHighUtil);
        assert_eq!(classify(10.0, 1, &T), Segment::LowCostLowUtil);
    }

    #[test]
    fn test_high_spend_low_visits_patient_is_high_cost_low_util() {
        // (cost, util) = (100, 1) against (Tc=50, Tu=2)
        assert_eq!(classify(100.0, 1, &T), Segment::HighCostLowUtil);
    }

    #[test]
    fn test_patient_exactly_at_both_thresholds_counts_as_high() {
        // Inclusive comparison on both dimensions.
        assert_eq!(classify(50.0, 2, &T), Segment::HighCostHighUtil);
    }

    #[test]
    fn test_patient_just_below_threshold_is_low() {
        assert_eq!(classify(49.999, 1, &T), Segment::LowCostLowUtil);
    }

    #[test]
    fn test_classification_is_a_partition() {
        // Every (cost, util) grid point gets exactly one label, and the
        // per-label counts sum back to the input size.
        let costs = [0.0, 25.0, 50.0, 75.0];
        let utils = [0i64, 1, 2, 3];
        let mut counts = std::collections::HashMap::new();

        for &c in &costs {
            for &u in &utils {
                *counts.entry(classify(c, u, &T)).or_insert(0usize) += 1;
            }
        }

        let total: usize = counts.values().sum();
        assert_eq!(total, costs.len() * utils.len());
        // 2 cost values >= 50, 2 util values >= 2 → 4 per quadrant.
        for segment in Segment::ALL {
            assert_eq!(counts.get(&segment), Some(&4), "uneven quadrant: {}", segment);
        }
    }

    // --- Threshold computation ----------------------------------------------

    #[test]
    fn test_thresholds_none_for_empty_population() {
        assert_eq!(SegmentThresholds::from_population(&[]), None);
    }

    #[test]
    fn test_thresholds_are_permutation_invariant() {
        let a = vec![
            patient("1", 1, 100.0),
            patient("2", 4, 400.0),
            patient("3", 2, 200.0),
            patient("4", 3, 300.0),
        ];
        let mut b = a.clone();
        b.reverse();
        b.swap(0, 2);

        let ta = SegmentThresholds::from_population(&a).unwrap();
        let tb = SegmentThresholds::from_population(&b).unwrap();
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_thresholds_match_linear_interpolation() {
        // Costs [100, 200, 300, 400] → p75 at position 2.25 → 325.
        let pop = vec![
            patient("1", 1, 100.0),
            patient("2", 2, 200.0),
            patient("3", 3, 300.0),
            patient("4", 4, 400.0),
        ];
        let t = SegmentThresholds::from_population(&pop).unwrap();
        assert!((t.cost - 325.0).abs() < 1e-9, "cost threshold: {}", t.cost);
        assert!((t.utilization - 3.25).abs() < 1e-9, "util threshold: {}", t.utilization);
    }
}
