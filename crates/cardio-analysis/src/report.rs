//! Full-history statistical rollup

use cardio_core::{round1, round2, HistoryRecord};
use serde::{Deserialize, Serialize};

/// Fraction of out-of-band measurements that makes a condition "frequent"
const SKEW_FRACTION: f32 = 0.3;

/// Overall condition label for the aggregated history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallCondition {
    FrequentTachycardia,
    FrequentBradycardia,
    Excellent,
    Normal,
}

impl std::fmt::Display for OverallCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallCondition::FrequentTachycardia => write!(f, "Frequent tachycardia"),
            OverallCondition::FrequentBradycardia => write!(f, "Frequent bradycardia"),
            OverallCondition::Excellent => write!(f, "Excellent"),
            OverallCondition::Normal => write!(f, "Normal"),
        }
    }
}

/// Statistical report over the full history snapshot.
///
/// Ephemeral: recomputed on every request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Mean of per-record averages, one decimal
    pub overall_avg: f32,
    pub overall_max: f32,
    pub overall_min: f32,
    /// Records with an average above 100 BPM
    pub high_count: usize,
    /// Records with an average below 60 BPM
    pub low_count: usize,
    /// Records with an average in [60, 100] BPM
    pub normal_count: usize,
    /// Mean risk score, two decimals
    pub avg_risk: f32,
    pub condition: OverallCondition,
    pub total_measurements: usize,
}

impl HealthReport {
    /// Pretty JSON rendering for the presentation layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Stateless projection of the history into a [`HealthReport`]
pub struct ReportGenerator;

impl ReportGenerator {
    /// Returns `None` while the history is empty
    pub fn generate(records: &[HistoryRecord]) -> Option<HealthReport> {
        if records.is_empty() {
            return None;
        }

        let total = records.len();
        let avgs: Vec<f32> = records.iter().map(|r| r.avg_bpm).collect();

        let overall_avg = round1(avgs.iter().sum::<f32>() / total as f32);
        let overall_max = round1(avgs.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b)));
        let overall_min = round1(avgs.iter().fold(f32::INFINITY, |a, &b| a.min(b)));

        let high_count = avgs.iter().filter(|&&v| v > 100.0).count();
        let low_count = avgs.iter().filter(|&&v| v < 60.0).count();
        let normal_count = avgs.iter().filter(|&&v| (60.0..=100.0).contains(&v)).count();

        let avg_risk = round2(records.iter().map(|r| r.risk_score).sum::<f32>() / total as f32);

        let skew_limit = total as f32 * SKEW_FRACTION;
        let condition = if high_count as f32 > skew_limit {
            OverallCondition::FrequentTachycardia
        } else if low_count as f32 > skew_limit {
            OverallCondition::FrequentBradycardia
        } else if (60.0..=80.0).contains(&overall_avg) {
            OverallCondition::Excellent
        } else {
            OverallCondition::Normal
        };

        Some(HealthReport {
            overall_avg,
            overall_max,
            overall_min,
            high_count,
            low_count,
            normal_count,
            avg_risk,
            condition,
            total_measurements: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_core::{round2, Reading};

    fn records(entries: &[(f32, f32)]) -> Vec<HistoryRecord> {
        entries
            .iter()
            .enumerate()
            .map(|(i, &(avg, risk))| HistoryRecord {
                timestamp: format!("14:30:{:02}", i),
                avg_bpm: avg,
                risk_score: risk,
                max_bpm: avg + 12.0,
                min_bpm: avg - 8.0,
                reading: Reading::new(vec![round2(avg); 60]).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_empty_history_yields_no_report() {
        assert!(ReportGenerator::generate(&[]).is_none());
    }

    #[test]
    fn test_counts_partition_history() {
        let report = ReportGenerator::generate(&records(&[
            (55.0, 0.3),
            (72.0, 0.1),
            (85.0, 0.1),
            (110.0, 0.5),
            (118.0, 0.5),
        ]))
        .unwrap();

        assert_eq!(report.total_measurements, 5);
        assert_eq!(report.high_count, 2);
        assert_eq!(report.low_count, 1);
        assert_eq!(report.normal_count, 2);
        assert_eq!(
            report.high_count + report.low_count + report.normal_count,
            report.total_measurements
        );
    }

    #[test]
    fn test_aggregates() {
        let report =
            ReportGenerator::generate(&records(&[(70.0, 0.1), (74.0, 0.2), (78.0, 0.3)])).unwrap();

        assert_eq!(report.overall_avg, 74.0);
        assert_eq!(report.overall_max, 78.0);
        assert_eq!(report.overall_min, 70.0);
        assert_eq!(report.avg_risk, 0.2);
    }

    #[test]
    fn test_frequent_tachycardia_label() {
        let report = ReportGenerator::generate(&records(&[
            (110.0, 0.5),
            (115.0, 0.5),
            (72.0, 0.1),
            (74.0, 0.1),
        ]))
        .unwrap();
        assert_eq!(report.condition, OverallCondition::FrequentTachycardia);
    }

    #[test]
    fn test_frequent_bradycardia_label() {
        let report = ReportGenerator::generate(&records(&[
            (55.0, 0.3),
            (56.0, 0.3),
            (72.0, 0.1),
            (74.0, 0.1),
        ]))
        .unwrap();
        assert_eq!(report.condition, OverallCondition::FrequentBradycardia);
    }

    #[test]
    fn test_excellent_band() {
        let report =
            ReportGenerator::generate(&records(&[(72.0, 0.1), (75.0, 0.1), (78.0, 0.1)])).unwrap();
        assert_eq!(report.condition, OverallCondition::Excellent);
    }

    #[test]
    fn test_normal_label_above_excellent_band() {
        let report =
            ReportGenerator::generate(&records(&[(85.0, 0.1), (88.0, 0.1), (86.0, 0.1)])).unwrap();
        assert_eq!(report.condition, OverallCondition::Normal);
    }

    #[test]
    fn test_report_serializes() {
        let report =
            ReportGenerator::generate(&records(&[(72.0, 0.1), (75.0, 0.1), (78.0, 0.1)])).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"total_measurements\": 3"));

        let parsed: HealthReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.condition, report.condition);
    }
}
