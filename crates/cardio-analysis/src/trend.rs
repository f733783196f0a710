//! Short-horizon trend heuristic over the most recent measurements

use cardio_core::HistoryRecord;
use serde::{Deserialize, Serialize};

/// Minimum history depth before a trend is attempted
const MIN_RECORDS: usize = 3;
/// Window of most-recent records examined
const WINDOW: usize = 5;
/// Average delta, in BPM, that counts as a rising or falling trend
const TREND_DELTA: f32 = 10.0;
/// Recent average above which a flat trend is called sustained high
const SUSTAINED_HIGH: f32 = 90.0;
/// Recent average below which a flat trend is called sustained low
const SUSTAINED_LOW: f32 = 65.0;

/// Outcome of the trend policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendKind {
    Rising,
    Falling,
    SustainedHigh,
    SustainedLow,
    Stable,
}

/// Insight and recommendation derived from recent history
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendInsight {
    pub kind: TrendKind,
    /// Newest average minus the oldest within the window, in BPM
    pub trend: f32,
    /// Mean of the window averages, in BPM
    pub avg_recent: f32,
}

impl TrendInsight {
    pub fn insight(&self) -> &'static str {
        match self.kind {
            TrendKind::Rising => "Heart rate is trending upward",
            TrendKind::Falling => "Heart rate is trending downward",
            TrendKind::SustainedHigh => "Heart rate has stayed elevated",
            TrendKind::SustainedLow => "Heart rate is low but stable",
            TrendKind::Stable => "Heart rate is stable within the normal range",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self.kind {
            TrendKind::Rising => "Rest, hydrate, and avoid strenuous activity",
            TrendKind::Falling => "Consider light activity to improve circulation",
            TrendKind::SustainedHigh => "Check stress and caffeine intake, consult a doctor if it persists",
            TrendKind::SustainedLow => "Good fitness indicator, monitor for dizziness",
            TrendKind::Stable => "Keep up the healthy lifestyle",
        }
    }
}

/// Heuristic insight from up to the five most recent records
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Returns `None` until at least three records exist
    pub fn analyze(records: &[HistoryRecord]) -> Option<TrendInsight> {
        if records.len() < MIN_RECORDS {
            return None;
        }

        let window: Vec<f32> = records.iter()
            .take(WINDOW)
            .map(|r| r.avg_bpm)
            .collect();

        let trend = window[0] - window[window.len() - 1];
        let avg_recent = window.iter().sum::<f32>() / window.len() as f32;

        let kind = if trend.abs() > TREND_DELTA {
            if trend > 0.0 {
                TrendKind::Rising
            } else {
                TrendKind::Falling
            }
        } else if avg_recent > SUSTAINED_HIGH {
            TrendKind::SustainedHigh
        } else if avg_recent < SUSTAINED_LOW {
            TrendKind::SustainedLow
        } else {
            TrendKind::Stable
        };

        Some(TrendInsight {
            kind,
            trend,
            avg_recent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_core::{round2, Reading};

    /// Build most-recent-first records with the given averages
    fn records(avgs: &[f32]) -> Vec<HistoryRecord> {
        avgs.iter()
            .enumerate()
            .map(|(i, &avg)| HistoryRecord {
                timestamp: format!("09:00:{:02}", i),
                avg_bpm: avg,
                risk_score: 0.1,
                max_bpm: avg + 10.0,
                min_bpm: avg - 10.0,
                reading: Reading::new(vec![round2(avg); 60]).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_too_few_records() {
        assert!(TrendAnalyzer::analyze(&records(&[])).is_none());
        assert!(TrendAnalyzer::analyze(&records(&[72.0, 74.0])).is_none());
    }

    #[test]
    fn test_rising_trend() {
        let insight = TrendAnalyzer::analyze(&records(&[95.0, 90.0, 85.0, 82.0, 80.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::Rising);
        assert_eq!(insight.trend, 15.0);
    }

    #[test]
    fn test_falling_trend() {
        let insight = TrendAnalyzer::analyze(&records(&[70.0, 75.0, 80.0, 85.0, 90.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::Falling);
        assert_eq!(insight.trend, -20.0);
    }

    #[test]
    fn test_sustained_high() {
        let insight = TrendAnalyzer::analyze(&records(&[93.0, 92.0, 94.0, 91.0, 93.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::SustainedHigh);
    }

    #[test]
    fn test_sustained_low() {
        let insight = TrendAnalyzer::analyze(&records(&[60.0, 62.0, 61.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::SustainedLow);
    }

    #[test]
    fn test_stable_normal() {
        let insight = TrendAnalyzer::analyze(&records(&[72.0, 74.0, 71.0, 73.0, 72.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::Stable);
        assert!(!insight.insight().is_empty());
        assert!(!insight.recommendation().is_empty());
    }

    #[test]
    fn test_window_is_capped_at_five() {
        // older entries past the window must not affect the verdict
        let insight =
            TrendAnalyzer::analyze(&records(&[72.0, 73.0, 72.0, 74.0, 72.0, 150.0, 20.0])).unwrap();
        assert_eq!(insight.kind, TrendKind::Stable);
    }
}
