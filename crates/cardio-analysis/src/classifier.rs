//! Diagnostic classification of a reading from its numeric series alone

use cardio_core::{round1, Condition, Reading};
use serde::{Deserialize, Serialize};

/// Spread above which an in-range series is labeled irregular, in BPM
const IRREGULARITY_THRESHOLD: f32 = 12.0;

/// Classifier verdict with the statistics it was derived from
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Classification {
    pub condition: Condition,
    /// Series mean, one decimal
    pub mean_bpm: f32,
    /// Population standard deviation about the rounded mean
    pub std_dev: f32,
}

/// Labels readings independently of their generation-time condition.
///
/// The verdict is purely a function of the series and may disagree with the
/// condition the sample was synthesized for.
pub struct ConditionClassifier;

impl ConditionClassifier {
    pub fn classify(reading: &Reading) -> Classification {
        let samples = reading.samples();

        let mean_bpm = round1(samples.iter().sum::<f32>() / samples.len() as f32);
        let variance = samples.iter()
            .map(|v| (v - mean_bpm).powi(2))
            .sum::<f32>() / samples.len() as f32;
        let std_dev = variance.sqrt();

        let condition = if mean_bpm < 60.0 {
            Condition::Bradycardia
        } else if mean_bpm > 100.0 {
            Condition::Tachycardia
        } else if std_dev > IRREGULARITY_THRESHOLD {
            Condition::Arrhythmia
        } else {
            Condition::Normal
        };

        Classification {
            condition,
            mean_bpm,
            std_dev,
        }
    }
}
