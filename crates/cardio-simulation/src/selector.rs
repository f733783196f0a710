//! Condition selection and risk scoring for sampling operations

use cardio_core::{round2, CardioError, CardioResult, Condition};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Accepted band for manually entered target rates, in BPM
pub const MANUAL_MIN_BPM: f32 = 40.0;
pub const MANUAL_MAX_BPM: f32 = 200.0;

/// Draw table for auto mode. Normal appears twice and therefore lands with
/// double weight.
const CONDITION_TABLE: [Condition; 5] = [
    Condition::Normal,
    Condition::Bradycardia,
    Condition::Tachycardia,
    Condition::Arrhythmia,
    Condition::Normal,
];

/// Target picked for one auto-mode sampling operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SampleTarget {
    /// Condition the base rate was drawn for
    pub condition: Condition,
    /// Base heart rate in BPM
    pub base_rate: f32,
    /// Whether ectopic-beat noise is injected during synthesis
    pub ectopic: bool,
}

/// Seeded selector for auto-mode condition and base-rate draws
pub struct ConditionSelector {
    rng: rand::rngs::StdRng,
}

impl ConditionSelector {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos() as u64
        });

        ConditionSelector {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a condition and a base rate from its characteristic range
    pub fn draw(&mut self) -> SampleTarget {
        let condition = CONDITION_TABLE[self.rng.gen_range(0..CONDITION_TABLE.len())];

        let base_rate = match condition {
            Condition::Bradycardia => self.rng.gen_range(55.0..60.0),
            Condition::Tachycardia => self.rng.gen_range(105.0..120.0),
            Condition::Arrhythmia => self.rng.gen_range(68.0..80.0),
            _ => self.rng.gen_range(72.0..82.0),
        };

        SampleTarget {
            condition,
            base_rate,
            ectopic: condition == Condition::Arrhythmia,
        }
    }
}

/// Validate a caller-supplied target rate.
///
/// Rejects non-finite values and anything outside [40, 200] before any
/// state is touched.
pub fn validate_manual_rate(bpm: f32) -> CardioResult<f32> {
    if !bpm.is_finite() || !(MANUAL_MIN_BPM..=MANUAL_MAX_BPM).contains(&bpm) {
        return Err(CardioError::InvalidTargetRate {
            bpm,
            valid_range: "40-200 bpm",
        });
    }
    Ok(bpm)
}

/// Additive risk score for auto-mode samples, clamped to [0, 1]
pub fn auto_risk_score(base_rate: f32, ectopic: bool) -> f32 {
    let mut risk: f32 = 0.0;
    if base_rate < 60.0 {
        risk += 0.3;
    }
    if base_rate > 100.0 {
        risk += 0.5;
    }
    if ectopic {
        risk += 0.4;
    }
    round2(risk.min(1.0))
}

/// Banded risk score for manual entries. This path stays separate from the
/// auto-mode formula.
pub fn manual_risk_score(bpm: f32) -> f32 {
    if bpm < 60.0 {
        0.3
    } else if bpm > 100.0 {
        0.5
    } else {
        0.1
    }
}
