//! Reading: immutable container for one synthesized heart-rate series

use crate::error::{CardioError, CardioResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round to one decimal digit, the precision of displayed averages
#[inline]
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal digits, the precision of stored samples and risk scores
#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// One heart-rate reading: a fixed-length ordered series of BPM samples.
///
/// Immutable once produced; samples are only reachable through the
/// borrowing accessor.
#[derive(Debug, Clone)]
pub struct Reading {
    id: Uuid,
    samples: Vec<f32>,
    created_at: u64,
}

impl Reading {
    /// Create a new reading, validating the sample payload
    pub fn new(samples: Vec<f32>) -> CardioResult<Self> {
        if samples.is_empty() {
            return Err(CardioError::InvalidReading {
                reason: "sample series is empty".to_string(),
            });
        }

        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(CardioError::InvalidReading {
                reason: format!("non-finite sample value {}", bad),
            });
        }

        Ok(Reading {
            id: Uuid::new_v4(),
            samples,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_millis() as u64,
        })
    }

    /// Unique identifier for this reading
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Ordered BPM samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples in the series
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the series is empty (never true for a validated reading)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Calculate basic statistics over the series
    pub fn stats(&self) -> ReadingStats {
        ReadingStats::calculate(&self.samples)
    }
}

/// Basic statistics for a sample series
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadingStats {
    pub mean: f32,
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
}

impl ReadingStats {
    pub fn calculate(data: &[f32]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let sum: f32 = data.iter().sum();
        let mean = sum / data.len() as f32;

        let variance: f32 = data.iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f32>() / data.len() as f32;
        let std_dev = variance.sqrt();

        let min = data.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            std_dev,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_creation() {
        let samples = vec![round2(72.0); 60];
        let reading = Reading::new(samples).unwrap();

        assert_eq!(reading.len(), 60);
        assert!(!reading.is_empty());
    }

    #[test]
    fn test_reading_rejects_empty_series() {
        let result = Reading::new(Vec::new());
        assert!(matches!(result, Err(CardioError::InvalidReading { .. })));
    }

    #[test]
    fn test_reading_rejects_non_finite_samples() {
        let mut samples = vec![72.0; 60];
        samples[30] = f32::NAN;
        assert!(Reading::new(samples).is_err());

        let mut samples = vec![72.0; 60];
        samples[10] = f32::INFINITY;
        assert!(Reading::new(samples).is_err());
    }

    #[test]
    fn test_stats_calculation() {
        let data = vec![70.0, 72.0, 74.0, 76.0];
        let stats = ReadingStats::calculate(&data);

        assert_eq!(stats.mean, 73.0);
        assert_eq!(stats.min, 70.0);
        assert_eq!(stats.max, 76.0);
        // population std dev of [70, 72, 74, 76] is sqrt(5)
        assert!((stats.std_dev - 5.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(57.126), 57.13);
        assert_eq!(round2(57.124), 57.12);
        assert_eq!(round1(72.46), 72.5);

        // rounding is idempotent
        let v = round2(83.456);
        assert_eq!(round2(v), v);
    }
}
