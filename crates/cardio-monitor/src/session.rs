//! Monitoring session: ties generation, analysis, and history together

use crate::backend::HeartbeatBackend;
use cardio_analysis::{
    history_csv, ConditionClassifier, HealthReport, ReportGenerator, TrendAnalyzer, TrendInsight,
};
use cardio_core::{
    round1, round2, CardioResult, Condition, HistoryAggregator, HistoryRecord, Reading,
};
use cardio_simulation::{
    auto_risk_score, manual_risk_score, validate_manual_rate, ConditionSelector, SynthesizerConfig,
    WaveformSynthesizer,
};
use chrono::Local;

/// How a sample is requested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleMode {
    /// Condition and base rate drawn by the selector
    Auto,
    /// Caller-supplied target rate in BPM
    Manual(f32),
}

/// One completed sampling operation
#[derive(Debug, Clone)]
pub struct MonitorSample {
    pub reading: Reading,
    pub risk_score: f32,
    /// Classifier verdict over the produced series
    pub condition: Condition,
}

/// Raised when a recorded average leaves the 60-100 BPM band
#[derive(Debug, Clone)]
pub struct RateAlert {
    pub condition: Condition,
    pub avg_bpm: f32,
    pub timestamp: String,
}

/// Engine facade owning the selector, synthesizer, and history.
///
/// One session is the single producer for its history; consumers read
/// through the accessors.
pub struct MonitorSession {
    selector: ConditionSelector,
    synthesizer: WaveformSynthesizer,
    history: HistoryAggregator,
    backend: Option<Box<dyn HeartbeatBackend>>,
    current: Option<MonitorSample>,
}

impl MonitorSession {
    pub fn new(config: SynthesizerConfig) -> CardioResult<Self> {
        let seed = config.seed;
        Ok(MonitorSession {
            selector: ConditionSelector::new(seed),
            synthesizer: WaveformSynthesizer::new(config)?,
            history: HistoryAggregator::new(),
            backend: None,
            current: None,
        })
    }

    /// Attach a live data source; synthesis remains the fallback
    pub fn with_backend(mut self, backend: Box<dyn HeartbeatBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Produce one sample: reading, risk score, and classifier verdict.
    ///
    /// Auto mode consults the live source first and falls back to the
    /// synthesizer on any failure, which is never surfaced to the caller.
    /// Manual mode validates the target before any state changes.
    pub fn generate_sample(&mut self, mode: SampleMode) -> CardioResult<MonitorSample> {
        let (reading, risk_score) = match mode {
            SampleMode::Auto => match self.backend_reading() {
                Some(pair) => pair,
                None => {
                    let target = self.selector.draw();
                    let reading = self.synthesizer.generate(target.base_rate, target.ectopic)?;
                    let risk = auto_risk_score(target.base_rate, target.ectopic);
                    (reading, risk)
                }
            },
            SampleMode::Manual(bpm) => {
                let bpm = validate_manual_rate(bpm)?;
                let reading = self.synthesizer.generate(bpm, false)?;
                (reading, manual_risk_score(bpm))
            }
        };

        let verdict = ConditionClassifier::classify(&reading);
        let sample = MonitorSample {
            reading,
            risk_score,
            condition: verdict.condition,
        };
        self.current = Some(sample.clone());
        Ok(sample)
    }

    /// Append the sample to the bounded history.
    ///
    /// Returns an alert when the recorded average falls outside 60-100 BPM.
    pub fn record_sample(&mut self, sample: &MonitorSample) -> Option<RateAlert> {
        let stats = sample.reading.stats();
        let avg_bpm = round1(stats.mean);
        let timestamp = Local::now().format("%H:%M:%S").to_string();

        self.history.append(HistoryRecord {
            timestamp: timestamp.clone(),
            avg_bpm,
            risk_score: sample.risk_score,
            max_bpm: stats.max.round(),
            min_bpm: stats.min.round(),
            reading: sample.reading.clone(),
        });

        if avg_bpm > 100.0 {
            Some(RateAlert {
                condition: Condition::Tachycardia,
                avg_bpm,
                timestamp,
            })
        } else if avg_bpm < 60.0 {
            Some(RateAlert {
                condition: Condition::Bradycardia,
                avg_bpm,
                timestamp,
            })
        } else {
            None
        }
    }

    /// Trend insight, absent until three records exist
    pub fn get_trend(&self) -> Option<TrendInsight> {
        TrendAnalyzer::analyze(self.history.snapshot())
    }

    /// Full-history report, absent while the history is empty
    pub fn get_report(&self) -> Option<HealthReport> {
        ReportGenerator::generate(self.history.snapshot())
    }

    /// CSV rendering of the stored history
    pub fn export_csv(&self) -> String {
        history_csv(self.history.snapshot())
    }

    /// Latest sample, if one was produced
    pub fn current(&self) -> Option<&MonitorSample> {
        self.current.as_ref()
    }

    /// Classifier verdict for the latest sample; `Unknown` before the first
    pub fn condition(&self) -> Condition {
        self.current
            .as_ref()
            .map(|s| s.condition)
            .unwrap_or(Condition::Unknown)
    }

    pub fn history(&self) -> &HistoryAggregator {
        &self.history
    }

    /// Try the live source; any problem downgrades to the synthesizer
    fn backend_reading(&mut self) -> Option<(Reading, f32)> {
        let backend = self.backend.as_mut()?;
        let expected = self.synthesizer.config().sample_count;

        match backend.fetch_heartbeat(expected) {
            Ok(sample) if sample.values.len() == expected => match Reading::new(sample.values) {
                Ok(reading) => Some((reading, round2(sample.predicted_risk.clamp(0.0, 1.0)))),
                Err(e) => {
                    tracing::debug!("live reading rejected: {}", e);
                    None
                }
            },
            Ok(sample) => {
                tracing::debug!(
                    "live reading had {} samples, expected {}",
                    sample.values.len(),
                    expected
                );
                None
            }
            Err(e) => {
                tracing::debug!("live source unavailable: {}", e);
                None
            }
        }
    }
}
