//! Continuous sampling task with command-driven control
//!
//! One background loop owns the sampling cadence and is the session's only
//! producer. Each tick runs the whole sample-and-record operation inline,
//! so operations are serialized, never interleaved.

use crate::session::{MonitorSample, MonitorSession, SampleMode};
use cardio_core::CardioResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::time::{interval, Duration};

/// Fixed set of supported sampling cadences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleInterval {
    Rapid,
    Fast,
    Standard,
    Slow,
}

impl SampleInterval {
    pub fn duration(&self) -> Duration {
        match self {
            SampleInterval::Rapid => Duration::from_millis(500),
            SampleInterval::Fast => Duration::from_millis(1000),
            SampleInterval::Standard => Duration::from_millis(2000),
            SampleInterval::Slow => Duration::from_millis(3000),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SampleInterval::Rapid => "every 0.5s",
            SampleInterval::Fast => "every 1s",
            SampleInterval::Standard => "every 2s",
            SampleInterval::Slow => "every 3s",
        }
    }

    pub fn all() -> [SampleInterval; 4] {
        [
            SampleInterval::Rapid,
            SampleInterval::Fast,
            SampleInterval::Standard,
            SampleInterval::Slow,
        ]
    }
}

impl Default for SampleInterval {
    fn default() -> Self {
        SampleInterval::Standard
    }
}

/// Commands for controlling the sampling loop
#[derive(Debug, Clone)]
pub enum SamplingCommand {
    Start,
    /// Cancels only the pending trigger; a sample already underway
    /// completes and is still appended
    Stop,
    SetInterval(SampleInterval),
    /// Take a single sample regardless of the running state
    SampleOnce,
}

/// Sampling loop statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingStats {
    pub is_running: bool,
    pub samples_taken: u64,
    pub last_update: u64,
}

/// Background sampling task bound to one [`MonitorSession`]
pub struct SamplingService {
    session: Arc<Mutex<MonitorSession>>,
    current_interval: SampleInterval,
    sample_sender: broadcast::Sender<MonitorSample>,
    command_receiver: mpsc::Receiver<SamplingCommand>,
    command_sender: mpsc::Sender<SamplingCommand>,
    is_running: Arc<Mutex<bool>>,
    stats: Arc<Mutex<SamplingStats>>,
}

impl SamplingService {
    pub fn new(session: Arc<Mutex<MonitorSession>>, cadence: SampleInterval) -> Self {
        let (sample_sender, _) = broadcast::channel(64);
        let (command_sender, command_receiver) = mpsc::channel(32);

        let stats = SamplingStats {
            is_running: false,
            samples_taken: 0,
            last_update: now_millis(),
        };

        SamplingService {
            session,
            current_interval: cadence,
            sample_sender,
            command_receiver,
            command_sender,
            is_running: Arc::new(Mutex::new(false)),
            stats: Arc::new(Mutex::new(stats)),
        }
    }

    /// Get a receiver for recorded samples
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorSample> {
        self.sample_sender.subscribe()
    }

    /// Get a sender for control commands
    pub fn command_handle(&self) -> mpsc::Sender<SamplingCommand> {
        self.command_sender.clone()
    }

    /// Shared statistics handle
    pub fn stats_handle(&self) -> Arc<Mutex<SamplingStats>> {
        self.stats.clone()
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.lock().await
    }

    /// Run the sampling loop until the command channel closes
    pub async fn run(&mut self) -> CardioResult<()> {
        let mut ticker = interval(self.current_interval.duration());
        tracing::info!("sampling service started, cadence {}", self.current_interval.label());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if *self.is_running.lock().await {
                        self.take_sample().await;
                    }
                }

                command = self.command_receiver.recv() => {
                    match command {
                        Some(SamplingCommand::Start) => {
                            *self.is_running.lock().await = true;
                            self.stats.lock().await.is_running = true;
                            tracing::info!("continuous sampling enabled");
                        }
                        Some(SamplingCommand::Stop) => {
                            *self.is_running.lock().await = false;
                            self.stats.lock().await.is_running = false;
                            tracing::info!("continuous sampling stopped");
                        }
                        Some(SamplingCommand::SetInterval(cadence)) => {
                            self.current_interval = cadence;
                            ticker = interval(cadence.duration());
                            tracing::info!("sampling cadence set to {}", cadence.label());
                        }
                        Some(SamplingCommand::SampleOnce) => {
                            self.take_sample().await;
                        }
                        None => {
                            tracing::info!("command channel closed, stopping sampling service");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// One full sample-and-record operation
    async fn take_sample(&mut self) {
        let outcome = {
            let mut session = self.session.lock().await;
            session.generate_sample(SampleMode::Auto).map(|sample| {
                let alert = session.record_sample(&sample);
                (sample, alert)
            })
        };

        match outcome {
            Ok((sample, alert)) => {
                if let Some(alert) = alert {
                    tracing::warn!(
                        "{} at {:.1} bpm ({})",
                        alert.condition,
                        alert.avg_bpm,
                        alert.timestamp
                    );
                }

                {
                    let mut stats = self.stats.lock().await;
                    stats.samples_taken += 1;
                    stats.last_update = now_millis();
                }

                // ignore if no receivers are subscribed
                let _ = self.sample_sender.send(sample);
            }
            Err(e) => tracing::warn!("sampling failed: {}", e),
        }
    }
}

/// Helper to create and spawn a sampling service in the background
pub async fn start_sampling_service(
    session: Arc<Mutex<MonitorSession>>,
    cadence: SampleInterval,
) -> (
    broadcast::Receiver<MonitorSample>,
    mpsc::Sender<SamplingCommand>,
    Arc<Mutex<SamplingStats>>,
) {
    let mut service = SamplingService::new(session, cadence);
    let sample_receiver = service.subscribe();
    let command_sender = service.command_handle();
    let stats = service.stats_handle();

    tokio::spawn(async move {
        if let Err(e) = service.run().await {
            tracing::error!("sampling service error: {}", e);
        }
    });

    (sample_receiver, command_sender, stats)
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
