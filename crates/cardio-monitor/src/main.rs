//! Cardio monitor demo: synthesizer -> risk scoring -> classifier -> history

use anyhow::Result;
use cardio_monitor::{start_sampling_service, MonitorSession, SampleInterval, SamplingCommand};
use cardio_simulation::SynthesizerConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("Starting cardio monitor...");
    println!("Signal flow: Waveform Synthesizer -> Risk Scoring -> Classifier -> History");

    let session = Arc::new(Mutex::new(MonitorSession::new(SynthesizerConfig::default())?));
    let (mut samples, commands, _stats) =
        start_sampling_service(session.clone(), SampleInterval::Rapid).await;

    commands.send(SamplingCommand::Start).await?;

    let mut taken = 0;
    while taken < 6 {
        match samples.recv().await {
            Ok(sample) => {
                taken += 1;
                let stats = sample.reading.stats();
                println!(
                    "sample {:>2}: {:>6.1} bpm avg, risk {:.2}, {}",
                    taken, stats.mean, sample.risk_score, sample.condition
                );
            }
            Err(_) => break,
        }
    }

    commands.send(SamplingCommand::Stop).await?;

    let session = session.lock().await;
    if let Some(trend) = session.get_trend() {
        println!("\nTrend: {}", trend.insight());
        println!("Advice: {}", trend.recommendation());
    }

    if let Some(report) = session.get_report() {
        println!("\nHealth report:\n{}", report.to_json()?);
    }

    println!("\nCSV export:\n{}", session.export_csv());

    Ok(())
}
