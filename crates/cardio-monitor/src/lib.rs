//! Cardio-Monitor: session facade and continuous sampling service
//!
//! The interface the engine exposes to its presentation layer: sample
//! generation, history recording, trend and report queries, CSV export, and
//! the background sampling task.

pub mod backend;
pub mod sampling_service;
pub mod session;

pub use backend::{format_federated_rounds, BackendSample, FederatedRound, HeartbeatBackend};
pub use sampling_service::{
    start_sampling_service, SampleInterval, SamplingCommand, SamplingService, SamplingStats,
};
pub use session::{MonitorSample, MonitorSession, RateAlert, SampleMode};
