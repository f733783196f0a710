//! Cardio-Simulation: synthetic heart-rate generation
//!
//! Provides the waveform synthesizer and the condition/risk selection used
//! when no live data source is available.

pub mod selector;
pub mod waveform;

pub use selector::*;
pub use waveform::*;
