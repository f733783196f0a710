//! Cardio-Core: Foundation types for the heart-rate monitoring engine
//!
//! Minimal core types shared by the synthesizer, analysis, and monitor crates.

pub mod condition;
pub mod error;
pub mod history;
pub mod reading;

pub use condition::*;
pub use history::*;
pub use reading::*;
pub use error::{CardioError, CardioResult};
