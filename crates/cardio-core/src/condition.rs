//! Diagnostic condition labels

use serde::{Deserialize, Serialize};

/// Diagnostic category for a heart-rate series.
///
/// `Unknown` is only reported before any reading exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Normal,
    Bradycardia,
    Tachycardia,
    Arrhythmia,
    Unknown,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Normal => write!(f, "Normal"),
            Condition::Bradycardia => write!(f, "Bradycardia"),
            Condition::Tachycardia => write!(f, "Tachycardia"),
            Condition::Arrhythmia => write!(f, "Arrhythmia"),
            Condition::Unknown => write!(f, "Unknown"),
        }
    }
}
