//! Collaborator contracts for the live backend
//!
//! The engine consumes these interfaces but never depends on them working:
//! any failure is absorbed by the synthesizer fallback.

use cardio_core::CardioResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Raw heartbeat payload returned by the live source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSample {
    pub values: Vec<f32>,
    #[serde(rename = "predictedRisk")]
    pub predicted_risk: f32,
}

/// One federated-averaging round as reported by the external simulator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FederatedRound {
    pub round: u32,
    #[serde(rename = "globalLoss")]
    pub global_loss: f32,
    #[serde(rename = "clientLoss")]
    pub client_loss: f32,
}

/// Live data source contract, implemented outside the engine
pub trait HeartbeatBackend: Send {
    /// Fetch one live reading of `sample_count` samples
    fn fetch_heartbeat(&mut self, sample_count: usize) -> CardioResult<BackendSample>;

    /// Status text for display only
    fn check_status(&mut self) -> CardioResult<String>;

    /// Run the opaque federated simulation and return its per-round losses
    fn simulate_federated(&mut self, clients: u32, rounds: u32)
        -> CardioResult<Vec<FederatedRound>>;
}

/// Render federated rounds for display. The values pass through untouched.
pub fn format_federated_rounds(rounds: &[FederatedRound]) -> String {
    let mut out = String::from("round  global loss  client loss\n");
    for r in rounds {
        let _ = writeln!(out, "{:>5}  {:>11.4}  {:>11.4}", r.round, r.global_loss, r.client_loss);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_sample_wire_format() {
        let json = r#"{"values":[72.1,73.4],"predictedRisk":0.1}"#;
        let sample: BackendSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.values.len(), 2);
        assert_eq!(sample.predicted_risk, 0.1);
    }

    #[test]
    fn test_federated_round_wire_format() {
        let json = r#"{"round":1,"globalLoss":0.93,"clientLoss":0.87}"#;
        let round: FederatedRound = serde_json::from_str(json).unwrap();
        assert_eq!(round.round, 1);
        assert_eq!(round.global_loss, 0.93);
    }

    #[test]
    fn test_format_federated_rounds() {
        let rounds = vec![
            FederatedRound { round: 1, global_loss: 0.93, client_loss: 0.87 },
            FederatedRound { round: 2, global_loss: 0.81, client_loss: 0.75 },
        ];
        let text = format_federated_rounds(&rounds);

        assert!(text.starts_with("round"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("0.9300"));
    }
}
