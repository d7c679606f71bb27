//! Tracing for a single decision
use crate::adjust::Adjustment;
use crate::catalogue::{Candidate, ConventionId};
use crate::context::DecisionContext;
use crate::sanity::Decision;
use serde::{Deserialize, Serialize};

/// A detailed trace of one decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrace {
    /// The facts the catalogue decided from
    pub context: DecisionContext,
    /// Every entry evaluated, in priority order
    pub steps: Vec<EvaluationStep>,
    /// What the adjustment stage did to the winning candidate (if any)
    pub adjustment: Option<Adjustment>,
    /// The call that left the engine
    pub decision: Decision,
}

/// A single catalogue entry's evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationStep {
    /// The convention evaluated
    pub convention: ConventionId,
    /// Its priority in the catalogue
    pub priority: u16,
    /// The candidate it proposed, if it applied
    pub candidate: Option<Candidate>,
}

impl DecisionTrace {
    /// The step whose candidate was taken.
    pub fn selected_step(&self) -> Option<&EvaluationStep> {
        self.steps.iter().find(|s| s.candidate.is_some())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::decide_with_trace;
    use types::{Auction, Hand, Position::*};

    #[test]
    fn test_trace_serializes() {
        // 15 HCP balanced
        let hand = Hand::parse("KQ3.A32.QJ4.K432").unwrap();
        let trace = decide_with_trace(&hand, &Auction::new(North)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&trace.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["decision"]["call"], serde_json::json!(trace.decision.call));
        assert_eq!(json["context"]["role"], "opener");
        assert_eq!(json["adjustment"]["outcome"], "unchanged");
        assert!(json["steps"].as_array().is_some_and(|s| !s.is_empty()));
    }
}
