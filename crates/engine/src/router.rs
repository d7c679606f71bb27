//! The decision pipeline: extraction, first-match routing through the
//! catalogue, adjustment and the sanity check.

use crate::adjust::adjust_and_validate;
use crate::catalogue::Catalogue;
use crate::config::CatalogueConfig;
use crate::context::extract;
use crate::error::EngineError;
use crate::sanity::{assemble, Decision};
use crate::trace::{DecisionTrace, EvaluationStep};
use tracing::{debug, trace};
use types::{Auction, Hand};

/// Decides calls from an immutable catalogue. Cheap to share across threads.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    catalogue: Catalogue,
}

impl DecisionEngine {
    pub fn new(catalogue: Catalogue) -> Self {
        Self { catalogue }
    }

    /// The SAYC catalogue with `config` applied.
    pub fn with_config(config: &CatalogueConfig) -> Result<Self, EngineError> {
        Ok(Self::new(Catalogue::with_config(config)?))
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn decide(&self, hand: &Hand, auction: &Auction) -> Result<Decision, EngineError> {
        self.decide_with_trace(hand, auction).map(|t| t.decision)
    }

    pub fn decide_with_trace(
        &self,
        hand: &Hand,
        auction: &Auction,
    ) -> Result<DecisionTrace, EngineError> {
        check_auction(auction)?;
        let context = extract(hand, auction);
        debug!(
            target: "sayc_engine::router",
            seat = %context.seat,
            role = %context.role,
            hcp = context.hand.hcp,
            "deciding"
        );

        let mut steps = Vec::new();
        let mut selected = None;
        for entry in self.catalogue.for_role(context.role) {
            let candidate = entry.evaluate(hand, &context);
            trace!(
                target: "sayc_engine::router",
                convention = %entry.id,
                priority = entry.priority,
                call = ?candidate.as_ref().map(|c| c.call),
                "evaluated"
            );
            steps.push(EvaluationStep {
                convention: entry.id,
                priority: entry.priority,
                candidate: candidate.clone(),
            });
            if candidate.is_some() {
                selected = candidate;
                break;
            }
        }

        let (adjustment, decision) = match selected {
            Some(candidate) => {
                debug!(
                    target: "sayc_engine::router",
                    convention = %candidate.convention,
                    call = %candidate.call,
                    "selected"
                );
                let adjusted = adjust_and_validate(hand, candidate, &context, auction);
                let adjustment = adjusted.adjustment.clone();
                (Some(adjustment), assemble(hand, adjusted, auction))
            }
            None => (None, Decision::no_candidate()),
        };
        debug!(
            target: "sayc_engine::router",
            call = %decision.call,
            rationale = %decision.rationale,
            anomaly = ?decision.anomaly,
            "decided"
        );

        Ok(DecisionTrace {
            context,
            steps,
            adjustment,
            decision,
        })
    }
}

fn check_auction(auction: &Auction) -> Result<(), EngineError> {
    auction
        .validate()
        .map_err(|e| EngineError::MalformedAuction(e.to_string()))?;
    if auction.is_finished() {
        return Err(EngineError::AuctionComplete);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::ConventionId;
    use crate::sanity::Anomaly;
    use types::{Call, Position::*, Strain};

    #[test]
    fn test_first_match_wins() {
        // 15 HCP balanced: 1NT comes before one of a suit
        let hand = Hand::parse("KQ3.A32.QJ4.K432").unwrap();
        let engine = DecisionEngine::default();
        let trace = engine
            .decide_with_trace(&hand, &Auction::new(North))
            .unwrap();
        assert_eq!(trace.decision.call, Call::bid(1, Strain::NoTrump));
        let selected = trace.selected_step().unwrap();
        assert_eq!(selected.convention, ConventionId::OneNotrumpOpening);
        // Nothing after the winner was evaluated.
        assert_eq!(trace.steps.last().unwrap().convention, selected.convention);
        assert_eq!(trace.adjustment, Some(crate::adjust::Adjustment::Unchanged));
    }

    #[test]
    fn test_no_candidate_passes() {
        // 3 HCP, no long suit
        let hand = Hand::parse("432.J432.432.Q32").unwrap();
        let decision = DecisionEngine::default()
            .decide(&hand, &Auction::new(North))
            .unwrap();
        assert_eq!(decision.call, Call::Pass);
        assert_eq!(decision.rationale, "no descriptive call available");
        assert_eq!(decision.anomaly, Some(Anomaly::NoApplicableConvention));
        assert_eq!(decision.convention, None);
    }

    #[test]
    fn test_rejects_finished_auction() {
        let hand = Hand::parse("432.J432.432.Q32").unwrap();
        let result = DecisionEngine::default().decide(&hand, &Auction::bidding(North, "P P P P"));
        assert!(matches!(result, Err(EngineError::AuctionComplete)));
    }

    #[test]
    fn test_rejects_malformed_auction() {
        let hand = Hand::parse("432.J432.432.Q32").unwrap();
        let mut auction = Auction::bidding(North, "1H");
        // Insufficient bid pushed past the legality check.
        auction.add_call(Call::bid(1, Strain::Clubs));
        let result = DecisionEngine::default().decide(&hand, &auction);
        assert!(matches!(result, Err(EngineError::MalformedAuction(_))));
    }
}
