//! Last look at the call before it leaves the engine, and assembly of the
//! final decision.

use crate::adjust::{Adjusted, Adjustment, Rejection};
use crate::catalogue::{Candidate, ConventionId, Intent};
use crate::legality::is_legal;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Auction, Call, Hand, Suit};

/// Levels a natural call may sit above the cheapest bid in its strain.
pub const MAX_NATURAL_JUMP: u8 = 2;

/// Something the pipeline recovered from on the way to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anomaly {
    /// The chosen convention proposed an illegal call.
    IllegalCandidate,
    /// A repaired call was no longer supported by the hand.
    InappropriateAdjustment,
    NoApplicableConvention,
    SanityVeto,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anomaly::IllegalCandidate => "illegal candidate",
            Anomaly::InappropriateAdjustment => "inappropriate adjustment",
            Anomaly::NoApplicableConvention => "no applicable convention",
            Anomaly::SanityVeto => "sanity veto",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub call: Call,
    pub rationale: String,
    pub convention: Option<ConventionId>,
    pub anomaly: Option<Anomaly>,
}

impl Decision {
    pub fn into_parts(self) -> (Call, String) {
        (self.call, self.rationale)
    }

    /// The decision when no convention has anything to say.
    pub fn no_candidate() -> Self {
        Self {
            call: Call::Pass,
            rationale: "no descriptive call available".to_string(),
            convention: None,
            anomaly: Some(Anomaly::NoApplicableConvention),
        }
    }
}

/// Why the sanity check replaced a call with Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Veto {
    Void { suit: Suit },
    Jump { levels: u8 },
    Illegal,
}

impl fmt::Display for Veto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Veto::Void { suit } => write!(f, "natural call in {} with a void", suit.symbol()),
            Veto::Jump { levels } => write!(f, "natural call jumps {} levels", levels),
            Veto::Illegal => f.write_str("call is not legal"),
        }
    }
}

/// Suit the call names when its intent promises length there.
fn natural_suit(candidate: &Candidate) -> Option<Suit> {
    match candidate.intent {
        Intent::Raise { .. } | Intent::NewSuit { .. } | Intent::Rebid { .. } => {
            candidate.call.suit()
        }
        Intent::Preempt { suit } => Some(suit),
        _ => None,
    }
}

/// Returns the reason to veto `candidate`, if there is one. Never proposes
/// a different call.
pub fn check(hand: &Hand, candidate: &Candidate, auction: &Auction) -> Option<Veto> {
    if !is_legal(candidate.call, auction) {
        return Some(Veto::Illegal);
    }
    let suit = natural_suit(candidate)?;
    if hand.length(suit) == 0 {
        return Some(Veto::Void { suit });
    }
    // Preempts describe their length by level.
    if matches!(candidate.intent, Intent::Preempt { .. }) {
        return None;
    }
    let level = candidate.call.level()?;
    let cheapest = auction
        .minimum_bid_in(candidate.call.strain()?)
        .and_then(|c| c.level())?;
    let levels = level.saturating_sub(cheapest);
    (levels > MAX_NATURAL_JUMP).then_some(Veto::Jump { levels })
}

fn anomaly_for(adjustment: &Adjustment) -> Option<Anomaly> {
    match adjustment {
        Adjustment::Unchanged => None,
        Adjustment::Rejected {
            reason: Rejection::Insufficient { .. },
            ..
        } => Some(Anomaly::InappropriateAdjustment),
        Adjustment::Repaired { .. } | Adjustment::Rejected { .. } => {
            Some(Anomaly::IllegalCandidate)
        }
    }
}

/// Runs the sanity check and builds the decision, prefixing the rationale
/// with the convention's name.
pub fn assemble(hand: &Hand, adjusted: Adjusted, auction: &Auction) -> Decision {
    let Adjusted {
        candidate,
        adjustment,
    } = adjusted;
    let name = candidate.convention.name();
    if let Some(veto) = check(hand, &candidate, auction) {
        tracing::warn!(
            target: "sayc_engine::sanity",
            convention = %candidate.convention,
            call = %candidate.call,
            %veto,
            "sanity veto"
        );
        return Decision {
            call: Call::Pass,
            rationale: format!(
                "{}: {} vetoed, {} ({})",
                name, candidate.call, veto, candidate.rationale
            ),
            convention: Some(candidate.convention),
            anomaly: Some(Anomaly::SanityVeto),
        };
    }
    Decision {
        call: candidate.call,
        rationale: format!("{}: {}", name, candidate.rationale),
        convention: Some(candidate.convention),
        anomaly: anomaly_for(&adjustment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Position::*, Strain};

    fn unchanged(candidate: Candidate) -> Adjusted {
        Adjusted {
            candidate,
            adjustment: Adjustment::Unchanged,
        }
    }

    fn new_suit(call: Call, suit: Suit) -> Candidate {
        Candidate::new(
            call,
            ConventionId::NewSuitResponse,
            Intent::NewSuit {
                suit,
                min_hcp: 6,
                min_length: 4,
            },
            "test",
        )
    }

    #[test]
    fn test_rationale_is_prefixed() {
        // 11 HCP, five spades
        let hand = Hand::parse("A32.K32.32.KJ432").unwrap();
        let auction = Auction::bidding(North, "1D P");
        let decision = assemble(
            &hand,
            unchanged(new_suit(Call::bid(1, Strain::Spades), Suit::Spades)),
            &auction,
        );
        assert_eq!(decision.call, Call::bid(1, Strain::Spades));
        assert_eq!(decision.rationale, "New suit response: test");
        assert_eq!(decision.anomaly, None);
        assert_eq!(
            decision.into_parts(),
            (
                Call::bid(1, Strain::Spades),
                "New suit response: test".to_string()
            )
        );
    }

    #[test]
    fn test_void_suit_is_vetoed() {
        // No hearts at all
        let hand = Hand::parse("AK32.KQ32..KJ432").unwrap();
        let auction = Auction::bidding(North, "1D P");
        let candidate = new_suit(Call::bid(1, Strain::Hearts), Suit::Hearts);
        assert_eq!(
            check(&hand, &candidate, &auction),
            Some(Veto::Void { suit: Suit::Hearts })
        );
        let decision = assemble(&hand, unchanged(candidate), &auction);
        assert_eq!(decision.call, Call::Pass);
        assert_eq!(decision.anomaly, Some(Anomaly::SanityVeto));
    }

    #[test]
    fn test_wild_jump_is_vetoed() {
        let hand = Hand::parse("A32.K32.32.KJ432").unwrap();
        let auction = Auction::bidding(North, "1D P");
        let candidate = new_suit(Call::bid(4, Strain::Spades), Suit::Spades);
        assert_eq!(
            check(&hand, &candidate, &auction),
            Some(Veto::Jump { levels: 3 })
        );
        let candidate = new_suit(Call::bid(3, Strain::Spades), Suit::Spades);
        assert_eq!(check(&hand, &candidate, &auction), None);
    }

    #[test]
    fn test_preempt_may_jump() {
        // Eight spades
        let hand = Hand::parse("2.32.32.KQJ98765").unwrap();
        let auction = Auction::new(North);
        let candidate = Candidate::new(
            Call::bid(4, Strain::Spades),
            ConventionId::Preempt,
            Intent::Preempt { suit: Suit::Spades },
            "8-card spades",
        );
        assert_eq!(check(&hand, &candidate, &auction), None);
    }

    #[test]
    fn test_illegal_call_is_vetoed() {
        let hand = Hand::parse("A32.K32.32.KJ432").unwrap();
        let auction = Auction::bidding(North, "1D P");
        let candidate = Candidate::new(
            Call::Double,
            ConventionId::PenaltyDouble,
            Intent::Artificial,
            "test",
        );
        assert_eq!(check(&hand, &candidate, &auction), Some(Veto::Illegal));
    }

    #[test]
    fn test_anomaly_follows_adjustment() {
        let repaired = Adjustment::Repaired {
            from: Call::bid(1, Strain::Spades),
            to: Call::bid(2, Strain::Spades),
        };
        assert_eq!(anomaly_for(&repaired), Some(Anomaly::IllegalCandidate));
        let rejected = Adjustment::Rejected {
            from: Call::Double,
            reason: Rejection::Unrepairable,
        };
        assert_eq!(anomaly_for(&rejected), Some(Anomaly::IllegalCandidate));
        assert_eq!(anomaly_for(&Adjustment::Unchanged), None);
    }
}
