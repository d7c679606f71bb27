//! Repairs illegal candidates and re-checks that the hand still supports the
//! call at its repaired level.

use crate::catalogue::Candidate;
use crate::context::DecisionContext;
use crate::legality::{is_legal, minimal_legal_bid_same_strain};
use crate::requirements::{revalidate, Shortfall};
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Auction, Call, Hand};

/// The furthest a candidate may be pushed above its proposed level.
pub const MAX_REPAIR_LEVELS: u8 = 2;

/// Why a candidate could not be repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Rejection {
    /// Doubles, redoubles and exhausted strains have no same-strain repair.
    Unrepairable,
    TooFar { levels: u8 },
    Insufficient { repaired: Call, shortfall: Shortfall },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unrepairable => f.write_str("no legal call in the same strain"),
            Rejection::TooFar { levels } => {
                write!(f, "repair would raise the call {} levels", levels)
            }
            Rejection::Insufficient {
                repaired,
                shortfall,
            } => write!(
                f,
                "hand insufficient for adjusted level {}: {}",
                repaired, shortfall
            ),
        }
    }
}

/// What the adjustment stage did to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Adjustment {
    Unchanged,
    Repaired { from: Call, to: Call },
    Rejected { from: Call, reason: Rejection },
}

impl Adjustment {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Adjustment::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjusted {
    pub candidate: Candidate,
    pub adjustment: Adjustment,
}

impl Adjusted {
    fn unchanged(candidate: Candidate) -> Self {
        Self {
            candidate,
            adjustment: Adjustment::Unchanged,
        }
    }

    fn rejected(candidate: Candidate, reason: Rejection) -> Self {
        let rationale = match &reason {
            Rejection::Insufficient { .. } => reason.to_string(),
            _ => format!("{}: {}", candidate.call, reason),
        };
        Self {
            adjustment: Adjustment::Rejected {
                from: candidate.call,
                reason,
            },
            candidate: Candidate::pass(candidate.convention, rationale),
        }
    }
}

/// Returns `candidate` unchanged when legal, otherwise the lowest legal bid
/// in its strain, provided the hand still supports the call there. Anything
/// that cannot be repaired becomes a Pass.
pub fn adjust_and_validate(
    hand: &Hand,
    candidate: Candidate,
    ctx: &DecisionContext,
    auction: &Auction,
) -> Adjusted {
    if is_legal(candidate.call, auction) {
        return Adjusted::unchanged(candidate);
    }
    let Some(repaired) = minimal_legal_bid_same_strain(candidate.call, auction) else {
        return Adjusted::rejected(candidate, Rejection::Unrepairable);
    };
    // Both calls are bids here: the repair exists only for bids.
    let proposed = candidate.call.level().unwrap_or(1);
    let level = repaired.level().unwrap_or(proposed);
    let levels = level.saturating_sub(proposed);
    if levels > MAX_REPAIR_LEVELS {
        return Adjusted::rejected(candidate, Rejection::TooFar { levels });
    }

    match revalidate(hand, ctx, &candidate.intent, proposed, level) {
        Ok(()) => {
            let rationale = format!(
                "{} [adjusted from {} to {} for legality; re-validated for {}]",
                candidate.rationale, candidate.call, repaired, level
            );
            Adjusted {
                adjustment: Adjustment::Repaired {
                    from: candidate.call,
                    to: repaired,
                },
                candidate: Candidate {
                    call: repaired,
                    rationale,
                    ..candidate
                },
            }
        }
        Err(shortfall) => {
            tracing::warn!(
                target: "sayc_engine::adjust",
                convention = %candidate.convention,
                proposed = %candidate.call,
                repaired = %repaired,
                %shortfall,
                "hand insufficient for adjusted level"
            );
            Adjusted::rejected(
                candidate,
                Rejection::Insufficient {
                    repaired,
                    shortfall,
                },
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ConventionId, Intent};
    use crate::context::extract;
    use types::{Position, Position::*, Strain, Suit};

    fn setup(hand: &str, dealer: Position, calls: &str) -> (Hand, DecisionContext, Auction) {
        let hand = Hand::parse(hand).unwrap();
        let auction = Auction::bidding(dealer, calls);
        let ctx = extract(&hand, &auction);
        (hand, ctx, auction)
    }

    fn club_raise() -> Candidate {
        Candidate::new(
            Call::bid(2, Strain::Clubs),
            ConventionId::MinorRaise,
            Intent::Raise {
                suit: Suit::Clubs,
                min_points: 6,
                min_support: 5,
            },
            "8 support points, 5 clubs",
        )
    }

    #[test]
    fn test_legal_candidate_is_unchanged() {
        let (hand, ctx, auction) = setup("KJ863.K74.63.852", East, "1C P");
        let adjusted = adjust_and_validate(&hand, club_raise(), &ctx, &auction);
        assert_eq!(adjusted.adjustment, Adjustment::Unchanged);
        assert_eq!(adjusted.candidate, club_raise());
    }

    #[test]
    fn test_weak_raise_is_not_pushed_to_three() {
        // 7 HCP, five clubs: not enough for 3C over the overcall
        let (hand, ctx, auction) = setup("KJ863.K74.63.852", East, "1C 2H");
        let adjusted = adjust_and_validate(&hand, club_raise(), &ctx, &auction);
        assert_eq!(adjusted.candidate.call, Call::Pass);
        assert!(adjusted
            .candidate
            .rationale
            .starts_with("hand insufficient for adjusted level"));
        assert!(matches!(
            adjusted.adjustment,
            Adjustment::Rejected {
                reason: Rejection::Insufficient { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_repair_keeps_rationale() {
        // 11 HCP, five spades
        let (hand, ctx, auction) = setup("A32.K32.32.KJ432", North, "1D 2H");
        let candidate = Candidate::new(
            Call::bid(1, Strain::Spades),
            ConventionId::NewSuitResponse,
            Intent::NewSuit {
                suit: Suit::Spades,
                min_hcp: 6,
                min_length: 4,
            },
            "11 HCP, 5 spades",
        );
        let adjusted = adjust_and_validate(&hand, candidate, &ctx, &auction);
        assert_eq!(adjusted.candidate.call, Call::bid(2, Strain::Spades));
        assert_eq!(
            adjusted.candidate.rationale,
            "11 HCP, 5 spades [adjusted from 1S to 2S for legality; re-validated for 2]"
        );
        assert_eq!(
            adjusted.adjustment,
            Adjustment::Repaired {
                from: Call::bid(1, Strain::Spades),
                to: Call::bid(2, Strain::Spades),
            }
        );
    }

    #[test]
    fn test_double_cannot_be_repaired() {
        let (hand, ctx, auction) = setup("A32.K32.32.KJ432", North, "1D P");
        let candidate = Candidate::new(
            Call::Double,
            ConventionId::NegativeDouble,
            Intent::Artificial,
            "unbid majors",
        );
        let adjusted = adjust_and_validate(&hand, candidate, &ctx, &auction);
        assert_eq!(adjusted.candidate.call, Call::Pass);
        assert_eq!(
            adjusted.adjustment,
            Adjustment::Rejected {
                from: Call::Double,
                reason: Rejection::Unrepairable,
            }
        );
    }

    #[test]
    fn test_repair_is_capped() {
        let (hand, ctx, auction) = setup("32.32.432.KQJ432", North, "1D 4H");
        let candidate = Candidate::new(
            Call::bid(1, Strain::Spades),
            ConventionId::NewSuitResponse,
            Intent::NewSuit {
                suit: Suit::Spades,
                min_hcp: 6,
                min_length: 4,
            },
            "6 spades",
        );
        let adjusted = adjust_and_validate(&hand, candidate, &ctx, &auction);
        assert_eq!(adjusted.candidate.call, Call::Pass);
        assert_eq!(
            adjusted.adjustment,
            Adjustment::Rejected {
                from: Call::bid(1, Strain::Spades),
                reason: Rejection::TooFar { levels: 3 },
            }
        );
    }

    #[test]
    fn test_artificial_call_never_survives_a_repair() {
        let (hand, ctx, auction) = setup("AQ3.KQ2.KQ32.A32", North, "1N 2C");
        let candidate = Candidate::new(
            Call::bid(2, Strain::Clubs),
            ConventionId::Stayman,
            Intent::Artificial,
            "asking for a major",
        );
        let adjusted = adjust_and_validate(&hand, candidate, &ctx, &auction);
        assert_eq!(adjusted.candidate.call, Call::Pass);
        assert!(adjusted.adjustment.is_rejected());
    }
}
