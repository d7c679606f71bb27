// cspell:ignore Jxxx
//! Declarative hand requirements shared by the convention modules.

use serde::{Deserialize, Serialize};
use types::{Hand, Shape, Suit};

/// Constraints that a hand must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandConstraint {
    /// Minimum high card points
    MinHcp(u8),
    /// Maximum high card points
    MaxHcp(u8),
    /// Minimum length in a specific suit
    MinLength(Suit, u8),
    /// Maximum length in a specific suit
    MaxLength(Suit, u8),
    /// Maximum unbalancedness allowed
    MaxUnbalancedness(Shape),
    /// A stopper in the given suit (A, Kx, Qxx, or Jxxx)
    StopperIn(Suit),
    /// Rule of 20: HCP + length of two longest suits >= 20
    RuleOfTwenty,
    /// Rule of 15: HCP + length of spades >= 15
    RuleOfFifteen,
    /// Two of the top three honors, or three of the top five
    GoodSuit(Suit),
}

impl HandConstraint {
    pub fn check(&self, hand: &Hand) -> bool {
        match *self {
            HandConstraint::MinHcp(hcp) => hand.hcp() >= hcp,
            HandConstraint::MaxHcp(hcp) => hand.hcp() <= hcp,
            HandConstraint::MinLength(suit, len) => hand.length(suit) >= len,
            HandConstraint::MaxLength(suit, len) => hand.length(suit) <= len,
            HandConstraint::MaxUnbalancedness(max_shape) => hand.shape() <= max_shape,
            HandConstraint::StopperIn(suit) => hand.has_stopper(suit),
            HandConstraint::RuleOfTwenty => {
                let mut lengths: Vec<u8> = Suit::ALL.iter().map(|&s| hand.length(s)).collect();
                lengths.sort_unstable_by(|a, b| b.cmp(a));
                hand.hcp() + lengths[0] + lengths[1] >= 20
            }
            HandConstraint::RuleOfFifteen => hand.hcp() + hand.length(Suit::Spades) >= 15,
            HandConstraint::GoodSuit(suit) => hand.has_good_suit(suit),
        }
    }
}

/// True when the hand meets every constraint.
pub fn satisfies(hand: &Hand, constraints: &[HandConstraint]) -> bool {
    constraints.iter().all(|c| c.check(hand))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_of_twenty() {
        // 11 HCP, 5-4 in the majors: 11 + 5 + 4 = 20
        let hand = Hand::parse("32.32.AQ32.KQ432").unwrap();
        assert!(HandConstraint::RuleOfTwenty.check(&hand));
        // Same points on a flat hand fall short.
        let flat = Hand::parse("432.432.AQ3.KQ32").unwrap();
        assert!(!HandConstraint::RuleOfTwenty.check(&flat));
    }

    #[test]
    fn test_rule_of_fifteen() {
        let hand = Hand::parse("32.Q32.A32.KJ432").unwrap();
        assert_eq!(hand.hcp(), 10);
        assert!(HandConstraint::RuleOfFifteen.check(&hand));
        let short_spades = Hand::parse("KJ432.Q32.A32.32").unwrap();
        assert!(!HandConstraint::RuleOfFifteen.check(&short_spades));
    }

    #[test]
    fn test_satisfies_all() {
        let hand = Hand::parse("32.32.AQ32.KQ432").unwrap();
        assert!(satisfies(
            &hand,
            &[
                HandConstraint::MinLength(Suit::Spades, 5),
                HandConstraint::MaxHcp(11),
                HandConstraint::MaxUnbalancedness(Shape::SemiBalanced),
            ]
        ));
        assert!(!satisfies(
            &hand,
            &[HandConstraint::MinHcp(12), HandConstraint::StopperIn(Suit::Clubs)]
        ));
    }
}
