use crate::error::TypesError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn hcp(&self) -> u8 {
        self.rank.hcp()
    }

    /// All 52 cards, clubs first.
    pub fn deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

/// Parses two-character cards such as "SA" or "H7".
impl FromStr for Card {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(suit), Some(rank), None) => {
                Suit::from_char(suit).zip(Rank::from_char(rank))
            }
            _ => None,
        };
        parsed
            .map(|(suit, rank)| Card::new(suit, rank))
            .ok_or_else(|| TypesError::InvalidCard(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_parse_and_display() {
        let card: Card = "SA".parse().unwrap();
        assert_eq!(card, Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(card.to_string(), "SA");
        assert!("S".parse::<Card>().is_err());
        assert!("ZA".parse::<Card>().is_err());
    }

    #[test]
    fn test_deck() {
        let deck = Card::deck();
        assert_eq!(deck.len(), 52);
        let hcp: u8 = deck.iter().map(|c| c.hcp()).sum();
        assert_eq!(hcp, 40);
    }
}
