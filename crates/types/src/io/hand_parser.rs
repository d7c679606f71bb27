use crate::card::Card;
use crate::error::TypesError;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;

/// Parses a hand string in the format "Clubs.Diamonds.Hearts.Spades".
///
/// Suits appear in ascending rank order (C, D, H, S); an empty segment is a
/// void, so `"AKQJT98765432..."` holds all thirteen clubs.
pub fn parse_hand(s: &str) -> Result<Hand, TypesError> {
    let segments: Vec<&str> = s.trim().split('.').collect();
    if segments.len() != Suit::ALL.len() {
        return Err(TypesError::InvalidHand(s.to_string()));
    }
    let mut cards = Vec::new();
    for (suit, segment) in Suit::ALL.iter().zip(segments) {
        for c in segment.chars() {
            let rank = Rank::from_char(c).ok_or_else(|| TypesError::InvalidHand(s.to_string()))?;
            cards.push(Card::new(*suit, rank));
        }
    }
    Hand::new(cards)
}

/// Formats a hand in the same "Clubs.Diamonds.Hearts.Spades" layout.
pub fn format_hand(hand: &Hand) -> String {
    Suit::ALL
        .iter()
        .map(|&suit| hand.cards_in(suit).map(|c| c.rank.to_char()).collect::<String>())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let hand = parse_hand("AKQJT98765432...").unwrap();
        assert_eq!(hand.length(Suit::Clubs), 13);
        assert_eq!(format_hand(&hand), "AKQJT98765432...");

        let hand = parse_hand("t32.KQ2.A5432.J9").unwrap();
        assert_eq!(format_hand(&hand), "T32.KQ2.A5432.J9");
    }

    #[test]
    fn test_rejects_bad_segments() {
        assert!(matches!(
            parse_hand("AKQ.AKQ.AKQ"),
            Err(TypesError::InvalidHand(_))
        ));
        assert!(matches!(
            parse_hand("AKZ.AKQ.AKQ.AKQJ"),
            Err(TypesError::InvalidHand(_))
        ));
    }
}
