//! A SAYC bidding engine.
//!
//! [`decide`] takes one player's hand and the auction so far and returns the
//! next call with a rationale. The pipeline reads the auction into a
//! [`DecisionContext`], asks the convention [`Catalogue`] for the first
//! applicable candidate, repairs it if interference made it illegal, and
//! vetoes anything that fails a final sanity check.

pub mod adjust;
pub mod catalogue;
pub mod config;
pub mod constraints;
pub mod context;
pub mod error;
pub mod legality;
pub mod point_ranges;
pub mod requirements;
pub mod router;
pub mod sanity;
pub mod trace;

pub use adjust::{adjust_and_validate, Adjusted, Adjustment, Rejection};
pub use catalogue::{Candidate, Catalogue, ConventionEntry, ConventionId, Intent, Thresholds};
pub use config::{CatalogueConfig, ConfigError};
pub use context::{extract, DecisionContext, Role};
pub use error::EngineError;
pub use legality::{is_legal, minimal_legal_bid_same_strain};
pub use router::DecisionEngine;
pub use sanity::{Anomaly, Decision};
pub use trace::{DecisionTrace, EvaluationStep};

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use types::{Auction, Board, Call, Card, Hand, Position, Rank, Suit, TypesError};

static DEFAULT_ENGINE: Lazy<DecisionEngine> = Lazy::new(DecisionEngine::default);

/// Decides the next call for `hand` with the default SAYC catalogue.
pub fn decide(hand: &Hand, auction: &Auction) -> Result<Decision, EngineError> {
    DEFAULT_ENGINE.decide(hand, auction)
}

/// Like [`decide`], recording every catalogue entry evaluated on the way.
pub fn decide_with_trace(hand: &Hand, auction: &Auction) -> Result<DecisionTrace, EngineError> {
    DEFAULT_ENGINE.decide_with_trace(hand, auction)
}

/// Parse a comma-separated call string (e.g. "1C,P,1D") into a Vec<Call>.
pub fn parse_calls(calls_string: &str) -> Vec<Call> {
    if calls_string.is_empty() {
        return Vec::new();
    }
    calls_string
        .split(',')
        .filter_map(|s| s.trim().parse::<Call>().ok())
        .collect()
}

/// Deals a shuffled deck into a board; dealer and vulnerability follow the
/// board number.
pub fn generate_random_board(
    board_number: u32,
    rng: &mut impl rand::Rng,
) -> Result<Board, TypesError> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck.shuffle(rng);

    let mut hands = HashMap::new();
    let positions = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];
    for (position, chunk) in positions.into_iter().zip(deck.chunks(13)) {
        hands.insert(position, Hand::new(chunk.to_vec())?);
    }
    Ok(Board::new(board_number, hands))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use types::Strain;

    #[test]
    fn test_parse_calls_empty() {
        let calls = parse_calls("");
        assert!(calls.is_empty());
    }

    #[test]
    fn test_parse_calls_multiple() {
        let calls = parse_calls("1C,P,1D");
        assert_eq!(
            calls,
            vec![
                Call::bid(1, Strain::Clubs),
                Call::Pass,
                Call::bid(1, Strain::Diamonds)
            ]
        );
    }

    #[test]
    fn test_parse_calls_with_whitespace() {
        let calls = parse_calls("1C, P, 1NT");
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], Call::bid(1, Strain::NoTrump));
    }

    #[test]
    fn test_parse_calls_skips_invalid() {
        let calls = parse_calls("1C,INVALID,P");
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn test_generate_random_board_deals_the_whole_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = generate_random_board(1, &mut rng).unwrap();
        assert_eq!(board.hands.len(), 4);
        let total_cards: usize = board.hands.values().map(|h| h.cards().len()).sum();
        assert_eq!(total_cards, 52);
        let total_hcp: u32 = board.hands.values().map(|h| u32::from(h.hcp())).sum();
        assert_eq!(total_hcp, 40);
    }

    #[test]
    fn test_generate_random_board_dealer_matches_board_number() {
        let mut rng = StdRng::seed_from_u64(11);
        for board_number in 1..=4 {
            let board = generate_random_board(board_number, &mut rng).unwrap();
            assert_eq!(
                board.dealer,
                Position::dealer_from_board_number(board_number)
            );
        }
    }

    #[test]
    fn test_default_engine_decides_the_opening_call() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_random_board(5, &mut rng).unwrap();
        let auction = Auction::new(board.dealer);
        let hand = board.get_hand(auction.current_player()).unwrap();
        let decision = decide(hand, &auction).unwrap();
        assert!(is_legal(decision.call, &auction));
        assert!(!decision.rationale.is_empty());
    }
}
