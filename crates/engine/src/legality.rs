//! Legality of calls against the auction so far.

use types::{Auction, Call};

/// Whether `call` may be made next. Nothing is legal once the auction has
/// ended.
pub fn is_legal(call: Call, auction: &Auction) -> bool {
    !auction.is_finished() && auction.is_legal(call)
}

/// The lowest legal bid in the strain of `call` at or above its level.
///
/// Returns `None` for doubles, redoubles and passes, and when the strain is
/// exhausted at the seven level.
pub fn minimal_legal_bid_same_strain(call: Call, auction: &Auction) -> Option<Call> {
    let (Some(level), Some(strain)) = (call.level(), call.strain()) else {
        return None;
    };
    let minimum = auction.minimum_bid_in(strain)?;
    let repaired = minimum.level()?.max(level);
    (repaired <= 7).then(|| Call::bid(repaired, strain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Position::*, Strain};

    #[test]
    fn test_is_legal() {
        let auction = Auction::bidding(North, "1H");
        assert!(is_legal(Call::Pass, &auction));
        assert!(is_legal(Call::Double, &auction));
        assert!(!is_legal(Call::Redouble, &auction));
        assert!(!is_legal(Call::bid(1, Strain::Diamonds), &auction));
        assert!(is_legal(Call::bid(1, Strain::Spades), &auction));
    }

    #[test]
    fn test_nothing_is_legal_after_the_auction_ends() {
        let auction = Auction::bidding(North, "1H P P P");
        assert!(!is_legal(Call::Pass, &auction));
        assert!(!is_legal(Call::bid(7, Strain::NoTrump), &auction));
    }

    #[test]
    fn test_no_double_of_partner() {
        let auction = Auction::bidding(North, "1H P");
        assert!(!is_legal(Call::Double, &auction));
    }

    #[test]
    fn test_minimal_legal_bid_same_strain() {
        let auction = Auction::bidding(East, "1C 2H");
        assert_eq!(
            minimal_legal_bid_same_strain(Call::bid(2, Strain::Clubs), &auction),
            Some(Call::bid(3, Strain::Clubs))
        );
        assert_eq!(
            minimal_legal_bid_same_strain(Call::bid(2, Strain::Spades), &auction),
            Some(Call::bid(2, Strain::Spades))
        );
        assert_eq!(
            minimal_legal_bid_same_strain(Call::bid(4, Strain::Spades), &auction),
            Some(Call::bid(4, Strain::Spades))
        );
        assert_eq!(minimal_legal_bid_same_strain(Call::Double, &auction), None);

        let auction = Auction::bidding(North, "7N");
        assert_eq!(
            minimal_legal_bid_same_strain(Call::bid(7, Strain::Spades), &auction),
            None
        );
    }
}
