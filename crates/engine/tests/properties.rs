use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sayc_engine::{decide, decide_with_trace, extract, generate_random_board, is_legal, Adjustment};
use types::{Auction, Board, Call};

/// Bound on the length of an engine-driven auction.
const MAX_CALLS: usize = 128;

fn board(seed: u64, number: u32) -> (Board, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let board = generate_random_board(number, &mut rng).unwrap();
    (board, rng)
}

/// A random legal, unfinished auction of up to `len` calls.
fn random_auction(rng: &mut StdRng, board: &Board, len: usize) -> Auction {
    let mut auction = Auction::new(board.dealer).with_vulnerability(board.vulnerability);
    while auction.calls.len() < len {
        let call = if rng.gen_bool(0.6) {
            Call::Pass
        } else {
            *auction.legal_calls().choose(rng).unwrap()
        };
        auction.try_add_call(call).unwrap();
        if auction.is_finished() {
            auction.calls.pop();
            break;
        }
    }
    auction
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_decision_is_legal(seed in any::<u64>(), number in 1u32..=16, len in 0usize..20) {
        let (board, mut rng) = board(seed, number);
        let auction = random_auction(&mut rng, &board, len);
        let hand = board.get_hand(auction.current_player()).unwrap();
        let decision = decide(hand, &auction).unwrap();
        prop_assert!(
            is_legal(decision.call, &auction),
            "{} after {:?}",
            decision.call,
            auction.calls
        );
    }

    #[test]
    fn engine_bids_a_whole_deal_legally(seed in any::<u64>(), number in 1u32..=16) {
        let (board, _) = board(seed, number);
        let mut auction = Auction::new(board.dealer).with_vulnerability(board.vulnerability);
        while !auction.is_finished() {
            prop_assert!(auction.calls.len() < MAX_CALLS);
            let hand = board.get_hand(auction.current_player()).unwrap();
            let decision = decide(hand, &auction).unwrap();
            prop_assert!(auction.try_add_call(decision.call).is_ok());
        }
    }

    #[test]
    fn extraction_is_idempotent(seed in any::<u64>(), number in 1u32..=16, len in 0usize..20) {
        let (board, mut rng) = board(seed, number);
        let auction = random_auction(&mut rng, &board, len);
        let before = auction.clone();
        let hand = board.get_hand(auction.current_player()).unwrap();
        let first = serde_json::to_value(extract(hand, &auction)).unwrap();
        let second = serde_json::to_value(extract(hand, &auction)).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(before, auction);
    }

    #[test]
    fn repairs_stay_within_two_levels(
        seed in any::<u64>(),
        number in 1u32..=16,
        len in 0usize..20
    ) {
        let (board, mut rng) = board(seed, number);
        let auction = random_auction(&mut rng, &board, len);
        let hand = board.get_hand(auction.current_player()).unwrap();
        let trace = decide_with_trace(hand, &auction).unwrap();
        if let Some(Adjustment::Repaired { from, to }) = trace.adjustment {
            let (from_level, to_level) = (from.level().unwrap(), to.level().unwrap());
            prop_assert_eq!(from.strain(), to.strain());
            prop_assert!(to_level >= from_level);
            prop_assert!(to_level - from_level <= 2);
            prop_assert_eq!(trace.decision.call, to);
        }
    }
}
