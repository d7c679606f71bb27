use sayc_engine::context::{CallMeaning, DoubleKind};
use sayc_engine::{decide, extract, Anomaly, ConventionId, EngineError};
use types::{Auction, Call, Hand, Position, Strain};

fn hand(s: &str) -> Hand {
    Hand::parse(s).unwrap()
}

#[test]
fn simple_raise() {
    // South: three hearts, 9 HCP, no shortness
    let auction = Auction::bidding(Position::North, "1H P");
    let decision = decide(&hand("Q432.K32.J32.K32"), &auction).unwrap();
    assert_eq!(decision.call, Call::bid(2, Strain::Hearts));
    assert_eq!(decision.convention, Some(ConventionId::MajorRaise));
    assert_eq!(decision.anomaly, None);
    assert!(decision.rationale.starts_with("Major raise: "));
}

#[test]
fn stayman_over_one_notrump() {
    // 9 HCP, four hearts, three spades
    let auction = Auction::bidding(Position::North, "1N P");
    let decision = decide(&hand("432.K32.Q432.A32"), &auction).unwrap();
    assert_eq!(decision.call, Call::bid(2, Strain::Clubs));
    assert_eq!(decision.convention, Some(ConventionId::Stayman));
}

#[test]
fn weak_raise_is_not_pushed_to_the_three_level() {
    // East opens 1C, South overcalls 2H. West: 7 HCP, five clubs.
    let auction = Auction::bidding(Position::East, "1C 2H");
    let decision = decide(&hand("KJ863.K74.63.852"), &auction).unwrap();
    assert_eq!(decision.call, Call::Pass);
    assert_eq!(decision.anomaly, Some(Anomaly::InappropriateAdjustment));
    assert!(
        decision
            .rationale
            .contains("hand insufficient for adjusted level 3C"),
        "unexpected rationale: {}",
        decision.rationale
    );
}

#[test]
fn double_after_responder_bid_is_penalty() {
    let auction = Auction::bidding(Position::North, "1H 1S 2C 3C P P X");
    // West is next; the context reads South's double.
    let ctx = extract(&hand("Q432.K32.J32.K32"), &auction);
    let double = ctx.last_double.unwrap();
    assert_eq!(double.seat, Position::South);
    assert_eq!(double.meaning, CallMeaning::Double(DoubleKind::Penalty));
}

#[test]
fn responder_never_makes_a_late_negative_double() {
    // South already bid 2C: a double now cannot be negative.
    let auction = Auction::bidding(Position::North, "1H 1S 2C 3C P P");
    let decision = decide(&hand("KJ32.Q32.KJ32.32"), &auction).unwrap();
    assert_ne!(decision.convention, Some(ConventionId::NegativeDouble));
    assert!(auction.is_legal(decision.call));
}

#[test]
fn immediate_double_is_negative() {
    // 6 HCP, four hearts
    let auction = Auction::bidding(Position::North, "1D 1S");
    let decision = decide(&hand("432.Q32.KJ32.432"), &auction).unwrap();
    assert_eq!(decision.call, Call::Double);
    assert_eq!(decision.convention, Some(ConventionId::NegativeDouble));
}

#[test]
fn completed_auction_is_refused() {
    let auction = Auction::bidding(Position::North, "1H P P P");
    let result = decide(&hand("Q432.K32.J32.K32"), &auction);
    assert!(matches!(result, Err(EngineError::AuctionComplete)));

    let passed_out = Auction::bidding(Position::North, "P P P P");
    assert!(matches!(
        decide(&hand("Q432.K32.J32.K32"), &passed_out),
        Err(EngineError::AuctionComplete)
    ));
}

#[test]
fn decision_splits_into_call_and_rationale() {
    let auction = Auction::new(Position::North);
    // 15 HCP balanced
    let (call, rationale) = decide(&hand("KQ3.A32.QJ4.K432"), &auction)
        .unwrap()
        .into_parts();
    assert_eq!(call, Call::bid(1, Strain::NoTrump));
    assert!(rationale.starts_with("1NT opening: "));
}
