//! Opening bids.

use super::{nt_bid, suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::constraints::{satisfies, HandConstraint};
use crate::context::DecisionContext;
use types::{Hand, Suit};

fn notrump_opening(
    hand: &Hand,
    ctx: &DecisionContext,
    t: &Thresholds,
    level: u8,
    id: ConventionId,
) -> Option<Candidate> {
    if !ctx.is_opening_turn() || !t.contains(hand.hcp()) || !hand.is_balanced() {
        return None;
    }
    Some(Candidate::new(
        nt_bid(level),
        id,
        Intent::Notrump,
        format!("{} HCP, balanced", hand.hcp()),
    ))
}

pub fn three_notrump(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    notrump_opening(hand, ctx, t, 3, ConventionId::ThreeNotrumpOpening)
}

pub fn two_notrump(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    notrump_opening(hand, ctx, t, 2, ConventionId::TwoNotrumpOpening)
}

pub fn one_notrump(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    notrump_opening(hand, ctx, t, 1, ConventionId::OneNotrumpOpening)
}

pub fn strong_two_clubs(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_opening_turn() || hand.hcp() < t.min_points {
        return None;
    }
    Some(Candidate::new(
        suit_bid(2, Suit::Clubs),
        ConventionId::StrongTwoClubs,
        Intent::Artificial,
        format!("{} HCP, strong and artificial", hand.hcp()),
    ))
}

/// The suit to open at the one level: the longest, higher of equal five-card
/// suits, otherwise the longer minor (1♦ with 4-4, 1♣ with 3-3).
pub fn opening_suit(hand: &Hand) -> Suit {
    let longest = hand.length(hand.longest_suit());
    if longest >= 5 {
        return hand.longest_suit();
    }
    let clubs = hand.length(Suit::Clubs);
    let diamonds = hand.length(Suit::Diamonds);
    if diamonds > clubs || (diamonds == clubs && diamonds >= 4) {
        Suit::Diamonds
    } else {
        Suit::Clubs
    }
}

pub fn one_suit(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_opening_turn() || hand.hcp() > t.max_points {
        return None;
    }
    let opens = if ctx.seat_number == 4 {
        satisfies(hand, &[HandConstraint::RuleOfFifteen])
    } else {
        hand.hcp() >= t.min_points || satisfies(hand, &[HandConstraint::RuleOfTwenty])
    };
    if !opens {
        return None;
    }
    let suit = opening_suit(hand);
    let length = hand.length(suit);
    let reason = if hand.hcp() >= t.min_points {
        format!("{} HCP, {} {}", hand.hcp(), length, suit.symbol())
    } else if ctx.seat_number == 4 {
        format!("Rule of 15 in fourth seat, {} {}", length, suit.symbol())
    } else {
        format!("Rule of 20, {} {}", length, suit.symbol())
    };
    Some(Candidate::new(
        suit_bid(1, suit),
        ConventionId::OneSuitOpening,
        Intent::NewSuit {
            suit,
            min_hcp: t.min_points.min(hand.hcp()),
            min_length: length.min(5),
        },
        reason,
    ))
}

pub fn weak_two(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_opening_turn() || ctx.seat_number == 4 || !t.contains(hand.hcp()) {
        return None;
    }
    let suit = [Suit::Spades, Suit::Hearts, Suit::Diamonds]
        .into_iter()
        .find(|&s| hand.length(s) == t.min_length)?;
    if !satisfies(hand, &[HandConstraint::GoodSuit(suit)]) {
        return None;
    }
    Some(Candidate::new(
        suit_bid(2, suit),
        ConventionId::WeakTwo,
        Intent::Preempt { suit },
        format!("{} HCP, good six-card {}", hand.hcp(), suit.symbol()),
    ))
}

pub fn preempt(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_opening_turn() || ctx.seat_number == 4 || hand.hcp() > t.max_points {
        return None;
    }
    let suit = hand.longest_suit();
    let length = hand.length(suit);
    if length < t.min_length || hand.top_honors(suit, 5) < 2 {
        return None;
    }
    let level = (length - 4).min(4);
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::Preempt,
        Intent::Preempt { suit },
        format!("{}-card {}, {} HCP", length, suit.symbol(), hand.hcp()),
    ))
}
