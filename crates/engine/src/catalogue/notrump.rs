//! The notrump system: Stayman, Jacoby transfers, natural raises and the
//! notrump bidder's answers.

use super::{nt_bid, suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext};
use crate::point_ranges::PointRanges;
use types::{Hand, Suit};

/// Level of partner's notrump opening or 1NT overcall, when this is our
/// first chance to answer it.
fn partner_notrump(ctx: &DecisionContext) -> Option<u8> {
    if !ctx.is_first_action() {
        return None;
    }
    let last = ctx.partner_last?;
    let natural = matches!(
        last.meaning,
        CallMeaning::Opening | CallMeaning::NotrumpOvercall
    );
    if !natural || !last.call.is_notrump() || ctx.partner_calls.len() != 1 {
        return None;
    }
    last.call.level().filter(|&l| l <= 2)
}

/// Level of this seat's notrump bid, when partner has just asked about it.
fn my_notrump(ctx: &DecisionContext) -> Option<u8> {
    let [first] = ctx.my_calls.as_slice() else {
        return None;
    };
    if !first.call.is_notrump() {
        return None;
    }
    first.call.level()
}

/// A hand that transfers rather than using Stayman.
fn transfer_suit(hand: &Hand, min_length: u8) -> Option<Suit> {
    let hearts = hand.length(Suit::Hearts);
    let spades = hand.length(Suit::Spades);
    if spades >= min_length && spades >= hearts {
        Some(Suit::Spades)
    } else if hearts >= min_length {
        Some(Suit::Hearts)
    } else {
        None
    }
}

pub fn stayman(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let base = partner_notrump(ctx)?;
    if !ctx.rho_passed() {
        return None;
    }
    let needed = if base == 1 {
        t.min_points
    } else {
        t.min_points.saturating_sub(4)
    };
    if hand.hcp() < needed {
        return None;
    }
    let majors = Suit::MAJORS.map(|s| hand.length(s));
    if majors.iter().all(|&l| l < t.min_length) {
        return None;
    }
    // Five cards in one major and fewer than four in the other transfers.
    if let Some(target) = transfer_suit(hand, 5) {
        if hand.length(target.sibling()) < 4 {
            return None;
        }
    }
    Some(Candidate::new(
        suit_bid(base + 1, Suit::Clubs),
        ConventionId::Stayman,
        Intent::Artificial,
        format!("{} HCP with a four-card major, asking for majors", hand.hcp()),
    ))
}

pub fn jacoby_transfer(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let base = partner_notrump(ctx)?;
    if !ctx.rho_passed() {
        return None;
    }
    let target = transfer_suit(hand, t.min_length.max(5))?;
    let relay = match target {
        Suit::Spades => Suit::Hearts,
        _ => Suit::Diamonds,
    };
    Some(Candidate::new(
        suit_bid(base + 1, relay),
        ConventionId::JacobyTransfer,
        Intent::Artificial,
        format!(
            "{} {}, transfer to {}",
            hand.length(target),
            target.symbol(),
            target.symbol()
        ),
    ))
}

pub fn notrump_raise(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    let base = partner_notrump(ctx)?;
    if !ctx.rho_passed() && !ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s)) {
        return None;
    }
    let min = ctx.combined_min();
    let max = ctx.combined_max();
    let (call, reason) = if min >= PointRanges::GRAND_SLAM_THRESHOLD {
        (nt_bid(7), "grand slam values")
    } else if min >= PointRanges::SLAM_THRESHOLD {
        (nt_bid(6), "small slam values")
    } else if max >= PointRanges::SLAM_THRESHOLD {
        (nt_bid(4), "quantitative slam invitation")
    } else if min >= PointRanges::GAME_THRESHOLD {
        (nt_bid(3), "game values")
    } else if max >= PointRanges::GAME_THRESHOLD && base == 1 {
        (nt_bid(2), "invitational")
    } else {
        return Some(Candidate::pass(
            ConventionId::NotrumpRaise,
            format!("combined {}-{} HCP, no game", min, max),
        ));
    };
    if call.level().unwrap_or(0) <= base {
        return Some(Candidate::pass(ConventionId::NotrumpRaise, "notrump is high enough"));
    }
    Some(Candidate::new(
        call,
        ConventionId::NotrumpRaise,
        Intent::Notrump,
        format!("combined {}-{} HCP, {}", min, max, reason),
    ))
}

/// Responder's second call after Stayman or a transfer.
pub fn continuation(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    let [first] = ctx.my_calls.as_slice() else {
        return None;
    };
    let partner = ctx.partner_last?;
    let base = ctx.partner_calls.first()?.call.level()?;
    let min = ctx.combined_min();
    let max = ctx.combined_max();
    let game = PointRanges::GAME_THRESHOLD;

    match (first.meaning, partner.meaning) {
        (CallMeaning::Stayman, CallMeaning::StaymanAnswer) => {
            let shown = partner.call.suit()?;
            if shown.is_major() && hand.length(shown) >= 4 {
                let points = ctx.combined_with_support(hand, shown);
                let (level, reason) = if points >= game || base >= 2 {
                    (4, "major fit, game values")
                } else {
                    (3, "major fit, invitational")
                };
                return Some(Candidate::new(
                    suit_bid(level, shown),
                    ConventionId::NotrumpContinuation,
                    Intent::Raise {
                        suit: shown,
                        min_points: points.min(PointRanges::min_points_for_suited_bid(level)),
                        min_support: 4,
                    },
                    reason,
                ));
            }
            let (level, reason) = if min >= game || base >= 2 {
                (3, "no fit, game values")
            } else {
                (2, "no fit, invitational")
            };
            Some(Candidate::new(
                nt_bid(level),
                ConventionId::NotrumpContinuation,
                Intent::Notrump,
                reason,
            ))
        }
        (CallMeaning::JacobyTransfer(target), CallMeaning::TransferCompletion) => {
            let length = hand.length(target);
            let super_accepted = partner.call.level()? > base + 1;
            let intent = Intent::Rebid {
                suit: target,
                min_length: length.min(6),
            };
            if super_accepted {
                if min + 2 >= game {
                    return Some(Candidate::new(
                        suit_bid(4, target),
                        ConventionId::NotrumpContinuation,
                        intent,
                        "game after a super-accept",
                    ));
                }
                return Some(Candidate::pass(
                    ConventionId::NotrumpContinuation,
                    "weak hand after a super-accept",
                ));
            }
            let long = length >= 6;
            let (call, reason) = if min >= game && long {
                (suit_bid(4, target), "six-card suit, game values")
            } else if min >= game {
                (nt_bid(3), "five-card suit, game values, offering a choice")
            } else if max >= game && long && base == 1 {
                (suit_bid(3, target), "six-card suit, invitational")
            } else if max >= game && base == 1 {
                (nt_bid(2), "five-card suit, invitational")
            } else {
                return Some(Candidate::pass(
                    ConventionId::NotrumpContinuation,
                    "weak hand, transferred to play",
                ));
            };
            let intent = if call.is_notrump() {
                Intent::Notrump
            } else {
                intent
            };
            Some(Candidate::new(call, ConventionId::NotrumpContinuation, intent, reason))
        }
        _ => None,
    }
}

pub fn stayman_answer(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    my_notrump(ctx)?;
    let ask = ctx.partner_last.filter(|p| p.meaning == CallMeaning::Stayman)?;
    let level = ask.call.level()?;
    let (suit, reason) = if hand.length(Suit::Hearts) >= t.min_length {
        (Suit::Hearts, "four hearts")
    } else if hand.length(Suit::Spades) >= t.min_length {
        (Suit::Spades, "four spades, denies four hearts")
    } else {
        (Suit::Diamonds, "denies a four-card major")
    };
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::StaymanAnswer,
        Intent::Artificial,
        reason,
    ))
}

pub fn transfer_acceptance(
    hand: &Hand,
    ctx: &DecisionContext,
    t: &Thresholds,
) -> Option<Candidate> {
    my_notrump(ctx)?;
    let transfer = ctx.partner_last?;
    let CallMeaning::JacobyTransfer(target) = transfer.meaning else {
        return None;
    };
    let level = transfer.call.level()?;
    let super_accept = ctx.rho_passed()
        && level == 2
        && hand.hcp() >= t.min_points
        && hand.length(target) >= t.min_length;
    if super_accept {
        return Some(Candidate::new(
            suit_bid(3, target),
            ConventionId::TransferAcceptance,
            Intent::Artificial,
            format!("super-accept: maximum with four {}", target.symbol()),
        ));
    }
    Some(Candidate::new(
        suit_bid(level, target),
        ConventionId::TransferAcceptance,
        Intent::Artificial,
        format!("completes the transfer to {}", target.symbol()),
    ))
}
