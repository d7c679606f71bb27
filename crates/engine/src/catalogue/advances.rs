//! Advancer's first call after partner overcalls or doubles.

use super::{cheapest_over, nt_bid, suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext, DoubleKind, ReadCall};
use types::{Hand, Strain, Suit};

/// Partner's single action this advancer is answering.
fn partner_action(ctx: &DecisionContext) -> Option<ReadCall> {
    if !ctx.is_first_action() || ctx.partner_calls.len() != 1 {
        return None;
    }
    ctx.partner_last
}

fn stopped(hand: &Hand, ctx: &DecisionContext) -> bool {
    ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s))
}

pub fn takeout_advance(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    let double = partner_action(ctx)?;
    if double.meaning != CallMeaning::Double(DoubleKind::Takeout) {
        return None;
    }
    let id = ConventionId::TakeoutAdvance;
    let theirs = ctx.opponent_suit()?;
    let doubled = ctx.last_bid?.call;
    let hcp = hand.hcp();
    let free = ctx.rho_last.is_some_and(|c| c.call.is_bid());

    let unbid = || {
        Suit::ALL
            .into_iter()
            .filter(move |s| !ctx.opponent_suits.contains(s))
    };
    let major = unbid()
        .filter(|&s| s.is_major() && hand.length(s) >= 4)
        .max_by_key(|&s| (hand.length(s), s));
    let best = major.or_else(|| unbid().max_by_key(|&s| (hand.length(s), s)))?;
    let length = hand.length(best);

    if free {
        // RHO took the pressure off: bid only with something to say.
        if hcp < 6 || length < 5 {
            return Some(Candidate::pass(id, "no obligation after RHO's bid"));
        }
        let level = ctx.cheapest_level(Strain::from(best));
        return Some(Candidate::new(
            suit_bid(level, best),
            id,
            Intent::NewSuit {
                suit: best,
                min_hcp: 6,
                min_length: 5,
            },
            format!("{} HCP, free bid in {}", hcp, best.symbol()),
        ));
    }

    if hand.length(theirs) >= 5 && hand.top_honors(theirs, 5) >= 3 && hcp >= 8 {
        return Some(Candidate::pass(
            id,
            format!("converting for penalties with {} {}", hand.length(theirs), theirs.symbol()),
        ));
    }
    if hcp >= 12 {
        return Some(Candidate::new(
            suit_bid(cheapest_over(doubled, Strain::from(theirs)), theirs),
            id,
            Intent::Artificial,
            format!("{} HCP, cuebid", hcp),
        ));
    }
    let base = cheapest_over(doubled, Strain::from(best));
    if hcp >= 9 && length >= 4 {
        return Some(Candidate::new(
            suit_bid(base + 1, best),
            id,
            Intent::NewSuit {
                suit: best,
                min_hcp: 9,
                min_length: 4,
            },
            format!("{} HCP, jump in {}", hcp, best.symbol()),
        ));
    }
    if major.is_none() && stopped(hand, ctx) {
        let level = cheapest_over(doubled, Strain::NoTrump);
        let call = match (hcp, level) {
            (6..=10, 1) => Some(nt_bid(1)),
            (11..=12, 1 | 2) => Some(nt_bid(2)),
            _ => None,
        };
        if let Some(call) = call {
            return Some(Candidate::new(
                call,
                id,
                Intent::Notrump,
                format!("{} HCP with a stopper in {}", hcp, theirs.symbol()),
            ));
        }
    }
    Some(Candidate::new(
        suit_bid(base, best),
        id,
        Intent::NewSuit {
            suit: best,
            min_hcp: 0,
            min_length: length.min(4),
        },
        format!("{} HCP, forced to bid, {}-card {}", hcp, length, best.symbol()),
    ))
}

pub fn two_suited_advance(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let overcall = partner_action(ctx)?;
    if !matches!(
        overcall.meaning,
        CallMeaning::Michaels | CallMeaning::UnusualNotrump
    ) {
        return None;
    }
    let id = ConventionId::TwoSuitedAdvance;
    let shown: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&s| ctx.partner_model.min_length(s) >= 5)
        .collect();
    let game_major = shown
        .iter()
        .copied()
        .filter(|&s| s.is_major() && hand.length(s) >= t.min_length)
        .max_by_key(|&s| hand.length(s));
    if let (Some(major), true) = (game_major, hand.hcp() >= t.min_points) {
        return Some(Candidate::new(
            suit_bid(4, major),
            id,
            Intent::Placement,
            format!("{} HCP, fit for partner's {}", hand.hcp(), major.symbol()),
        ));
    }
    // Preference: the longer holding, the cheaper suit on ties.
    let suit = shown
        .iter()
        .copied()
        .max_by_key(|&s| (hand.length(s), std::cmp::Reverse(s)))?;
    if !ctx.rho_passed() && hand.length(suit) < 3 {
        return Some(Candidate::pass(id, "no fit after RHO's bid"));
    }
    let level = cheapest_over(overcall.call, Strain::from(suit));
    Some(Candidate::new(
        suit_bid(level, suit),
        id,
        Intent::Raise {
            suit,
            min_points: 0,
            min_support: hand.length(suit).min(3),
        },
        format!("preference for {} with {}", suit.symbol(), hand.length(suit)),
    ))
}

pub fn overcall_advance(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let overcall = partner_action(ctx)?;
    let ps = overcall.call.suit()?;
    let id = ConventionId::OvercallAdvance;
    let support = hand.length(ps);
    let points = hand.support_points(ps);
    let raise_to = |level: u8| suit_bid(level, ps);
    let partner_level = overcall.call.level()?;

    match overcall.meaning {
        CallMeaning::JumpOvercall => {
            if support < t.min_length {
                return None;
            }
            let level = if points >= 14 {
                Strain::from(ps).game_level()
            } else {
                partner_level + 1
            };
            return Some(Candidate::new(
                raise_to(level),
                id,
                Intent::Raise {
                    suit: ps,
                    min_points: 0,
                    min_support: t.min_length,
                },
                format!("{} support points, {} trumps", points, support),
            ));
        }
        CallMeaning::Overcall => {}
        _ => return None,
    }

    if support >= 4 && points < t.min_points {
        return Some(Candidate::new(
            raise_to(partner_level + 2),
            id,
            Intent::Raise {
                suit: ps,
                min_points: 0,
                min_support: 4,
            },
            format!("{} support points, preemptive jump raise", points),
        ));
    }
    if support >= t.min_length && points >= 11 {
        let theirs = ctx.opponent_suit()?;
        return Some(Candidate::new(
            suit_bid(cheapest_over(overcall.call, Strain::from(theirs)), theirs),
            id,
            Intent::Artificial,
            format!("{} support points, cuebid raise", points),
        ));
    }
    if support >= t.min_length && points >= t.min_points {
        return Some(Candidate::new(
            raise_to(partner_level + 1),
            id,
            Intent::Raise {
                suit: ps,
                min_points: t.min_points,
                min_support: t.min_length,
            },
            format!("{} support points, {} trumps", points, support),
        ));
    }

    let hcp = hand.hcp();
    if hcp >= t.min_points {
        let new_suit = Suit::ALL
            .into_iter()
            .filter(|&s| s != ps && !ctx.opponent_suits.contains(&s))
            .filter(|&s| hand.length(s) >= 5 && hand.has_good_suit(s))
            .max_by_key(|&s| (hand.length(s), s));
        if let Some(s) = new_suit {
            return Some(Candidate::new(
                suit_bid(cheapest_over(overcall.call, Strain::from(s)), s),
                id,
                Intent::NewSuit {
                    suit: s,
                    min_hcp: t.min_points,
                    min_length: 5,
                },
                format!("{} HCP, good {}-card {}", hcp, hand.length(s), s.symbol()),
            ));
        }
        if stopped(hand, ctx) {
            let level = cheapest_over(overcall.call, Strain::NoTrump);
            let call = match (hcp, level) {
                (8..=11, 1) => Some(nt_bid(1)),
                (12..=14, 1 | 2) => Some(nt_bid(2)),
                _ => None,
            };
            if let Some(call) = call {
                return Some(Candidate::new(
                    call,
                    id,
                    Intent::Notrump,
                    format!("{} HCP with a stopper", hcp),
                ));
            }
        }
    }
    None
}
