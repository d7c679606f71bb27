//! Opener's later calls, plus the placement fallback used by every role.

use super::{cheapest_over, nt_bid, suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext, DoubleKind, ReadCall};
use crate::point_ranges::PointRanges;
use types::{Call, Hand, Rank, Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strength {
    Minimum,
    Medium,
    Maximum,
}

impl Strength {
    fn of(points: u8) -> Self {
        match points {
            0..=15 => Strength::Minimum,
            16..=18 => Strength::Medium,
            _ => Strength::Maximum,
        }
    }
}

/// Partner's latest call, if partner's most recent turn was not a pass.
fn partner_just_bid(ctx: &DecisionContext) -> Option<ReadCall> {
    let last = *ctx.history.last_call_by(ctx.seat.partner())?;
    (!last.call.is_pass()).then_some(last)
}

pub fn jacoby_2nt_rebid(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let opening = ctx.my_opening()?;
    let suit = opening.call.suit()?;
    if ctx.my_calls.len() != 1 || ctx.partner_meaning() != Some(CallMeaning::Jacoby2NT) {
        return None;
    }
    let id = ConventionId::Jacoby2ntRebid;
    let side_suits = || Suit::ALL.into_iter().filter(move |&s| s != suit);
    if let Some(short) = side_suits().find(|&s| hand.length(s) <= 1) {
        return Some(Candidate::new(
            suit_bid(3, short),
            id,
            Intent::Artificial,
            format!("singleton or void in {}", short.symbol()),
        ));
    }
    if let Some(side) =
        side_suits().find(|&s| hand.length(s) >= t.min_length && hand.has_good_suit(s))
    {
        return Some(Candidate::new(
            suit_bid(4, side),
            id,
            Intent::Artificial,
            format!("good five-card {}", side.symbol()),
        ));
    }
    let hcp = hand.hcp();
    let (call, reason) = if hcp >= t.min_points.saturating_add(3) {
        (suit_bid(3, suit), "maximum, slam interest")
    } else if hcp >= t.min_points {
        (nt_bid(3), "medium, no shortness")
    } else {
        (suit_bid(4, suit), "minimum, sign-off")
    };
    Some(Candidate::new(
        call,
        id,
        Intent::Artificial,
        format!("{} HCP, {}", hcp, reason),
    ))
}

pub fn two_club_rebid(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let opening = ctx.my_opening()?;
    if opening.meaning != CallMeaning::StrongTwoClubs || ctx.my_calls.len() != 1 {
        return None;
    }
    let response = partner_just_bid(ctx)?;
    let hcp = hand.hcp();
    let id = ConventionId::TwoClubRebid;
    if hand.is_balanced() {
        let level = if hcp <= t.min_points.saturating_add(2) { 2 } else { 3 };
        let level = level.max(cheapest_over(response.call, Strain::NoTrump));
        return Some(Candidate::new(
            nt_bid(level),
            id,
            Intent::Notrump,
            format!("{} HCP, balanced", hcp),
        ));
    }
    if let Some(ps) = response.natural_suit() {
        if hand.length(ps) >= 3 {
            return Some(Candidate::new(
                suit_bid(cheapest_over(response.call, Strain::from(ps)), ps),
                id,
                Intent::Raise {
                    suit: ps,
                    min_points: t.min_points,
                    min_support: 3,
                },
                format!("support for partner's {}", ps.symbol()),
            ));
        }
    }
    let suit = hand.longest_suit();
    let length = hand.length(suit);
    Some(Candidate::new(
        suit_bid(cheapest_over(response.call, Strain::from(suit)), suit),
        id,
        Intent::NewSuit {
            suit,
            min_hcp: t.min_points,
            min_length: length.min(t.min_length),
        },
        format!("{} HCP, {}-card {}", hcp, length, suit.symbol()),
    ))
}

pub fn weak_two_feature(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let opening = ctx.my_opening()?;
    let suit = opening.call.suit()?;
    if ctx.my_calls.len() != 1 || ctx.partner_meaning() != Some(CallMeaning::WeakTwoAsk) {
        return None;
    }
    let id = ConventionId::WeakTwoFeature;
    if hand.hcp() < t.min_points {
        return Some(Candidate::new(
            suit_bid(3, suit),
            id,
            Intent::Artificial,
            format!("{} HCP, minimum", hand.hcp()),
        ));
    }
    let feature = Suit::ALL.into_iter().find(|&s| {
        s != suit && (hand.has_card(s, Rank::Ace) || hand.has_card(s, Rank::King))
    });
    match feature {
        Some(f) => Some(Candidate::new(
            suit_bid(3, f),
            id,
            Intent::Artificial,
            format!("maximum with a feature in {}", f.symbol()),
        )),
        None => Some(Candidate::new(
            nt_bid(3),
            id,
            Intent::Artificial,
            "maximum, no outside feature",
        )),
    }
}

/// After a notrump opening: accept or decline partner's invitations.
fn notrump_opener_rebid(hand: &Hand, ctx: &DecisionContext) -> Option<Candidate> {
    let response = partner_just_bid(ctx)?;
    let id = ConventionId::OpenerRebid;
    let maximum = hand.hcp() + 1 >= ctx.my_model.max_hcp();
    let partner_major = Suit::MAJORS
        .into_iter()
        .find(|&s| ctx.partner_model.min_length(s) >= 5);
    let fit = partner_major.filter(|&s| hand.length(s) + ctx.partner_model.min_length(s) >= 8);
    let level = response.call.level()?;
    match response.meaning {
        CallMeaning::Notrump => {
            if let Some(s) = fit {
                let level = if maximum || level >= 3 { 4 } else { 3 };
                return Some(Candidate::new(
                    suit_bid(level, s),
                    id,
                    Intent::Raise {
                        suit: s,
                        min_points: 0,
                        min_support: 8 - ctx.partner_model.min_length(s),
                    },
                    format!("fit for partner's {}", s.symbol()),
                ));
            }
            let accept = match level {
                2 if maximum => Some(nt_bid(3)),
                4 if maximum => Some(nt_bid(6)),
                _ => None,
            };
            Some(match accept {
                Some(call) => Candidate::new(call, id, Intent::Notrump, "maximum, accepting"),
                None => Candidate::pass(id, "declining"),
            })
        }
        CallMeaning::Raise | CallMeaning::Rebid if !response.call.is_game_or_higher() => {
            let suit = response.call.suit()?;
            if maximum {
                Some(Candidate::new(
                    suit_bid(4, suit),
                    id,
                    Intent::Placement,
                    "maximum, accepting",
                ))
            } else {
                Some(Candidate::pass(id, "minimum, declining"))
            }
        }
        CallMeaning::Raise | CallMeaning::Rebid => Some(Candidate::pass(id, "game reached")),
        _ => None,
    }
}

pub fn opener_rebid(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let opening = *ctx.my_opening()?;
    if opening.meaning != CallMeaning::Opening {
        return None;
    }
    if opening.call.is_notrump() {
        return notrump_opener_rebid(hand, ctx);
    }
    if opening.call.level() != Some(1) || ctx.my_calls.len() != 1 {
        return None;
    }
    let my_suit = opening.call.suit()?;
    let response = partner_just_bid(ctx)?;
    let over = if response.call.is_bid() {
        response.call
    } else {
        ctx.last_bid?.call
    };
    let id = ConventionId::OpenerRebid;
    let hcp = hand.hcp();
    let points = hand.total_points();
    let strength = Strength::of(points);
    let balanced = hand.is_balanced();

    // Partner raised our suit.
    if response.meaning == CallMeaning::Raise && response.call.suit() == Some(my_suit) {
        return Some(after_raise(hand, my_suit, response, points));
    }

    let partner_suit = match response.meaning {
        CallMeaning::Double(DoubleKind::Negative) => ctx.partner_model.longest_shown_suit(),
        _ => response.natural_suit(),
    };

    // 1. Four-card support for partner's major.
    if let Some(ps) = partner_suit.filter(|&s| s.is_major() && s != my_suit) {
        if hand.length(ps) >= 4 {
            let support = hand.support_points(ps);
            let base = cheapest_over(over, Strain::from(ps));
            let (level, reason) = match Strength::of(support) {
                Strength::Minimum => (base, "minimum"),
                Strength::Medium => (base + 1, "invitational"),
                Strength::Maximum => (4, "game"),
            };
            let level = level.clamp(base, 4.max(base));
            return Some(Candidate::new(
                suit_bid(level, ps),
                id,
                Intent::Raise {
                    suit: ps,
                    min_points: PointRanges::min_points_for_suited_bid(level)
                        .saturating_sub(ctx.partner_model.min_hcp())
                        .min(support),
                    min_support: 4,
                },
                format!("{} support points, four-card support, {}", support, reason),
            ));
        }
    }

    let side_suits: Vec<Suit> = Suit::ALL
        .into_iter()
        .filter(|&s| s != my_suit && Some(s) != partner_suit && hand.length(s) >= 4)
        .collect();

    // 2. Jump shift.
    if hcp >= t.max_points.saturating_sub(2) {
        if let Some(&s) = side_suits.iter().max_by_key(|&&s| hand.length(s)) {
            let level = cheapest_over(over, Strain::from(s)) + 1;
            if level <= 3 {
                return Some(Candidate::new(
                    suit_bid(level, s),
                    id,
                    Intent::NewSuit {
                        suit: s,
                        min_hcp: t.max_points.saturating_sub(2),
                        min_length: 4,
                    },
                    format!("{} HCP, jump shift, game forcing", hcp),
                ));
            }
        }
    }

    // 3. Reverse.
    if hcp >= 17 && hand.length(my_suit) >= 5 {
        let reverse = side_suits
            .iter()
            .copied()
            .filter(|&s| s > my_suit && cheapest_over(over, Strain::from(s)) == 2)
            .max_by_key(|&s| hand.length(s));
        if let Some(s) = reverse {
            return Some(Candidate::new(
                suit_bid(2, s),
                id,
                Intent::NewSuit {
                    suit: s,
                    min_hcp: 17,
                    min_length: 4,
                },
                format!("{} HCP, reverse", hcp),
            ));
        }
    }

    // 4. A six-card suit.
    if hand.length(my_suit) >= t.min_length {
        let base = cheapest_over(over, Strain::from(my_suit));
        let level = match strength {
            Strength::Minimum => base,
            _ => base + 1,
        };
        return Some(Candidate::new(
            suit_bid(level, my_suit),
            id,
            Intent::Rebid {
                suit: my_suit,
                min_length: t.min_length,
            },
            format!("{} points, {}-card {}", points, hand.length(my_suit), my_suit.symbol()),
        ));
    }

    // 5. A lower-ranking second suit, or any suit still available at the one level.
    let second = side_suits
        .iter()
        .copied()
        .filter(|&s| {
            let level = cheapest_over(over, Strain::from(s));
            level == 1 || (level == 2 && s < my_suit)
        })
        .max_by_key(|&s| (hand.length(s), std::cmp::Reverse(s)));
    if let Some(s) = second {
        if !(balanced && response.call.is_notrump()) {
            let level = cheapest_over(over, Strain::from(s));
            return Some(Candidate::new(
                suit_bid(level, s),
                id,
                Intent::NewSuit {
                    suit: s,
                    min_hcp: 0,
                    min_length: 4,
                },
                format!("{} HCP, {}-card {}", hcp, hand.length(s), s.symbol()),
            ));
        }
    }

    // 6. Notrump by range.
    let stopped = ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s));
    if balanced && stopped {
        if response.call.is_notrump() {
            let responded_at = response.call.level().unwrap_or(1);
            let call = match (responded_at, hcp) {
                (1, 16..=17) => Some(nt_bid(2)),
                (1, 18..=u8::MAX) => Some(nt_bid(3)),
                (2, _) => Some(nt_bid(3)),
                _ => None,
            };
            return Some(match call {
                Some(c) => Candidate::new(c, id, Intent::Notrump, format!("{} HCP, balanced", hcp)),
                None => Candidate::pass(id, format!("{} HCP, balanced minimum", hcp)),
            });
        }
        let base = cheapest_over(over, Strain::NoTrump);
        let level = if hcp >= 18 { (base + 1).min(3) } else { base };
        return Some(Candidate::new(
            nt_bid(level),
            id,
            Intent::Notrump,
            format!("{} HCP, balanced", hcp),
        ));
    }

    // 7. Raise partner's minor.
    if let Some(ps) = partner_suit.filter(|&s| s.is_minor() && s != my_suit) {
        if hand.length(ps) >= 4 {
            let base = cheapest_over(over, Strain::from(ps));
            let level = if strength == Strength::Minimum { base } else { base + 1 };
            return Some(Candidate::new(
                suit_bid(level, ps),
                id,
                Intent::Raise {
                    suit: ps,
                    min_points: 0,
                    min_support: 4,
                },
                format!("four-card support for {}", ps.symbol()),
            ));
        }
    }

    // 8. Rebid the opening suit.
    if hand.length(my_suit) >= 5 {
        let level = cheapest_over(over, Strain::from(my_suit));
        return Some(Candidate::new(
            suit_bid(level, my_suit),
            id,
            Intent::Rebid {
                suit: my_suit,
                min_length: 5,
            },
            format!("{}-card {}", hand.length(my_suit), my_suit.symbol()),
        ));
    }
    None
}

fn after_raise(hand: &Hand, suit: Suit, raise: ReadCall, points: u8) -> Candidate {
    let id = ConventionId::OpenerRebid;
    let level = raise.call.level().unwrap_or(0);
    let game = Strain::from(suit).game_level();
    if level >= game {
        return Candidate::pass(id, "game reached");
    }
    let limit_raise = level >= 3;
    let strength = Strength::of(points);
    let accept = if limit_raise {
        points >= 14
    } else {
        strength == Strength::Maximum
    };
    if accept {
        let call = if suit.is_minor() && hand.is_balanced() {
            nt_bid(3)
        } else {
            suit_bid(game, suit)
        };
        return Candidate::new(
            call,
            id,
            Intent::Placement,
            format!("{} points, game opposite the raise", points),
        );
    }
    if !limit_raise && strength == Strength::Medium {
        return Candidate::new(
            suit_bid(level + 1, suit),
            id,
            Intent::Rebid {
                suit,
                min_length: hand.length(suit).min(5),
            },
            format!("{} points, invitational", points),
        );
    }
    Candidate::pass(id, format!("{} points, partner's raise is enough", points))
}

/// Later-round fallback: bid game with a fit and the values, keep a forcing
/// auction alive, or pass when the contract is right.
pub fn placement(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if ctx.is_opening_turn() || (ctx.is_first_action() && !ctx.forcing) {
        return None;
    }
    let id = ConventionId::Placement;
    let ours_at_game = ctx.last_bid.is_some_and(|b| {
        b.seat.partnership() == ctx.seat.partnership() && b.call.is_game_or_higher()
    });

    if let Some(suit) = fit_suit(hand, ctx, t) {
        let strain = Strain::from(suit);
        let points = if hand.length(suit) >= ctx.partner_model.min_length(suit) {
            hand.total_points()
        } else {
            hand.support_points(suit)
        };
        let combined = points.saturating_add(ctx.partner_model.min_hcp());
        let game = strain.game_level();
        let game_points = PointRanges::min_points_for_suited_bid(game);
        if !ours_at_game && ctx.cheapest_level(strain) <= game {
            if combined >= game_points.max(t.min_points) {
                return Some(Candidate::new(
                    suit_bid(game, suit),
                    id,
                    Intent::Placement,
                    format!("combined {} points with a {} fit", combined, suit.symbol()),
                ));
            }
            if suit.is_minor() && combined >= t.min_points && hand.is_balanced() {
                if ctx.cheapest_level(Strain::NoTrump) <= 3 {
                    return Some(Candidate::new(
                        nt_bid(3),
                        id,
                        Intent::Placement,
                        format!("combined {} points, notrump game", combined),
                    ));
                }
            }
        }
        if ctx.forcing && !ours_at_game {
            if let Some(call) = ctx.cheapest_bid(strain) {
                return Some(Candidate::new(
                    call,
                    id,
                    Intent::Placement,
                    format!("forcing auction, {} fit", suit.symbol()),
                ));
            }
        }
        return Some(Candidate::pass(id, "contract is right"));
    }

    if ctx.forcing && !ours_at_game {
        if let Some(call) = forced_bid(hand, ctx) {
            return Some(Candidate::new(
                call,
                id,
                Intent::Placement,
                "forcing auction, cheapest descriptive bid",
            ));
        }
    }
    Some(Candidate::pass(id, "contract is right"))
}

/// A suit in which the partnership holds at least `t.min_length` cards,
/// counting what partner has shown.
fn fit_suit(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Suit> {
    if let Some(agreed) = ctx.agreed_suit {
        return Some(agreed);
    }
    Suit::ALL
        .into_iter()
        .filter(|&s| ctx.partner_model.min_length(s) > 0)
        .filter(|&s| hand.length(s) + ctx.partner_model.min_length(s) >= t.min_length)
        .max_by_key(|&s| (s.is_major(), hand.length(s) + ctx.partner_model.min_length(s)))
}

fn forced_bid(hand: &Hand, ctx: &DecisionContext) -> Option<Call> {
    if let Some(ps) = ctx.partner_suit().filter(|&s| hand.length(s) >= 3) {
        return ctx.cheapest_bid(Strain::from(ps));
    }
    let longest = hand.longest_suit();
    if hand.length(longest) >= 5 {
        return ctx.cheapest_bid(Strain::from(longest));
    }
    if ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s)) {
        if let Some(call) = ctx.cheapest_bid(Strain::NoTrump) {
            return Some(call);
        }
    }
    ctx.cheapest_bid(Strain::from(longest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::propose;
    use types::Position::*;

    #[test]
    fn test_jacoby_2nt_rebids() {
        // 13 HCP, singleton spade
        assert_eq!(
            propose(ConventionId::Jacoby2ntRebid, "A432.K32.AQ432.2", North, "1H P 2N P"),
            Some(Call::bid(3, Strain::Spades))
        );
        // 16 HCP, no shortness
        assert_eq!(
            propose(ConventionId::Jacoby2ntRebid, "A32.K32.AQ432.K2", North, "1H P 2N P"),
            Some(Call::bid(3, Strain::NoTrump))
        );
    }

    #[test]
    fn test_two_club_rebid() {
        // 24 HCP balanced
        assert_eq!(
            propose(ConventionId::TwoClubRebid, "AK3.AK2.AQ32.KJ2", North, "2C P 2D P"),
            Some(Call::bid(2, Strain::NoTrump))
        );
    }

    #[test]
    fn test_weak_two_feature() {
        // 11 HCP with the club king
        assert_eq!(
            propose(ConventionId::WeakTwoFeature, "K32.32.32.AKJ932", North, "2S P 2N P"),
            Some(Call::bid(3, Strain::Clubs))
        );
    }

    #[test]
    fn test_raise_partner_major() {
        // 12 HCP, four spades
        assert_eq!(
            propose(ConventionId::OpenerRebid, "32.AQ432.K2.K432", North, "1D P 1S P"),
            Some(Call::bid(2, Strain::Spades))
        );
    }

    #[test]
    fn test_reverse() {
        // 18 HCP, five diamonds and four hearts
        assert_eq!(
            propose(ConventionId::OpenerRebid, "32.AKQ32.AQ32.K2", North, "1D P 1S P"),
            Some(Call::bid(2, Strain::Hearts))
        );
    }

    #[test]
    fn test_notrump_rebid() {
        // 14 HCP, 4-3-3-3
        assert_eq!(
            propose(ConventionId::OpenerRebid, "AQ32.K32.Q32.K32", North, "1C P 1H P"),
            Some(Call::bid(1, Strain::NoTrump))
        );
    }

    #[test]
    fn test_minimum_passes_a_raise() {
        assert_eq!(
            propose(ConventionId::OpenerRebid, "A432.K32.AQ432.2", North, "1H P 2H P"),
            Some(Call::Pass)
        );
    }

    #[test]
    fn test_notrump_invitation() {
        assert_eq!(
            propose(ConventionId::OpenerRebid, "KJ3.A32.QJ4.AQ32", North, "1N P 2N P"),
            Some(Call::bid(3, Strain::NoTrump))
        );
        assert_eq!(
            propose(ConventionId::OpenerRebid, "KQ3.A32.QJ4.K432", North, "1N P 2N P"),
            Some(Call::Pass)
        );
    }

    #[test]
    fn test_placement_accepts_invitation() {
        // 9 support points opposite a 16-18 re-raise
        assert_eq!(
            propose(ConventionId::Placement, "J32.K32.K32.Q432", North, "1H P 2H P 3H P"),
            Some(Call::bid(4, Strain::Hearts))
        );
        assert_eq!(
            propose(ConventionId::Placement, "J32.432.K32.Q432", North, "1H P 2H P 3H P"),
            Some(Call::Pass)
        );
    }

    #[test]
    fn test_placement_is_not_a_first_call() {
        assert_eq!(propose(ConventionId::Placement, "J32.432.K32.Q432", North, ""), None);
        assert_eq!(propose(ConventionId::Placement, "J32.432.K32.Q432", North, "1H"), None);
    }
}
