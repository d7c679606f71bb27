//! Responder's first call after partner opens.

use super::{cheapest_over, nt_bid, suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext, ReadCall};
use types::{Call, Hand, Strain, Suit};

/// Partner's one-level suit opening, when this is responder's first action
/// and partner has not bid again.
fn partner_one_suit(ctx: &DecisionContext) -> Option<(ReadCall, Suit)> {
    if !ctx.is_first_action() || ctx.partner_calls.len() != 1 {
        return None;
    }
    let opening = *ctx.partner_opening()?;
    if opening.call.level() != Some(1) || opening.meaning != CallMeaning::Opening {
        return None;
    }
    Some((opening, opening.call.suit()?))
}

fn stoppers_in_their_suits(hand: &Hand, ctx: &DecisionContext) -> bool {
    ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s))
}

pub fn two_club_response(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_first_action() {
        return None;
    }
    ctx.partner_opening()
        .filter(|o| o.meaning == CallMeaning::StrongTwoClubs)?;
    let hcp = hand.hcp();
    if hcp >= t.min_points {
        let mut suits: Vec<Suit> = Suit::ALL
            .into_iter()
            .filter(|&s| hand.length(s) >= t.min_length && hand.has_good_suit(s))
            .collect();
        suits.sort_by_key(|&s| (hand.length(s), s));
        if let Some(&suit) = suits.last() {
            let level = if suit.is_major() { 2 } else { 3 };
            return Some(Candidate::new(
                suit_bid(level, suit),
                ConventionId::TwoClubResponse,
                Intent::NewSuit {
                    suit,
                    min_hcp: t.min_points,
                    min_length: t.min_length,
                },
                format!("positive: {} HCP, good {}-card {}", hcp, hand.length(suit), suit.symbol()),
            ));
        }
        if hand.is_balanced() {
            return Some(Candidate::new(
                nt_bid(2),
                ConventionId::TwoClubResponse,
                Intent::Notrump,
                format!("positive: {} HCP, balanced", hcp),
            ));
        }
    }
    Some(Candidate::new(
        suit_bid(2, Suit::Diamonds),
        ConventionId::TwoClubResponse,
        Intent::Artificial,
        "waiting",
    ))
}

/// The suit of partner's weak-two opening, if we are answering one.
fn partner_weak_two(ctx: &DecisionContext) -> Option<Suit> {
    if !ctx.is_first_action() || ctx.partner_calls.len() != 1 {
        return None;
    }
    let opening = ctx.partner_opening()?;
    if opening.call.level() != Some(2) || opening.meaning != CallMeaning::Opening {
        return None;
    }
    opening.call.suit()
}

pub fn weak_two_game_raise(
    hand: &Hand,
    ctx: &DecisionContext,
    t: &Thresholds,
) -> Option<Candidate> {
    let suit = partner_weak_two(ctx)?;
    let points = hand.support_points(suit);
    if !suit.is_major() || hand.length(suit) < t.min_length || points < t.min_points {
        return None;
    }
    Some(Candidate::new(
        suit_bid(4, suit),
        ConventionId::WeakTwoGameRaise,
        Intent::Raise {
            suit,
            min_points: t.min_points,
            min_support: t.min_length,
        },
        format!("{} support points, game", points),
    ))
}

pub fn weak_two_response(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let suit = partner_weak_two(ctx)?;
    let support = hand.length(suit);
    let id = ConventionId::WeakTwoResponse;
    if hand.hcp() >= t.min_points {
        return Some(Candidate::new(
            nt_bid(2),
            id,
            Intent::Artificial,
            format!("{} HCP, asking for a feature", hand.hcp()),
        ));
    }
    if support >= t.min_length {
        return Some(Candidate::new(
            suit_bid(3, suit),
            id,
            Intent::Raise {
                suit,
                min_points: 0,
                min_support: t.min_length,
            },
            format!("{}-card support, preemptive raise", support),
        ));
    }
    Some(Candidate::pass(id, "no fit and no game interest"))
}

pub fn jacoby_2nt(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let (_, suit) = partner_one_suit(ctx)?;
    if !suit.is_major() || !ctx.rho_passed() || ctx.passed_hand {
        return None;
    }
    if hand.hcp() < t.min_points || hand.length(suit) < t.min_length {
        return None;
    }
    Some(Candidate::new(
        nt_bid(2),
        ConventionId::Jacoby2nt,
        Intent::Artificial,
        format!(
            "{} HCP, {}-card {} support, game forcing",
            hand.hcp(),
            hand.length(suit),
            suit.symbol()
        ),
    ))
}

pub fn major_raise(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let (_, suit) = partner_one_suit(ctx)?;
    if !suit.is_major() {
        return None;
    }
    let support = hand.length(suit);
    if support < t.min_length {
        return None;
    }
    let points = hand.support_points(suit);
    let hcp = hand.hcp();
    let id = ConventionId::MajorRaise;
    let raise = |level: u8, min_points: u8, min_support: u8, reason: String| {
        Candidate::new(
            suit_bid(level, suit),
            id,
            Intent::Raise {
                suit,
                min_points,
                min_support,
            },
            reason,
        )
    };
    if support >= 5 && hcp < 10 {
        return Some(raise(
            4,
            0,
            5,
            format!("{}-card support, {} HCP, preemptive", support, hcp),
        ));
    }
    if points < t.min_points {
        return None;
    }
    let limit = t.max_points.saturating_sub(1);
    if points < limit {
        return Some(raise(
            2,
            t.min_points,
            t.min_length,
            format!("{} support points, {}-card support", points, support),
        ));
    }
    if points <= t.max_points {
        return Some(raise(
            3,
            limit,
            t.min_length,
            format!("limit raise: {} support points", points),
        ));
    }
    if support >= 4 {
        return Some(raise(
            4,
            t.max_points.saturating_add(1),
            4,
            format!("{} support points, four-card support, game", points),
        ));
    }
    None
}

pub fn jump_shift(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let (opening, partner_suit) = partner_one_suit(ctx)?;
    if ctx.passed_hand || hand.hcp() < t.min_points {
        return None;
    }
    let suit = Suit::ALL
        .into_iter()
        .filter(|&s| s != partner_suit && hand.length(s) >= t.min_length)
        .max_by_key(|&s| hand.length(s))?;
    let level = cheapest_over(opening.call, Strain::from(suit)) + 1;
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::JumpShift,
        Intent::NewSuit {
            suit,
            min_hcp: t.min_points,
            min_length: t.min_length,
        },
        format!("{} HCP, {}-card {}, slam interest", hand.hcp(), hand.length(suit), suit.symbol()),
    ))
}

/// Minimum HCP and length for a new suit at `level` over `opening`.
fn new_suit_requirement(level: u8, suit: Suit, opening: Suit, t: &Thresholds) -> (u8, u8) {
    match level {
        1 => (t.min_points, t.min_length),
        _ if suit == Suit::Hearts && opening == Suit::Spades => (10, 5),
        _ => (10, t.min_length),
    }
}

pub fn new_suit(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let (opening, partner_suit) = partner_one_suit(ctx)?;
    let hcp = hand.hcp();
    let mut options: Vec<(Suit, u8, (u8, u8))> = Suit::ALL
        .into_iter()
        .filter(|&s| s != partner_suit)
        .map(|s| {
            let level = cheapest_over(opening.call, Strain::from(s));
            (s, level, new_suit_requirement(level, s, partner_suit, t))
        })
        .filter(|&(s, level, (min_hcp, min_len))| {
            level <= 2 && hcp >= min_hcp && hand.length(s) >= min_len
        })
        .collect();
    if options.is_empty() {
        return None;
    }
    if hcp < 11 && options.iter().any(|&(s, level, _)| level == 1 && s.is_major()) {
        options.retain(|&(s, level, _)| level == 1 && s.is_major());
    }
    let longest = options.iter().map(|&(s, ..)| hand.length(s)).max()?;
    options.retain(|&(s, ..)| hand.length(s) == longest);
    // Longest first; higher of five-card suits, up the line with fours.
    let &(suit, level, (min_hcp, min_length)) = if longest >= 5 {
        options.last()?
    } else {
        options.first()?
    };
    let forcing = if ctx.passed_hand { "" } else { ", forcing" };
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::NewSuitResponse,
        Intent::NewSuit {
            suit,
            min_hcp,
            min_length,
        },
        format!("{} HCP, {}-card {}{}", hcp, hand.length(suit), suit.symbol(), forcing),
    ))
}

pub fn minor_raise(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let (_, suit) = partner_one_suit(ctx)?;
    if !suit.is_minor() {
        return None;
    }
    let needed = if suit == Suit::Clubs {
        t.min_length.saturating_add(1)
    } else {
        t.min_length
    };
    let support = hand.length(suit);
    if support < needed {
        return None;
    }
    let points = hand.support_points(suit);
    let limit = t.max_points.saturating_sub(1);
    let (level, min_points, reason) = if (t.min_points..limit).contains(&points) {
        (2, t.min_points, format!("{} support points, {}-card support", points, support))
    } else if (limit..=t.max_points).contains(&points) {
        (3, limit, format!("limit raise: {} support points", points))
    } else {
        return None;
    };
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::MinorRaise,
        Intent::Raise {
            suit,
            min_points,
            min_support: needed,
        },
        reason,
    ))
}

pub fn notrump_response(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    partner_one_suit(ctx)?;
    if !stoppers_in_their_suits(hand, ctx) {
        return None;
    }
    let hcp = hand.hcp();
    let (call, reason): (Call, &str) = match hcp {
        _ if hcp < t.min_points || hcp > t.max_points => return None,
        h if h <= 10 => (nt_bid(1), "no fit, nothing to bid at the one level"),
        13..=15 if hand.is_balanced() => (nt_bid(2), "balanced, game forcing"),
        16..=u8::MAX if hand.is_balanced() => (nt_bid(3), "balanced, to play"),
        _ => return None,
    };
    Some(Candidate::new(
        call,
        ConventionId::NotrumpResponse,
        Intent::Notrump,
        format!("{} HCP, {}", hcp, reason),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::{propose, propose_candidate};
    use crate::context::extract;
    use crate::requirements::revalidate;
    use types::Auction;
    use types::Position::*;

    #[test]
    fn test_simple_major_raise() {
        // 9 HCP, three hearts, no shortness
        assert_eq!(
            propose(ConventionId::MajorRaise, "J32.K32.K32.Q432", North, "1H P"),
            Some(Call::bid(2, Strain::Hearts))
        );
    }

    #[test]
    fn test_limit_raise_counts_shortness() {
        // 10 HCP plus a doubleton
        let candidate =
            propose_candidate(ConventionId::MajorRaise, "32.A32.K432.K432", North, "1H P").unwrap();
        assert_eq!(candidate.call, Call::bid(3, Strain::Hearts));
        assert!(matches!(candidate.intent, Intent::Raise { min_points: 11, .. }));
    }

    #[test]
    fn test_jacoby_2nt() {
        // 16 HCP, four hearts
        let hand = "32.AK32.KQ32.A32";
        assert_eq!(
            propose(ConventionId::Jacoby2nt, hand, North, "1H P"),
            Some(Call::bid(2, Strain::NoTrump))
        );
        assert_eq!(propose(ConventionId::Jacoby2nt, hand, North, "1H 2C"), None);
    }

    #[test]
    fn test_new_suit_choice() {
        // five spades over 1♦
        assert_eq!(
            propose(ConventionId::NewSuitResponse, "32.32.KJ32.AQ432", North, "1D P"),
            Some(Call::bid(1, Strain::Spades))
        );
        // four-four majors: up the line
        assert_eq!(
            propose(ConventionId::NewSuitResponse, "432.32.KJ32.AQ32", North, "1C P"),
            Some(Call::bid(1, Strain::Hearts))
        );
        // 11 HCP bids a two-level suit
        assert_eq!(
            propose(ConventionId::NewSuitResponse, "AQ432.K32.Q32.32", North, "1S P"),
            Some(Call::bid(2, Strain::Clubs))
        );
        // 9 HCP cannot
        assert_eq!(
            propose(ConventionId::NewSuitResponse, "AQ432.K32.432.32", North, "1S P"),
            None
        );
    }

    #[test]
    fn test_minor_raise() {
        assert_eq!(
            propose(ConventionId::MinorRaise, "432.KJ32.432.Q32", North, "1D P"),
            Some(Call::bid(2, Strain::Diamonds))
        );
        // four clubs are not enough to raise 1♣
        assert_eq!(
            propose(ConventionId::MinorRaise, "KJ32.432.432.Q32", North, "1C P"),
            None
        );
    }

    #[test]
    fn test_notrump_responses() {
        assert_eq!(
            propose(ConventionId::NotrumpResponse, "K32.Q432.32.KJ32", North, "1H P"),
            Some(Call::bid(1, Strain::NoTrump))
        );
        // 15 HCP balanced
        assert_eq!(
            propose(ConventionId::NotrumpResponse, "KQ3.AJ32.K32.Q32", North, "1S P"),
            Some(Call::bid(2, Strain::NoTrump))
        );
    }

    #[test]
    fn test_two_club_responses() {
        assert_eq!(
            propose(ConventionId::TwoClubResponse, "32.432.KQJ32.432", North, "2C P"),
            Some(Call::bid(2, Strain::Diamonds))
        );
        assert_eq!(
            propose(ConventionId::TwoClubResponse, "32.432.KQJ32.A32", North, "2C P"),
            Some(Call::bid(2, Strain::Hearts))
        );
    }

    #[test]
    fn test_weak_two_responses() {
        // 16 HCP with three spades
        assert_eq!(
            propose(ConventionId::WeakTwoGameRaise, "A32.A32.KQ32.K32", North, "2S P"),
            Some(Call::bid(4, Strain::Spades))
        );
        assert_eq!(
            propose(ConventionId::WeakTwoResponse, "A32.A32.KQ32.K32", North, "2S P"),
            Some(Call::bid(2, Strain::NoTrump))
        );
        assert_eq!(
            propose(ConventionId::WeakTwoResponse, "A32.A32.KQ2.J432", North, "2S P"),
            Some(Call::bid(3, Strain::Spades))
        );
    }

    #[test]
    fn test_preemptive_raise_is_judged_as_a_raise() {
        // 14 HCP, four spades
        let hand = Hand::parse("A32.A32.KQ2.J432").unwrap();
        let ctx = extract(&hand, &Auction::bidding(North, "2S P"));
        let candidate =
            propose_candidate(ConventionId::WeakTwoResponse, "A32.A32.KQ2.J432", North, "2S P")
                .unwrap();
        assert_eq!(
            candidate.intent,
            Intent::Raise {
                suit: Suit::Spades,
                min_points: 0,
                min_support: 3
            }
        );
        // Pushed to 4S the raise needs a fourth trump, not eight spades.
        assert_eq!(revalidate(&hand, &ctx, &candidate.intent, 3, 4), Ok(()));
    }
}
