//! Competitive calls: doubles, redoubles, overcalls and balancing.

use super::{suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext, DoubleKind};
use types::{Call, Hand, Strain, Suit};

/// The most recent non-pass call is an opponent's bid.
pub(super) fn can_double(ctx: &DecisionContext) -> bool {
    ctx.history
        .calls
        .iter()
        .rev()
        .find(|c| !c.call.is_pass())
        .is_some_and(|c| c.call.is_bid() && c.seat.is_opponent_of(ctx.seat))
}

/// The opponents' one-level suit opening with nothing bid over it yet.
fn bare_opening_suit(ctx: &DecisionContext) -> Option<Suit> {
    let opening = ctx.opponent_opening()?;
    let untouched = ctx.last_bid.is_some_and(|b| b.call == opening.call);
    if opening.call.level() != Some(1) || !untouched {
        return None;
    }
    opening.call.suit()
}

/// This seat is about to make its side's first non-pass call over an
/// opposing opening.
fn side_silent(ctx: &DecisionContext) -> bool {
    ctx.opponent_opening().is_some() && ctx.my_calls.is_empty() && ctx.partner_calls.is_empty()
}

pub fn strength_redouble(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    let opening = ctx.partner_opening()?;
    if opening.call.level() != Some(1) || !ctx.is_first_action() || ctx.partner_calls.len() != 1 {
        return None;
    }
    let rho = ctx.rho_last?;
    if rho.meaning != CallMeaning::Double(DoubleKind::Takeout) || hand.hcp() < t.min_points {
        return None;
    }
    Some(Candidate::new(
        Call::Redouble,
        ConventionId::StrengthRedouble,
        Intent::Artificial,
        format!("{} HCP after the takeout double", hand.hcp()),
    ))
}

pub fn negative_double(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    ctx.partner_opening()?;
    if !can_double(ctx) || ctx.history.classify_double(ctx.seat) != DoubleKind::Negative {
        return None;
    }
    let overcall = ctx.last_bid?;
    let level = overcall.call.level()?;
    let needed = t.min_points.saturating_add(2 * (level - 1));
    if hand.hcp() < needed {
        return None;
    }
    let majors = ctx.history.unbid_majors(ctx.seat);
    if majors.is_empty() || majors.iter().any(|&m| hand.length(m) < t.min_length) {
        return None;
    }
    // A five-card major that can be shown at the one level is bid instead.
    let biddable = majors.iter().any(|&m| {
        hand.length(m) >= 5 && ctx.cheapest_level(Strain::from(m)) == 1
    });
    if biddable {
        return None;
    }
    let shown = majors
        .iter()
        .map(|m| m.symbol().to_string())
        .collect::<Vec<_>>()
        .join(" and ");
    Some(Candidate::new(
        Call::Double,
        ConventionId::NegativeDouble,
        Intent::Artificial,
        format!("{} HCP, four-card {}", hand.hcp(), shown),
    ))
}

pub fn michaels(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || hand.hcp() < t.min_points {
        return None;
    }
    let theirs = bare_opening_suit(ctx)?;
    let five = |s: Suit| hand.length(s) >= t.min_length;
    let shows = if theirs.is_minor() {
        Suit::MAJORS.into_iter().all(five)
    } else {
        five(theirs.sibling()) && (five(Suit::Clubs) || five(Suit::Diamonds))
    };
    if !shows {
        return None;
    }
    Some(Candidate::new(
        suit_bid(2, theirs),
        ConventionId::MichaelsCuebid,
        Intent::Artificial,
        format!("{} HCP, five-five two-suiter", hand.hcp()),
    ))
}

pub fn unusual_notrump(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || hand.hcp() < t.min_points {
        return None;
    }
    bare_opening_suit(ctx)?;
    let suits = ctx.history.unusual_notrump_suits(ctx.seat);
    if suits.len() != 2 || suits.iter().any(|&s| hand.length(s) < t.min_length) {
        return None;
    }
    Some(Candidate::new(
        Call::bid(2, Strain::NoTrump),
        ConventionId::UnusualNotrump,
        Intent::Artificial,
        format!(
            "{} HCP, five-five in {} and {}",
            hand.hcp(),
            suits[0].symbol(),
            suits[1].symbol()
        ),
    ))
}

pub fn notrump_overcall(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || !t.contains(hand.hcp()) || !hand.is_balanced() {
        return None;
    }
    if ctx.cheapest_level(Strain::NoTrump) != 1
        || !ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s))
    {
        return None;
    }
    Some(Candidate::new(
        Call::bid(1, Strain::NoTrump),
        ConventionId::NotrumpOvercall,
        Intent::Notrump,
        format!("{} HCP, balanced with a stopper", hand.hcp()),
    ))
}

fn takeout_shape(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> bool {
    ctx.opponent_suits.iter().all(|&s| hand.length(s) <= 2)
        && ctx.unbid_suits().iter().all(|&s| hand.length(s) >= t.min_length)
}

pub fn takeout_double(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || !can_double(ctx) {
        return None;
    }
    if ctx.history.classify_double(ctx.seat) != DoubleKind::Takeout {
        return None;
    }
    let hcp = hand.hcp();
    let strong = hcp >= 17;
    if !strong {
        let has_overcall = Suit::ALL
            .into_iter()
            .any(|s| !ctx.opponent_suits.contains(&s) && hand.length(s) >= 5);
        if hcp < t.min_points || has_overcall || !takeout_shape(hand, ctx, t) {
            return None;
        }
    }
    let reason = if strong {
        format!("{} HCP, too strong to overcall", hcp)
    } else {
        format!("{} HCP, short in their suit, support for the others", hcp)
    };
    Some(Candidate::new(
        Call::Double,
        ConventionId::TakeoutDouble,
        Intent::Artificial,
        reason,
    ))
}

/// The best suit for a natural overcall at its cheapest level.
fn overcall_suit(hand: &Hand, ctx: &DecisionContext, min_length: u8) -> Option<Suit> {
    Suit::ALL
        .into_iter()
        .filter(|s| !ctx.opponent_suits.contains(s) && hand.length(*s) >= min_length)
        .filter(|&s| match ctx.cheapest_level(Strain::from(s)) {
            1 => hand.top_honors(s, 5) >= 2,
            _ => hand.has_good_suit(s),
        })
        .max_by_key(|&s| (hand.length(s), s))
}

pub fn simple_overcall(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || hand.hcp() > t.max_points {
        return None;
    }
    let suit = overcall_suit(hand, ctx, t.min_length)?;
    let level = ctx.cheapest_level(Strain::from(suit));
    let needed = match level {
        1 => t.min_points,
        2 => t.min_points.saturating_add(2),
        _ => return None,
    };
    if hand.hcp() < needed {
        return None;
    }
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::SimpleOvercall,
        Intent::NewSuit {
            suit,
            min_hcp: needed,
            min_length: t.min_length,
        },
        format!(
            "{} HCP, {}-card {}",
            hand.hcp(),
            hand.length(suit),
            suit.symbol()
        ),
    ))
}

pub fn jump_overcall(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !side_silent(ctx) || !t.contains(hand.hcp()) {
        return None;
    }
    let suit = Suit::ALL
        .into_iter()
        .filter(|s| !ctx.opponent_suits.contains(s) && hand.length(*s) >= t.min_length)
        .filter(|&s| hand.top_honors(s, 5) >= 2)
        .max_by_key(|&s| (hand.length(s), s))?;
    let length = hand.length(suit);
    let jump = if length > t.min_length { 2 } else { 1 };
    let level = ctx.cheapest_level(Strain::from(suit)) + jump;
    if level > 4 {
        return None;
    }
    Some(Candidate::new(
        suit_bid(level, suit),
        ConventionId::JumpOvercall,
        Intent::Preempt { suit },
        format!("{} HCP, {}-card {}", hand.hcp(), length, suit.symbol()),
    ))
}

/// Reopening after the opponents stop low: lighter notrump, takeout double
/// or suit bid than in the direct seat.
pub fn balancing(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if ctx.opponent_opening().is_none() || ctx.consecutive_passes != 2 {
        return None;
    }
    let hcp = hand.hcp();
    let id = ConventionId::Balancing;
    let stopped = ctx.opponent_suits.iter().all(|&s| hand.has_stopper(s));
    if (11..=14).contains(&hcp)
        && hand.is_balanced()
        && stopped
        && ctx.cheapest_level(Strain::NoTrump) == 1
    {
        return Some(Candidate::new(
            Call::bid(1, Strain::NoTrump),
            id,
            Intent::Notrump,
            format!("{} HCP, balanced in the pass-out seat", hcp),
        ));
    }
    let short = ctx.opponent_suits.iter().all(|&s| hand.length(s) <= 2);
    if hcp > t.min_points && short && can_double(ctx) {
        return Some(Candidate::new(
            Call::Double,
            id,
            Intent::Artificial,
            format!("{} HCP, short in their suit", hcp),
        ));
    }
    if hcp >= t.min_points {
        let suit = Suit::ALL
            .into_iter()
            .filter(|s| !ctx.opponent_suits.contains(s) && hand.length(*s) >= t.min_length)
            .max_by_key(|&s| (hand.length(s), s))?;
        let level = ctx.cheapest_level(Strain::from(suit));
        if level <= 2 {
            return Some(Candidate::new(
                suit_bid(level, suit),
                id,
                Intent::NewSuit {
                    suit,
                    min_hcp: t.min_points,
                    min_length: t.min_length,
                },
                format!("{} HCP, {}-card {}", hcp, hand.length(suit), suit.symbol()),
            ));
        }
    }
    None
}

pub fn penalty_double(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !can_double(ctx) || ctx.history.classify_double(ctx.seat) != DoubleKind::Penalty {
        return None;
    }
    let trumps = ctx.last_bid?.call.suit()?;
    if hand.length(trumps) < t.min_length
        || hand.top_honors(trumps, 5) < 2
        || hand.hcp() < t.min_points
    {
        return None;
    }
    let combined = ctx.combined_min();
    if combined < 22 {
        return None;
    }
    Some(Candidate::new(
        Call::Double,
        ConventionId::PenaltyDouble,
        Intent::Placement,
        format!(
            "{} trumps, combined {} HCP",
            hand.length(trumps),
            combined
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::propose;
    use crate::context::extract;
    use types::Auction;
    use types::Position::*;

    #[test]
    fn test_strength_redouble() {
        // 12 HCP
        assert_eq!(
            propose(ConventionId::StrengthRedouble, "K32.A32.Q432.K32", North, "1H X"),
            Some(Call::Redouble)
        );
    }

    #[test]
    fn test_negative_double_shows_unbid_major() {
        // 6 HCP, four hearts
        assert_eq!(
            propose(ConventionId::NegativeDouble, "432.Q32.KJ32.432", North, "1D 1S"),
            Some(Call::Double)
        );
        // After 1♣-1♦ both majors are promised; three spades is not enough.
        assert_eq!(
            propose(ConventionId::NegativeDouble, "432.432.KJ32.Q32", North, "1C 1D"),
            None
        );
    }

    #[test]
    fn test_negative_double_not_after_responding() {
        assert_eq!(
            propose(ConventionId::NegativeDouble, "KJ32.Q32.KJ32.32", North, "1H 1S 2C 3C P P"),
            None
        );
    }

    #[test]
    fn test_negative_double_with_extreme_thresholds() {
        // 6 HCP, four hearts; three-level interference adds 4 to the minimum.
        let hand = Hand::parse("432.Q32.KJ32.432").unwrap();
        let ctx = extract(&hand, &Auction::bidding(North, "1D 3S"));
        assert_eq!(negative_double(&hand, &ctx, &Thresholds::new(253, 255, 4)), None);
        assert!(negative_double(&hand, &ctx, &Thresholds::new(2, 40, 4)).is_some());
    }

    #[test]
    fn test_two_suited_overcalls() {
        // 11 HCP, spades and clubs over hearts
        assert_eq!(
            propose(ConventionId::MichaelsCuebid, "KQJ32.32.2.AJ432", North, "1H"),
            Some(Call::bid(2, Strain::Hearts))
        );
        // 8 HCP, both minors over spades
        assert_eq!(
            propose(ConventionId::UnusualNotrump, "KQ432.QJ432.32.2", North, "1S"),
            Some(Call::bid(2, Strain::NoTrump))
        );
    }

    #[test]
    fn test_notrump_overcall() {
        // 16 HCP, heart stopper
        assert_eq!(
            propose(ConventionId::NotrumpOvercall, "AQ3.KJ2.KJ3.Q432", North, "1H"),
            Some(Call::bid(1, Strain::NoTrump))
        );
    }

    #[test]
    fn test_takeout_double() {
        // 14 HCP, singleton heart
        assert_eq!(
            propose(ConventionId::TakeoutDouble, "KJ32.AQ32.2.K432", North, "1H"),
            Some(Call::Double)
        );
        // A five-card suit overcalls instead.
        assert_eq!(
            propose(ConventionId::TakeoutDouble, "432.32.A32.KQJ32", North, "1D"),
            None
        );
    }

    #[test]
    fn test_overcalls() {
        // 10 HCP, five spades
        assert_eq!(
            propose(ConventionId::SimpleOvercall, "432.32.A32.KQJ32", North, "1D"),
            Some(Call::bid(1, Strain::Spades))
        );
        // 6 HCP, six spades
        assert_eq!(
            propose(ConventionId::JumpOvercall, "32.32.432.KQJ432", North, "1D"),
            Some(Call::bid(2, Strain::Spades))
        );
    }

    #[test]
    fn test_balancing_notrump() {
        // 12 HCP with Qxx in hearts, West in the pass-out seat
        assert_eq!(
            propose(ConventionId::Balancing, "K32.A32.Q32.K432", North, "1H P P"),
            Some(Call::bid(1, Strain::NoTrump))
        );
    }

    #[test]
    fn test_penalty_double() {
        // 11 HCP with KJxx in their clubs after raising spades
        assert_eq!(
            propose(ConventionId::PenaltyDouble, "KJ32.A32.432.K32", North, "1S P 2S 3C P P"),
            Some(Call::Double)
        );
    }
}
