//! Ace asks, their answers and the slam decisions that follow.

use super::{suit_bid, Candidate, ConventionId, Intent, Thresholds};
use crate::context::{CallMeaning, DecisionContext};
use crate::point_ranges::PointRanges;
use types::{Call, Hand, Strain, Suit};

/// The suit the partnership will play in: agreed, or partner's suit when
/// this hand supplies the eighth card.
fn trump_suit(hand: &Hand, ctx: &DecisionContext) -> Option<Suit> {
    ctx.agreed_suit.or_else(|| {
        ctx.partner_suit()
            .filter(|&s| hand.length(s) + ctx.partner_model.min_length(s) >= 8)
    })
}

/// Combined values counting shortness only when this hand is the dummy.
fn combined_points(hand: &Hand, ctx: &DecisionContext, trump: Suit) -> u8 {
    let own = if hand.length(trump) >= ctx.partner_model.min_length(trump) {
        hand.total_points()
    } else {
        hand.support_points(trump)
    };
    own.saturating_add(ctx.partner_model.min_hcp())
}

fn asked_already(ctx: &DecisionContext) -> bool {
    ctx.my_calls
        .iter()
        .chain(ctx.partner_calls.iter())
        .any(|c| {
            matches!(
                c.meaning,
                CallMeaning::Blackwood | CallMeaning::Gerber | CallMeaning::GrandSlamForce
            )
        })
}

pub fn blackwood(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if ctx.is_opening_turn() || asked_already(ctx) || ctx.cheapest_level(Strain::NoTrump) > 4 {
        return None;
    }
    // Over partner's notrump, 4NT is quantitative.
    if ctx.partner_last.is_some_and(|p| p.call.is_notrump()) || ctx.partner_calls.is_empty() {
        return None;
    }
    let trump = trump_suit(hand, ctx)?;
    let combined = combined_points(hand, ctx, trump);
    if combined < t.min_points {
        return None;
    }
    Some(Candidate::new(
        Call::bid(4, Strain::NoTrump),
        ConventionId::Blackwood,
        Intent::Artificial,
        format!("combined {} points in {}, asking for aces", combined, trump.symbol()),
    ))
}

/// Partner's latest action is `ask` and this hand has not answered it yet.
fn must_answer(ctx: &DecisionContext, ask: CallMeaning) -> bool {
    let answered = ctx
        .my_last()
        .is_some_and(|c| c.meaning == CallMeaning::AceResponse);
    ctx.partner_meaning() == Some(ask) && ctx.rho_passed() && !answered
}

fn ace_answer(aces: u8, steps: [Call; 4]) -> Call {
    match aces {
        1 => steps[1],
        2 => steps[2],
        3 => steps[3],
        _ => steps[0],
    }
}

pub fn blackwood_answer(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    if !must_answer(ctx, CallMeaning::Blackwood) {
        return None;
    }
    let aces = hand.aces();
    let steps = Suit::ALL.map(|s| suit_bid(5, s));
    Some(Candidate::new(
        ace_answer(aces, steps),
        ConventionId::BlackwoodAnswer,
        Intent::Artificial,
        format!("{} aces", aces),
    ))
}

pub fn gerber(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if !ctx.is_first_action() || !ctx.rho_passed() {
        return None;
    }
    let opening = ctx.partner_opening()?;
    if !opening.call.is_notrump() || !matches!(opening.call.level(), Some(1) | Some(2)) {
        return None;
    }
    if Suit::MAJORS.into_iter().any(|s| hand.length(s) >= 5) {
        return None;
    }
    let combined = ctx.combined_min();
    if combined < t.min_points {
        return None;
    }
    Some(Candidate::new(
        Call::bid(4, Strain::Clubs),
        ConventionId::Gerber,
        Intent::Artificial,
        format!("combined {} HCP, asking for aces", combined),
    ))
}

pub fn gerber_answer(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    if !must_answer(ctx, CallMeaning::Gerber) {
        return None;
    }
    let aces = hand.aces();
    let steps = [
        Call::bid(4, Strain::Diamonds),
        Call::bid(4, Strain::Hearts),
        Call::bid(4, Strain::Spades),
        Call::bid(4, Strain::NoTrump),
    ];
    Some(Candidate::new(
        ace_answer(aces, steps),
        ConventionId::GerberAnswer,
        Intent::Artificial,
        format!("{} aces", aces),
    ))
}

/// Decodes partner's step answer; the first step means none or all four,
/// which this hand's own aces settle.
fn partner_aces(answer: Call, first_step: Call, mine: u8) -> Option<u8> {
    let (Call::Bid { level, strain }, Call::Bid { level: base_level, strain: base }) =
        (answer, first_step)
    else {
        return None;
    };
    let rank = |l: u8, s: Strain| i32::from(l) * 5 + s.idx() as i32;
    let step = rank(level, strain) - rank(base_level, base);
    match step {
        0 if mine == 0 => Some(4),
        0 => Some(0),
        1..=3 => Some(step as u8),
        _ => None,
    }
}

pub fn ace_ask_follow_up(hand: &Hand, ctx: &DecisionContext, _t: &Thresholds) -> Option<Candidate> {
    let ask = *ctx.my_last()?;
    let answer = ctx.partner_last?;
    if answer.meaning != CallMeaning::AceResponse {
        return None;
    }
    let (first_step, strain) = match ask.meaning {
        CallMeaning::Blackwood => (
            Call::bid(5, Strain::Clubs),
            Strain::from(trump_suit(hand, ctx)?),
        ),
        CallMeaning::Gerber => (Call::bid(4, Strain::Diamonds), Strain::NoTrump),
        _ => return None,
    };
    let mine = hand.aces();
    let theirs = partner_aces(answer.call, first_step, mine)?;
    let missing = 4u8.saturating_sub(mine + theirs);
    let combined = match strain.to_suit() {
        Some(trump) => combined_points(hand, ctx, trump),
        None => ctx.combined_min(),
    };
    let id = ConventionId::AceAskFollowUp;
    let reason = format!("{} aces between us, combined {} points", mine + theirs, combined);

    let target = match missing {
        0 if combined >= PointRanges::GRAND_SLAM_THRESHOLD => 7,
        0 | 1 => 6,
        _ => {
            // Sign off at the cheapest level in the strain.
            return Some(match ctx.cheapest_bid(strain) {
                Some(call) if call.level() <= Some(5) => {
                    Candidate::new(call, id, Intent::Placement, format!("{}, signing off", reason))
                }
                _ => Candidate::pass(id, format!("{}, signing off", reason)),
            });
        }
    };
    if ctx.cheapest_level(strain) > target {
        return Some(Candidate::pass(id, reason));
    }
    Some(Candidate::new(
        Call::bid(target, strain),
        id,
        Intent::Placement,
        reason,
    ))
}

pub fn grand_slam_force(hand: &Hand, ctx: &DecisionContext, t: &Thresholds) -> Option<Candidate> {
    if asked_already(ctx) || ctx.cheapest_level(Strain::NoTrump) > 5 {
        return None;
    }
    let trump = ctx.agreed_suit?;
    if hand.aces() < 4 || hand.top_honors(trump, 3) > 1 {
        return None;
    }
    let combined = combined_points(hand, ctx, trump);
    if combined < t.min_points {
        return None;
    }
    Some(Candidate::new(
        Call::bid(5, Strain::NoTrump),
        ConventionId::GrandSlamForce,
        Intent::Artificial,
        format!("all four aces, asking for top {} honors", trump.symbol()),
    ))
}

pub fn grand_slam_force_answer(
    hand: &Hand,
    ctx: &DecisionContext,
    _t: &Thresholds,
) -> Option<Candidate> {
    if ctx.partner_meaning() != Some(CallMeaning::GrandSlamForce) || !ctx.rho_passed() {
        return None;
    }
    let trump = ctx.agreed_suit?;
    let honors = hand.top_honors(trump, 3);
    let level = if honors >= 2 { 7 } else { 6 };
    Some(Candidate::new(
        suit_bid(level, trump),
        ConventionId::GrandSlamForceAnswer,
        Intent::Placement,
        format!("{} of the top three {} honors", honors, trump.symbol()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::tests::propose;
    use types::Position::*;

    // 21 HCP, six spades, three aces
    const SPADES: &str = "A2.A2.KQ2.AKJ432";

    #[test]
    fn test_blackwood_after_limit_raise() {
        assert_eq!(
            propose(ConventionId::Blackwood, SPADES, North, "1S P 3S P"),
            Some(Call::bid(4, Strain::NoTrump))
        );
    }

    #[test]
    fn test_blackwood_answer() {
        // One ace
        assert_eq!(
            propose(ConventionId::BlackwoodAnswer, "K32.A32.Q32.K432", North, "1S P 3S P 4N P"),
            Some(Call::bid(5, Strain::Diamonds))
        );
    }

    #[test]
    fn test_follow_up_bids_small_slam() {
        // All four aces held, but not the values for a grand
        assert_eq!(
            propose(ConventionId::AceAskFollowUp, SPADES, North, "1S P 3S P 4N P 5D P"),
            Some(Call::bid(6, Strain::Spades))
        );
    }

    #[test]
    fn test_follow_up_signs_off() {
        // Partner shows no aces: two are missing
        assert_eq!(
            propose(ConventionId::AceAskFollowUp, "K2.A2.KQ2.AKJ432", North, "1S P 3S P 4N P 5C P"),
            Some(Call::bid(5, Strain::Spades))
        );
    }

    #[test]
    fn test_gerber() {
        // 20 HCP opposite 15-17
        assert_eq!(
            propose(ConventionId::Gerber, "AQ3.KQ2.KQ32.A32", North, "1N P"),
            Some(Call::bid(4, Strain::Clubs))
        );
        // One ace
        assert_eq!(
            propose(ConventionId::GerberAnswer, "KQ3.A32.QJ4.K432", North, "1N P 4C P"),
            Some(Call::bid(4, Strain::Hearts))
        );
    }

    #[test]
    fn test_grand_slam_force() {
        // 25 HCP, all the aces, only the ace of trumps
        assert_eq!(
            propose(ConventionId::GrandSlamForce, "AK2.AK2.AK.A5432", North, "1S P 3S P"),
            Some(Call::bid(5, Strain::NoTrump))
        );
        // Two of the top three trump honors: bid the grand
        assert_eq!(
            propose(
                ConventionId::GrandSlamForceAnswer,
                "K32.432.432.KQ32",
                North,
                "1S P 3S P 5N P",
            ),
            Some(Call::bid(7, Strain::Spades))
        );
    }

    #[test]
    fn test_partner_aces_decoding() {
        let five_clubs = Call::bid(5, Strain::Clubs);
        assert_eq!(partner_aces(five_clubs, five_clubs, 0), Some(4));
        assert_eq!(partner_aces(five_clubs, five_clubs, 2), Some(0));
        assert_eq!(partner_aces(Call::bid(5, Strain::Spades), five_clubs, 1), Some(3));
        assert_eq!(
            partner_aces(Call::bid(4, Strain::NoTrump), Call::bid(4, Strain::Diamonds), 1),
            Some(3)
        );
    }
}
