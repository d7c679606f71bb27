//! Reads an auction call by call, recording what each call means under SAYC
//! and what it promises about the caller's hand.

use super::hand_model::{HandModel, Shows};
use crate::point_ranges::PointRanges;
use serde::{Deserialize, Serialize};
use types::{Auction, Call, Partnership, Position, Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleKind {
    Takeout,
    Negative,
    Responsive,
    Penalty,
}

/// How strongly a call obliges partner to keep bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Forcing {
    #[default]
    NonForcing,
    OneRound,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMeaning {
    Pass,
    /// Natural opening bid, including notrump openings and preempts.
    Opening,
    StrongTwoClubs,
    /// 2♦ waiting response to 2♣.
    Waiting,
    /// Responder's first natural new suit.
    Response,
    Raise,
    NewSuit,
    Rebid,
    Notrump,
    JumpShift,
    Reverse,
    Stayman,
    StaymanAnswer,
    JacobyTransfer(Suit),
    TransferCompletion,
    Jacoby2NT,
    WeakTwoAsk,
    Blackwood,
    Gerber,
    GrandSlamForce,
    AceResponse,
    Overcall,
    JumpOvercall,
    NotrumpOvercall,
    Michaels,
    UnusualNotrump,
    Cuebid,
    Double(DoubleKind),
    Redouble,
}

impl CallMeaning {
    /// Meanings that promise length in the strain of the call.
    pub fn is_natural_suit(self) -> bool {
        matches!(
            self,
            CallMeaning::Opening
                | CallMeaning::Response
                | CallMeaning::Raise
                | CallMeaning::NewSuit
                | CallMeaning::Rebid
                | CallMeaning::JumpShift
                | CallMeaning::Reverse
                | CallMeaning::StaymanAnswer
                | CallMeaning::Overcall
                | CallMeaning::JumpOvercall
        )
    }
}

/// One call of the auction with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCall {
    pub seat: Position,
    pub call: Call,
    pub meaning: CallMeaning,
    pub forcing: Forcing,
}

impl ReadCall {
    /// The suit this call promises, if it is a natural suit bid.
    pub fn natural_suit(&self) -> Option<Suit> {
        if self.meaning.is_natural_suit() {
            self.call.suit()
        } else {
            None
        }
    }
}

/// The interpreted auction: every call with its meaning, plus a model of each
/// player's hand indexed by `Position::idx()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub calls: Vec<ReadCall>,
    models: [HandModel; 4],
}

impl History {
    pub fn read(auction: &Auction) -> Self {
        let mut history = History {
            calls: Vec::with_capacity(auction.calls.len()),
            models: Default::default(),
        };
        for (seat, call) in auction.iter() {
            let (meaning, forcing) = history.classify(seat, *call);
            let read = ReadCall {
                seat,
                call: *call,
                meaning,
                forcing,
            };
            for shows in history.shows(&read) {
                history.models[seat.idx()].apply(shows);
            }
            history.calls.push(read);
        }
        history
    }

    pub fn model(&self, seat: Position) -> &HandModel {
        &self.models[seat.idx()]
    }

    pub fn opening(&self) -> Option<&ReadCall> {
        self.calls.iter().find(|c| c.call.is_bid())
    }

    pub fn last_bid(&self) -> Option<&ReadCall> {
        self.calls.iter().rev().find(|c| c.call.is_bid())
    }

    /// Non-pass calls made by `seat`, oldest first.
    pub fn actions_by(&self, seat: Position) -> impl Iterator<Item = &ReadCall> {
        self.calls
            .iter()
            .filter(move |c| c.seat == seat && !c.call.is_pass())
    }

    pub fn last_action_by(&self, seat: Position) -> Option<&ReadCall> {
        self.actions_by(seat).last()
    }

    pub fn last_call_by(&self, seat: Position) -> Option<&ReadCall> {
        self.calls.iter().rev().find(|c| c.seat == seat)
    }

    pub fn last_double(&self) -> Option<&ReadCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c.call, Call::Double))
    }

    fn side_has_acted(&self, side: Partnership) -> bool {
        self.calls
            .iter()
            .any(|c| c.seat.partnership() == side && !c.call.is_pass())
    }

    fn side_has_bid(&self, side: Partnership) -> bool {
        self.calls
            .iter()
            .any(|c| c.seat.partnership() == side && c.call.is_bid())
    }

    /// Suits a side has bid naturally.
    pub fn natural_suits(&self, side: Partnership) -> Vec<Suit> {
        let mut suits = Vec::new();
        for read in self.calls.iter().filter(|c| c.seat.partnership() == side) {
            if let Some(suit) = read.natural_suit() {
                if !suits.contains(&suit) {
                    suits.push(suit);
                }
            }
        }
        suits
    }

    /// A suit in which the partnership has shown at least eight cards between
    /// them. Majors are preferred, then the longer fit.
    pub fn agreed_suit(&self, seat: Position) -> Option<Suit> {
        let mine = self.model(seat);
        let partner = self.model(seat.partner());
        let fit = |s: Suit| mine.min_length(s) + partner.min_length(s);
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
            .into_iter()
            .filter(|&s| fit(s) >= 8)
            .max_by_key(|&s| (s.is_major(), fit(s)))
    }

    /// A player who passed before their side opened the bidding.
    pub fn is_passed_hand(&self, seat: Position) -> bool {
        let first_call = self.calls.iter().find(|c| c.seat == seat);
        let side_opened_after = self
            .opening()
            .map_or(true, |o| o.seat.partnership() == seat.partnership());
        matches!(first_call, Some(c) if c.call.is_pass()) && side_opened_after
    }

    fn cheapest_level(&self, strain: Strain) -> u8 {
        match self.last_bid().map(|b| b.call) {
            Some(Call::Bid { level, strain: last }) if strain > last => level,
            Some(Call::Bid { level, .. }) => level + 1,
            _ => 1,
        }
    }

    fn rho_passed(&self) -> bool {
        self.calls.last().map_or(true, |c| c.call.is_pass())
    }

    fn classify(&self, seat: Position, call: Call) -> (CallMeaning, Forcing) {
        match call {
            Call::Pass => (CallMeaning::Pass, Forcing::NonForcing),
            Call::Double => {
                let kind = self.classify_double(seat);
                let forcing = if kind == DoubleKind::Penalty {
                    Forcing::NonForcing
                } else {
                    Forcing::OneRound
                };
                (CallMeaning::Double(kind), forcing)
            }
            Call::Redouble => (CallMeaning::Redouble, Forcing::NonForcing),
            Call::Bid { level, strain } => self.classify_bid(seat, level, strain),
        }
    }

    fn classify_bid(&self, seat: Position, level: u8, strain: Strain) -> (CallMeaning, Forcing) {
        use CallMeaning as M;
        let call = Call::Bid { level, strain };
        let partner = seat.partner();
        let side = seat.partnership();

        let Some(opening) = self.opening() else {
            if call == Call::bid(2, Strain::Clubs) {
                return (M::StrongTwoClubs, Forcing::Game);
            }
            return (M::Opening, Forcing::NonForcing);
        };

        let partner_last = self.last_action_by(partner);
        let first_action = self.actions_by(seat).next().is_none();
        let rho_passed = self.rho_passed();
        let jump = level > self.cheapest_level(strain);

        // Answers to partner's conventional calls.
        if let Some(p) = partner_last {
            match p.meaning {
                M::Blackwood if level == 5 && strain != Strain::NoTrump => {
                    return (M::AceResponse, Forcing::NonForcing)
                }
                M::Gerber if level == 4 && strain != Strain::Clubs => {
                    return (M::AceResponse, Forcing::NonForcing)
                }
                M::JacobyTransfer(target) if strain == Strain::from(target) => {
                    return (M::TransferCompletion, Forcing::NonForcing)
                }
                M::Stayman if level == p.call.level().unwrap_or(0) && strain != Strain::NoTrump => {
                    return (M::StaymanAnswer, Forcing::NonForcing)
                }
                M::StrongTwoClubs if first_action && call == Call::bid(2, Strain::Diamonds) => {
                    return (M::Waiting, Forcing::Game)
                }
                _ => {}
            }
        }

        // Ace asks.
        if call == Call::bid(4, Strain::NoTrump) {
            let partner_bid_notrump = partner_last.is_some_and(|p| p.call.is_notrump());
            if !partner_bid_notrump && self.side_has_bid(side) {
                return (M::Blackwood, Forcing::OneRound);
            }
        }
        if call == Call::bid(5, Strain::NoTrump) && self.agreed_suit(seat).is_some() {
            let used_blackwood = self
                .calls
                .iter()
                .any(|c| c.seat.partnership() == side && c.meaning == M::Blackwood);
            if !used_blackwood {
                return (M::GrandSlamForce, Forcing::OneRound);
            }
        }

        // Responses to partner's notrump, two-club and major-suit openings.
        if let Some(p) = partner_last {
            let notrump_base = matches!(p.meaning, M::Opening | M::NotrumpOvercall)
                && p.call.is_notrump()
                && matches!(p.call.level(), Some(1) | Some(2));
            if first_action && rho_passed && notrump_base {
                let base = p.call.level().unwrap_or(1);
                if call == Call::bid(4, Strain::Clubs) {
                    return (M::Gerber, Forcing::OneRound);
                }
                if level == base + 1 {
                    match strain {
                        Strain::Clubs => return (M::Stayman, Forcing::OneRound),
                        Strain::Diamonds => {
                            return (M::JacobyTransfer(Suit::Hearts), Forcing::OneRound)
                        }
                        Strain::Hearts => {
                            return (M::JacobyTransfer(Suit::Spades), Forcing::OneRound)
                        }
                        _ => {}
                    }
                }
            }
            let partner_opened = p.meaning == M::Opening && opening.seat == partner;
            if first_action && partner_opened && call == Call::bid(2, Strain::NoTrump) {
                let opened_major =
                    p.call.level() == Some(1) && p.call.strain().is_some_and(|s| s.is_major());
                let opened_weak_two = p.call.level() == Some(2) && p.call.suit().is_some();
                if opened_major && rho_passed {
                    return (M::Jacoby2NT, Forcing::Game);
                }
                if opened_weak_two {
                    return (M::WeakTwoAsk, Forcing::OneRound);
                }
            }
        }

        let our_side_opened = opening.seat.partnership() == side;

        // First action by a side whose opponents opened.
        if !our_side_opened && !self.side_has_acted(side) {
            let opening_suit = opening.call.suit().filter(|_| opening.call.level() == Some(1));
            let no_response_yet = self.last_bid().is_some_and(|b| b.call == opening.call);
            if let Some(os) = opening_suit {
                if strain == Strain::from(os) && level == 2 && no_response_yet {
                    return (M::Michaels, Forcing::OneRound);
                }
                if call == Call::bid(2, Strain::NoTrump) && jump {
                    return (M::UnusualNotrump, Forcing::OneRound);
                }
            }
            if strain == Strain::NoTrump {
                return (M::NotrumpOvercall, Forcing::NonForcing);
            }
            if jump {
                return (M::JumpOvercall, Forcing::NonForcing);
            }
            return (M::Overcall, Forcing::NonForcing);
        }

        let Some(suit) = strain.to_suit() else {
            return (M::Notrump, Forcing::NonForcing);
        };

        let opponent_suits = self.natural_suits(side.opponent());
        let our_suits = self.natural_suits(side);
        if opponent_suits.contains(&suit) && !our_suits.contains(&suit) {
            return (M::Cuebid, Forcing::OneRound);
        }
        if self.model(partner).has_shown_suit(suit) {
            return (M::Raise, Forcing::NonForcing);
        }
        if self.model(seat).has_shown_suit(suit) {
            return (M::Rebid, Forcing::NonForcing);
        }

        // A new suit.
        if our_side_opened && opening.seat == seat {
            let my_actions = self.actions_by(seat).count();
            if my_actions == 1 && opening.call.level() == Some(1) {
                if jump {
                    return (M::JumpShift, Forcing::Game);
                }
                let first_suit = opening.call.suit();
                if level == 2 && first_suit.is_some_and(|f| suit > f) {
                    return (M::Reverse, Forcing::OneRound);
                }
            }
            return (M::NewSuit, Forcing::NonForcing);
        }
        if our_side_opened {
            let forcing = if self.is_passed_hand(seat) {
                Forcing::NonForcing
            } else {
                Forcing::OneRound
            };
            if first_action {
                if jump {
                    return (M::JumpShift, Forcing::Game);
                }
                return (M::Response, forcing);
            }
            return (M::NewSuit, forcing);
        }
        (M::NewSuit, Forcing::NonForcing)
    }

    /// What a double by `seat` would mean at this point of the auction.
    pub fn classify_double(&self, seat: Position) -> DoubleKind {
        let partner = seat.partner();
        let side = seat.partnership();
        let (Some(opening), Some(doubled)) = (self.opening(), self.last_bid()) else {
            return DoubleKind::Penalty;
        };
        let i_have_acted = self.actions_by(seat).next().is_some();
        let partner_actions: Vec<&ReadCall> = self.actions_by(partner).collect();
        let doubled_suit = doubled.call.suit().is_some();
        let doubled_level = doubled.call.level().unwrap_or(0);

        if opening.seat.partnership() != side {
            if !i_have_acted && partner_actions.is_empty() {
                return if doubled_suit && doubled_level <= 4 {
                    DoubleKind::Takeout
                } else {
                    DoubleKind::Penalty
                };
            }
            let partner_doubled_for_takeout = partner_actions.len() == 1
                && partner_actions[0].meaning == CallMeaning::Double(DoubleKind::Takeout);
            if !i_have_acted
                && partner_doubled_for_takeout
                && doubled_suit
                && doubled.meaning == CallMeaning::Raise
                && doubled.seat == seat.rho()
            {
                return DoubleKind::Responsive;
            }
            return DoubleKind::Penalty;
        }

        // Negative: my first action, straight after the overcall of partner's
        // one-suit opening.
        let first_opposing_bid = self
            .calls
            .iter()
            .find(|c| c.seat.partnership() != side && c.call.is_bid())
            .is_some_and(|c| c.call == doubled.call);
        if opening.seat == partner
            && !i_have_acted
            && partner_actions.len() == 1
            && opening.call.suit().is_some()
            && doubled_suit
            && doubled_level <= 3
            && doubled.seat == seat.rho()
            && first_opposing_bid
        {
            return DoubleKind::Negative;
        }
        DoubleKind::Penalty
    }

    /// What `read` promises, given everything before it.
    fn shows(&self, read: &ReadCall) -> Vec<Shows> {
        use CallMeaning as M;
        let seat = read.seat;
        let partner = self.model(seat.partner());
        let level = read.call.level().unwrap_or(0);
        let suit = read.call.suit();
        let first_action = self.actions_by(seat).next().is_none();
        let partner_last = self.last_action_by(seat.partner()).map(|p| p.call);
        let mut shows = Vec::new();

        match read.meaning {
            M::Opening => match (level, suit) {
                (1, None) => shows.extend([Shows::MinHcp(15), Shows::MaxHcp(17), Shows::Balanced]),
                (2, None) => shows.extend([Shows::MinHcp(20), Shows::MaxHcp(21), Shows::Balanced]),
                (3, None) => shows.extend([Shows::MinHcp(25), Shows::MaxHcp(27), Shows::Balanced]),
                (1, Some(s)) => {
                    let len = if s.is_major() { 5 } else { 3 };
                    shows.extend([Shows::MinHcp(11), Shows::MaxHcp(21), Shows::MinLength(s, len)]);
                }
                (2, Some(s)) => {
                    shows.extend([Shows::MinHcp(5), Shows::MaxHcp(11), Shows::MinLength(s, 6)])
                }
                (_, Some(s)) => {
                    shows.extend([Shows::MaxHcp(10), Shows::MinLength(s, (level + 4).min(8))])
                }
                _ => {}
            },
            M::StrongTwoClubs => shows.push(Shows::MinHcp(22)),
            M::Response => {
                if let Some(s) = suit {
                    let (hcp, len) = match level {
                        1 => (6, 4),
                        2 => (10, 4),
                        _ => (10, 5),
                    };
                    shows.extend([Shows::MinHcp(hcp), Shows::MinLength(s, len)]);
                }
            }
            M::JumpShift => {
                if let Some(s) = suit {
                    shows.extend([Shows::MinHcp(19), Shows::MinLength(s, 4)]);
                }
            }
            M::Reverse => {
                if let Some(s) = suit {
                    shows.extend([Shows::MinHcp(17), Shows::MinLength(s, 4)]);
                }
                if let Some(first) = self.opening().and_then(|o| o.call.suit()) {
                    shows.push(Shows::MinLength(first, 5));
                }
            }
            M::Raise => {
                if let Some(s) = suit {
                    let support = 8u8.saturating_sub(partner.min_length(s)).clamp(3, 4);
                    shows.push(Shows::MinLength(s, support));
                    let partner_level = partner_last.and_then(|c| c.level()).unwrap_or(0);
                    let first_raise =
                        first_action && partner_last.and_then(|c| c.suit()) == Some(s);
                    match level.saturating_sub(partner_level) {
                        1 if first_raise => shows.extend([Shows::MinHcp(6), Shows::MaxHcp(10)]),
                        2 if first_raise && level < 4 => {
                            shows.extend([Shows::MinHcp(10), Shows::MaxHcp(12)])
                        }
                        _ => shows.push(Shows::MinHcp(
                            PointRanges::min_points_for_suited_bid(level)
                                .saturating_sub(partner.min_hcp())
                                .min(30),
                        )),
                    }
                }
            }
            M::Rebid => {
                if let Some(s) = suit {
                    let opener = self.opening().is_some_and(|o| o.seat == seat);
                    let partner_raised = self
                        .last_action_by(seat.partner())
                        .is_some_and(|p| p.meaning == M::Raise && p.call.suit() == Some(s));
                    if partner_raised {
                        // A re-raise below game invites.
                        if opener && !read.call.is_game_or_higher() {
                            shows.extend([Shows::MinHcp(16), Shows::MaxHcp(18)]);
                        }
                    } else {
                        let shown = self.model(seat).min_length(s);
                        shows.push(Shows::MinLength(s, (shown + 1).clamp(5, 6)));
                        if opener && level > self.cheapest_level(Strain::from(s)) {
                            shows.extend([Shows::MinHcp(16), Shows::MaxHcp(18)]);
                        } else if opener && level == 2 {
                            shows.push(Shows::MaxHcp(15));
                        }
                    }
                }
            }
            M::NewSuit => {
                if let Some(s) = suit {
                    shows.push(Shows::MinLength(s, 4));
                    let needed = PointRanges::min_points_for_suited_bid(level)
                        .saturating_sub(partner.min_hcp().max(6));
                    shows.push(Shows::MinHcp(needed.min(30)));
                }
            }
            M::Notrump => {
                let partner_opened_suit = self
                    .opening()
                    .is_some_and(|o| o.seat == seat.partner() && o.call.suit().is_some());
                let i_opened = self.opening().is_some_and(|o| o.seat == seat);
                match level {
                    1 if first_action && partner_opened_suit => {
                        shows.extend([Shows::MinHcp(6), Shows::MaxHcp(10)])
                    }
                    2 if first_action && partner_opened_suit => {
                        shows.extend([Shows::MinHcp(13), Shows::MaxHcp(15), Shows::Balanced])
                    }
                    3 if first_action && partner_opened_suit => {
                        shows.extend([Shows::MinHcp(16), Shows::MaxHcp(17), Shows::Balanced])
                    }
                    1 if i_opened => {
                        shows.extend([Shows::MinHcp(12), Shows::MaxHcp(14), Shows::Balanced])
                    }
                    2 if i_opened && partner_last.and_then(|c| c.level()) == Some(1) => {
                        shows.extend([Shows::MinHcp(18), Shows::MaxHcp(19), Shows::Balanced])
                    }
                    _ => shows.push(Shows::MinHcp(
                        PointRanges::min_points_for_nt_bid(level)
                            .saturating_sub(partner.min_hcp())
                            .min(30),
                    )),
                }
            }
            M::StaymanAnswer => {
                if let Some(s) = suit {
                    shows.push(Shows::MinLength(s, 4));
                }
            }
            M::Stayman => shows.push(Shows::MinHcp(8)),
            M::JacobyTransfer(target) => shows.push(Shows::MinLength(target, 5)),
            M::Jacoby2NT => {
                shows.push(Shows::MinHcp(13));
                if let Some(s) = partner_last.and_then(|c| c.suit()) {
                    shows.push(Shows::MinLength(s, 4));
                }
            }
            M::WeakTwoAsk => shows.push(Shows::MinHcp(14)),
            M::Overcall => {
                if let Some(s) = suit {
                    let min = if level <= 1 { 8 } else { 10 };
                    shows.extend([Shows::MinHcp(min), Shows::MaxHcp(16), Shows::MinLength(s, 5)]);
                }
            }
            M::JumpOvercall => {
                if let Some(s) = suit {
                    let len = if level >= 3 { 7 } else { 6 };
                    shows.extend([Shows::MaxHcp(10), Shows::MinLength(s, len)]);
                }
            }
            M::NotrumpOvercall => {
                if level == 1 {
                    shows.extend([Shows::MinHcp(15), Shows::MaxHcp(18), Shows::Balanced]);
                }
            }
            M::Michaels => {
                shows.push(Shows::MinHcp(8));
                for s in self.michaels_suits(read) {
                    shows.push(Shows::MinLength(s, 5));
                }
            }
            M::UnusualNotrump => {
                shows.push(Shows::MinHcp(8));
                for s in self.unusual_notrump_suits(seat) {
                    shows.push(Shows::MinLength(s, 5));
                }
            }
            M::Cuebid => shows.push(Shows::MinHcp(10)),
            M::Double(DoubleKind::Takeout) => shows.push(Shows::MinHcp(11)),
            M::Double(DoubleKind::Negative) => {
                shows.push(Shows::MinHcp(if level <= 1 { 6 } else { 8 }));
                for s in self.unbid_majors(seat) {
                    shows.push(Shows::MinLength(s, 4));
                }
            }
            M::Double(DoubleKind::Responsive) => shows.push(Shows::MinHcp(8)),
            M::Redouble => shows.push(Shows::MinHcp(10)),
            M::Pass
            | M::Waiting
            | M::TransferCompletion
            | M::Blackwood
            | M::Gerber
            | M::GrandSlamForce
            | M::AceResponse
            | M::Double(DoubleKind::Penalty) => {}
        }
        shows
    }

    /// Majors nobody at the table has bid naturally.
    pub fn unbid_majors(&self, seat: Position) -> Vec<Suit> {
        let ours = self.natural_suits(seat.partnership());
        let theirs = self.natural_suits(seat.partnership().opponent());
        Suit::MAJORS
            .into_iter()
            .filter(|s| !ours.contains(s) && !theirs.contains(s))
            .collect()
    }

    /// The two suits a Michaels cuebid promises; over a major only the other
    /// major is known.
    pub fn michaels_suits(&self, read: &ReadCall) -> Vec<Suit> {
        match read.call.suit() {
            Some(s) if s.is_minor() => Suit::MAJORS.to_vec(),
            Some(s) => vec![s.sibling()],
            None => Vec::new(),
        }
    }

    /// The two lowest suits the opponents have not bid.
    pub fn unusual_notrump_suits(&self, seat: Position) -> Vec<Suit> {
        let theirs = self.natural_suits(seat.partnership().opponent());
        Suit::ALL
            .into_iter()
            .filter(|s| !theirs.contains(s))
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Position::*;

    fn read(dealer: Position, calls: &str) -> History {
        History::read(&Auction::bidding(dealer, calls))
    }

    fn meanings(history: &History) -> Vec<CallMeaning> {
        history.calls.iter().map(|c| c.meaning).collect()
    }

    #[test]
    fn test_double_after_new_suit_is_penalty() {
        let history = read(North, "1H 1S 2C 3C P P X");
        let double = history.last_double().unwrap();
        assert_eq!(double.seat, South);
        assert_eq!(
            double.meaning,
            CallMeaning::Double(DoubleKind::Penalty),
            "responder already bid 2C, so the double cannot be negative"
        );
    }

    #[test]
    fn test_negative_double() {
        let history = read(North, "1H 1S X");
        assert_eq!(
            history.calls[2].meaning,
            CallMeaning::Double(DoubleKind::Negative)
        );
        assert_eq!(history.calls[2].forcing, Forcing::OneRound);
        assert_eq!(history.model(South).min_length(Suit::Spades), 0);
    }

    #[test]
    fn test_takeout_and_penalty_doubles() {
        let history = read(North, "1D X");
        assert_eq!(
            history.calls[1].meaning,
            CallMeaning::Double(DoubleKind::Takeout)
        );
        let history = read(North, "1N X");
        assert_eq!(
            history.calls[1].meaning,
            CallMeaning::Double(DoubleKind::Penalty)
        );
        let history = read(North, "1D X 2D X");
        assert_eq!(
            history.calls[3].meaning,
            CallMeaning::Double(DoubleKind::Responsive)
        );
    }

    #[test]
    fn test_notrump_conventions() {
        let history = read(North, "1N P 2C P 2H P");
        assert_eq!(
            meanings(&history),
            vec![
                CallMeaning::Opening,
                CallMeaning::Pass,
                CallMeaning::Stayman,
                CallMeaning::Pass,
                CallMeaning::StaymanAnswer,
                CallMeaning::Pass,
            ]
        );
        let history = read(North, "1N P 2H P 2S");
        assert_eq!(history.calls[2].meaning, CallMeaning::JacobyTransfer(Suit::Spades));
        assert_eq!(history.calls[4].meaning, CallMeaning::TransferCompletion);
        assert_eq!(history.model(South).min_length(Suit::Spades), 5);
    }

    #[test]
    fn test_interference_turns_off_stayman() {
        let history = read(North, "1N 2D 3C");
        assert_ne!(history.calls[2].meaning, CallMeaning::Stayman);
    }

    #[test]
    fn test_responses_and_rebids() {
        let history = read(North, "1D P 1S P 2H");
        assert_eq!(history.calls[2].meaning, CallMeaning::Response);
        assert_eq!(history.calls[2].forcing, Forcing::OneRound);
        assert_eq!(history.calls[4].meaning, CallMeaning::Reverse);

        let history = read(North, "1C P 1H P 2S");
        assert_eq!(history.calls[4].meaning, CallMeaning::JumpShift);
        assert_eq!(history.calls[4].forcing, Forcing::Game);

        let history = read(North, "1H P 2H");
        assert_eq!(history.calls[2].meaning, CallMeaning::Raise);
        assert_eq!(history.agreed_suit(South), Some(Suit::Hearts));
        assert_eq!(history.model(South).max_hcp(), 10);
    }

    #[test]
    fn test_competitive_entries() {
        let history = read(North, "1H 2H");
        assert_eq!(history.calls[1].meaning, CallMeaning::Michaels);
        assert_eq!(history.model(East).min_length(Suit::Spades), 5);

        let history = read(North, "1S 2N");
        assert_eq!(history.calls[1].meaning, CallMeaning::UnusualNotrump);
        assert_eq!(history.model(East).min_length(Suit::Clubs), 5);
        assert_eq!(history.model(East).min_length(Suit::Diamonds), 5);

        let history = read(North, "1C 2S");
        assert_eq!(history.calls[1].meaning, CallMeaning::JumpOvercall);

        let history = read(North, "1C 1S P 3C");
        assert_eq!(history.calls[3].meaning, CallMeaning::Cuebid);
    }

    #[test]
    fn test_slam_asks() {
        let history = read(North, "1S P 3S P 4N P 5H");
        assert_eq!(history.calls[4].meaning, CallMeaning::Blackwood);
        assert_eq!(history.calls[6].meaning, CallMeaning::AceResponse);

        let history = read(North, "1N P 4C P 4S");
        assert_eq!(history.calls[2].meaning, CallMeaning::Gerber);
        assert_eq!(history.calls[4].meaning, CallMeaning::AceResponse);

        let history = read(North, "1N P 4N");
        assert_eq!(history.calls[2].meaning, CallMeaning::Notrump, "quantitative");
    }

    #[test]
    fn test_two_clubs_and_passed_hand() {
        let history = read(North, "2C P 2D");
        assert_eq!(history.calls[0].meaning, CallMeaning::StrongTwoClubs);
        assert_eq!(history.calls[2].meaning, CallMeaning::Waiting);

        let history = read(North, "P P 1H P 1S");
        assert!(history.is_passed_hand(North));
        assert_eq!(history.calls[4].forcing, Forcing::NonForcing);
    }
}
