//! Feature extraction: turns a hand and an auction into the facts the
//! convention catalogue decides from.

pub mod hand_model;
pub mod history;

pub use hand_model::{HandModel, Shows};
pub use history::{CallMeaning, DoubleKind, Forcing, History, ReadCall};

use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Auction, Call, Distribution, Hand, Position, Shape, Strain, Suit};

/// The part this seat plays in the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Opener,
    Responder,
    Overcaller,
    Advancer,
    Reopener,
    PassedOut,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Opener,
        Role::Responder,
        Role::Overcaller,
        Role::Advancer,
        Role::Reopener,
        Role::PassedOut,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Opener => "opener",
            Role::Responder => "responder",
            Role::Overcaller => "overcaller",
            Role::Advancer => "advancer",
            Role::Reopener => "reopener",
            Role::PassedOut => "passed out",
        };
        f.write_str(name)
    }
}

/// Hand facts computed once per decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandFeatures {
    pub hcp: u8,
    pub total_points: u8,
    /// Dummy points for the agreed suit, or for partner's longest shown suit.
    pub support_points: Option<u8>,
    pub distribution: Distribution,
    pub shape: Shape,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionContext {
    pub seat: Position,
    pub role: Role,
    /// 1..=4, counted from the dealer.
    pub seat_number: u8,
    pub we_vulnerable: bool,
    pub they_vulnerable: bool,
    pub opening: Option<ReadCall>,
    /// Non-pass calls by this seat.
    pub my_calls: Vec<ReadCall>,
    /// Non-pass calls by partner.
    pub partner_calls: Vec<ReadCall>,
    pub partner_last: Option<ReadCall>,
    pub rho_last: Option<ReadCall>,
    pub lho_last: Option<ReadCall>,
    /// Highest bid so far.
    pub last_bid: Option<ReadCall>,
    pub forcing: bool,
    pub game_forcing: bool,
    /// Both sides have made a non-pass call.
    pub competitive: bool,
    pub consecutive_passes: usize,
    pub passed_hand: bool,
    pub our_suits: Vec<Suit>,
    pub opponent_suits: Vec<Suit>,
    pub agreed_suit: Option<Suit>,
    pub partner_model: HandModel,
    pub my_model: HandModel,
    pub last_double: Option<ReadCall>,
    pub hand: HandFeatures,
    pub history: History,
}

/// Builds a fresh context for `hand` at the current turn of `auction`.
///
/// The auction is expected to be valid and unfinished; `decide` checks this
/// before extracting.
pub fn extract(hand: &Hand, auction: &Auction) -> DecisionContext {
    let history = History::read(auction);
    let seat = auction.current_player();
    let partner = seat.partner();
    let side = seat.partnership();

    let my_calls: Vec<ReadCall> = history.actions_by(seat).copied().collect();
    let partner_calls: Vec<ReadCall> = history.actions_by(partner).copied().collect();
    let opening = history.opening().copied();
    let last_bid = history.last_bid().copied();

    let game_forcing = history
        .calls
        .iter()
        .any(|c| c.seat.partnership() == side && c.forcing == Forcing::Game);
    let below_game = last_bid.map_or(true, |b| !b.call.is_game_or_higher());
    let rho_last = history.last_call_by(seat.rho()).copied();
    let rho_passed = rho_last.map_or(true, |c| c.call.is_pass());
    let partner_forced = history
        .last_call_by(partner)
        .is_some_and(|c| c.forcing != Forcing::NonForcing);
    let forcing = (partner_forced && rho_passed) || (game_forcing && below_game);

    let competitive = history
        .calls
        .iter()
        .any(|c| c.seat.partnership() == side && !c.call.is_pass())
        && history
            .calls
            .iter()
            .any(|c| c.seat.partnership() != side && !c.call.is_pass());

    let agreed_suit = history.agreed_suit(seat);
    let partner_model = history.model(partner).clone();
    let trump = agreed_suit.or_else(|| partner_model.longest_shown_suit());

    let role = role_for(seat, auction, &history);

    DecisionContext {
        seat,
        role,
        seat_number: auction.seat_number(),
        we_vulnerable: auction.is_vulnerable(seat),
        they_vulnerable: auction.is_vulnerable(seat.lho()),
        opening,
        partner_last: partner_calls.last().copied(),
        my_calls,
        partner_calls,
        rho_last,
        lho_last: history.last_call_by(seat.lho()).copied(),
        last_bid,
        forcing,
        game_forcing,
        competitive,
        consecutive_passes: auction.consecutive_passes(),
        passed_hand: history.is_passed_hand(seat),
        our_suits: history.natural_suits(side),
        opponent_suits: history.natural_suits(side.opponent()),
        agreed_suit,
        my_model: history.model(seat).clone(),
        partner_model,
        last_double: history.last_double().copied(),
        hand: HandFeatures {
            hcp: hand.hcp(),
            total_points: hand.total_points(),
            support_points: trump.map(|t| hand.support_points(t)),
            distribution: hand.distribution(),
            shape: hand.shape(),
        },
        history,
    }
}

fn role_for(seat: Position, auction: &Auction, history: &History) -> Role {
    if auction.is_finished() {
        return Role::PassedOut;
    }
    let Some(opening) = history.opening() else {
        return Role::Opener;
    };
    if opening.seat == seat {
        return Role::Opener;
    }
    if opening.seat == seat.partner() {
        return Role::Responder;
    }
    let side = seat.partnership();
    match history
        .calls
        .iter()
        .find(|c| c.seat.partnership() == side && !c.call.is_pass())
    {
        Some(first) if first.seat == seat => Role::Overcaller,
        Some(_) => Role::Advancer,
        None if auction.consecutive_passes() == 2 => Role::Reopener,
        None => Role::Overcaller,
    }
}

impl DecisionContext {
    pub fn is_opening_turn(&self) -> bool {
        self.opening.is_none()
    }

    pub fn rho_passed(&self) -> bool {
        self.rho_last.map_or(true, |c| c.call.is_pass())
    }

    pub fn is_first_action(&self) -> bool {
        self.my_calls.is_empty()
    }

    /// The lowest level at which `strain` can be bid, which may exceed 7.
    pub fn cheapest_level(&self, strain: Strain) -> u8 {
        match self.last_bid.map(|b| b.call) {
            Some(Call::Bid { level, strain: last }) if strain > last => level,
            Some(Call::Bid { level, .. }) => level + 1,
            _ => 1,
        }
    }

    pub fn cheapest_bid(&self, strain: Strain) -> Option<Call> {
        let level = self.cheapest_level(strain);
        (level <= 7).then(|| Call::bid(level, strain))
    }

    /// Partner's opening bid, if partner opened.
    pub fn partner_opening(&self) -> Option<&ReadCall> {
        self.opening.as_ref().filter(|o| o.seat == self.seat.partner())
    }

    /// This seat's opening bid, if it opened.
    pub fn my_opening(&self) -> Option<&ReadCall> {
        self.opening.as_ref().filter(|o| o.seat == self.seat)
    }

    /// The opponents' opening bid, if they opened.
    pub fn opponent_opening(&self) -> Option<&ReadCall> {
        self.opening
            .as_ref()
            .filter(|o| o.seat.is_opponent_of(self.seat))
    }

    pub fn partner_meaning(&self) -> Option<CallMeaning> {
        self.partner_last.map(|c| c.meaning)
    }

    pub fn my_last(&self) -> Option<&ReadCall> {
        self.my_calls.last()
    }

    /// Partner's most recently bid natural suit.
    pub fn partner_suit(&self) -> Option<Suit> {
        self.partner_calls.iter().rev().find_map(|c| c.natural_suit())
    }

    /// The longest suit the opponents have bid naturally, if any.
    pub fn opponent_suit(&self) -> Option<Suit> {
        self.opponent_suits.last().copied()
    }

    /// HCP of this hand plus the minimum partner has promised.
    pub fn combined_min(&self) -> u8 {
        self.hand.hcp.saturating_add(self.partner_model.min_hcp())
    }

    /// HCP of this hand plus the maximum partner may hold.
    pub fn combined_max(&self) -> u8 {
        self.hand.hcp.saturating_add(self.partner_model.max_hcp())
    }

    /// Combined points counting this hand's support points in `trump`.
    pub fn combined_with_support(&self, hand: &Hand, trump: Suit) -> u8 {
        hand.support_points(trump)
            .saturating_add(self.partner_model.min_hcp())
    }

    /// Neither side has bid a suit the opponents also hold.
    pub fn unbid_suits(&self) -> Vec<Suit> {
        Suit::ALL
            .into_iter()
            .filter(|s| !self.our_suits.contains(s) && !self.opponent_suits.contains(s))
            .collect()
    }

    /// Number of bidding rounds this seat has already taken part in.
    pub fn my_turns(&self) -> usize {
        self.history.calls.iter().filter(|c| c.seat == self.seat).count()
    }
}
