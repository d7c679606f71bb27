use crate::board::{Partnership, Position, Vulnerability};
use crate::call::Call;
use crate::contract::{Contract, DoubleStatus};
use crate::error::TypesError;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};

/// An auction in progress: the dealer, the vulnerability and the calls made
/// so far. The seat of each call is implied by its index and the dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Position,
    #[serde(default)]
    pub vulnerability: Vulnerability,
    pub calls: Vec<Call>,
}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            vulnerability: Vulnerability::None,
            calls: Vec::new(),
        }
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerability = vulnerability;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Call)> {
        let dealer = self.dealer;
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (dealer.advance(i), call))
    }

    /// Appends a call without checking it.
    pub fn add_call(&mut self, call: Call) {
        self.calls.push(call);
    }

    /// Appends a call if it is legal at this point of the auction.
    pub fn try_add_call(&mut self, call: Call) -> Result<(), TypesError> {
        legal_after(&self.calls, call).map_err(|reason| TypesError::IllegalCall { call, reason })?;
        self.calls.push(call);
        Ok(())
    }

    /// Parse and add a single call from a string like "1C", "P", or "X".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bid(&mut self, s: &str) {
        self.add_call(s.parse().expect("invalid call"));
    }

    /// Parse and add multiple space-separated calls like "P 1C P".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bids(&mut self, s: &str) {
        for token in s.split_whitespace() {
            self.bid(token);
        }
    }

    /// Build an auction from space-separated calls like "P 1C P 2C".
    /// Panics on invalid input; use for tests and known-good data only.
    pub fn bidding(dealer: Position, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        auction.bids(calls);
        auction
    }

    pub fn current_player(&self) -> Position {
        self.dealer.advance(self.calls.len())
    }

    pub fn current_partnership(&self) -> Partnership {
        self.current_player().partnership()
    }

    /// Seat of the player to act, counted from the dealer (1 to 4).
    pub fn seat_number(&self) -> u8 {
        (self.calls.len() % 4) as u8 + 1
    }

    pub fn is_vulnerable(&self, position: Position) -> bool {
        self.vulnerability.is_vulnerable(position)
    }

    pub fn is_finished(&self) -> bool {
        is_finished_at(&self.calls)
    }

    /// Four passes with no bid.
    pub fn is_passed_out(&self) -> bool {
        self.calls.len() >= 4 && self.calls.iter().all(Call::is_pass)
    }

    pub fn is_open(&self) -> bool {
        self.calls.iter().any(|c| c.is_bid())
    }

    pub fn opener(&self) -> Option<Position> {
        self.iter()
            .find(|(_, call)| call.is_bid())
            .map(|(position, _)| position)
    }

    /// Returns the last bid (not pass/double/redouble) and who made it.
    pub fn last_bid(&self) -> Option<(Position, Call)> {
        self.iter()
            .filter(|(_, call)| call.is_bid())
            .last()
            .map(|(pos, call)| (pos, *call))
    }

    /// Returns the most recent call of any kind made by `position`.
    pub fn last_call_by(&self, position: Position) -> Option<Call> {
        self.iter()
            .filter(|(pos, _)| *pos == position)
            .last()
            .map(|(_, call)| *call)
    }

    /// Number of passes at the end of the auction.
    pub fn consecutive_passes(&self) -> usize {
        self.calls.iter().rev().take_while(|c| c.is_pass()).count()
    }

    /// Returns true if a player has made any non-Pass call (bid, double, or redouble).
    pub fn player_has_acted(&self, player: Position) -> bool {
        self.iter()
            .any(|(pos, call)| pos == player && !call.is_pass())
    }

    /// Returns true if a partnership has made at least one bid (not pass/double/redouble).
    pub fn partnership_has_bid(&self, partnership: Partnership) -> bool {
        self.iter()
            .any(|(pos, call)| pos.partnership() == partnership && call.is_bid())
    }

    /// Returns the minimum legal bid for the given strain.
    pub fn minimum_bid_in(&self, strain: Strain) -> Option<Call> {
        if self.is_finished() {
            return None;
        }
        let level = match self.last_bid() {
            None => 1,
            Some((_, Call::Bid { level, strain: last })) if strain > last => level,
            Some((_, Call::Bid { level, .. })) => level + 1,
            Some(_) => return None,
        };
        (level <= 7).then_some(Call::Bid { level, strain })
    }

    /// A bid is sufficient when it outranks every earlier bid.
    pub fn is_sufficient(&self, call: Call) -> bool {
        call.is_bid() && legal_after(&self.calls, call).is_ok()
    }

    /// Double is available when the most recent non-pass call is an opponent's bid.
    pub fn can_double(&self) -> bool {
        legal_after(&self.calls, Call::Double).is_ok()
    }

    /// Redouble is available when the most recent non-pass call is an
    /// opponent's double of our side.
    pub fn can_redouble(&self) -> bool {
        legal_after(&self.calls, Call::Redouble).is_ok()
    }

    pub fn is_legal(&self, call: Call) -> bool {
        legal_after(&self.calls, call).is_ok()
    }

    /// Return all calls that would be legal as the next call in this auction.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_finished() {
            return Vec::new();
        }
        let mut result = vec![Call::Pass];
        for level in 1..=7u8 {
            for strain in Strain::ALL {
                let call = Call::Bid { level, strain };
                if self.is_sufficient(call) {
                    result.push(call);
                }
            }
        }
        for call in [Call::Double, Call::Redouble] {
            if self.is_legal(call) {
                result.push(call);
            }
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        Self::validate_calls(&self.calls)
    }

    /// Checks every call against the calls before it.
    pub fn validate(&self) -> Result<(), TypesError> {
        for (i, call) in self.calls.iter().enumerate() {
            legal_after(&self.calls[..i], *call).map_err(|reason| TypesError::IllegalCall {
                call: *call,
                reason,
            })?;
        }
        Ok(())
    }

    pub fn validate_calls(calls: &[Call]) -> bool {
        calls
            .iter()
            .enumerate()
            .all(|(i, call)| legal_after(&calls[..i], *call).is_ok())
    }

    pub fn current_contract(&self) -> Option<Contract> {
        let mut last_bid = None;
        let mut double_status = DoubleStatus::Undoubled;

        // First player of each side to name each strain; index by side, then strain.
        let mut first_bidders: [[Option<Position>; 5]; 2] = [[None; 5]; 2];

        for (position, call) in self.iter() {
            match call {
                Call::Bid { level, strain } => {
                    let side = match position.partnership() {
                        Partnership::NS => 0,
                        Partnership::EW => 1,
                    };
                    let declarer = *first_bidders[side][strain.idx()].get_or_insert(position);
                    last_bid = Some((*level, *strain, declarer));
                    double_status = DoubleStatus::Undoubled;
                }
                Call::Double => double_status = DoubleStatus::Doubled,
                Call::Redouble => double_status = DoubleStatus::Redoubled,
                Call::Pass => {}
            }
        }

        last_bid.map(|(level, strain, declarer)| Contract {
            level,
            strain,
            double_status,
            declarer,
        })
    }

    pub fn final_contract(&self) -> Option<Contract> {
        if self.is_finished() {
            self.current_contract()
        } else {
            None
        }
    }
}

fn is_finished_at(calls: &[Call]) -> bool {
    if calls.len() < 4 {
        return false;
    }
    if calls.iter().all(Call::is_pass) {
        return true;
    }
    calls[calls.len() - 3..].iter().all(Call::is_pass)
}

/// Checks `call` against the calls already made.
fn legal_after(calls: &[Call], call: Call) -> Result<(), &'static str> {
    if is_finished_at(calls) {
        return Err("the auction is over");
    }
    // Index and value of the most recent non-pass call.
    let last_action = calls
        .iter()
        .enumerate()
        .rev()
        .find(|(_, c)| !c.is_pass())
        .map(|(i, c)| (i, *c));
    // An odd distance back means the call was made by an opponent.
    let by_opponent = |i: usize| (calls.len() - i) % 2 == 1;

    match call {
        Call::Pass => Ok(()),
        Call::Bid { level, .. } => {
            if !(1..=7).contains(&level) {
                return Err("bid level must be between 1 and 7");
            }
            let last_bid = calls.iter().rev().find(|c| c.is_bid());
            match last_bid {
                Some(last) if call <= *last => Err("insufficient bid"),
                _ => Ok(()),
            }
        }
        Call::Double => match last_action {
            Some((i, Call::Bid { .. })) if by_opponent(i) => Ok(()),
            _ => Err("double needs an undoubled opposing bid"),
        },
        Call::Redouble => match last_action {
            Some((i, Call::Double)) if by_opponent(i) => Ok(()),
            _ => Err("redouble needs an opposing double of our bid"),
        },
    }
}
