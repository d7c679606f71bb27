use crate::error::TypesError;
use crate::strain::Strain;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A call in the auction.
///
/// The derived ordering compares bids by level and then strain, which is the
/// sufficiency order of the auction. Pass, Double and Redouble sort below all
/// bids and carry no sufficiency meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Double,
    Redouble,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn suit_bid(level: u8, suit: Suit) -> Self {
        Call::Bid {
            level,
            strain: suit.into(),
        }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Call::Pass)
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            _ => None,
        }
    }

    /// Returns the suit of this call, if it's a suited bid.
    pub fn suit(&self) -> Option<Suit> {
        self.strain().and_then(|s| s.to_suit())
    }

    pub fn is_notrump(&self) -> bool {
        self.strain() == Some(Strain::NoTrump)
    }

    /// Bids at or above game in their strain.
    pub fn is_game_or_higher(&self) -> bool {
        match self {
            Call::Bid { level, strain } => *level >= strain.game_level(),
            _ => false,
        }
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Double => "X".to_string(),
            Call::Redouble => "XX".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }
}

impl FromStr for Call {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "P" | "PASS" => return Ok(Call::Pass),
            "X" | "DBL" | "DOUBLE" => return Ok(Call::Double),
            "XX" | "RDBL" | "REDOUBLE" => return Ok(Call::Redouble),
            _ => {}
        }
        let mut chars = upper.chars();
        let level = chars.next().and_then(|c| c.to_digit(10)).map(|d| d as u8);
        let strain = chars.next().and_then(Strain::from_char);
        let rest: String = chars.collect();
        // "1NT" is accepted alongside "1N".
        let rest_ok = rest.is_empty() || (strain == Some(Strain::NoTrump) && rest == "T");
        match (level, strain) {
            (Some(level), Some(strain)) if (1..=7).contains(&level) && rest_ok => {
                Ok(Call::Bid { level, strain })
            }
            _ => Err(TypesError::InvalidCall(s.to_string())),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
