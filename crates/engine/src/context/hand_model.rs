//! What a player's calls have promised about their hand.

use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Distribution, Suit};

/// A single promise made by a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shows {
    MinHcp(u8),
    MaxHcp(u8),
    MinLength(Suit, u8),
    Balanced,
}

/// Accumulated picture of one player's hand, built from the calls they made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandModel {
    /// Minimum length shown in each suit
    pub min_distribution: Distribution,
    /// Minimum HCP shown, if any
    pub min_hcp: Option<u8>,
    /// Maximum HCP shown, if any
    pub max_hcp: Option<u8>,
    pub balanced: bool,
}

impl HandModel {
    pub fn apply(&mut self, shows: Shows) {
        match shows {
            Shows::MinHcp(hcp) => {
                let min = self.min_hcp.map_or(hcp, |c| c.max(hcp));
                self.min_hcp = Some(min);
                // A later, stronger call overrides an earlier limit.
                if self.max_hcp.is_some_and(|max| max < min) {
                    self.max_hcp = None;
                }
            }
            Shows::MaxHcp(hcp) => {
                let max = self.max_hcp.map_or(hcp, |c| c.min(hcp));
                if self.min_hcp.map_or(true, |min| min <= max) {
                    self.max_hcp = Some(max);
                }
            }
            Shows::MinLength(suit, len) => {
                let current = self.min_distribution.length(suit);
                if len > current {
                    set_length(&mut self.min_distribution, suit, len.min(13));
                }
            }
            Shows::Balanced => self.balanced = true,
        }
    }

    pub fn min_hcp(&self) -> u8 {
        self.min_hcp.unwrap_or(0)
    }

    pub fn max_hcp(&self) -> u8 {
        self.max_hcp.unwrap_or(37)
    }

    pub fn min_length(&self, suit: Suit) -> u8 {
        self.min_distribution.length(suit)
    }

    pub fn has_shown_suit(&self, suit: Suit) -> bool {
        self.min_length(suit) > 0
    }

    /// The suit shown longest, ties going to the higher-ranking suit.
    pub fn longest_shown_suit(&self) -> Option<Suit> {
        let mut best: Option<Suit> = None;
        for suit in Suit::ALL {
            let len = self.min_length(suit);
            if len > 0 && best.map_or(true, |b| len >= self.min_length(b)) {
                best = Some(suit);
            }
        }
        best
    }
}

fn set_length(dist: &mut Distribution, suit: Suit, len: u8) {
    match suit {
        Suit::Spades => dist.spades = len,
        Suit::Hearts => dist.hearts = len,
        Suit::Diamonds => dist.diamonds = len,
        Suit::Clubs => dist.clubs = len,
    }
}

impl fmt::Display for HandModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hcp = match (self.min_hcp, self.max_hcp) {
            (None, None) => "? hcp".to_string(),
            (Some(min), None) => format!("{}+ hcp", min),
            (None, Some(max)) => format!("0-{} hcp", max),
            (Some(min), Some(max)) if min == max => format!("{} hcp", min),
            (Some(min), Some(max)) => format!("{}-{} hcp", min, max),
        };
        let mut parts = vec![hcp];
        let suits: Vec<String> = Suit::ALL
            .iter()
            .rev()
            .filter(|&&s| self.min_length(s) > 0)
            .map(|&s| format!("{}+{}", self.min_length(s), s.symbol()))
            .collect();
        if !suits.is_empty() {
            parts.push(suits.join(" "));
        }
        if self.balanced {
            parts.push("balanced".to_string());
        }
        write!(f, "{}", parts.join(", "))
    }
}
