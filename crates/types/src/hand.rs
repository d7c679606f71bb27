// cspell:ignore AKQJT AKQJ
use crate::card::Card;
use crate::error::TypesError;
use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// No singletons, no voids, max one doubleton (4-3-3-3, 4-4-3-2, 5-3-3-2)
    Balanced,
    /// One singleton OR two doubletons, no voids (5-4-2-2, 6-3-2-2)
    SemiBalanced,
    /// Everything else (contains singletons/voids beyond SemiBalanced)
    Unbalanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Distribution {
    pub spades: u8,
    pub hearts: u8,
    pub diamonds: u8,
    pub clubs: u8,
}

impl Distribution {
    pub fn length(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Spades => self.spades,
            Suit::Hearts => self.hearts,
            Suit::Diamonds => self.diamonds,
            Suit::Clubs => self.clubs,
        }
    }

    fn add(&mut self, suit: Suit) {
        match suit {
            Suit::Spades => self.spades += 1,
            Suit::Hearts => self.hearts += 1,
            Suit::Diamonds => self.diamonds += 1,
            Suit::Clubs => self.clubs += 1,
        }
    }

    fn sorted_lengths(&self) -> [u8; 4] {
        let mut d = [self.spades, self.hearts, self.diamonds, self.clubs];
        d.sort_by(|a, b| b.cmp(a));
        d
    }

    pub fn total(&self) -> u8 {
        self.spades + self.hearts + self.diamonds + self.clubs
    }
}

/// Thirteen distinct cards.
///
/// A `Hand` can only be built through [`Hand::new`] (directly, by parsing,
/// or by deserializing), so every value upholds the thirteen-card invariant.
/// High-card points and suit lengths are computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
    hcp: u8,
    distribution: Distribution,
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Result<Self, TypesError> {
        if cards.len() != HAND_SIZE {
            return Err(TypesError::WrongCardCount { found: cards.len() });
        }
        let mut seen = HashSet::with_capacity(HAND_SIZE);
        for card in &cards {
            if !seen.insert(*card) {
                return Err(TypesError::DuplicateCard(*card));
            }
        }
        // Spades first, high cards first.
        cards.sort_by(|a, b| b.cmp(a));

        let hcp = cards.iter().map(Card::hcp).sum();
        let mut distribution = Distribution::default();
        for card in &cards {
            distribution.add(card.suit);
        }
        Ok(Self {
            cards,
            hcp,
            distribution,
        })
    }

    /// Parse a hand string in the format "Clubs.Diamonds.Hearts.Spades".
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        crate::io::hand_parser::parse_hand(s)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_in(&self, suit: Suit) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.suit == suit)
    }

    pub fn has_card(&self, suit: Suit, rank: Rank) -> bool {
        self.cards.contains(&Card::new(suit, rank))
    }

    pub fn hcp(&self) -> u8 {
        self.hcp
    }

    pub fn length(&self, suit: Suit) -> u8 {
        self.distribution.length(suit)
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// One point for every card beyond four in a suit.
    pub fn length_points(&self) -> u8 {
        Suit::ALL
            .iter()
            .map(|&s| self.length(s).saturating_sub(4))
            .sum()
    }

    /// Starting points: HCP plus length points.
    pub fn total_points(&self) -> u8 {
        self.hcp + self.length_points()
    }

    /// Shortness points counted when supporting partner's `trump` suit:
    /// void 5, singleton 3, doubleton 1.
    pub fn distribution_points(&self, trump: Suit) -> u8 {
        Suit::ALL
            .iter()
            .filter(|&&s| s != trump)
            .map(|&s| match self.length(s) {
                0 => 5,
                1 => 3,
                2 => 1,
                _ => 0,
            })
            .sum()
    }

    /// Dummy points: HCP plus shortness, valuing the hand as support for `trump`.
    pub fn support_points(&self, trump: Suit) -> u8 {
        self.hcp + self.distribution_points(trump)
    }

    /// Returns the shape classification of this hand
    pub fn shape(&self) -> Shape {
        let sorted_lengths = self.distribution.sorted_lengths();

        let longest = sorted_lengths[0];
        let doubleton_count = sorted_lengths.iter().filter(|&&l| l == 2).count();
        let singleton_count = sorted_lengths.iter().filter(|&&l| l == 1).count();
        let void_count = sorted_lengths.iter().filter(|&&l| l == 0).count();

        if singleton_count == 0 && void_count == 0 && doubleton_count <= 1 {
            Shape::Balanced
        } else if longest <= 6 && void_count == 0 && (singleton_count == 1 || doubleton_count == 2)
        {
            Shape::SemiBalanced
        } else {
            Shape::Unbalanced
        }
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self.shape(), Shape::Balanced)
    }

    pub fn is_semi_balanced(&self) -> bool {
        matches!(self.shape(), Shape::SemiBalanced)
    }

    /// Longest suit; ties go to the higher-ranking suit.
    pub fn longest_suit(&self) -> Suit {
        let mut longest = Suit::Spades;
        for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
            if self.length(suit) > self.length(longest) {
                longest = suit;
            }
        }
        longest
    }

    /// Returns all suits that are tied for the longest length, lowest first.
    pub fn longest_suits(&self) -> Vec<Suit> {
        let max_len = Suit::ALL.iter().map(|&s| self.length(s)).max().unwrap_or(0);
        Suit::ALL
            .iter()
            .copied()
            .filter(|&s| self.length(s) == max_len)
            .collect()
    }

    /// Count how many of the top N honors (A, K, Q, J, T) the hand holds in a suit.
    ///
    /// `top_honors(suit, 3)` counts honors among {A, K, Q}.
    pub fn top_honors(&self, suit: Suit, n: u8) -> u8 {
        const HONOR_RANKS: [Rank; 5] = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten];
        let top_n = &HONOR_RANKS[..(n as usize).min(HONOR_RANKS.len())];
        self.cards_in(suit)
            .filter(|c| top_n.contains(&c.rank))
            .count() as u8
    }

    /// Two of the top three honors, or three of the top five.
    pub fn has_good_suit(&self, suit: Suit) -> bool {
        self.top_honors(suit, 3) >= 2 || self.top_honors(suit, 5) >= 3
    }

    /// A notrump stopper: A, Kx, Qxx or Jxxx.
    pub fn has_stopper(&self, suit: Suit) -> bool {
        let len = self.length(suit);
        self.has_card(suit, Rank::Ace)
            || (self.has_card(suit, Rank::King) && len >= 2)
            || (self.has_card(suit, Rank::Queen) && len >= 3)
            || (self.has_card(suit, Rank::Jack) && len >= 4)
    }

    pub fn aces(&self) -> u8 {
        self.cards.iter().filter(|c| c.rank == Rank::Ace).count() as u8
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = TypesError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Hand::new(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl FromStr for Hand {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hand::parse(s)
    }
}
