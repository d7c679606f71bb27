use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Position {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partnership {
    NS,
    EW,
}

impl Partnership {
    pub fn contains(self, pos: Position) -> bool {
        pos.partnership() == self
    }

    pub fn opponent(self) -> Self {
        match self {
            Partnership::NS => Partnership::EW,
            Partnership::EW => Partnership::NS,
        }
    }
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::North,
        Position::East,
        Position::South,
        Position::West,
    ];

    pub fn partnership(self) -> Partnership {
        match self {
            Position::North | Position::South => Partnership::NS,
            Position::East | Position::West => Partnership::EW,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Position::North => 0,
            Position::East => 1,
            Position::South => 2,
            Position::West => 3,
        }
    }

    /// The seat `steps` places clockwise from this one.
    pub fn advance(self, steps: usize) -> Self {
        Position::ALL[(self.idx() + steps) % 4]
    }

    pub fn next(self) -> Self {
        self.advance(1)
    }

    pub fn partner(self) -> Self {
        self.advance(2)
    }

    /// Left-hand opponent (next in clockwise bidding order).
    pub fn lho(self) -> Self {
        self.advance(1)
    }

    /// Right-hand opponent (previous in clockwise bidding order).
    pub fn rho(self) -> Self {
        self.advance(3)
    }

    pub fn is_opponent_of(self, other: Position) -> bool {
        self.partnership() != other.partnership()
    }

    pub fn to_char(self) -> char {
        match self {
            Position::North => 'N',
            Position::East => 'E',
            Position::South => 'S',
            Position::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Position::North),
            'E' => Some(Position::East),
            'S' => Some(Position::South),
            'W' => Some(Position::West),
            _ => None,
        }
    }

    /// Board 1 is dealt by North, board 2 by East, and so on.
    pub fn dealer_from_board_number(board_number: u32) -> Self {
        let index = (board_number + 3) % 4;
        Position::ALL[index as usize]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vulnerability {
    #[default]
    None,
    NS,
    EW,
    Both,
}

impl Vulnerability {
    pub fn is_vulnerable(self, pos: Position) -> bool {
        match self {
            Vulnerability::None => false,
            Vulnerability::NS => pos.partnership() == Partnership::NS,
            Vulnerability::EW => pos.partnership() == Partnership::EW,
            Vulnerability::Both => true,
        }
    }

    /// Standard sixteen-board vulnerability rotation.
    pub fn from_board_number(board_number: u32) -> Self {
        match board_number % 16 {
            1 | 8 | 11 | 14 => Vulnerability::None,
            2 | 5 | 12 | 15 => Vulnerability::NS,
            3 | 6 | 9 | 0 => Vulnerability::EW,
            _ => Vulnerability::Both,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "-" | "O" | "LOVE" => Some(Vulnerability::None),
            "NS" | "N-S" => Some(Vulnerability::NS),
            "EW" | "E-W" => Some(Vulnerability::EW),
            "BOTH" | "ALL" | "B" => Some(Vulnerability::Both),
            _ => None,
        }
    }
}

/// One deal: a dealer, the vulnerability and four hands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub number: u32,
    pub dealer: Position,
    pub vulnerability: Vulnerability,
    pub hands: HashMap<Position, Hand>,
}

impl Board {
    pub fn new(number: u32, hands: HashMap<Position, Hand>) -> Self {
        Self {
            number,
            dealer: Position::dealer_from_board_number(number),
            vulnerability: Vulnerability::from_board_number(number),
            hands,
        }
    }

    pub fn get_hand(&self, pos: Position) -> Option<&Hand> {
        self.hands.get(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_navigation() {
        assert_eq!(Position::North.next(), Position::East);
        assert_eq!(Position::West.next(), Position::North);
        assert_eq!(Position::South.partner(), Position::North);
        assert_eq!(Position::South.lho(), Position::West);
        assert_eq!(Position::South.rho(), Position::East);
        assert!(Position::North.is_opponent_of(Position::West));
        assert!(!Position::North.is_opponent_of(Position::South));
    }

    #[test]
    fn test_vulnerability() {
        assert!(Vulnerability::NS.is_vulnerable(Position::North));
        assert!(!Vulnerability::NS.is_vulnerable(Position::East));
        assert!(Vulnerability::Both.is_vulnerable(Position::West));
        assert!(!Vulnerability::None.is_vulnerable(Position::South));
        assert_eq!(Vulnerability::parse("e-w"), Some(Vulnerability::EW));
        assert_eq!(Vulnerability::parse("sideways"), None);
    }

    #[test]
    fn test_board_rotation() {
        assert_eq!(Position::dealer_from_board_number(1), Position::North);
        assert_eq!(Position::dealer_from_board_number(4), Position::West);
        assert_eq!(Vulnerability::from_board_number(1), Vulnerability::None);
        assert_eq!(Vulnerability::from_board_number(4), Vulnerability::Both);
        assert_eq!(Vulnerability::from_board_number(16), Vulnerability::EW);
    }

    #[test]
    fn test_partnership() {
        assert_eq!(Position::North.partnership(), Partnership::NS);
        assert_eq!(Position::West.partnership(), Partnership::EW);
        assert!(Partnership::NS.contains(Position::South));
        assert!(!Partnership::NS.contains(Position::East));
        assert_eq!(Partnership::NS.opponent(), Partnership::EW);
    }
}
