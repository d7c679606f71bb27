//! Combined-strength tables used to judge how high a partnership can bid.

pub struct PointRanges;

impl PointRanges {
    pub const GAME_THRESHOLD: u8 = 25;
    pub const SLAM_THRESHOLD: u8 = 33;
    pub const GRAND_SLAM_THRESHOLD: u8 = 37;

    /// Minimum combined points for a suited contract at `level`.
    pub fn min_points_for_suited_bid(level: u8) -> u8 {
        match level {
            0 | 1 => 16,
            2 => 19,
            3 => 22,
            4 => 25,
            5 => 28,
            6 => 33,
            _ => 37,
        }
    }

    /// Minimum combined points for a notrump contract at `level`.
    pub fn min_points_for_nt_bid(level: u8) -> u8 {
        match level {
            0 | 1 => 19,
            2 => 22,
            3 => 25,
            4 => 28,
            5 => 30,
            6 => 33,
            _ => 37,
        }
    }

    /// The highest level the partnership's combined points support in a suit.
    pub fn suited_level_for(points: u8) -> u8 {
        (1..=7)
            .rev()
            .find(|&level| points >= Self::min_points_for_suited_bid(level))
            .unwrap_or(0)
    }
}
