//! Re-validation of a candidate's claim at a level other than the one it was
//! proposed at.

use crate::catalogue::Intent;
use crate::context::DecisionContext;
use crate::point_ranges::PointRanges;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Hand, Suit};

/// Why a hand does not support a call at its repaired level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Shortfall {
    Points { needed: u8, held: u8 },
    Length { suit: Suit, needed: u8, held: u8 },
    /// Conventional calls and placements mean nothing at another level.
    LevelSpecific,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shortfall::Points { needed, held } => {
                write!(f, "needs {} points, holds {}", needed, held)
            }
            Shortfall::Length { suit, needed, held } => {
                write!(f, "needs {} {}, holds {}", needed, suit.symbol(), held)
            }
            Shortfall::LevelSpecific => f.write_str("call is only meaningful at its own level"),
        }
    }
}

/// Minimum HCP and suit length for a new suit at `level`.
pub fn new_suit_requirement(level: u8) -> (u8, u8) {
    match level {
        0 | 1 => (6, 4),
        2 => (10, 4),
        3 => (10, 5),
        _ => (13, 5),
    }
}

fn at_least_points(needed: u8, held: u8) -> Result<(), Shortfall> {
    if held >= needed {
        Ok(())
    } else {
        Err(Shortfall::Points { needed, held })
    }
}

fn at_least_length(hand: &Hand, suit: Suit, needed: u8) -> Result<(), Shortfall> {
    let held = hand.length(suit);
    if held >= needed {
        Ok(())
    } else {
        Err(Shortfall::Length { suit, needed, held })
    }
}

/// Checks that `hand` still supports `intent` when the call moves from
/// `proposed` to `level`.
pub fn revalidate(
    hand: &Hand,
    ctx: &DecisionContext,
    intent: &Intent,
    proposed: u8,
    level: u8,
) -> Result<(), Shortfall> {
    let extra = level.saturating_sub(proposed);
    match *intent {
        Intent::Raise {
            suit,
            min_points,
            min_support,
        } => {
            at_least_length(hand, suit, min_support.saturating_add(extra))?;
            at_least_points(
                min_points.saturating_add(3 * extra),
                hand.support_points(suit),
            )
        }
        Intent::NewSuit {
            suit,
            min_hcp,
            min_length,
        } => {
            let (hcp, length) = new_suit_requirement(level);
            at_least_length(hand, suit, min_length.max(length))?;
            at_least_points(min_hcp.max(hcp), hand.hcp())
        }
        Intent::Rebid { suit, min_length } => {
            at_least_length(hand, suit, min_length.saturating_add(extra))?;
            let combined = hand
                .total_points()
                .saturating_add(ctx.partner_model.min_hcp());
            at_least_points(PointRanges::min_points_for_suited_bid(level), combined)
        }
        Intent::Notrump => {
            at_least_points(PointRanges::min_points_for_nt_bid(level), ctx.combined_min())
        }
        Intent::Preempt { suit } => at_least_length(hand, suit, level.saturating_add(4)),
        Intent::Placement | Intent::Artificial => Err(Shortfall::LevelSpecific),
    }
}
