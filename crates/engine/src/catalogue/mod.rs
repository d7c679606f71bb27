//! The SAYC convention catalogue.
//!
//! Every entry pairs a pure evaluation function with the roles it applies to,
//! a priority and the numeric thresholds it reads. Entries are evaluated in
//! priority order and the first one that proposes a call wins.

pub mod advances;
pub mod competitive;
pub mod notrump;
pub mod opening;
pub mod rebids;
pub mod responses;
pub mod slam;

use crate::config::{CatalogueConfig, ConfigError};
use crate::context::{DecisionContext, Role};
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Call, Hand, Strain, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConventionId {
    BlackwoodAnswer,
    GerberAnswer,
    GrandSlamForceAnswer,
    AceAskFollowUp,
    StaymanAnswer,
    TransferAcceptance,
    Jacoby2ntRebid,
    TwoClubRebid,
    WeakTwoFeature,
    GrandSlamForce,
    Blackwood,
    Gerber,
    ThreeNotrumpOpening,
    StrongTwoClubs,
    TwoNotrumpOpening,
    OneNotrumpOpening,
    OneSuitOpening,
    WeakTwo,
    Preempt,
    Stayman,
    JacobyTransfer,
    NotrumpRaise,
    NotrumpContinuation,
    TwoClubResponse,
    WeakTwoGameRaise,
    WeakTwoResponse,
    StrengthRedouble,
    NegativeDouble,
    Jacoby2nt,
    MajorRaise,
    JumpShift,
    NewSuitResponse,
    MinorRaise,
    NotrumpResponse,
    OpenerRebid,
    MichaelsCuebid,
    UnusualNotrump,
    NotrumpOvercall,
    TakeoutDouble,
    SimpleOvercall,
    JumpOvercall,
    Balancing,
    TakeoutAdvance,
    TwoSuitedAdvance,
    OvercallAdvance,
    PenaltyDouble,
    Placement,
}

impl ConventionId {
    pub fn name(self) -> &'static str {
        use ConventionId::*;
        match self {
            BlackwoodAnswer => "Blackwood answer",
            GerberAnswer => "Gerber answer",
            GrandSlamForceAnswer => "Grand slam force answer",
            AceAskFollowUp => "Ace-ask follow-up",
            StaymanAnswer => "Stayman answer",
            TransferAcceptance => "Transfer acceptance",
            Jacoby2ntRebid => "Jacoby 2NT rebid",
            TwoClubRebid => "2♣ opener rebid",
            WeakTwoFeature => "Weak two feature",
            GrandSlamForce => "Grand slam force",
            Blackwood => "Blackwood",
            Gerber => "Gerber",
            ThreeNotrumpOpening => "3NT opening",
            StrongTwoClubs => "Strong 2♣",
            TwoNotrumpOpening => "2NT opening",
            OneNotrumpOpening => "1NT opening",
            OneSuitOpening => "One of a suit opening",
            WeakTwo => "Weak two",
            Preempt => "Preempt",
            Stayman => "Stayman",
            JacobyTransfer => "Jacoby transfer",
            NotrumpRaise => "Notrump raise",
            NotrumpContinuation => "Notrump continuation",
            TwoClubResponse => "Response to 2♣",
            WeakTwoGameRaise => "Game raise of weak two",
            WeakTwoResponse => "Response to weak two",
            StrengthRedouble => "Redouble",
            NegativeDouble => "Negative double",
            Jacoby2nt => "Jacoby 2NT",
            MajorRaise => "Major raise",
            JumpShift => "Jump shift",
            NewSuitResponse => "New suit response",
            MinorRaise => "Minor raise",
            NotrumpResponse => "Notrump response",
            OpenerRebid => "Opener rebid",
            MichaelsCuebid => "Michaels cuebid",
            UnusualNotrump => "Unusual 2NT",
            NotrumpOvercall => "1NT overcall",
            TakeoutDouble => "Takeout double",
            SimpleOvercall => "Overcall",
            JumpOvercall => "Weak jump overcall",
            Balancing => "Balancing",
            TakeoutAdvance => "Advance of takeout double",
            TwoSuitedAdvance => "Advance of two-suited overcall",
            OvercallAdvance => "Advance of overcall",
            PenaltyDouble => "Penalty double",
            Placement => "Placement",
        }
    }
}

impl fmt::Display for ConventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric limits an entry reads instead of hard-coding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_points: u8,
    pub max_points: u8,
    pub min_length: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_points: 0,
            max_points: 40,
            min_length: 0,
        }
    }
}

impl Thresholds {
    pub const fn new(min_points: u8, max_points: u8, min_length: u8) -> Self {
        Self {
            min_points,
            max_points,
            min_length,
        }
    }

    pub fn contains(&self, points: u8) -> bool {
        (self.min_points..=self.max_points).contains(&points)
    }
}

/// What a candidate claims about the hand at the level it was proposed.
///
/// When interference forces the call higher, the adjustment stage re-checks
/// the claim at the new level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Intent {
    Raise { suit: Suit, min_points: u8, min_support: u8 },
    NewSuit { suit: Suit, min_hcp: u8, min_length: u8 },
    Rebid { suit: Suit, min_length: u8 },
    Notrump,
    Preempt { suit: Suit },
    /// Places the contract (including Pass); meaningless at another level.
    Placement,
    /// Conventional call whose meaning depends on its exact level.
    Artificial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub call: Call,
    pub rationale: String,
    pub convention: ConventionId,
    pub intent: Intent,
}

impl Candidate {
    pub fn new(
        call: Call,
        convention: ConventionId,
        intent: Intent,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            call,
            rationale: rationale.into(),
            convention,
            intent,
        }
    }

    pub fn pass(convention: ConventionId, rationale: impl Into<String>) -> Self {
        Self::new(Call::Pass, convention, Intent::Placement, rationale)
    }
}

pub type Evaluate = fn(&Hand, &DecisionContext, &Thresholds) -> Option<Candidate>;

#[derive(Debug, Clone)]
pub struct ConventionEntry {
    pub id: ConventionId,
    pub roles: &'static [Role],
    pub priority: u16,
    pub thresholds: Thresholds,
    pub evaluate: Evaluate,
}

impl ConventionEntry {
    pub fn applies_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn evaluate(&self, hand: &Hand, ctx: &DecisionContext) -> Option<Candidate> {
        (self.evaluate)(hand, ctx, &self.thresholds)
    }
}

/// An immutable, priority-sorted set of conventions.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<ConventionEntry>,
}

impl Catalogue {
    pub fn sayc() -> Self {
        Self::from_entries(sayc_entries())
    }

    /// Sorts by priority; entries sharing a priority keep their given order.
    pub fn from_entries(mut entries: Vec<ConventionEntry>) -> Self {
        entries.sort_by_key(|e| e.priority);
        Self { entries }
    }

    /// The SAYC catalogue with `config` applied.
    pub fn with_config(config: &CatalogueConfig) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for mut entry in sayc_entries() {
            if !config.apply(&mut entry)? {
                continue;
            }
            entries.push(entry);
        }
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[ConventionEntry] {
        &self.entries
    }

    pub fn for_role(&self, role: Role) -> impl Iterator<Item = &ConventionEntry> {
        self.entries.iter().filter(move |e| e.applies_to(role))
    }

    pub fn get(&self, id: ConventionId) -> Option<&ConventionEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::sayc()
    }
}

const ANY: &[Role] = &[
    Role::Opener,
    Role::Responder,
    Role::Overcaller,
    Role::Advancer,
    Role::Reopener,
];
const OPENER: &[Role] = &[Role::Opener];
const RESPONDER: &[Role] = &[Role::Responder];
const OVERCALLER: &[Role] = &[Role::Overcaller];
const ADVANCER: &[Role] = &[Role::Advancer];
const REOPENER: &[Role] = &[Role::Reopener];
const NOTRUMP_OPENER: &[Role] = &[Role::Opener, Role::Overcaller];
const NOTRUMP_RESPONDER: &[Role] = &[Role::Responder, Role::Advancer];
const OPENING_SIDE: &[Role] = &[Role::Opener, Role::Responder];

fn entry(
    id: ConventionId,
    roles: &'static [Role],
    priority: u16,
    thresholds: Thresholds,
    evaluate: Evaluate,
) -> ConventionEntry {
    ConventionEntry {
        id,
        roles,
        priority,
        thresholds,
        evaluate,
    }
}

fn sayc_entries() -> Vec<ConventionEntry> {
    use ConventionId as Id;
    let t = Thresholds::new;
    vec![
        // Answers to partner's asks.
        entry(Id::BlackwoodAnswer, ANY, 10, t(0, 40, 0), slam::blackwood_answer),
        entry(Id::GerberAnswer, ANY, 10, t(0, 40, 0), slam::gerber_answer),
        entry(Id::GrandSlamForceAnswer, ANY, 10, t(0, 40, 0), slam::grand_slam_force_answer),
        entry(Id::AceAskFollowUp, ANY, 12, t(33, 40, 0), slam::ace_ask_follow_up),
        entry(Id::StaymanAnswer, NOTRUMP_OPENER, 14, t(0, 40, 4), notrump::stayman_answer),
        entry(
            Id::TransferAcceptance,
            NOTRUMP_OPENER,
            14,
            t(17, 40, 4),
            notrump::transfer_acceptance,
        ),
        entry(Id::Jacoby2ntRebid, OPENER, 14, t(15, 40, 5), rebids::jacoby_2nt_rebid),
        entry(Id::TwoClubRebid, OPENER, 14, t(22, 40, 5), rebids::two_club_rebid),
        entry(Id::WeakTwoFeature, OPENER, 14, t(9, 11, 0), rebids::weak_two_feature),
        // Slam tries.
        entry(Id::GrandSlamForce, OPENING_SIDE, 20, t(35, 40, 0), slam::grand_slam_force),
        entry(Id::Blackwood, OPENING_SIDE, 22, t(33, 40, 0), slam::blackwood),
        entry(Id::Gerber, RESPONDER, 24, t(33, 40, 0), slam::gerber),
        // Openings.
        entry(Id::ThreeNotrumpOpening, OPENER, 30, t(25, 27, 0), opening::three_notrump),
        entry(Id::StrongTwoClubs, OPENER, 31, t(22, 40, 0), opening::strong_two_clubs),
        entry(Id::TwoNotrumpOpening, OPENER, 32, t(20, 21, 0), opening::two_notrump),
        entry(Id::OneNotrumpOpening, OPENER, 33, t(15, 17, 0), opening::one_notrump),
        entry(Id::OneSuitOpening, OPENER, 34, t(12, 21, 0), opening::one_suit),
        entry(Id::WeakTwo, OPENER, 35, t(5, 11, 6), opening::weak_two),
        entry(Id::Preempt, OPENER, 36, t(0, 10, 7), opening::preempt),
        // Notrump system.
        entry(Id::Stayman, NOTRUMP_RESPONDER, 40, t(8, 40, 4), notrump::stayman),
        entry(Id::JacobyTransfer, NOTRUMP_RESPONDER, 41, t(0, 40, 5), notrump::jacoby_transfer),
        entry(Id::NotrumpRaise, NOTRUMP_RESPONDER, 45, t(0, 40, 0), notrump::notrump_raise),
        entry(Id::NotrumpContinuation, NOTRUMP_RESPONDER, 46, t(0, 40, 0), notrump::continuation),
        // Responses.
        entry(Id::TwoClubResponse, RESPONDER, 47, t(8, 40, 5), responses::two_club_response),
        entry(Id::WeakTwoGameRaise, RESPONDER, 48, t(16, 40, 3), responses::weak_two_game_raise),
        entry(Id::WeakTwoResponse, RESPONDER, 49, t(15, 40, 3), responses::weak_two_response),
        entry(Id::StrengthRedouble, RESPONDER, 50, t(10, 40, 0), competitive::strength_redouble),
        entry(Id::NegativeDouble, RESPONDER, 51, t(6, 40, 4), competitive::negative_double),
        entry(Id::Jacoby2nt, RESPONDER, 55, t(13, 40, 4), responses::jacoby_2nt),
        entry(Id::MajorRaise, RESPONDER, 56, t(6, 12, 3), responses::major_raise),
        entry(Id::JumpShift, RESPONDER, 57, t(19, 40, 5), responses::jump_shift),
        entry(Id::NewSuitResponse, RESPONDER, 58, t(6, 40, 4), responses::new_suit),
        entry(Id::MinorRaise, RESPONDER, 59, t(6, 12, 4), responses::minor_raise),
        entry(Id::NotrumpResponse, RESPONDER, 60, t(6, 17, 0), responses::notrump_response),
        entry(Id::OpenerRebid, OPENER, 65, t(12, 21, 6), rebids::opener_rebid),
        // Competition.
        entry(Id::MichaelsCuebid, OVERCALLER, 70, t(8, 40, 5), competitive::michaels),
        entry(Id::UnusualNotrump, OVERCALLER, 71, t(8, 40, 5), competitive::unusual_notrump),
        entry(Id::NotrumpOvercall, OVERCALLER, 72, t(15, 18, 0), competitive::notrump_overcall),
        entry(Id::TakeoutDouble, OVERCALLER, 73, t(12, 40, 3), competitive::takeout_double),
        entry(Id::SimpleOvercall, OVERCALLER, 74, t(8, 16, 5), competitive::simple_overcall),
        entry(Id::JumpOvercall, OVERCALLER, 75, t(5, 10, 6), competitive::jump_overcall),
        entry(Id::Balancing, REOPENER, 76, t(7, 40, 5), competitive::balancing),
        // Advances.
        entry(Id::TakeoutAdvance, ADVANCER, 80, t(0, 40, 0), advances::takeout_advance),
        entry(Id::TwoSuitedAdvance, ADVANCER, 81, t(10, 40, 4), advances::two_suited_advance),
        entry(Id::OvercallAdvance, ADVANCER, 82, t(8, 40, 3), advances::overcall_advance),
        // Fallbacks.
        entry(Id::PenaltyDouble, ANY, 90, t(10, 40, 4), competitive::penalty_double),
        entry(Id::Placement, ANY, 95, t(25, 40, 8), rebids::placement),
    ]
}

pub(crate) fn suit_bid(level: u8, suit: Suit) -> Call {
    Call::suit_bid(level, suit)
}

pub(crate) fn nt_bid(level: u8) -> Call {
    Call::bid(level, Strain::NoTrump)
}

/// The cheapest level for `strain` directly over `bid`, ignoring anything
/// bid since. Conventions propose levels this way so interference shows up
/// as an illegal candidate the adjustment stage can repair.
pub(crate) fn cheapest_over(bid: Call, strain: Strain) -> u8 {
    match bid {
        Call::Bid { level, strain: s } if strain > s => level,
        Call::Bid { level, .. } => level + 1,
        _ => 1,
    }
}
