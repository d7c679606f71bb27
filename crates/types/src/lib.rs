//! Value types for contract bridge bidding: cards, hands, calls and auctions.

pub mod auction;
pub mod board;
pub mod call;
pub mod card;
pub mod contract;
pub mod error;
pub mod hand;
pub mod io;
pub mod rank;
pub mod strain;
pub mod suit;

pub use auction::Auction;
pub use board::{Board, Partnership, Position, Vulnerability};
pub use call::Call;
pub use card::Card;
pub use contract::{Contract, DoubleStatus};
pub use error::TypesError;
pub use hand::{Distribution, Hand, Shape, HAND_SIZE};
pub use rank::Rank;
pub use strain::Strain;
pub use suit::Suit;
