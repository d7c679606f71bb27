use crate::call::Call;
use crate::card::Card;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("a hand holds exactly 13 cards, found {found}")]
    WrongCardCount { found: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("cannot parse card '{0}'")]
    InvalidCard(String),
    #[error("cannot parse hand '{0}'")]
    InvalidHand(String),
    #[error("cannot parse call '{0}'")]
    InvalidCall(String),
    #[error("{call} is not legal here: {reason}")]
    IllegalCall { call: Call, reason: &'static str },
}
