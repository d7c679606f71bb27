use crate::config::ConfigError;
use thiserror::Error;

/// Input the engine refuses to decide for.
///
/// Bidding problems never surface here: they are recovered inside the
/// pipeline and recorded on the decision as an [`Anomaly`](crate::Anomaly).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed auction: {0}")]
    MalformedAuction(String),
    #[error("the auction is complete; there is no call to make")]
    AuctionComplete,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
