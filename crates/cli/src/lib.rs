pub mod bidding_utils;
pub mod logging;
