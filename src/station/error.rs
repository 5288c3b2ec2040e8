//! Error types for station operations.

use thiserror::Error;

use crate::Cents;

/// Error returned by [`PayStation::insert_coin`](super::PayStation::insert_coin)
/// and [`PayStation::apply`](super::PayStation::apply).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StationError {
    #[error("invalid coin: {0}")]
    InvalidCoin(Cents),
    #[error("cash box full, coin {0} refused until drained")]
    CashBoxFull(Cents),
}
