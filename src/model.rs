//! Core domain types for the pay station.

use std::collections::BTreeMap;
use std::fmt;

use crate::Cents;

/// Parking time in minutes.
pub type Minutes = u32;

/// Coins handed back on cancel, keyed by value.
pub type CoinReturn = BTreeMap<Cents, u32>;

/// Proof of purchase issued by a successful buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    minutes: Minutes,
}

impl Receipt {
    pub(crate) fn new(minutes: Minutes) -> Self {
        Self { minutes }
    }

    /// Parking time bought.
    pub fn minutes(&self) -> Minutes {
        self.minutes
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

/// An input the station can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert one coin of the given value.
    Insert(Cents),
    /// Read the parking time bought so far.
    Display,
    /// Commit the transaction and issue a receipt.
    Buy,
    /// Abort the transaction and return the inserted coins.
    Cancel,
    /// Collect the revenue banked since the last drain.
    Drain,
}

/// Result of a successfully applied [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted { coin: Cents },
    Display { minutes: Minutes },
    Receipt(Receipt),
    Returned(CoinReturn),
    Drained { cents: Cents },
}
