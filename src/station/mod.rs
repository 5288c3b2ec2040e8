//! Pay station state machine.
//!
//! A station accepts coins into a per-transaction ledger, displays the parking
//! time they buy, and ends each transaction with either a buy (receipt issued,
//! money banked) or a cancel (coins handed back). Banked revenue survives
//! across transactions until drained.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::model::{CoinReturn, Command, Minutes, Outcome, Receipt};
use crate::{Cents, Denominations};

mod ledger;
pub use ledger::CoinLedger;

mod error;
pub use error::StationError;

/// Every full unit of this many cents buys [`MINUTES_PER_UNIT`] minutes.
pub const CENTS_PER_UNIT: Cents = 5;
/// Minutes bought by one full unit of [`CENTS_PER_UNIT`] cents.
pub const MINUTES_PER_UNIT: Minutes = 2;

/// Parking time bought for an amount. Partial units buy nothing.
pub fn minutes_for(cents: Cents) -> Minutes {
    cents / CENTS_PER_UNIT * MINUTES_PER_UNIT
}

/// A single coin-operated pay station.
#[derive(Debug, Default)]
pub struct PayStation {
    accepted: Denominations,
    ledger: CoinLedger,
    /// Revenue from bought transactions since the last drain
    collected: Cents,
}

/// Public API
impl PayStation {
    /// Create a station accepting the standard coins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a station accepting only the given denominations.
    pub fn with_denominations(accepted: Denominations) -> Self {
        Self {
            accepted,
            ledger: CoinLedger::default(),
            collected: 0,
        }
    }

    pub fn denominations(&self) -> &Denominations {
        &self.accepted
    }

    /// Coins inserted in the current transaction.
    pub fn ledger(&self) -> &CoinLedger {
        &self.ledger
    }

    /// Insert one coin. Rejected coins leave the transaction untouched.
    ///
    /// Banked revenue plus the current transaction must stay representable,
    /// so a coin that would overflow it is refused until the station is drained.
    pub fn insert_coin(&mut self, coin: Cents) -> Result<(), StationError> {
        if !self.accepted.accepts(coin) {
            return Err(StationError::InvalidCoin(coin));
        }
        let held = self
            .collected
            .checked_add(self.inserted_so_far())
            .and_then(|held| held.checked_add(coin));
        if held.is_none() {
            return Err(StationError::CashBoxFull(coin));
        }
        self.ledger.record(coin);
        Ok(())
    }

    /// Money inserted in the current transaction.
    pub fn inserted_so_far(&self) -> Cents {
        self.ledger.total()
    }

    /// Parking time bought by the current transaction.
    pub fn read_display(&self) -> Minutes {
        minutes_for(self.inserted_so_far())
    }

    /// Commit the transaction: bank the inserted money and issue a receipt.
    /// An empty transaction yields a zero-minute receipt.
    pub fn buy(&mut self) -> Receipt {
        let receipt = Receipt::new(self.read_display());
        // insert_coin keeps collected + inserted within range
        self.collected = self.collected.saturating_add(self.inserted_so_far());
        self.ledger.take();
        receipt
    }

    /// Abort the transaction and return the coins that were inserted.
    pub fn cancel(&mut self) -> CoinReturn {
        self.ledger.take()
    }

    /// Revenue banked since the last drain, without collecting it.
    pub fn collected(&self) -> Cents {
        self.collected
    }

    /// Collect the banked revenue, resetting it to zero.
    pub fn drain(&mut self) -> Cents {
        std::mem::take(&mut self.collected)
    }

    /// Apply a single command on top of the current station state
    pub fn apply(&mut self, command: Command) -> Result<Outcome, StationError> {
        let result = match command {
            Command::Insert(coin) => self.insert_coin(coin).map(|()| Outcome::Inserted { coin }),
            Command::Display => Ok(Outcome::Display {
                minutes: self.read_display(),
            }),
            Command::Buy => Ok(Outcome::Receipt(self.buy())),
            Command::Cancel => Ok(Outcome::Returned(self.cancel())),
            Command::Drain => Ok(Outcome::Drained {
                cents: self.drain(),
            }),
        };
        self.log_result(&result);
        result
    }

    /// Run the station over the given command stream, reporting every outcome.
    pub async fn run(
        &mut self,
        mut stream: impl Stream<Item = Command> + Unpin,
        mut on_outcome: impl FnMut(Outcome),
    ) {
        while let Some(command) = stream.next().await {
            // a rejected coin does not end the session
            if let Ok(outcome) = self.apply(command) {
                on_outcome(outcome);
            }
        }
    }
}

/// Private API
impl PayStation {
    fn log_result(&self, result: &Result<Outcome, StationError>) {
        match result {
            Ok(Outcome::Inserted { coin }) => {
                info!(
                    coin = %coin,
                    inserted = %self.inserted_so_far(),
                    minutes = %self.read_display(),
                    "coin accepted"
                );
            }
            Ok(Outcome::Display { minutes }) => {
                info!(minutes = %minutes, "display read");
            }
            Ok(Outcome::Receipt(receipt)) => {
                info!(
                    minutes = %receipt.minutes(),
                    collected = %self.collected,
                    "receipt issued"
                );
            }
            Ok(Outcome::Returned(coins)) => {
                info!(
                    cents = %CoinLedger::value_of(coins),
                    coins = coins.len(),
                    "transaction canceled"
                );
            }
            Ok(Outcome::Drained { cents }) => {
                info!(cents = %cents, "revenue drained");
            }
            Err(e) => {
                warn!(
                    accepted = %self.accepted,
                    collected = %self.collected,
                    reason = %e,
                    "coin rejected"
                );
            }
        }
    }
}
