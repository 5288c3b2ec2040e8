pub mod coin;
pub mod csv;
pub mod model;
pub mod station;

pub use coin::{Cents, Coin, Denominations};
pub use model::{CoinReturn, Command, Minutes, Outcome, Receipt};
pub use station::{PayStation, StationError};
