use crate::Cents;
use crate::model::CoinReturn;

/// Coins inserted during the current transaction.
/// Only denominations inserted at least once are present, always with a positive count.
#[derive(Debug, Default)]
pub struct CoinLedger {
    coins: CoinReturn,
}

impl CoinLedger {
    pub fn record(&mut self, coin: Cents) {
        *self.coins.entry(coin).or_insert(0) += 1;
    }

    pub fn count(&self, coin: Cents) -> u32 {
        self.coins.get(&coin).copied().unwrap_or(0)
    }

    pub fn total(&self) -> Cents {
        Self::value_of(&self.coins)
    }

    /// Value of a set of coins. Saturates instead of wrapping.
    pub fn value_of(coins: &CoinReturn) -> Cents {
        coins.iter().fold(0, |total: Cents, (coin, count)| {
            total.saturating_add(coin.saturating_mul(*count))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Hand over the recorded coins and leave the ledger empty.
    pub fn take(&mut self) -> CoinReturn {
        std::mem::take(&mut self.coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_default_is_empty() {
        let ledger = CoinLedger::default();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0);
        assert_eq!(ledger.count(5), 0);
    }

    #[test]
    fn record_counts_per_denomination() {
        let mut ledger = CoinLedger::default();
        ledger.record(25);
        ledger.record(5);
        ledger.record(25);

        assert_eq!(ledger.count(5), 1);
        assert_eq!(ledger.count(25), 2);
        assert_eq!(ledger.count(10), 0);
    }

    #[test]
    fn total_weighs_counts_by_value() {
        let mut ledger = CoinLedger::default();
        ledger.record(10);
        ledger.record(10);
        ledger.record(25);
        assert_eq!(ledger.total(), 45);
    }

    #[test]
    fn value_of_saturates() {
        let coins = CoinReturn::from([(Cents::MAX, 2), (5, 1)]);
        assert_eq!(CoinLedger::value_of(&coins), Cents::MAX);
        assert_eq!(CoinLedger::value_of(&CoinReturn::new()), 0);
    }

    #[test]
    fn take_empties_ledger() {
        let mut ledger = CoinLedger::default();
        ledger.record(10);

        let coins = ledger.take();
        assert_eq!(coins, CoinReturn::from([(10, 1)]));
        assert!(ledger.is_empty());

        ledger.record(5);
        assert_eq!(coins, CoinReturn::from([(10, 1)]));
    }
}
