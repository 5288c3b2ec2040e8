//! Coin denominations and the policy deciding which ones a station accepts.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A monetary value in cents.
pub type Cents = u32;

/// The coins a standard station recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coin {
    Nickel,
    Dime,
    Quarter,
}

impl Coin {
    pub const ALL: [Coin; 3] = [Coin::Nickel, Coin::Dime, Coin::Quarter];

    pub fn cents(self) -> Cents {
        match self {
            Coin::Nickel => 5,
            Coin::Dime => 10,
            Coin::Quarter => 25,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cents())
    }
}

/// Errors raised while parsing a denomination list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DenominationsError {
    #[error("denomination list is empty")]
    Empty,
    #[error("invalid denomination '{0}'")]
    Invalid(String),
}

/// Set of coin values a station accepts.
///
/// Defaults to every [`Coin`]. Stations validate each inserted value against it.
/// Values outside `1..=MAX` are never accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denominations(BTreeSet<Cents>);

impl Denominations {
    /// Largest accepted coin value, one hundred dollars.
    pub const MAX: Cents = 10_000;

    pub fn new(values: impl IntoIterator<Item = Cents>) -> Self {
        Denominations(
            values
                .into_iter()
                .filter(|v| (1..=Self::MAX).contains(v))
                .collect(),
        )
    }

    pub fn accepts(&self, value: Cents) -> bool {
        self.0.contains(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cents> + '_ {
        self.0.iter().copied()
    }
}

impl Default for Denominations {
    fn default() -> Self {
        Self::new(Coin::ALL.map(Coin::cents))
    }
}

impl FromIterator<Coin> for Denominations {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Coin::cents))
    }
}

/// Parses a comma-separated list such as `"5,10,25"`.
impl FromStr for Denominations {
    type Err = DenominationsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<Cents>() {
                Ok(value) if (1..=Self::MAX).contains(&value) => Ok(value),
                _ => Err(DenominationsError::Invalid(part.to_string())),
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        if values.is_empty() {
            return Err(DenominationsError::Empty);
        }
        Ok(Denominations(values))
    }
}

impl fmt::Display for Denominations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        Ok(())
    }
}
