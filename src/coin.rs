//! Coin denominations and coin count maps.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

/// A coin face value recognized by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    Five,
    Two,
    One,
    Half,
    Fifth,
    Tenth,
}

impl Denomination {
    /// All denominations, largest value first.
    pub const DESCENDING: [Denomination; 6] = [
        Denomination::Five,
        Denomination::Two,
        Denomination::One,
        Denomination::Half,
        Denomination::Fifth,
        Denomination::Tenth,
    ];

    pub const fn value(self) -> Amount {
        match self {
            Denomination::Five => Amount::from_scaled(50_000),
            Denomination::Two => Amount::from_scaled(20_000),
            Denomination::One => Amount::from_scaled(10_000),
            Denomination::Half => Amount::from_scaled(5_000),
            Denomination::Fifth => Amount::from_scaled(2_000),
            Denomination::Tenth => Amount::from_scaled(1_000),
        }
    }

    pub fn descending() -> impl Iterator<Item = Denomination> {
        Self::DESCENDING.into_iter()
    }
}

impl Ord for Denomination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for Denomination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Denomination::Five => "5",
            Denomination::Two => "2",
            Denomination::One => "1",
            Denomination::Half => "0.5",
            Denomination::Fifth => "0.2",
            Denomination::Tenth => "0.1",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not an accepted coin")]
pub struct UnknownDenomination(pub String);

impl FromStr for Denomination {
    type Err = UnknownDenomination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Amount = s
            .parse()
            .map_err(|_| UnknownDenomination(s.to_string()))?;
        Self::descending()
            .find(|d| d.value() == value)
            .ok_or_else(|| UnknownDenomination(s.to_string()))
    }
}

/// Withdrawal would drive a coin count below zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("cannot remove {want} coins of {coin}, only {have} present")]
    Underflow {
        coin: Denomination,
        have: u32,
        want: u32,
    },
}

/// Coin counts per denomination.
///
/// Zero counts are never stored, so two maps holding the same coins compare
/// equal regardless of how they were built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coins(BTreeMap<Denomination, u32>);

impl Coins {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` coins of every denomination.
    pub fn each(count: u32) -> Self {
        Denomination::descending().map(|d| (d, count)).collect()
    }

    pub fn single(coin: Denomination) -> Self {
        let mut coins = Self::new();
        coins.add(coin, 1);
        coins
    }

    pub fn get(&self, coin: Denomination) -> u32 {
        self.0.get(&coin).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of physical coins.
    pub fn count(&self) -> u32 {
        self.0.values().fold(0, |acc, n| acc.saturating_add(*n))
    }

    /// Iterate non-zero counts, largest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.0.iter().rev().map(|(d, n)| (*d, *n))
    }

    pub fn total_value(&self) -> Amount {
        self.iter().map(|(d, n)| d.value() * n).sum()
    }

    /// Counts saturate at `u32::MAX`; capacity limits are enforced by the caller.
    pub fn add(&mut self, coin: Denomination, count: u32) {
        if count > 0 {
            let held = self.0.entry(coin).or_insert(0);
            *held = held.saturating_add(count);
        }
    }

    pub fn add_all(&mut self, other: &Coins) {
        for (coin, count) in other.iter() {
            self.add(coin, count);
        }
    }

    pub fn remove(&mut self, coin: Denomination, count: u32) -> Result<(), InventoryError> {
        let have = self.get(coin);
        if have < count {
            return Err(InventoryError::Underflow {
                coin,
                have,
                want: count,
            });
        }
        if have == count {
            self.0.remove(&coin);
        } else {
            self.0.insert(coin, have - count);
        }
        Ok(())
    }

    /// Remove every coin of `other`, or nothing at all if any count would underflow.
    pub fn remove_all(&mut self, other: &Coins) -> Result<(), InventoryError> {
        for (coin, want) in other.iter() {
            let have = self.get(coin);
            if have < want {
                return Err(InventoryError::Underflow { coin, have, want });
            }
        }
        for (coin, count) in other.iter() {
            self.remove(coin, count)?;
        }
        Ok(())
    }

    /// Empty the map, handing back its previous contents.
    pub fn take(&mut self) -> Coins {
        std::mem::take(self)
    }
}

impl FromIterator<(Denomination, u32)> for Coins {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        let mut coins = Coins::new();
        for (coin, count) in iter {
            coins.add(coin, count);
        }
        coins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn denominations_are_ordered_by_value() {
        let mut sorted = Denomination::DESCENDING.to_vec();
        sorted.sort();
        sorted.reverse();
        assert_eq!(sorted, Denomination::DESCENDING.to_vec());
        assert!(Denomination::Tenth < Denomination::Fifth);
        assert!(Denomination::Five > Denomination::Two);
    }

    #[test]
    fn parse_denomination() {
        assert_eq!("5".parse::<Denomination>(), Ok(Denomination::Five));
        assert_eq!("0.5".parse::<Denomination>(), Ok(Denomination::Half));
        assert_eq!("0.50".parse::<Denomination>(), Ok(Denomination::Half));
        assert_eq!("0.1".parse::<Denomination>(), Ok(Denomination::Tenth));
        assert!("0.3".parse::<Denomination>().is_err());
        assert!("coin".parse::<Denomination>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for coin in Denomination::descending() {
            assert_eq!(coin.to_string().parse::<Denomination>(), Ok(coin));
        }
    }

    #[test]
    fn total_value_is_exact() {
        let coins: Coins = [
            (Denomination::Tenth, 1),
            (Denomination::Fifth, 2),
            (Denomination::Half, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(coins.total_value(), Amount::from_units(1));
    }

    #[test]
    fn total_value_of_empty_is_zero() {
        assert_eq!(Coins::new().total_value(), Amount::ZERO);
    }

    #[test]
    fn total_value_of_each() {
        // 5 + 2 + 1 + 0.5 + 0.2 + 0.1 = 8.8
        assert_eq!(Coins::each(1).total_value(), amt("8.8"));
        assert_eq!(Coins::each(5).total_value(), amt("44"));
    }

    #[test]
    fn iter_is_descending() {
        let coins: Coins = [(Denomination::Tenth, 3), (Denomination::Two, 1)]
            .into_iter()
            .collect();
        let order: Vec<_> = coins.iter().collect();
        assert_eq!(order, vec![(Denomination::Two, 1), (Denomination::Tenth, 3)]);
    }

    #[test]
    fn zero_counts_are_not_stored() {
        let mut coins = Coins::new();
        coins.add(Denomination::One, 0);
        assert!(coins.is_empty());

        coins.add(Denomination::One, 2);
        coins.remove(Denomination::One, 2).unwrap();
        assert_eq!(coins, Coins::new());
    }

    #[test]
    fn remove_refuses_underflow() {
        let mut coins = Coins::single(Denomination::One);
        let err = coins.remove(Denomination::One, 2).unwrap_err();
        assert_eq!(
            err,
            InventoryError::Underflow {
                coin: Denomination::One,
                have: 1,
                want: 2
            }
        );
        assert_eq!(coins.get(Denomination::One), 1);
    }

    #[test]
    fn remove_all_is_all_or_nothing() {
        let mut coins: Coins = [(Denomination::Five, 2), (Denomination::Half, 1)]
            .into_iter()
            .collect();
        let before = coins.clone();

        let too_many: Coins = [(Denomination::Five, 1), (Denomination::Half, 2)]
            .into_iter()
            .collect();
        assert!(coins.remove_all(&too_many).is_err());
        assert_eq!(coins, before);

        let ok: Coins = [(Denomination::Five, 1), (Denomination::Half, 1)]
            .into_iter()
            .collect();
        coins.remove_all(&ok).unwrap();
        assert_eq!(coins, Coins::single(Denomination::Five));
    }

    #[test]
    fn add_all_merges_counts() {
        let mut coins = Coins::single(Denomination::Two);
        coins.add_all(&Coins::each(1));
        assert_eq!(coins.get(Denomination::Two), 2);
        assert_eq!(coins.get(Denomination::Tenth), 1);
        assert_eq!(coins.count(), 7);
    }

    #[test]
    fn add_saturates_instead_of_wrapping() {
        let mut coins = Coins::each(u32::MAX);
        coins.add(Denomination::Tenth, 1);
        assert_eq!(coins.get(Denomination::Tenth), u32::MAX);
        assert_eq!(coins.count(), u32::MAX);
    }

    #[test]
    fn take_empties() {
        let mut coins = Coins::each(2);
        let taken = coins.take();
        assert!(coins.is_empty());
        assert_eq!(taken, Coins::each(2));
    }
}
