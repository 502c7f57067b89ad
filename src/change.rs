//! Change-making.
//!
//! Greedy, largest denomination first. This yields exact change for the
//! machine's coin set whenever the inventory is reasonably stocked, but it is
//! not an optimal solver: a sparse inventory can make greedy fail where another
//! combination would have succeeded.

use thiserror::Error;

use crate::Amount;
use crate::coin::{Coins, Denomination};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangeError {
    #[error("cannot give change for negative amount {0}")]
    InvalidAmount(Amount),
    #[error("not enough coins to return {requested}: {remaining} left uncovered")]
    InsufficientChange { requested: Amount, remaining: Amount },
}

/// Compute the coins to hand back for `amount` out of `available`.
///
/// The result always sums exactly to `amount` and never takes more coins of a
/// denomination than `available` holds. `available` itself is left untouched;
/// on failure nothing is returned.
pub fn make_change(available: &Coins, amount: Amount) -> Result<Coins, ChangeError> {
    if amount.is_negative() {
        return Err(ChangeError::InvalidAmount(amount));
    }
    if amount.is_zero() {
        return Ok(Coins::new());
    }

    let insufficient = |remaining| ChangeError::InsufficientChange {
        requested: amount,
        remaining,
    };

    if available.is_empty() {
        return Err(insufficient(amount));
    }

    let mut scratch = available.clone();
    let mut change = Coins::new();
    let mut remaining = amount;

    for coin in Denomination::descending() {
        if remaining.is_zero() {
            break;
        }
        let value = coin.value();
        while value <= remaining && scratch.get(coin) > 0 {
            scratch
                .remove(coin, 1)
                .map_err(|_| insufficient(remaining))?;
            change.add(coin, 1);
            remaining -= value;
        }
    }

    if remaining.is_zero() {
        Ok(change)
    } else {
        Err(insufficient(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        s.parse().unwrap()
    }

    fn coins(entries: &[(Denomination, u32)]) -> Coins {
        entries.iter().copied().collect()
    }

    #[test]
    fn zero_amount_needs_no_coins() {
        assert_eq!(make_change(&Coins::each(3), Amount::ZERO), Ok(Coins::new()));
    }

    #[test]
    fn zero_amount_wins_over_empty_inventory() {
        assert_eq!(make_change(&Coins::new(), Amount::ZERO), Ok(Coins::new()));
    }

    #[test]
    fn negative_amount_is_invalid() {
        assert_eq!(
            make_change(&Coins::each(3), amt("-0.1")),
            Err(ChangeError::InvalidAmount(amt("-0.1")))
        );
    }

    #[test]
    fn empty_inventory_cannot_give_change() {
        assert!(matches!(
            make_change(&Coins::new(), amt("1")),
            Err(ChangeError::InsufficientChange { .. })
        ));
    }

    #[test]
    fn change_for_21_7_from_five_of_each() {
        let change = make_change(&Coins::each(5), amt("21.7")).unwrap();

        assert_eq!(change.total_value(), amt("21.7"));
        assert_eq!(
            change,
            coins(&[
                (Denomination::Five, 4),
                (Denomination::One, 1),
                (Denomination::Half, 1),
                (Denomination::Fifth, 1),
            ])
        );
    }

    #[test]
    fn fifths_cannot_make_a_half() {
        let available = coins(&[(Denomination::Fifth, 5)]);
        assert_eq!(
            make_change(&available, amt("0.5")),
            Err(ChangeError::InsufficientChange {
                requested: amt("0.5"),
                remaining: amt("0.1"),
            })
        );
    }

    #[test]
    fn falls_back_to_smaller_coins_when_large_run_out() {
        let available = coins(&[(Denomination::Five, 1), (Denomination::One, 10)]);
        let change = make_change(&available, amt("8")).unwrap();
        assert_eq!(
            change,
            coins(&[(Denomination::Five, 1), (Denomination::One, 3)])
        );
    }

    #[test]
    fn exhausted_inventory_fails_without_partial_change() {
        let available = coins(&[(Denomination::Two, 1), (Denomination::Tenth, 2)]);
        assert_eq!(
            make_change(&available, amt("3")),
            Err(ChangeError::InsufficientChange {
                requested: amt("3"),
                remaining: amt("0.8"),
            })
        );
    }

    #[test]
    fn caller_inventory_is_untouched() {
        let available = Coins::each(2);
        let before = available.clone();

        make_change(&available, amt("7.3")).unwrap();
        assert_eq!(available, before);

        make_change(&available, amt("100")).unwrap_err();
        assert_eq!(available, before);
    }

    #[test]
    fn never_takes_more_than_available() {
        let available = Coins::each(1);
        let change = make_change(&available, amt("8.8")).unwrap();
        assert_eq!(change, available);
    }

    #[test]
    fn exact_for_every_tenth_up_to_twenty() {
        let available = Coins::each(10);
        for tenths in 0..=200 {
            let amount = Amount::from_scaled(tenths * 1_000);
            let change = make_change(&available, amount).unwrap();
            assert_eq!(change.total_value(), amount);
            for (coin, count) in change.iter() {
                assert!(count <= available.get(coin));
            }
        }
    }
}
