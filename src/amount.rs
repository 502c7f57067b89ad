use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

/// Error returned when a decimal string cannot be represented exactly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("'{0}' is not a decimal number")]
    Malformed(String),
    #[error("'{0}' has more than 4 decimal places")]
    TooPrecise(String),
    #[error("'{0}' is out of range")]
    Overflow(String),
}

impl Amount {
    const SCALE: i64 = 10_000;
    const PLACES: usize = 4;

    pub const ZERO: Amount = Amount(0);

    pub const fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole units, e.g. `Amount::from_units(5)` is `5.0000`.
    pub const fn from_units(units: i64) -> Self {
        Amount(units * Self::SCALE)
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AmountParseError::Malformed(s.to_string());
        let overflow = || AmountParseError::Overflow(s.to_string());

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(malformed());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }
        if frac.len() > Self::PLACES {
            return Err(AmountParseError::TooPrecise(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        // right-pad so "5" after the point means 5000 scaled units
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<width$}", width = Self::PLACES)
                .parse()
                .map_err(|_| malformed())?
        };

        let scaled = whole
            .checked_mul(Self::SCALE)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(overflow)?;

        Ok(Amount(if negative { -scaled } else { scaled }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Mul<u32> for Amount {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Amount(self.0 * i64::from(rhs))
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn from_scaled_preserves_value() {
        let amount = Amount::from_scaled(123456);
        assert_eq!(amount, Amount(123456));
    }

    #[test]
    fn from_units_scales() {
        assert_eq!(Amount::from_units(5), Amount::from_scaled(50_000));
        assert_eq!(Amount::from_units(-2), Amount::from_scaled(-20_000));
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(amt("100"), Amount::from_scaled(1_000_000));
        assert_eq!(amt("1.5"), Amount::from_scaled(15_000));
        assert_eq!(amt("0.0001"), Amount::from_scaled(1));
        assert_eq!(amt(".5"), Amount::from_scaled(5_000));
        assert_eq!(amt(" 2.50 "), Amount::from_scaled(25_000));
    }

    #[test]
    fn parse_handles_negative() {
        assert_eq!(amt("-50.25"), Amount::from_scaled(-502_500));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(AmountParseError::Malformed(_))
        ));
        assert!(matches!(
            "".parse::<Amount>(),
            Err(AmountParseError::Malformed(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<Amount>(),
            Err(AmountParseError::Malformed(_))
        ));
        assert!(matches!(
            "0.00001".parse::<Amount>(),
            Err(AmountParseError::TooPrecise(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Amount>(),
            Err(AmountParseError::Overflow(_))
        ));
    }

    #[test]
    fn tenths_and_fifths_sum_exactly() {
        let sum = amt("0.1") + amt("0.2") + amt("0.2") + amt("0.5");
        assert_eq!(sum, Amount::from_units(1));
    }

    #[test]
    fn display_formats_positive() {
        assert_eq!(Amount::from_scaled(1_000_000).to_string(), "100.0000");
        assert_eq!(Amount::from_scaled(15_000).to_string(), "1.5000");
        assert_eq!(Amount::from_scaled(1).to_string(), "0.0001");
        assert_eq!(Amount::from_scaled(0).to_string(), "0.0000");
    }

    #[test]
    fn display_formats_negative() {
        assert_eq!(Amount::from_scaled(-502_500).to_string(), "-50.2500");
        assert_eq!(Amount::from_scaled(-1).to_string(), "-0.0001");
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(Amount::default().is_zero());
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_scaled(100);
        a += Amount::from_scaled(50);
        assert_eq!(a, Amount::from_scaled(150));
        a -= Amount::from_scaled(30);
        assert_eq!(a, Amount::from_scaled(120));
        assert_eq!(a - Amount::from_scaled(200), Amount::from_scaled(-80));
        assert_eq!(-a, Amount::from_scaled(-120));
        assert_eq!(a * 3, Amount::from_scaled(360));
    }

    #[test]
    fn sum_of_amounts() {
        let total: Amount = [amt("0.5"), amt("0.2"), amt("0.1")].into_iter().sum();
        assert_eq!(total, amt("0.8"));
    }

    #[test]
    fn negative_ordering() {
        let negative = Amount::from_scaled(-100);
        let zero = Amount::ZERO;
        let positive = Amount::from_scaled(100);
        assert!(negative < zero);
        assert!(zero < positive);
        assert!(negative.is_negative());
        assert!(!positive.is_negative());
    }
}
