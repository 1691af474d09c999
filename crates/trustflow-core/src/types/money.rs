//! Fixed-point money and percentage types.
//!
//! All monetary arithmetic is decimal. Amounts are rounded to the currency's
//! minor unit (cents) with half-up rounding, which for the non-negative
//! amounts this crate deals in is the same as rounding half away from zero.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of decimal places in the currency's minor unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// A dollar amount held as an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal amount without rounding.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from whole dollars.
    ///
    /// # Examples
    ///
    /// ```
    /// use trustflow_core::Money;
    ///
    /// assert_eq!(Money::from_dollars(19_000).to_string(), "19000.00");
    /// ```
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Creates an amount from a count of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MINOR_UNIT_SCALE))
    }

    /// Returns the underlying decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `true` if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to the minor unit, half-up.
    pub fn round_to_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns how far `self` is above `limit`, or zero when it is not.
    pub fn excess_over(self, limit: Money) -> Money {
        if self > limit {
            self - limit
        } else {
            Money::ZERO
        }
    }

    /// Adds `rhs`, failing with a validation error instead of overflowing.
    ///
    /// The `+` operator panics past the decimal range; anything summing
    /// amounts read from input goes through this instead.
    pub fn checked_add(self, rhs: Money) -> Result<Money> {
        self.0.checked_add(rhs.0).map(Money).ok_or_else(|| {
            Error::validation_field(
                "amount",
                format!("{self} + {rhs} is outside the supported range"),
            )
        })
    }

    /// Sums `amounts` with [`checked_add`](Self::checked_add).
    pub fn checked_sum<I>(amounts: I) -> Result<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        Decimal::from_str(&cleaned)
            .map(Self)
            .map_err(|e| Error::validation(format!("invalid amount '{s}': {e}")))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// A share of a gift, between 0 and 100 inclusive.
///
/// Values outside the range cannot be constructed, so a negative withdrawal
/// percentage is rejected when the beneficiary record is read rather than
/// discovered during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// One hundred percent.
    pub const FULL: Percentage = Percentage(Decimal::ONE_HUNDRED);

    /// Creates a percentage, rejecting values outside `[0, 100]`.
    pub fn new(value: Decimal) -> Result<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(Error::validation_field(
                "withdrawal_percentage",
                format!("must not be negative (got {value})"),
            ));
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(Error::validation_field(
                "withdrawal_percentage",
                format!("must not exceed 100 (got {value})"),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a whole-number percentage.
    pub fn whole(value: u32) -> Result<Self> {
        Self::new(Decimal::from(value))
    }

    /// Returns the underlying decimal value (e.g. `60` for 60%).
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` for a 0% share.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Computes this share of `amount`, rounded to cents.
    ///
    /// Fails when `amount × percentage` leaves the decimal range.
    ///
    /// # Examples
    ///
    /// ```
    /// use trustflow_core::{Money, Percentage};
    ///
    /// let share = Percentage::whole(60)
    ///     .unwrap()
    ///     .share_of(Money::from_dollars(36_000))
    ///     .unwrap();
    /// assert_eq!(share, Money::from_dollars(21_600));
    /// ```
    pub fn share_of(&self, amount: Money) -> Result<Money> {
        amount
            .amount()
            .checked_mul(self.0)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .map(|share| Money::new(share).round_to_cents())
            .ok_or_else(|| {
                Error::validation_field(
                    "amount",
                    format!("{self} of {amount} is outside the supported range"),
                )
            })
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
