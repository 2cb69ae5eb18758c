//! Fixed-point monetary values.
//!
//! All amounts in the system are USD and travel on the wire as decimal
//! strings with exactly two fraction digits (e.g. `"285.00"`). Internally a
//! [`Money`] keeps the full [`Decimal`] precision; rounding to the cent
//! happens only when a value is formatted or serialized.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MoneyError {
    /// The input string is not a valid decimal number.
    #[error("invalid monetary amount: {0}")]
    InvalidAmount(#[from] rust_decimal::Error),
}

/// A USD monetary amount backed by decimal arithmetic.
///
/// ```
/// use luxecuffs_core::Money;
///
/// let price: Money = "100.00".parse().unwrap();
/// let total = price * 2 + Money::from_cents(1500);
/// assert_eq!(total.to_string(), "215.00");
/// assert_eq!(total.as_cents(), Some(21500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a monetary amount from a raw decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a monetary amount from a cent count.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal value at full precision.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Amount in the smallest currency unit (cents), rounded to the cent.
    ///
    /// Returns `None` if the value does not fit in an `i64` cent count.
    #[must_use]
    pub fn as_cents(&self) -> Option<i64> {
        (self.0.round_dp(2) * Decimal::ONE_HUNDRED).to_i64()
    }

    /// Whether this amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Exactly two fraction digits, rounded to the cent
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        write!(f, "{rounded}")
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Decimal's own visitor accepts both decimal strings and bare numbers
        <Decimal as Deserialize>::deserialize(deserializer).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
