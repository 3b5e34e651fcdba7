//! Fixed-point monetary amounts in integer minor units

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount stored as integer minor units (cents).
///
/// All ledger arithmetic, equality, and ordering happen on the integer
/// value, so `0.10 + 0.20 == 0.30` holds exactly. Decimal values only
/// appear at the parse/format boundary via [`BigDecimal`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// The zero amount
    pub const ZERO: Amount = Amount(0);

    /// Minor units per major unit (two decimal places)
    pub const MINOR_PER_MAJOR: i64 = 100;

    /// Create an amount from minor units (e.g. `1050` is 10.50)
    pub const fn from_minor(minor: i64) -> Self {
        Amount(minor)
    }

    /// Create an amount from whole major units (e.g. `10` is 10.00)
    pub const fn from_major(major: i64) -> Self {
        Amount(major * Self::MINOR_PER_MAJOR)
    }

    /// The raw minor-unit value
    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Absolute value
    pub const fn abs(self) -> Self {
        Amount(self.0.abs())
    }

    /// Checked addition, `None` when the sum leaves the `i64` range
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction, `None` when the difference leaves the `i64` range
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Convert an exact decimal value into minor units.
    ///
    /// Values with more than two decimal places are rejected rather than
    /// rounded; sub-cent precision never enters the ledger.
    pub fn from_decimal(value: &BigDecimal) -> Result<Self, AmountError> {
        let scaled = value * BigDecimal::from(Self::MINOR_PER_MAJOR);
        if !scaled.is_integer() {
            return Err(AmountError::Precision(value.clone()));
        }
        scaled
            .to_i64()
            .map(Amount)
            .ok_or_else(|| AmountError::OutOfRange(value.clone()))
    }

    /// The exact decimal value in major units
    pub fn to_decimal(self) -> BigDecimal {
        BigDecimal::from(self.0) / BigDecimal::from(Self::MINOR_PER_MAJOR)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let minor = Self::MINOR_PER_MAJOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / minor, abs % minor)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = BigDecimal::from_str(s.trim())
            .map_err(|_| AmountError::Unparseable(s.to_string()))?;
        Self::from_decimal(&decimal)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 -= rhs.0;
    }
}

/// Errors when converting decimal values into fixed-point amounts
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    #[error("'{0}' is not a valid decimal amount")]
    Unparseable(String),
    #[error("amount {0} carries sub-cent precision")]
    Precision(BigDecimal),
    #[error("amount {0} is outside the representable range")]
    OutOfRange(BigDecimal),
}
