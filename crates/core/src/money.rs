//! Money value object: amounts in currency minor units (cents).
//!
//! All prices, taxes, and totals in the domain are `Money`. Percentage math
//! (tax rates, sale discounts, amortization) runs through `f64` and is rounded
//! half-away-from-zero back to whole cents at the boundary.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// An amount of money in minor units (e.g. euro cents).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build from minor units (cents).
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// Build from whole major units (e.g. `Money::from_major(50_000)` = 50 000.00).
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply by an integer quantity.
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }

    /// Scale by an arbitrary factor, rounding to the nearest cent.
    ///
    /// Used for tax rates and discount percentages; keep the factor small and
    /// well-formed (this is domain math, not general-purpose arithmetic).
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor).round() as i64)
    }

    /// Apply a percentage discount (`15` -> 85% of the original amount).
    pub fn discounted_by_percent(self, percent: f64) -> Self {
        self.scale(1.0 - percent / 100.0)
    }

    /// Interpret as a floating-point amount of major units.
    pub fn as_major_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Round a floating-point amount of major units to the nearest cent.
    pub fn from_major_f64(major: f64) -> Self {
        Self((major * 100.0).round() as i64)
    }
}

impl ValueObject for Money {}

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

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
