//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The back-office pages summed amounts as floats:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (centavos)                           │
//! │    Every amount is an i64 count of the smallest currency unit.         │
//! │    Rounding happens in exactly one place, with one policy:             │
//! │    round half to even.                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Arithmetic saturates at `i64::MIN` / `i64::MAX` cents instead of
//! panicking or wrapping, so totals over absurd inputs stay total and keep
//! their sign.
//!
//! ## Usage
//! ```rust
//! use ledgerdesk_core::money::Money;
//!
//! let price = Money::from_cents(1_250_000); // 12 500.00 MZN
//! let stock = price * 15_i64;
//! assert_eq!(stock.cents(), 18_750_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Rounding
// =============================================================================

/// Divides `numerator` by a positive `denominator`, rounding half to even.
///
/// ```text
///  0.5 → 0    1.5 → 2    2.5 → 2    -2.5 → -2    -3.5 → -4
/// ```
pub(crate) fn div_round_half_even(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder.abs() * 2;

    let round_away = twice > denominator || (twice == denominator && quotient % 2 != 0);
    if round_away {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

/// Narrows an i128 intermediate to i64, clamping at the bounds.
pub(crate) fn saturate_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value > 0 { i64::MAX } else { i64::MIN })
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for MZN).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances and losses go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: serde serializes it as a plain integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use ledgerdesk_core::money::Money;
    ///
    /// let amount = Money::from_cents(250_000); // 2 500.00
    /// assert_eq!(amount.cents(), 250_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Calculates the tax owed on this amount, rounded half to even.
    ///
    /// ## Implementation
    /// `amount_cents × bps / 10000` on i128, then bankers rounding to the
    /// nearest cent. The intermediate cannot overflow for any i64 amount
    /// and any u32 rate; the result saturates.
    ///
    /// ```rust
    /// use ledgerdesk_core::money::Money;
    /// use ledgerdesk_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(10_000); // 100.00
    /// let tax = price.calculate_tax(TaxRate::from_percent(17));
    /// assert_eq!(tax.cents(), 1_700);
    ///
    /// // 0.25 × 10% = 0.025 → 0.02 (half to even)
    /// let tax = Money::from_cents(25).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax.cents(), 2);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let raw = self.0 as i128 * rate.bps() as i128;
        Money::from_cents(saturate_i64(div_round_half_even(raw, 10_000)))
    }

    /// Rounds to a coarser display precision (`decimals` < 2), half to even.
    ///
    /// Currencies shown without cents still carry cents internally; this is
    /// only for presentation.
    pub fn round_to_decimals(&self, decimals: u32) -> Money {
        if decimals >= 2 {
            return *self;
        }
        let step = 10i128.pow(2 - decimals);
        Money::from_cents(saturate_i64(div_round_half_even(self.0 as i128, step) * step))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented rendering (`-5.50`). Locale-aware currency formatting
/// belongs to the presentation layer, not here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Accumulates in i128 so that an intermediate overshoot followed by a
/// correction still sums exactly; only the final total is clamped.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        let total = iter.fold(0i128, |acc, m| acc.saturating_add(m.0 as i128));
        Money(saturate_i64(total))
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
