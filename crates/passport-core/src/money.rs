//! # Money Module
//!
//! Provides the `Money` type for prices held in the reference currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Catalog price 0.1 + 0.2 in floats = 0.30000000000000004  ❌            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents of the reference currency (EUR)            │
//! │    line total  = unit cents × quantity     (exact)                      │
//! │    cart total  = Σ line totals             (exact)                      │
//! │    display     = decimal rate × total      (rounded once, at the end)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use passport_core::money::Money;
//!
//! let price = Money::from_cents(1250); // €12.50
//! let line = price.checked_mul_quantity(2).unwrap();
//! assert_eq!(line.cents(), 2500);
//! assert_eq!(line.to_string(), "€25.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Number of minor units in one major unit of the reference currency.
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents of the reference currency.
///
/// ## Where Money is Used
/// ```text
/// Catalog price_eur ──► Product.unit_price ──► CartLineItem.line_total
///                                                     │
///                                Cart.subtotal ◄──────┘
///                                      │
///                                      ▼
///                    ConversionTable::format(subtotal, display currency)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units (a catalog `price_eur`) to cents.
    ///
    /// Sub-cent digits are rounded half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use passport_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_decimal(Decimal::new(12345, 3)).unwrap(); // 12.345
    /// assert_eq!(price.cents(), 1235);
    /// ```
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let cents = amount
            .checked_mul(Decimal::from(CENTS_PER_UNIT))
            .and_then(|scaled| {
                scaled
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    .to_i64()
            })
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("{amount} is out of range"),
            })?;
        Ok(Money(cents))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as an exact decimal in major units.
    ///
    /// ```rust
    /// use passport_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3500).to_decimal().to_string(), "35.00");
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the major unit (euro) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Errors
    /// - `TotalOutOfRange` if the product does not fit in cents
    ///
    /// ```rust
    /// use passport_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.checked_mul_quantity(2).unwrap().cents(), 2000);
    /// assert!(Money::from_cents(i64::MAX).checked_mul_quantity(2).is_err());
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> CoreResult<Self> {
        self.0
            .checked_mul(qty)
            .map(Money)
            .ok_or(CoreError::TotalOutOfRange)
    }

    /// Adds two amounts.
    ///
    /// ## Errors
    /// - `TotalOutOfRange` if the sum does not fit in cents
    #[inline]
    pub fn checked_add(&self, other: Money) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::TotalOutOfRange)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money in the reference currency.
///
/// ## Note
/// For debugging and logs. Display-currency rendering goes through
/// [`ConversionTable::format`](crate::currency::ConversionTable::format).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
