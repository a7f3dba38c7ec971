//! # Currency Module
//!
//! Display currencies and the conversion table used to render reference
//! amounts for the shopper.
//!
//! ## Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Display-Time Conversion                              │
//! │                                                                         │
//! │  Cart subtotal (EUR cents) ── to_decimal ──► 35.00                      │
//! │                                               │                         │
//! │                         × rate (table)        ▼                         │
//! │                    ┌──────────┬──────────┬──────────────┐               │
//! │                    │ EUR 1    │ USD 1.08 │ XOF 655.957  │               │
//! │                    └────┬─────┴────┬─────┴──────┬───────┘               │
//! │                         ▼          ▼            ▼                       │
//! │  round half up to:   2 places   2 places     0 places                   │
//! │                         ▼          ▼            ▼                       │
//! │  render:             €35.00     $37.80      22958 XOF                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored prices are never converted; only read-side rendering is.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// The closed set of display currencies.
///
/// Adding a variant forces a matching entry in [`ConversionTable`]: the
/// table's lookup is an exhaustive match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro, the reference currency every price is stored in.
    #[default]
    Eur,
    /// US dollar.
    Usd,
    /// West African CFA franc (no minor unit on display).
    Xof,
}

impl Currency {
    /// Every currency, in selector order.
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Xof];

    /// The currency prices are stored in.
    pub const REFERENCE: Currency = Currency::Eur;

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Xof => "XOF",
        }
    }

    /// Returns true for the reference currency.
    pub const fn is_reference(&self) -> bool {
        matches!(self, Currency::Eur)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    /// Parses a currency code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "XOF" => Ok(Currency::Xof),
            _ => Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Currency Format
// =============================================================================

/// Where the currency marker goes when rendering an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affix {
    /// Symbol glued before the number: `€35.00`.
    Prefix(String),
    /// Code after the number, space separated: `22958 XOF`.
    Suffix(String),
}

/// Conversion rate and rendering rule for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Units of this currency per one unit of the reference currency.
    pub rate: Decimal,
    /// Decimal places shown.
    pub decimals: u32,
    /// Symbol or code placement.
    pub affix: Affix,
}

impl CurrencyFormat {
    fn new(rate: Decimal, decimals: u32, affix: Affix) -> Self {
        CurrencyFormat {
            rate,
            decimals,
            affix,
        }
    }

    /// Renders an already-converted amount.
    fn render(&self, value: Decimal) -> String {
        match &self.affix {
            Affix::Prefix(symbol) if value.is_sign_negative() && !value.is_zero() => {
                format!("-{}{}", symbol, value.abs())
            }
            Affix::Prefix(symbol) => format!("{}{}", symbol, value),
            Affix::Suffix(code) => format!("{} {}", value, code),
        }
    }
}

// =============================================================================
// Conversion Table
// =============================================================================

/// Fixed rates and rendering rules for every [`Currency`].
///
/// The default table carries the shop's published rates. Tests and
/// configuration substitute their own through [`ConversionTable::with_rate`].
///
/// ## Example
/// ```rust
/// use passport_core::currency::{ConversionTable, Currency};
/// use passport_core::money::Money;
///
/// let table = ConversionTable::default();
/// let total = Money::from_cents(3500);
///
/// assert_eq!(table.format(total, Currency::Eur).unwrap(), "€35.00");
/// assert_eq!(table.format(total, Currency::Usd).unwrap(), "$37.80");
/// assert_eq!(table.format(total, Currency::Xof).unwrap(), "22958 XOF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTable {
    eur: CurrencyFormat,
    usd: CurrencyFormat,
    xof: CurrencyFormat,
}

impl Default for ConversionTable {
    fn default() -> Self {
        ConversionTable {
            eur: CurrencyFormat::new(Decimal::ONE, 2, Affix::Prefix("€".to_string())),
            usd: CurrencyFormat::new(Decimal::new(108, 2), 2, Affix::Prefix("$".to_string())),
            xof: CurrencyFormat::new(Decimal::new(655_957, 3), 0, Affix::Suffix("XOF".to_string())),
        }
    }
}

impl ConversionTable {
    /// Returns the format entry for a currency.
    pub fn get(&self, currency: Currency) -> &CurrencyFormat {
        match currency {
            Currency::Eur => &self.eur,
            Currency::Usd => &self.usd,
            Currency::Xof => &self.xof,
        }
    }

    fn get_mut(&mut self, currency: Currency) -> &mut CurrencyFormat {
        match currency {
            Currency::Eur => &mut self.eur,
            Currency::Usd => &mut self.usd,
            Currency::Xof => &mut self.xof,
        }
    }

    /// Returns the rate for a currency.
    pub fn rate(&self, currency: Currency) -> Decimal {
        self.get(currency).rate
    }

    /// Returns a table with one rate replaced.
    ///
    /// ## Errors
    /// - `MustBePositive` if `rate <= 0`
    /// - `InvalidFormat` if the reference currency is given a rate other than 1
    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> CoreResult<Self> {
        validate_rate(currency, rate)?;
        self.get_mut(currency).rate = rate;
        Ok(self)
    }

    /// Returns a table with one currency's whole format replaced.
    pub fn with_format(mut self, currency: Currency, format: CurrencyFormat) -> CoreResult<Self> {
        validate_rate(currency, format.rate)?;
        *self.get_mut(currency) = format;
        Ok(self)
    }

    /// Converts a reference amount into `currency`, rounded to its display places.
    ///
    /// Midpoints round half away from zero, so `22958.5` becomes `22959` while
    /// `22958.495` becomes `22958`.
    pub fn convert(&self, amount: Money, currency: Currency) -> CoreResult<Decimal> {
        let format = self.get(currency);
        let mut converted = amount
            .to_decimal()
            .checked_mul(format.rate)
            .ok_or(CoreError::ConversionOverflow { currency })?
            .round_dp_with_strategy(format.decimals, RoundingStrategy::MidpointAwayFromZero);
        converted.rescale(format.decimals);
        Ok(converted)
    }

    /// Converts and renders a reference amount in `currency`.
    pub fn format(&self, amount: Money, currency: Currency) -> CoreResult<String> {
        let converted = self.convert(amount, currency)?;
        Ok(self.get(currency).render(converted))
    }
}

fn validate_rate(currency: Currency, rate: Decimal) -> Result<(), ValidationError> {
    if rate <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: format!("{} rate", currency),
        });
    }
    if currency.is_reference() && rate != Decimal::ONE {
        return Err(ValidationError::InvalidFormat {
            field: format!("{} rate", currency),
            reason: "reference currency rate is fixed at 1".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parsing() {
        assert_eq!("EUR".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("xof".parse::<Currency>().unwrap(), Currency::Xof);

        let err = "GBP".parse::<Currency>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { ref allowed, .. } if allowed.len() == 3));
    }

    #[test]
    fn test_currency_defaults_to_reference() {
        assert_eq!(Currency::default(), Currency::REFERENCE);
        assert!(Currency::Eur.is_reference());
        assert!(!Currency::Xof.is_reference());
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Xof).unwrap(), "\"XOF\"");
        let parsed: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, Currency::Usd);
    }

    #[test]
    fn test_default_table_formats() {
        let table = ConversionTable::default();
        let total = Money::from_cents(3500);

        assert_eq!(table.format(total, Currency::Eur).unwrap(), "€35.00");
        assert_eq!(table.format(total, Currency::Usd).unwrap(), "$37.80");
        // 35 × 655.957 = 22958.495 → below the midpoint, rounds down
        assert_eq!(table.format(total, Currency::Xof).unwrap(), "22958 XOF");
    }

    #[test]
    fn test_midpoint_rounds_up() {
        let table = ConversionTable::default()
            .with_rate(Currency::Xof, Decimal::new(25, 1))
            .unwrap()
            .with_rate(Currency::Usd, Decimal::new(1005, 3))
            .unwrap();
        let one_euro = Money::from_cents(100);

        assert_eq!(table.format(one_euro, Currency::Xof).unwrap(), "3 XOF");
        assert_eq!(table.format(one_euro, Currency::Usd).unwrap(), "$1.01");
    }

    #[test]
    fn test_convert_pads_to_display_places() {
        let table = ConversionTable::default();
        let value = table.convert(Money::from_cents(1000), Currency::Usd).unwrap();
        assert_eq!(value.to_string(), "10.80");

        let value = table.convert(Money::zero(), Currency::Xof).unwrap();
        assert_eq!(value.to_string(), "0");
    }

    #[test]
    fn test_negative_amount_rendering() {
        let table = ConversionTable::default();
        assert_eq!(table.format(Money::from_cents(-550), Currency::Eur).unwrap(), "-€5.50");
        assert_eq!(table.format(Money::from_cents(-100), Currency::Xof).unwrap(), "-656 XOF");
    }

    #[test]
    fn test_rate_validation() {
        let table = ConversionTable::default();
        assert!(table.clone().with_rate(Currency::Usd, Decimal::ZERO).is_err());
        assert!(table.clone().with_rate(Currency::Xof, Decimal::new(-1, 0)).is_err());
        assert!(table.clone().with_rate(Currency::Eur, Decimal::new(2, 0)).is_err());
        assert!(table.with_rate(Currency::Eur, Decimal::ONE).is_ok());
    }

    #[test]
    fn test_with_format_replaces_rendering() {
        let table = ConversionTable::default()
            .with_format(
                Currency::Usd,
                CurrencyFormat {
                    rate: Decimal::new(2, 0),
                    decimals: 0,
                    affix: Affix::Suffix("USD".to_string()),
                },
            )
            .unwrap();
        assert_eq!(table.format(Money::from_cents(1050), Currency::Usd).unwrap(), "21 USD");
        assert_eq!(table.rate(Currency::Usd), Decimal::new(2, 0));
    }

    #[test]
    fn test_conversion_overflow() {
        let table = ConversionTable::default()
            .with_rate(Currency::Xof, Decimal::MAX)
            .unwrap();
        let err = table.convert(Money::from_cents(i64::MAX), Currency::Xof).unwrap_err();
        assert!(matches!(err, CoreError::ConversionOverflow { currency: Currency::Xof }));
    }
}
