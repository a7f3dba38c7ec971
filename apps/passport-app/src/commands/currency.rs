//! # Currency Commands
//!
//! The cart panel's currency picker.

use serde::Serialize;
use tracing::debug;

use passport_core::{Currency, Money};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::CartState;

/// Amount used to preview each currency in the picker (€10.00).
const SAMPLE_AMOUNT: Money = Money::from_cents(1000);

/// One entry of the currency picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    pub code: Currency,
    /// `SAMPLE_AMOUNT` rendered in this currency.
    pub sample: String,
    pub selected: bool,
}

/// Lists every display currency, in picker order.
pub fn list_currencies(cart: &CartState) -> Result<Vec<CurrencyOption>, ApiError> {
    debug!("list_currencies command");
    cart.with_store(|s| {
        Currency::ALL
            .iter()
            .map(|&currency| {
                Ok::<_, ApiError>(CurrencyOption {
                    code: currency,
                    sample: s.conversion_table().format(SAMPLE_AMOUNT, currency)?,
                    selected: s.display_currency() == currency,
                })
            })
            .collect()
    })
}

/// Switches the display currency by code (`"EUR"`, `"usd"`, ...).
///
/// Unknown codes return `VALIDATION_ERROR` and leave the currency unchanged.
pub fn set_currency(cart: &CartState, code: &str) -> Result<CartResponse, ApiError> {
    debug!(code = %code, "set_currency command");
    cart.with_store_mut(|s| {
        s.set_currency_code(code)?;
        CartResponse::from_store(s)
    })
}
