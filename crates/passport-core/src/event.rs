//! # Cart Events
//!
//! What a cart listener is told after each effective mutation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::Currency;
use crate::types::ProductId;

/// A change that was applied to the cart.
///
/// Calls that leave the cart as it was (removing an absent id, closing a
/// closed cart, ...) produce no event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    /// `quantity` units added; the line now holds `line_quantity`.
    #[serde(rename_all = "camelCase")]
    ItemAdded {
        id: ProductId,
        quantity: i64,
        line_quantity: i64,
    },
    /// The line's quantity was set to `quantity`.
    QuantityUpdated { id: ProductId, quantity: i64 },
    /// The line is gone (explicit removal or quantity floor).
    ItemRemoved { id: ProductId },
    /// Every line was removed.
    Cleared,
    /// Cart panel shown or hidden.
    #[serde(rename_all = "camelCase")]
    VisibilityChanged { is_open: bool },
    /// Display currency switched.
    CurrencyChanged { currency: Currency },
}
