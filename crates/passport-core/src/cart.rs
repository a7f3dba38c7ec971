//! # Cart
//!
//! The cart state value: line items, panel visibility and display currency.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action             CartStore call         Cart change               │
//! │  ─────────             ──────────────         ───────────               │
//! │  "Ajouter" ──────────► add(p, 1) ───────────► push or qty += 1         │
//! │  Stepper + / − ──────► update_qty(id, n) ───► qty = n (n ≤ 0 removes)  │
//! │  Trash on line ──────► remove(id) ──────────► retain(id != …)          │
//! │  Trash in header ────► clear() ─────────────► items.clear()            │
//! │  Cart button / ✕ ────► toggle(None / false) ► is_open                  │
//! │  EUR | USD | XOF ────► set_currency(c) ─────► display_currency         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutators are crate-private: outside code changes a cart only through
//! [`CartStore`](crate::store::CartStore), which notifies listeners.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult};
use crate::event::CartEvent;
use crate::money::Money;
use crate::types::{CartLineItem, Product, ProductId};
use crate::validation::{validate_cart_size, validate_line_quantity, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Limits
// =============================================================================

/// Upper bounds enforced on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLimits {
    /// Maximum quantity on a single line.
    pub max_item_quantity: i64,
    /// Maximum number of distinct lines.
    pub max_line_items: usize,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_line_items: MAX_CART_ITEMS,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding the same product increases quantity)
/// - Every stored quantity is > 0
/// - Lines keep their insertion position when their quantity changes
/// - Every line total, the subtotal and the total quantity fit in `i64`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
    is_open: bool,
    display_currency: Currency,
}

impl Cart {
    /// Creates an empty, closed cart showing the reference currency.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart panel should be visible.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Currency prices are rendered in.
    pub fn display_currency(&self) -> Currency {
        self.display_currency
    }

    /// Looks up a line by id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities (the cart badge number).
    pub fn total_quantity(&self) -> i64 {
        // Never saturates: mutations keep the sum in range.
        self.items.iter().fold(0, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of line totals in the reference currency.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(item.line_total()?))
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Mutators (store only)
    // =========================================================================

    /// Adds `quantity` of a product, merging into an existing line.
    ///
    /// All checks run before the cart is touched.
    pub(crate) fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        limits: &CartLimits,
    ) -> CoreResult<CartEvent> {
        validate_quantity(quantity)?;

        if let Some(position) = self.position(&product.id) {
            let line = &self.items[position];
            let (unit_price, new_qty) = (line.unit_price, line.quantity.saturating_add(quantity));
            validate_line_quantity(new_qty, limits.max_item_quantity)?;
            self.check_totals(&product.id, unit_price, new_qty)?;

            self.items[position].quantity = new_qty;
            return Ok(CartEvent::ItemAdded {
                id: product.id.clone(),
                quantity,
                line_quantity: new_qty,
            });
        }

        validate_line_quantity(quantity, limits.max_item_quantity)?;
        validate_cart_size(self.items.len(), limits.max_line_items)?;
        self.check_totals(&product.id, product.unit_price, quantity)?;

        self.items.push(CartLineItem::from_product(product, quantity));
        Ok(CartEvent::ItemAdded {
            id: product.id.clone(),
            quantity,
            line_quantity: quantity,
        })
    }

    /// Removes a line. `None` if the id was not in the cart.
    pub(crate) fn remove_item(&mut self, id: &ProductId) -> Option<CartEvent> {
        let initial_len = self.items.len();
        self.items.retain(|i| &i.id != id);

        (self.items.len() != initial_len).then(|| CartEvent::ItemRemoved { id: id.clone() })
    }

    /// Sets a line's absolute quantity; `quantity <= 0` removes the line.
    ///
    /// Unknown ids are a no-op.
    pub(crate) fn update_quantity(
        &mut self,
        id: &ProductId,
        quantity: i64,
        limits: &CartLimits,
    ) -> CoreResult<Option<CartEvent>> {
        let Some(position) = self.position(id) else {
            return Ok(None);
        };

        if quantity <= 0 {
            return Ok(self.remove_item(id));
        }

        validate_line_quantity(quantity, limits.max_item_quantity)?;

        let line = &self.items[position];
        if line.quantity == quantity {
            return Ok(None);
        }
        self.check_totals(id, line.unit_price, quantity)?;
        self.items[position].quantity = quantity;
        Ok(Some(CartEvent::QuantityUpdated {
            id: id.clone(),
            quantity,
        }))
    }

    /// Empties the line items; visibility and currency are kept.
    pub(crate) fn clear(&mut self) -> Option<CartEvent> {
        if self.items.is_empty() {
            return None;
        }
        self.items.clear();
        Some(CartEvent::Cleared)
    }

    /// Sets visibility, or flips it when `explicit` is `None`.
    pub(crate) fn toggle(&mut self, explicit: Option<bool>) -> Option<CartEvent> {
        let next = explicit.unwrap_or(!self.is_open);
        if next == self.is_open {
            return None;
        }
        self.is_open = next;
        Some(CartEvent::VisibilityChanged { is_open: next })
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Checks that the cart totals fit once line `id` holds `quantity` at
    /// `unit_price`.
    fn check_totals(&self, id: &ProductId, unit_price: Money, quantity: i64) -> CoreResult<()> {
        let mut amount = unit_price.checked_mul_quantity(quantity)?;
        let mut units = quantity;
        for item in self.items.iter().filter(|i| &i.id != id) {
            amount = amount.checked_add(item.line_total()?)?;
            units = units
                .checked_add(item.quantity)
                .ok_or(CoreError::TotalOutOfRange)?;
        }
        Ok(())
    }

    /// Switches the display currency. Stored prices are untouched.
    pub(crate) fn set_currency(&mut self, currency: Currency) -> Option<CartEvent> {
        if currency == self.display_currency {
            return None;
        }
        self.display_currency = currency;
        Some(CartEvent::CurrencyChanged { currency })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
