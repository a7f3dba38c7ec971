//! # Cart Commands
//!
//! Commands behind the product page's "Add to cart" button, the cart
//! button badge and the cart panel.
//!
//! ## Cart Panel
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PANIER                                          badge: 5               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Histoire des royaumes d'Afrique    [-] 2 [+]          €59.80    🗑     │
//! │  Album - Rythmes du Sahel           [-] 3 [+]          €44.97    🗑     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Total                                                 €104.77          │
//! │                                                                         │
//! │  get_cart() → { items: [...], totals: {...}, isOpen, displayCurrency }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use passport_core::{CartLineItem, CartStore, CoreError, Currency, Money, ProductId};

use crate::catalog::CatalogProvider;
use crate::error::ApiError;
use crate::state::CartState;

// =============================================================================
// Responses
// =============================================================================

/// One cart line as the panel renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    #[serde(flatten)]
    pub item: CartLineItem,

    /// Unit price × quantity in the display currency, e.g. `"$32.29"`.
    pub formatted_line_total: String,
}

/// Cart totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines.
    pub item_count: usize,

    /// Sum of quantities (cart button badge).
    pub total_quantity: i64,

    /// Total in reference-currency cents.
    pub subtotal_cents: i64,

    /// Total in the display currency.
    pub formatted_total: String,
}

/// Cart response returned by every cart command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineView>,
    pub totals: CartTotals,
    pub is_open: bool,
    pub display_currency: Currency,
}

impl CartResponse {
    /// Snapshots the store, rendering amounts in its display currency.
    pub fn from_store(store: &CartStore) -> Result<Self, ApiError> {
        let items = store
            .items()
            .iter()
            .map(|item| {
                Ok::<_, ApiError>(LineView {
                    item: item.clone(),
                    formatted_line_total: store.format_line_total(item)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal: Money = store.subtotal()?;
        let totals = CartTotals {
            item_count: store.item_count(),
            total_quantity: store.total_quantity(),
            subtotal_cents: subtotal.cents(),
            formatted_total: store.format_amount(subtotal)?,
        };

        Ok(CartResponse {
            items,
            totals,
            is_open: store.is_open(),
            display_currency: store.display_currency(),
        })
    }
}

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    Ok(ProductId::parse(raw).map_err(CoreError::from)?)
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    cart.with_store(CartResponse::from_store)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases, stored name and price kept
/// - Product not in cart: appended as a new line
/// - `quantity` defaults to 1
///
/// ## Errors
/// - `NOT_FOUND` when the catalog has no such product
/// - `VALIDATION_ERROR` for a non-positive quantity or one over the line limit
/// - `CART_ERROR` when the cart already holds the maximum number of lines,
///   or the cart total would be out of range
pub fn add_to_cart(
    catalog: &dyn CatalogProvider,
    cart: &CartState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    let id = parse_id(product_id)?;
    let product = catalog
        .get_product(&id)?
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

    cart.with_store_mut(|s| {
        s.add(&product, quantity)?;
        CartResponse::from_store(s)
    })
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Unknown id: no change
/// - Quantity over the line limit: `VALIDATION_ERROR`
pub fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let id = parse_id(product_id)?;
    cart.with_store_mut(|s| {
        s.update_qty(&id, quantity)?;
        CartResponse::from_store(s)
    })
}

/// Stepper "+": one more unit of a line already in the cart.
pub fn increment_cart_item(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increment_cart_item command");
    step(cart, product_id, 1)
}

/// Stepper "-": one unit fewer; a line at quantity 1 is removed.
pub fn decrement_cart_item(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "decrement_cart_item command");
    step(cart, product_id, -1)
}

fn step(cart: &CartState, product_id: &str, delta: i64) -> Result<CartResponse, ApiError> {
    let id = parse_id(product_id)?;
    cart.with_store_mut(|s| {
        let current = s
            .cart()
            .get(&id)
            .map(|line| line.quantity)
            .ok_or_else(|| ApiError::not_found("Cart item", id.as_str()))?;
        s.update_qty(&id, current.saturating_add(delta))?;
        CartResponse::from_store(s)
    })
}

/// Removes a line from the cart. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let id = parse_id(product_id)?;
    cart.with_store_mut(|s| {
        if !s.remove(&id) {
            debug!(product_id = %id, "Item not in cart");
        }
        CartResponse::from_store(s)
    })
}

/// Clears all lines. The panel stays open or closed as it was.
pub fn clear_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    cart.with_store_mut(|s| {
        s.clear();
        CartResponse::from_store(s)
    })
}

/// Opens, closes or flips the cart panel.
pub fn toggle_cart(cart: &CartState, open: Option<bool>) -> Result<CartResponse, ApiError> {
    debug!(open = ?open, "toggle_cart command");
    cart.with_store_mut(|s| {
        s.toggle(open);
        CartResponse::from_store(s)
    })
}
