//! # Cart Store
//!
//! Single source of truth for the shopper's in-progress selection.
//!
//! ## Store Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CartStore                                      │
//! │                                                                         │
//! │   ┌──────────────┐   ┌──────────────┐   ┌────────────────────────┐     │
//! │   │    Cart      │   │  CartLimits  │   │   ConversionTable      │     │
//! │   │  items       │   │  999 / line  │   │   EUR 1 │ USD │ XOF    │     │
//! │   │  is_open     │   │  100 lines   │   │                        │     │
//! │   │  currency    │   └──────────────┘   └────────────────────────┘     │
//! │   └──────┬───────┘                                                      │
//! │          │ effective mutation                                           │
//! │          ▼                                                              │
//! │   listeners[0](event, cart) → listeners[1](event, cart) → ...          │
//! │   (synchronous, subscription order, before the call returns)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each store is an explicitly constructed value owned by the application's
//! composition root; tests build as many independent stores as they need.
//!
//! ## Example
//! ```rust
//! use passport_core::{CartStore, Currency, Money, Product};
//!
//! let mut store = CartStore::new();
//! let print = Product::new(1u64, "Affiche", Money::from_cents(1000)).unwrap();
//!
//! store.add(&print, 2).unwrap();
//! store.add_one(&print).unwrap();
//! store.set_currency(Currency::Usd);
//!
//! assert_eq!(store.total_quantity(), 3);
//! assert_eq!(store.formatted_total().unwrap(), "$32.40");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::cart::{Cart, CartLimits};
use crate::currency::{ConversionTable, Currency};
use crate::error::CoreResult;
use crate::event::CartEvent;
use crate::money::Money;
use crate::types::{CartLineItem, Product, ProductId};

/// Callback invoked after each effective cart mutation.
pub type Listener = Box<dyn Fn(&CartEvent, &Cart) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observable cart state container.
pub struct CartStore {
    cart: Cart,
    limits: CartLimits,
    table: ConversionTable,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("limits", &self.limits)
            .field("table", &self.table)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates a store with an empty cart, default limits and the default table.
    pub fn new() -> Self {
        CartStore {
            cart: Cart::new(),
            limits: CartLimits::default(),
            table: ConversionTable::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the cart limits.
    pub fn with_limits(mut self, limits: CartLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the conversion table.
    pub fn with_conversion_table(mut self, table: ConversionTable) -> Self {
        self.table = table;
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds `quantity` units of a product.
    ///
    /// An existing line for the same id has its quantity incremented and keeps
    /// its stored name, price and image. A new line is appended at the end.
    ///
    /// ## Errors
    /// - `Validation(MustBePositive)` when `quantity <= 0`
    /// - `QuantityTooLarge` / `CartTooLarge` when a limit would be crossed
    ///
    /// The cart is unchanged on error.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        let event = self.cart.add_item(product, quantity, &self.limits)?;
        self.notify(&event);
        Ok(())
    }

    /// Adds a single unit of a product.
    pub fn add_one(&mut self, product: &Product) -> CoreResult<()> {
        self.add(product, 1)
    }

    /// Removes the line with `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        match self.cart.remove_item(id) {
            Some(event) => {
                self.notify(&event);
                true
            }
            None => false,
        }
    }

    /// Sets a line's absolute quantity.
    ///
    /// `quantity <= 0` removes the line; an unknown id is a no-op.
    ///
    /// ## Errors
    /// - `QuantityTooLarge` when `quantity` exceeds the line maximum
    pub fn update_qty(&mut self, id: &ProductId, quantity: i64) -> CoreResult<()> {
        if let Some(event) = self.cart.update_quantity(id, quantity, &self.limits)? {
            self.notify(&event);
        }
        Ok(())
    }

    /// Empties the line items. Visibility and currency are kept.
    pub fn clear(&mut self) {
        if let Some(event) = self.cart.clear() {
            self.notify(&event);
        }
    }

    /// Sets the cart visibility, or flips it when `explicit` is `None`.
    pub fn toggle(&mut self, explicit: Option<bool>) {
        if let Some(event) = self.cart.toggle(explicit) {
            self.notify(&event);
        }
    }

    /// Switches the display currency.
    pub fn set_currency(&mut self, currency: Currency) {
        if let Some(event) = self.cart.set_currency(currency) {
            self.notify(&event);
        }
    }

    /// Switches the display currency from a raw code.
    ///
    /// ## Errors
    /// - `Validation(NotAllowed)` for an unknown code; the currency is unchanged
    pub fn set_currency_code(&mut self, code: &str) -> CoreResult<()> {
        let currency = Currency::from_str(code)?;
        self.set_currency(currency);
        Ok(())
    }

    // =========================================================================
    // Read Side
    // =========================================================================

    /// Current cart value.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derives a value from the current cart.
    pub fn select<R>(&self, selector: impl FnOnce(&Cart) -> R) -> R {
        selector(&self.cart)
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn is_open(&self) -> bool {
        self.cart.is_open()
    }

    pub fn display_currency(&self) -> Currency {
        self.cart.display_currency()
    }

    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    /// Cart total in the reference currency.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.cart.subtotal()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn limits(&self) -> &CartLimits {
        &self.limits
    }

    pub fn conversion_table(&self) -> &ConversionTable {
        &self.table
    }

    /// Renders a reference amount in the active display currency.
    pub fn format_amount(&self, amount: Money) -> CoreResult<String> {
        self.table.format(amount, self.display_currency())
    }

    /// Renders the cart total in the active display currency.
    pub fn formatted_total(&self) -> CoreResult<String> {
        self.format_amount(self.subtotal()?)
    }

    /// Renders one line's total in the active display currency.
    pub fn format_line_total(&self, item: &CartLineItem) -> CoreResult<String> {
        self.format_amount(item.line_total()?)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener, called after every effective mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartEvent, &Cart) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self, event: &CartEvent) {
        for (_, listener) in &self.listeners {
            listener(event, &self.cart);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    fn test_product(id: impl Into<ProductId>, price_cents: i64) -> Product {
        let id = id.into();
        Product::new(id.clone(), format!("Product {}", id), Money::from_cents(price_cents)).unwrap()
    }

    fn recording_store() -> (CartStore, Arc<Mutex<Vec<CartEvent>>>) {
        let mut store = CartStore::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(move |event, _| sink.lock().unwrap().push(event.clone()));
        (store, events)
    }

    fn ids(store: &CartStore) -> Vec<&str> {
        store.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_identity_merge() {
        let mut store = CartStore::new();
        let product = test_product(1u64, 1000);

        store.add(&product, 2).unwrap();
        store.add(&product, 5).unwrap();

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.items()[0].quantity, 7);
    }

    #[test]
    fn test_numeric_and_string_ids_merge() {
        let mut store = CartStore::new();
        store.add_one(&test_product(1u64, 1000)).unwrap();
        store.add_one(&test_product("1", 1000)).unwrap();

        assert_eq!(store.item_count(), 1);
        assert_eq!(store.total_quantity(), 2);
    }

    #[test]
    fn test_quantity_floor_removes() {
        for qty in [0, -5] {
            let mut store = CartStore::new();
            let product = test_product("x", 100);
            store.add(&product, 3).unwrap();

            store.update_qty(&product.id, qty).unwrap();
            assert!(store.cart().get(&product.id).is_none());
        }
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = CartStore::new();
        store.add(&test_product("a", 100), 1).unwrap();
        store.add(&test_product("b", 200), 2).unwrap();
        let before = store.items().to_vec();

        assert!(!store.remove(&ProductId::from("nonexistent")));
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_remove_present() {
        let mut store = CartStore::new();
        store.add(&test_product("a", 100), 1).unwrap();
        store.add(&test_product("b", 200), 2).unwrap();

        assert!(store.remove(&ProductId::from("a")));
        assert_eq!(ids(&store), vec!["b"]);
    }

    #[test]
    fn test_clear_keeps_visibility_and_currency() {
        let mut store = CartStore::new();
        store.toggle(Some(true));
        store.set_currency(Currency::Xof);
        store.add(&test_product(1u64, 100), 1).unwrap();
        store.add(&test_product(2u64, 100), 4).unwrap();

        store.clear();

        assert_eq!(store.items().len(), 0);
        assert!(store.is_open());
        assert_eq!(store.display_currency(), Currency::Xof);
    }

    #[test]
    fn test_toggle_semantics() {
        let mut store = CartStore::new();
        assert!(!store.is_open());

        store.toggle(None);
        assert!(store.is_open());
        store.toggle(None);
        assert!(!store.is_open());

        store.toggle(Some(true));
        assert!(store.is_open());
        store.toggle(Some(true));
        assert!(store.is_open());

        store.toggle(Some(false));
        assert!(!store.is_open());
        store.toggle(Some(false));
        assert!(!store.is_open());
    }

    #[test]
    fn test_total_scenario() {
        let mut store = CartStore::new();
        store.add(&test_product(1u64, 1000), 2).unwrap();
        store.add(&test_product(2u64, 500), 3).unwrap();

        assert_eq!(store.subtotal().unwrap(), Money::from_cents(3500));
        assert_eq!(store.formatted_total().unwrap(), "€35.00");

        store.set_currency(Currency::Xof);
        // 35 × 655.957 = 22958.495, half-up to the nearest franc
        assert_eq!(store.formatted_total().unwrap(), "22958 XOF");

        store.set_currency(Currency::Usd);
        assert_eq!(store.formatted_total().unwrap(), "$37.80");
    }

    #[test]
    fn test_substituted_table() {
        let table = ConversionTable::default()
            .with_rate(Currency::Xof, Decimal::new(655_9572, 4))
            .unwrap();
        let mut store = CartStore::new().with_conversion_table(table);
        store.add(&test_product(1u64, 1000), 2).unwrap();
        store.add(&test_product(2u64, 500), 3).unwrap();
        store.set_currency(Currency::Xof);

        // 35 × 655.9572 = 22958.502 → 22959
        assert_eq!(store.formatted_total().unwrap(), "22959 XOF");
    }

    #[test]
    fn test_out_of_range_total_rejected_and_store_stays_usable() {
        let (mut store, events) = recording_store();
        let sculpture = test_product(9u64, i64::MAX / 2);

        assert!(matches!(store.add(&sculpture, 3), Err(CoreError::TotalOutOfRange)));
        assert!(store.is_empty());
        assert!(events.lock().unwrap().is_empty());

        store.add(&sculpture, 2).unwrap();
        assert!(store.add_one(&sculpture).is_err());
        assert_eq!(store.total_quantity(), 2);

        assert!(store.formatted_total().is_ok());
        store.set_currency(Currency::Xof);
        assert!(store.formatted_total().is_ok());
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_order_preserved_on_increment() {
        let mut store = CartStore::new();
        let a = test_product("A", 100);
        let b = test_product("B", 100);

        store.add_one(&a).unwrap();
        store.add_one(&b).unwrap();
        store.add_one(&a).unwrap();

        assert_eq!(ids(&store), vec!["A", "B"]);

        store.update_qty(&a.id, 9).unwrap();
        assert_eq!(ids(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_non_positive_add_rejected() {
        let (mut store, events) = recording_store();
        let product = test_product(1u64, 100);

        assert!(matches!(store.add(&product, 0), Err(CoreError::Validation(_))));
        assert!(matches!(store.add(&product, -2), Err(CoreError::Validation(_))));

        assert!(store.is_empty());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_currency_code_rejected() {
        let (mut store, events) = recording_store();
        store.set_currency(Currency::Usd);

        assert!(store.set_currency_code("GBP").is_err());
        assert_eq!(store.display_currency(), Currency::Usd);

        store.set_currency_code("xof").unwrap();
        assert_eq!(store.display_currency(), Currency::Xof);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_limits_enforced() {
        let limits = CartLimits {
            max_item_quantity: 3,
            max_line_items: 2,
        };
        let mut store = CartStore::new().with_limits(limits);
        store.add(&test_product("a", 100), 3).unwrap();
        store.add(&test_product("b", 100), 1).unwrap();

        assert!(store.add(&test_product("a", 100), 1).is_err());
        assert!(store.add(&test_product("c", 100), 1).is_err());
        assert!(store.update_qty(&ProductId::from("b"), 4).is_err());
        assert_eq!(store.total_quantity(), 4);
    }

    #[test]
    fn test_listeners_see_updated_state() {
        let mut store = CartStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |_, cart| sink.lock().unwrap().push(cart.total_quantity()));

        let product = test_product(1u64, 100);
        store.add(&product, 2).unwrap();
        store.update_qty(&product.id, 5).unwrap();
        store.remove(&product.id);

        assert_eq!(*seen.lock().unwrap(), vec![2, 5, 0]);
    }

    #[test]
    fn test_listeners_skip_noops() {
        let (mut store, events) = recording_store();
        let product = test_product(1u64, 100);

        store.remove(&product.id);
        store.update_qty(&product.id, 3).unwrap();
        store.clear();
        store.toggle(Some(false));
        store.set_currency(Currency::Eur);
        assert!(events.lock().unwrap().is_empty());

        store.add_one(&product).unwrap();
        store.update_qty(&product.id, 1).unwrap();
        store.toggle(None);
        store.clear();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                CartEvent::ItemAdded {
                    id: product.id.clone(),
                    quantity: 1,
                    line_quantity: 1
                },
                CartEvent::VisibilityChanged { is_open: true },
                CartEvent::Cleared,
            ]
        );
    }

    #[test]
    fn test_listener_order_and_unsubscribe() {
        let mut store = CartStore::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&calls);
        let first_id = store.subscribe(move |_, _| first.lock().unwrap().push("first"));
        let second = Arc::clone(&calls);
        store.subscribe(move |_, _| second.lock().unwrap().push("second"));

        store.toggle(None);
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);

        assert!(store.unsubscribe(first_id));
        assert!(!store.unsubscribe(first_id));
        assert_eq!(store.listener_count(), 1);

        store.toggle(None);
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "second"]);
    }

    #[test]
    fn test_independent_stores() {
        let mut one = CartStore::new();
        let two = CartStore::new();
        one.add_one(&test_product(1u64, 100)).unwrap();

        assert_eq!(one.item_count(), 1);
        assert!(two.is_empty());
    }

    #[test]
    fn test_select_and_line_format() {
        let mut store = CartStore::new();
        store.add(&test_product(1u64, 1250), 2).unwrap();
        store.set_currency(Currency::Usd);

        let names: Vec<String> = store.select(|c| c.items().iter().map(|i| i.name.clone()).collect());
        assert_eq!(names, vec!["Product 1".to_string()]);

        let line = &store.items()[0];
        assert_eq!(store.format_line_total(line).unwrap(), "$27.00");
    }
}
