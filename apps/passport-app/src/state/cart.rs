//! # Cart State
//!
//! Shares one [`CartStore`] between command handlers.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>`: several UI surfaces (product
//! page, cart button, cart panel) issue commands, and only one may mutate
//! the cart at a time. Listeners run while the lock is held, so they must
//! not call back into `CartState`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action            Command               Store Change                │
//! │  ─────────            ───────               ────────────                │
//! │  "Add to cart" ─────► add_to_cart() ──────► store.add(product, qty)     │
//! │  Stepper +/- ───────► increment/decrement ► store.update_qty(id, n±1)   │
//! │  Trash icon ────────► remove_from_cart() ─► store.remove(id)            │
//! │  Cart button ───────► toggle_cart() ──────► store.toggle(None)          │
//! │  Currency picker ───► set_currency() ─────► store.set_currency(c)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use passport_core::{Cart, CartEvent, CartStore};
use tracing::debug;

use crate::config::{AppConfig, ConfigResult};

/// Thread-safe handle to the cart store.
#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Wraps an already configured store and attaches the logging listener.
    pub fn new(mut store: CartStore) -> Self {
        store.subscribe(log_event);
        CartState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Builds the store from configuration.
    ///
    /// Applies limits, rate overrides and the default display currency.
    pub fn from_config(config: &AppConfig) -> ConfigResult<Self> {
        let mut store = CartStore::new()
            .with_limits(config.cart_limits())
            .with_conversion_table(config.conversion_table()?);
        // Not logged: the listener is attached afterwards.
        store.set_currency(config.cart.default_currency);
        Ok(Self::new(store))
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_store(|s| s.item_count());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_store_mut(|s| s.add(&product, 1))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(CartStore::new())
    }
}

fn log_event(event: &CartEvent, cart: &Cart) {
    debug!(
        ?event,
        lines = cart.item_count(),
        quantity = cart.total_quantity(),
        "Cart changed"
    );
}
