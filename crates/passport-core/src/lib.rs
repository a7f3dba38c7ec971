//! # passport-core: Pure Cart Logic for Museum Passport
//!
//! The boutique cart of the museum-companion app, as pure functions and an
//! observable state container with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Museum Passport Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI (TypeScript)                       │   │
//! │  │   Boutique ──► Product page ──► Cart button ──► Cart panel      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / events                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    passport-app                                 │   │
//! │  │   add_to_cart, update_cart_item, set_currency, config, logs     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ passport-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ currency │ │  cart  │ │  store  │  │   │
//! │  │   │ Product │ │  Money  │ │ Currency │ │  Cart  │ │CartStore│  │   │
//! │  │   │ LineItem│ │ (cents) │ │  Table   │ │ Limits │ │listeners│  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CATALOG FETCHES • NO DEVICE STORAGE               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `ProductId`, `Product`, `CartLineItem`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`currency`] - Display currencies and the conversion table
//! - [`cart`] - The cart value and its limits
//! - [`event`] - Change notifications
//! - [`store`] - `CartStore`, the observable container
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules
//!
//! ## Design Principles
//!
//! 1. **No I/O**: the catalog and on-device storage live elsewhere
//! 2. **Integer Money**: prices are cents of the reference currency (EUR)
//! 3. **Convert late**: display currency is applied only when rendering
//! 4. **Explicit Errors**: rejected calls return typed errors and change nothing

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod currency;
pub mod error;
pub mod event;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLimits};
pub use currency::{Affix, ConversionTable, Currency, CurrencyFormat};
pub use error::{CoreError, CoreResult, ValidationError};
pub use event::CartEvent;
pub use money::Money;
pub use store::{CartStore, Listener, SubscriptionId};
pub use types::{CartLineItem, Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of distinct lines in a cart.
///
/// ## Business Reason
/// Keeps the cart panel scrollable and a checkout hand-off reasonable.
pub const MAX_CART_ITEMS: usize = 100;

/// Default maximum quantity of a single line.
///
/// ## Business Reason
/// Stops a stuck stepper from ordering a thousand tote bags.
pub const MAX_ITEM_QUANTITY: i64 = 999;
