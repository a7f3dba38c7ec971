//! # Commands Module
//!
//! Command handlers invoked by the presentation layer.
//!
//! Every handler takes the state it needs explicitly and returns a
//! serialisable response or an [`ApiError`](crate::error::ApiError).
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart.rs                            currency.rs                         │
//! │  ───────                            ───────────                         │
//! │  get_cart                           list_currencies                     │
//! │  add_to_cart                        set_currency                        │
//! │  update_cart_item                                                       │
//! │  increment_cart_item / decrement_cart_item                              │
//! │  remove_from_cart                                                       │
//! │  clear_cart                                                             │
//! │  toggle_cart                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod currency;

pub use cart::*;
pub use currency::*;
