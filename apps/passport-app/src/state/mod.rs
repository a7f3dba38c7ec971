//! # State Module
//!
//! Application state shared by the cart commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │        CartState         │        │     CatalogProvider      │      │
//! │  │                          │        │                          │      │
//! │  │  Arc<Mutex<CartStore>>   │        │  InMemoryCatalog (JSON)  │      │
//! │  │  + logging listener      │        │  or the remote backend   │      │
//! │  └──────────────────────────┘        └──────────────────────────┘      │
//! │                                                                         │
//! │  Both are built once at startup and passed to every command.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

pub use cart::CartState;
