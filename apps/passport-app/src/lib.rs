//! # Museum Passport App Library
//!
//! Composition root for the boutique cart: configuration, logging, the
//! shared cart state and the commands the mobile UI calls.
//!
//! ## Module Organization
//! ```text
//! passport_app/
//! ├── lib.rs          ◄─── You are here (tracing & bootstrap)
//! ├── config.rs       ◄─── passport.toml + PASSPORT_* overrides
//! ├── catalog.rs      ◄─── CatalogProvider seam, JSON-backed catalog
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── CartState: Arc<Mutex<CartStore>>
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── currency.rs ◄─── Currency picker commands
//! ├── shell.rs        ◄─── Line-oriented front end (binary)
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or "info,passport=debug"           │
//! │  2. AppConfig::load()       defaults → passport.toml → PASSPORT_* env   │
//! │  3. CartState::from_config  limits, rate overrides, default currency    │
//! │  4. InMemoryCatalog::load   optional [catalog] path                     │
//! │  5. serve commands                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog::InMemoryCatalog;
use config::{AppConfig, ConfigResult};
use state::CartState;

/// Everything a front end needs to serve commands.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub cart: CartState,
    pub catalog: InMemoryCatalog,
}

/// Builds the application from loaded configuration.
///
/// A catalog that fails to load is logged and replaced by an empty one, so
/// the cart still opens; adds then report `NOT_FOUND`.
pub fn bootstrap(config: AppConfig) -> ConfigResult<App> {
    let cart = CartState::from_config(&config)?;

    let catalog = match &config.catalog.path {
        Some(path) => InMemoryCatalog::load(path).unwrap_or_else(|e| {
            warn!(?path, "Failed to load catalog: {}. Starting with an empty catalog.", e);
            InMemoryCatalog::default()
        }),
        None => {
            info!("No catalog configured");
            InMemoryCatalog::default()
        }
    };

    info!(
        currency = %config.cart.default_currency,
        products = catalog.len(),
        "Museum Passport cart ready"
    );

    Ok(App {
        config,
        cart,
        catalog,
    })
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=passport=trace` - Trace the passport crates only
/// - Default: INFO, DEBUG for passport crates
///
/// Logs go to stderr so the shell's JSON output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,passport=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
