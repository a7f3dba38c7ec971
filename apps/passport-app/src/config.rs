//! # App Configuration
//!
//! Cart limits, currency rates and the catalog location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PASSPORT_CURRENCY=XOF                                              │
//! │     PASSPORT_RATE_USD=1.09                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/passport/passport.toml (Linux)                           │
//! │     ~/Library/Application Support/org.museum.passport/passport.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     EUR display, 999 per line, 100 lines, published rates              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! default_currency = "EUR"
//! max_item_quantity = 999
//! max_line_items = 100
//!
//! [currency.rates]
//! USD = "1.08"
//! XOF = "655.957"
//!
//! [catalog]
//! path = "data/catalog.sample.json"
//! ```
//!
//! Rates are written as strings so they stay exact decimals.

use passport_core::{CartLimits, ConversionTable, CoreError, Currency, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// Config Error
// =============================================================================

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures while loading, validating or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid configuration: {0}")]
    Core(#[from] CoreError),
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSettings {
    /// Display currency the cart starts in.
    #[serde(default)]
    pub default_currency: Currency,

    /// Maximum quantity on one line.
    #[serde(default = "default_max_item_quantity")]
    pub max_item_quantity: i64,

    /// Maximum number of distinct lines.
    #[serde(default = "default_max_line_items")]
    pub max_line_items: usize,
}

fn default_max_item_quantity() -> i64 {
    MAX_ITEM_QUANTITY
}

fn default_max_line_items() -> usize {
    MAX_CART_ITEMS
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            default_currency: Currency::REFERENCE,
            max_item_quantity: default_max_item_quantity(),
            max_line_items: default_max_line_items(),
        }
    }
}

// =============================================================================
// Currency Settings
// =============================================================================

/// Rate overrides; unset entries keep the published rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateOverrides {
    #[serde(rename = "USD", default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<Decimal>,

    #[serde(rename = "XOF", default, skip_serializing_if = "Option::is_none")]
    pub xof: Option<Decimal>,
}

/// Currency conversion settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default)]
    pub rates: RateOverrides,
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the command shell finds its product list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file of catalog records. None means an empty catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (passport.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.cart.max_item_quantity <= 0 {
            return Err(ConfigError::Invalid(
                "max_item_quantity must be greater than 0".into(),
            ));
        }

        if self.cart.max_line_items == 0 {
            return Err(ConfigError::Invalid(
                "max_line_items must be greater than 0".into(),
            ));
        }

        // Rates must build a valid table
        self.conversion_table()?;

        Ok(())
    }

    /// Builds the conversion table: published rates plus overrides.
    pub fn conversion_table(&self) -> ConfigResult<ConversionTable> {
        let mut table = ConversionTable::default();
        if let Some(rate) = self.currency.rates.usd {
            table = table.with_rate(Currency::Usd, rate)?;
        }
        if let Some(rate) = self.currency.rates.xof {
            table = table.with_rate(Currency::Xof, rate)?;
        }
        Ok(table)
    }

    /// Cart limits for the store.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits {
            max_item_quantity: self.cart.max_item_quantity,
            max_line_items: self.cart.max_line_items,
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparsable values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(code) = lookup("PASSPORT_CURRENCY") {
            match Currency::from_str(&code) {
                Ok(currency) => {
                    debug!(%currency, "Overriding default currency from environment");
                    self.cart.default_currency = currency;
                }
                Err(_) => warn!(code = %code, "Unknown currency in environment"),
            }
        }

        if let Some(raw) = lookup("PASSPORT_RATE_USD") {
            match Decimal::from_str(raw.trim()) {
                Ok(rate) => self.currency.rates.usd = Some(rate),
                Err(_) => warn!(rate = %raw, "Invalid USD rate in environment"),
            }
        }

        if let Some(raw) = lookup("PASSPORT_RATE_XOF") {
            match Decimal::from_str(raw.trim()) {
                Ok(rate) => self.currency.rates.xof = Some(rate),
                Err(_) => warn!(rate = %raw, "Invalid XOF rate in environment"),
            }
        }

        if let Some(raw) = lookup("PASSPORT_MAX_ITEM_QUANTITY") {
            match raw.trim().parse::<i64>() {
                Ok(max) => self.cart.max_item_quantity = max,
                Err(_) => warn!(value = %raw, "Invalid max item quantity in environment"),
            }
        }

        if let Some(path) = lookup("PASSPORT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "museum", "passport")
            .map(|dirs| dirs.config_dir().join("passport.toml"))
    }
}
