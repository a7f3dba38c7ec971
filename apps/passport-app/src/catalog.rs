//! # Catalog Seam
//!
//! How product records reach the cart.
//!
//! The real catalog is a remote backend owned by another team; this module
//! only defines the lookup the cart commands need plus an in-memory provider
//! fed from a JSON export of the shop's `products` rows.
//!
//! ## Record Format
//! ```json
//! [
//!   { "id": 1, "name": "Histoire des royaumes d'Afrique", "price_eur": 29.9,
//!     "image_url": "https://..." },
//!   { "id": "poster-5", "name": "Affiche - Festival des Arts", "price_eur": "25" }
//! ]
//! ```
//! Ids may be numbers or strings; both normalise to the same [`ProductId`].
//! Extra columns (origin, category_id, description) are ignored.

use passport_core::{CoreError, Money, Product, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

// =============================================================================
// Errors
// =============================================================================

/// Catalog loading and lookup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog record {id}: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: CoreError,
    },
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Read access to the product catalog.
pub trait CatalogProvider: Send + Sync {
    /// Looks up one product. `Ok(None)` if the id is unknown.
    fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;
}

// =============================================================================
// Records
// =============================================================================

/// Product id as it appears in catalog rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

/// One catalog row.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    id: RawId,
    name: String,
    price_eur: Decimal,
    #[serde(default)]
    image_url: Option<String>,
}

impl CatalogRecord {
    fn into_product(self) -> Result<Product, CatalogError> {
        let raw_id = match &self.id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        };
        let invalid = |source: CoreError| CatalogError::InvalidRecord {
            id: raw_id.clone(),
            source,
        };

        let id = ProductId::parse(&raw_id).map_err(|e| invalid(e.into()))?;
        let price = Money::from_decimal(self.price_eur).map_err(invalid)?;
        let product = Product::new(id, self.name, price).map_err(invalid)?;

        Ok(match self.image_url {
            Some(url) => product.with_image_url(url),
            None => product,
        })
    }
}

// =============================================================================
// In-Memory Provider
// =============================================================================

/// Catalog held in memory, in file order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryCatalog { products }
    }

    /// Builds a catalog from parsed rows, rejecting the first invalid one.
    pub fn from_records(records: Vec<CatalogRecord>) -> Result<Self, CatalogError> {
        let products = records
            .into_iter()
            .map(CatalogRecord::into_product)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(InMemoryCatalog { products })
    }

    /// Parses a JSON array of catalog rows.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Reads a JSON catalog export from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        info!(?path, products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }
}
