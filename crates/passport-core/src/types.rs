//! # Domain Types
//!
//! Types that flow from the catalog into the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add()   ┌──────────────────┐                    │
//! │  │    Product      │ ────────► │  CartLineItem    │                    │
//! │  │  ─────────────  │           │  ──────────────  │                    │
//! │  │  id             │           │  id              │                    │
//! │  │  name           │           │  name (frozen)   │                    │
//! │  │  unit_price     │           │  unit_price      │                    │
//! │  │  image_url?     │           │  quantity ≥ 1    │                    │
//! │  └─────────────────┘           │  image_url?      │                    │
//! │                                └──────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical Ids
//! The catalog keys products by number or by string. [`ProductId`] holds the
//! canonical string form, so `ProductId::from(1)` and `ProductId::from("1")`
//! are the same key.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_id, validate_product_name, ValidationResult,
};

// =============================================================================
// Product Id
// =============================================================================

/// Canonical product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parses and validates an id coming from outside (UI input, catalog JSON).
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// ```rust
    /// use passport_core::types::ProductId;
    ///
    /// assert_eq!(ProductId::parse(" 7 ").unwrap(), ProductId::from(7u64));
    /// assert!(ProductId::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        validate_product_id(raw)?;
        Ok(ProductId(raw.trim().to_string()))
    }

    /// Returns the canonical string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id.to_string())
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id.to_string())
    }
}

/// Trims like [`ProductId::parse`] but skips validation.
impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.trim().to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        if id.trim().len() == id.len() {
            ProductId(id)
        } else {
            ProductId::from(id.as_str())
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A partner-shop product as supplied by the catalog.
///
/// Deserializing goes through [`Product::new`], so a payload with a blank
/// name or a negative price is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price in the reference currency.
    pub unit_price: Money,

    /// Product image, opaque.
    pub image_url: Option<String>,
}

impl Product {
    /// Creates a validated product.
    ///
    /// ## Rules
    /// - name: non-empty, at most 200 characters
    /// - price: zero or more
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> CoreResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(unit_price)?;

        Ok(Product {
            id: id.into(),
            name,
            unit_price,
            image_url: None,
        })
    }

    /// Attaches an image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Wire form of [`Product`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedProduct {
    id: ProductId,
    name: String,
    unit_price: Money,
    #[serde(default)]
    image_url: Option<String>,
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = UncheckedProduct::deserialize(deserializer)?;
        let product =
            Product::new(raw.id, raw.name, raw.unit_price).map_err(serde::de::Error::custom)?;
        Ok(Product {
            image_url: raw.image_url,
            ..product
        })
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One distinct product in the cart.
///
/// Name, price and image are captured when the line is first created; later
/// `add` calls for the same id only bump the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    /// Reference-currency unit price (frozen).
    pub unit_price: Money,
    /// Always at least 1 while the line is in a cart.
    pub quantity: i64,
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Creates a line from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
            image_url: product.image_url.clone(),
        }
    }

    /// Unit price × quantity, in the reference currency.
    ///
    /// Always `Ok` for a line held by a cart; the cart rejects changes whose
    /// totals would not fit.
    #[inline]
    pub fn line_total(&self) -> CoreResult<Money> {
        self.unit_price.checked_mul_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_numeric_and_string_ids_normalize() {
        assert_eq!(ProductId::from(1u64), ProductId::from("1"));
        assert_eq!(ProductId::from(-4i64).as_str(), "-4");
        assert_ne!(ProductId::from("01"), ProductId::from(1u32));
    }

    #[test]
    fn test_from_trims_like_parse() {
        assert_eq!(ProductId::from(" 1"), ProductId::parse(" 1").unwrap());
        assert_eq!(ProductId::from(String::from("7 ")), ProductId::from(7u64));
        assert_eq!(ProductId::from(String::from("mask")).as_str(), "mask");
    }

    #[test]
    fn test_product_deserialize_validates() {
        let product: Product =
            serde_json::from_str(r#"{"id":"3","name":"Carnet","unitPrice":500}"#).unwrap();
        assert_eq!(product.unit_price.cents(), 500);
        assert!(product.image_url.is_none());

        let product: Product = serde_json::from_str(
            r#"{"id":"3","name":"Carnet","unitPrice":500,"imageUrl":"https://cdn.example/c.jpg"}"#,
        )
        .unwrap();
        assert_eq!(product.image_url.as_deref(), Some("https://cdn.example/c.jpg"));

        assert!(serde_json::from_str::<Product>(r#"{"id":"3","name":"","unitPrice":500}"#).is_err());
        assert!(
            serde_json::from_str::<Product>(r#"{"id":"3","name":"Carnet","unitPrice":-1}"#).is_err()
        );
    }

    #[test]
    fn test_line_total_overflow() {
        let product = Product::new(9u64, "Sculpture", Money::from_cents(i64::MAX / 2)).unwrap();
        assert!(matches!(
            CartLineItem::from_product(&product, 3).line_total(),
            Err(CoreError::TotalOutOfRange)
        ));
    }

    #[test]
    fn test_product_id_serializes_as_plain_string() {
        let id = ProductId::from(12u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }

    #[test]
    fn test_product_validation() {
        let product = Product::new(1u64, "Tote bag", Money::from_cents(1500)).unwrap();
        assert_eq!(product.id.as_str(), "1");
        assert!(product.image_url.is_none());

        assert!(matches!(
            Product::new("x", "", Money::from_cents(100)),
            Err(CoreError::Validation(_))
        ));
        assert!(Product::new("x", "Poster", Money::from_cents(-1)).is_err());
        assert!(Product::new("x", "Free leaflet", Money::zero()).is_ok());
    }

    #[test]
    fn test_line_item_from_product() {
        let product = Product::new("mask", "Masque", Money::from_cents(2599))
            .unwrap()
            .with_image_url("https://cdn.example/mask.jpg");
        let line = CartLineItem::from_product(&product, 3);

        assert_eq!(line.id, product.id);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total().unwrap().cents(), 7797);
        assert_eq!(line.image_url.as_deref(), Some("https://cdn.example/mask.jpg"));
    }

    #[test]
    fn test_line_item_wire_shape() {
        let product = Product::new(2u64, "Carnet", Money::from_cents(500)).unwrap();
        let json = serde_json::to_value(CartLineItem::from_product(&product, 1)).unwrap();
        assert_eq!(json["id"], "2");
        assert_eq!(json["unitPrice"], 500);
        assert_eq!(json["imageUrl"], serde_json::Value::Null);
    }
}
