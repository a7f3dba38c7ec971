//! # Validation Module
//!
//! Input validation for cart and catalog boundaries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI (quantity stepper, currency selector)                      │
//! │  └── Never offers a negative quantity or an unknown currency            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog boundary                                              │
//! │  └── Product::new → id, name, price checks                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart store (THIS MODULE)                                      │
//! │  └── quantity > 0, line / cart limits, before any mutation              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use passport_core::validation::{validate_product_id, validate_quantity};
//!
//! validate_product_id("mask-42").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id.
const MAX_PRODUCT_ID_LEN: usize = 64;

/// Longest accepted product name.
const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product display name.
///
/// ## Example
/// ```rust
/// use passport_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Masque Gouro").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to `add`.
///
/// ## User Workflow
/// ```text
/// Tap "Ajouter au panier" (qty: 1)
///       │
///       ▼
/// validate_quantity(1) ← THIS FUNCTION
///       │
///       ├── qty <= 0? → Error: "quantity must be positive", cart untouched
///       │
///       └── OK → line limit checks in the cart
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Cart Limit Validators
// =============================================================================

/// Validates the resulting quantity of one line against the line maximum.
pub fn validate_line_quantity(requested: i64, max: i64) -> CoreResult<()> {
    if requested > max {
        return Err(CoreError::QuantityTooLarge { requested, max });
    }

    Ok(())
}

/// Validates that one more distinct line fits in the cart.
pub fn validate_cart_size(current_lines: usize, max: usize) -> CoreResult<()> {
    if current_lines >= max {
        return Err(CoreError::CartTooLarge { max });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
