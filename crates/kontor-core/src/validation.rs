//! # Validation Module
//!
//! Input validation for repository operation inputs.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web tier (outside this workspace)                            │
//! │  ├── Basic format checks, immediate user feedback                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - typed input validation                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{ContractorEdit, ProductEdit};
use crate::{MAX_IMAGE_URL_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an entity name (product, contractor, group).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use kontor_core::validation::validate_name;
///
/// assert!(validate_name("Widget").is_ok());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::too_long("name", MAX_NAME_LEN));
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be finite (no NaN/infinity from upstream JSON)
/// - Must not be negative
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

/// Validates an image URL.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_IMAGE_URL_LEN`] characters
/// - Must not contain whitespace
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::required("product_image"));
    }

    if url.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::too_long("product_image", MAX_IMAGE_URL_LEN));
    }

    if url.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "product_image".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a store-operation quantity.
///
/// Negative quantities are legal (goods out); zero is not, because a
/// zero-quantity movement carries no information.
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if quantity == 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            reason: "must not be zero".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a full [`ProductEdit`] input before it reaches the database.
pub fn validate_product_edit(input: &ProductEdit) -> ValidationResult<()> {
    validate_name(&input.name)?;
    validate_price(input.price)?;

    if let Some(url) = &input.product_image {
        validate_image_url(url)?;
    }

    Ok(())
}

/// Validates a full [`ContractorEdit`] input.
pub fn validate_contractor_edit(input: &ContractorEdit) -> ValidationResult<()> {
    validate_name(&input.name)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
