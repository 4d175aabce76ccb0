//! # Error Types
//!
//! Validation errors for kontor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kontor-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kontor-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── LoadError        - Statement source loading failures (startup)    │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → web tier → client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limit)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any statement reaches the database, so a caller can map
/// them straight to a 4xx-style response without touching `DbError`.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("Field '{field}' is required")]
    Required { field: String },

    /// A field exceeded its maximum length.
    #[error("Field '{field}' exceeds maximum length of {max}")]
    TooLong { field: String, max: usize },

    /// A numeric field was outside its allowed range.
    #[error("Field '{field}' is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    /// A field failed a format check.
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a TooLong error for the given field and limit.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }
}
