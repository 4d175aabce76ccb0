//! # kontor-core: Pure Domain Types for Kontor
//!
//! This crate defines the domain model for the Kontor business-management
//! data layer: row types as they come back from the database, structured
//! inputs as the repositories accept them, and the validation rules that
//! gate those inputs.
//!
//! ## Design Rules
//!
//! 1. **No I/O** - this crate never touches the database, the network, or
//!    the file system. Everything here is testable with plain `#[test]`.
//! 2. **Structured inputs** - every write operation has an explicit input
//!    type with required fields as plain values and optional fields as
//!    `Option`. No untyped value bags.
//! 3. **Rows are data** - row types are `Clone + Serialize` records with
//!    no behavior; the database is the sole owner of persisted entities.

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kontor_core::Product` instead of
// `use kontor_core::types::Product`

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length for entity names (products, contractors, groups).
///
/// Matches the column width in the schema; validated here so callers get a
/// typed error instead of a database truncation or constraint failure.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for a stored image URL.
pub const MAX_IMAGE_URL_LEN: usize = 500;
