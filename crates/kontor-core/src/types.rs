//! # Domain Types
//!
//! Row types and structured operation inputs for Kontor.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Rows (as returned from the database)                                  │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Document     │   │   Contractor    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  document_type  │   │  name           │       │
//! │  │  price          │   │  contractor_id  │   │  group_id       │       │
//! │  │  user_id        │   │  total          │   │  user_id        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Inputs (as accepted by the repositories)                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductEdit    │   │  NewDocument    │   │ ContractorEdit  │       │
//! │  │  id: Option     │   │  (all required) │   │  id: Option     │       │
//! │  │  image: Option  │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Model
//! Every user-owned entity carries a `user_id` column; repositories filter
//! on it so one tenant never sees another tenant's rows. Lookup entities
//! (groups, document types, payment methods) are shared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Products
// =============================================================================

/// A product or a service offered by the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (autoincrement).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// True when this row describes a service rather than a stocked good.
    pub service: bool,

    /// Unit price.
    pub price: f64,

    /// Group this product belongs to.
    pub product_group_id: i64,

    /// Whether the product appears in the public catalog.
    pub show_to_public: bool,

    /// Owner of the row; all queries are scoped by it.
    pub user_id: i64,
}

/// A product joined with its image association, as returned by `find`.
///
/// `image_url` is `None` when the product has no association row; the join
/// is a LEFT OUTER, so a missing image never hides the product itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductWithImage {
    pub id: i64,
    pub name: String,
    pub service: bool,
    pub price: f64,
    pub product_group_id: i64,
    pub show_to_public: bool,
    pub user_id: i64,

    /// URL of the active image association, if any.
    pub image_url: Option<String>,
}

/// A product group (lookup entity, no mutation through this layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductGroup {
    pub id: i64,
    pub name: String,
}

/// Input for the product `edit` operation.
///
/// ## Branching
/// - `id: Some(_)` - update the existing row's mutable fields, and when
///   `product_image` is set, replace the image association.
/// - `id: None` - create a new product; `product_image` is ignored because
///   the association requires a persisted product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEdit {
    /// Present for update, absent for create.
    pub id: Option<i64>,

    pub name: String,
    pub service: bool,
    pub price: f64,
    pub product_group_id: i64,
    pub show_to_public: bool,

    /// When set, becomes the product's single active image association.
    pub product_image: Option<String>,

    /// Owner of the row.
    pub user_id: i64,
}

// =============================================================================
// Documents
// =============================================================================

/// A business document (invoice, receipt, goods movement, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Document {
    pub id: i64,
    pub document_type_id: i64,
    pub contractor_id: i64,
    pub payment_method_id: i64,
    pub total: f64,
    pub note: Option<String>,
    pub doc_date: NaiveDate,
    pub user_id: i64,
}

/// Input for creating a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub document_type_id: i64,
    pub contractor_id: i64,
    pub payment_method_id: i64,
    pub total: f64,
    pub note: Option<String>,
    pub doc_date: NaiveDate,
    pub user_id: i64,
}

/// Document type lookup row (seeded by migration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DocumentType {
    pub id: i64,
    pub name: String,
}

/// Payment method lookup row (seeded by migration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Contractors
// =============================================================================

/// A contractor (customer or supplier) the business deals with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Contractor {
    pub id: i64,
    pub name: String,
    pub contractor_group_id: i64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub user_id: i64,
}

/// A contractor group (lookup entity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ContractorGroup {
    pub id: i64,
    pub name: String,
}

/// Input for the contractor `edit` operation.
///
/// Same create/update branching as [`ProductEdit`], without an image
/// association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorEdit {
    /// Present for update, absent for create.
    pub id: Option<i64>,

    pub name: String,
    pub contractor_group_id: i64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub user_id: i64,
}

// =============================================================================
// Finances
// =============================================================================

/// A money movement, optionally tied to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FinanceOperation {
    pub id: i64,

    /// Document that produced this movement, if any.
    pub document_id: Option<i64>,

    /// Positive for income, negative for expense.
    pub amount: f64,

    pub op_date: NaiveDate,
    pub note: Option<String>,
    pub user_id: i64,
}

/// Input for recording a finance operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFinanceOperation {
    pub document_id: Option<i64>,
    pub amount: f64,
    pub op_date: NaiveDate,
    pub note: Option<String>,
    pub user_id: i64,
}

// =============================================================================
// Store
// =============================================================================

/// A stock movement for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreOperation {
    pub id: i64,
    pub product_id: i64,

    /// Document that produced this movement, if any.
    pub document_id: Option<i64>,

    /// Positive quantity = goods in, negative = goods out.
    pub quantity: f64,

    pub op_date: NaiveDate,
    pub user_id: i64,
}

/// Input for recording a store operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStoreOperation {
    pub product_id: i64,
    pub document_id: Option<i64>,
    pub quantity: f64,
    pub op_date: NaiveDate,
    pub user_id: i64,
}

// =============================================================================
// Reports
// =============================================================================

/// One line of the products-balance report: current stock per product,
/// computed as the sum of store-operation quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductBalance {
    pub product_id: i64,
    pub name: String,
    pub balance: f64,
}
