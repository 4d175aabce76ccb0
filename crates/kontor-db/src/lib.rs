//! # kontor-db: Data-Access Layer for Kontor
//!
//! This crate provides database access for the Kontor business-management
//! application. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kontor Data Flow                                 │
//! │                                                                         │
//! │  Web tier (HTTP routing, auth - outside this workspace)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kontor-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌─────────────────┐  │   │
//! │  │   │   Database    │   │ QueryRegistry │   │  Repositories   │  │   │
//! │  │   │   (pool.rs)   │   │ (registry.rs) │   │ (repository/)   │  │   │
//! │  │   │               │   │               │   │                 │  │   │
//! │  │   │ SqlitePool    │──►│ sql/*.sql     │──►│ ProductRepo     │  │   │
//! │  │   │ Migrations    │   │ loaded once   │   │ DocumentRepo    │  │   │
//! │  │   │               │   │ at startup    │   │ ...             │  │   │
//! │  │   └───────────────┘   └───────────────┘   └─────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the [`Database`] handle
//! - [`registry`] - Load-once SQL statement registry
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations per domain
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kontor_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kontor.db")).await?;
//!
//! let products = db.products().all(user_id).await?;
//! let report = db.reports().products_balance_list(user_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod registry;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use registry::{LoadError, QueryRegistry, Statement};

// Repository re-exports for convenience
pub use repository::contractor::{ContractorRepository, ContractorSaved};
pub use repository::document::DocumentRepository;
pub use repository::finance::FinanceRepository;
pub use repository::product::{ProductRepository, ProductSaved};
pub use repository::report::ReportRepository;
pub use repository::store::StoreRepository;
