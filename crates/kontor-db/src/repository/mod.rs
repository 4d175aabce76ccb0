//! # Repository Module
//!
//! Database repository implementations for Kontor.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Web tier                                                              │
//! │       │                                                                 │
//! │       │  db.products().find(5, user_id)                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self, user_id)                                              │
//! │  ├── find(&self, id, user_id)                                          │
//! │  ├── all(&self, user_id)                                               │
//! │  └── edit(&self, input)                                                │
//! │       │                                                                 │
//! │       │  registered or inline SQL statement                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per domain                             │
//! │  • Structured inputs instead of untyped value bags                     │
//! │  • Every failure is an Err the caller can observe                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - products, groups, image association
//! - [`document::DocumentRepository`] - documents and their lookups
//! - [`contractor::ContractorRepository`] - contractors and groups
//! - [`finance::FinanceRepository`] - money movements
//! - [`store::StoreRepository`] - stock movements
//! - [`report::ReportRepository`] - aggregated reports

pub mod contractor;
pub mod document;
pub mod finance;
pub mod product;
pub mod report;
pub mod store;
