//! # Query Registry
//!
//! Load-once mapping from logical operation name to an executable SQL
//! statement.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Registry Lifecycle                                 │
//! │                                                                         │
//! │  Process startup (Database::new)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QueryRegistry::load(sql_dir, schema)                                  │
//! │       │                                                                 │
//! │       ├── read sql/products/list.sql          ──┐                      │
//! │       ├── read sql/products/add.sql             │ one filesystem       │
//! │       ├── ...                                   │ pass, at             │
//! │       └── read sql/reports/products_balance_list.sql ─┘ construction   │
//! │       │                                                                 │
//! │       ├── minify (strip comments, collapse whitespace)                 │
//! │       ├── substitute ${schema~} with the configured schema name        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Immutable Statement tree, shared behind Arc for the process lifetime  │
//! │                                                                         │
//! │  Any failure → LoadError → Database::new fails → startup aborts        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why external SQL files?
//! Larger statements can be developed and reviewed without touching Rust
//! code, and the file is the single place where a statement's parameters
//! are documented. Small one-liners stay inline in the repositories where
//! the relation between statement and bind calls is obvious at a glance.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Placeholder for the static schema parameter inside SQL files.
const SCHEMA_PARAM: &str = "${schema~}";

/// Schema name substituted into statements by default.
///
/// SQLite addresses its primary database as `main`; a PostgreSQL port would
/// pass `public` here instead.
pub const DEFAULT_SCHEMA: &str = "main";

// =============================================================================
// Errors
// =============================================================================

/// Statement source loading errors.
///
/// All of these are fatal at startup: a registry with holes in it would
/// turn a missing file into a runtime failure on first use, which is much
/// harder to spot than a refused boot.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The statement file could not be read.
    #[error("Cannot read statement file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `/* ... */` comment was opened but never closed.
    #[error("Unterminated block comment in {path}")]
    UnterminatedComment { path: PathBuf },

    /// The file contained nothing but comments and whitespace.
    #[error("Statement file {path} is empty after minification")]
    Empty { path: PathBuf },
}

// =============================================================================
// Statement
// =============================================================================

/// Opaque handle to a loaded, minified, schema-substituted SQL statement.
///
/// Only the execution layer looks inside; everything else passes handles
/// around by reference.
#[derive(Debug, Clone)]
pub struct Statement(String);

impl Statement {
    /// Returns the executable SQL text.
    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Registered statements for the products namespace.
///
/// `find` and `all` are deliberately absent: those statements are short
/// one-liners kept inline in the repository.
#[derive(Debug, Clone)]
pub struct ProductQueries {
    pub list: Statement,
    pub add: Statement,
    pub edit: Statement,
    pub product_group_list: Statement,
}

/// Registered statements for the documents namespace.
#[derive(Debug, Clone)]
pub struct DocumentQueries {
    pub list: Statement,
    pub add: Statement,
    pub document_types_list: Statement,
    pub payment_methods_list: Statement,
}

/// Registered statements for the contractors namespace.
#[derive(Debug, Clone)]
pub struct ContractorQueries {
    pub list: Statement,
    pub add: Statement,
    pub edit: Statement,
    pub contractor_group_list: Statement,
}

/// Registered statements for the finances namespace.
#[derive(Debug, Clone)]
pub struct FinanceQueries {
    pub finance_operations_list: Statement,
    pub add: Statement,
}

/// Registered statements for the store namespace.
#[derive(Debug, Clone)]
pub struct StoreQueries {
    pub store_operations_list: Statement,
    pub add: Statement,
}

/// Registered statements for the reports namespace.
#[derive(Debug, Clone)]
pub struct ReportQueries {
    pub products_balance_list: Statement,
}

/// Immutable domain → operation → statement mapping.
///
/// Built once by [`QueryRegistry::load`] at startup and never mutated
/// afterwards; `Database` shares it behind an `Arc` with every repository.
#[derive(Debug, Clone)]
pub struct QueryRegistry {
    pub products: ProductQueries,
    pub documents: DocumentQueries,
    pub contractors: ContractorQueries,
    pub finances: FinanceQueries,
    pub store: StoreQueries,
    pub reports: ReportQueries,
}

impl QueryRegistry {
    /// Loads every registered statement from `dir`.
    ///
    /// ## Arguments
    /// * `dir` - base directory holding one subdirectory per namespace
    /// * `schema` - value substituted for the static `${schema~}` parameter
    ///
    /// ## Errors
    /// Returns the first [`LoadError`] encountered; partial registries are
    /// never constructed.
    pub fn load(dir: &Path, schema: &str) -> Result<Self, LoadError> {
        debug!(dir = %dir.display(), schema = %schema, "Loading query registry");

        let stmt = |rel: &str| load_statement(&dir.join(rel), schema);

        Ok(QueryRegistry {
            products: ProductQueries {
                list: stmt("products/list.sql")?,
                add: stmt("products/add.sql")?,
                edit: stmt("products/edit.sql")?,
                product_group_list: stmt("products/product_group_list.sql")?,
            },
            documents: DocumentQueries {
                list: stmt("documents/list.sql")?,
                add: stmt("documents/add.sql")?,
                document_types_list: stmt("documents/document_types_list.sql")?,
                payment_methods_list: stmt("documents/payment_methods_list.sql")?,
            },
            contractors: ContractorQueries {
                list: stmt("contractors/list.sql")?,
                add: stmt("contractors/add.sql")?,
                edit: stmt("contractors/edit.sql")?,
                contractor_group_list: stmt("contractors/contractor_group_list.sql")?,
            },
            finances: FinanceQueries {
                finance_operations_list: stmt("finances/finance_operations_list.sql")?,
                add: stmt("finances/add.sql")?,
            },
            store: StoreQueries {
                store_operations_list: stmt("store/store_operations_list.sql")?,
                add: stmt("store/add.sql")?,
            },
            reports: ReportQueries {
                products_balance_list: stmt("reports/products_balance_list.sql")?,
            },
        })
    }

    /// Default statement directory: the `sql/` tree shipped with this crate.
    pub fn default_sql_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sql")
    }
}

// =============================================================================
// Loading & Minification
// =============================================================================

/// Reads, minifies, and schema-substitutes one statement file.
fn load_statement(path: &Path, schema: &str) -> Result<Statement, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let minified = minify(&raw).ok_or_else(|| LoadError::UnterminatedComment {
        path: path.to_path_buf(),
    })?;

    if minified.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(Statement(minified.replace(SCHEMA_PARAM, schema)))
}

/// Minifies SQL text: strips `--` line comments and `/* ... */` block
/// comments, collapses whitespace runs to a single space.
///
/// Comment markers inside single-quoted string literals are left alone.
/// Returns `None` on an unterminated block comment.
fn minify(sql: &str) -> Option<String> {
    #[derive(PartialEq)]
    enum State {
        Normal,
        InString,
        LineComment,
        BlockComment,
    }

    let mut out = String::with_capacity(sql.len());
    let mut state = State::Normal;
    let mut chars = sql.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match state {
            State::Normal => {
                if c == '-' && chars.peek() == Some(&'-') {
                    chars.next();
                    state = State::LineComment;
                } else if c == '/' && chars.peek() == Some(&'*') {
                    chars.next();
                    state = State::BlockComment;
                } else if c == '\'' {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(c);
                    state = State::InString;
                } else if c.is_whitespace() {
                    pending_space = true;
                } else {
                    if pending_space && !out.is_empty() {
                        out.push(' ');
                    }
                    pending_space = false;
                    out.push(c);
                }
            }
            State::InString => {
                out.push(c);
                // '' is an escaped quote, not a string end
                if c == '\'' {
                    if chars.peek() == Some(&'\'') {
                        out.push(chars.next().unwrap());
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if c == '\n' {
                    pending_space = true;
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    pending_space = true;
                    state = State::Normal;
                }
            }
        }
    }

    if state == State::BlockComment {
        return None;
    }

    Some(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
