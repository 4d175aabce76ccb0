//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite, plus the
//! [`Database`] handle that hands out repositories.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Startup                                   │
//! │                                                                         │
//! │  DbConfig::new(path) ← Configure pool, sql dir, schema                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       │                                                                 │
//! │       ├── 1. QueryRegistry::load(sql_dir, schema)                      │
//! │       │      └── any LoadError is FATAL: startup aborts here           │
//! │       │                                                                 │
//! │       ├── 2. SqlitePool (WAL mode, foreign keys ON)                    │
//! │       │                                                                 │
//! │       └── 3. Embedded migrations (when enabled)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.products(), db.documents(), ... ← repository accessors             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers, writers don't block readers
//! - Better crash recovery

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::registry::{QueryRegistry, DEFAULT_SCHEMA};
use crate::repository::contractor::ContractorRepository;
use crate::repository::document::DocumentRepository;
use crate::repository::finance::FinanceRepository;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::store::StoreRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/kontor/kontor.db")
///     .max_connections(5)
///     .schema("main");
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Directory holding the statement source files.
    /// Default: the `sql/` tree shipped with this crate.
    pub sql_dir: PathBuf,

    /// Schema name substituted into statements at load time.
    /// Default: `main` (the SQLite primary database).
    pub schema: String,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            sql_dir: QueryRegistry::default_sql_dir(),
            schema: DEFAULT_SCHEMA.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the statement source directory.
    pub fn sql_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sql_dir = dir.into();
        self
    }

    /// Sets the schema name substituted into statements.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            sql_dir: QueryRegistry::default_sql_dir(),
            schema: DEFAULT_SCHEMA.to_string(),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cheap to clone: the pool and the registry are both shared handles. The
/// registry is immutable after construction; nothing ever writes to it.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Loaded statement registry, shared with every repository.
    queries: Arc<QueryRegistry>,
}

impl Database {
    /// Creates a new database handle.
    ///
    /// ## What This Does
    /// 1. Loads the query registry from `config.sql_dir` (fatal on error)
    /// 2. Configures SQLite: WAL mode, NORMAL synchronous, foreign keys ON
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Errors
    /// * `DbError::Load` - a statement source file is missing or malformed
    /// * `DbError::ConnectionFailed` - pool could not be created
    /// * `DbError::MigrationFailed` - a pending migration did not apply
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            sql_dir = %config.sql_dir.display(),
            "Initializing database"
        );

        // Registry first: a broken statement file must abort startup before
        // any connection is opened.
        let queries = Arc::new(QueryRegistry::load(&config.sql_dir, &config.schema)?);

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power failure
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool, queries };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Automatically called by `new()` unless disabled in the config.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories. Prefer repository
    /// methods when available.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the loaded query registry.
    pub fn queries(&self) -> &QueryRegistry {
        &self.queries
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = db.products().all(1).await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Returns the document repository.
    pub fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Returns the contractor repository.
    pub fn contractors(&self) -> ContractorRepository {
        ContractorRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Returns the finance repository.
    pub fn finances(&self) -> FinanceRepository {
        FinanceRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Returns the store repository.
    pub fn store(&self) -> StoreRepository {
        StoreRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Returns the report repository.
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone(), Arc::clone(&self.queries))
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
