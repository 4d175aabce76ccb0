//! # Store Repository
//!
//! Database operations for stock movements. Quantities are signed:
//! positive for goods in, negative for goods out. The products-balance
//! report sums them per product.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::registry::QueryRegistry;
use kontor_core::{NewStoreOperation, StoreOperation};

/// Repository for store-operation database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        StoreRepository { pool, queries }
    }

    /// Lists all store operations for a user, newest first.
    pub async fn store_operations_list(&self, user_id: i64) -> DbResult<Vec<StoreOperation>> {
        debug!(user_id, "Listing store operations");

        let operations = sqlx::query_as::<_, StoreOperation>(
            self.queries.store.store_operations_list.as_sql(),
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(operations)
    }

    /// Records a store operation and returns the inserted row.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - unknown `product_id`
    pub async fn add(&self, input: &NewStoreOperation) -> DbResult<StoreOperation> {
        debug!(
            product_id = input.product_id,
            quantity = input.quantity,
            "Recording store operation"
        );

        let operation = sqlx::query_as::<_, StoreOperation>(self.queries.store.add.as_sql())
            .bind(input.product_id)
            .bind(input.document_id)
            .bind(input.quantity)
            .bind(input.op_date)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO product_group (id, name) VALUES (1, 'Goods')")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO product (id, name, service, price, product_group_id, show_to_public, user_id) \
             VALUES (1, 'Widget', 0, 9.99, 1, 1, 1)",
        )
        .execute(db.pool())
        .await
        .unwrap();

        db
    }

    fn movement(quantity: f64, day: u32, user_id: i64) -> NewStoreOperation {
        NewStoreOperation {
            product_id: 1,
            document_id: None,
            quantity,
            op_date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let db = test_db().await;

        let op = db.store().add(&movement(10.0, 1, 1)).await.unwrap();
        assert_eq!(op.quantity, 10.0);

        db.store().add(&movement(-3.0, 5, 1)).await.unwrap();
        db.store().add(&movement(2.0, 2, 7)).await.unwrap();

        let ops = db.store().store_operations_list(1).await.unwrap();
        assert_eq!(ops.len(), 2);
        // Newest first
        assert_eq!(ops[0].quantity, -3.0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_a_foreign_key_error() {
        let db = test_db().await;

        let mut input = movement(1.0, 1, 1);
        input.product_id = 999;

        let err = db.store().add(&input).await.expect_err("must fail");
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");
    }
}
