//! # Report Repository
//!
//! Read-only aggregated views over the operational tables.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::registry::QueryRegistry;
use kontor_core::ProductBalance;

/// Repository for report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        ReportRepository { pool, queries }
    }

    /// Current stock balance per product for a user.
    ///
    /// Services are excluded; products without movements report a balance
    /// of zero.
    pub async fn products_balance_list(&self, user_id: i64) -> DbResult<Vec<ProductBalance>> {
        debug!(user_id, "Building products balance report");

        let balances = sqlx::query_as::<_, ProductBalance>(
            self.queries.reports.products_balance_list.as_sql(),
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use kontor_core::NewStoreOperation;
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO product_group (id, name) VALUES (1, 'Goods')")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO product (id, name, service, price, product_group_id, show_to_public, user_id) VALUES \
             (1, 'Widget', 0, 9.99, 1, 1, 1), \
             (2, 'Gadget', 0, 4.50, 1, 1, 1), \
             (3, 'Delivery', 1, 15.0, 1, 1, 1)",
        )
        .execute(db.pool())
        .await
        .unwrap();

        db
    }

    async fn movement(db: &Database, product_id: i64, quantity: f64) {
        db.store()
            .add(&NewStoreOperation {
                product_id,
                document_id: None,
                quantity,
                op_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
                user_id: 1,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_balance_sums_movements_per_product() {
        let db = test_db().await;

        movement(&db, 1, 10.0).await;
        movement(&db, 1, -3.0).await;
        movement(&db, 2, 5.0).await;

        let report = db.reports().products_balance_list(1).await.unwrap();

        // Ordered by name; services excluded
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Gadget");
        assert_eq!(report[0].balance, 5.0);
        assert_eq!(report[1].name, "Widget");
        assert_eq!(report[1].balance, 7.0);
    }

    #[tokio::test]
    async fn test_product_without_movements_reports_zero() {
        let db = test_db().await;

        let report = db.reports().products_balance_list(1).await.unwrap();
        assert!(report.iter().all(|b| b.balance == 0.0));
        assert_eq!(report.len(), 2);
    }
}
