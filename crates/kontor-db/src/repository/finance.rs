//! # Finance Repository
//!
//! Database operations for money movements. A movement may stand alone
//! (manual correction) or reference the document that produced it.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::registry::QueryRegistry;
use kontor_core::{FinanceOperation, NewFinanceOperation};

/// Repository for finance-operation database operations.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl FinanceRepository {
    /// Creates a new FinanceRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        FinanceRepository { pool, queries }
    }

    /// Lists all finance operations for a user, newest first.
    pub async fn finance_operations_list(&self, user_id: i64) -> DbResult<Vec<FinanceOperation>> {
        debug!(user_id, "Listing finance operations");

        let operations = sqlx::query_as::<_, FinanceOperation>(
            self.queries.finances.finance_operations_list.as_sql(),
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(operations)
    }

    /// Records a finance operation and returns the inserted row.
    pub async fn add(&self, input: &NewFinanceOperation) -> DbResult<FinanceOperation> {
        debug!(amount = input.amount, "Recording finance operation");

        let operation = sqlx::query_as::<_, FinanceOperation>(self.queries.finances.add.as_sql())
            .bind(input.document_id)
            .bind(input.amount)
            .bind(input.op_date)
            .bind(&input.note)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    fn movement(amount: f64, day: u32, user_id: i64) -> NewFinanceOperation {
        NewFinanceOperation {
            document_id: None,
            amount,
            op_date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            note: None,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let op = db.finances().add(&movement(-45.0, 2, 1)).await.unwrap();
        assert_eq!(op.amount, -45.0);
        assert_eq!(op.document_id, None);

        db.finances().add(&movement(100.0, 9, 1)).await.unwrap();
        db.finances().add(&movement(7.0, 3, 2)).await.unwrap();

        let ops = db.finances().finance_operations_list(1).await.unwrap();
        assert_eq!(ops.len(), 2);
        // Newest first
        assert_eq!(ops[0].amount, 100.0);
        assert_eq!(ops[1].amount, -45.0);
    }
}
