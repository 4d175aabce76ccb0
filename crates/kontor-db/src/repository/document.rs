//! # Document Repository
//!
//! Database operations for business documents and their lookup tables.
//!
//! All statements come from the registry; this namespace has no inline SQL.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::registry::QueryRegistry;
use kontor_core::{Document, DocumentType, NewDocument, PaymentMethod};

/// Repository for document database operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        DocumentRepository { pool, queries }
    }

    /// Lists all documents for a user, newest first.
    pub async fn list(&self, user_id: i64) -> DbResult<Vec<Document>> {
        debug!(user_id, "Listing documents");

        let documents = sqlx::query_as::<_, Document>(self.queries.documents.list.as_sql())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(documents)
    }

    /// Creates a document and returns the inserted row.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - unknown type, contractor, or
    ///   payment method
    pub async fn add(&self, input: &NewDocument) -> DbResult<Document> {
        debug!(
            document_type_id = input.document_type_id,
            contractor_id = input.contractor_id,
            "Creating document"
        );

        let document = sqlx::query_as::<_, Document>(self.queries.documents.add.as_sql())
            .bind(input.document_type_id)
            .bind(input.contractor_id)
            .bind(input.payment_method_id)
            .bind(input.total)
            .bind(&input.note)
            .bind(input.doc_date)
            .bind(input.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(document)
    }

    /// Lists all document types (shared lookup).
    pub async fn document_types_list(&self) -> DbResult<Vec<DocumentType>> {
        let types =
            sqlx::query_as::<_, DocumentType>(self.queries.documents.document_types_list.as_sql())
                .fetch_all(&self.pool)
                .await?;

        Ok(types)
    }

    /// Lists all payment methods (shared lookup).
    pub async fn payment_methods_list(&self) -> DbResult<Vec<PaymentMethod>> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            self.queries.documents.payment_methods_list.as_sql(),
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
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

        sqlx::query("INSERT INTO contractor_group (id, name) VALUES (1, 'Suppliers')")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO contractor (id, name, contractor_group_id, user_id) VALUES (1, 'Acme', 1, 1)",
        )
        .execute(db.pool())
        .await
        .unwrap();

        db
    }

    fn new_doc(user_id: i64) -> NewDocument {
        NewDocument {
            document_type_id: 1,
            contractor_id: 1,
            payment_method_id: 1,
            total: 120.50,
            note: Some("March delivery".to_string()),
            doc_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_add_returns_inserted_row() {
        let db = test_db().await;

        let doc = db.documents().add(&new_doc(1)).await.unwrap();

        assert_eq!(doc.total, 120.50);
        assert_eq!(doc.note.as_deref(), Some("March delivery"));
        assert_eq!(doc.doc_date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(doc.user_id, 1);
    }

    #[tokio::test]
    async fn test_list_scopes_by_user_newest_first() {
        let db = test_db().await;

        let mut early = new_doc(1);
        early.doc_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        db.documents().add(&early).await.unwrap();
        db.documents().add(&new_doc(1)).await.unwrap();
        db.documents().add(&new_doc(2)).await.unwrap();

        let docs = db.documents().list(1).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].doc_date > docs[1].doc_date);
    }

    #[tokio::test]
    async fn test_unknown_contractor_is_a_foreign_key_error() {
        let db = test_db().await;

        let mut doc = new_doc(1);
        doc.contractor_id = 999;

        let err = db.documents().add(&doc).await.expect_err("must fail");
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_lookup_tables_are_seeded() {
        let db = test_db().await;

        let types = db.documents().document_types_list().await.unwrap();
        assert!(types.iter().any(|t| t.name == "Sale"));

        let methods = db.documents().payment_methods_list().await.unwrap();
        assert!(methods.iter().any(|m| m.name == "Cash"));
    }
}
