//! # Contractor Repository
//!
//! Database operations for contractors (customers and suppliers).
//!
//! `edit` branches on the presence of `id` exactly as the product
//! repository does, minus the image association - a single UPDATE needs no
//! transaction of its own.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::registry::QueryRegistry;
use kontor_core::{Contractor, ContractorEdit, ContractorGroup};

/// Outcome of a successful [`ContractorRepository::edit`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractorSaved {
    /// A new contractor was created.
    Created(Contractor),

    /// The contractor with this id was updated in place.
    Updated { id: i64 },
}

/// Repository for contractor database operations.
#[derive(Debug, Clone)]
pub struct ContractorRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl ContractorRepository {
    /// Creates a new ContractorRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        ContractorRepository { pool, queries }
    }

    /// Lists all contractors for a user, ordered by name.
    pub async fn list(&self, user_id: i64) -> DbResult<Vec<Contractor>> {
        debug!(user_id, "Listing contractors");

        let contractors = sqlx::query_as::<_, Contractor>(self.queries.contractors.list.as_sql())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(contractors)
    }

    /// Lists all contractor groups (shared lookup).
    pub async fn contractor_group_list(&self) -> DbResult<Vec<ContractorGroup>> {
        let groups = sqlx::query_as::<_, ContractorGroup>(
            self.queries.contractors.contractor_group_list.as_sql(),
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Creates or updates a contractor.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - update branch, no row with this id
    /// * `DbError::ForeignKeyViolation` - unknown `contractor_group_id`
    pub async fn edit(&self, input: &ContractorEdit) -> DbResult<ContractorSaved> {
        match input.id {
            Some(id) => {
                debug!(id, "Updating contractor");

                let result = sqlx::query(self.queries.contractors.edit.as_sql())
                    .bind(&input.name)
                    .bind(input.contractor_group_id)
                    .bind(&input.phone)
                    .bind(&input.email)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                if result.rows_affected() == 0 {
                    return Err(DbError::not_found("Contractor", id));
                }

                Ok(ContractorSaved::Updated { id })
            }

            None => {
                debug!(name = %input.name, "Creating contractor");

                let contractor =
                    sqlx::query_as::<_, Contractor>(self.queries.contractors.add.as_sql())
                        .bind(&input.name)
                        .bind(input.contractor_group_id)
                        .bind(&input.phone)
                        .bind(&input.email)
                        .bind(input.user_id)
                        .fetch_one(&self.pool)
                        .await?;

                Ok(ContractorSaved::Created(contractor))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO contractor_group (id, name) VALUES (1, 'Suppliers'), (2, 'Customers')")
            .execute(db.pool())
            .await
            .unwrap();

        db
    }

    fn draft(name: &str, user_id: i64) -> ContractorEdit {
        ContractorEdit {
            id: None,
            name: name.to_string(),
            contractor_group_id: 1,
            phone: None,
            email: None,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_edit_without_id_creates() {
        let db = test_db().await;

        let mut input = draft("Acme", 1);
        input.phone = Some("+1-555-0100".to_string());

        let ContractorSaved::Created(contractor) = db.contractors().edit(&input).await.unwrap()
        else {
            panic!("expected Created");
        };

        assert_eq!(contractor.name, "Acme");
        assert_eq!(contractor.phone.as_deref(), Some("+1-555-0100"));
        assert_eq!(contractor.email, None);
    }

    #[tokio::test]
    async fn test_edit_with_id_updates() {
        let db = test_db().await;

        let ContractorSaved::Created(contractor) =
            db.contractors().edit(&draft("Acme", 1)).await.unwrap()
        else {
            panic!("expected Created");
        };

        let input = ContractorEdit {
            id: Some(contractor.id),
            name: "Acme Ltd".to_string(),
            contractor_group_id: 2,
            phone: None,
            email: Some("sales@acme.example".to_string()),
            user_id: 1,
        };

        let saved = db.contractors().edit(&input).await.unwrap();
        assert_eq!(saved, ContractorSaved::Updated { id: contractor.id });

        let listed = db.contractors().list(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Acme Ltd");
        assert_eq!(listed[0].contractor_group_id, 2);
        assert_eq!(listed[0].email.as_deref(), Some("sales@acme.example"));
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_not_found() {
        let db = test_db().await;

        let mut input = draft("Ghost", 1);
        input.id = Some(999);

        let err = db.contractors().edit(&input).await.expect_err("must fail");
        assert!(matches!(err, DbError::NotFound { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_list_scopes_by_user() {
        let db = test_db().await;

        db.contractors().edit(&draft("Beta", 1)).await.unwrap();
        db.contractors().edit(&draft("Alpha", 1)).await.unwrap();
        db.contractors().edit(&draft("Other", 2)).await.unwrap();

        let mine = db.contractors().list(1).await.unwrap();
        let names: Vec<&str> = mine.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_contractor_group_list() {
        let db = test_db().await;

        let groups = db.contractors().contractor_group_list().await.unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Customers", "Suppliers"]);
    }
}
