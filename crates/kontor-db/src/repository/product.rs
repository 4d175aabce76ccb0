//! # Product Repository
//!
//! Database operations for products and their image association.
//!
//! ## The `edit` Operation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        edit(ProductEdit)                                │
//! │                                                                         │
//! │  input.id present?                                                     │
//! │       │                                                                 │
//! │       ├── YES: one atomic transaction                                  │
//! │       │     1. UPDATE product fields by id                             │
//! │       │        └── 0 rows affected → NotFound, rollback                │
//! │       │     2. product_image set?                                      │
//! │       │        ├── DELETE all associations for the product             │
//! │       │        └── INSERT one new association (active = true)          │
//! │       │     3. COMMIT - all statements land together or none do        │
//! │       │                                                                 │
//! │       └── NO: INSERT ... RETURNING → the created row                   │
//! │                                                                         │
//! │  Every failure propagates as Err; nothing is logged-and-dropped.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Statement Sources
//! `list`, `add`, `edit`, and `product_group_list` come from the registry;
//! `find` and `all` are short one-liners kept inline so statement and bind
//! calls sit together.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::registry::QueryRegistry;
use kontor_core::{Product, ProductEdit, ProductGroup, ProductWithImage};

/// Outcome of a successful [`ProductRepository::edit`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductSaved {
    /// A new product was created.
    Created(Product),

    /// The product with this id was updated in place.
    Updated { id: i64 },
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let mine = repo.all(user_id).await?;
/// let one = repo.find(5, user_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    queries: Arc<QueryRegistry>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, queries: Arc<QueryRegistry>) -> Self {
        ProductRepository { pool, queries }
    }

    /// Lists all products for a user (registered statement).
    pub async fn list(&self, user_id: i64) -> DbResult<Vec<Product>> {
        debug!(user_id, "Listing products");

        let products = sqlx::query_as::<_, Product>(self.queries.products.list.as_sql())
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Finds one product by id, scoped to a user, joined with its image.
    ///
    /// ## Returns
    /// * `Ok(Some(_))` - product found; `image_url` is `None` when the
    ///   product has no image association
    /// * `Ok(None)` - no such product for this user (not an error)
    pub async fn find(&self, id: i64, user_id: i64) -> DbResult<Option<ProductWithImage>> {
        debug!(id, user_id, "Finding product");

        let product = sqlx::query_as::<_, ProductWithImage>(
            "SELECT p.id, p.name, p.service, p.price, p.product_group_id, \
             p.show_to_public, p.user_id, itp.image_url \
             FROM product p \
             LEFT JOIN image_to_product itp ON p.id = itp.product_id \
             WHERE p.id = ?1 AND p.user_id = ?2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products for a user ordered by name ascending.
    pub async fn all(&self, user_id: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, service, price, product_group_id, show_to_public, user_id \
             FROM product WHERE user_id = ?1 ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists all product groups (shared lookup, no user filter).
    pub async fn product_group_list(&self) -> DbResult<Vec<ProductGroup>> {
        let groups =
            sqlx::query_as::<_, ProductGroup>(self.queries.products.product_group_list.as_sql())
                .fetch_all(&self.pool)
                .await?;

        Ok(groups)
    }

    /// Creates or updates a product.
    ///
    /// ## Branching
    /// * `input.id` present - updates the row's mutable fields and, when
    ///   `product_image` is set, replaces the image association, all within
    ///   one transaction.
    /// * `input.id` absent - inserts a new row and returns it.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - update branch, no row with this id; the
    ///   transaction rolls back
    /// * `DbError::ForeignKeyViolation` - unknown `product_group_id`
    ///
    /// On any failure inside the update branch the transaction rolls back
    /// as a whole: the product row and its image association never diverge.
    pub async fn edit(&self, input: &ProductEdit) -> DbResult<ProductSaved> {
        match input.id {
            Some(id) => {
                debug!(id, "Updating product");

                let mut tx = self.pool.begin().await?;

                let result = sqlx::query(self.queries.products.edit.as_sql())
                    .bind(&input.name)
                    .bind(input.service)
                    .bind(input.price)
                    .bind(input.product_group_id)
                    .bind(input.show_to_public)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                if result.rows_affected() == 0 {
                    // tx drops here, rolling back
                    return Err(DbError::not_found("Product", id));
                }

                if let Some(image_url) = &input.product_image {
                    // Only one image may be linked to a product, so all
                    // existing associations go before the new one lands.
                    // Order matters: delete, then insert, same transaction.
                    sqlx::query("DELETE FROM image_to_product WHERE product_id = ?1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;

                    sqlx::query(
                        "INSERT INTO image_to_product (product_id, image_url, active) \
                         VALUES (?1, ?2, ?3)",
                    )
                    .bind(id)
                    .bind(image_url)
                    .bind(true)
                    .execute(&mut *tx)
                    .await?;
                }

                tx.commit().await?;

                Ok(ProductSaved::Updated { id })
            }

            None => {
                debug!(name = %input.name, "Creating product");

                let product = sqlx::query_as::<_, Product>(self.queries.products.add.as_sql())
                    .bind(&input.name)
                    .bind(input.service)
                    .bind(input.price)
                    .bind(input.product_group_id)
                    .bind(input.show_to_public)
                    .bind(input.user_id)
                    .fetch_one(&self.pool)
                    .await?;

                Ok(ProductSaved::Created(product))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Two groups for the products to hang off
        sqlx::query("INSERT INTO product_group (id, name) VALUES (1, 'Goods'), (2, 'Services')")
            .execute(db.pool())
            .await
            .unwrap();

        db
    }

    fn draft(name: &str, user_id: i64) -> ProductEdit {
        ProductEdit {
            id: None,
            name: name.to_string(),
            service: false,
            price: 10.0,
            product_group_id: 1,
            show_to_public: false,
            product_image: None,
            user_id,
        }
    }

    async fn create(db: &Database, name: &str, user_id: i64) -> Product {
        match db.products().edit(&draft(name, user_id)).await.unwrap() {
            ProductSaved::Created(p) => p,
            other => panic!("expected Created, got {other:?}"),
        }
    }

    async fn association_rows(db: &Database, product_id: i64) -> Vec<(i64, String, bool)> {
        sqlx::query_as("SELECT product_id, image_url, active FROM image_to_product WHERE product_id = ?1")
            .bind(product_id)
            .fetch_all(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_edit_without_id_creates_row_with_input_fields() {
        let db = test_db().await;

        let input = ProductEdit {
            id: None,
            name: "Widget".to_string(),
            service: false,
            price: 9.99,
            product_group_id: 2,
            show_to_public: true,
            product_image: None,
            user_id: 1,
        };

        let saved = db.products().edit(&input).await.unwrap();
        let ProductSaved::Created(product) = saved else {
            panic!("expected Created");
        };

        assert_eq!(product.name, "Widget");
        assert!(!product.service);
        assert_eq!(product.price, 9.99);
        assert_eq!(product.product_group_id, 2);
        assert!(product.show_to_public);
        assert_eq!(product.user_id, 1);

        // Exactly one row exists
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_all_scopes_by_user_and_orders_by_name() {
        let db = test_db().await;

        create(&db, "Zulu", 1).await;
        create(&db, "Alpha", 1).await;
        create(&db, "Mango", 2).await;

        let mine = db.products().all(1).await.unwrap();
        let names: Vec<&str> = mine.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
        assert!(mine.iter().all(|p| p.user_id == 1));
    }

    #[tokio::test]
    async fn test_list_uses_registered_statement() {
        let db = test_db().await;

        create(&db, "One", 1).await;
        create(&db, "Two", 1).await;
        create(&db, "Other", 7).await;

        let listed = db.products().list(1).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_find_missing_id_returns_none() {
        let db = test_db().await;

        let found = db.products().find(12345, 1).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_is_scoped_to_user() {
        let db = test_db().await;

        let product = create(&db, "Private", 1).await;

        assert!(db.products().find(product.id, 1).await.unwrap().is_some());
        assert!(db.products().find(product.id, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_joins_image_url() {
        let db = test_db().await;

        let product = create(&db, "Pictured", 1).await;

        let before = db.products().find(product.id, 1).await.unwrap().unwrap();
        assert_eq!(before.image_url, None);

        let mut input = draft("Pictured", 1);
        input.id = Some(product.id);
        input.product_image = Some("img/pictured.png".to_string());
        db.products().edit(&input).await.unwrap();

        let after = db.products().find(product.id, 1).await.unwrap().unwrap();
        assert_eq!(after.image_url.as_deref(), Some("img/pictured.png"));
    }

    #[tokio::test]
    async fn test_edit_with_id_updates_fields() {
        let db = test_db().await;

        let product = create(&db, "Widget", 1).await;

        let input = ProductEdit {
            id: Some(product.id),
            name: "Widget Mk2".to_string(),
            service: true,
            price: 19.5,
            product_group_id: 2,
            show_to_public: true,
            product_image: None,
            user_id: 1,
        };

        let saved = db.products().edit(&input).await.unwrap();
        assert_eq!(saved, ProductSaved::Updated { id: product.id });

        let row = db.products().find(product.id, 1).await.unwrap().unwrap();
        assert_eq!(row.name, "Widget Mk2");
        assert!(row.service);
        assert_eq!(row.price, 19.5);
        assert_eq!(row.product_group_id, 2);
        assert!(row.show_to_public);
    }

    #[tokio::test]
    async fn test_edit_without_image_leaves_associations_untouched() {
        let db = test_db().await;

        let product = create(&db, "Widget", 1).await;

        sqlx::query("INSERT INTO image_to_product (product_id, image_url, active) VALUES (?1, 'img/old.png', 1)")
            .bind(product.id)
            .execute(db.pool())
            .await
            .unwrap();

        let mut input = draft("Renamed", 1);
        input.id = Some(product.id);
        db.products().edit(&input).await.unwrap();

        let rows = association_rows(&db, product.id).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, "img/old.png");
    }

    #[tokio::test]
    async fn test_edit_with_image_replaces_all_prior_associations() {
        let db = test_db().await;

        let product = create(&db, "Widget", 1).await;

        // Two stale rows, as a historical database might have
        for url in ["img/a.png", "img/b.png"] {
            sqlx::query("INSERT INTO image_to_product (product_id, image_url, active) VALUES (?1, ?2, 1)")
                .bind(product.id)
                .bind(url)
                .execute(db.pool())
                .await
                .unwrap();
        }

        let mut input = draft("Widget", 1);
        input.id = Some(product.id);
        input.product_image = Some("img/widget.png".to_string());
        db.products().edit(&input).await.unwrap();

        let rows = association_rows(&db, product.id).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], (product.id, "img/widget.png".to_string(), true));
    }

    #[tokio::test]
    async fn test_edit_unknown_id_is_not_found() {
        let db = test_db().await;

        let mut input = draft("Ghost", 1);
        input.id = Some(999);

        let err = db.products().edit(&input).await.expect_err("must fail");
        assert!(matches!(err, DbError::NotFound { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_image_changes() {
        let db = test_db().await;

        let product = create(&db, "Widget", 1).await;

        sqlx::query("INSERT INTO image_to_product (product_id, image_url, active) VALUES (?1, 'img/keep.png', 1)")
            .bind(product.id)
            .execute(db.pool())
            .await
            .unwrap();

        // Unknown group violates the FK on the UPDATE; the whole
        // transaction must roll back, image statements included.
        let input = ProductEdit {
            id: Some(product.id),
            name: "Broken".to_string(),
            service: false,
            price: 1.0,
            product_group_id: 9999,
            show_to_public: false,
            product_image: Some("img/new.png".to_string()),
            user_id: 1,
        };

        let err = db.products().edit(&input).await.expect_err("must fail");
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "got {err:?}");

        // Product row unchanged, prior association intact
        let row = db.products().find(product.id, 1).await.unwrap().unwrap();
        assert_eq!(row.name, "Widget");
        let rows = association_rows(&db, product.id).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, "img/keep.png");
    }

    #[tokio::test]
    async fn test_product_group_list() {
        let db = test_db().await;

        let groups = db.products().product_group_list().await.unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Goods", "Services"]);
    }

    #[tokio::test]
    async fn test_spec_scenario_update_with_image() {
        let db = test_db().await;

        // Create first so an id exists, then run the documented update
        let product = create(&db, "Prototype", 1).await;

        let input = ProductEdit {
            id: Some(product.id),
            name: "Widget".to_string(),
            service: false,
            price: 9.99,
            product_group_id: 2,
            show_to_public: true,
            product_image: Some("img/widget.png".to_string()),
            user_id: 1,
        };

        db.products().edit(&input).await.unwrap();

        let row = db.products().find(product.id, 1).await.unwrap().unwrap();
        assert_eq!(row.name, "Widget");
        assert_eq!(row.price, 9.99);
        assert_eq!(row.product_group_id, 2);
        assert!(row.show_to_public);

        let rows = association_rows(&db, product.id).await;
        assert_eq!(rows, vec![(product.id, "img/widget.png".to_string(), true)]);
    }
}
