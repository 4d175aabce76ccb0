//! # Seed Data Generator
//!
//! Populates a development database with sample business data.
//!
//! ## Usage
//! ```bash
//! cargo run -p kontor-db --bin seed
//!
//! # Specify database path
//! cargo run -p kontor-db --bin seed -- --db ./data/kontor.db
//! ```
//!
//! ## Generated Data
//! - Product groups and products (goods and services)
//! - Contractor groups and contractors
//! - A handful of documents with matching store and finance operations
//!
//! Everything is owned by user 1.

use std::env;

use chrono::NaiveDate;
use kontor_core::{ContractorEdit, NewDocument, NewFinanceOperation, NewStoreOperation, ProductEdit};
use kontor_db::{ContractorSaved, Database, DbConfig, ProductSaved};

/// Owner of all seeded rows.
const SEED_USER: i64 = 1;

/// Sample products: (name, service, price, group index, public)
const PRODUCTS: &[(&str, bool, f64, usize, bool)] = &[
    ("Office chair", false, 89.90, 0, true),
    ("Standing desk", false, 249.00, 0, true),
    ("Desk lamp", false, 19.99, 0, true),
    ("Monitor arm", false, 34.50, 0, false),
    ("Cable tray", false, 12.00, 0, false),
    ("Assembly", true, 25.00, 1, true),
    ("Delivery", true, 15.00, 1, true),
    ("Disposal of old furniture", true, 10.00, 1, false),
];

/// Sample contractors: (name, group index, phone)
const CONTRACTORS: &[(&str, usize, Option<&str>)] = &[
    ("Nordfjell Wholesale", 0, Some("+47-555-0101")),
    ("Brenner & Sons", 0, None),
    ("Cityline Interiors", 1, Some("+47-555-0188")),
    ("Halvorsen Office Supplies", 1, None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kontor_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kontor Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kontor_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kontor Seed Data Generator");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed twice
    let existing = db.products().all(SEED_USER).await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Groups first, products and contractors hang off them
    let mut product_groups = Vec::new();
    for name in ["Furniture", "Services"] {
        let id: i64 = sqlx::query_scalar("INSERT INTO product_group (name) VALUES (?1) RETURNING id")
            .bind(name)
            .fetch_one(db.pool())
            .await?;
        product_groups.push(id);
    }

    let mut contractor_groups = Vec::new();
    for name in ["Suppliers", "Customers"] {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO contractor_group (name) VALUES (?1) RETURNING id")
                .bind(name)
                .fetch_one(db.pool())
                .await?;
        contractor_groups.push(id);
    }

    println!("✓ Created {} product groups, {} contractor groups",
        product_groups.len(), contractor_groups.len());

    let mut product_ids = Vec::new();
    for (name, service, price, group, public) in PRODUCTS {
        let saved = db
            .products()
            .edit(&ProductEdit {
                id: None,
                name: name.to_string(),
                service: *service,
                price: *price,
                product_group_id: product_groups[*group],
                show_to_public: *public,
                product_image: None,
                user_id: SEED_USER,
            })
            .await?;
        if let ProductSaved::Created(product) = saved {
            product_ids.push(product.id);
        }
    }
    println!("✓ Created {} products", product_ids.len());

    let mut contractor_ids = Vec::new();
    for (name, group, phone) in CONTRACTORS {
        let saved = db
            .contractors()
            .edit(&ContractorEdit {
                id: None,
                name: name.to_string(),
                contractor_group_id: contractor_groups[*group],
                phone: phone.map(str::to_string),
                email: None,
                user_id: SEED_USER,
            })
            .await?;
        if let ContractorSaved::Created(contractor) = saved {
            contractor_ids.push(contractor.id);
        }
    }
    println!("✓ Created {} contractors", contractor_ids.len());

    // A purchase document bringing goods in, with the matching store and
    // finance movements
    let purchase = db
        .documents()
        .add(&NewDocument {
            document_type_id: 1,
            contractor_id: contractor_ids[0],
            payment_method_id: 2,
            total: 1740.40,
            note: Some("Initial stock".to_string()),
            doc_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            user_id: SEED_USER,
        })
        .await?;

    for product_id in product_ids.iter().take(5) {
        db.store()
            .add(&NewStoreOperation {
                product_id: *product_id,
                document_id: Some(purchase.id),
                quantity: 10.0,
                op_date: purchase.doc_date,
                user_id: SEED_USER,
            })
            .await?;
    }

    db.finances()
        .add(&NewFinanceOperation {
            document_id: Some(purchase.id),
            amount: -purchase.total,
            op_date: purchase.doc_date,
            note: Some("Payment for initial stock".to_string()),
            user_id: SEED_USER,
        })
        .await?;

    println!("✓ Created purchase document {} with store and finance operations", purchase.id);

    let report = db.reports().products_balance_list(SEED_USER).await?;
    println!();
    println!("Products balance:");
    for line in &report {
        println!("  {:<30} {:>8.1}", line.name, line.balance);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
