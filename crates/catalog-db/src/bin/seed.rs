//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog and prints the price
//! breakdown of every product.
//!
//! ## Usage
//! ```bash
//! # Seed ./catalog_dev.db (or $CATALOG_DB_PATH)
//! cargo run -p catalog-db --bin seed
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//!
//! # Only print breakdowns for what is already stored
//! cargo run -p catalog-db --bin seed -- --report
//! ```
//!
//! ## Generated Catalog
//! - Electronics (10 % off)
//! - Books (5.00 off above 100.00)
//! - Groceries (no discount)
//! - a few uncategorised products

use std::env;

use catalog_core::export::export_category_csv;
use catalog_core::pricing::{CategoryDiscountResolver, PriceCalculator};
use catalog_core::statistics;
use catalog_core::Product;
use catalog_db::{generate_id, CatalogConfig, Database};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (category, [(product, price)]).
const CATALOG: &[(&str, &[(&str, f64)])] = &[
    (
        "Electronics",
        &[
            ("Laptop Pro 14", 1299.0),
            ("Wireless Mouse", 25.5),
            ("USB-C Cable, 2m", 9.9),
            ("Noise Cancelling Headphones", 249.99),
        ],
    ),
    (
        "Books",
        &[
            ("Rust in Action", 45.0),
            ("World Atlas", 150.0),
            ("Encyclopedia Set", 100.0),
            ("Pocket Dictionary", 3.0),
        ],
    ),
    (
        "Groceries",
        &[("Coffee Beans 1kg", 18.75), ("Olive Oil", 1.005)],
    ),
];

/// Products without a category.
const UNCATEGORISED: &[(&str, f64)] = &[("Gift Card", 50.0), ("Refund Voucher", -10.0)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CatalogConfig::load()?;
    init_tracing(&config.log_filter);

    let args: Vec<String> = env::args().collect();
    let mut report_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.db_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--report" | "-r" => report_only = true,
            "--help" | "-h" => {
                println!("Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $CATALOG_DB_PATH or ./catalog_dev.db)");
                println!("  -r, --report       Skip seeding, only print price breakdowns");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Catalog Seed Data Generator");
    println!("===========================");
    println!("Database: {}", config.db_path.display());
    println!();

    let db = Database::new(config.db_config()).await?;

    let existing = db.products().count().await?;
    if report_only {
        info!("Report only, skipping seed");
    } else if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        seed(&db).await?;
    }

    report(&db, &config).await?;

    db.close().await;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_filter},sqlx=warn")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn seed(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut generated = 0;

    for (category_name, products) in CATALOG {
        let category = db.categories().insert(category_name).await?;

        for (name, price) in products.iter() {
            let product = Product::new(generate_id(), *name, *price).with_category(category.to_ref());
            db.products().insert(&product).await?;
            generated += 1;
        }
    }

    for (name, price) in UNCATEGORISED {
        db.products()
            .insert(&Product::new(generate_id(), *name, *price))
            .await?;
        generated += 1;
    }

    println!("✓ Seeded {} products", generated);
    Ok(())
}

async fn report(db: &Database, config: &CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let discounts = CategoryDiscountResolver::default();
    println!();
    println!("Discount rules");
    println!("--------------");
    for rule in discounts.rules() {
        match rule.min_base_price {
            Some(min) => println!("  {}: {:?} above {:.2}", rule.category, rule.policy, min),
            None => println!("  {}: {:?}", rule.category, rule.policy),
        }
    }

    let calculator = PriceCalculator::new(db.products(), discounts, config.tax_resolver());

    let products = db.products().list().await?;

    println!();
    println!("Price breakdowns");
    println!("----------------");
    for product in &products {
        match calculator.calculate_price_details(&product.id).await {
            Ok(breakdown) => println!("{}: {}", product.name, serde_json::to_string(&breakdown)?),
            Err(e) => warn!(product_id = %product.id, error = %e, "Cannot price product"),
        }
    }

    println!();
    println!("Statistics");
    println!("----------");
    for (category, count) in statistics::count_per_category(&products) {
        println!("  {category}: {count} products");
    }
    println!("  Average price: {}", statistics::average_price(&products));
    if let Some(top) = statistics::most_expensive(&products) {
        println!("  Most expensive: {} ({})", top.name, top.price);
    }

    for category in db.categories().list().await? {
        let in_category = db.products().list_by_category(&category.id).await?;
        println!();
        print!("{}", export_category_csv(&category, &in_category));
    }

    Ok(())
}
