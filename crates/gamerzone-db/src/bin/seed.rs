//! # Seed Data Loader
//!
//! Populates a database with the sample Gamer Zone catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p gamerzone-db --bin seed
//!
//! # Specify database path
//! cargo run -p gamerzone-db --bin seed -- --db ./data/gamerzone.db
//! ```
//!
//! ## Loaded Data
//! - The eight-product launch catalog (Consolas, Juegos, Accesorios)
//! - The three launch-promo discount codes (GAMER10, GAMER20, DUOC50)
//!
//! Seeding is skipped when the catalog already has products, so running it
//! against an existing database is safe.

use std::env;

use gamerzone_core::{DiscountCode, Product};
use gamerzone_db::repository::product::COLLECTION as PRODUCTS;
use gamerzone_db::{Database, DbConfig, DocStore};

struct SeedProduct {
    name: &'static str,
    price: f64,
    category: &'static str,
    description: &'static str,
    image_url: &'static str,
    stock: i64,
    rating: f64,
    review_count: i64,
}

/// The launch catalog.
const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        name: "PlayStation 5",
        price: 599990.0,
        category: "Consolas",
        description: "Consola de última generación con gráficos 4K y SSD ultrarrápido",
        image_url: "https://i.imgur.com/8JYrs6D.png",
        stock: 10,
        rating: 4.8,
        review_count: 1250,
    },
    SeedProduct {
        name: "Xbox Series X",
        price: 549990.0,
        category: "Consolas",
        description: "La Xbox más potente con rendimiento 4K real",
        image_url: "https://i.imgur.com/xq6sZHL.png",
        stock: 8,
        rating: 4.7,
        review_count: 980,
    },
    SeedProduct {
        name: "Nintendo Switch OLED",
        price: 399990.0,
        category: "Consolas",
        description: "Consola híbrida con pantalla OLED de 7 pulgadas",
        image_url: "https://i.imgur.com/n7u9s1T.png",
        stock: 15,
        rating: 4.9,
        review_count: 2100,
    },
    SeedProduct {
        name: "The Last of Us Part II",
        price: 39990.0,
        category: "Juegos",
        description: "Aventura épica exclusiva de PlayStation",
        image_url: "https://i.imgur.com/bqClxhV.png",
        stock: 25,
        rating: 4.9,
        review_count: 5600,
    },
    SeedProduct {
        name: "Zelda: Tears of the Kingdom",
        price: 59990.0,
        category: "Juegos",
        description: "La secuela épica de Breath of the Wild",
        image_url: "https://i.imgur.com/RZGj9nZ.png",
        stock: 20,
        rating: 5.0,
        review_count: 8900,
    },
    SeedProduct {
        name: "Control DualSense",
        price: 69990.0,
        category: "Accesorios",
        description: "Control inalámbrico con respuesta háptica",
        image_url: "https://i.imgur.com/nVGz5Gk.png",
        stock: 30,
        rating: 4.6,
        review_count: 3200,
    },
    SeedProduct {
        name: "Auriculares Gaming RGB",
        price: 89990.0,
        category: "Accesorios",
        description: "Auriculares con sonido envolvente 7.1 y micrófono",
        image_url: "https://i.imgur.com/xZnqJKM.png",
        stock: 18,
        rating: 4.5,
        review_count: 1800,
    },
    SeedProduct {
        name: "Teclado Mecánico RGB",
        price: 129990.0,
        category: "Accesorios",
        description: "Teclado mecánico para gaming con switches Cherry MX",
        image_url: "https://i.imgur.com/QK5xJlM.png",
        stock: 12,
        rating: 4.7,
        review_count: 2400,
    },
];

/// Launch-promo codes, mirrored by the offline fallback table.
const PROMO_CODES: &[(&str, f64, &str)] = &[
    ("GAMER10", 10.0, "10% de descuento de lanzamiento"),
    ("GAMER20", 20.0, "20% de descuento de lanzamiento"),
    ("DUOC50", 50.0, "50% de descuento para estudiantes"),
];

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gamerzone=trace` - Show trace for gamerzone crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,gamerzone=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./gamerzone_dev.db");

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
                println!("Gamer Zone Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./gamerzone_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Gamer Zone Seed Data Loader");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if the catalog is already populated
    let store = DocStore::new(db.pool().clone());
    let existing = store.count(PRODUCTS).await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Loading catalog...");

    let products = db.products();
    for seed in CATALOG {
        let product = Product {
            id: String::new(),
            name: seed.name.to_string(),
            price: seed.price,
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            image_url: seed.image_url.to_string(),
            stock: seed.stock,
            rating: seed.rating,
            review_count: seed.review_count,
        };

        let id = products.create(&product).await?;
        println!("  + {} [{}] ({})", seed.name, seed.category, id);
    }

    println!();
    println!("Loading discount codes...");

    let discounts = db.discounts();
    for (code, pct, description) in PROMO_CODES {
        let discount = DiscountCode {
            id: String::new(),
            code: code.to_string(),
            discount_percentage: *pct,
            is_active: true,
            description: description.to_string(),
            expiration_date: String::new(),
            usage_limit: -1,
            usage_count: 0,
        };

        discounts.create(&discount).await?;
        println!("  + {} ({}%)", code, pct);
    }

    println!();
    println!(
        "✓ Seed complete: {} products, {} codes",
        CATALOG.len(),
        PROMO_CODES.len()
    );

    Ok(())
}
