//! Product repository for catalog operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::Product;

/// Launch catalog, inserted once into an empty products table.
const SEED_PRODUCTS: &[(&str, &str, f64, &str, &str)] = &[
    (
        "Classic White Tee",
        "Premium cotton t-shirt, perfect for custom AI designs.",
        29.99,
        "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        "Best Seller",
    ),
    (
        "Urban Hoodie",
        "Cozy and stylish hoodie for street look.",
        59.99,
        "https://images.unsplash.com/photo-1556905055-8f358a7a47b2?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        "Winter",
    ),
    (
        "Canvas Tote",
        "Eco-friendly tote bag with durable print area.",
        19.99,
        "https://images.unsplash.com/photo-1544816155-12df9643f363?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        "Eco",
    ),
    (
        "Ceramic Mug",
        "Classic 11oz mug for your morning coffee.",
        14.99,
        "https://images.unsplash.com/photo-1514228742587-6b1558fcca3d?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
        "Home",
    ),
];

/// Product repository for database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_url, tag, created_at
            FROM products
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Count catalog items
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }

    /// Seed the launch catalog when the table is empty.
    ///
    /// Returns how many items were inserted (zero when the catalog
    /// already has content).
    pub async fn seed_initial(&self) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }

        for (name, description, price, image_url, tag) in SEED_PRODUCTS {
            sqlx::query(
                r#"
                INSERT INTO products (name, description, price, image_url, tag)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(name)
            .bind(description)
            .bind(price)
            .bind(image_url)
            .bind(tag)
            .execute(&self.pool)
            .await?;
        }

        info!("Initial products seeded");
        Ok(SEED_PRODUCTS.len())
    }
}
