//! Postgres-backed product store over the `products` table.

use chrono::{DateTime, Utc};
use gymcat_core::{Nutrition, Product, ProductType};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::store::ProductStore;
use crate::DbError;

/// A row from the `products` table. `price` and `rating` map to fixed-scale
/// `NUMERIC(10,2)` and `NUMERIC(2,1)` columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub flavour: String,
    pub product_type: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub nutrition: Option<Json<Nutrition>>,
    pub rating: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let product_type = row
            .product_type
            .parse::<ProductType>()
            .map_err(DbError::InvalidRow)?;
        Ok(Product {
            flavour: row.flavour,
            product_type,
            price: row.price,
            description: row.description,
            ingredients: row.ingredients,
            benefits: row.benefits,
            nutrition: row.nutrition.map(|Json(n)| n),
            rating: row.rating,
        })
    }
}

/// [`ProductStore`] over a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the stored row for `flavour`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails.
    pub async fn get_row(&self, flavour: &str) -> Result<Option<ProductRow>, DbError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, flavour, product_type, price, description, \
                    ingredients, benefits, nutrition, rating, \
                    created_at, updated_at \
             FROM products \
             WHERE flavour = $1",
        )
        .bind(flavour)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists every stored product ordered by flavour.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlx`] if the query fails, or
    /// [`DbError::InvalidRow`] if a stored type label is unknown.
    pub async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, flavour, product_type, price, description, \
                    ingredients, benefits, nutrition, rating, \
                    created_at, updated_at \
             FROM products \
             ORDER BY flavour",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

impl ProductStore for PgProductStore {
    async fn find_by_flavour(&self, flavour: &str) -> Result<Option<Product>, DbError> {
        self.get_row(flavour).await?.map(Product::try_from).transpose()
    }

    async fn insert_product(&self, product: &Product) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO products \
                 (flavour, product_type, price, description, ingredients, benefits, \
                  nutrition, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&product.flavour)
        .bind(product.product_type.as_str())
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.ingredients)
        .bind(&product.benefits)
        .bind(product.nutrition.map(Json))
        .bind(product.rating)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE products SET \
                 product_type = $2, \
                 price        = $3, \
                 description  = $4, \
                 ingredients  = $5, \
                 benefits     = $6, \
                 nutrition    = $7, \
                 rating       = $8, \
                 updated_at   = NOW() \
             WHERE flavour = $1",
        )
        .bind(&product.flavour)
        .bind(product.product_type.as_str())
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.ingredients)
        .bind(&product.benefits)
        .bind(product.nutrition.map(Json))
        .bind(product.rating)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::InvalidRow(format!(
                "no stored product with flavour \"{}\"",
                product.flavour
            )));
        }
        Ok(())
    }
}
