//! Product repository.

use sqlx::PgPool;

use argos_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch};

/// Repository for catalog operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, active, created_at, updated_at
            FROM argos.product
            WHERE active
            ORDER BY name, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, price, active, created_at, updated_at
            FROM argos.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Create an active product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewProduct<'_>) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO argos.product (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price, active, created_at, updated_at
            ",
        )
        .bind(new.name)
        .bind(new.price)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update.
    ///
    /// Returns `None` if no product has this ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE argos.product
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                active = COALESCE($4, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, active, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(patch.active)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }
}
