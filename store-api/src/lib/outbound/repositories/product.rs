use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ListProductsQuery;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Product {
        Product {
            id: ProductId(row.get("id")),
            name: row.get("name"),
            price: row.get("price"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.map(Self::row_to_product))
    }

    async fn find_all(&self, query: &ListProductsQuery) -> Result<Vec<Product>, ProductError> {
        // Sort direction comes from a closed enum, never from raw input
        let mut sql = format!(
            "SELECT id, name, price, created_at FROM products ORDER BY created_at {}",
            query.sort.as_sql()
        );
        let window = match query.window() {
            Some((offset, limit)) => match bind_window(offset, limit) {
                Some(window) => Some(window),
                // Offset lies past any row Postgres can address
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        if window.is_some() {
            sql.push_str(" LIMIT $1 OFFSET $2");
        }

        let mut statement = sqlx::query(&sql);
        if let Some((offset, limit)) = window {
            statement = statement.bind(limit).bind(offset);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_product).collect())
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.price)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Convert a page window into `(offset, limit)` bind values for Postgres `BIGINT`.
fn bind_window(offset: u64, limit: u64) -> Option<(i64, i64)> {
    Some((i64::try_from(offset).ok()?, i64::try_from(limit).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::models::SortOrder;

    #[test]
    fn test_bind_window() {
        assert_eq!(bind_window(20, 10), Some((20, 10)));
    }

    #[test]
    fn test_bind_window_for_largest_page_is_empty() {
        let query = ListProductsQuery {
            page: u32::MAX,
            limit: u32::MAX,
            sort: SortOrder::Asc,
        };

        let (offset, limit) = query.window().unwrap();
        assert_eq!(bind_window(offset, limit), None);
    }
}
