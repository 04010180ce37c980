use std::sync::Arc;

use bodega_core::{ServiceError, new_id, now_rfc3339};
use bodega_sql::{Row, SQLStore, Value};

use crate::model::Product;

/// Products service — owns the SQL store and the product operations.
pub struct ProductService {
    sql: Arc<dyn SQLStore>,
}

impl ProductService {
    pub fn new(sql: Arc<dyn SQLStore>) -> Self {
        Self { sql }
    }

    /// Create the products table if it does not exist.
    ///
    /// Idempotent. Exposed as an explicit operation instead of running at
    /// startup, so a fresh deployment migrates on request.
    pub fn migrate(&self) -> Result<(), ServiceError> {
        self.sql
            .exec(
                "CREATE TABLE IF NOT EXISTS products (
                    id TEXT PRIMARY KEY,
                    code TEXT NOT NULL,
                    price INTEGER NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Insert a new product with a generated id and timestamps.
    pub fn register(&self, code: String, price: u64) -> Result<Product, ServiceError> {
        let stored_price = price_column(price)?;
        let now = now_rfc3339();
        let product = Product {
            id: new_id(),
            code,
            price,
            created_at: now.clone(),
            updated_at: now,
        };

        self.sql
            .exec(
                "INSERT INTO products (id, code, price, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(product.id.clone()),
                    Value::Text(product.code.clone()),
                    Value::Integer(stored_price),
                    Value::Text(product.created_at.clone()),
                    Value::Text(product.updated_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    ServiceError::Conflict(msg)
                } else {
                    ServiceError::Storage(msg)
                }
            })?;

        Ok(product)
    }

    /// Load a product by id.
    pub fn get(&self, id: &str) -> Result<Product, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT id, code, price, created_at, updated_at FROM products WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("product '{}' not found", id)))?;

        product_from_row(row)
    }

    /// Set a product's price. The row must exist.
    pub fn update_price(&self, id: &str, price: u64) -> Result<(), ServiceError> {
        let stored_price = price_column(price)?;
        let affected = self
            .sql
            .exec(
                "UPDATE products SET price = ?1, updated_at = ?2 WHERE id = ?3",
                &[
                    Value::Integer(stored_price),
                    Value::Text(now_rfc3339()),
                    Value::Text(id.to_string()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("product '{}' not found", id)));
        }
        Ok(())
    }

    /// Delete a product by id.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let affected = self
            .sql
            .exec(
                "DELETE FROM products WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("product '{}' not found", id)));
        }
        Ok(())
    }
}

/// SQLite stores integers as i64. Prices beyond that range would wrap on
/// insert and fail to load back, so they are rejected up front.
fn price_column(price: u64) -> Result<i64, ServiceError> {
    i64::try_from(price).map_err(|_| ServiceError::Validation("price out of range".to_string()))
}

fn product_from_row(row: &Row) -> Result<Product, ServiceError> {
    let text = |name: &str| -> Result<String, ServiceError> {
        row.get_str(name)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Internal(format!("missing {} column", name)))
    };

    Ok(Product {
        id: text("id")?,
        code: text("code")?,
        price: row
            .get_u64("price")
            .ok_or_else(|| ServiceError::Internal("missing price column".into()))?,
        created_at: text("created_at")?,
        updated_at: text("updated_at")?,
    })
}
