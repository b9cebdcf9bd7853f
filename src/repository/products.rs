//! Products (class days) repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::ProductRow,
};

#[derive(Clone)]
pub struct ProductsRepository {
    pool: Pool<Postgres>,
}

impl ProductsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the class days of an event with their completed-attendee counts
    pub async fn list_for_event(&self, event_id: i64) -> AppResult<Vec<ProductRow>> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            WITH attendee_counts AS (
                SELECT a.product_id, COUNT(*) AS total
                FROM attendees a
                JOIN orders o ON a.order_id = o.id
                WHERE a.deleted_at IS NULL
                  AND o.deleted_at IS NULL
                  AND o.status = 'COMPLETED'
                  AND a.product_id IN (
                      SELECT id FROM products
                      WHERE event_id = $1 AND deleted_at IS NULL
                  )
                GROUP BY a.product_id
            )
            SELECT
                p.id::bigint AS id,
                p.title,
                p.description,
                COALESCE(ac.total, 0)::bigint AS attendee_count
            FROM products p
            JOIN events e ON e.id = p.event_id
            LEFT JOIN attendee_counts ac ON p.id = ac.product_id
            WHERE p.event_id = $1
              AND p.deleted_at IS NULL
              AND e.deleted_at IS NULL
            ORDER BY p.id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::query("Failed to fetch products"))
    }
}
