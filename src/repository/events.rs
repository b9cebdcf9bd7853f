//! Events repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::EventRow,
};

#[derive(Clone)]
pub struct EventsRepository {
    pool: Pool<Postgres>,
}

impl EventsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List live events, most recent start first.
    ///
    /// An event is current when it started within the last 14 days and has
    /// no end date or ends in the future.
    pub async fn list_live(&self) -> AppResult<Vec<EventRow>> {
        sqlx::query_as::<_, EventRow>(
            r#"
            SELECT
                id::bigint AS id,
                title,
                start_date::timestamptz AS start_date,
                end_date::timestamptz AS end_date,
                COALESCE(
                    start_date >= NOW() - INTERVAL '14 days'
                        AND (end_date IS NULL OR end_date >= NOW()),
                    false
                ) AS is_current
            FROM events
            WHERE deleted_at IS NULL
              AND status = 'LIVE'
            ORDER BY start_date DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::query("Failed to fetch events"))
    }
}
