//! Attendees repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::AttendeeRow,
};

#[derive(Clone)]
pub struct AttendeesRepository {
    pool: Pool<Postgres>,
}

impl AttendeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the attendees of a class day, by child last name then first name.
    ///
    /// The age and phone questions differ per event, so they are located by
    /// title: age is a per-attendee answer to a PRODUCT question mentioning
    /// "age", phone a per-order answer to an ORDER question mentioning
    /// "phone". Siblings in one order share the phone answer.
    pub async fn list_for_product(&self, product_id: i64) -> AppResult<Vec<AttendeeRow>> {
        sqlx::query_as::<_, AttendeeRow>(
            r#"
            WITH product_event AS (
                SELECT p.id, p.event_id
                FROM products p
                JOIN events e ON e.id = p.event_id
                WHERE p.id = $1
                  AND p.deleted_at IS NULL
                  AND e.deleted_at IS NULL
            ),
            age_question AS (
                SELECT q.id
                FROM questions q, product_event pe
                WHERE q.event_id = pe.event_id
                  AND q.belongs_to = 'PRODUCT'
                  AND q.title ILIKE '%age%'
                  AND q.deleted_at IS NULL
                ORDER BY q.id
                LIMIT 1
            ),
            phone_question AS (
                SELECT q.id
                FROM questions q, product_event pe
                WHERE q.event_id = pe.event_id
                  AND q.belongs_to = 'ORDER'
                  AND q.title ILIKE '%phone%'
                  AND q.deleted_at IS NULL
                ORDER BY q.id
                LIMIT 1
            )
            SELECT
                a.id::bigint AS id,
                a.first_name AS child_first_name,
                a.last_name AS child_last_name,
                age_answer.answer::text AS child_age,
                o.first_name AS parent_first_name,
                o.last_name AS parent_last_name,
                o.email AS parent_email,
                phone_answer.answer::text AS parent_phone,
                a.checked_in_at::timestamptz AS checked_in_at,
                a.public_id AS ticket_id
            FROM attendees a
            JOIN product_event pe ON a.product_id = pe.id
            JOIN orders o ON a.order_id = o.id
            LEFT JOIN age_question aq ON true
            LEFT JOIN phone_question pq ON true
            LEFT JOIN question_answers age_answer ON (
                age_answer.attendee_id = a.id
                AND age_answer.question_id = aq.id
                AND age_answer.deleted_at IS NULL
            )
            LEFT JOIN question_answers phone_answer ON (
                phone_answer.order_id = o.id
                AND phone_answer.question_id = pq.id
                AND phone_answer.attendee_id IS NULL
                AND phone_answer.deleted_at IS NULL
            )
            WHERE a.deleted_at IS NULL
              AND o.deleted_at IS NULL
              AND o.status = 'COMPLETED'
            ORDER BY a.last_name, a.first_name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::query("Failed to fetch attendees"))
    }
}
