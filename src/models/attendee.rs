//! Attendee model (a child booked onto a class day, with parent contact)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::iso_timestamp;

/// Attendee row joined with its order and question answers
#[derive(Debug, Clone, FromRow)]
pub struct AttendeeRow {
    pub id: i64,
    pub child_first_name: Option<String>,
    pub child_last_name: Option<String>,
    pub child_age: Option<String>,
    pub parent_first_name: Option<String>,
    pub parent_last_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub ticket_id: Option<String>,
}

/// Attendee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attendee {
    pub id: String,
    pub child_first_name: String,
    pub child_last_name: String,
    pub child_age: Option<String>,
    pub parent_first_name: String,
    pub parent_last_name: String,
    pub parent_email: String,
    pub parent_phone: Option<String>,
    /// Check-in time (RFC 3339, UTC)
    pub checked_in_at: Option<String>,
    /// Public ticket id
    pub ticket_id: String,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Self {
            id: row.id.to_string(),
            child_first_name: row.child_first_name.unwrap_or_default(),
            child_last_name: row.child_last_name.unwrap_or_default(),
            child_age: clean_answer(row.child_age),
            parent_first_name: row.parent_first_name.unwrap_or_default(),
            parent_last_name: row.parent_last_name.unwrap_or_default(),
            parent_email: row.parent_email.unwrap_or_default(),
            parent_phone: clean_answer(row.parent_phone),
            checked_in_at: row.checked_in_at.map(iso_timestamp),
            ticket_id: row.ticket_id.unwrap_or_default(),
        }
    }
}

impl Attendee {
    pub fn child_name(&self) -> String {
        format!("{} {}", self.child_first_name, self.child_last_name)
    }

    pub fn parent_name(&self) -> String {
        format!("{} {}", self.parent_first_name, self.parent_last_name)
    }
}

/// Answers are stored JSON-encoded, so strip the quote characters.
/// An empty answer counts as no answer.
fn clean_answer(answer: Option<String>) -> Option<String> {
    answer
        .filter(|a| !a.is_empty())
        .map(|a| a.replace(['\'', '"'], ""))
}
