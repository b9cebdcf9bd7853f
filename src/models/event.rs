//! Event model (a term or camp grouping class days)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::iso_timestamp;

/// Event row as selected from the `events` table
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub title: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Started within the last 14 days and not yet ended
    pub is_current: bool,
}

/// Event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Start date (RFC 3339, UTC)
    pub start_date: Option<String>,
    /// End date (RFC 3339, UTC)
    pub end_date: Option<String>,
    pub is_current: bool,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            start_date: row.start_date.map(iso_timestamp),
            end_date: row.end_date.map(iso_timestamp),
            is_current: row.is_current,
        }
    }
}

impl Event {
    pub fn start(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.start_date.as_deref())
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.end_date.as_deref())
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
