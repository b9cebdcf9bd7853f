//! Product model (a single scheduled class day)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Product row with its completed-attendee count
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub attendee_count: i64,
}

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    /// Usually an encoded date, e.g. "Mon 22 Sep - Pizza Pillows"
    pub title: String,
    /// HTML; the class name is the first bolded fragment
    pub description: String,
    pub attendee_count: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            description: row.description.unwrap_or_default(),
            attendee_count: row.attendee_count,
        }
    }
}

/// Query parameters for products
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Event whose class days to list
    pub event_id: Option<String>,
}
