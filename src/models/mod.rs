//! Data models for the attendance database and the JSON API

pub mod attendee;
pub mod event;
pub mod product;

pub use attendee::{Attendee, AttendeeRow};
pub use event::{Event, EventRow};
pub use product::{Product, ProductRow};

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamps go over the wire as `2025-09-22T00:00:00.000Z`
pub(crate) fn iso_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
