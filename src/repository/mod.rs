//! Repository layer for read-only queries against the attendance database
//!
//! The tables are owned by the upstream ticketing system. Every query
//! excludes soft-deleted rows and only counts attendees of completed orders.

pub mod attendees;
pub mod events;
pub mod products;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub events: events::EventsRepository,
    pub products: products::ProductsRepository,
    pub attendees: attendees::AttendeesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            events: events::EventsRepository::new(pool.clone()),
            products: products::ProductsRepository::new(pool.clone()),
            attendees: attendees::AttendeesRepository::new(pool.clone()),
            pool,
        }
    }
}
