//! Catalog service: events, class days and their attendees

use crate::{
    error::{AppError, AppResult},
    models::{Attendee, Event, Product},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Live events, most recent first
    pub async fn events(&self) -> AppResult<Vec<Event>> {
        let rows = self.repository.events.list_live().await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Class days of an event
    pub async fn products(&self, event_id: &str) -> AppResult<Vec<Product>> {
        let event_id = parse_id(event_id, "eventId")?;
        let rows = self.repository.products.list_for_event(event_id).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Attendees booked onto a class day
    pub async fn attendees(&self, product_id: &str) -> AppResult<Vec<Attendee>> {
        let product_id = parse_id(product_id, "productId")?;
        let rows = self.repository.attendees.list_for_product(product_id).await?;
        tracing::debug!("Loaded {} attendees for product {}", rows.len(), product_id);
        Ok(rows.into_iter().map(Attendee::from).collect())
    }
}

pub(crate) fn parse_id(value: &str, name: &str) -> AppResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))
}
