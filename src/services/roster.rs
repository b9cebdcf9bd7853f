//! Roster view: the staff page's selection rules resolved server-side

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::catalog::CatalogService;
use crate::{
    error::AppResult,
    models::{Attendee, Event, Product},
    roster,
};

/// Query parameters for the roster view
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RosterQuery {
    /// Selected event id; falls back to the default event when absent or unknown
    pub event: Option<String>,
    /// Selected class day (product) id; falls back to today's class, then the first
    pub ticket: Option<String>,
    /// Name search over children and parents
    pub q: Option<String>,
}

/// Event entry for the event picker
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventOption {
    #[serde(flatten)]
    pub event: Event,
    /// e.g. "22 Sep - 5 Dec"
    pub date_range: String,
}

/// Class day with its display label
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassDay {
    pub id: String,
    pub title: String,
    pub date: String,
    pub class_name: String,
    pub attendee_count: i64,
    /// Falls on today's day and month
    pub is_today: bool,
}

impl ClassDay {
    fn new(product: &Product, today: NaiveDate) -> Self {
        let parsed = roster::parse_product_title(&product.title, &product.description);
        let (date, class_name) = parsed.label();
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            date: date.to_string(),
            class_name: class_name.to_string(),
            attendee_count: product.attendee_count,
            is_today: parsed.falls_on(today),
        }
    }
}

/// Everything the staff page renders for one selection
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RosterView {
    pub events: Vec<EventOption>,
    pub selected_event: Option<Event>,
    pub class_days: Vec<ClassDay>,
    pub selected_class: Option<ClassDay>,
    /// Attendees of the selected class matching the search
    pub attendees: Vec<Attendee>,
    /// Attendees of the selected class before the search is applied
    pub total_attendees: usize,
    pub search: String,
}

#[derive(Clone)]
pub struct RosterService {
    catalog: CatalogService,
}

impl RosterService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    pub async fn view(
        &self,
        query: &RosterQuery,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> AppResult<RosterView> {
        let events = self.catalog.events().await?;
        let selected_event = select_event(&events, query.event.as_deref(), now).cloned();

        let products = match &selected_event {
            Some(event) => self.catalog.products(&event.id).await?,
            None => Vec::new(),
        };
        let selected_product = select_product(&products, query.ticket.as_deref(), today);

        let attendees = match selected_product {
            Some(product) => self.catalog.attendees(&product.id).await?,
            None => Vec::new(),
        };

        let search = query.q.clone().unwrap_or_default();
        let matching = roster::filter_attendees(&attendees, &search)
            .into_iter()
            .cloned()
            .collect();

        Ok(RosterView {
            events: events
                .iter()
                .map(|event| EventOption {
                    date_range: roster::format_date_range(event.start(), event.end()),
                    event: event.clone(),
                })
                .collect(),
            selected_event,
            class_days: products.iter().map(|p| ClassDay::new(p, today)).collect(),
            selected_class: selected_product.map(|p| ClassDay::new(p, today)),
            attendees: matching,
            total_attendees: attendees.len(),
            search,
        })
    }
}

/// The requested event when it exists, else the default event
fn select_event<'a>(
    events: &'a [Event],
    requested: Option<&str>,
    now: DateTime<Utc>,
) -> Option<&'a Event> {
    requested
        .and_then(|id| events.iter().find(|e| e.id == id))
        .or_else(|| roster::find_default_event(events, now))
}

/// The requested class day when it exists, else today's class, else the first
fn select_product<'a>(
    products: &'a [Product],
    requested: Option<&str>,
    today: NaiveDate,
) -> Option<&'a Product> {
    requested
        .and_then(|id| products.iter().find(|p| p.id == id))
        .or_else(|| roster::find_current_day_product(products, today))
        .or_else(|| products.first())
}
