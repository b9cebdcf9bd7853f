//! Class-day title parsing and roster selection rules
//!
//! Class titles are written by hand in the ticketing system, typically
//! `"Mon 22 Sep - Pizza Pillows"`, with the class name bolded in the HTML
//! description. Titles that carry no recognisable date (whole-term classes)
//! are shown as-is.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Attendee, Event, Product};

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Day name, day number and month: "Mon 22 Sep", "Thursday 2nd October"
static DAY_NAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+)")
        .expect("valid day-name pattern")
});

/// Day number and month name anywhere in the title: "Pottery 22 Sep"
static DATE_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b")
        .expect("valid date-month pattern")
});

static BOLD_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)>").expect("valid bold pattern")
});

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Outcome of parsing a class-day title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTitle {
    Date {
        /// The date as written in the title
        date: String,
        /// Bolded class name from the description, or empty
        class_name: String,
        /// Day of month
        day: u32,
        /// Three-letter lower-case month, e.g. "sep"
        month: String,
    },
    Term {
        title: String,
    },
}

impl ParsedTitle {
    /// `(date, class name)` pair shown on the class-day buttons
    pub fn label(&self) -> (&str, &str) {
        match self {
            ParsedTitle::Date { date, class_name, .. } => (date.as_str(), class_name.as_str()),
            ParsedTitle::Term { title } => (title.as_str(), ""),
        }
    }

    /// Whether this class falls on the same day and month as `date`.
    /// Titles carry no year, so neither does the comparison.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        match self {
            ParsedTitle::Date { day, month, .. } => {
                *day == date.day() && month.as_str() == month_abbrev(date.month())
            }
            ParsedTitle::Term { .. } => false,
        }
    }
}

fn month_abbrev(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .map(|name| &name[..3])
        .unwrap_or("")
}

/// Resolve a month word ("Sep", "Sept", "September") to its abbreviation
fn month_from_word(word: &str) -> Option<&'static str> {
    let word = word.to_ascii_lowercase();
    if word.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .find(|name| name.starts_with(word.as_str()))
        .map(|name| &name[..3])
}

/// Extract the first bolded fragment of a description as plain text
pub fn extract_class_name(description: &str) -> String {
    BOLD_FRAGMENT
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|inner| {
            HTML_TAG
                .replace_all(inner.as_str(), "")
                .replace("&amp;", "&")
                .replace("&nbsp;", " ")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// `(matched date, day number, month abbreviation)` from a date capture
fn date_parts<'t>(caps: &regex::Captures<'t>) -> Option<(&'t str, &'t str, &'static str)> {
    let month = month_from_word(caps.get(2)?.as_str())?;
    Some((caps.get(0)?.as_str(), caps.get(1)?.as_str(), month))
}

/// Parse a class-day title, falling back to the raw title
pub fn parse_product_title(title: &str, description: &str) -> ParsedTitle {
    let title = title.trim();

    // Words like "Octopus" or "Marbling" also match the month pattern, so
    // keep scanning until a match resolves to a real month.
    let found = DAY_NAME_DATE
        .captures(title)
        .and_then(|caps| date_parts(&caps))
        .or_else(|| {
            DATE_MONTH
                .captures_iter(title)
                .find_map(|caps| date_parts(&caps))
        });

    match found.and_then(|(date, day, month)| Some((date, day.parse::<u32>().ok()?, month))) {
        Some((date, day, month)) => ParsedTitle::Date {
            date: date.to_string(),
            class_name: extract_class_name(description),
            day,
            month: month.to_string(),
        },
        None => ParsedTitle::Term {
            title: title.to_string(),
        },
    }
}

/// The class day whose title matches `today`'s day and month, if any
pub fn find_current_day_product(products: &[Product], today: NaiveDate) -> Option<&Product> {
    products
        .iter()
        .find(|p| parse_product_title(&p.title, &p.description).falls_on(today))
}

/// Pick the event to open when none is requested: the current event, else
/// the soonest upcoming one, else the first listed (most recent start).
pub fn find_default_event(events: &[Event], now: DateTime<Utc>) -> Option<&Event> {
    if let Some(current) = events.iter().find(|e| e.is_current) {
        return Some(current);
    }

    events
        .iter()
        .filter_map(|e| e.start().filter(|start| *start > now).map(|start| (start, e)))
        .min_by_key(|(start, _)| *start)
        .map(|(_, e)| e)
        .or_else(|| events.first())
}

/// Case-insensitive search over child and parent names
pub fn filter_attendees<'a>(attendees: &'a [Attendee], term: &str) -> Vec<&'a Attendee> {
    let term = term.trim().to_lowercase();
    attendees
        .iter()
        .filter(|a| {
            term.is_empty()
                || a.child_name().to_lowercase().contains(&term)
                || a.parent_name().to_lowercase().contains(&term)
        })
        .collect()
}

/// "22 Sep" or "22 Sep - 5 Dec"; empty without a start date
pub fn format_date_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> String {
    let Some(start) = start else {
        return String::new();
    };
    match end {
        Some(end) => format!("{} - {}", start.format("%-d %b"), end.format("%-d %b")),
        None => start.format("%-d %b").to_string(),
    }
}
