//! Wire-format records and their normalization into model types.
//!
//! The backend serves prices, events, and per-type change-point dates as
//! JSON with ISO 8601 date strings. Normalization is lenient: a record
//! whose date fails to parse (or whose price is not a finite number) is
//! dropped from the working set, never an error for the whole load.

use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::models::price::{PricePoint, PriceSeries};
use crate::models::window::parse_calendar_date;

/// One row of the `/api/prices` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    pub price: f64,
}

/// One row of the `/api/events` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,

    /// Event description; the curated dataset calls this column "event"
    pub event: String,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of the `/api/change_points/{type}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePointsResponse {
    pub change_points: Vec<String>,
}

/// Normalize raw price records into a price series.
///
/// Drops records with unparseable dates or non-finite prices; duplicate
/// dates collapse to the first occurrence; the result is sorted ascending.
#[must_use]
pub fn normalize_prices(records: &[PriceRecord]) -> PriceSeries {
    let points: Vec<PricePoint> = records
        .iter()
        .filter_map(|r| {
            let date = parse_calendar_date(&r.date)?;
            if !r.price.is_finite() {
                return None;
            }
            Some(PricePoint {
                date,
                price: r.price,
            })
        })
        .collect();
    PriceSeries::from_points(points)
}

/// Normalize raw event records, dropping those with unparseable dates.
/// Input order is preserved (the backend already sorts by date).
#[must_use]
pub fn normalize_events(records: &[EventRecord]) -> Vec<Event> {
    records
        .iter()
        .filter_map(|r| {
            let date = parse_calendar_date(&r.date)?;
            Some(match &r.notes {
                Some(notes) => Event::with_notes(date, r.event.clone(), notes.clone()),
                None => Event::new(date, r.event.clone()),
            })
        })
        .collect()
}
