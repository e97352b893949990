use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price data point (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// The visible price series: one point per trading day, sorted ascending,
/// dates unique. Built once per data load and treated as read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from arbitrary points: sorts by date and collapses
    /// duplicate dates (first occurrence wins).
    #[must_use]
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The trading-day dates of the series, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Whether a given calendar date is an actual trading day of this
    /// series. Binary search (O(log n)).
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.points.binary_search_by_key(&date, |p| p.date).is_ok()
    }

    /// Price on an exact trading day, if present.
    #[must_use]
    pub fn price_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].price)
    }

    /// The sub-series inside `[from, to]` (both ends inclusive, both
    /// optional). Uses binary search to find the range boundaries.
    #[must_use]
    pub fn filter_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> PriceSeries {
        let start = match from {
            Some(from) => self
                .points
                .binary_search_by_key(&from, |p| p.date)
                .unwrap_or_else(|pos| pos),
            None => 0,
        };
        let end = match to {
            Some(to) => self
                .points
                .binary_search_by_key(&to, |p| p.date)
                .map(|pos| pos + 1) // include the exact match
                .unwrap_or_else(|pos| pos),
            None => self.points.len(),
        };
        if start >= end {
            return PriceSeries::new();
        }
        PriceSeries {
            points: self.points[start..end].to_vec(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}
