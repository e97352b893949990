use chrono::{DateTime, Days, NaiveDate};
use serde::Serialize;

use crate::errors::CoreError;

/// The ± day tolerance used to consider an event "near" a change point.
///
/// A radius of 0 means "same calendar day only". Negative values are a
/// contract violation and are rejected at construction, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct WindowRadius(i64);

impl WindowRadius {
    /// Radius used when the caller has not picked one.
    pub const DEFAULT_DAYS: i64 = 30;

    /// The choices the UI offers. The engine itself accepts any
    /// non-negative integer, not just these.
    pub const UI_CHOICES: [i64; 5] = [1, 7, 14, 30, 60];

    /// Validate a raw day count into a radius.
    pub fn new(days: i64) -> Result<Self, CoreError> {
        if days < 0 {
            return Err(CoreError::ValidationError(format!(
                "Window radius must be non-negative, got {days}"
            )));
        }
        Ok(Self(days))
    }

    #[must_use]
    pub fn days(&self) -> i64 {
        self.0
    }
}

impl Default for WindowRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl std::fmt::Display for WindowRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "±{} days", self.0)
    }
}

/// Materialize the window of calendar dates around `anchor`:
/// `anchor - radius ..= anchor + radius`, length `2 * radius + 1`,
/// strictly increasing, with `anchor` in the middle.
///
/// Day stepping is done in calendar space, so month and year boundaries
/// roll over correctly (±5 around Jan 30 reaches into February).
#[must_use]
pub fn window_dates(anchor: NaiveDate, radius: WindowRadius) -> Vec<NaiveDate> {
    let span = radius.days() as u64;
    let Some(start) = anchor.checked_sub_days(Days::new(span)) else {
        return Vec::new();
    };

    let mut dates = Vec::with_capacity(2 * span as usize + 1);
    let mut current = start;
    for _ in 0..(2 * span + 1) {
        dates.push(current);
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

/// Absolute distance between two calendar dates, in whole days.
///
/// `day_distance(a, b) <= radius` is equivalent to `b` being a member of
/// `window_dates(a, radius)`, without materializing the window.
#[must_use]
pub fn day_distance(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Parse a raw date value into a calendar date.
///
/// Accepts plain `YYYY-MM-DD` strings as well as full RFC 3339 timestamps,
/// which are truncated to their calendar day: time-of-day and timezone
/// offsets never affect date equality or ordering. Returns `None` for
/// anything unparseable; callers drop such records rather than failing.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
