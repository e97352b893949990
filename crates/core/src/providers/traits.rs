use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::ingest::{EventRecord, PriceRecord};
use crate::models::change_point::ChangePointType;

/// Trait abstraction for dashboard data sources.
///
/// The production implementation talks to the backend HTTP API; tests use
/// an in-memory mock. Prices, events, and each change-point type are
/// retrieved independently, matching the backend's route layout, so a
/// failure in one part never poisons the others.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DashboardDataProvider: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the price series, optionally restricted to an inclusive
    /// date range (the backend applies the filter server-side).
    async fn fetch_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRecord>, CoreError>;

    /// Fetch the curated events, optionally restricted to an inclusive
    /// date range.
    async fn fetch_events(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<EventRecord>, CoreError>;

    /// Fetch the detected change-point dates for one type.
    async fn fetch_change_points(
        &self,
        cp_type: ChangePointType,
    ) -> Result<Vec<String>, CoreError>;
}
