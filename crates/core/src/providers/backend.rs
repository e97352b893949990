use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::ingest::{ChangePointsResponse, EventRecord, PriceRecord};
use crate::models::change_point::ChangePointType;
use super::traits::DashboardDataProvider;

/// Default backend address (the development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// HTTP client for the dashboard backend API.
///
/// Routes:
/// - `GET /api/prices?start_date=&end_date=` — price series rows
/// - `GET /api/events?start_date=&end_date=` — curated event rows
/// - `GET /api/change_points/{mean|trend|var}` — detector output per type
///
/// Date filters are optional and inclusive on both ends. All payloads are
/// JSON with ISO 8601 date strings; parsing/cleaning happens downstream in
/// the ingest layer, not here.
pub struct BackendApiProvider {
    client: Client,
    base_url: String,
}

impl BackendApiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        let base_url: String = base_url.into();
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn range_params(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

impl Default for BackendApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DashboardDataProvider for BackendApiProvider {
    fn name(&self) -> &str {
        "Backend"
    }

    async fn fetch_prices(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRecord>, CoreError> {
        let url = format!("{}/api/prices", self.base_url);

        let records: Vec<PriceRecord> = self
            .client
            .get(&url)
            .query(&Self::range_params(start_date, end_date))
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Backend".into(),
                message: format!("Failed to parse prices response: {e}"),
            })?;

        Ok(records)
    }

    async fn fetch_events(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<EventRecord>, CoreError> {
        let url = format!("{}/api/events", self.base_url);

        let records: Vec<EventRecord> = self
            .client
            .get(&url)
            .query(&Self::range_params(start_date, end_date))
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Backend".into(),
                message: format!("Failed to parse events response: {e}"),
            })?;

        Ok(records)
    }

    async fn fetch_change_points(
        &self,
        cp_type: ChangePointType,
    ) -> Result<Vec<String>, CoreError> {
        let url = format!("{}/api/change_points/{}", self.base_url, cp_type.wire_name());

        let resp: ChangePointsResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Backend".into(),
                message: format!(
                    "Failed to parse {} change points response: {e}",
                    cp_type.wire_name()
                ),
            })?;

        Ok(resp.change_points)
    }
}
