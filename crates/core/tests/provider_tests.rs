// ═══════════════════════════════════════════════════════════════════
// Provider Tests — DashboardDataProvider contract against the facade,
// strict vs lenient loading
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;

use changepoint_dashboard_core::errors::CoreError;
use changepoint_dashboard_core::ingest::{EventRecord, PriceRecord};
use changepoint_dashboard_core::models::change_point::ChangePointType;
use changepoint_dashboard_core::providers::backend::{BackendApiProvider, DEFAULT_BASE_URL};
use changepoint_dashboard_core::providers::traits::DashboardDataProvider;
use changepoint_dashboard_core::ChangePointDashboard;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Mock Provider
// ═══════════════════════════════════════════════════════════════════

struct MockProvider {
    prices: Vec<PriceRecord>,
    events: Vec<EventRecord>,
    mean: Vec<String>,
    trend: Vec<String>,
    var: Vec<String>,
    fail_prices: bool,
    fail_events: bool,
    fail_types: HashSet<ChangePointType>,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            prices: vec![
                PriceRecord {
                    date: "2023-06-01".into(),
                    price: 80.0,
                },
                PriceRecord {
                    date: "2023-06-03".into(),
                    price: 82.0,
                },
                PriceRecord {
                    date: "2023-06-05".into(),
                    price: 81.0,
                },
            ],
            events: vec![EventRecord {
                date: "2023-06-02".into(),
                event: "export ban".into(),
                notes: None,
            }],
            mean: vec![],
            trend: vec!["2023-06-04".into(), "2023-06-05".into()],
            var: vec![],
            fail_prices: false,
            fail_events: false,
            fail_types: HashSet::new(),
        }
    }

    fn unavailable(&self, what: &str) -> CoreError {
        CoreError::Api {
            provider: "Mock".into(),
            message: format!("{what} unavailable"),
        }
    }
}

#[async_trait]
impl DashboardDataProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch_prices(
        &self,
        _start_date: Option<NaiveDate>,
        _end_date: Option<NaiveDate>,
    ) -> Result<Vec<PriceRecord>, CoreError> {
        if self.fail_prices {
            return Err(self.unavailable("prices"));
        }
        Ok(self.prices.clone())
    }

    async fn fetch_events(
        &self,
        _start_date: Option<NaiveDate>,
        _end_date: Option<NaiveDate>,
    ) -> Result<Vec<EventRecord>, CoreError> {
        if self.fail_events {
            return Err(self.unavailable("events"));
        }
        Ok(self.events.clone())
    }

    async fn fetch_change_points(
        &self,
        cp_type: ChangePointType,
    ) -> Result<Vec<String>, CoreError> {
        if self.fail_types.contains(&cp_type) {
            return Err(self.unavailable(cp_type.wire_name()));
        }
        Ok(match cp_type {
            ChangePointType::Mean => self.mean.clone(),
            ChangePointType::Trend => self.trend.clone(),
            ChangePointType::Variance => self.var.clone(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════
// Strict loading
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn strict_load_populates_dashboard() {
    let mut dashboard = ChangePointDashboard::new();
    dashboard.set_window_radius(2).unwrap();

    dashboard.load_from_provider(&MockProvider::new()).await.unwrap();

    assert_eq!(dashboard.price_series().len(), 3);
    assert_eq!(dashboard.events().len(), 1);
    assert_eq!(
        dashboard.change_points().dates_of(ChangePointType::Trend).len(),
        2
    );
    assert_eq!(dashboard.annotated_events().len(), 1);
    assert_eq!(dashboard.annotated_events()[0].anchor_date, d(2023, 6, 3));
}

#[tokio::test]
async fn strict_load_failure_keeps_previous_state() {
    let mut dashboard = ChangePointDashboard::new();
    dashboard.set_window_radius(2).unwrap();
    dashboard.load_from_provider(&MockProvider::new()).await.unwrap();
    let markers_before = dashboard.markers().to_vec();

    let mut failing = MockProvider::new();
    failing.fail_events = true;
    let err = dashboard.load_from_provider(&failing).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { .. }));
    assert_eq!(dashboard.markers(), markers_before.as_slice());
    assert_eq!(dashboard.events().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════
// Lenient loading
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn lenient_load_with_no_failures_is_clean() {
    let mut dashboard = ChangePointDashboard::new();
    let failures = dashboard
        .load_from_provider_lenient(&MockProvider::new())
        .await;
    assert!(failures.is_empty());
    assert_eq!(dashboard.price_series().len(), 3);
}

#[tokio::test]
async fn lenient_load_substitutes_empty_for_failed_part() {
    let mut provider = MockProvider::new();
    provider.fail_events = true;

    let mut dashboard = ChangePointDashboard::new();
    let failures = dashboard.load_from_provider_lenient(&provider).await;

    assert_eq!(failures.len(), 1);
    // Prices and change points loaded; events degraded to empty
    assert_eq!(dashboard.price_series().len(), 3);
    assert!(dashboard.events().is_empty());
    assert_eq!(
        dashboard.change_points().dates_of(ChangePointType::Trend).len(),
        2
    );
    // Still renderable: the change-point marker survives
    assert!(!dashboard.markers().is_empty());
}

#[tokio::test]
async fn lenient_load_change_point_types_fail_independently() {
    let mut provider = MockProvider::new();
    provider.mean = vec!["2023-06-01".into()];
    provider.fail_types.insert(ChangePointType::Mean);

    let mut dashboard = ChangePointDashboard::new();
    let failures = dashboard.load_from_provider_lenient(&provider).await;

    assert_eq!(failures.len(), 1);
    assert!(dashboard
        .change_points()
        .dates_of(ChangePointType::Mean)
        .is_empty());
    assert_eq!(
        dashboard.change_points().dates_of(ChangePointType::Trend).len(),
        2
    );
}

#[tokio::test]
async fn lenient_load_total_failure_leaves_empty_consistent_dashboard() {
    let mut provider = MockProvider::new();
    provider.fail_prices = true;
    provider.fail_events = true;
    provider.fail_types.extend(ChangePointType::ALL);

    let mut dashboard = ChangePointDashboard::new();
    let failures = dashboard.load_from_provider_lenient(&provider).await;

    assert_eq!(failures.len(), 5);
    assert!(dashboard.price_series().is_empty());
    assert!(dashboard.events().is_empty());
    assert!(dashboard.change_points().is_empty());
    assert!(dashboard.markers().is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// BackendApiProvider construction
// ═══════════════════════════════════════════════════════════════════

#[test]
fn backend_provider_has_a_name() {
    let provider = BackendApiProvider::new("http://example.invalid");
    assert_eq!(provider.name(), "Backend");
}

#[test]
fn backend_provider_default_base_url() {
    let _provider = BackendApiProvider::default();
    assert_eq!(DEFAULT_BASE_URL, "http://localhost:5000");
}
