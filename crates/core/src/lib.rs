pub mod errors;
pub mod ingest;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;

use errors::CoreError;
use ingest::{EventRecord, PriceRecord};
use models::change_point::{ChangePointRegistry, ChangePointType};
use models::chart::{AnnotatedEvent, ChartAnnotations, EventListEntry, Marker};
use models::event::Event;
use models::price::PriceSeries;
use models::snapshot::DashboardSnapshot;
use models::window::WindowRadius;
use providers::traits::DashboardDataProvider;
use services::chart_service::ChartService;
use services::correlation_service::CorrelationService;

/// Recompute all derived state from an input snapshot.
///
/// This is the whole engine as one pure function: no I/O, no hidden
/// state, identical snapshots yield deep-equal results (marker order
/// included). Hosts that manage their own state call this directly;
/// [`ChangePointDashboard`] calls it on every input mutation.
#[must_use]
pub fn recompute(snapshot: &DashboardSnapshot) -> ChartAnnotations {
    let correlation_service = CorrelationService::new();
    let chart_service = ChartService::new();

    let annotated_events = correlation_service.annotate_events(
        &snapshot.events,
        &snapshot.change_points,
        snapshot.radius,
        &snapshot.series,
    );
    let markers =
        chart_service.build_markers(&snapshot.change_points, &annotated_events, &snapshot.series);

    ChartAnnotations {
        annotated_events,
        markers,
    }
}

/// Main entry point for the change-point dashboard core.
///
/// Owns the fetched inputs (price series, curated events, detector
/// output), the match-window radius, and the optional date-range filter,
/// and keeps the derived chart state in sync: every mutator rebuilds the
/// filtered snapshot and recomputes synchronously before returning, so
/// accessors always expose the result of the most recent completed
/// computation. There is no incremental update path; each recompute runs
/// from scratch over the full snapshot.
#[must_use]
pub struct ChangePointDashboard {
    // Full fetched inputs, unfiltered
    prices: PriceSeries,
    events: Vec<Event>,
    change_points: ChangePointRegistry,

    radius: WindowRadius,
    filter_start: Option<NaiveDate>,
    filter_end: Option<NaiveDate>,

    correlation_service: CorrelationService,
    chart_service: ChartService,

    // Derived state, rebuilt on every input mutation
    snapshot: DashboardSnapshot,
    annotations: ChartAnnotations,
}

impl std::fmt::Debug for ChangePointDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePointDashboard")
            .field("prices", &self.prices.len())
            .field("events", &self.events.len())
            .field("change_points", &self.change_points.total_points())
            .field("radius", &self.radius)
            .field("markers", &self.annotations.markers.len())
            .finish()
    }
}

impl ChangePointDashboard {
    /// Create an empty dashboard with the default window radius.
    pub fn new() -> Self {
        Self {
            prices: PriceSeries::new(),
            events: Vec::new(),
            change_points: ChangePointRegistry::new(),
            radius: WindowRadius::default(),
            filter_start: None,
            filter_end: None,
            correlation_service: CorrelationService::new(),
            chart_service: ChartService::new(),
            snapshot: DashboardSnapshot::default(),
            annotations: ChartAnnotations::default(),
        }
    }

    /// Seed a dashboard from an already-built snapshot (no date filter).
    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Self {
        let mut dashboard = Self::new();
        dashboard.prices = snapshot.series;
        dashboard.events = snapshot.events;
        dashboard.change_points = snapshot.change_points;
        dashboard.radius = snapshot.radius;
        dashboard.recompute_derived();
        dashboard
    }

    // ── Input mutation ──────────────────────────────────────────────

    /// Replace the price series from raw wire records. Malformed records
    /// are dropped silently; duplicate dates collapse.
    pub fn set_price_records(&mut self, records: &[PriceRecord]) {
        self.prices = ingest::normalize_prices(records);
        self.recompute_derived();
    }

    /// Replace the price series with already-normalized points.
    pub fn set_price_series(&mut self, series: PriceSeries) {
        self.prices = series;
        self.recompute_derived();
    }

    /// Replace the event list from raw wire records. Malformed records
    /// are dropped silently.
    pub fn set_event_records(&mut self, records: &[EventRecord]) {
        self.events = ingest::normalize_events(records);
        self.recompute_derived();
    }

    /// Replace the event list with already-normalized events.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.recompute_derived();
    }

    /// Replace one type's change-point dates with the detector's raw
    /// output. Unparseable dates are dropped, duplicates collapse.
    /// Returns how many dates were kept.
    pub fn set_change_points<S: AsRef<str>>(
        &mut self,
        cp_type: ChangePointType,
        raw_dates: &[S],
    ) -> usize {
        let kept = self.change_points.set_raw_dates(cp_type, raw_dates);
        self.recompute_derived();
        kept
    }

    /// Change the ± match window. Negative values are rejected and leave
    /// the current state untouched.
    pub fn set_window_radius(&mut self, days: i64) -> Result<(), CoreError> {
        self.radius = WindowRadius::new(days)?;
        self.recompute_derived();
        Ok(())
    }

    /// Restrict the visible prices and events to an inclusive date range.
    /// Either bound may be open. The engine itself stays range-agnostic;
    /// the filter is applied when the snapshot is rebuilt.
    pub fn set_date_filter(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<(), CoreError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(CoreError::ValidationError(format!(
                    "start_date ({start}) must not be after end_date ({end})"
                )));
            }
        }
        self.filter_start = start_date;
        self.filter_end = end_date;
        self.recompute_derived();
        Ok(())
    }

    /// Remove the date-range filter, making the full series visible.
    pub fn clear_date_filter(&mut self) {
        self.filter_start = None;
        self.filter_end = None;
        self.recompute_derived();
    }

    // ── Data loading ────────────────────────────────────────────────

    /// Load all inputs from a data source, all-or-nothing: if any fetch
    /// fails, the dashboard keeps its previous state and the error is
    /// returned. Change-point types are fetched independently, matching
    /// the backend's per-type routes.
    pub async fn load_from_provider(
        &mut self,
        provider: &dyn DashboardDataProvider,
    ) -> Result<(), CoreError> {
        let prices = provider
            .fetch_prices(self.filter_start, self.filter_end)
            .await?;
        let events = provider
            .fetch_events(self.filter_start, self.filter_end)
            .await?;

        let mut registry = ChangePointRegistry::new();
        for cp_type in ChangePointType::ALL {
            let raw = provider.fetch_change_points(cp_type).await?;
            registry.set_raw_dates(cp_type, &raw);
        }

        // Everything fetched: commit and recompute once.
        self.prices = ingest::normalize_prices(&prices);
        self.events = ingest::normalize_events(&events);
        self.change_points = registry;
        self.recompute_derived();
        Ok(())
    }

    /// Load all inputs from a data source, substituting an empty dataset
    /// for each part that fails, so the dashboard stays consistent and
    /// renderable. Returns the collected failures for user-visible
    /// messaging; an empty vector means a clean load.
    pub async fn load_from_provider_lenient(
        &mut self,
        provider: &dyn DashboardDataProvider,
    ) -> Vec<CoreError> {
        let mut failures = Vec::new();

        match provider
            .fetch_prices(self.filter_start, self.filter_end)
            .await
        {
            Ok(records) => self.prices = ingest::normalize_prices(&records),
            Err(e) => {
                self.prices = PriceSeries::new();
                failures.push(e);
            }
        }

        match provider
            .fetch_events(self.filter_start, self.filter_end)
            .await
        {
            Ok(records) => self.events = ingest::normalize_events(&records),
            Err(e) => {
                self.events = Vec::new();
                failures.push(e);
            }
        }

        for cp_type in ChangePointType::ALL {
            match provider.fetch_change_points(cp_type).await {
                Ok(raw) => {
                    self.change_points.set_raw_dates(cp_type, &raw);
                }
                Err(e) => {
                    self.change_points.set_dates(cp_type, std::iter::empty());
                    failures.push(e);
                }
            }
        }

        self.recompute_derived();
        failures
    }

    // ── Derived state ───────────────────────────────────────────────

    /// The full marker list for the chart layer.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.annotations.markers
    }

    /// Events near at least one change point, with tags and anchors.
    #[must_use]
    pub fn annotated_events(&self) -> &[AnnotatedEvent] {
        &self.annotations.annotated_events
    }

    /// Both derived sequences as one bundle.
    #[must_use]
    pub fn annotations(&self) -> &ChartAnnotations {
        &self.annotations
    }

    /// Every visible event with its (possibly empty) matched types, in
    /// input order, for the list panel.
    #[must_use]
    pub fn event_list(&self) -> Vec<EventListEntry> {
        self.correlation_service.list_entries(
            &self.snapshot.events,
            &self.snapshot.change_points,
            self.snapshot.radius,
        )
    }

    /// Serialize the derived state for the rendering layer.
    pub fn annotations_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.annotations)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize annotations: {e}")))
    }

    // ── Inputs (visible, post-filter) ───────────────────────────────

    /// The visible events (date-filtered, but including unmatched ones).
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.snapshot.events
    }

    /// The visible price series.
    #[must_use]
    pub fn price_series(&self) -> &PriceSeries {
        &self.snapshot.series
    }

    /// The deduplicated detector output.
    #[must_use]
    pub fn change_points(&self) -> &ChangePointRegistry {
        &self.change_points
    }

    /// The snapshot the current derived state was computed from.
    #[must_use]
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn window_radius(&self) -> WindowRadius {
        self.radius
    }

    #[must_use]
    pub fn date_filter(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.filter_start, self.filter_end)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Rebuild the filtered snapshot and recompute everything derived.
    /// Mutation and recompute are one synchronous step, so there is never
    /// a moment where accessors see stale derived state.
    fn recompute_derived(&mut self) {
        let series = self.prices.filter_range(self.filter_start, self.filter_end);
        let events: Vec<Event> = self
            .events
            .iter()
            .filter(|e| {
                self.filter_start.map_or(true, |start| e.date >= start)
                    && self.filter_end.map_or(true, |end| e.date <= end)
            })
            .cloned()
            .collect();

        self.snapshot = DashboardSnapshot::new(
            series,
            events,
            self.change_points.clone(),
            self.radius,
        );

        let annotated_events = self.correlation_service.annotate_events(
            &self.snapshot.events,
            &self.snapshot.change_points,
            self.snapshot.radius,
            &self.snapshot.series,
        );
        let markers = self.chart_service.build_markers(
            &self.snapshot.change_points,
            &annotated_events,
            &self.snapshot.series,
        );
        self.annotations = ChartAnnotations {
            annotated_events,
            markers,
        };
    }
}

impl Default for ChangePointDashboard {
    fn default() -> Self {
        Self::new()
    }
}
