use serde::Serialize;

use super::change_point::ChangePointRegistry;
use super::event::Event;
use super::price::PriceSeries;
use super::window::WindowRadius;

/// The complete, already-filtered input set one recompute runs on.
///
/// Immutable by convention: derived state is a pure function of a
/// snapshot, so two recomputes over equal snapshots yield equal results.
/// Any upstream date-range filtering has been applied before the snapshot
/// is built; the engine itself is range-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Visible price series (sorted, date-unique)
    pub series: PriceSeries,

    /// Visible curated events, in backend order
    pub events: Vec<Event>,

    /// Deduplicated per-type change-point dates from the detector
    pub change_points: ChangePointRegistry,

    /// The ± match window applied to every event/change-point comparison
    pub radius: WindowRadius,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn new(
        series: PriceSeries,
        events: Vec<Event>,
        change_points: ChangePointRegistry,
        radius: WindowRadius,
    ) -> Self {
        Self {
            series,
            events,
            change_points,
            radius,
        }
    }
}
