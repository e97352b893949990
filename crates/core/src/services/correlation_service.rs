use chrono::NaiveDate;

use crate::models::change_point::{ChangePointRegistry, ChangePointType};
use crate::models::chart::{AnnotatedEvent, EventListEntry};
use crate::models::event::Event;
use crate::models::price::PriceSeries;
use crate::models::window::{day_distance, WindowRadius};

/// The temporal correlation engine: decides which events fall near which
/// change points and picks the on-series date that anchors each event
/// marker.
///
/// Pure business logic, no I/O. Every method is a function of its
/// arguments only, so identical inputs always produce identical output.
pub struct CorrelationService;

impl CorrelationService {
    pub fn new() -> Self {
        Self
    }

    /// The change-point types whose ± `radius` window around some change
    /// point contains `date`, in fixed priority order (Mean, Trend,
    /// Variance, filtered to those that hit).
    ///
    /// The first entry doubles as the representative type when downstream
    /// rendering wants a single color; the rest are retained regardless.
    #[must_use]
    pub fn matched_types(
        &self,
        registry: &ChangePointRegistry,
        date: NaiveDate,
        radius: WindowRadius,
    ) -> Vec<ChangePointType> {
        ChangePointType::ALL
            .into_iter()
            .filter(|&cp_type| registry.has_window_hit(cp_type, date, radius))
            .collect()
    }

    /// Annotate all events against the registry. Events with no matching
    /// type are excluded from the result entirely (the raw event list
    /// stays available to list-style consumers via [`Self::list_entries`]).
    #[must_use]
    pub fn annotate_events(
        &self,
        events: &[Event],
        registry: &ChangePointRegistry,
        radius: WindowRadius,
        series: &PriceSeries,
    ) -> Vec<AnnotatedEvent> {
        events
            .iter()
            .filter_map(|event| {
                let matched = self.matched_types(registry, event.date, radius);
                if matched.is_empty() {
                    return None;
                }
                let anchor_date =
                    self.anchor_date(event.date, &matched, registry, radius, series);
                Some(AnnotatedEvent {
                    event: event.clone(),
                    matched_types: matched,
                    anchor_date,
                })
            })
            .collect()
    }

    /// One entry per input event, in input order, matched or not. Feeds
    /// the list panel, which badges matched events and renders the rest
    /// plain.
    #[must_use]
    pub fn list_entries(
        &self,
        events: &[Event],
        registry: &ChangePointRegistry,
        radius: WindowRadius,
    ) -> Vec<EventListEntry> {
        events
            .iter()
            .map(|event| EventListEntry {
                event: event.clone(),
                matched_types: self.matched_types(registry, event.date, radius),
            })
            .collect()
    }

    /// Pick the on-series date that anchors an event marker.
    ///
    /// Candidates are the series dates lying within `radius` days of any
    /// change point of any matched type. Among them, the one closest to
    /// the event's own date wins; ties break to the earlier calendar
    /// date. With no candidate at all, the event's own date is the anchor
    /// (the marker then sits off the traded days, which the renderer
    /// tolerates).
    fn anchor_date(
        &self,
        event_date: NaiveDate,
        matched: &[ChangePointType],
        registry: &ChangePointRegistry,
        radius: WindowRadius,
        series: &PriceSeries,
    ) -> NaiveDate {
        let mut best: Option<(i64, NaiveDate)> = None;

        for candidate in series.dates() {
            let in_window = matched
                .iter()
                .any(|&cp_type| registry.has_window_hit(cp_type, candidate, radius));
            if !in_window {
                continue;
            }

            let distance = day_distance(event_date, candidate);
            let better = match best {
                None => true,
                Some((best_distance, best_date)) => {
                    distance < best_distance
                        || (distance == best_distance && candidate < best_date)
                }
            };
            if better {
                best = Some((distance, candidate));
            }
        }

        best.map_or(event_date, |(_, date)| date)
    }
}

impl Default for CorrelationService {
    fn default() -> Self {
        Self::new()
    }
}
