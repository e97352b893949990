use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::change_point::ChangePointType;
use super::event::Event;

/// What a vertical chart marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    /// A detected change point of some type
    ChangePoint,
    /// A curated historical event matched to at least one change point
    Event,
}

/// A labeled vertical marker, ready for the rendering layer.
///
/// The core computes all the numbers, the frontend only renders: `x` is
/// always a date present on the visible series (for events, the anchor
/// date), and `color_key` resolves through the frontend palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// On-series date where the marker is drawn
    pub x: NaiveDate,

    /// Change point or event
    pub kind: MarkerKind,

    /// For change-point markers, the detected type; for event markers,
    /// the representative (first matched) type driving the label color.
    #[serde(rename = "type")]
    pub cp_type: Option<ChangePointType>,

    /// Marker text: the type label for change points, the event
    /// description for events.
    pub label: String,

    /// Palette key for the marker stroke/label
    pub color_key: String,
}

/// An event enriched with the change-point types it was found to be
/// temporally near, plus the on-series date chosen to position its marker.
///
/// Derived data: recomputed in full whenever inputs change, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedEvent {
    pub event: Event,

    /// Matching types in fixed priority order (Mean, Trend, Variance,
    /// filtered to those that hit). Never empty: events with no match are
    /// excluded from the annotated output entirely.
    pub matched_types: Vec<ChangePointType>,

    /// A date that exists on the visible price series, or the event's own
    /// date when no series date falls inside any matching window.
    pub anchor_date: NaiveDate,
}

impl AnnotatedEvent {
    /// The representative type for single-color rendering: the first
    /// entry in priority order. The remaining tags stay available to
    /// consumers that render all of them (e.g. the list panel).
    #[must_use]
    pub fn primary_type(&self) -> ChangePointType {
        self.matched_types[0]
    }
}

/// One row of the event list panel: every event appears here, matched or
/// not, so the panel can badge the matched ones and render the rest plain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListEntry {
    pub event: Event,

    /// Matching types in fixed priority order; empty when the event is not
    /// near any change point at the current radius.
    pub matched_types: Vec<ChangePointType>,
}

impl EventListEntry {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        !self.matched_types.is_empty()
    }
}

/// Everything one recompute derives from the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartAnnotations {
    /// Events near at least one change point, with tags and anchor dates
    pub annotated_events: Vec<AnnotatedEvent>,

    /// The full marker list: change points first (types in priority
    /// order, dates ascending), then event markers in input event order
    pub markers: Vec<Marker>,
}
