use crate::models::change_point::ChangePointRegistry;
use crate::models::chart::{AnnotatedEvent, Marker, MarkerKind};
use crate::models::price::PriceSeries;

/// Turns change points and annotated events into the final marker list.
///
/// The core computes all the numbers, the frontend only renders: each
/// marker carries its position, label, and palette key, so the chart
/// layer draws vertical reference lines without further decisions.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the full marker list for the current derived state.
    ///
    /// Change-point markers come first, types in fixed priority order and
    /// dates ascending within each type, restricted to dates that exist
    /// on the visible series (a change point outside the visible range
    /// simply produces no marker). Event markers follow in input event
    /// order, positioned at their anchor dates and colored by the
    /// representative matched type.
    #[must_use]
    pub fn build_markers(
        &self,
        registry: &ChangePointRegistry,
        annotated_events: &[AnnotatedEvent],
        series: &PriceSeries,
    ) -> Vec<Marker> {
        let mut markers =
            Vec::with_capacity(registry.total_points() + annotated_events.len());

        for (cp_type, date) in registry.iter_pairs() {
            if !series.contains_date(date) {
                continue;
            }
            markers.push(Marker {
                x: date,
                kind: MarkerKind::ChangePoint,
                cp_type: Some(cp_type),
                label: cp_type.label().to_string(),
                color_key: cp_type.color_key().to_string(),
            });
        }

        for annotated in annotated_events {
            let primary = annotated.primary_type();
            markers.push(Marker {
                x: annotated.anchor_date,
                kind: MarkerKind::Event,
                cp_type: Some(primary),
                label: annotated.event.label.clone(),
                color_key: primary.color_key().to_string(),
            });
        }

        markers
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
