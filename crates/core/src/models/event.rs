use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A curated historical event (policy announcement, conflict, OPEC
/// decision, ...) overlaid on the price chart.
///
/// Event dates come from an external dataset and need not align with any
/// trading day of the price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, minted at ingestion (the wire format has none).
    /// Used as a stable list key by the frontend; plays no role in matching.
    pub id: Uuid,

    /// Date of the event (no time component, daily granularity)
    pub date: NaiveDate,

    /// Human-readable description, e.g. "OPEC production cut announced"
    pub label: String,

    /// Optional free-text notes from the curated dataset
    #[serde(default)]
    pub notes: Option<String>,
}

impl Event {
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            label: label.into(),
            notes: None,
        }
    }

    /// Create an event with notes attached.
    pub fn with_notes(
        date: NaiveDate,
        label: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            label: label.into(),
            notes: Some(notes.into()),
        }
    }
}
