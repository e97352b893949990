use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::window::{day_distance, parse_calendar_date, WindowRadius};

/// The statistical property whose shift a detected change point marks.
///
/// The variant order here is the fixed priority order used everywhere a
/// single representative type must be chosen (event tagging, marker color):
/// mean shifts win over trend shifts, trend shifts over variance shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangePointType {
    /// Shift in the series mean
    Mean,
    /// Shift in the series trend (slope)
    Trend,
    /// Shift in the series variance
    #[serde(rename = "var")]
    Variance,
}

impl ChangePointType {
    /// All types in fixed priority order. Iteration over this constant is
    /// the only ordering the rest of the crate relies on.
    pub const ALL: [ChangePointType; 3] = [
        ChangePointType::Mean,
        ChangePointType::Trend,
        ChangePointType::Variance,
    ];

    /// Short name used in backend URLs and payload keys.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            ChangePointType::Mean => "mean",
            ChangePointType::Trend => "trend",
            ChangePointType::Variance => "var",
        }
    }

    /// Uppercase label shown next to chart markers and list badges.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ChangePointType::Mean => "MEAN",
            ChangePointType::Trend => "TREND",
            ChangePointType::Variance => "VAR",
        }
    }

    /// Palette key the rendering layer maps to a stroke/badge color.
    #[must_use]
    pub fn color_key(&self) -> &'static str {
        match self {
            ChangePointType::Mean => "red",
            ChangePointType::Trend => "green",
            ChangePointType::Variance => "blue",
        }
    }

    fn slot(&self) -> usize {
        match self {
            ChangePointType::Mean => 0,
            ChangePointType::Trend => 1,
            ChangePointType::Variance => 2,
        }
    }
}

impl std::fmt::Display for ChangePointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangePointType::Mean => write!(f, "Mean"),
            ChangePointType::Trend => write!(f, "Trend"),
            ChangePointType::Variance => write!(f, "Variance"),
        }
    }
}

/// Per-type sets of change-point dates reported by the external detector.
///
/// The detector may report the same date more than once within a type;
/// ingestion collapses duplicates, so the registry never holds two
/// identical (type, date) pairs. Dates that fail to parse are dropped
/// silently. Sets are ordered, which keeps marker output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePointRegistry {
    dates: [BTreeSet<NaiveDate>; 3],
}

impl ChangePointRegistry {
    /// Create an empty registry (no change points for any type).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw per-type date strings, as retrieved from
    /// the detector output. Unparseable dates are dropped, not fatal.
    #[must_use]
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = (ChangePointType, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for (cp_type, dates) in raw {
            registry.set_raw_dates(cp_type, &dates);
        }
        registry
    }

    /// Replace one type's dates with the parsed, deduplicated set built
    /// from raw strings. Returns how many dates were kept.
    pub fn set_raw_dates<S: AsRef<str>>(&mut self, cp_type: ChangePointType, raw: &[S]) -> usize {
        let parsed: BTreeSet<NaiveDate> = raw
            .iter()
            .filter_map(|s| parse_calendar_date(s.as_ref()))
            .collect();
        let kept = parsed.len();
        self.dates[cp_type.slot()] = parsed;
        kept
    }

    /// Replace one type's dates with an already-parsed set.
    pub fn set_dates(&mut self, cp_type: ChangePointType, dates: impl IntoIterator<Item = NaiveDate>) {
        self.dates[cp_type.slot()] = dates.into_iter().collect();
    }

    /// The deduplicated dates for a type, ordered ascending.
    /// Empty if the detector reported nothing (or nothing valid) for it.
    #[must_use]
    pub fn dates_of(&self, cp_type: ChangePointType) -> &BTreeSet<NaiveDate> {
        &self.dates[cp_type.slot()]
    }

    /// True iff `date` falls inside the ± `radius` window of some change
    /// point of `cp_type`. Checked as a day-distance comparison, which is
    /// equivalent to materializing each change point's window and testing
    /// membership.
    #[must_use]
    pub fn has_window_hit(
        &self,
        cp_type: ChangePointType,
        date: NaiveDate,
        radius: WindowRadius,
    ) -> bool {
        self.dates_of(cp_type)
            .iter()
            .any(|&cp_date| day_distance(date, cp_date) <= radius.days())
    }

    /// Total number of (type, date) pairs across all types.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.dates.iter().map(BTreeSet::len).sum()
    }

    /// True if no type has any change points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.iter().all(BTreeSet::is_empty)
    }

    /// All (type, date) pairs, types in fixed priority order and dates
    /// ascending within each type.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (ChangePointType, NaiveDate)> + '_ {
        ChangePointType::ALL
            .into_iter()
            .flat_map(move |t| self.dates_of(t).iter().map(move |&d| (t, d)))
    }
}
