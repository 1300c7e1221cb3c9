use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;

/// Opaque identifier of a marker, stable for as long as it is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerIndex(pub u32);

impl std::fmt::Display for MarkerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One lane of same-category markers, stored as parallel columns.
///
/// All four columns have the same length and are sorted ascending by
/// `start`. For every position `start[i] <= end[i]`; an instant marker has
/// `start[i] == end[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingRow {
    /// Category shown as the row label.
    pub name: SharedStr,
    pub start: Vec<f64>,
    pub end: Vec<f64>,
    pub label: Vec<SharedStr>,
    pub index: Vec<MarkerIndex>,
}

impl TimingRow {
    pub fn new(name: impl Into<SharedStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a marker. Callers push in ascending start order.
    pub fn push(&mut self, start: f64, end: f64, label: impl Into<SharedStr>, index: MarkerIndex) {
        self.start.push(start);
        self.end.push(end);
        self.label.push(label.into());
        self.index.push(index);
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn is_instant(&self, i: usize) -> bool {
        self.start[i] == self.end[i]
    }

    /// First broken invariant of this row, if any.
    pub fn defect(&self) -> Option<RowDefect> {
        let len = self.index.len();
        if self.start.len() != len || self.end.len() != len || self.label.len() != len {
            return Some(RowDefect::LengthMismatch);
        }
        if self.start.iter().any(|s| !s.is_finite()) || self.end.iter().any(|e| !e.is_finite()) {
            return Some(RowDefect::NonFinite);
        }
        if self.start.windows(2).any(|w| w[0] > w[1]) {
            return Some(RowDefect::Unsorted);
        }
        if self.start.iter().zip(&self.end).any(|(s, e)| s > e) {
            return Some(RowDefect::EndBeforeStart);
        }
        None
    }
}

/// Invariant violations detectable on a [`TimingRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDefect {
    LengthMismatch,
    NonFinite,
    Unsorted,
    EndBeforeStart,
}

impl std::fmt::Display for RowDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch => write!(f, "columns have different lengths"),
            Self::NonFinite => write!(f, "timestamp is not finite"),
            Self::Unsorted => write!(f, "start times are not ascending"),
            Self::EndBeforeStart => write!(f, "a marker ends before it starts"),
        }
    }
}

/// One vertical row of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerRow {
    Timing(TimingRow),
    /// A heading row that groups the timing rows below it.
    Bucket { name: SharedStr },
}

impl MarkerRow {
    pub fn name(&self) -> &SharedStr {
        match self {
            Self::Timing(row) => &row.name,
            Self::Bucket { name } => name,
        }
    }

    pub fn as_timing(&self) -> Option<&TimingRow> {
        match self {
            Self::Timing(row) => Some(row),
            Self::Bucket { .. } => None,
        }
    }
}

/// Full description of a single marker, as returned by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub name: SharedStr,
    pub start: f64,
    /// `None` for instant markers.
    pub end: Option<f64>,
    pub category: Option<SharedStr>,
}

impl MarkerRecord {
    pub fn duration(&self) -> Option<f64> {
        self.end.map(|end| end - self.start)
    }
}
