use marker_chart_protocol::{MarkerRow, TimingRow};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Identity token of a [`RowSequence`].
///
/// The data source hands out a new version whenever it rebuilds its rows;
/// caches compare versions instead of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowsVersion(pub u64);

/// The vertical stack of chart rows, validated and tagged with a version.
#[derive(Debug, Clone)]
pub struct RowSequence {
    version: RowsVersion,
    rows: Vec<MarkerRow>,
}

impl RowSequence {
    /// Wrap `rows`, rejecting timing rows whose columns break their
    /// ordering or length invariants.
    pub fn new(version: RowsVersion, rows: Vec<MarkerRow>) -> ChartResult<Self> {
        for (row, marker_row) in rows.iter().enumerate() {
            if let MarkerRow::Timing(timing) = marker_row
                && let Some(reason) = timing.defect()
            {
                return Err(ChartError::MalformedRow { row, reason });
            }
        }
        Ok(Self { version, rows })
    }

    pub fn version(&self) -> RowsVersion {
        self.version
    }

    pub fn rows(&self) -> &[MarkerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&MarkerRow> {
        self.rows.get(row)
    }

    pub fn timing(&self, row: usize) -> Option<&TimingRow> {
        self.rows.get(row).and_then(MarkerRow::as_timing)
    }

    /// Whether `row` starts a new category. Only those rows carry a label.
    pub fn is_first_of_category(&self, row: usize) -> bool {
        match (row.checked_sub(1).and_then(|prev| self.rows.get(prev)), self.rows.get(row)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(prev), Some(current)) => prev.name() != current.name(),
        }
    }
}
