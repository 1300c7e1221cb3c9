use std::collections::HashMap;

use marker_chart_protocol::{MarkerIndex, MarkerRecord, MarkerRow};
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::model::{RowSequence, RowsVersion, TimeRange};

/// Supplies the rows to draw and full marker details on demand.
pub trait MarkerSource {
    fn rows(&self) -> &RowSequence;

    fn marker(&self, index: MarkerIndex) -> Option<MarkerRecord>;
}

/// On-disk chart description: the time range and its rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDocument {
    pub range: TimeRange,
    pub rows: Vec<MarkerRow>,
}

impl ChartDocument {
    pub fn from_json(data: &[u8]) -> ChartResult<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// A [`MarkerSource`] over rows that never change after loading.
#[derive(Debug, Clone)]
pub struct StaticMarkerSource {
    range: TimeRange,
    rows: RowSequence,
    records: HashMap<MarkerIndex, MarkerRecord>,
}

impl StaticMarkerSource {
    pub fn new(document: ChartDocument, version: RowsVersion) -> ChartResult<Self> {
        let rows = RowSequence::new(version, document.rows)?;

        let mut records = HashMap::new();
        for timing in rows.rows().iter().filter_map(MarkerRow::as_timing) {
            for i in 0..timing.len() {
                let end = (!timing.is_instant(i)).then(|| timing.end[i]);
                records.insert(
                    timing.index[i],
                    MarkerRecord {
                        name: timing.label[i].clone(),
                        start: timing.start[i],
                        end,
                        category: Some(timing.name.clone()),
                    },
                );
            }
        }

        Ok(Self {
            range: document.range,
            rows,
            records,
        })
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }
}

impl MarkerSource for StaticMarkerSource {
    fn rows(&self) -> &RowSequence {
        &self.rows
    }

    fn marker(&self, index: MarkerIndex) -> Option<MarkerRecord> {
        self.records.get(&index).cloned()
    }
}
