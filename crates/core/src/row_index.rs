use std::collections::HashMap;
use std::rc::Rc;

use marker_chart_protocol::{MarkerIndex, MarkerRow};
use tracing::debug;

use crate::model::{RowSequence, RowsVersion};

/// Marker identifier → row number, for every marker in a [`RowSequence`].
#[derive(Debug, Default, PartialEq)]
pub struct RowIndexMap {
    rows: HashMap<MarkerIndex, usize>,
}

impl RowIndexMap {
    /// One pass over all rows. Bucket rows contribute nothing.
    pub fn build(rows: &[MarkerRow]) -> Self {
        let capacity = rows
            .iter()
            .filter_map(MarkerRow::as_timing)
            .map(|timing| timing.len())
            .sum();
        let mut map = HashMap::with_capacity(capacity);
        for (row, timing) in rows
            .iter()
            .enumerate()
            .filter_map(|(row, r)| r.as_timing().map(|t| (row, t)))
        {
            for &index in &timing.index {
                map.insert(index, row);
            }
        }
        Self { rows: map }
    }

    pub fn row_of(&self, marker: MarkerIndex) -> Option<usize> {
        self.rows.get(&marker).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Memoizes the [`RowIndexMap`] of the most recent [`RowSequence`] version.
#[derive(Debug, Default)]
pub struct RowIndexCache {
    cached: Option<(RowsVersion, Rc<RowIndexMap>)>,
}

impl RowIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index for `rows`, rebuilding only when its version differs
    /// from the last one seen. Repeated calls with the same version return
    /// the same map instance.
    pub fn get(&mut self, rows: &RowSequence) -> Rc<RowIndexMap> {
        if let Some((version, map)) = &self.cached
            && *version == rows.version()
        {
            return Rc::clone(map);
        }

        let map = Rc::new(RowIndexMap::build(rows.rows()));
        debug!(
            version = rows.version().0,
            rows = rows.len(),
            markers = map.len(),
            "rebuilt marker row index"
        );
        self.cached = Some((rows.version(), Rc::clone(&map)));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_chart_protocol::TimingRow;

    fn rows(version: u64) -> RowSequence {
        let mut load = TimingRow::new("Load");
        load.push(0.0, 5.0, "a", MarkerIndex(10));
        load.push(6.0, 9.0, "b", MarkerIndex(11));
        let mut paint = TimingRow::new("Paint");
        paint.push(1.0, 1.0, "c", MarkerIndex(12));
        RowSequence::new(
            RowsVersion(version),
            vec![
                MarkerRow::Bucket { name: "Page".into() },
                MarkerRow::Timing(load),
                MarkerRow::Timing(paint),
            ],
        )
        .expect("fixture rows are valid")
    }

    #[test]
    fn maps_markers_to_rows() {
        let index = RowIndexMap::build(rows(1).rows());
        assert_eq!(index.len(), 3);
        assert_eq!(index.row_of(MarkerIndex(10)), Some(1));
        assert_eq!(index.row_of(MarkerIndex(11)), Some(1));
        assert_eq!(index.row_of(MarkerIndex(12)), Some(2));
        assert_eq!(index.row_of(MarkerIndex(99)), None);
    }

    #[test]
    fn same_version_returns_same_instance() {
        let mut cache = RowIndexCache::new();
        let sequence = rows(1);
        let first = cache.get(&sequence);
        let second = cache.get(&sequence);
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_version_rebuilds() {
        let mut cache = RowIndexCache::new();
        let first = cache.get(&rows(1));
        let second = cache.get(&rows(2));
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }
}
