use marker_chart_protocol::MarkerIndex;
use serde::Serialize;

/// What the pointer is over: a marker, a row label, or both.
///
/// There is no "nothing hovered" value of this type; that case is
/// `Option::<HoverState>::None`, produced by [`HoverState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoverState {
    marker: Option<MarkerIndex>,
    label_row: Option<usize>,
}

impl HoverState {
    /// Normalize a (marker, label row) pair, collapsing the empty pair to `None`.
    pub fn new(marker: Option<MarkerIndex>, label_row: Option<usize>) -> Option<Self> {
        if marker.is_none() && label_row.is_none() {
            None
        } else {
            Some(Self { marker, label_row })
        }
    }

    pub fn marker(marker: MarkerIndex) -> Self {
        Self {
            marker: Some(marker),
            label_row: None,
        }
    }

    pub fn label(row: usize) -> Self {
        Self {
            marker: None,
            label_row: Some(row),
        }
    }

    pub fn marker_index(&self) -> Option<MarkerIndex> {
        self.marker
    }

    pub fn label_row(&self) -> Option<usize> {
        self.label_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pair_collapses() {
        assert_eq!(HoverState::new(None, None), None);
    }

    #[test]
    fn keeps_both_parts() {
        let state = HoverState::new(Some(MarkerIndex(3)), Some(1));
        assert_eq!(state.and_then(|s| s.marker_index()), Some(MarkerIndex(3)));
        assert_eq!(state.and_then(|s| s.label_row()), Some(1));
        assert_eq!(
            HoverState::new(None, Some(2)),
            Some(HoverState::label(2))
        );
    }
}
