pub mod markers;
pub mod rows;

use crate::config::ChartConfig;
use crate::coords::CoordinateMapper;
use crate::model::RowSequence;
use crate::text::TextMeasure;

/// Horizontal inset of text inside a marker box or label.
pub const TEXT_OFFSET_START: f64 = 3.0;
/// Baseline offset of text from the top of its row.
pub const TEXT_OFFSET_TOP: f64 = 11.0;

/// Read-only inputs shared by every paint routine of one frame.
#[derive(Clone, Copy)]
pub struct ChartContext<'a> {
    pub rows: &'a RowSequence,
    pub mapper: CoordinateMapper,
    pub config: &'a ChartConfig,
    pub text: &'a dyn TextMeasure,
}

impl ChartContext<'_> {
    /// Surface y of the top edge of `row`.
    pub fn row_top(&self, row: usize) -> f64 {
        row as f64 * self.config.row_height - self.mapper.viewport().top
    }
}
