use serde::{Deserialize, Serialize};

use crate::coords::CoordinateMapper;
use crate::error::ChartResult;
use crate::model::RowSequence;

/// Absolute time bounds of the whole data set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// The visible window into the chart.
///
/// `left` and `right` are fractions of the [`TimeRange`] (0..1); `top` and
/// `bottom` are pixel offsets into the full, unclipped row stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Viewport {
    /// The whole time range, scrolled to the top.
    pub fn full(height: f64) -> Self {
        Self {
            left: 0.0,
            right: 1.0,
            top: 0.0,
            bottom: height,
        }
    }

    pub fn length(&self) -> f64 {
        self.right - self.left
    }
}

/// Pixel size of the drawing surface and its non-plotting gutters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl ContainerGeometry {
    /// Width available to markers between the two gutters.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }
}

/// Everything a single paint or hit test reads from the host.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrame<'a> {
    pub rows: &'a RowSequence,
    pub range: TimeRange,
    pub viewport: Viewport,
    pub container: ContainerGeometry,
}

impl ChartFrame<'_> {
    pub fn mapper(&self) -> ChartResult<CoordinateMapper> {
        CoordinateMapper::new(self.range, self.viewport, self.container)
    }
}
