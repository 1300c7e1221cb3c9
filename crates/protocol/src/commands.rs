use serde::{Deserialize, Serialize};

use crate::marker_rows::MarkerIndex;
use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits these into a rasterization sink in paint order. Coordinates
/// are device-independent pixels relative to the chart surface's top-left
/// corner. Renderers consume them sequentially and each command carries all
/// the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Reset a region of the surface to transparent.
    ClearRect { rect: Rect },

    /// Fill a rectangle without a border.
    FillRect { rect: Rect, color: ThemeToken },

    /// Fill a rectangle and stroke a 1px border around it. `marker` names the
    /// marker the rectangle belongs to, if any.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        marker: Option<MarkerIndex>,
    },

    /// Fill a closed polygon, optionally stroking its outline.
    FillPath {
        points: Vec<Point>,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        marker: Option<MarkerIndex>,
    },

    /// Draw a left-aligned text string. `position.y` is the baseline.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
    },

    /// Save the current clip and intersect it with `rect`.
    PushClip { rect: Rect },

    /// Restore the clip saved by the matching `PushClip`.
    PopClip,

    /// Begin a logical group (e.g. one row). Renderers may use this for
    /// batching or layer separation.
    BeginGroup { id: SharedStr },

    /// End the current group.
    EndGroup,
}
