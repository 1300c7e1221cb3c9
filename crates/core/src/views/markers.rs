use std::ops::Range;

use marker_chart_protocol::{
    MarkerIndex, Point, Rect, RenderCommand, SharedStr, ThemeToken, TimingRow,
};
use tracing::trace;

use super::{ChartContext, TEXT_OFFSET_START, TEXT_OFFSET_TOP};
use crate::coords::{CoordinateMapper, snap_to_device_pixel};
use crate::sink::RenderSink;
use crate::text::TextMeasure;

/// Markers drawn with emphasis, compared by identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Highlights {
    pub hovered: Option<MarkerIndex>,
    pub selected: Option<MarkerIndex>,
    pub right_clicked: Option<MarkerIndex>,
}

impl Highlights {
    pub fn contains(&self, marker: MarkerIndex) -> bool {
        self.right_clicked == Some(marker)
            || self.hovered == Some(marker)
            || self.selected == Some(marker)
    }
}

/// Per-frame geometry of one marker, in snapped surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableMarker {
    pub index: MarkerIndex,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub is_instant: bool,
    pub text: SharedStr,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Instant marker.
    Diamond,
    /// Interval too narrow for a border to leave any inside visible.
    Bar,
    /// Bordered interval box that may carry a text label.
    Box,
}

impl DrawableMarker {
    pub fn shape(&self) -> MarkerShape {
        if self.is_instant {
            MarkerShape::Diamond
        } else if self.w <= 2.0 {
            MarkerShape::Bar
        } else {
            MarkerShape::Box
        }
    }

    /// Text origin x and the width available to the label. Only boxes carry
    /// text; a box starting under the left gutter has its label pushed right
    /// of the gutter.
    pub fn label_slot(&self, margin_left: f64) -> Option<(f64, f64)> {
        if self.shape() != MarkerShape::Box {
            return None;
        }
        let (x, visible) = if self.x < margin_left {
            (margin_left + TEXT_OFFSET_START, self.w - margin_left + self.x)
        } else {
            (self.x + TEXT_OFFSET_START, self.w)
        };
        Some((x, visible - 2.0 * TEXT_OFFSET_START))
    }
}

/// Markers of one or more rows, split by paint pass.
#[derive(Debug, Default)]
pub struct RowLayout {
    pub regular: Vec<DrawableMarker>,
    pub highlighted: Vec<DrawableMarker>,
}

/// Lay out the visible markers of `row`, whose top edge is at `y`.
///
/// A regular marker at most one pixel wide is dropped when it lands on the
/// same pixel as the previous regular marker drawn in this row. Highlighted
/// markers are never dropped and go to [`RowLayout::highlighted`].
pub fn layout_row(
    mapper: &CoordinateMapper,
    row: &TimingRow,
    y: f64,
    row_height: f64,
    device_pixel_ratio: f64,
    highlights: &Highlights,
    out: &mut RowLayout,
) {
    let (window_start, window_end) = mapper.visible_time_window();
    let mut previous_x: Option<f64> = None;

    for i in 0..row.len() {
        let (start, end) = (row.start[i], row.end[i]);
        // Rows are sorted by start, nothing further right is visible.
        if start >= window_end {
            break;
        }
        if end < window_start {
            continue;
        }

        let x = snap_to_device_pixel(mapper.time_to_x(start), device_pixel_ratio);
        let w = snap_to_device_pixel(mapper.span_width(start, end), device_pixel_ratio);
        let index = row.index[i];
        let highlighted = highlights.contains(index);

        let marker = DrawableMarker {
            index,
            x,
            y,
            w,
            h: row_height,
            is_instant: start == end,
            text: row.label[i].clone(),
            highlighted,
        };

        if highlighted {
            out.highlighted.push(marker);
        } else if w > 1.0 || previous_x != Some(x) {
            previous_x = Some(x);
            out.regular.push(marker);
        }
    }
}

/// Paint the markers of `rows`, clipped to the plot area. Highlighted
/// markers are painted after all others so nothing covers them.
pub fn draw_markers(
    sink: &mut dyn RenderSink,
    ctx: &ChartContext<'_>,
    rows: Range<usize>,
    highlights: &Highlights,
) {
    let container = ctx.mapper.container();
    let config = ctx.config;

    sink.submit(RenderCommand::PushClip {
        rect: Rect::new(
            container.margin_left,
            0.0,
            container.plot_width(),
            container.height,
        ),
    });

    let mut layout = RowLayout::default();
    let mut drawn = 0usize;
    for row in rows.clone() {
        let Some(timing) = ctx.rows.timing(row) else {
            continue;
        };
        layout_row(
            &ctx.mapper,
            timing,
            ctx.row_top(row),
            config.row_height,
            config.device_pixel_ratio,
            highlights,
            &mut layout,
        );
        drawn += layout.regular.len();
        for marker in layout.regular.drain(..) {
            draw_marker(sink, ctx.text, &marker, container.margin_left, config.font_size);
        }
    }

    for marker in &layout.highlighted {
        draw_marker(sink, ctx.text, marker, container.margin_left, config.font_size);
    }

    sink.submit(RenderCommand::PopClip);
    trace!(
        rows = ?rows,
        drawn,
        highlighted = layout.highlighted.len(),
        "drew markers"
    );
}

pub fn draw_marker(
    sink: &mut dyn RenderSink,
    text: &dyn TextMeasure,
    marker: &DrawableMarker,
    margin_left: f64,
    font_size: f64,
) {
    let DrawableMarker {
        index,
        x,
        y,
        w,
        h,
        highlighted,
        ..
    } = *marker;
    let small_fill = if highlighted {
        ThemeToken::MarkerHighlightFill
    } else {
        ThemeToken::MarkerSmallFill
    };
    let border = if highlighted {
        ThemeToken::MarkerHighlightBorder
    } else {
        ThemeToken::MarkerBorder
    };

    match marker.shape() {
        MarkerShape::Diamond => {
            // Height h - 3, half-width h / 4, centered on x.
            sink.submit(RenderCommand::FillPath {
                points: vec![
                    Point::new(x - h / 4.0, y + h / 2.0),
                    Point::new(x, y + 1.5),
                    Point::new(x + h / 4.0, y + h / 2.0),
                    Point::new(x, y + h - 1.5),
                ],
                color: small_fill,
                border_color: Some(border),
                marker: Some(index),
            });
        }
        MarkerShape::Bar => {
            sink.submit(RenderCommand::DrawRect {
                rect: Rect::new(x, y + 1.0, w.max(1.0), h - 2.0),
                color: small_fill,
                border_color: None,
                marker: Some(index),
            });
        }
        MarkerShape::Box => {
            // Inset by half a pixel so the 1px stroke lands on whole pixels.
            sink.submit(RenderCommand::DrawRect {
                rect: Rect::new(x + 0.5, y + 1.5, w - 1.0, h - 3.0),
                color: if highlighted {
                    ThemeToken::MarkerHighlightFill
                } else {
                    ThemeToken::MarkerFill
                },
                border_color: Some(border),
                marker: Some(index),
            });

            let Some((text_x, available)) = marker.label_slot(margin_left) else {
                return;
            };
            if available <= text.min_width() {
                return;
            }
            if let Some(fitted) = text.fitted_text(&marker.text, available) {
                sink.submit(RenderCommand::DrawText {
                    position: Point::new(text_x, y + TEXT_OFFSET_TOP),
                    text: fitted.into(),
                    color: if highlighted {
                        ThemeToken::MarkerHighlightText
                    } else {
                        ThemeToken::MarkerText
                    },
                    font_size,
                });
            }
        }
    }
}
