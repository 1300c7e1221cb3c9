//! Decides how much of the chart a frame must repaint and paints it.
//!
//! When only the hover state changed, at most two rows are repainted: the
//! newly hovered row and the previously hovered one. Anything else (pan,
//! zoom, new data, selection) repaints every visible row.

use std::ops::Range;

use marker_chart_protocol::{Rect, RenderCommand};
use serde::Serialize;
use tracing::debug;

use crate::config::OrganizationMode;
use crate::model::{HoverState, Viewport};
use crate::row_index::RowIndexMap;
use crate::sink::RenderSink;
use crate::views::ChartContext;
use crate::views::markers::{Highlights, draw_markers};
use crate::views::rows::{clear_row, draw_separators_and_labels, highlight_row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepaintMode {
    Full,
    HoverOnly,
}

/// Hover state before and after an event.
///
/// `hover_only` is set by the caller when nothing but the hover state
/// changed since the last paint: no pan, zoom, resize, data or selection
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTransition {
    pub previous: Option<HoverState>,
    pub current: Option<HoverState>,
    pub hover_only: bool,
}

impl HoverTransition {
    pub fn hover(previous: Option<HoverState>, current: Option<HoverState>) -> Self {
        Self {
            previous,
            current,
            hover_only: true,
        }
    }

    /// A transition that forces a full repaint with `current` hovered.
    pub fn full(current: Option<HoverState>) -> Self {
        Self {
            previous: current,
            current,
            hover_only: false,
        }
    }
}

/// Work for one row during a hover-only repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRepaint {
    pub row: usize,
    pub clear: bool,
    pub highlight: bool,
    pub labels: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepaintPlan {
    Full {
        rows: Range<usize>,
        highlight_row: Option<usize>,
    },
    Rows(Vec<RowRepaint>),
}

impl RepaintPlan {
    pub fn mode(&self) -> RepaintMode {
        match self {
            Self::Full { .. } => RepaintMode::Full,
            Self::Rows(_) => RepaintMode::HoverOnly,
        }
    }
}

/// Rows intersecting the viewport, clamped to `row_count`.
pub fn visible_rows(viewport: &Viewport, row_height: f64, row_count: usize) -> Range<usize> {
    let start = (viewport.top / row_height).floor().max(0.0) as usize;
    let end = ((viewport.bottom / row_height).ceil().max(0.0) as usize).min(row_count);
    start.min(end)..end
}

/// Row of the hovered marker, or of the hovered label when the marker is
/// unknown and labels are interactive.
pub fn resolve_row(
    state: Option<HoverState>,
    index: &RowIndexMap,
    organization: OrganizationMode,
) -> Option<usize> {
    let state = state?;
    state
        .marker_index()
        .and_then(|marker| index.row_of(marker))
        .or_else(|| {
            state
                .label_row()
                .filter(|_| organization.has_label_hit_regions())
        })
}

pub fn plan_repaint(
    transition: &HoverTransition,
    index: &RowIndexMap,
    right_clicked_row: Option<usize>,
    visible: Range<usize>,
    organization: OrganizationMode,
) -> RepaintPlan {
    let new_row = resolve_row(transition.current, index, organization);

    if !transition.hover_only {
        return RepaintPlan::Full {
            rows: visible,
            highlight_row: right_clicked_row.or(new_row),
        };
    }

    if transition.previous == transition.current {
        return RepaintPlan::Rows(Vec::new());
    }

    let old_row = resolve_row(transition.previous, index, organization);
    let label_hovered = transition
        .current
        .is_some_and(|state| state.label_row().is_some());

    let mut rows = Vec::with_capacity(2);
    if let Some(row) = new_row {
        rows.push(RowRepaint {
            row,
            clear: true,
            highlight: true,
            // Keep the hovered label's hit area visually distinct.
            labels: !label_hovered,
        });
    }
    if let Some(row) = old_row
        && old_row != new_row
    {
        rows.push(RowRepaint {
            row,
            // The right-clicked row keeps its highlight band.
            clear: Some(row) != right_clicked_row,
            highlight: false,
            labels: true,
        });
    }
    RepaintPlan::Rows(rows)
}

/// Issue the draw commands for `plan`.
pub fn paint(
    sink: &mut dyn RenderSink,
    ctx: &ChartContext<'_>,
    plan: &RepaintPlan,
    highlights: &Highlights,
    hovered_label: Option<usize>,
) {
    match plan {
        RepaintPlan::Full {
            rows,
            highlight_row: highlighted,
        } => {
            let container = ctx.mapper.container();
            debug!(rows = ?rows, highlighted = ?highlighted, "full repaint");
            sink.submit(RenderCommand::BeginGroup {
                id: "marker-chart".into(),
            });
            sink.submit(RenderCommand::ClearRect {
                rect: Rect::new(0.0, 0.0, container.width, container.height),
            });
            if let Some(row) = *highlighted {
                highlight_row(sink, ctx, row);
            }
            draw_markers(sink, ctx, rows.clone(), highlights);
            draw_separators_and_labels(sink, ctx, rows.clone(), hovered_label);
            sink.submit(RenderCommand::EndGroup);
        }
        RepaintPlan::Rows(rows) => {
            debug!(rows = rows.len(), "hover-only repaint");
            for repaint in rows {
                let row = repaint.row;
                sink.submit(RenderCommand::BeginGroup {
                    id: format!("row-{row}").into(),
                });
                if repaint.clear {
                    clear_row(sink, ctx, row);
                }
                if repaint.highlight {
                    highlight_row(sink, ctx, row);
                }
                draw_markers(sink, ctx, row..row + 1, highlights);
                if repaint.labels {
                    draw_separators_and_labels(sink, ctx, row..row + 1, hovered_label);
                }
                sink.submit(RenderCommand::EndGroup);
            }
        }
    }
}
