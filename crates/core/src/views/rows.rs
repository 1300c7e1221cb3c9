//! Row backgrounds, separators, category labels and bucket headings.

use std::ops::Range;

use marker_chart_protocol::{MarkerRow, Point, Rect, RenderCommand, ThemeToken};

use super::{ChartContext, TEXT_OFFSET_START, TEXT_OFFSET_TOP};
use crate::config::OrganizationMode;
use crate::sink::RenderSink;

pub fn clear_row(sink: &mut dyn RenderSink, ctx: &ChartContext<'_>, row: usize) {
    let container = ctx.mapper.container();
    sink.submit(RenderCommand::ClearRect {
        rect: Rect::new(0.0, ctx.row_top(row), container.width, ctx.config.row_height),
    });
}

/// Fill the band behind a hovered or right-clicked row.
pub fn highlight_row(sink: &mut dyn RenderSink, ctx: &ChartContext<'_>, row: usize) {
    let container = ctx.mapper.container();
    sink.submit(RenderCommand::FillRect {
        rect: Rect::new(
            0.0,
            ctx.row_top(row),
            container.width - container.margin_right,
            ctx.config.row_height - 1.0,
        ),
        color: ThemeToken::RowHighlight,
    });
}

fn label_fit_width(ctx: &ChartContext<'_>) -> f64 {
    let container = ctx.mapper.container();
    match ctx.config.organization {
        OrganizationMode::Full => container.margin_left,
        OrganizationMode::ActiveTab => {
            container.width - container.margin_right - 2.0 * TEXT_OFFSET_START
        }
    }
}

/// The label drawn for `row`, if it has one: only the first timing row of
/// each category is labelled.
pub fn row_label(ctx: &ChartContext<'_>, row: usize) -> Option<String> {
    let timing = ctx.rows.timing(row)?;
    if !ctx.rows.is_first_of_category(row) {
        return None;
    }
    ctx.text.fitted_text(&timing.name, label_fit_width(ctx))
}

/// Width of the background drawn behind a row label.
pub fn label_background_width(ctx: &ChartContext<'_>, label: &str) -> f64 {
    ctx.text.text_width(label) + 2.0 * TEXT_OFFSET_START
}

/// Paint separators, category labels and bucket headings for `rows`.
/// `hovered_label` gets the hover background in active-tab mode.
pub fn draw_separators_and_labels(
    sink: &mut dyn RenderSink,
    ctx: &ChartContext<'_>,
    rows: Range<usize>,
    hovered_label: Option<usize>,
) {
    let container = ctx.mapper.container();
    let row_height = ctx.config.row_height;
    let used_width = container.width - container.margin_right;
    let font_size = ctx.config.font_size;

    for row in rows.clone() {
        // Bottom edge of the row; the top edge of row 0 belongs to the host.
        let y = ctx.row_top(row + 1) - 1.0;
        sink.submit(RenderCommand::FillRect {
            rect: Rect::new(0.0, y, used_width, 1.0),
            color: ThemeToken::RowSeparator,
        });
    }

    for row in rows.clone() {
        let Some(label) = row_label(ctx, row) else {
            continue;
        };
        let y = ctx.row_top(row);
        if ctx.config.organization.has_label_hit_regions() {
            sink.submit(RenderCommand::FillRect {
                rect: Rect::new(0.0, y, label_background_width(ctx, &label), row_height - 1.0),
                color: if hovered_label == Some(row) {
                    ThemeToken::RowLabelHoverBackground
                } else {
                    ThemeToken::RowLabelBackground
                },
            });
        }
        sink.submit(RenderCommand::DrawText {
            position: Point::new(TEXT_OFFSET_START, y + TEXT_OFFSET_TOP),
            text: label.into(),
            color: ThemeToken::RowLabelText,
            font_size,
        });
    }

    for row in rows {
        let Some(MarkerRow::Bucket { name }) = ctx.rows.get(row) else {
            continue;
        };
        let y = ctx.row_top(row);
        sink.submit(RenderCommand::FillRect {
            rect: Rect::new(0.0, y - 1.0, used_width, row_height),
            color: ThemeToken::BucketBackground,
        });
        let text = ctx
            .text
            .fitted_text(name, used_width - 2.0 * TEXT_OFFSET_START)
            .map_or_else(|| name.clone(), Into::into);
        sink.submit(RenderCommand::DrawText {
            position: Point::new(TEXT_OFFSET_START, y + TEXT_OFFSET_TOP),
            text,
            color: ThemeToken::BucketText,
            font_size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::coords::CoordinateMapper;
    use crate::model::{RowSequence, RowsVersion, TimeRange, Viewport};
    use crate::sink::CommandBuffer;
    use crate::text::MonospaceMeasure;
    use marker_chart_protocol::{MarkerIndex, SharedStr, TimingRow};

    fn rows() -> RowSequence {
        let timing = |name: &str, id: u32| {
            let mut row = TimingRow::new(name);
            row.push(0.0, 10.0, "m", MarkerIndex(id));
            MarkerRow::Timing(row)
        };
        RowSequence::new(
            RowsVersion(1),
            vec![
                MarkerRow::Bucket {
                    name: "Network".into(),
                },
                timing("Load", 0),
                timing("Load", 1),
                timing("Paint", 2),
            ],
        )
        .expect("valid rows")
    }

    fn texts(sink: &CommandBuffer) -> Vec<SharedStr> {
        sink.commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn paint(config: &ChartConfig, hovered_label: Option<usize>) -> CommandBuffer {
        let rows = rows();
        let container = config.container(600.0, 64.0);
        let mapper =
            CoordinateMapper::new(TimeRange::new(0.0, 100.0), Viewport::full(64.0), container)
                .expect("valid geometry");
        let text = MonospaceMeasure::new(5.0);
        let ctx = ChartContext {
            rows: &rows,
            mapper,
            config,
            text: &text,
        };
        let mut sink = CommandBuffer::new(config.font_size);
        draw_separators_and_labels(&mut sink, &ctx, 0..rows.len(), hovered_label);
        sink
    }

    #[test]
    fn labels_only_first_row_of_category() {
        let sink = paint(&ChartConfig::default(), None);
        assert_eq!(texts(&sink), vec!["Load", "Paint", "Network"]);
        let separators = sink
            .commands()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::FillRect {
                        color: ThemeToken::RowSeparator,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(separators, 4);
    }

    #[test]
    fn active_tab_labels_get_backgrounds() {
        let sink = paint(&ChartConfig::active_tab(), Some(3));
        let backgrounds: Vec<_> = sink
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::FillRect {
                    rect,
                    color:
                        color @ (ThemeToken::RowLabelBackground
                        | ThemeToken::RowLabelHoverBackground),
                } => Some((rect.w, *color)),
                _ => None,
            })
            .collect();
        // "Load" is 20px wide, "Paint" 25px, both padded by 3px on each side.
        assert_eq!(
            backgrounds,
            vec![
                (26.0, ThemeToken::RowLabelBackground),
                (31.0, ThemeToken::RowLabelHoverBackground),
            ]
        );
    }

    #[test]
    fn full_mode_has_no_label_backgrounds() {
        let sink = paint(&ChartConfig::default(), Some(1));
        assert!(!sink.commands().iter().any(|c| matches!(
            c,
            RenderCommand::FillRect {
                color: ThemeToken::RowLabelBackground | ThemeToken::RowLabelHoverBackground,
                ..
            }
        )));
    }
}
