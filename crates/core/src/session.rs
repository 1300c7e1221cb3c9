use marker_chart_protocol::{MarkerIndex, SharedStr};
use tracing::{debug, warn};

use crate::actions::{ActionSink, PreviewSelection, SelectionOrigin};
use crate::config::ChartConfig;
use crate::coords::CoordinateMapper;
use crate::error::{ChartError, ChartResult};
use crate::hit_test::hit_test;
use crate::model::{ChartFrame, HoverState, MarkerSource};
use crate::redraw::{HoverTransition, RepaintMode, paint, plan_repaint, visible_rows};
use crate::row_index::RowIndexCache;
use crate::sink::{RenderSink, ensure_identity_scale};
use crate::text::TextMeasure;
use crate::views::ChartContext;
use crate::views::markers::Highlights;

/// One interactive marker chart.
///
/// Owns everything that persists between events: the interaction state,
/// the memoized row index and the text metrics of the surface it draws on.
/// Rows, time range and viewport are passed in with every call through a
/// [`ChartFrame`].
pub struct ChartSession {
    config: ChartConfig,
    group: SharedStr,
    row_index: RowIndexCache,
    /// Created from the sink on the first draw.
    text: Option<Box<dyn TextMeasure>>,
    hovered: Option<HoverState>,
    selected: Option<MarkerIndex>,
    right_clicked: Option<MarkerIndex>,
}

impl ChartSession {
    /// `group` identifies this chart in selection notifications.
    pub fn new(group: impl Into<SharedStr>, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            group: group.into(),
            row_index: RowIndexCache::new(),
            text: None,
            hovered: None,
            selected: None,
            right_clicked: None,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn group(&self) -> &SharedStr {
        &self.group
    }

    pub fn hovered(&self) -> Option<HoverState> {
        self.hovered
    }

    pub fn selected(&self) -> Option<MarkerIndex> {
        self.selected
    }

    pub fn right_clicked(&self) -> Option<MarkerIndex> {
        self.right_clicked
    }

    /// Paint `transition` into `sink`.
    ///
    /// Nothing is submitted when the sink's transform is not the identity or
    /// the frame geometry is degenerate.
    pub fn draw(
        &mut self,
        sink: &mut dyn RenderSink,
        frame: &ChartFrame<'_>,
        transition: &HoverTransition,
    ) -> ChartResult<RepaintMode> {
        ensure_identity_scale(sink)?;
        let mapper = frame_mapper(frame, "draw")?;

        let index = self.row_index.get(frame.rows);
        let text: &dyn TextMeasure = &**self.text.get_or_insert_with(|| {
            debug!("created text measurement for surface");
            sink.text_measurement()
        });

        let right_clicked_row = self.right_clicked.and_then(|marker| index.row_of(marker));
        let visible = visible_rows(&frame.viewport, self.config.row_height, frame.rows.len());
        let plan = plan_repaint(
            transition,
            &index,
            right_clicked_row,
            visible,
            self.config.organization,
        );

        let highlights = Highlights {
            hovered: transition.current.and_then(|state| state.marker_index()),
            selected: self.selected,
            right_clicked: self.right_clicked,
        };
        let ctx = ChartContext {
            rows: frame.rows,
            mapper,
            config: &self.config,
            text,
        };
        paint(
            sink,
            &ctx,
            &plan,
            &highlights,
            transition.current.and_then(|state| state.label_row()),
        );
        Ok(plan.mode())
    }

    /// Repaint everything with the current hover state.
    pub fn draw_full(
        &mut self,
        sink: &mut dyn RenderSink,
        frame: &ChartFrame<'_>,
    ) -> ChartResult<RepaintMode> {
        let transition = HoverTransition::full(self.hovered);
        self.draw(sink, frame, &transition)
    }

    /// What is under `(x, y)`, without changing any state.
    ///
    /// Row labels can only be hit once the session has drawn, since their
    /// extent depends on the surface's text metrics.
    pub fn hit_test(&self, frame: &ChartFrame<'_>, x: f64, y: f64) -> ChartResult<Option<HoverState>> {
        let mapper = frame_mapper(frame, "hit test")?;
        Ok(hit_test(
            frame.rows,
            &mapper,
            &self.config,
            self.text.as_deref(),
            x,
            y,
        ))
    }

    /// Track the pointer: update the hover state and report the time under
    /// it. The returned transition is what the host should draw next.
    pub fn pointer_move(
        &mut self,
        frame: &ChartFrame<'_>,
        x: f64,
        y: f64,
        actions: &mut dyn ActionSink,
    ) -> ChartResult<HoverTransition> {
        let mapper = frame_mapper(frame, "hit test")?;
        let current = hit_test(
            frame.rows,
            &mapper,
            &self.config,
            self.text.as_deref(),
            x,
            y,
        );
        actions.change_mouse_time_position(mapper.is_in_plot(x).then(|| mapper.x_to_time(x)));
        Ok(self.set_hovered(current))
    }

    pub fn pointer_leave(&mut self, actions: &mut dyn ActionSink) -> HoverTransition {
        actions.change_mouse_time_position(None);
        self.set_hovered(None)
    }

    /// Select the hovered marker, or clear the selection when nothing is
    /// hovered.
    pub fn click(&mut self, actions: &mut dyn ActionSink) -> HoverTransition {
        let marker = self.hovered_marker();
        self.change_selection(marker, SelectionOrigin::Click, actions)
    }

    /// Select `marker` on behalf of the host.
    pub fn select_marker(
        &mut self,
        marker: Option<MarkerIndex>,
        actions: &mut dyn ActionSink,
    ) -> HoverTransition {
        self.change_selection(marker, SelectionOrigin::Api, actions)
    }

    /// Preview-select the hovered interval marker. Instant markers and
    /// markers the source does not know are ignored.
    pub fn double_click(
        &mut self,
        source: &dyn MarkerSource,
        actions: &mut dyn ActionSink,
    ) -> Option<PreviewSelection> {
        let record = source.marker(self.hovered_marker()?)?;
        let selection = PreviewSelection {
            start: record.start,
            end: record.end?,
        };
        actions.update_preview_selection(selection);
        Some(selection)
    }

    pub fn right_click(&mut self, actions: &mut dyn ActionSink) -> HoverTransition {
        self.right_clicked = self.hovered_marker();
        debug!(marker = ?self.right_clicked, "right-clicked marker changed");
        actions.change_right_clicked_marker(&self.group, self.right_clicked);
        HoverTransition::full(self.hovered)
    }

    /// Forget the text metrics, for when the host moves the chart to a
    /// different surface.
    pub fn reset_surface(&mut self) {
        self.text = None;
    }

    fn hovered_marker(&self) -> Option<MarkerIndex> {
        self.hovered.and_then(|state| state.marker_index())
    }

    fn set_hovered(&mut self, current: Option<HoverState>) -> HoverTransition {
        let previous = std::mem::replace(&mut self.hovered, current);
        if previous != current {
            debug!(?previous, ?current, "hover changed");
        }
        HoverTransition::hover(previous, current)
    }

    fn change_selection(
        &mut self,
        marker: Option<MarkerIndex>,
        origin: SelectionOrigin,
        actions: &mut dyn ActionSink,
    ) -> HoverTransition {
        self.selected = marker;
        debug!(?marker, ?origin, "selected marker changed");
        actions.change_selected_marker(&self.group, marker, origin);
        HoverTransition::full(self.hovered)
    }
}

fn frame_mapper(frame: &ChartFrame<'_>, operation: &'static str) -> ChartResult<CoordinateMapper> {
    frame.mapper().inspect_err(|err| {
        if let ChartError::DegenerateGeometry { what } = err {
            warn!(operation, what, "skipped on degenerate geometry");
        }
    })
}
