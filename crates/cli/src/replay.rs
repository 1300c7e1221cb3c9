use anyhow::Result;
use marker_chart_core::ChartSession;
use marker_chart_core::actions::{Action, ActionLog};
use marker_chart_core::model::{ChartFrame, HoverState, MarkerSource};
use marker_chart_core::redraw::RepaintMode;
use marker_chart_core::sink::CommandBuffer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recorded pointer event, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
    Click,
    DoubleClick,
    RightClick,
}

/// Outcome of one replayed event.
#[derive(Debug, Serialize)]
pub struct ReplayStep {
    pub event: PointerEvent,
    pub hovered: Option<HoverState>,
    /// `None` when the event needs no repaint.
    pub repaint: Option<RepaintMode>,
    pub commands: usize,
    pub actions: Vec<Action>,
}

/// Feed `events` through `session`, painting after each one the way a host
/// would. The session is painted in full once before the first event.
pub fn replay(
    session: &mut ChartSession,
    source: &dyn MarkerSource,
    frame: &ChartFrame<'_>,
    events: &[PointerEvent],
) -> Result<Vec<ReplayStep>> {
    let mut sink = CommandBuffer::new(session.config().font_size);
    session.draw_full(&mut sink, frame)?;
    sink.take();

    let mut log = ActionLog::new();
    let mut steps = Vec::with_capacity(events.len());
    for &event in events {
        let transition = match event {
            PointerEvent::Move { x, y } => Some(session.pointer_move(frame, x, y, &mut log)?),
            PointerEvent::Leave => Some(session.pointer_leave(&mut log)),
            PointerEvent::Click => Some(session.click(&mut log)),
            PointerEvent::DoubleClick => {
                session.double_click(source, &mut log);
                None
            }
            PointerEvent::RightClick => Some(session.right_click(&mut log)),
        };

        let repaint = match transition {
            Some(transition) => Some(session.draw(&mut sink, frame, &transition)?),
            None => None,
        };
        let commands = sink.take().len();
        debug!(?event, ?repaint, commands, "replayed event");

        steps.push(ReplayStep {
            event,
            hovered: session.hovered(),
            repaint,
            commands,
            actions: log.take(),
        });
    }
    Ok(steps)
}
