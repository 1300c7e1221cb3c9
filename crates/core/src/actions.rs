//! Outbound notifications of user interaction.
//!
//! The chart never waits on these: a sink records or forwards them and the
//! chart carries on with its own hover bookkeeping.

use marker_chart_protocol::{MarkerIndex, SharedStr};
use serde::Serialize;

/// Who asked for a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    Click,
    Api,
}

/// A time span to preview-select, in absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewSelection {
    pub start: f64,
    pub end: f64,
}

pub trait ActionSink {
    fn update_preview_selection(&mut self, selection: PreviewSelection);

    /// `None` when the pointer left the plot area.
    fn change_mouse_time_position(&mut self, time: Option<f64>);

    fn change_selected_marker(
        &mut self,
        group: &SharedStr,
        marker: Option<MarkerIndex>,
        origin: SelectionOrigin,
    );

    fn change_right_clicked_marker(&mut self, group: &SharedStr, marker: Option<MarkerIndex>);
}

/// One dispatched notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    UpdatePreviewSelection {
        selection: PreviewSelection,
    },
    ChangeMouseTimePosition {
        time: Option<f64>,
    },
    ChangeSelectedMarker {
        group: SharedStr,
        marker: Option<MarkerIndex>,
        origin: SelectionOrigin,
    },
    ChangeRightClickedMarker {
        group: SharedStr,
        marker: Option<MarkerIndex>,
    },
}

/// An [`ActionSink`] that keeps every notification in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionSink for ActionLog {
    fn update_preview_selection(&mut self, selection: PreviewSelection) {
        self.actions.push(Action::UpdatePreviewSelection { selection });
    }

    fn change_mouse_time_position(&mut self, time: Option<f64>) {
        self.actions.push(Action::ChangeMouseTimePosition { time });
    }

    fn change_selected_marker(
        &mut self,
        group: &SharedStr,
        marker: Option<MarkerIndex>,
        origin: SelectionOrigin,
    ) {
        self.actions.push(Action::ChangeSelectedMarker {
            group: group.clone(),
            marker,
            origin,
        });
    }

    fn change_right_clicked_marker(&mut self, group: &SharedStr, marker: Option<MarkerIndex>) {
        self.actions.push(Action::ChangeRightClickedMarker {
            group: group.clone(),
            marker,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_order_and_serializes() {
        let group: SharedStr = "main".into();
        let mut log = ActionLog::new();
        log.change_mouse_time_position(Some(12.5));
        log.change_selected_marker(&group, Some(MarkerIndex(4)), SelectionOrigin::Click);
        log.change_right_clicked_marker(&group, None);

        assert_eq!(log.actions().len(), 3);
        let json = serde_json::to_value(&log.actions()[1]).expect("action serializes");
        assert_eq!(json["action"], "change_selected_marker");
        assert_eq!(json["group"], "main");
        assert_eq!(json["marker"], 4);
        assert_eq!(json["origin"], "click");

        assert_eq!(log.take().len(), 3);
        assert!(log.is_empty());
    }
}
