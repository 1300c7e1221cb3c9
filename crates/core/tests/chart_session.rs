//! Integration test: load a chart document, paint it through a session and
//! drive pointer interaction against the recorded commands.

use marker_chart_core::actions::{Action, ActionLog, PreviewSelection, SelectionOrigin};
use marker_chart_core::model::{
    ChartDocument, ChartFrame, HoverState, MarkerSource, RowsVersion, StaticMarkerSource, Viewport,
};
use marker_chart_core::redraw::RepaintMode;
use marker_chart_core::sink::CommandBuffer;
use marker_chart_core::svg::render_svg;
use marker_chart_core::{ChartConfig, ChartSession};
use marker_chart_protocol::{MarkerIndex, RenderCommand, ThemeToken};

const WIDTH: f64 = 150.0 + 1000.0 + 15.0;
const HEIGHT: f64 = 80.0;

fn source() -> StaticMarkerSource {
    let data = include_bytes!("fixtures/markers.json");
    let doc = ChartDocument::from_json(data).expect("fixture should parse");
    StaticMarkerSource::new(doc, RowsVersion(1)).expect("fixture rows should be valid")
}

/// One pixel per time unit, all five rows visible.
fn frame<'a>(source: &'a StaticMarkerSource, config: &ChartConfig) -> ChartFrame<'a> {
    ChartFrame {
        rows: source.rows(),
        range: source.range(),
        viewport: Viewport::full(HEIGHT),
        container: config.container(WIDTH, HEIGHT),
    }
}

fn texts(commands: &[RenderCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::DrawText { text, .. } => Some(text.to_string()),
            _ => None,
        })
        .collect()
}

fn group_ids(commands: &[RenderCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::BeginGroup { id } => Some(id.to_string()),
            _ => None,
        })
        .collect()
}

fn marker_of(command: &RenderCommand) -> Option<MarkerIndex> {
    match command {
        RenderCommand::DrawRect { marker, .. } | RenderCommand::FillPath { marker, .. } => *marker,
        _ => None,
    }
}

#[test]
fn full_paint_of_document() {
    let source = source();
    let mut session = ChartSession::new("main", ChartConfig::default()).expect("valid config");
    let frame = frame(&source, session.config());
    let mut sink = CommandBuffer::new(11.0);

    let mode = session.draw_full(&mut sink, &frame).expect("draw should succeed");
    assert_eq!(mode, RepaintMode::Full);

    let commands = sink.commands();
    assert_eq!(group_ids(commands), vec!["marker-chart"]);
    assert!(matches!(
        commands.get(1),
        Some(RenderCommand::ClearRect { rect }) if rect.w == WIDTH && rect.h == HEIGHT
    ));

    // Row 2 continues the "Navigation" category and carries no label.
    let labels = texts(commands);
    assert_eq!(labels.iter().filter(|t| *t == "Navigation").count(), 1);
    assert!(labels.contains(&"GC".to_string()));
    assert!(labels.contains(&"Paint".to_string()));
    assert!(labels.contains(&"Page load".to_string()));
    // "load" spans 120px, enough room for its label.
    assert!(labels.contains(&"load".to_string()));

    let mut drawn: Vec<_> = commands.iter().filter_map(marker_of).collect();
    drawn.sort();
    drawn.dedup();
    assert_eq!(drawn.len(), 7);

    let svg = render_svg(commands, WIDTH, HEIGHT, false);
    assert!(svg.contains(r#"data-marker="5""#));
    assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
}

#[test]
fn hover_across_rows_repaints_only_those_rows() {
    let source = source();
    let mut session = ChartSession::new("main", ChartConfig::default()).expect("valid config");
    let frame = frame(&source, session.config());
    let mut actions = ActionLog::new();
    let mut sink = CommandBuffer::new(11.0);
    session.draw_full(&mut sink, &frame).expect("initial draw");
    sink.take();

    // "load" in row 1.
    let first = session
        .pointer_move(&frame, 150.0 + 350.0, 20.0, &mut actions)
        .expect("pointer move");
    assert_eq!(first.current, Some(HoverState::marker(MarkerIndex(1))));
    session.draw(&mut sink, &frame, &first).expect("draw");
    assert_eq!(group_ids(sink.commands()), vec!["row-1"]);
    sink.take();

    // "MajorGC" in row 3.
    let second = session
        .pointer_move(&frame, 150.0 + 600.0, 52.0, &mut actions)
        .expect("pointer move");
    assert_eq!(second.previous, first.current);
    assert_eq!(second.current, Some(HoverState::marker(MarkerIndex(5))));
    let mode = session.draw(&mut sink, &frame, &second).expect("draw");
    assert_eq!(mode, RepaintMode::HoverOnly);
    assert_eq!(group_ids(sink.commands()), vec!["row-3", "row-1"]);

    // The hovered marker gets the highlight fill.
    assert!(sink.commands().iter().any(|c| matches!(
        c,
        RenderCommand::DrawRect {
            marker: Some(MarkerIndex(5)),
            color: ThemeToken::MarkerHighlightFill,
            ..
        }
    )));

    let times: Vec<_> = actions
        .actions()
        .iter()
        .filter_map(|a| match a {
            Action::ChangeMouseTimePosition { time } => *time,
            _ => None,
        })
        .collect();
    assert_eq!(times.len(), 2);
    assert!((times[0] - 350.0).abs() < 1e-9);
    assert!((times[1] - 600.0).abs() < 1e-9);
}

#[test]
fn selected_marker_is_painted_last() {
    let source = source();
    let mut session = ChartSession::new("main", ChartConfig::default()).expect("valid config");
    let frame = frame(&source, session.config());
    let mut actions = ActionLog::new();

    let transition = session.select_marker(Some(MarkerIndex(3)), &mut actions);
    assert!(!transition.hover_only);
    assert_eq!(
        actions.take(),
        vec![Action::ChangeSelectedMarker {
            group: "main".into(),
            marker: Some(MarkerIndex(3)),
            origin: SelectionOrigin::Api,
        }]
    );

    let mut sink = CommandBuffer::new(11.0);
    session.draw(&mut sink, &frame, &transition).expect("draw");
    let last = sink.commands().iter().filter_map(marker_of).last();
    assert_eq!(last, Some(MarkerIndex(3)));
}

#[test]
fn double_click_previews_intervals_only() {
    let source = source();
    let mut session = ChartSession::new("main", ChartConfig::default()).expect("valid config");
    let frame = frame(&source, session.config());
    let mut actions = ActionLog::new();

    session
        .pointer_move(&frame, 150.0 + 350.0, 20.0, &mut actions)
        .expect("pointer move");
    let selection = session.double_click(&source, &mut actions);
    assert_eq!(
        selection,
        Some(PreviewSelection {
            start: 300.0,
            end: 420.0,
        })
    );

    // "DOMContentLoaded" is an instant marker.
    session
        .pointer_move(&frame, 150.0 + 120.0, 20.0, &mut actions)
        .expect("pointer move");
    assert_eq!(session.hovered(), Some(HoverState::marker(MarkerIndex(0))));
    assert_eq!(session.double_click(&source, &mut actions), None);

    let previews = actions
        .actions()
        .iter()
        .filter(|a| matches!(a, Action::UpdatePreviewSelection { .. }))
        .count();
    assert_eq!(previews, 1);
}

#[test]
fn scrolled_viewport_paints_visible_rows_only() {
    let source = source();
    let mut session = ChartSession::new("main", ChartConfig::default()).expect("valid config");
    let frame = ChartFrame {
        viewport: Viewport {
            left: 0.0,
            right: 1.0,
            top: 40.0,
            bottom: 72.0,
        },
        ..frame(&source, session.config())
    };
    let mut sink = CommandBuffer::new(11.0);
    session.draw_full(&mut sink, &frame).expect("draw");

    // Rows 2 through 4 intersect [40, 72).
    let mut drawn: Vec<_> = sink.commands().iter().filter_map(marker_of).collect();
    drawn.sort();
    drawn.dedup();
    assert_eq!(
        drawn,
        vec![
            MarkerIndex(2),
            MarkerIndex(3),
            MarkerIndex(4),
            MarkerIndex(5),
            MarkerIndex(6)
        ]
    );
}
