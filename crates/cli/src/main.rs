mod cli;
mod replay;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use marker_chart_core::actions::ActionLog;
use marker_chart_core::model::{
    ChartDocument, ChartFrame, ContainerGeometry, MarkerSource, RowsVersion, StaticMarkerSource,
    Viewport,
};
use marker_chart_core::sink::CommandBuffer;
use marker_chart_core::svg::render_svg;
use marker_chart_core::{ChartConfig, ChartSession, OrganizationMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, Format, FrameArgs};
use crate::replay::{PointerEvent, replay};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Command::Render {
            document,
            out,
            format,
            hover,
            dark,
            frame,
        } => {
            let chart = Chart::load(&document, &frame)?;
            let mut session = chart.session()?;
            let frame = chart.frame();

            if let Some(&[x, y]) = hover.as_deref() {
                // Paint once so row labels have text metrics to be hit against.
                session.draw_full(&mut CommandBuffer::new(chart.config.font_size), &frame)?;
                session.pointer_move(&frame, x, y, &mut ActionLog::new())?;
            }

            let mut sink = CommandBuffer::new(chart.config.font_size);
            session.draw_full(&mut sink, &frame)?;
            info!(commands = sink.len(), "painted chart");

            let text = match format {
                Format::Svg => render_svg(
                    sink.commands(),
                    chart.container.width,
                    chart.container.height,
                    dark,
                ),
                Format::Json => serde_json::to_string_pretty(sink.commands())?,
            };
            emit(out.as_deref(), &text)
        }
        Command::Hit {
            document,
            x,
            y,
            frame,
        } => {
            let chart = Chart::load(&document, &frame)?;
            let mut session = chart.session()?;
            let frame = chart.frame();
            session.draw_full(&mut CommandBuffer::new(chart.config.font_size), &frame)?;

            let text = match session.hit_test(&frame, x, y)? {
                Some(state) => serde_json::to_string(&state)?,
                None => "none".to_string(),
            };
            emit(None, &text)
        }
        Command::Replay {
            document,
            events,
            frame,
        } => {
            let chart = Chart::load(&document, &frame)?;
            let mut session = chart.session()?;
            let data = std::fs::read(&events)
                .with_context(|| format!("failed to read {}", events.display()))?;
            let events: Vec<PointerEvent> = serde_json::from_slice(&data)
                .with_context(|| format!("failed to parse {}", events.display()))?;

            let steps = replay(&mut session, &chart.source, &chart.frame(), &events)?;
            let mut lines = Vec::with_capacity(steps.len());
            for step in &steps {
                lines.push(serde_json::to_string(step)?);
            }
            emit(None, &lines.join("\n"))
        }
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A loaded document and the surface it is painted on.
struct Chart {
    source: StaticMarkerSource,
    config: ChartConfig,
    container: ContainerGeometry,
    viewport: Viewport,
}

impl Chart {
    fn load(document: &Path, args: &FrameArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let data = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_slice(&data)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => ChartConfig::default(),
        };
        if args.active_tab {
            config.organization = OrganizationMode::ActiveTab;
            config.margin_left = 0.0;
        }

        let data = std::fs::read(document)
            .with_context(|| format!("failed to read {}", document.display()))?;
        let doc = ChartDocument::from_json(&data)
            .with_context(|| format!("failed to parse {}", document.display()))?;
        let source = StaticMarkerSource::new(doc, RowsVersion(1))
            .with_context(|| format!("invalid rows in {}", document.display()))?;

        let height = args
            .height
            .unwrap_or_else(|| (source.rows().len() as f64 * config.row_height).max(config.row_height));
        let (left, right) = match args.viewport.as_deref() {
            Some(&[left, right]) => (left, right),
            Some(_) => bail!("--viewport takes LEFT and RIGHT"),
            None => (0.0, 1.0),
        };
        info!(
            rows = source.rows().len(),
            width = args.width,
            height,
            "loaded chart document"
        );

        Ok(Self {
            container: config.container(args.width, height),
            viewport: Viewport {
                left,
                right,
                top: args.top,
                bottom: args.top + height,
            },
            source,
            config,
        })
    }

    fn session(&self) -> Result<ChartSession> {
        Ok(ChartSession::new("main", self.config.clone())?)
    }

    fn frame(&self) -> ChartFrame<'_> {
        ChartFrame {
            rows: self.source.rows(),
            range: self.source.range(),
            viewport: self.viewport,
            container: self.container,
        }
    }
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
            Ok(())
        }
    }
}
