use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Render and inspect marker timeline charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Paint a chart document to SVG or to a JSON render command list
    Render {
        /// Chart document (JSON)
        #[arg(value_name = "DOC")]
        document: PathBuf,

        /// Write here instead of stdout
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Paint with the pointer hovering this surface position
        #[arg(long, value_names = ["X", "Y"], num_args = 2)]
        hover: Option<Vec<f64>>,

        /// Use the dark palette for SVG output
        #[arg(long)]
        dark: bool,

        #[command(flatten)]
        frame: FrameArgs,
    },

    /// Print what lies under a surface position
    Hit {
        #[arg(value_name = "DOC")]
        document: PathBuf,

        #[arg(value_name = "X")]
        x: f64,

        #[arg(value_name = "Y")]
        y: f64,

        #[command(flatten)]
        frame: FrameArgs,
    },

    /// Replay recorded pointer events, printing dispatched actions and the
    /// repaint each event caused
    Replay {
        #[arg(value_name = "DOC")]
        document: PathBuf,

        /// JSON list of pointer events
        #[arg(value_name = "EVENTS")]
        events: PathBuf,

        #[command(flatten)]
        frame: FrameArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Svg,
    Json,
}

/// Surface and viewport options shared by every subcommand.
#[derive(Args, Debug)]
pub struct FrameArgs {
    /// Chart configuration (JSON); flags below override it
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Expose hoverable row labels over the plot area
    #[arg(long = "active-tab")]
    pub active_tab: bool,

    /// Surface width in pixels
    #[arg(long, value_name = "PX", default_value_t = 1200.0)]
    pub width: f64,

    /// Surface height in pixels (default: tall enough for every row)
    #[arg(long, value_name = "PX")]
    pub height: Option<f64>,

    /// Visible fraction of the time range
    #[arg(long, value_names = ["LEFT", "RIGHT"], num_args = 2)]
    pub viewport: Option<Vec<f64>>,

    /// Vertical scroll offset in pixels
    #[arg(long, value_name = "PX", default_value_t = 0.0)]
    pub top: f64,
}
