//! Marker chart core: maps time to pixels, lays out and paints marker rows
//! into a [`sink::RenderSink`], and resolves pointer positions back to
//! markers.
//!
//! ```text
//!   RowSequence ──▶ RowIndexMap ─┐
//!   TimeRange ────▶ Coordinate ──┼─▶ RepaintPlan ──▶ RenderCommand[] ──▶ sink
//!   Viewport  ────▶   Mapper ────┤
//!   pointer (x, y) ──▶ hit_test ─┴─▶ HoverState ──▶ next RepaintPlan
//! ```

pub mod actions;
pub mod config;
pub mod coords;
pub mod error;
pub mod model;
pub mod redraw;
pub mod row_index;
pub mod session;
pub mod sink;
pub mod svg;
pub mod text;
pub mod views;

pub use config::{ChartConfig, OrganizationMode};
pub use error::{ChartError, ChartResult};
pub use session::ChartSession;
