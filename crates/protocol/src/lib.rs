pub mod commands;
pub mod marker_rows;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::RenderCommand;
pub use marker_rows::{MarkerIndex, MarkerRecord, MarkerRow, RowDefect, TimingRow};
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Point, Rect};
