pub mod geometry;
pub mod hover;
pub mod rows;
pub mod source;

pub use geometry::{ChartFrame, ContainerGeometry, TimeRange, Viewport};
pub use hover::HoverState;
pub use rows::{RowSequence, RowsVersion};
pub use source::{ChartDocument, MarkerSource, StaticMarkerSource};
