use marker_chart_protocol::RowDefect;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Zero-length time range, empty viewport or no room between margins.
    #[error("degenerate geometry: {what}")]
    DegenerateGeometry { what: &'static str },
    #[error("surface transform scale is {scale}, expected 1")]
    ScaleAssumptionViolated { scale: f64 },
    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: RowDefect },
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type ChartResult<T> = Result<T, ChartError>;
