use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    // Interval and instant markers
    MarkerFill,
    MarkerSmallFill,
    MarkerBorder,
    MarkerText,
    MarkerHighlightFill,
    MarkerHighlightBorder,
    MarkerHighlightText,

    // Row decorations
    RowHighlight,
    RowSeparator,
    RowLabelText,
    RowLabelBackground,
    RowLabelHoverBackground,

    // Bucket separator rows
    BucketBackground,
    BucketText,
}
