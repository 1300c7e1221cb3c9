//! Conversions between absolute time, unit-interval viewport position and
//! surface pixels.
//!
//! Hit testing works on the unrounded values returned here; painting snaps
//! its output with [`snap_to_device_pixel`].

use crate::error::{ChartError, ChartResult};
use crate::model::{ContainerGeometry, TimeRange, Viewport};

pub fn time_to_unit_interval(t: f64, range: &TimeRange) -> ChartResult<f64> {
    check_range(range)?;
    Ok((t - range.start) / range.length())
}

pub fn unit_interval_to_time(u: f64, range: &TimeRange) -> ChartResult<f64> {
    check_range(range)?;
    Ok(range.start + u * range.length())
}

pub fn unit_interval_to_pixel(
    u: f64,
    viewport: &Viewport,
    container: &ContainerGeometry,
) -> ChartResult<f64> {
    check_viewport(viewport)?;
    check_container(container)?;
    Ok(container.margin_left + (u - viewport.left) * container.plot_width() / viewport.length())
}

pub fn pixel_to_unit_interval(
    x: f64,
    viewport: &Viewport,
    container: &ContainerGeometry,
) -> ChartResult<f64> {
    check_viewport(viewport)?;
    check_container(container)?;
    Ok(viewport.left + viewport.length() * (x - container.margin_left) / container.plot_width())
}

/// Round to the nearest device pixel so edges do not blur.
pub fn snap_to_device_pixel(x: f64, device_pixel_ratio: f64) -> f64 {
    (x * device_pixel_ratio).round() / device_pixel_ratio
}

fn check_range(range: &TimeRange) -> ChartResult<()> {
    if range.start.is_finite() && range.end.is_finite() && range.end > range.start {
        Ok(())
    } else {
        Err(ChartError::DegenerateGeometry {
            what: "time range has no length",
        })
    }
}

/// The viewport must be a non-empty part of the unit interval:
/// `0 <= left < right <= 1`.
fn check_viewport(viewport: &Viewport) -> ChartResult<()> {
    let Viewport { left, right, .. } = *viewport;
    if !(left.is_finite() && right.is_finite()) || left >= right {
        return Err(ChartError::DegenerateGeometry {
            what: "viewport has no width",
        });
    }
    if left < 0.0 || right > 1.0 {
        return Err(ChartError::DegenerateGeometry {
            what: "viewport extends past the time range",
        });
    }
    Ok(())
}

fn check_container(container: &ContainerGeometry) -> ChartResult<()> {
    let width = container.plot_width();
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ChartError::DegenerateGeometry {
            what: "no plot area between the margins",
        })
    }
}

/// Precomputed time ↔ pixel transform for one frame.
///
/// Construction validates all three inputs once, so the per-marker methods
/// are infallible.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    range: TimeRange,
    viewport: Viewport,
    container: ContainerGeometry,
    /// Pixels per unit of the unit interval.
    px_per_unit: f64,
}

impl CoordinateMapper {
    pub fn new(
        range: TimeRange,
        viewport: Viewport,
        container: ContainerGeometry,
    ) -> ChartResult<Self> {
        check_range(&range)?;
        check_viewport(&viewport)?;
        check_container(&container)?;
        Ok(Self {
            range,
            viewport,
            container,
            px_per_unit: container.plot_width() / viewport.length(),
        })
    }

    pub fn range(&self) -> &TimeRange {
        &self.range
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn container(&self) -> &ContainerGeometry {
        &self.container
    }

    pub fn time_to_unit(&self, t: f64) -> f64 {
        (t - self.range.start) / self.range.length()
    }

    pub fn unit_to_x(&self, u: f64) -> f64 {
        self.container.margin_left + (u - self.viewport.left) * self.px_per_unit
    }

    pub fn time_to_x(&self, t: f64) -> f64 {
        self.unit_to_x(self.time_to_unit(t))
    }

    /// Pixel width of the span `[start, end]`.
    pub fn span_width(&self, start: f64, end: f64) -> f64 {
        (self.time_to_unit(end) - self.time_to_unit(start)) * self.px_per_unit
    }

    pub fn x_to_time(&self, x: f64) -> f64 {
        let u = self.viewport.left + (x - self.container.margin_left) / self.px_per_unit;
        self.range.start + u * self.range.length()
    }

    /// Duration covered by `px` pixels at the current zoom.
    pub fn pixels_to_duration(&self, px: f64) -> f64 {
        px / self.px_per_unit * self.range.length()
    }

    /// Time window worth drawing: from the viewport's left edge to its
    /// right edge extended by the right gutter.
    pub fn visible_time_window(&self) -> (f64, f64) {
        let left = self.range.start + self.range.length() * self.viewport.left;
        let right = self.range.start
            + self.range.length() * self.viewport.right
            + self.pixels_to_duration(self.container.margin_right);
        (left, right)
    }

    /// Whether `x` lies between the two gutters.
    pub fn is_in_plot(&self, x: f64) -> bool {
        x >= self.container.margin_left && x <= self.container.width - self.container.margin_right
    }
}
