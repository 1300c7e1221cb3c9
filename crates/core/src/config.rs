use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::model::ContainerGeometry;

/// Which row-label behavior the chart exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizationMode {
    /// Labels live in the left margin and are not interactive.
    #[default]
    Full,
    /// Labels sit on a background over the chart and can be hovered.
    ActiveTab,
}

impl OrganizationMode {
    pub fn has_label_hit_regions(self) -> bool {
        matches!(self, Self::ActiveTab)
    }
}

/// Layout and interaction settings for a marker chart.
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Height of one row in pixels.
    pub row_height: f64,
    /// Width of the label gutter left of the plot area.
    pub margin_left: f64,
    /// Width of the empty gutter right of the plot area.
    pub margin_right: f64,
    /// Used to snap drawn geometry to device pixels. The sink itself always
    /// works in device-independent pixels.
    pub device_pixel_ratio: f64,
    /// Hit radius around the pointer, as a fraction of `row_height`.
    pub dot_radius_factor: f64,
    pub font_size: f64,
    pub organization: OrganizationMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            row_height: 16.0,
            margin_left: 150.0,
            margin_right: 15.0,
            device_pixel_ratio: 1.0,
            dot_radius_factor: 0.25,
            font_size: 11.0,
            organization: OrganizationMode::Full,
        }
    }
}

impl ChartConfig {
    /// Preset for the active-tab layout: no label gutter, hoverable labels
    /// drawn over the plot area.
    pub fn active_tab() -> Self {
        Self {
            margin_left: 0.0,
            organization: OrganizationMode::ActiveTab,
            ..Self::default()
        }
    }

    pub fn dot_radius(&self) -> f64 {
        self.dot_radius_factor * self.row_height
    }

    pub fn container(&self, width: f64, height: f64) -> ContainerGeometry {
        ContainerGeometry {
            width,
            height,
            margin_left: self.margin_left,
            margin_right: self.margin_right,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.row_height) {
            return Err(invalid("row_height", "must be a positive number"));
        }
        if !non_negative(self.margin_left) {
            return Err(invalid("margin_left", "must not be negative"));
        }
        // Hoverable labels sit at x = 0, inside any left gutter, where the
        // hit tester ignores the pointer.
        if self.organization.has_label_hit_regions() && self.margin_left > 0.0 {
            return Err(invalid("margin_left", "must be 0 with active-tab labels"));
        }
        if !non_negative(self.margin_right) {
            return Err(invalid("margin_right", "must not be negative"));
        }
        if !positive(self.device_pixel_ratio) {
            return Err(invalid("device_pixel_ratio", "must be a positive number"));
        }
        if !non_negative(self.dot_radius_factor) {
            return Err(invalid("dot_radius_factor", "must not be negative"));
        }
        if !positive(self.font_size) {
            return Err(invalid("font_size", "must be a positive number"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ChartError {
    ChartError::InvalidConfig { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
        assert!(ChartConfig::active_tab().validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"row_height": 20, "margin_left": 0, "organization": "active-tab"}"#)
                .expect("config should parse");
        assert_eq!(config.row_height, 20.0);
        assert_eq!(config.margin_right, 15.0);
        assert_eq!(config.organization, OrganizationMode::ActiveTab);
        assert_eq!(config.dot_radius(), 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn active_tab_needs_empty_left_gutter() {
        // Labels would be drawn inside the default 150px gutter and could
        // never be hovered.
        let config: ChartConfig = serde_json::from_str(r#"{"organization": "active-tab"}"#)
            .expect("config should parse");
        assert_eq!(config.margin_left, 150.0);
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig {
                field: "margin_left",
                ..
            })
        ));

        let full_mode = ChartConfig {
            margin_left: 150.0,
            ..ChartConfig::default()
        };
        assert!(full_mode.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let config = ChartConfig {
            row_height: 0.0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig {
                field: "row_height",
                ..
            })
        ));

        let config = ChartConfig {
            device_pixel_ratio: f64::NAN,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
