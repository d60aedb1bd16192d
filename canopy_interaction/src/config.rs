// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer configuration.

use canopy_layout::LayoutConfig;
use canopy_render::RenderConfig;
use kurbo::Vec2;
use serde::Deserialize;

use crate::error::ConfigError;

/// Gesture thresholds, zoom limits and tooltip placement.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel, in surface pixels, after which a press becomes a pan.
    pub drag_distance: f64,
    /// Longest press, in milliseconds, still counted as a click when the
    /// node under the pointer changed between down and up. `None` accepts
    /// any duration.
    pub click_time_ms: Option<u64>,
    /// Smallest zoom factor.
    pub min_scale: f64,
    /// Largest zoom factor.
    pub max_scale: f64,
    /// Zoom exponent per wheel pixel.
    pub wheel_pixel_factor: f64,
    /// Zoom exponent per wheel line.
    pub wheel_line_factor: f64,
    /// Zoom exponent per wheel page.
    pub wheel_page_factor: f64,
    /// Tooltip position relative to the pointer.
    pub tooltip_offset: Vec2,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_distance: 5.0,
            click_time_ms: Some(300),
            min_scale: 0.1,
            max_scale: 10.0,
            wheel_pixel_factor: 0.002,
            wheel_line_factor: 0.05,
            wheel_page_factor: 1.0,
            tooltip_offset: Vec2::new(8.0, -20.0),
        }
    }
}

/// Everything a [`TreeView`](crate::TreeView) can be configured with.
///
/// ```rust
/// use canopy_interaction::ViewerConfig;
///
/// let config = ViewerConfig::from_json_str(r#"{ "render": { "duration_ms": 0 } }"#).unwrap();
/// assert_eq!(config.render.duration_ms, 0.0);
/// assert_eq!(config.layout.top_offset, 50.0);
/// assert_eq!(config.interaction.drag_distance, 5.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Tidy tree parameters.
    pub layout: LayoutConfig,
    /// Visual encoding and timing.
    pub render: RenderConfig,
    /// Gestures and tooltip.
    pub interaction: InteractionConfig,
}

impl ViewerConfig {
    /// Reads a configuration from JSON; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json_str("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn nested_overrides() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "layout": { "node_spacing": { "width": 200.0, "height": 80.0 } },
                "interaction": { "click_time_ms": null, "tooltip_offset": { "x": 0.0, "y": 12.0 } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.layout.node_spacing.width, 200.0);
        assert_eq!(config.interaction.click_time_ms, None);
        assert_eq!(config.interaction.tooltip_offset, Vec2::new(0.0, 12.0));
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ViewerConfig::from_json_str(r#"{ "layout": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid viewer configuration"));
    }
}
