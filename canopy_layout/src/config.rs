// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout parameters.

use kurbo::Size;
use serde::Deserialize;

/// Parameters of the tidy tree layout and the centering step.
///
/// Deserializes from a partial object; missing fields keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal distance between adjacent siblings and vertical distance
    /// between levels.
    pub node_spacing: Size,
    /// Footprint of a drawn node, centered on its position.
    pub node_size: Size,
    /// Drawable area the tree is centered in.
    pub viewport: Size,
    /// Vertical offset of the root from the top of the viewport.
    pub top_offset: f64,
    /// Gap between siblings, in multiples of `node_spacing.width`.
    pub sibling_separation: f64,
    /// Gap between nodes with different parents, in multiples of
    /// `node_spacing.width`.
    pub cousin_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: Size::new(150.0, 100.0),
            node_size: Size::new(120.0, 50.0),
            // 960×600 canvas minus margins of 90/90/40/50.
            viewport: Size::new(780.0, 510.0),
            top_offset: 50.0,
            sibling_separation: 1.0,
            cousin_separation: 2.0,
        }
    }
}
