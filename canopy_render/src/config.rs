// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual encoding and transition timing.

use serde::Deserialize;

/// Colors and transition duration.
///
/// Node boxes take their footprint from [`Layout::node_size`](canopy_layout::Layout::node_size).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Length of every transition, in milliseconds.
    pub duration_ms: f64,
    /// Fill of outcome nodes.
    pub leaf_fill: String,
    /// Fill of split nodes.
    pub internal_fill: String,
    /// Stroke of node boxes and links.
    pub stroke: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750.0,
            leaf_fill: "lightgreen".into(),
            internal_fill: "white".into(),
            stroke: "steelblue".into(),
        }
    }
}
