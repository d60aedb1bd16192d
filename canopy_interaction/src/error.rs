// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failure to read a [`ViewerConfig`](crate::ViewerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid viewer configuration: {0}")]
    Json(#[from] serde_json::Error),
}
