// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors raised while reading raw hierarchy input.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// The input was not valid JSON or did not have the expected tree shape.
    #[error("malformed tree input: {0}")]
    Json(#[from] serde_json::Error),
}
