// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_layout --heading-base-level=0

//! Canopy Layout: tidy tree coordinates for the visible part of a hierarchy.
//!
//! [`LayoutEngine::layout`] takes a [`VisibleTree`](canopy_view_state::VisibleTree)
//! and produces a [`Layout`]:
//!
//! - one [`PositionedNode`] per visible node, with `y = depth * node_spacing.height`
//!   and `x` chosen by the Buchheim–Jünger–Leipert linear-time variant of
//!   Walker's algorithm (the one d3's `tree()` uses);
//! - one [`Link`] per visible parent→child edge;
//! - the horizontal extent and a base translate that centers that extent in
//!   the viewport.
//!
//! Layout rules:
//!
//! - Adjacent siblings are `sibling_separation` node spacings apart; adjacent
//!   nodes with different parents are `cousin_separation` apart.
//! - A parent is centered over its first and last child.
//! - Subtrees never overlap, and small subtrees between large ones are spread
//!   evenly.
//! - The root is at `x = 0`.
//!
//! The result is a pure function of the visible set and the [`LayoutConfig`].
//! Re-running it on every expand/collapse is what keeps the diagram centered
//! as its width changes.

mod config;
mod layout;
mod tidy;

pub use config::LayoutConfig;
pub use layout::{Layout, LayoutEngine, Link, PositionedNode};
