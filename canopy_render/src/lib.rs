// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_render --heading-base-level=0

//! Canopy Render: keyed, animated reconciliation of a tree layout onto a surface.
//!
//! The [`Renderer`] keeps one transition per drawn identity and talks to a
//! [`Surface`] only through keyed `enter`/`update`/`exit` calls:
//!
//! - **Enter**: an identity new to the layout is created at the anchor's
//!   previous position (see [`PositionSnapshot`]) and moves to its target.
//!   Links start collapsed onto that point; edge labels follow their link's
//!   midpoint.
//! - **Update**: an identity already drawn moves from where it is displayed
//!   right now to its new target, so a render in the middle of a transition
//!   retargets instead of jumping.
//! - **Exit**: an identity gone from the layout is removed at once.
//!
//! Nodes, links and labels share one duration and one cubic in-out easing so
//! they stay in step. [`Renderer::tick`] advances every running transition;
//! the host calls it from its animation frames with a millisecond clock.
//!
//! Visual encoding follows [`RenderConfig`]: outcome nodes are filled
//! `lightgreen`, split nodes `white`, everything stroked `steelblue`. A split
//! node shows its feature, any node with an entropy shows `H=<entropy>`, and
//! an outcome node shows its majority class.
//!
//! [`SvgSurface`] is a retained in-memory surface that serializes to SVG,
//! useful for tests, snapshots and headless output.

mod config;
mod element;
mod motion;
mod renderer;
mod surface;
mod svg;

pub use config::RenderConfig;
pub use element::{
    Element, ElementFlags, ElementKey, LabelElement, LinkElement, NodeElement, Tooltip,
    vertical_link,
};
pub use motion::ease_cubic_in_out;
pub use renderer::{PositionSnapshot, RenderStats, Renderer};
pub use surface::Surface;
pub use svg::SvgSurface;
