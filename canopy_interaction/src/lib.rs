// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_interaction --heading-base-level=0

//! Canopy Interaction: an explorable decision tree on any [`Surface`](canopy_render::Surface).
//!
//! [`TreeView`] ties the pieces together. It owns the static hierarchy, the
//! expand/collapse state, the layout engine and the renderer, and turns host
//! input into state changes:
//!
//! - A **click** on a node toggles it and redraws, growing new nodes out of
//!   the clicked one or shrinking hidden ones back into it.
//! - A **drag** anywhere pans the view; it never clicks. [`PressState`] tells
//!   the two apart and keeps a click on the pressed node when transitions move
//!   another node under the pointer before release.
//! - The **wheel** zooms about the pointer within a clamped range.
//! - **Hover** over a split node with per-feature gains shows them in a
//!   tooltip, one `feature: gain` line each.
//! - **Commands** expand or collapse everything, anchored at the root.
//!
//! Controls the host lacks are described by [`HostCapabilities`]; missing
//! ones are skipped and the tree still renders. Absent or malformed input
//! draws nothing.
//!
//! Pan and zoom only touch the [`ViewTransform`]; every redraw re-applies it
//! on top of the new layout's centering, so the user's view survives toggles.
//!
//! ```rust
//! use canopy_interaction::{Command, HostCapabilities, TreeView, ViewerConfig};
//! use canopy_render::SvgSurface;
//! use kurbo::Size;
//!
//! let json = r#"{
//!     "feature": "Outlook",
//!     "children": {
//!         "sunny": { "feature": "Humidity", "children": {
//!             "high": { "type": "leaf", "majority_class": "No" },
//!             "normal": { "type": "leaf", "majority_class": "Yes" }
//!         } },
//!         "overcast": { "type": "leaf", "majority_class": "Yes" }
//!     }
//! }"#;
//! let mut view = TreeView::from_json_str(
//!     json,
//!     SvgSurface::new(Size::new(960.0, 600.0)),
//!     HostCapabilities::all(),
//!     ViewerConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(view.layout().len(), 3);
//!
//! view.command(Command::ExpandAll, 0.0);
//! let mut now = 0.0;
//! while view.tick(now) {
//!     now += 16.0;
//! }
//! assert_eq!(view.layout().len(), 5);
//! assert!(view.surface().to_svg().contains("Humidity"));
//! ```

mod capabilities;
mod config;
mod error;
mod event;
mod press;
mod transform;
mod view;

pub use capabilities::HostCapabilities;
pub use config::{InteractionConfig, ViewerConfig};
pub use error::ConfigError;
pub use event::{Command, InputEvent, WheelDelta};
pub use press::{Press, PressResult, PressState};
pub use transform::ViewTransform;
pub use view::TreeView;
