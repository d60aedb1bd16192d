// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_view_state --heading-base-level=0

//! Canopy View State: per-node expand/collapse state over a static hierarchy.
//!
//! A [`ViewState`] holds one [`Disclosure`] per node of a
//! [`Hierarchy`](canopy_hierarchy::Hierarchy):
//!
//! - [`Disclosure::Expanded`] shows the node's children.
//! - [`Disclosure::Collapsed`] hides them but keeps the list, so a later
//!   expansion restores exactly what was there.
//! - [`Disclosure::Leaf`] has nothing to show; toggling it is a no-op.
//!
//! The state machine is driven only by [`ViewState::toggle`] and the bulk
//! operations [`ViewState::expand_all`] and [`ViewState::collapse_all`]. Each
//! render extracts the currently reachable nodes with
//! [`ViewState::visible_subtree`].
//!
//! The root is always part of the visible subtree. It may be collapsed by a
//! toggle, which hides only its descendants. [`ViewState::collapse_all`] never
//! touches the root, so the first level under it stays as the user left it.
//!
//! ## Example
//!
//! ```rust
//! use canopy_hierarchy::{Hierarchy, RawNode};
//! use canopy_view_state::{Toggle, ViewState};
//!
//! let tree = Hierarchy::from_raw(&RawNode::split(
//!     "A",
//!     [
//!         ("yes", RawNode::leaf("X")),
//!         ("no", RawNode::split("B", [("hot", RawNode::leaf("Y"))])),
//!     ],
//! ));
//! let mut state = ViewState::new(&tree);
//! assert_eq!(state.visible_subtree().len(), 3);
//!
//! let b = tree.children_of(tree.root())[1];
//! assert_eq!(state.toggle(b), Toggle::Expanded);
//! assert_eq!(state.visible_subtree().len(), 4);
//!
//! state.collapse_all();
//! assert_eq!(state.visible_subtree().len(), 3);
//! ```

mod state;
mod visible;

pub use state::{Disclosure, Toggle, ViewState};
pub use visible::{VisibleNode, VisibleTree};
