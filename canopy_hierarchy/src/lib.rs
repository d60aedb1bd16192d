// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_hierarchy --heading-base-level=0

//! Canopy Hierarchy: the static node model behind an explorable tree diagram.
//!
//! This crate turns a nested, JSON-shaped description of a tree (typically a
//! decision tree emitted by a learner) into an immutable arena of
//! [`HierarchyNode`]s.
//!
//! - Every node receives a [`NodeId`] exactly once, at conversion time, in
//!   depth-first encounter order. Identities are never reassigned and are not
//!   derived from geometry, so higher layers can use them to correlate a node
//!   across successive renders.
//! - Children keep the order in which the input map lists them; the map key
//!   becomes the child's incoming edge label.
//! - Conversion is iterative, so deeply nested inputs do not exhaust the stack.
//!
//! ## Not a view model
//!
//! The hierarchy knows nothing about expansion state, layout or drawing. It is
//! built once and shared read-only by the view state, layout and renderer
//! crates.
//!
//! ## Example
//!
//! ```rust
//! use canopy_hierarchy::{Hierarchy, NodeKind};
//!
//! let json = r#"{
//!     "feature": "outlook",
//!     "entropy": 0.94,
//!     "all_gains": { "outlook": 0.247, "wind": 0.048 },
//!     "children": {
//!         "overcast": { "type": "leaf", "majority_class": "yes" },
//!         "sunny": { "feature": "humidity", "children": {} }
//!     }
//! }"#;
//!
//! let tree = Hierarchy::from_json_str(json).unwrap().unwrap();
//! let root = tree.root();
//! assert_eq!(tree[root].name, "outlook");
//!
//! let children = tree.children_of(root);
//! assert_eq!(tree[children[0]].edge_label.as_deref(), Some("overcast"));
//! assert_eq!(tree[children[0]].kind, NodeKind::Leaf);
//! assert_eq!(tree[children[1]].name, "humidity");
//! ```
//!
//! Absent input (`null`) converts to `None`: callers are expected to render
//! nothing in that case.

mod error;
mod raw;
mod tree;
mod types;

pub use error::HierarchyError;
pub use raw::RawNode;
pub use tree::{Hierarchy, convert};
pub use types::{HierarchyNode, Metric, NodeId, NodeKind, ROOT_MARKER};
