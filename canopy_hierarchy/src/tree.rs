// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core arena: construction from raw input, structure queries, traversal.

use core::ops::Index;

use smallvec::SmallVec;

use crate::error::HierarchyError;
use crate::raw::RawNode;
use crate::types::{HierarchyNode, NodeId, NodeKind};

/// Immutable tree of [`HierarchyNode`]s.
///
/// Nodes live in a flat arena in depth-first pre-order: the root is index `0`
/// and every subtree occupies a contiguous run of identifiers. Structure is
/// fixed at construction time.
///
/// ## Example
///
/// ```rust
/// use canopy_hierarchy::{Hierarchy, RawNode};
///
/// let raw = RawNode::split(
///     "A",
///     [
///         ("yes", RawNode::leaf("X")),
///         ("no", RawNode::split("B", [("hot", RawNode::leaf("Y"))])),
///     ],
/// );
/// let tree = Hierarchy::from_raw(&raw);
///
/// assert_eq!(tree.len(), 4);
/// let b = tree.children_of(tree.root())[1];
/// assert_eq!(tree.depth_of(b), Some(1));
/// assert_eq!(tree.descendants(b).count(), 1);
/// ```
#[derive(Clone)]
pub struct Hierarchy {
    slots: Vec<Slot>,
}

impl core::fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.slots.iter().filter(|s| s.node.is_leaf()).count();
        let depth = self.slots.iter().map(|s| s.depth).max().unwrap_or(0);
        f.debug_struct("Hierarchy")
            .field("nodes", &self.slots.len())
            .field("leaves", &leaves)
            .field("max_depth", &depth)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    node: HierarchyNode,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    depth: u32,
    /// One past the last identifier of this node's subtree.
    subtree_end: u32,
}

/// Convert optional raw input into a hierarchy.
///
/// Returns `None` when the input is absent; callers render nothing then.
pub fn convert(raw: Option<&RawNode>) -> Option<Hierarchy> {
    raw.map(Hierarchy::from_raw)
}

impl Hierarchy {
    /// Build a hierarchy from a raw input tree.
    ///
    /// Identifiers are handed out in depth-first pre-order and children keep
    /// input-map order. The walk uses an explicit stack, so input depth is not
    /// bounded by the call stack.
    pub fn from_raw(raw: &RawNode) -> Self {
        let mut slots: Vec<Slot> = Vec::new();
        let mut stack: Vec<(&RawNode, Option<NodeId>, Option<&str>, u32)> =
            vec![(raw, None, None, 0)];

        while let Some((raw, parent, edge_label, depth)) = stack.pop() {
            let id = NodeId::from_index(slots.len());
            let node = HierarchyNode::from_raw(raw, edge_label);
            let is_leaf = node.kind == NodeKind::Leaf;
            if let Some(parent) = parent {
                slots[parent.index()].children.push(id);
            }
            slots.push(Slot {
                node,
                parent,
                children: SmallVec::new(),
                depth,
                subtree_end: 0,
            });

            let Some(children) = raw.children.as_ref() else {
                continue;
            };
            let present = children.values().flatten().count();
            if present == 0 {
                continue;
            }
            if is_leaf {
                log::warn!(
                    "leaf {:?} carries {present} children; dropping them",
                    slots[id.index()].node.name,
                );
                continue;
            }
            // Reverse so the first child is popped (and numbered) first.
            for (label, child) in children.iter().rev() {
                if let Some(child) = child {
                    stack.push((child, Some(id), Some(label.as_str()), depth + 1));
                }
            }
        }

        // Children always have larger identifiers than their parent, so a
        // reverse sweep sees every child before its parent.
        for idx in (0..slots.len()).rev() {
            let end = match slots[idx].children.last() {
                Some(last) => slots[last.index()].subtree_end,
                None => NodeId::from_index(idx + 1).0,
            };
            slots[idx].subtree_end = end;
        }

        log::debug!("built hierarchy with {} nodes", slots.len());
        Self { slots }
    }

    /// Parse a JSON document into a hierarchy.
    ///
    /// A `null` document yields `Ok(None)`.
    pub fn from_json_str(json: &str) -> Result<Option<Self>, HierarchyError> {
        let raw: Option<RawNode> = serde_json::from_str(json)?;
        Ok(convert(raw.as_ref()))
    }

    /// Parse an already-decoded JSON value into a hierarchy.
    pub fn from_json_value(value: serde_json::Value) -> Result<Option<Self>, HierarchyError> {
        let raw: Option<RawNode> = serde_json::from_value(value)?;
        Ok(convert(raw.as_ref()))
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// A hierarchy always has a root, so this is always `false`.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if `id` belongs to this hierarchy.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.slots.len()
    }

    /// Node data, or `None` for an unknown identifier.
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.slots.get(id.index()).map(|s| &s.node)
    }

    /// Children of a node in input order, or an empty slice for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a node, or `None` for the root and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|s| s.parent)
    }

    /// Depth of a node (root is `0`).
    pub fn depth_of(&self, id: NodeId) -> Option<u32> {
        self.slots.get(id.index()).map(|s| s.depth)
    }

    /// Returns `true` if the node is a leaf outcome.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(HierarchyNode::is_leaf)
    }

    /// All identifiers in depth-first pre-order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        (0..self.slots.len()).map(NodeId::from_index)
    }

    /// Strict descendants of `id` in depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let range = match self.slots.get(id.index()) {
            Some(slot) => id.index() + 1..slot.subtree_end as usize,
            None => 0..0,
        };
        range.map(NodeId::from_index)
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` after the last node or for unknown ids. Does not wrap.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        let next = current.index() + 1;
        (next < self.slots.len()).then(|| NodeId::from_index(next))
    }

    /// Get the previous node in depth-first traversal order.
    ///
    /// Returns `None` for the root and unknown ids. Does not wrap.
    pub fn prev_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.contains(current) {
            return None;
        }
        current.index().checked_sub(1).map(NodeId::from_index)
    }

    /// Walk from `id` up to the root, inclusive of both ends.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.contains(id).then_some(id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent_of(node);
        }
        path
    }
}

impl Index<NodeId> for Hierarchy {
    type Output = HierarchyNode;

    fn index(&self, id: NodeId) -> &HierarchyNode {
        &self.slots[id.index()].node
    }
}
