// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The subtree reachable through expanded nodes.

use canopy_hierarchy::NodeId;
use smallvec::SmallVec;

/// One node of a [`VisibleTree`].
///
/// `parent` and `children` are slots within the same [`VisibleTree`], not
/// hierarchy identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleNode {
    /// Hierarchy identity of this node.
    pub id: NodeId,
    /// Slot of the parent, `None` for the root.
    pub parent: Option<usize>,
    /// Depth below the root.
    pub depth: u32,
    /// Slots of the shown children, in hierarchy order.
    pub children: SmallVec<[usize; 4]>,
}

/// Nodes currently reachable from the root, in depth-first pre-order.
///
/// Slot `0` is always the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleTree {
    pub(crate) nodes: Vec<VisibleNode>,
}

impl VisibleTree {
    /// All visible nodes in pre-order.
    pub fn nodes(&self) -> &[VisibleNode] {
        &self.nodes
    }

    /// The node at `slot`.
    pub fn get(&self, slot: usize) -> Option<&VisibleNode> {
        self.nodes.get(slot)
    }

    /// The root entry.
    pub fn root(&self) -> &VisibleNode {
        &self.nodes[0]
    }

    /// Number of visible nodes (at least one).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never `true`: the root is always visible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identities in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Slot holding `id`, if it is visible.
    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Returns `true` if `id` is visible.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Parent→child pairs of identities, in pre-order of the child.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| (self.nodes[p].id, n.id)))
    }
}
