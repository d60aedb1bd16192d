// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure state machine.

use canopy_hierarchy::{Hierarchy, NodeId};
use smallvec::SmallVec;

use crate::visible::{VisibleNode, VisibleTree};

/// Expansion state of a single node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disclosure {
    /// The node has no children to show.
    Leaf,
    /// Children are shown.
    Expanded(SmallVec<[NodeId; 4]>),
    /// Children are hidden and retained for a later expansion.
    Collapsed(SmallVec<[NodeId; 4]>),
}

impl Disclosure {
    /// Children currently shown (empty unless expanded).
    pub fn shown_children(&self) -> &[NodeId] {
        match self {
            Self::Expanded(children) => children,
            Self::Leaf | Self::Collapsed(_) => &[],
        }
    }

    /// Children currently hidden (empty unless collapsed).
    pub fn retained_children(&self) -> &[NodeId] {
        match self {
            Self::Collapsed(children) => children,
            Self::Leaf | Self::Expanded(_) => &[],
        }
    }

    /// Returns `true` if children are shown.
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded(_))
    }

    /// Returns `true` if children are hidden.
    pub fn is_collapsed(&self) -> bool {
        matches!(self, Self::Collapsed(_))
    }
}

/// Result of [`ViewState::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Hidden children were restored.
    Expanded,
    /// Shown children were hidden.
    Collapsed,
    /// Nothing to toggle (leaf or unknown node).
    Unchanged,
}

/// Per-node disclosure over a [`Hierarchy`].
///
/// Lives as long as the view; mutated only by [`ViewState::toggle`],
/// [`ViewState::expand_all`] and [`ViewState::collapse_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    states: Vec<Disclosure>,
    parents: Vec<Option<NodeId>>,
    depths: Vec<u32>,
    root: NodeId,
}

impl ViewState {
    /// Initial state: the root is expanded and every deeper node with
    /// children is collapsed, so only the root and its direct children show.
    pub fn new(hierarchy: &Hierarchy) -> Self {
        let mut states = Vec::with_capacity(hierarchy.len());
        let mut parents = Vec::with_capacity(hierarchy.len());
        let mut depths = Vec::with_capacity(hierarchy.len());
        for id in hierarchy.ids() {
            let children: SmallVec<[NodeId; 4]> = hierarchy.children_of(id).into();
            let depth = hierarchy.depth_of(id).unwrap_or(0);
            states.push(if children.is_empty() {
                Disclosure::Leaf
            } else if depth == 0 {
                Disclosure::Expanded(children)
            } else {
                Disclosure::Collapsed(children)
            });
            parents.push(hierarchy.parent_of(id));
            depths.push(depth);
        }
        Self {
            states,
            parents,
            depths,
            root: hierarchy.root(),
        }
    }

    /// Number of tracked nodes.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Never `true` for a state built from a hierarchy.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Disclosure of `id`, or `None` for unknown ids.
    pub fn disclosure(&self, id: NodeId) -> Option<&Disclosure> {
        self.states.get(id.index())
    }

    /// Returns `true` if `id` currently shows its children.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.disclosure(id).is_some_and(Disclosure::is_expanded)
    }

    /// Returns `true` if `id` currently hides its children.
    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.disclosure(id).is_some_and(Disclosure::is_collapsed)
    }

    /// Returns `true` if every ancestor of `id` is expanded.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if id.index() >= self.states.len() {
            return false;
        }
        let mut current = self.parents[id.index()];
        while let Some(parent) = current {
            if !self.is_expanded(parent) {
                return false;
            }
            current = self.parents[parent.index()];
        }
        true
    }

    /// Flip a node between expanded and collapsed.
    ///
    /// Leaves and unknown ids are left alone.
    pub fn toggle(&mut self, id: NodeId) -> Toggle {
        let Some(state) = self.states.get_mut(id.index()) else {
            return Toggle::Unchanged;
        };
        let (next, outcome) = match core::mem::replace(state, Disclosure::Leaf) {
            Disclosure::Expanded(children) => (Disclosure::Collapsed(children), Toggle::Collapsed),
            Disclosure::Collapsed(children) => (Disclosure::Expanded(children), Toggle::Expanded),
            Disclosure::Leaf => (Disclosure::Leaf, Toggle::Unchanged),
        };
        *state = next;
        log::trace!("toggle {id:?}: {outcome:?}");
        outcome
    }

    /// Restore every hidden subtree. Returns the number of nodes changed.
    pub fn expand_all(&mut self) -> usize {
        let mut changed = 0;
        for state in &mut self.states {
            if let Disclosure::Collapsed(children) = state {
                *state = Disclosure::Expanded(core::mem::take(children));
                changed += 1;
            }
        }
        log::trace!("expand all: {changed} nodes expanded");
        changed
    }

    /// Hide the children of every expanded node below the root.
    ///
    /// The root keeps its current disclosure. Returns the number of nodes
    /// changed.
    pub fn collapse_all(&mut self) -> usize {
        let mut changed = 0;
        for (state, &depth) in self.states.iter_mut().zip(&self.depths) {
            if depth == 0 {
                continue;
            }
            if let Disclosure::Expanded(children) = state {
                *state = Disclosure::Collapsed(core::mem::take(children));
                changed += 1;
            }
        }
        log::trace!("collapse all: {changed} nodes collapsed");
        changed
    }

    /// Extract the nodes reachable through expanded children only.
    pub fn visible_subtree(&self) -> VisibleTree {
        let mut nodes: Vec<VisibleNode> = Vec::new();
        let mut stack: Vec<(NodeId, Option<usize>, u32)> = vec![(self.root, None, 0)];
        while let Some((id, parent, depth)) = stack.pop() {
            let slot = nodes.len();
            if let Some(parent) = parent {
                nodes[parent].children.push(slot);
            }
            nodes.push(VisibleNode {
                id,
                parent,
                depth,
                children: SmallVec::new(),
            });
            if let Some(state) = self.states.get(id.index()) {
                for &child in state.shown_children().iter().rev() {
                    stack.push((child, Some(slot), depth + 1));
                }
            }
        }
        VisibleTree { nodes }
    }

    /// Identities of the visible nodes, in pre-order.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.visible_subtree().ids().collect()
    }
}
