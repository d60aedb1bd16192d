// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy: node identifiers, kinds, and per-node data.

use crate::raw::RawNode;

/// Name given to a node that carries neither a split feature nor a label.
pub const ROOT_MARKER: &str = "root";

/// Stable identity of a node in a [`Hierarchy`](crate::Hierarchy).
///
/// Identifiers are arena indices assigned in depth-first pre-order when the
/// hierarchy is built; the root is always index `0`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn from_index(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Hierarchies are limited to u32::MAX nodes."
        )]
        Self(idx as u32)
    }

    /// Arena index of this node.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node splits on a feature or carries an outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// A split node; its name is the feature it splits on.
    Internal,
    /// An outcome node; it has no children.
    Leaf,
}

/// A named numeric annotation, such as the information gain of one feature.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    /// Metric name (for gains, the candidate feature).
    pub name: String,
    /// Metric value.
    pub value: f64,
}

/// Static data of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyNode {
    /// Split feature, class label, or [`ROOT_MARKER`].
    pub name: String,
    /// Internal split or leaf outcome.
    pub kind: NodeKind,
    /// Entropy of the samples reaching this node.
    pub entropy: Option<f64>,
    /// Most frequent class among the samples reaching this node.
    pub majority_class: Option<String>,
    /// Per-feature gains recorded at this node, in input order.
    pub metrics: Vec<Metric>,
    /// Gain of the split actually chosen at this node.
    pub split_gain: Option<f64>,
    /// Sample count per class, in input order.
    pub class_distribution: Vec<(String, f64)>,
    /// Label of the edge from the parent; `None` only for the root.
    pub edge_label: Option<String>,
}

impl HierarchyNode {
    pub(crate) fn from_raw(raw: &RawNode, edge_label: Option<&str>) -> Self {
        let name = [raw.feature.as_deref(), raw.label.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(ROOT_MARKER)
            .to_owned();
        let kind = if raw.kind.as_deref() == Some("leaf") {
            NodeKind::Leaf
        } else {
            NodeKind::Internal
        };
        let metrics = raw
            .all_gains
            .iter()
            .flatten()
            .map(|(name, value)| Metric {
                name: name.clone(),
                value: *value,
            })
            .collect();
        let class_distribution = raw
            .class_distribution
            .iter()
            .flatten()
            .map(|(class, count)| (class.clone(), *count))
            .collect();
        Self {
            name,
            kind,
            entropy: raw.entropy,
            majority_class: raw.majority_class.clone(),
            metrics,
            split_gain: raw.gain,
            class_distribution,
            edge_label: edge_label.map(str::to_owned),
        }
    }

    /// Returns `true` for outcome nodes.
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Looks up a metric by name.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }
}
