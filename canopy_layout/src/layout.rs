// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned nodes, links and the centering translate.

use canopy_hierarchy::NodeId;
use canopy_view_state::VisibleTree;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};

use crate::config::LayoutConfig;
use crate::tidy::tidy_x;

/// A visible node with its layout coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedNode {
    /// Hierarchy identity.
    pub id: NodeId,
    /// Depth below the root.
    pub depth: u32,
    /// Horizontal position; the root sits at `0`.
    pub x: f64,
    /// Vertical position, `depth * node_spacing.height`.
    pub y: f64,
}

impl PositionedNode {
    /// Position as a point.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Parent→child connector, keyed by `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    /// Parent end.
    pub source: NodeId,
    /// Child end; a node has at most one incoming link.
    pub target: NodeId,
}

/// Result of [`LayoutEngine::layout`].
#[derive(Clone, Debug)]
pub struct Layout {
    nodes: Vec<PositionedNode>,
    links: Vec<Link>,
    index: HashMap<NodeId, usize>,
    node_size: Size,
    extent: (f64, f64),
    base_translate: Vec2,
}

impl Layout {
    /// Positioned nodes in pre-order.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// Links in pre-order of their target.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if nothing was laid out.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` was laid out.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// The positioned node for `id`.
    pub fn get(&self, id: NodeId) -> Option<&PositionedNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Layout position of `id`.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(PositionedNode::point)
    }

    /// Footprint of `id` in layout space, centered on its position.
    pub fn node_rect(&self, id: NodeId) -> Option<Rect> {
        self.position(id).map(|p| Rect::from_center_size(p, self.node_size))
    }

    /// Footprint shared by every node.
    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Minimum and maximum node x.
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Translate that centers the extent horizontally in the viewport and
    /// drops the root by the top offset.
    pub fn base_translate(&self) -> Vec2 {
        self.base_translate
    }

    /// Union of all node footprints in layout space.
    pub fn bounds(&self) -> Rect {
        self.nodes
            .iter()
            .map(|n| Rect::from_center_size(n.point(), self.node_size))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }
}

/// Tidy tree layout engine.
///
/// ```rust
/// use canopy_hierarchy::{Hierarchy, RawNode};
/// use canopy_layout::{LayoutConfig, LayoutEngine};
/// use canopy_view_state::ViewState;
///
/// let tree = Hierarchy::from_raw(&RawNode::split(
///     "A",
///     [("yes", RawNode::leaf("X")), ("no", RawNode::leaf("Y"))],
/// ));
/// let state = ViewState::new(&tree);
/// let layout = LayoutEngine::new(LayoutConfig::default()).layout(&state.visible_subtree());
///
/// let [yes, no] = tree.children_of(tree.root()) else { unreachable!() };
/// assert_eq!(layout.position(tree.root()).unwrap().x, 0.0);
/// assert_eq!(layout.position(*yes).unwrap().x, -75.0);
/// assert_eq!(layout.position(*no).unwrap().y, 100.0);
/// assert_eq!(layout.base_translate().x, 390.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given parameters.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Current parameters.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `visible` and computes its links, extent and centering.
    pub fn layout(&self, visible: &VisibleTree) -> Layout {
        let LayoutConfig {
            node_spacing,
            node_size,
            viewport,
            top_offset,
            sibling_separation,
            cousin_separation,
        } = self.config;

        let xs = tidy_x(visible, sibling_separation, cousin_separation);
        let nodes: Vec<PositionedNode> = visible
            .nodes()
            .iter()
            .zip(&xs)
            .map(|(node, &x)| PositionedNode {
                id: node.id,
                depth: node.depth,
                x: x * node_spacing.width,
                y: f64::from(node.depth) * node_spacing.height,
            })
            .collect();
        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
        let links: Vec<Link> = visible
            .edges()
            .map(|(source, target)| Link { source, target })
            .collect();

        let (min_x, max_x) = nodes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| {
                (lo.min(n.x), hi.max(n.x))
            });
        let extent = if nodes.is_empty() {
            (0.0, 0.0)
        } else {
            (min_x, max_x)
        };
        let base_translate = Vec2::new(
            (viewport.width - (extent.1 - extent.0)) / 2.0 - extent.0,
            top_offset,
        );
        log::debug!(
            "layout: {} nodes, extent {:.1}..{:.1}, base ({:.1}, {:.1})",
            nodes.len(),
            extent.0,
            extent.1,
            base_translate.x,
            base_translate.y
        );

        Layout {
            nodes,
            links,
            index,
            node_size,
            extent,
            base_translate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_hierarchy::{Hierarchy, RawNode};
    use canopy_view_state::ViewState;
    use proptest::prelude::*;

    fn expanded(raw: &RawNode) -> (Hierarchy, Layout) {
        let tree = Hierarchy::from_raw(raw);
        let mut state = ViewState::new(&tree);
        state.expand_all();
        let layout = LayoutEngine::default().layout(&state.visible_subtree());
        (tree, layout)
    }

    fn x_of(tree: &Hierarchy, layout: &Layout, path: &[usize]) -> f64 {
        let mut id = tree.root();
        for &i in path {
            id = tree.children_of(id)[i];
        }
        layout.position(id).unwrap().x
    }

    #[test]
    fn single_node_sits_at_origin() {
        let (tree, layout) = expanded(&RawNode::leaf("X"));
        assert_eq!(layout.position(tree.root()), Some(Point::ZERO));
        assert_eq!(layout.extent(), (0.0, 0.0));
        assert_eq!(layout.base_translate(), Vec2::new(390.0, 50.0));
        assert!(layout.links().is_empty());
        assert_eq!(layout.node_rect(tree.root()), Some(Rect::new(-60.0, -25.0, 60.0, 25.0)));
    }

    #[test]
    fn siblings_are_one_spacing_apart_and_parent_centered() {
        let (tree, layout) = expanded(&RawNode::split(
            "A",
            [
                ("a", RawNode::leaf("1")),
                ("b", RawNode::leaf("2")),
                ("c", RawNode::leaf("3")),
            ],
        ));
        assert_eq!(x_of(&tree, &layout, &[0]), -150.0);
        assert_eq!(x_of(&tree, &layout, &[1]), 0.0);
        assert_eq!(x_of(&tree, &layout, &[2]), 150.0);
        assert_eq!(layout.extent(), (-150.0, 150.0));
        assert_eq!(layout.base_translate().x, 390.0);
    }

    #[test]
    fn cousins_get_double_gap() {
        // A ─ B ─ (1, 2)
        //   └ C ─ (3, 4)
        let (tree, layout) = expanded(&RawNode::split(
            "A",
            [
                (
                    "l",
                    RawNode::split("B", [("x", RawNode::leaf("1")), ("y", RawNode::leaf("2"))]),
                ),
                (
                    "r",
                    RawNode::split("C", [("x", RawNode::leaf("3")), ("y", RawNode::leaf("4"))]),
                ),
            ],
        ));
        let gap = x_of(&tree, &layout, &[1, 0]) - x_of(&tree, &layout, &[0, 1]);
        assert_eq!(gap, 300.0);
        assert_eq!(x_of(&tree, &layout, &[0]), -225.0);
        assert_eq!(x_of(&tree, &layout, &[1]), 225.0);
        assert_eq!(x_of(&tree, &layout, &[]), 0.0);
    }

    #[test]
    fn small_middle_subtree_is_spread_evenly() {
        // A wide left and right subtree with a leaf between them; the leaf
        // ends up halfway between its siblings.
        let wide = |f: &str| {
            RawNode::split(
                f,
                [
                    ("a", RawNode::leaf("1")),
                    ("b", RawNode::leaf("2")),
                    ("c", RawNode::leaf("3")),
                ],
            )
        };
        let (tree, layout) = expanded(&RawNode::split(
            "A",
            [("l", wide("B")), ("m", RawNode::leaf("M")), ("r", wide("C"))],
        ));
        let left = x_of(&tree, &layout, &[0]);
        let mid = x_of(&tree, &layout, &[1]);
        let right = x_of(&tree, &layout, &[2]);
        assert!((mid - (left + right) / 2.0).abs() < 1e-9);
        assert!(x_of(&tree, &layout, &[0, 2]) + 300.0 <= x_of(&tree, &layout, &[2, 0]) + 1e-9);
    }

    #[test]
    fn links_follow_visible_edges() {
        let tree = Hierarchy::from_raw(&RawNode::split(
            "A",
            [
                ("yes", RawNode::leaf("X")),
                ("no", RawNode::split("B", [("hot", RawNode::leaf("Y"))])),
            ],
        ));
        let state = ViewState::new(&tree);
        let layout = LayoutEngine::default().layout(&state.visible_subtree());
        let root = tree.root();
        let kids = tree.children_of(root);
        assert_eq!(
            layout.links(),
            [
                Link { source: root, target: kids[0] },
                Link { source: root, target: kids[1] },
            ]
        );
        assert!(!layout.contains(tree.children_of(kids[1])[0]));
        assert_eq!(layout.bounds(), Rect::new(-135.0, -25.0, 135.0, 125.0));
    }

    #[test]
    fn deep_chain_lays_out_without_recursion() {
        let mut raw = RawNode::leaf("end");
        for i in 0..3_000 {
            raw = RawNode::split(format!("f{i}"), [("v", raw)]);
        }
        let (tree, layout) = expanded(&raw);
        assert_eq!(layout.len(), tree.len());
        assert!(layout.nodes().iter().all(|n| n.x == 0.0));
        core::mem::forget(raw);
        drop(tree);
    }

    fn arb_raw() -> impl Strategy<Value = RawNode> {
        let leaf = "[a-z]{1,3}".prop_map(RawNode::leaf);
        leaf.prop_recursive(5, 80, 4, |inner| {
            (prop::collection::vec(inner, 1..5), "[A-Z]{1,2}").prop_map(|(children, feature)| {
                RawNode::split(
                    feature,
                    children
                        .into_iter()
                        .enumerate()
                        .map(|(i, child)| (format!("v{i}"), child)),
                )
            })
        })
    }

    proptest! {
        #[test]
        fn same_depth_nodes_keep_minimum_gap(raw in arb_raw()) {
            let (_, layout) = expanded(&raw);
            let mut by_depth: HashMap<u32, Vec<f64>> = HashMap::new();
            for node in layout.nodes() {
                by_depth.entry(node.depth).or_default().push(node.x);
            }
            for xs in by_depth.values() {
                // Pre-order visits each level left to right.
                for pair in xs.windows(2) {
                    prop_assert!(pair[1] - pair[0] >= 150.0 - 1e-6, "{:?}", xs);
                }
            }
        }

        #[test]
        fn parents_are_centered_over_children(raw in arb_raw()) {
            let (tree, layout) = expanded(&raw);
            for node in layout.nodes() {
                let kids = tree.children_of(node.id);
                if let (Some(first), Some(last)) = (kids.first(), kids.last()) {
                    let mid = (layout.position(*first).unwrap().x + layout.position(*last).unwrap().x) / 2.0;
                    prop_assert!((node.x - mid).abs() < 1e-6);
                }
            }
        }

        #[test]
        fn extent_is_centered_in_viewport(raw in arb_raw()) {
            let (_, layout) = expanded(&raw);
            let (min_x, max_x) = layout.extent();
            let center = (min_x + max_x) / 2.0 + layout.base_translate().x;
            prop_assert!((center - 390.0).abs() < 1e-6);
        }

        #[test]
        fn layout_is_deterministic(raw in arb_raw()) {
            let (_, a) = expanded(&raw);
            let (_, b) = expanded(&raw);
            prop_assert_eq!(a.nodes(), b.nodes());
        }
    }
}
