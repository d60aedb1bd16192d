// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed reconciliation of a [`Layout`] onto a [`Surface`].

use canopy_hierarchy::{Hierarchy, HierarchyNode, NodeId};
use canopy_layout::Layout;
use canopy_view_state::ViewState;
use hashbrown::HashMap;
use kurbo::{Line, Point, Size};
use smallvec::SmallVec;

use crate::config::RenderConfig;
use crate::element::{
    Element, ElementFlags, ElementKey, LabelElement, LinkElement, NodeElement,
};
use crate::motion::Motion;
use crate::surface::Surface;

/// Layout position of every node at the end of the last render.
///
/// Seeds enter transitions: new nodes grow out of the anchor's entry here.
/// Nodes that have since been hidden keep their last entry.
#[derive(Clone, Debug, Default)]
pub struct PositionSnapshot {
    positions: HashMap<NodeId, Point>,
}

impl PositionSnapshot {
    /// Recorded position of `id`.
    pub fn get(&self, id: NodeId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` before the first render.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn record(&mut self, layout: &Layout) {
        self.positions
            .extend(layout.nodes().iter().map(|n| (n.id, n.point())));
    }
}

/// Element counts of one [`Renderer::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Elements created.
    pub entered: usize,
    /// Elements retargeted.
    pub updated: usize,
    /// Elements removed.
    pub exited: usize,
}

#[derive(Clone, Debug)]
struct NodeTrack {
    motion: Motion<Point>,
    element: NodeElement,
}

#[derive(Clone, Debug)]
struct LinkTrack {
    motion: Motion<Line>,
    label: Option<String>,
}

/// Retained renderer: remembers what is on the surface and animates changes.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
    nodes: HashMap<NodeId, NodeTrack>,
    links: HashMap<NodeId, LinkTrack>,
    snapshot: PositionSnapshot,
}

impl Renderer {
    /// Creates a renderer with nothing drawn.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current encoding and timing.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Positions recorded by the last render.
    pub fn snapshot(&self) -> &PositionSnapshot {
        &self.snapshot
    }

    /// Returns `true` while any element is still moving.
    pub fn is_animating(&self) -> bool {
        self.nodes.values().any(|t| !t.motion.is_settled())
            || self.links.values().any(|t| !t.motion.is_settled())
    }

    /// Position of `id` as displayed at `now`.
    pub fn displayed_position(&self, id: NodeId, now: f64) -> Option<Point> {
        self.nodes.get(&id).map(|t| t.motion.sample(now))
    }

    /// Reconciles `layout` with what is drawn.
    ///
    /// New elements start at `anchor`'s snapshot position (its fresh layout
    /// position on the first render) and move to their targets. Elements
    /// already drawn move from where they are displayed at `now`. Elements no
    /// longer in the layout are removed immediately.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        hierarchy: &Hierarchy,
        view_state: &ViewState,
        layout: &Layout,
        anchor: NodeId,
        now: f64,
        surface: &mut S,
    ) -> RenderStats {
        let duration = self.config.duration_ms;
        let origin = self
            .snapshot
            .get(anchor)
            .or_else(|| layout.position(anchor))
            .unwrap_or(Point::ZERO);
        let mut stats = RenderStats::default();

        let mut stale: Vec<NodeId> = self
            .links
            .keys()
            .copied()
            .filter(|&id| !layout.contains(id))
            .collect();
        stale.sort_unstable();
        for id in stale {
            if let Some(track) = self.links.remove(&id) {
                surface.exit(ElementKey::Link(id));
                stats.exited += 1;
                if track.label.is_some() {
                    surface.exit(ElementKey::LinkLabel(id));
                    stats.exited += 1;
                }
            }
        }
        let mut stale: Vec<NodeId> = self
            .nodes
            .keys()
            .copied()
            .filter(|&id| !layout.contains(id))
            .collect();
        stale.sort_unstable();
        for id in stale {
            self.nodes.remove(&id);
            surface.exit(ElementKey::Node(id));
            stats.exited += 1;
        }

        for link in layout.links() {
            let (Some(source), Some(target)) =
                (layout.position(link.source), layout.position(link.target))
            else {
                continue;
            };
            let line = Line::new(source, target);
            let id = link.target;
            if let Some(track) = self.links.get_mut(&id) {
                let shown = track.motion.sample(now);
                track.motion.retarget(line, now, duration);
                surface.update(ElementKey::Link(id), &link_element(&self.config, shown));
                stats.updated += 1;
                if let Some(text) = &track.label {
                    surface.update(ElementKey::LinkLabel(id), &label_element(shown, text));
                    stats.updated += 1;
                }
            } else {
                let collapsed = Line::new(origin, origin);
                let label = hierarchy.get(id).and_then(|n| n.edge_label.clone());
                surface.enter(ElementKey::Link(id), &link_element(&self.config, collapsed));
                stats.entered += 1;
                if let Some(text) = &label {
                    surface.enter(ElementKey::LinkLabel(id), &label_element(collapsed, text));
                    stats.entered += 1;
                }
                self.links.insert(
                    id,
                    LinkTrack {
                        motion: Motion::new(collapsed, line, now, duration),
                        label,
                    },
                );
            }
        }

        let node_size = layout.node_size();
        for node in layout.nodes() {
            let Some(data) = hierarchy.get(node.id) else {
                continue;
            };
            let target = node.point();
            let key = ElementKey::Node(node.id);
            if let Some(track) = self.nodes.get_mut(&node.id) {
                let shown = track.motion.sample(now);
                track.motion.retarget(target, now, duration);
                track.element =
                    node_element(&self.config, data, view_state, node.id, shown, node_size);
                surface.update(key, &Element::Node(track.element.clone()));
                stats.updated += 1;
            } else {
                let element =
                    node_element(&self.config, data, view_state, node.id, origin, node_size);
                surface.enter(key, &Element::Node(element.clone()));
                stats.entered += 1;
                self.nodes.insert(
                    node.id,
                    NodeTrack {
                        motion: Motion::new(origin, target, now, duration),
                        element,
                    },
                );
            }
        }

        self.snapshot.record(layout);
        log::debug!(
            "render anchored at {anchor:?}: {} entered, {} updated, {} exited",
            stats.entered,
            stats.updated,
            stats.exited
        );
        stats
    }

    /// Pushes the displayed geometry at `now` for every element still in
    /// motion. Returns `true` while any transition is running.
    pub fn tick<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> bool {
        let mut running = false;
        for (&id, track) in &mut self.links {
            if let Some(line) = track.motion.step(now) {
                surface.update(ElementKey::Link(id), &link_element(&self.config, line));
                if let Some(text) = &track.label {
                    surface.update(ElementKey::LinkLabel(id), &label_element(line, text));
                }
            }
            running |= !track.motion.is_settled();
        }
        for (&id, track) in &mut self.nodes {
            if let Some(position) = track.motion.step(now) {
                track.element.position = position;
                surface.update(ElementKey::Node(id), &Element::Node(track.element.clone()));
            }
            running |= !track.motion.is_settled();
        }
        running
    }
}

fn link_element(config: &RenderConfig, line: Line) -> Element {
    Element::Link(LinkElement::new(line.p0, line.p1, config.stroke.as_str()))
}

fn label_element(line: Line, text: &str) -> Element {
    Element::LinkLabel(LabelElement {
        position: line.p0.midpoint(line.p1),
        text: text.to_owned(),
    })
}

/// Box, colors and text lines for one node.
fn node_element(
    config: &RenderConfig,
    node: &HierarchyNode,
    view_state: &ViewState,
    id: NodeId,
    position: Point,
    size: Size,
) -> NodeElement {
    let leaf = node.is_leaf();
    let mut lines: SmallVec<[String; 3]> = SmallVec::new();
    if !leaf {
        lines.push(node.name.clone());
    }
    if let Some(entropy) = node.entropy {
        lines.push(format!("H={entropy:.2}"));
    }
    if leaf && let Some(class) = &node.majority_class {
        lines.push(class.clone());
    }

    let mut flags = ElementFlags::empty();
    flags.set(ElementFlags::LEAF, leaf);
    flags.set(ElementFlags::EXPANDED, view_state.is_expanded(id));
    flags.set(ElementFlags::COLLAPSED, view_state.is_collapsed(id));

    NodeElement {
        position,
        size,
        fill: if leaf {
            config.leaf_fill.clone()
        } else {
            config.internal_fill.clone()
        },
        stroke: config.stroke.clone(),
        lines,
        flags,
    }
}
