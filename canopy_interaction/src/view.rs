// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive tree view: state, layout, renderer and surface in one loop.

use canopy_hierarchy::{Hierarchy, NodeId};
use canopy_layout::{Layout, LayoutEngine};
use canopy_render::{RenderStats, Renderer, Surface, Tooltip};
use canopy_view_state::{Toggle, ViewState};
use kurbo::{Point, Vec2};

use crate::capabilities::HostCapabilities;
use crate::config::{InteractionConfig, ViewerConfig};
use crate::event::{Command, InputEvent, WheelDelta};
use crate::press::{PressResult, PressState};
use crate::transform::ViewTransform;

/// An explorable tree drawn onto a [`Surface`].
///
/// Every state change (toggle, bulk command) re-runs layout and render
/// synchronously; only the visual transition is spread over time, advanced
/// by [`TreeView::tick`]. Pan and zoom only re-apply the transform.
#[derive(Debug)]
pub struct TreeView<S> {
    hierarchy: Hierarchy,
    state: ViewState,
    engine: LayoutEngine,
    layout: Layout,
    renderer: Renderer,
    surface: S,
    transform: ViewTransform,
    press: PressState<NodeId>,
    hovered: Option<NodeId>,
    capabilities: HostCapabilities,
    config: InteractionConfig,
}

impl<S: Surface> TreeView<S> {
    /// Builds the view and draws the initial state at time `0`.
    ///
    /// Returns `None`, drawing nothing, when there is no hierarchy.
    pub fn new(
        hierarchy: Option<Hierarchy>,
        surface: S,
        capabilities: HostCapabilities,
        config: ViewerConfig,
    ) -> Option<Self> {
        let Some(hierarchy) = hierarchy else {
            log::warn!("no tree data; nothing to draw");
            return None;
        };
        for (flag, what) in [
            (HostCapabilities::TOOLTIP, "tooltip"),
            (HostCapabilities::EXPAND_ALL, "expand-all control"),
            (HostCapabilities::COLLAPSE_ALL, "collapse-all control"),
        ] {
            if !capabilities.contains(flag) {
                log::debug!("host has no {what}; skipping it");
            }
        }

        let ViewerConfig {
            layout,
            render,
            interaction,
        } = config;
        let state = ViewState::new(&hierarchy);
        let engine = LayoutEngine::new(layout);
        let initial = engine.layout(&state.visible_subtree());
        let mut view = Self {
            hierarchy,
            state,
            engine,
            layout: initial,
            renderer: Renderer::new(render),
            surface,
            transform: ViewTransform::default(),
            press: PressState::new(interaction.drag_distance, interaction.click_time_ms),
            hovered: None,
            capabilities,
            config: interaction,
        };
        let root = view.hierarchy.root();
        view.draw(root, 0.0);
        Some(view)
    }

    /// Parses `json` and builds the view.
    ///
    /// Malformed input is logged and treated like absent input.
    pub fn from_json_str(
        json: &str,
        surface: S,
        capabilities: HostCapabilities,
        config: ViewerConfig,
    ) -> Option<Self> {
        let hierarchy = Hierarchy::from_json_str(json)
            .inspect_err(|err| log::warn!("{err}"))
            .ok()
            .flatten();
        Self::new(hierarchy, surface, capabilities, config)
    }

    /// The static hierarchy.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Current expand/collapse state.
    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    /// Layout of the current visible set.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current pan, zoom and centering.
    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Controls the host provides.
    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    /// Node currently under the pointer.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the view, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Topmost node whose footprint contains the surface point `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let local = self.transform.to_layout(point);
        self.layout
            .nodes()
            .iter()
            .rev()
            .find(|n| {
                self.layout
                    .node_rect(n.id)
                    .is_some_and(|r| r.contains(local))
            })
            .map(|n| n.id)
    }

    /// Dispatches one input event.
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { position, time } => {
                let target = self.hit_test(position);
                self.press.on_down(target, position, time);
            }
            InputEvent::PointerMove { position, .. } => {
                if let Some(delta) = self.press.on_move(position) {
                    self.pan_by(delta);
                    return;
                }
                let target = self.hit_test(position);
                if target != self.hovered {
                    self.hover_end();
                    if let Some(id) = target {
                        self.hover_node(id, position);
                    }
                }
            }
            InputEvent::PointerUp { position, time } => {
                let target = self.hit_test(position);
                if let PressResult::Click(id) = self.press.on_up(target.as_ref(), position, time) {
                    #[allow(
                        clippy::cast_precision_loss,
                        reason = "Millisecond timestamps stay far below 2^52."
                    )]
                    let now = time as f64;
                    self.click_node(id, now);
                }
            }
            InputEvent::PointerLeave => {
                self.press.cancel();
                self.hover_end();
            }
            InputEvent::Wheel { position, delta } => {
                let exponent = match delta {
                    WheelDelta::Pixels(d) => d * self.config.wheel_pixel_factor,
                    WheelDelta::Lines(d) => d * self.config.wheel_line_factor,
                    WheelDelta::Pages(d) => d * self.config.wheel_page_factor,
                };
                self.zoom_at(position, (-exponent).exp2());
            }
        }
    }

    /// Toggles `id` and redraws, growing or shrinking from that node.
    pub fn click_node(&mut self, id: NodeId, now: f64) -> Toggle {
        let outcome = self.state.toggle(id);
        if outcome != Toggle::Unchanged {
            self.draw(id, now);
        }
        outcome
    }

    /// Shows the gains of `id` near `pointer`, if `id` is a split node with
    /// gains and the host has a tooltip. Returns whether a tooltip is shown.
    pub fn hover_node(&mut self, id: NodeId, pointer: Point) -> bool {
        self.hovered = Some(id);
        if !self.capabilities.contains(HostCapabilities::TOOLTIP) {
            return false;
        }
        let Some(node) = self.hierarchy.get(id) else {
            return false;
        };
        if node.is_leaf() || node.metrics.is_empty() {
            return false;
        }
        let tooltip = Tooltip::new(pointer + self.config.tooltip_offset, node.metrics.clone());
        self.surface.show_tooltip(&tooltip);
        true
    }

    /// Hides the tooltip.
    pub fn hover_end(&mut self) {
        self.hovered = None;
        if self.capabilities.contains(HostCapabilities::TOOLTIP) {
            self.surface.hide_tooltip();
        }
    }

    /// Runs a host command, anchored at the root. Returns `false`, doing
    /// nothing, when the host lacks the matching control.
    pub fn command(&mut self, command: Command, now: f64) -> bool {
        let flag = match command {
            Command::ExpandAll => HostCapabilities::EXPAND_ALL,
            Command::CollapseAll => HostCapabilities::COLLAPSE_ALL,
        };
        if !self.capabilities.contains(flag) {
            log::debug!("{command:?} ignored: host has no control for it");
            return false;
        }
        let changed = match command {
            Command::ExpandAll => self.state.expand_all(),
            Command::CollapseAll => self.state.collapse_all(),
        };
        log::trace!("{command:?}: {changed} nodes changed");
        let root = self.hierarchy.root();
        self.draw(root, now);
        true
    }

    /// Pans by `delta` surface pixels without re-running layout.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.transform.pan_by(delta);
        self.surface.set_transform(self.transform.affine());
    }

    /// Zooms by `factor` about the surface point `anchor`, within the
    /// configured scale range, without re-running layout.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if self
            .transform
            .zoom_about(anchor, factor, self.config.min_scale, self.config.max_scale)
        {
            self.surface.set_transform(self.transform.affine());
        }
    }

    /// Advances running transitions to `now`. Returns `true` while any are
    /// still running.
    pub fn tick(&mut self, now: f64) -> bool {
        self.renderer.tick(now, &mut self.surface)
    }

    /// Re-lays out the visible set, reconciles the surface and re-applies the
    /// full transform with the new centering.
    fn draw(&mut self, anchor: NodeId, now: f64) -> RenderStats {
        self.layout = self.engine.layout(&self.state.visible_subtree());
        let stats = self.renderer.render(
            &self.hierarchy,
            &self.state,
            &self.layout,
            anchor,
            now,
            &mut self.surface,
        );
        self.transform.base = self.layout.base_translate();
        self.surface.set_transform(self.transform.affine());
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_hierarchy::RawNode;
    use canopy_render::{Element, ElementKey, SvgSurface};
    use kurbo::{Affine, Size};

    const SCENARIO: &str = r#"{
        "feature": "A",
        "entropy": 1.0,
        "all_gains": { "A": 0.123, "B": 0.045 },
        "children": {
            "yes": { "type": "leaf", "majority_class": "X" },
            "no": {
                "feature": "B",
                "children": {
                    "hot": { "type": "leaf", "majority_class": "Y" },
                    "cold": { "type": "leaf", "majority_class": "Z" }
                }
            }
        }
    }"#;

    fn view(capabilities: HostCapabilities) -> TreeView<SvgSurface> {
        TreeView::from_json_str(
            SCENARIO,
            SvgSurface::new(Size::new(960.0, 600.0)),
            capabilities,
            ViewerConfig::default(),
        )
        .unwrap()
    }

    fn node(view: &TreeView<SvgSurface>, path: &[usize]) -> NodeId {
        let tree = view.hierarchy();
        let mut id = tree.root();
        for &i in path {
            id = tree.children_of(id)[i];
        }
        id
    }

    /// Surface position of the center of `id` in the current layout.
    fn center(view: &TreeView<SvgSurface>, id: NodeId) -> Point {
        let at = view.layout().position(id).unwrap();
        view.transform().to_surface(at)
    }

    fn click(view: &mut TreeView<SvgSurface>, id: NodeId, time: u64) {
        let position = center(view, id);
        view.handle(&InputEvent::PointerDown { position, time });
        view.handle(&InputEvent::PointerUp {
            position,
            time: time + 40,
        });
    }

    #[test]
    fn initial_view_shows_first_level() {
        let view = view(HostCapabilities::all());
        let b = node(&view, &[1]);
        assert_eq!(view.layout().len(), 3);
        assert!(view.view_state().is_collapsed(b));
        // Three nodes, two links, two edge labels.
        assert_eq!(view.surface().len(), 7);
        assert_eq!(view.transform().base, Vec2::new(390.0, 50.0));
        assert_eq!(view.surface().transform(), Affine::translate((390.0, 50.0)));
    }

    #[test]
    fn clicking_toggles_children_and_expand_all_restores_tree() {
        let mut view = view(HostCapabilities::all());
        let b = node(&view, &[1]);
        let hot = node(&view, &[1, 0]);

        click(&mut view, b, 1_000);
        assert!(view.view_state().is_expanded(b));
        assert_eq!(view.layout().len(), 5);
        assert!(view.surface().contains(ElementKey::Node(hot)));

        click(&mut view, b, 3_000);
        assert!(view.view_state().is_collapsed(b));
        assert_eq!(view.layout().len(), 3);
        assert!(!view.surface().contains(ElementKey::Node(hot)));

        assert!(view.command(Command::ExpandAll, 5_000.0));
        assert_eq!(view.layout().len(), view.hierarchy().len());
        assert_eq!(view.surface().len(), 5 + 4 + 4);
        assert!(!view.tick(5_750.0));
        let from_b = view.layout().links().iter().filter(|l| l.source == b);
        assert_eq!(from_b.count(), 2);
    }

    #[test]
    fn clicking_a_leaf_changes_nothing() {
        let mut view = view(HostCapabilities::all());
        let yes = node(&view, &[0]);
        let before = view.view_state().clone();
        assert_eq!(view.click_node(yes, 100.0), Toggle::Unchanged);
        assert_eq!(view.view_state(), &before);
    }

    #[test]
    fn collapse_all_keeps_first_level() {
        let mut view = view(HostCapabilities::all());
        view.command(Command::ExpandAll, 0.0);
        assert!(view.command(Command::CollapseAll, 1_000.0));
        assert_eq!(view.layout().len(), 3);
        assert!(view.view_state().is_expanded(view.hierarchy().root()));
    }

    #[test]
    fn hovering_split_shows_gains() {
        let mut view = view(HostCapabilities::all());
        let root = view.hierarchy().root();
        assert!(view.hover_node(root, Point::new(100.0, 100.0)));
        let tooltip = view.surface().tooltip().unwrap();
        assert_eq!(tooltip.position, Point::new(108.0, 80.0));
        assert_eq!(tooltip.lines().collect::<Vec<_>>(), ["A: 0.123", "B: 0.045"]);

        view.hover_end();
        assert!(view.surface().tooltip().is_none());
        assert_eq!(view.hovered(), None);
    }

    #[test]
    fn hovering_leaf_or_gainless_split_shows_nothing() {
        let mut view = view(HostCapabilities::all());
        let yes = node(&view, &[0]);
        let b = node(&view, &[1]);
        assert!(!view.hover_node(yes, Point::ZERO));
        assert!(!view.hover_node(b, Point::ZERO));
        assert!(view.surface().tooltip().is_none());
    }

    #[test]
    fn pointer_moves_drive_tooltip() {
        let mut view = view(HostCapabilities::all());
        let root = view.hierarchy().root();
        let yes = node(&view, &[0]);

        let over_root = center(&view, root);
        view.handle(&InputEvent::PointerMove {
            position: over_root,
            time: 0,
        });
        assert_eq!(view.hovered(), Some(root));
        assert!(view.surface().tooltip().is_some());

        let over_leaf = center(&view, yes);
        view.handle(&InputEvent::PointerMove {
            position: over_leaf,
            time: 10,
        });
        assert_eq!(view.hovered(), Some(yes));
        assert!(view.surface().tooltip().is_none());

        view.handle(&InputEvent::PointerMove {
            position: over_root,
            time: 20,
        });
        view.handle(&InputEvent::PointerLeave);
        assert_eq!(view.hovered(), None);
        assert!(view.surface().tooltip().is_none());
    }

    #[test]
    fn missing_host_controls_are_skipped() {
        let mut view = view(HostCapabilities::empty());
        let root = view.hierarchy().root();
        assert_eq!(view.surface().len(), 7);
        assert!(!view.command(Command::ExpandAll, 0.0));
        assert_eq!(view.layout().len(), 3);
        assert!(!view.hover_node(root, Point::ZERO));
        assert!(view.surface().tooltip().is_none());

        let b = node(&view, &[1]);
        click(&mut view, b, 0);
        assert_eq!(view.layout().len(), 5);
    }

    #[test]
    fn drag_pans_without_clicking() {
        let mut view = view(HostCapabilities::all());
        let b = node(&view, &[1]);
        let start = center(&view, b);
        view.handle(&InputEvent::PointerDown {
            position: start,
            time: 0,
        });
        view.handle(&InputEvent::PointerMove {
            position: start + Vec2::new(20.0, 0.0),
            time: 10,
        });
        view.handle(&InputEvent::PointerUp {
            position: start + Vec2::new(20.0, 0.0),
            time: 20,
        });
        assert!(view.view_state().is_collapsed(b));
        assert_eq!(view.transform().pan, Vec2::new(20.0, 0.0));
        assert_eq!(view.surface().transform(), Affine::translate((410.0, 50.0)));
    }

    #[test]
    fn pan_and_zoom_survive_redraws() {
        let mut view = view(HostCapabilities::all());
        let b = node(&view, &[1]);
        view.pan_by(Vec2::new(10.0, -5.0));
        view.handle(&InputEvent::Wheel {
            position: Point::new(400.0, 45.0),
            delta: WheelDelta::Pixels(-500.0),
        });
        let zoomed = *view.transform();
        assert!((zoomed.scale - 2.0).abs() < 1e-9);

        view.click_node(b, 0.0);
        let t = *view.transform();
        assert_eq!(t.base, view.layout().base_translate());
        assert_eq!(t.pan, zoomed.pan);
        assert_eq!(t.scale, zoomed.scale);
        assert_eq!(view.surface().transform(), t.affine());
    }

    #[test]
    fn hit_test_follows_zoom() {
        let mut view = view(HostCapabilities::all());
        let yes = node(&view, &[0]);
        view.zoom_at(Point::new(390.0, 50.0), 2.0);
        assert_eq!(view.hit_test(center(&view, yes)), Some(yes));
        assert_eq!(view.hit_test(Point::new(-500.0, -500.0)), None);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = view(HostCapabilities::all());
        view.zoom_at(Point::ZERO, 1e6);
        assert_eq!(view.transform().scale, 10.0);
        view.handle(&InputEvent::Wheel {
            position: Point::ZERO,
            delta: WheelDelta::Pages(100.0),
        });
        assert_eq!(view.transform().scale, 0.1);
    }

    #[test]
    fn absent_or_malformed_input_draws_nothing() {
        let surface = || SvgSurface::new(Size::new(100.0, 100.0));
        let caps = HostCapabilities::all();
        let parse = |json| TreeView::from_json_str(json, surface(), caps, ViewerConfig::default());
        assert!(parse("null").is_none());
        assert!(parse("{ not json").is_none());
        assert!(parse(r#"{ "children": 3 }"#).is_none());

        let absent = TreeView::new(None, surface(), caps, ViewerConfig::default());
        assert!(absent.is_none());
        let leaf = Hierarchy::from_raw(&RawNode::leaf("only"));
        let view = TreeView::new(Some(leaf), surface(), caps, ViewerConfig::default())
            .unwrap();
        assert_eq!(view.into_surface().len(), 1);
    }

    #[test]
    fn null_child_keeps_rest_of_tree() {
        let json = r#"{ "feature": "A", "children": { "x": null, "y": { "type": "leaf" } } }"#;
        let surface = SvgSurface::new(Size::new(960.0, 600.0));
        let caps = HostCapabilities::all();
        let view = TreeView::from_json_str(json, surface, caps, ViewerConfig::default())
            .unwrap();
        assert_eq!(view.layout().len(), 2);
        assert_eq!(view.surface().len(), 2 + 1 + 1);
    }

    #[test]
    fn drawn_boxes_match_hit_area() {
        let config = ViewerConfig::from_json_str(
            r#"{ "layout": { "node_size": { "width": 300.0, "height": 50.0 } } }"#,
        )
        .unwrap();
        let surface = SvgSurface::new(Size::new(960.0, 600.0));
        let caps = HostCapabilities::all();
        let view = TreeView::from_json_str(SCENARIO, surface, caps, config).unwrap();
        let root = view.hierarchy().root();
        let Some(Element::Node(drawn)) = view.surface().get(ElementKey::Node(root)) else {
            panic!("root is drawn");
        };
        assert_eq!(drawn.size, Size::new(300.0, 50.0));
        assert_eq!(view.layout().node_size(), drawn.size);
        let inside_drawn_box = center(&view, root) + Vec2::new(100.0, 0.0);
        assert_eq!(view.hit_test(inside_drawn_box), Some(root));
    }
}
