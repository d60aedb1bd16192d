// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Surface`] that serializes to an SVG document.

use core::fmt;

use indexmap::IndexMap;
use kurbo::{Affine, Size};

use crate::element::{Element, ElementFlags, ElementKey, Tooltip};
use crate::surface::Surface;

/// Keyed element store that writes itself out as SVG.
///
/// Links are drawn first, then edge labels, then nodes, each in the order
/// they entered. The tooltip, when shown, sits outside the transformed group.
///
/// ```rust
/// use canopy_render::{Element, ElementKey, LabelElement, SvgSurface, Surface};
/// use canopy_hierarchy::{Hierarchy, RawNode};
/// use kurbo::{Point, Size};
///
/// let tree = Hierarchy::from_raw(&RawNode::leaf("x"));
/// let mut svg = SvgSurface::new(Size::new(200.0, 100.0));
/// svg.enter(
///     ElementKey::LinkLabel(tree.root()),
///     &Element::LinkLabel(LabelElement { position: Point::new(10.0, 20.0), text: "a&b".into() }),
/// );
/// assert!(svg.to_svg().contains(">a&amp;b</text>"));
/// ```
#[derive(Clone, Debug)]
pub struct SvgSurface {
    size: Size,
    transform: Affine,
    elements: IndexMap<ElementKey, Element>,
    tooltip: Option<Tooltip>,
}

impl SvgSurface {
    /// Creates an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            elements: IndexMap::new(),
            tooltip: None,
        }
    }

    /// Document size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The element stored under `key`.
    pub fn get(&self, key: ElementKey) -> Option<&Element> {
        self.elements.get(&key)
    }

    /// Returns `true` if `key` is drawn.
    pub fn contains(&self, key: ElementKey) -> bool {
        self.elements.contains_key(&key)
    }

    /// Number of drawn elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Keys in entry order.
    pub fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.elements.keys().copied()
    }

    /// Current layout→surface transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Tooltip currently shown.
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Serializes the surface.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl Surface for SvgSurface {
    fn enter(&mut self, key: ElementKey, element: &Element) {
        if self.elements.insert(key, element.clone()).is_some() {
            log::warn!("{key:?} entered twice");
        }
    }

    fn update(&mut self, key: ElementKey, element: &Element) {
        match self.elements.get_mut(&key) {
            Some(slot) => *slot = element.clone(),
            None => log::warn!("update of {key:?}, which never entered"),
        }
    }

    fn exit(&mut self, key: ElementKey) {
        self.elements.shift_remove(&key);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.tooltip = Some(tooltip.clone());
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
}

impl fmt::Display for SvgSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.transform.as_coeffs();
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="sans-serif" font-size="12">"#,
            self.size.width, self.size.height, self.size.width, self.size.height
        )?;
        writeln!(f, r#"  <g transform="matrix({a} {b} {c} {d} {e} {g})">"#)?;

        for element in self.elements.values() {
            if let Element::Link(link) = element {
                writeln!(
                    f,
                    r#"    <path class="link" d="{}" fill="none" stroke="{}" />"#,
                    link.path.to_svg(),
                    escape_xml(&link.stroke)
                )?;
            }
        }
        for element in self.elements.values() {
            if let Element::LinkLabel(label) = element {
                writeln!(
                    f,
                    r#"    <text class="link-label" x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                    label.position.x,
                    label.position.y,
                    escape_xml(&label.text)
                )?;
            }
        }
        for element in self.elements.values() {
            let Element::Node(node) = element else {
                continue;
            };
            let class = if node.flags.contains(ElementFlags::LEAF) {
                "node leaf"
            } else if node.flags.contains(ElementFlags::COLLAPSED) {
                "node collapsed"
            } else {
                "node expanded"
            };
            writeln!(
                f,
                r#"    <g class="{class}" transform="translate({:.1},{:.1})">"#,
                node.position.x, node.position.y
            )?;
            writeln!(
                f,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" />"#,
                -node.size.width / 2.0,
                -node.size.height / 2.0,
                node.size.width,
                node.size.height,
                escape_xml(&node.fill),
                escape_xml(&node.stroke)
            )?;
            write!(f, r#"      <text text-anchor="middle" y="-18">"#)?;
            for line in &node.lines {
                write!(f, r#"<tspan x="0" dy="1.2em">{}</tspan>"#, escape_xml(line))?;
            }
            writeln!(f, "</text>")?;
            writeln!(f, "    </g>")?;
        }
        writeln!(f, "  </g>")?;

        if let Some(tooltip) = &self.tooltip {
            writeln!(
                f,
                r#"  <g class="tooltip" transform="translate({:.1},{:.1})">"#,
                tooltip.position.x, tooltip.position.y
            )?;
            write!(f, "    <text>")?;
            for line in tooltip.lines() {
                write!(f, r#"<tspan x="0" dy="1.2em">{}</tspan>"#, escape_xml(&line))?;
            }
            writeln!(f, "</text>")?;
            writeln!(f, "  </g>")?;
        }
        writeln!(f, "</svg>")
    }
}

/// Escapes text for use in XML content and attribute values.
pub(crate) fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderConfig, Renderer};
    use canopy_hierarchy::{Hierarchy, Metric, RawNode};
    use canopy_layout::LayoutEngine;
    use canopy_view_state::ViewState;
    use kurbo::Point;

    fn rendered() -> (Hierarchy, SvgSurface) {
        let tree = Hierarchy::from_raw(&RawNode::split(
            "Outlook",
            [("sunny", RawNode::leaf("No")), ("rain", RawNode::leaf("Yes"))],
        ));
        let state = ViewState::new(&tree);
        let layout = LayoutEngine::default().layout(&state.visible_subtree());
        let mut svg = SvgSurface::new(Size::new(960.0, 600.0));
        let mut renderer = Renderer::new(RenderConfig::default());
        renderer.render(&tree, &state, &layout, tree.root(), 0.0, &mut svg);
        renderer.tick(750.0, &mut svg);
        (tree, svg)
    }

    #[test]
    fn document_draws_links_under_nodes() {
        let (_, svg) = rendered();
        let doc = svg.to_svg();
        let first_link = doc.find(r#"class="link""#).unwrap();
        let first_node = doc.find(r#"class="node"#).unwrap();
        assert!(first_link < first_node);
        assert_eq!(doc.matches("<path").count(), 2);
        assert_eq!(doc.matches(r#"class="link-label""#).count(), 2);
        assert!(doc.contains(r#"<g class="node leaf" transform="translate(-75.0,100.0)">"#));
        assert!(doc.contains(r#"fill="lightgreen""#));
        assert!(doc.contains(r#"<tspan x="0" dy="1.2em">Outlook</tspan>"#));
        assert!(doc.starts_with("<svg"));
        assert!(doc.ends_with("</svg>\n"));
    }

    #[test]
    fn exits_remove_and_updates_replace() {
        let (tree, mut svg) = rendered();
        let leaf = tree.children_of(tree.root())[0];
        assert_eq!(svg.len(), 7);
        svg.exit(ElementKey::Node(leaf));
        assert!(!svg.contains(ElementKey::Node(leaf)));
        // Updating something that never entered is ignored.
        let root = svg.get(ElementKey::Node(tree.root())).cloned().unwrap();
        svg.update(ElementKey::Node(leaf), &root);
        assert!(!svg.contains(ElementKey::Node(leaf)));
    }

    #[test]
    fn transform_and_tooltip_are_written() {
        let (_, mut svg) = rendered();
        svg.set_transform(Affine::translate((390.0, 50.0)) * Affine::scale(2.0));
        svg.show_tooltip(&Tooltip::new(
            Point::new(108.0, 80.0),
            vec![Metric { name: "Humidity".into(), value: 0.1518 }],
        ));
        let doc = svg.to_svg();
        assert!(doc.contains(r#"<g transform="matrix(2 0 0 2 390 50)">"#));
        assert!(doc.contains(r#"<g class="tooltip" transform="translate(108.0,80.0)">"#));
        assert!(doc.contains("Humidity: 0.152"));
        svg.hide_tooltip();
        assert!(!svg.to_svg().contains("tooltip"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
