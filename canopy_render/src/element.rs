// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable elements handed to a [`Surface`](crate::Surface).

use canopy_hierarchy::{Metric, NodeId};
use kurbo::{BezPath, Point, Rect, Size};
use smallvec::SmallVec;

/// Identity of a drawn element. Links and their labels are keyed by the
/// link's target node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKey {
    /// The box of a node.
    Node(NodeId),
    /// The connector into a node.
    Link(NodeId),
    /// The edge label on the connector into a node.
    LinkLabel(NodeId),
}

impl ElementKey {
    /// The node this element belongs to.
    pub fn node(self) -> NodeId {
        match self {
            Self::Node(id) | Self::Link(id) | Self::LinkLabel(id) => id,
        }
    }
}

bitflags::bitflags! {
    /// State of a drawn node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Outcome node.
        const LEAF      = 0b0000_0001;
        /// Children are shown.
        const EXPANDED  = 0b0000_0010;
        /// Children are hidden.
        const COLLAPSED = 0b0000_0100;
    }
}

/// A node box with its text lines.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeElement {
    /// Center of the box in layout space.
    pub position: Point,
    /// Box size.
    pub size: Size,
    /// Fill color.
    pub fill: String,
    /// Stroke color.
    pub stroke: String,
    /// Text lines, top to bottom.
    pub lines: SmallVec<[String; 3]>,
    /// Leaf and disclosure state.
    pub flags: ElementFlags,
}

impl NodeElement {
    /// Box in layout space.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }
}

/// A vertical cubic connector between two node centers.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkElement {
    /// Parent end.
    pub source: Point,
    /// Child end.
    pub target: Point,
    /// Stroke color.
    pub stroke: String,
    /// Connector geometry.
    pub path: BezPath,
}

impl LinkElement {
    /// Builds the connector from `source` to `target`.
    pub fn new(source: Point, target: Point, stroke: impl Into<String>) -> Self {
        Self {
            source,
            target,
            stroke: stroke.into(),
            path: vertical_link(source, target),
        }
    }

    /// Midpoint of the straight segment between the ends.
    pub fn midpoint(&self) -> Point {
        self.source.midpoint(self.target)
    }
}

/// Cubic from `s` to `t` whose control points share the vertical midpoint,
/// leaving and entering both ends vertically.
pub fn vertical_link(s: Point, t: Point) -> BezPath {
    let my = (s.y + t.y) / 2.0;
    let mut path = BezPath::new();
    path.move_to(s);
    path.curve_to(Point::new(s.x, my), Point::new(t.x, my), t);
    path
}

/// Edge label text at the midpoint of its link.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelElement {
    /// Anchor of the centered text, in layout space.
    pub position: Point,
    /// Label text.
    pub text: String,
}

/// One drawable element.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Node box.
    Node(NodeElement),
    /// Connector.
    Link(LinkElement),
    /// Edge label.
    LinkLabel(LabelElement),
}

/// Detail popup for a node, positioned in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Top-left corner.
    pub position: Point,
    /// Entries in input order.
    pub entries: Vec<Metric>,
}

impl Tooltip {
    /// Creates a tooltip listing `entries` at `position`.
    pub fn new(position: Point, entries: Vec<Metric>) -> Self {
        Self { position, entries }
    }

    /// One `name: value` line per entry, values to three decimals.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|m| format!("{}: {:.3}", m.name, m.value))
    }

    /// Markup for hosts with an HTML tooltip element.
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|m| format!("<strong>{}:</strong> {:.3}", crate::svg::escape_xml(&m.name), m.value))
            .collect::<Vec<_>>()
            .join("<br>")
    }
}
