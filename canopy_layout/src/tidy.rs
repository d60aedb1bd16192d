// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buchheim–Jünger–Leipert tidy tree, in the variant d3's `tree()` uses.
//!
//! Input is a [`VisibleTree`] (pre-order slots, slot 0 the root). Output is
//! one horizontal coordinate per slot, in units of node spacing, with the root
//! at `0`. Both walks are iterative so deep trees do not exhaust the stack.

use canopy_view_state::VisibleTree;

#[derive(Clone, Debug)]
struct TidyNode {
    /// Index among the parent's children.
    number: usize,
    /// Preliminary x.
    prelim: f64,
    modifier: f64,
    /// Slot whose apportioning last touched this node's contour.
    ancestor: usize,
    /// Contour thread for nodes without children.
    thread: Option<usize>,
    change: f64,
    shift: f64,
    /// Default ancestor while apportioning this node's children.
    default_ancestor: Option<usize>,
}

struct Tidy<'a> {
    tree: &'a VisibleTree,
    nodes: Vec<TidyNode>,
    sibling: f64,
    cousin: f64,
}

/// Horizontal positions per slot of `tree`, in node-spacing units.
pub(crate) fn tidy_x(tree: &VisibleTree, sibling: f64, cousin: f64) -> Vec<f64> {
    let mut nodes: Vec<TidyNode> = (0..tree.len())
        .map(|slot| TidyNode {
            number: 0,
            prelim: 0.0,
            modifier: 0.0,
            ancestor: slot,
            thread: None,
            change: 0.0,
            shift: 0.0,
            default_ancestor: None,
        })
        .collect();
    for node in tree.nodes() {
        for (number, &child) in node.children.iter().enumerate() {
            nodes[child].number = number;
        }
    }
    let mut tidy = Tidy {
        tree,
        nodes,
        sibling,
        cousin,
    };
    for slot in post_order(tree) {
        tidy.first_walk(slot);
    }
    tidy.second_walk()
}

/// Left-to-right post-order over the slots of `tree`.
fn post_order(tree: &VisibleTree) -> Vec<usize> {
    let mut order = Vec::with_capacity(tree.len());
    if tree.is_empty() {
        return order;
    }
    let mut stack = vec![(0_usize, false)];
    while let Some((slot, expanded)) = stack.pop() {
        if expanded {
            order.push(slot);
            continue;
        }
        stack.push((slot, true));
        if let Some(node) = tree.get(slot) {
            stack.extend(node.children.iter().rev().map(|&c| (c, false)));
        }
    }
    order
}

impl<'a> Tidy<'a> {
    fn children(&self, slot: usize) -> &'a [usize] {
        &self.tree.nodes()[slot].children
    }

    fn parent(&self, slot: usize) -> Option<usize> {
        self.tree.nodes()[slot].parent
    }

    fn left_sibling(&self, slot: usize) -> Option<usize> {
        let number = self.nodes[slot].number;
        if number == 0 {
            return None;
        }
        self.parent(slot).map(|p| self.children(p)[number - 1])
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.parent(a) == self.parent(b) {
            self.sibling
        } else {
            self.cousin
        }
    }

    fn next_left(&self, slot: usize) -> Option<usize> {
        self.children(slot)
            .first()
            .copied()
            .or(self.nodes[slot].thread)
    }

    fn next_right(&self, slot: usize) -> Option<usize> {
        self.children(slot)
            .last()
            .copied()
            .or(self.nodes[slot].thread)
    }

    fn first_walk(&mut self, v: usize) {
        let left = self.left_sibling(v);
        if let (Some(&first), Some(&last)) = (self.children(v).first(), self.children(v).last()) {
            self.execute_shifts(v);
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            if let Some(w) = left {
                self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(w) = left {
            self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
        }
        if let Some(parent) = self.parent(v) {
            let ancestor = self.nodes[parent]
                .default_ancestor
                .unwrap_or(self.children(parent)[0]);
            let ancestor = self.apportion(v, left, ancestor);
            self.nodes[parent].default_ancestor = Some(ancestor);
        }
    }

    /// Pushes the subtree of `v` right until it clears every subtree to its
    /// left, spreading the shift over the siblings in between.
    fn apportion(&mut self, v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = left else {
            return ancestor;
        };
        let Some(parent) = self.parent(v) else {
            return ancestor;
        };
        // Inner/outer contours on the right (p) and left (m) side.
        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.children(parent)[0];
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        let (next_im, next_ip) = loop {
            let (Some(im), Some(ip)) = (self.next_right(vim), self.next_left(vip)) else {
                break (self.next_right(vim), self.next_left(vip));
            };
            vim = im;
            vip = ip;
            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.nodes[vop].ancestor = v;
            let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip
                + self.separation(vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }
            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;
        };

        if next_im.is_some() && self.next_right(vop).is_none() {
            self.nodes[vop].thread = next_im;
            self.nodes[vop].modifier += sim - sop;
        }
        if next_ip.is_some() && self.next_left(vom).is_none() {
            self.nodes[vom].thread = next_ip;
            self.nodes[vom].modifier += sip - som;
            ancestor = v;
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.nodes[vim].ancestor;
        if self.parent(candidate) == self.parent(v) {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let between = self.nodes[wp].number.saturating_sub(self.nodes[wm].number).max(1);
        let change = shift / between as f64;
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &w in self.tree.nodes()[v].children.iter().rev() {
            let node = &mut self.nodes[w];
            node.prelim += shift;
            node.modifier += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }

    /// Accumulates modifiers top-down. Slots are in pre-order, so every
    /// parent is final before its children are visited.
    fn second_walk(mut self) -> Vec<f64> {
        let mut x = vec![0.0; self.nodes.len()];
        for slot in 0..self.nodes.len() {
            let inherited = match self.parent(slot) {
                Some(parent) => self.nodes[parent].modifier,
                None => -self.nodes[slot].prelim,
            };
            x[slot] = self.nodes[slot].prelim + inherited;
            self.nodes[slot].modifier += inherited;
        }
        x
    }
}
