// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing capability the renderer calls into.

use kurbo::Affine;

use crate::element::{Element, ElementKey, Tooltip};

/// A retained, keyed drawing target.
///
/// The renderer creates each key once with [`Surface::enter`], changes it with
/// [`Surface::update`] and removes it with [`Surface::exit`]. Elements are in
/// layout space; [`Surface::set_transform`] maps layout space onto the
/// surface.
pub trait Surface {
    /// A new element appears.
    fn enter(&mut self, key: ElementKey, element: &Element);

    /// An existing element changes.
    fn update(&mut self, key: ElementKey, element: &Element);

    /// An element disappears.
    fn exit(&mut self, key: ElementKey);

    /// Sets the layout→surface transform for every element.
    fn set_transform(&mut self, transform: Affine);

    /// Shows `tooltip`. Surfaces without a tooltip element ignore it.
    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        let _ = tooltip;
    }

    /// Hides the tooltip, if any.
    fn hide_tooltip(&mut self) {}
}
