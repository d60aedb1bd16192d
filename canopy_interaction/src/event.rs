// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input accepted by [`TreeView::handle`](crate::TreeView::handle).

use kurbo::Point;

/// Scroll amount of a wheel event, by unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelDelta {
    /// Pixels; positive scrolls down and zooms out.
    Pixels(f64),
    /// Lines.
    Lines(f64),
    /// Pages.
    Pages(f64),
}

/// A pointer or wheel event in surface coordinates, timestamped in
/// milliseconds on the host's animation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown {
        /// Pointer position.
        position: Point,
        /// Timestamp.
        time: u64,
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        /// Pointer position.
        position: Point,
        /// Timestamp.
        time: u64,
    },
    /// Primary button released.
    PointerUp {
        /// Pointer position.
        position: Point,
        /// Timestamp.
        time: u64,
    },
    /// Pointer left the surface.
    PointerLeave,
    /// Wheel scrolled.
    Wheel {
        /// Pointer position.
        position: Point,
        /// Scroll amount.
        delta: WheelDelta,
    },
}

/// Host control activations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show every node.
    ExpandAll,
    /// Hide everything below the first level.
    CollapseAll,
}
