// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Optional host controls. Features whose control is absent are skipped;
    /// the tree itself always renders.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HostCapabilities: u8 {
        /// The host has a tooltip element.
        const TOOLTIP      = 0b0000_0001;
        /// The host has an "expand all" control.
        const EXPAND_ALL   = 0b0000_0010;
        /// The host has a "collapse all" control.
        const COLLAPSE_ALL = 0b0000_0100;
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::all()
    }
}
