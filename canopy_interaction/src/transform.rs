// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout→surface transform combining centering with pan and zoom.

use kurbo::{Affine, Point, Vec2};

/// `translate(base + pan) · scale(scale)`.
///
/// `base` is the centering translate of the latest layout; `pan` and `scale`
/// change only with gestures and survive re-layouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Centering translate from the current layout.
    pub base: Vec2,
    /// User pan.
    pub pan: Vec2,
    /// User zoom.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            base: Vec2::ZERO,
            pan: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// The composed transform.
    pub fn affine(&self) -> Affine {
        Affine::translate(self.base + self.pan) * Affine::scale(self.scale)
    }

    /// Maps a layout point onto the surface.
    pub fn to_surface(&self, point: Point) -> Point {
        (self.base + self.pan + point.to_vec2() * self.scale).to_point()
    }

    /// Maps a surface point back into layout space.
    pub fn to_layout(&self, point: Point) -> Point {
        ((point.to_vec2() - self.base - self.pan) / self.scale.max(f64::MIN_POSITIVE)).to_point()
    }

    /// Moves the view by `delta` surface pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiplies the zoom by `factor`, clamped to `min..=max`, keeping the
    /// layout point under `anchor` fixed. Returns `false` if the zoom did not
    /// change.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64, min: f64, max: f64) -> bool {
        let scale = (self.scale * factor).clamp(min, max);
        if !scale.is_finite() || scale == self.scale {
            return false;
        }
        let fixed = self.to_layout(anchor);
        self.scale = scale;
        self.pan = anchor.to_vec2() - self.base - fixed.to_vec2() * scale;
        true
    }
}
