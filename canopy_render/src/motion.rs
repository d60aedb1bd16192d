// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed interpolation of element geometry.

use kurbo::{Line, Point};

/// Cubic ease-in-out over `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Geometry that can be blended between two states.
pub(crate) trait Tween: Copy {
    fn tween(self, to: Self, t: f64) -> Self;
}

impl Tween for Point {
    fn tween(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Tween for Line {
    fn tween(self, to: Self, t: f64) -> Self {
        Self::new(self.p0.lerp(to.p0, t), self.p1.lerp(to.p1, t))
    }
}

/// One identity's transition from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Motion<T> {
    from: T,
    to: T,
    start: f64,
    duration: f64,
    settled: bool,
}

impl<T: Tween> Motion<T> {
    pub(crate) fn new(from: T, to: T, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            settled: false,
        }
    }

    fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Displayed geometry at `now`.
    pub(crate) fn sample(&self, now: f64) -> T {
        if self.settled {
            return self.to;
        }
        self.from.tween(self.to, ease_cubic_in_out(self.progress(now)))
    }

    /// Restarts from whatever is displayed at `now` toward `to`.
    pub(crate) fn retarget(&mut self, to: T, now: f64, duration: f64) {
        self.from = self.sample(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
        self.settled = false;
    }

    /// Returns `true` once the final geometry has been reported.
    pub(crate) fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advances to `now`; returns the geometry to draw, or `None` when
    /// nothing changed since the last step.
    pub(crate) fn step(&mut self, now: f64) -> Option<T> {
        if self.settled {
            return None;
        }
        let value = self.sample(now);
        if self.progress(now) >= 1.0 {
            self.settled = true;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(2.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn retarget_starts_from_displayed_point() {
        let mut m = Motion::new(Point::ZERO, Point::new(100.0, 0.0), 0.0, 100.0);
        let mid = m.sample(50.0);
        assert_eq!(mid, Point::new(50.0, 0.0));
        m.retarget(Point::new(0.0, 100.0), 50.0, 100.0);
        assert_eq!(m.sample(50.0), mid);
        assert_eq!(m.sample(150.0), Point::new(0.0, 100.0));
    }

    #[test]
    fn step_reports_final_value_once() {
        let mut m = Motion::new(Point::ZERO, Point::new(10.0, 10.0), 0.0, 100.0);
        assert!(m.step(20.0).is_some());
        assert_eq!(m.step(100.0), Some(Point::new(10.0, 10.0)));
        assert!(m.is_settled());
        assert_eq!(m.step(120.0), None);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut m = Motion::new(Point::ZERO, Point::new(1.0, 1.0), 5.0, 0.0);
        assert_eq!(m.step(5.0), Some(Point::new(1.0, 1.0)));
        assert!(m.is_settled());
    }
}
