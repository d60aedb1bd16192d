// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click versus drag discrimination for a single pointer.
//!
//! Nodes move under the pointer while transitions run, so the node hit on
//! release may differ from the one pressed. A press is still a click on the
//! pressed node when:
//!
//! 1. the release hits the same node, or
//! 2. the pointer never travelled past the drag distance and, if a time
//!    threshold is configured, the release came soon enough.
//!
//! Once the pointer travels past the drag distance the press becomes a drag:
//! every further move reports a pan delta and the release never clicks.
//!
//! ```
//! use canopy_interaction::{PressResult, PressState};
//! use kurbo::{Point, Vec2};
//!
//! let mut press: PressState<u32> = PressState::new(5.0, Some(300));
//! press.on_down(Some(7), Point::new(10.0, 10.0), 1_000);
//! assert_eq!(press.on_move(Point::new(12.0, 11.0)), None);
//! assert!(matches!(press.on_up(Some(&7), Point::new(12.0, 11.0), 1_050), PressResult::Click(7)));
//!
//! press.on_down(None, Point::new(0.0, 0.0), 2_000);
//! assert_eq!(press.on_move(Point::new(20.0, 0.0)), Some(Vec2::new(20.0, 0.0)));
//! assert_eq!(press.on_move(Point::new(25.0, 5.0)), Some(Vec2::new(5.0, 5.0)));
//! assert!(matches!(press.on_up(None, Point::new(25.0, 5.0), 2_100), PressResult::Drag));
//! ```

use kurbo::{Point, Vec2};

/// An active press.
#[derive(Clone, Debug)]
pub struct Press<K> {
    /// Node under the pointer at press time, `None` for the background.
    pub target: Option<K>,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Pointer position at the last move.
    pub last_position: Point,
    /// Timestamp of the press, in milliseconds.
    pub down_time: u64,
    /// The pointer travelled past the drag distance.
    pub dragging: bool,
}

/// Outcome of a release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// The pressed node was clicked.
    Click(K),
    /// The press panned the view.
    Drag,
    /// Neither; carries the pressed node, if any.
    Suppressed(Option<K>),
}

/// Single-pointer press tracker.
#[derive(Clone, Debug)]
pub struct PressState<K> {
    press: Option<Press<K>>,
    /// Travel, in surface pixels, after which a press becomes a drag.
    pub drag_distance: f64,
    /// Longest press still clicking when the node under the pointer changed.
    pub time_threshold: Option<u64>,
}

impl<K> Default for PressState<K> {
    fn default() -> Self {
        Self {
            press: None,
            drag_distance: 5.0,
            time_threshold: Some(300),
        }
    }
}

impl<K: PartialEq + Clone> PressState<K> {
    /// Creates a tracker with no active press.
    pub fn new(drag_distance: f64, time_threshold: Option<u64>) -> Self {
        Self {
            press: None,
            drag_distance,
            time_threshold,
        }
    }

    /// Records a press, replacing any press still active.
    pub fn on_down(&mut self, target: Option<K>, position: Point, timestamp: u64) {
        self.press = Some(Press {
            target,
            down_position: position,
            last_position: position,
            down_time: timestamp,
            dragging: false,
        });
    }

    /// Records a move. Returns the pan delta once the press is a drag.
    pub fn on_move(&mut self, position: Point) -> Option<Vec2> {
        let press = self.press.as_mut()?;
        if !press.dragging {
            if press.down_position.distance(position) <= self.drag_distance {
                return None;
            }
            press.dragging = true;
        }
        let delta = position - press.last_position;
        press.last_position = position;
        Some(delta)
    }

    /// Ends the press and classifies it.
    pub fn on_up(
        &mut self,
        current_target: Option<&K>,
        position: Point,
        timestamp: u64,
    ) -> PressResult<K> {
        let Some(press) = self.press.take() else {
            return PressResult::Suppressed(None);
        };
        if press.dragging {
            return PressResult::Drag;
        }
        let Some(target) = press.target else {
            return PressResult::Suppressed(None);
        };
        if current_target == Some(&target) {
            return PressResult::Click(target);
        }
        let distance_ok = press.down_position.distance(position) <= self.drag_distance;
        let time_ok = self
            .time_threshold
            .is_none_or(|limit| timestamp.saturating_sub(press.down_time) <= limit);
        if distance_ok && time_ok {
            PressResult::Click(target)
        } else {
            PressResult::Suppressed(Some(target))
        }
    }

    /// Drops the active press. Returns `true` if there was one.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Returns `true` while a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Returns `true` while the active press is a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.as_ref().is_some_and(|p| p.dragging)
    }

    /// The active press.
    pub fn press(&self) -> Option<&Press<K>> {
        self.press.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_target_clicks_after_small_jitter() {
        let mut s: PressState<u32> = PressState::default();
        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(s.on_move(Point::new(3.0, 4.0)), None);
        assert_eq!(s.on_up(Some(&1), Point::new(3.0, 4.0), 2_000), PressResult::Click(1));
        assert!(!s.is_pressed());
    }

    #[test]
    fn moved_target_within_tolerance_clicks_pressed_node() {
        let mut s: PressState<u32> = PressState::default();
        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(s.on_up(Some(&2), Point::new(1.0, 1.0), 200), PressResult::Click(1));

        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(s.on_up(None, Point::new(1.0, 1.0), 200), PressResult::Click(1));
    }

    #[test]
    fn moved_target_after_time_limit_is_suppressed() {
        let mut s: PressState<u32> = PressState::default();
        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(
            s.on_up(Some(&2), Point::new(1.0, 1.0), 301),
            PressResult::Suppressed(Some(1))
        );
    }

    #[test]
    fn no_time_limit_accepts_slow_release() {
        let mut s: PressState<u32> = PressState::new(5.0, None);
        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(s.on_up(Some(&2), Point::new(1.0, 1.0), 60_000), PressResult::Click(1));
    }

    #[test]
    fn drag_never_clicks_even_on_same_node() {
        let mut s: PressState<u32> = PressState::default();
        s.on_down(Some(1), Point::new(0.0, 0.0), 0);
        assert_eq!(s.on_move(Point::new(6.0, 0.0)), Some(Vec2::new(6.0, 0.0)));
        assert!(s.is_dragging());
        assert_eq!(s.on_move(Point::new(6.0, 2.0)), Some(Vec2::new(0.0, 2.0)));
        assert_eq!(s.on_up(Some(&1), Point::new(0.0, 0.0), 10), PressResult::Drag);
    }

    #[test]
    fn background_press_does_not_click() {
        let mut s: PressState<u32> = PressState::default();
        s.on_down(None, Point::ZERO, 0);
        assert_eq!(s.on_up(Some(&1), Point::ZERO, 10), PressResult::Suppressed(None));
        assert_eq!(s.on_up(None, Point::ZERO, 20), PressResult::Suppressed(None));
    }

    #[test]
    fn cancel_clears_press() {
        let mut s: PressState<u32> = PressState::default();
        assert!(!s.cancel());
        s.on_down(Some(1), Point::ZERO, 0);
        assert!(s.press().is_some());
        assert!(s.cancel());
        assert_eq!(s.on_move(Point::new(50.0, 0.0)), None);
    }
}
