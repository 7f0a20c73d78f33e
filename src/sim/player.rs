//! The player's car
//!
//! Input only ever moves `target_x`; the car eases toward it once per frame
//! and is held inside the road afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Outcome of a frame's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// Still on the road
    OnRoad,
    /// The eased position crossed a road edge (position has been clamped)
    HitBarrier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Desired x from the last pointer position (may lie off the road)
    pub target_x: f32,
}

impl Player {
    /// Place the car centred near the bottom of a `width` x `height` surface
    pub fn new(tuning: &Tuning, width: f32, height: f32) -> Self {
        let x = width / 2.0 - tuning.player_width / 2.0;
        let y = height - tuning.player_bottom_offset;
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            target_x: x,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Aim the car so its centre sits under the pointer
    pub fn aim_at(&mut self, pointer_x: f32) {
        self.target_x = pointer_x - self.size.x / 2.0;
    }

    /// Ease toward the target by `factor`, then check and clamp to `[left, right]`.
    ///
    /// The barrier check sees the unclamped position, so overshooting the
    /// edge is reported even though the car is drawn against it.
    pub fn steer(&mut self, factor: f32, left: f32, right: f32) -> Steer {
        self.pos.x += (self.target_x - self.pos.x) * factor;

        let outcome = if self.pos.x < left || self.pos.x > right {
            Steer::HitBarrier
        } else {
            Steer::OnRoad
        };

        self.pos.x = self.pos.x.clamp(left, right);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&Tuning::default(), 480.0, 640.0)
    }

    #[test]
    fn test_starts_centered() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(220.0, 530.0));
        assert_eq!(p.target_x, p.pos.x);
        assert_eq!(p.rect().center().x, 240.0);
    }

    #[test]
    fn test_aim_centers_on_pointer() {
        let mut p = player();
        p.aim_at(300.0);
        assert_eq!(p.target_x, 280.0);
        // Unconstrained
        p.aim_at(10_000.0);
        assert_eq!(p.target_x, 9_980.0);
    }

    #[test]
    fn test_steer_eases_by_factor() {
        let mut p = player();
        p.aim_at(340.0); // target 320, distance 100
        assert_eq!(p.steer(0.2, 80.0, 360.0), Steer::OnRoad);
        assert!((p.pos.x - 240.0).abs() < 1e-4);
        p.steer(0.2, 80.0, 360.0);
        assert!((p.pos.x - 256.0).abs() < 1e-4);
    }

    #[test]
    fn test_overshoot_hits_barrier_and_clamps() {
        let mut p = player();
        p.pos.x = 355.0;
        p.target_x = 400.0;
        assert_eq!(p.steer(0.2, 80.0, 360.0), Steer::HitBarrier);
        assert_eq!(p.pos.x, 360.0);
    }

    #[test]
    fn test_left_barrier() {
        let mut p = player();
        p.pos.x = 81.0;
        p.target_x = 0.0;
        assert_eq!(p.steer(0.2, 80.0, 360.0), Steer::HitBarrier);
        assert_eq!(p.pos.x, 80.0);
    }

    #[test]
    fn test_exactly_on_limit_is_on_road() {
        let mut p = player();
        p.pos.x = 360.0;
        p.target_x = 360.0;
        assert_eq!(p.steer(0.2, 80.0, 360.0), Steer::OnRoad);
    }
}
