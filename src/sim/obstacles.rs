//! Obstacles: spawning, scrolling, scoring and pruning
//!
//! Scoring and removal are separate events. An obstacle scores once as it
//! clears the bottom edge and is only dropped `prune_margin` pixels later.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, is_colliding};
use crate::tuning::Tuning;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Wide, flat and random width
    Log,
    /// Fixed-size hole
    Pothole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the obstacle has been passed
    pub has_scored: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Result of scrolling the field by one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Advance {
    /// Obstacles that cleared the bottom this frame
    pub passed: u32,
    /// Scroll speed after the passes were applied
    pub speed: f32,
}

/// All live obstacles, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Add an obstacle at an explicit position (scripted scenes and tests)
    pub fn insert(&mut self, kind: ObstacleKind, rect: Rect) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            kind,
            pos: rect.pos,
            size: rect.size,
            has_scored: false,
        });
        id
    }

    /// Spawn a random obstacle above the visible area, fully on the road
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning, surface_width: f32) -> &Obstacle {
        let kind = if rng.random_bool(0.5) {
            ObstacleKind::Log
        } else {
            ObstacleKind::Pothole
        };

        let size = match kind {
            ObstacleKind::Log => {
                // Half-open: a log is never exactly log_max_width wide
                let width = if tuning.log_max_width > tuning.log_min_width {
                    rng.random_range(tuning.log_min_width..tuning.log_max_width)
                } else {
                    tuning.log_min_width
                };
                Vec2::new(width, tuning.log_height)
            }
            ObstacleKind::Pothole => Vec2::new(tuning.pothole_width, tuning.pothole_height),
        };

        let x_min = tuning.road_margin;
        let x_max = tuning.road_margin + tuning.road_width(surface_width) - size.x;
        let x = if x_max > x_min {
            rng.random_range(x_min..=x_max)
        } else {
            x_min
        };

        let id = self.insert(kind, Rect::new(x, tuning.spawn_y, size.x, size.y));
        log::debug!("Spawned {:?} #{} at x={:.1} width={:.1}", kind, id, x, size.x);

        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle down by `speed * scale`, scoring any that clear `bottom`.
    ///
    /// Each pass bumps the speed by `increment` immediately, so obstacles later
    /// in spawn order scroll at the raised speed within the same frame.
    pub fn advance(&mut self, speed: f32, scale: f32, bottom: f32, increment: f32) -> Advance {
        let mut speed = speed;
        let mut passed = 0;

        for obstacle in &mut self.obstacles {
            obstacle.pos.y += speed * scale;

            if !obstacle.has_scored && obstacle.pos.y > bottom {
                obstacle.has_scored = true;
                passed += 1;
                speed += increment;
            }
        }

        Advance { passed, speed }
    }

    /// Drop obstacles that are `margin` or more below `bottom`
    pub fn prune(&mut self, bottom: f32, margin: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.pos.y < bottom + margin);
        before - self.obstacles.len()
    }

    /// First obstacle overlapping `target`, if any
    pub fn first_collision(&self, target: &Rect) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| is_colliding(&o.rect(), target))
    }
}
