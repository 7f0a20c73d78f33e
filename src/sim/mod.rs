//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Frame timestamps are passed in, never read
//! - Seeded RNG only
//! - Obstacles iterate in spawn order

pub mod geometry;
pub mod obstacles;
pub mod player;
pub mod state;
pub mod tick;

pub use geometry::{Rect, is_colliding};
pub use obstacles::{Advance, Obstacle, ObstacleField, ObstacleKind};
pub use player::{Player, Steer};
pub use state::{EndReason, GamePhase, GameState, Snapshot};
pub use tick::{motion_scale, smoothing_factor, tick};
