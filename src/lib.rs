//! Road Rush - a scrolling-road obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, obstacles, collisions, game state)
//! - `renderer`: Canvas 2D drawing behind a minimal `Surface` trait
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{EndReason, GamePhase, GameState, Snapshot, tick};
pub use tuning::{MotionMode, Tuning, TuningError};

/// Host configuration constants
pub mod consts {
    /// Surface size used when the host cannot report one
    pub const DEFAULT_WIDTH: f32 = 480.0;
    pub const DEFAULT_HEIGHT: f32 = 640.0;

    /// Nominal display frame for headless runs (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
