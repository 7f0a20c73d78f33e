//! Game state and core simulation types
//!
//! One `GameState` holds everything a session mutates. Score, speed and
//! phase are only changed through the tick and input handlers so their
//! invariants (monotonic, set-once) hold.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::obstacles::{Obstacle, ObstacleField};
use super::player::Player;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Steered past a road edge
    HitBarrier,
    /// Pointer left the play surface
    LeftRoad,
    /// Drove into a log or pothole
    HitObstacle,
}

impl EndReason {
    /// Message shown on the game-over overlay
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::HitBarrier => "You hit the barrier!",
            EndReason::LeftRoad => "You left the road!",
            EndReason::HitObstacle => "You hit an obstacle!",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; absorbing
    Terminal { reason: EndReason },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Surface size in pixels, fixed for the session
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub obstacles: ObstacleField,
    pub(crate) rng: Pcg32,
    pub(crate) speed: f32,
    pub(crate) score: u32,
    pub(crate) phase: GamePhase,
    /// Timestamp (ms) of the last spawn
    pub(crate) last_spawn_ms: f64,
    /// Timestamp (ms) of the last processed frame
    pub(crate) last_frame_ms: Option<f64>,
    /// Frames processed while running
    pub(crate) frames: u64,
}

impl GameState {
    /// Create a new session on a `width` x `height` surface
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        let player = Player::new(&tuning, width, height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed: tuning.initial_speed,
            tuning,
            width,
            height,
            player,
            obstacles: ObstacleField::new(),
            score: 0,
            phase: GamePhase::Running,
            last_spawn_ms: 0.0,
            last_frame_ms: None,
            frames: 0,
        }
    }

    /// Pointer moved to `x` (surface coordinates)
    pub fn pointer_moved(&mut self, x: f32) {
        if self.is_running() {
            self.player.aim_at(x);
        }
    }

    /// Pointer left the play surface
    pub fn pointer_left(&mut self) {
        self.end(EndReason::LeftRoad);
    }

    /// Enter the terminal phase. The first reason sticks.
    pub(crate) fn end(&mut self, reason: EndReason) {
        if self.is_running() {
            self.phase = GamePhase::Terminal { reason };
            log::info!("GAME OVER: {} (score {})", reason.message(), self.score);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Terminal { reason } => Some(reason),
        }
    }

    pub fn end_message(&self) -> Option<&'static str> {
        self.end_reason().map(|r| r.message())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player_rect(&self) -> Rect {
        self.player.rect()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    /// Smallest legal player x
    pub fn left_limit(&self) -> f32 {
        self.tuning.left_limit()
    }

    /// Largest legal player x
    pub fn right_limit(&self) -> f32 {
        self.tuning.right_limit(self.width)
    }

    /// Owned copy of everything the presentation layer reads
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player_rect(),
            obstacles: self.obstacles().to_vec(),
            score: self.score,
            speed: self.speed,
            running: self.is_running(),
            end_message: self.end_message().map(str::to_owned),
            frames: self.frames,
        }
    }
}

/// Read-only view of one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Rect,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub speed: f32,
    pub running: bool,
    pub end_message: Option<String>,
    pub frames: u64,
}
