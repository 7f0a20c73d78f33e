//! Per-frame simulation step
//!
//! Driven once per display frame with the host's frame timestamp. The step
//! never reads a clock itself.

use super::player::Steer;
use super::state::{EndReason, GameState};
use crate::tuning::{MAX_FRAME_GAP_MS, MotionMode};

/// Motion multiplier for this frame (1.0 in per-frame mode)
pub fn motion_scale(motion: MotionMode, last_frame_ms: Option<f64>, now_ms: f64) -> f32 {
    match (motion, last_frame_ms) {
        (MotionMode::PerFrame, _) | (MotionMode::TimeScaled { .. }, None) => 1.0,
        (MotionMode::TimeScaled { reference_frame_ms }, Some(last)) => {
            let dt = ((now_ms - last) as f32).clamp(0.0, MAX_FRAME_GAP_MS);
            dt / reference_frame_ms
        }
    }
}

/// Easing factor for `smoothing` stretched over `scale` reference frames
pub fn smoothing_factor(smoothing: f32, scale: f32) -> f32 {
    if scale == 1.0 {
        smoothing
    } else {
        1.0 - (1.0 - smoothing).powf(scale)
    }
}

/// Advance the game by one frame at time `now_ms`
///
/// Order: steer, barrier check, spawn, scroll + score, prune, collision.
/// A barrier hit ends the frame early. Nothing changes once the run has ended.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    let scale = motion_scale(state.tuning.motion, state.last_frame_ms, now_ms);
    state.last_frame_ms = Some(now_ms);
    state.frames += 1;

    // 1. Steer toward the pointer, 2. road edges
    let factor = smoothing_factor(state.tuning.smoothing, scale);
    let (left, right) = (state.left_limit(), state.right_limit());
    if state.player.steer(factor, left, right) == Steer::HitBarrier {
        state.end(EndReason::HitBarrier);
        return;
    }

    // 3. Spawn on wall-clock interval
    if now_ms - state.last_spawn_ms > state.tuning.spawn_interval_ms {
        state.obstacles.spawn(&mut state.rng, &state.tuning, state.width);
        state.last_spawn_ms = now_ms;
    }

    // 4. Scroll, score passed obstacles, speed up
    let step = state.obstacles.advance(
        state.speed,
        scale,
        state.height,
        state.tuning.speed_increment,
    );
    if step.passed > 0 {
        state.score += step.passed;
        state.speed = step.speed;
        log::debug!("Passed obstacle: score={} speed={:.1}", state.score, state.speed);
    }

    // 5. Drop obstacles well below the screen
    state.obstacles.prune(state.height, state.tuning.prune_margin);

    // 6. Crash check
    let car = state.player.rect();
    if state.obstacles.first_collision(&car).is_some() {
        state.end(EndReason::HitObstacle);
    }
}
