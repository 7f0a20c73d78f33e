//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override them with a
//! JSON blob (the canvas `data-tuning` attribute) without a rebuild.
//! Missing fields fall back to the defaults below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How per-frame motion relates to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionMode {
    /// Raw per-frame increments (easing and scrolling speed up with the refresh rate)
    #[default]
    PerFrame,
    /// Increments scaled by `dt / reference_frame_ms`
    TimeScaled { reference_frame_ms: f32 },
}

/// Longest frame gap honoured in time-scaled mode (tab switches etc.)
pub const MAX_FRAME_GAP_MS: f32 = 100.0;

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Road ===
    /// Empty space left and right of the road
    pub road_margin: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom of the surface to the top of the car
    pub player_bottom_offset: f32,
    /// Fraction of the remaining distance to the target covered per frame (0-1]
    pub smoothing: f32,

    // === Difficulty ===
    /// Starting scroll speed (pixels per frame)
    pub initial_speed: f32,
    /// Speed added each time an obstacle is passed
    pub speed_increment: f32,

    // === Obstacles ===
    /// Wall-clock time between spawns
    pub spawn_interval_ms: f64,
    /// Spawn height (negative = above the visible area)
    pub spawn_y: f32,
    /// How far past the bottom an obstacle travels before it is dropped
    pub prune_margin: f32,
    pub log_min_width: f32,
    pub log_max_width: f32,
    pub log_height: f32,
    pub pothole_width: f32,
    pub pothole_height: f32,

    pub motion: MotionMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            road_margin: 80.0,

            player_width: 40.0,
            player_height: 70.0,
            player_bottom_offset: 110.0,
            smoothing: 0.2,

            initial_speed: 4.0,
            speed_increment: 0.2,

            spawn_interval_ms: 1000.0,
            spawn_y: -100.0,
            prune_margin: 80.0,
            log_min_width: 70.0,
            log_max_width: 130.0,
            log_height: 24.0,
            pothole_width: 50.0,
            pothole_height: 30.0,

            motion: MotionMode::PerFrame,
        }
    }
}

/// Why a tuning blob was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

fn invalid(msg: impl Into<String>) -> TuningError {
    TuningError::Invalid(msg.into())
}

impl Tuning {
    /// Parse and validate a JSON tuning blob
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the values that do not depend on the surface size
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("road_margin", self.road_margin),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_bottom_offset", self.player_bottom_offset),
            ("smoothing", self.smoothing),
            ("initial_speed", self.initial_speed),
            ("speed_increment", self.speed_increment),
            ("spawn_y", self.spawn_y),
            ("prune_margin", self.prune_margin),
            ("log_min_width", self.log_min_width),
            ("log_max_width", self.log_max_width),
            ("log_height", self.log_height),
            ("pothole_width", self.pothole_width),
            ("pothole_height", self.pothole_height),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{} is not finite ({})", name, value)));
        }
        if !self.spawn_interval_ms.is_finite() {
            return Err(invalid("spawn_interval_ms is not finite"));
        }

        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(invalid(format!("smoothing {} not in (0, 1]", self.smoothing)));
        }
        if self.road_margin < 0.0 {
            return Err(invalid("road_margin is negative"));
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return Err(invalid("player size must be positive"));
        }
        if self.initial_speed < 0.0 || self.speed_increment < 0.0 {
            return Err(invalid("speeds must not be negative"));
        }
        if self.spawn_interval_ms <= 0.0 {
            return Err(invalid("spawn_interval_ms must be positive"));
        }
        if self.prune_margin < 0.0 {
            return Err(invalid("prune_margin is negative"));
        }
        if self.log_min_width <= 0.0 || self.log_min_width > self.log_max_width {
            return Err(invalid(format!(
                "log width range {}..{} is empty",
                self.log_min_width, self.log_max_width
            )));
        }
        if self.log_height <= 0.0 || self.pothole_width <= 0.0 || self.pothole_height <= 0.0 {
            return Err(invalid("obstacle sizes must be positive"));
        }
        // Obstacles must start fully above the visible area
        let tallest = self.log_height.max(self.pothole_height);
        if self.spawn_y > -tallest {
            return Err(invalid(format!(
                "spawn_y {} is not above the visible area (needs <= {})",
                self.spawn_y, -tallest
            )));
        }
        if let MotionMode::TimeScaled { reference_frame_ms } = self.motion {
            if !(reference_frame_ms.is_finite() && reference_frame_ms > 0.0) {
                return Err(invalid("reference_frame_ms must be positive and finite"));
            }
        }
        Ok(())
    }

    /// Check that the road on a `width` x `height` surface fits the car and every obstacle
    pub fn validate_for_surface(&self, width: f32, height: f32) -> Result<(), TuningError> {
        self.validate()?;
        let road = self.road_width(width);
        let widest = self.log_max_width.max(self.pothole_width).max(self.player_width);
        if road < widest {
            return Err(invalid(format!(
                "road width {} on a {}px surface is narrower than {}",
                road, width, widest
            )));
        }
        if height < self.player_bottom_offset {
            return Err(invalid(format!(
                "surface height {} leaves no room for the car",
                height
            )));
        }
        // Car bottom edge = height - offset + player_height
        if self.player_bottom_offset < self.player_height {
            return Err(invalid(format!(
                "player_bottom_offset {} puts the {}px car below the surface",
                self.player_bottom_offset, self.player_height
            )));
        }
        Ok(())
    }

    /// Tuning from an optional JSON override, falling back to defaults when
    /// it is missing or unusable on a `width` x `height` surface
    pub fn load_or_default(json: Option<&str>, width: f32, height: f32) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        match Self::from_json(json).and_then(|t| t.validate_for_surface(width, height).map(|_| t)) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Drivable width between the margins
    #[inline]
    pub fn road_width(&self, surface_width: f32) -> f32 {
        surface_width - self.road_margin * 2.0
    }

    /// Smallest legal player x
    #[inline]
    pub fn left_limit(&self) -> f32 {
        self.road_margin
    }

    /// Largest legal player x
    #[inline]
    pub fn right_limit(&self, surface_width: f32) -> f32 {
        self.road_margin + self.road_width(surface_width) - self.player_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!(tuning.validate_for_surface(480.0, 640.0).is_ok());
    }

    #[test]
    fn limits_follow_margin_and_player_width() {
        let tuning = Tuning::default();
        assert_eq!(tuning.road_width(480.0), 320.0);
        assert_eq!(tuning.left_limit(), 80.0);
        assert_eq!(tuning.right_limit(480.0), 360.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_speed": 6.5 }"#).unwrap();
        assert_eq!(tuning.initial_speed, 6.5);
        assert_eq!(tuning.smoothing, 0.2);
        assert_eq!(tuning.motion, MotionMode::PerFrame);
    }

    #[test]
    fn time_scaled_motion_parses() {
        let tuning = Tuning::from_json(
            r#"{ "motion": { "kind": "time_scaled", "reference_frame_ms": 16.0 } }"#,
        )
        .unwrap();
        assert_eq!(
            tuning.motion,
            MotionMode::TimeScaled {
                reference_frame_ms: 16.0
            }
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Tuning::from_json(r#"{ "smoothing": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "log_min_width": 200, "log_max_width": 100 }"#).unwrap_err();
        assert!(err.to_string().contains("log width range"));
    }

    #[test]
    fn load_or_default_falls_back() {
        assert_eq!(Tuning::load_or_default(None, 480.0, 640.0), Tuning::default());
        assert_eq!(
            Tuning::load_or_default(Some("garbage"), 480.0, 640.0),
            Tuning::default()
        );
        // Valid JSON, but the road is too narrow for this surface
        assert_eq!(
            Tuning::load_or_default(Some(r#"{ "road_margin": 200 }"#), 480.0, 640.0),
            Tuning::default()
        );
        let custom = Tuning::load_or_default(Some(r#"{ "speed_increment": 0.5 }"#), 480.0, 640.0);
        assert_eq!(custom.speed_increment, 0.5);
    }

    #[test]
    fn on_screen_spawn_is_rejected() {
        let err = Tuning::from_json(r#"{ "spawn_y": 530 }"#).unwrap_err();
        assert!(err.to_string().contains("spawn_y"));
        // Tall enough to poke into view from just above the top edge
        assert!(Tuning::from_json(r#"{ "spawn_y": -20 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "spawn_y": -30 }"#).is_ok());

        let tuning = Tuning::load_or_default(
            Some(r#"{ "spawn_y": 530, "spawn_interval_ms": 1 }"#),
            480.0,
            640.0,
        );
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        // 1e39 overflows f32 to infinity
        let err = Tuning::from_json(r#"{ "initial_speed": 1e39 }"#).unwrap_err();
        assert!(err.to_string().contains("initial_speed"));
        assert!(Tuning::from_json(r#"{ "log_max_width": 1e39 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "spawn_y": -1e39 }"#).is_err());
        assert!(Tuning::from_json(r#"{ "spawn_interval_ms": 1e309 }"#).is_err());

        let tuning = Tuning {
            speed_increment: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn car_must_fit_above_bottom_edge() {
        let tuning = Tuning {
            player_bottom_offset: 50.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
        let err = tuning.validate_for_surface(480.0, 640.0).unwrap_err();
        assert!(err.to_string().contains("player_bottom_offset"));

        let flush = Tuning {
            player_bottom_offset: 70.0,
            ..Tuning::default()
        };
        assert!(flush.validate_for_surface(480.0, 640.0).is_ok());
    }

    #[test]
    fn narrow_surface_is_rejected() {
        let tuning = Tuning::default();
        // 300 - 160 = 140 wide road, fits a 130 log
        assert!(tuning.validate_for_surface(300.0, 640.0).is_ok());
        // 280 - 160 = 120, too narrow for the widest log
        assert!(tuning.validate_for_surface(280.0, 640.0).is_err());
    }
}
