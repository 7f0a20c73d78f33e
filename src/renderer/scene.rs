//! Scene drawing: road, obstacles, car, HUD and the game-over overlay

use glam::Vec2;

use super::surface::{Surface, TextAlign, TextStyle};
use crate::sim::{GameState, Obstacle, ObstacleKind, Rect};

// Palette
const BACKGROUND: &str = "#020617";
const ROAD: &str = "#111827";
const ROAD_EDGE: &str = "#e5e7eb";
const CENTER_LINE: &str = "#9ca3af";
const LOG_FILL: &str = "#b45309";
const LOG_RINGS: &str = "rgba(30, 64, 175, 0.4)";
const POTHOLE_FILL: &str = "#020617";
const POTHOLE_RIM: &str = "#4b5563";
const CAR: &str = "#38bdf8";
const CAR_HOOD: &str = "#0f172a";
const HUD_TEXT: &str = "#e5e7eb";
const OVERLAY: &str = "rgba(15, 23, 42, 0.8)";
const OVERLAY_TEXT: &str = "#f9fafb";

const EDGE_WIDTH: f32 = 4.0;
const CENTER_DASH: [f32; 2] = [20.0, 15.0];
const LOG_CORNER_RADIUS: f32 = 10.0;

const HUD_FONT: &str = "16px system-ui, -apple-system, sans-serif";
const TITLE_FONT: &str = "bold 32px system-ui, -apple-system, sans-serif";
const BODY_FONT: &str = "18px system-ui, -apple-system, sans-serif";

/// Draw one complete frame for `state`
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    draw_scene(surface, state);
    if !state.is_running() {
        draw_game_over(surface, state);
    }
}

/// Road, obstacles, car and HUD
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let size = surface.size();
    let margin = state.tuning.road_margin;
    let road_width = state.tuning.road_width(size.x);

    surface.clear();
    surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), BACKGROUND);
    surface.fill_rect(Rect::new(margin, 0.0, road_width, size.y), ROAD);

    // Side lines sit just outside the drivable area
    surface.fill_rect(Rect::new(margin - EDGE_WIDTH, 0.0, EDGE_WIDTH, size.y), ROAD_EDGE);
    surface.fill_rect(Rect::new(margin + road_width, 0.0, EDGE_WIDTH, size.y), ROAD_EDGE);

    surface.stroke_dashed_line(
        Vec2::new(size.x / 2.0, 0.0),
        Vec2::new(size.x / 2.0, size.y),
        4.0,
        &CENTER_DASH,
        CENTER_LINE,
    );

    for obstacle in state.obstacles() {
        match obstacle.kind {
            ObstacleKind::Log => draw_log(surface, obstacle),
            ObstacleKind::Pothole => draw_pothole(surface, obstacle),
        }
    }

    draw_car(surface, state.player_rect());
    draw_hud(surface, state);
}

fn draw_log<S: Surface + ?Sized>(surface: &mut S, trunk: &Obstacle) {
    let r = trunk.rect();
    surface.fill_rounded_rect(r, LOG_CORNER_RADIUS, LOG_FILL);

    // Two darker rings across the trunk
    let x1 = r.left() + r.size.x * 0.3;
    let x2 = r.left() + r.size.x * 0.6;
    surface.stroke_segments(
        &[
            (Vec2::new(x1, r.top() + 4.0), Vec2::new(x1, r.bottom() - 4.0)),
            (Vec2::new(x2, r.top() + 6.0), Vec2::new(x2, r.bottom() - 6.0)),
        ],
        2.0,
        LOG_RINGS,
    );
}

fn draw_pothole<S: Surface + ?Sized>(surface: &mut S, pothole: &Obstacle) {
    let r = pothole.rect();
    let center = r.center();
    let radii = r.size * 0.5;
    surface.fill_ellipse(center, radii, POTHOLE_FILL);
    surface.stroke_ellipse(center, radii * Vec2::new(0.9, 0.8), 2.0, POTHOLE_RIM);
}

fn draw_car<S: Surface + ?Sized>(surface: &mut S, car: Rect) {
    surface.fill_rect(car, CAR);
    // Hood stripe
    surface.fill_rect(
        Rect::new(car.left() + 6.0, car.top() + 10.0, car.size.x - 12.0, 6.0),
        CAR_HOOD,
    );
}

fn draw_hud<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let style = TextStyle {
        font: HUD_FONT,
        align: TextAlign::Left,
        color: HUD_TEXT,
    };
    surface.fill_text(&format!("Score: {}", state.score()), Vec2::new(16.0, 28.0), style);
    surface.fill_text(&format!("Speed: {:.1}", state.speed()), Vec2::new(16.0, 50.0), style);
}

/// Translucent overlay with the end message and final score
pub fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let size = surface.size();
    let center = size / 2.0;

    surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), OVERLAY);

    let title = TextStyle {
        font: TITLE_FONT,
        align: TextAlign::Center,
        color: OVERLAY_TEXT,
    };
    let body = TextStyle { font: BODY_FONT, ..title };

    surface.fill_text("Game Over", Vec2::new(center.x, center.y - 20.0), title);
    surface.fill_text(
        state.end_message().unwrap_or_default(),
        Vec2::new(center.x, center.y + 15.0),
        body,
    );
    surface.fill_text(
        &format!("Final Score: {}", state.score()),
        Vec2::new(center.x, center.y + 45.0),
        body,
    );
    surface.fill_text(
        "Refresh the page to play again.",
        Vec2::new(center.x, center.y + 70.0),
        body,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    /// Records draw calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Rect, String)>,
        rounded: Vec<Rect>,
        ellipses: Vec<(Vec2, Vec2)>,
        texts: Vec<(String, TextAlign)>,
        dashes: Vec<Vec<f32>>,
        clears: usize,
    }

    impl Surface for Recorder {
        fn size(&self) -> Vec2 {
            Vec2::new(480.0, 640.0)
        }

        fn clear(&mut self) {
            self.clears += 1;
        }

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.rects.push((rect, color.to_string()));
        }

        fn fill_rounded_rect(&mut self, rect: Rect, _radius: f32, _color: &str) {
            self.rounded.push(rect);
        }

        fn stroke_dashed_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, dash: &[f32], _color: &str) {
            self.dashes.push(dash.to_vec());
        }

        fn stroke_segments(&mut self, _segments: &[(Vec2, Vec2)], _width: f32, _color: &str) {}

        fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, _color: &str) {
            self.ellipses.push((center, radii));
        }

        fn stroke_ellipse(&mut self, _center: Vec2, _radii: Vec2, _width: f32, _color: &str) {}

        fn fill_text(&mut self, text: &str, _pos: Vec2, style: TextStyle<'_>) {
            self.texts.push((text.to_string(), style.align));
        }
    }

    fn state() -> GameState {
        GameState::new(Tuning::default(), 480.0, 640.0, 3)
    }

    fn has_text(rec: &Recorder, text: &str) -> bool {
        rec.texts.iter().any(|(t, _)| t == text)
    }

    #[test]
    fn test_running_frame_has_road_car_and_hud() {
        let mut rec = Recorder::default();
        draw_frame(&mut rec, &state());

        assert_eq!(rec.clears, 1);
        assert!(rec.rects.iter().any(|(r, c)| c == ROAD && *r == Rect::new(80.0, 0.0, 320.0, 640.0)));
        assert!(rec.rects.iter().any(|(r, c)| c == CAR && *r == Rect::new(220.0, 530.0, 40.0, 70.0)));
        assert_eq!(rec.dashes, vec![vec![20.0, 15.0]]);
        assert!(has_text(&rec, "Score: 0"));
        assert!(has_text(&rec, "Speed: 4.0"));
        assert!(!has_text(&rec, "Game Over"));
    }

    #[test]
    fn test_obstacles_drawn_by_kind() {
        let mut s = state();
        s.obstacles.insert(ObstacleKind::Log, Rect::new(100.0, 50.0, 90.0, 24.0));
        s.obstacles.insert(ObstacleKind::Pothole, Rect::new(250.0, 80.0, 50.0, 30.0));

        let mut rec = Recorder::default();
        draw_frame(&mut rec, &s);

        assert_eq!(rec.rounded, vec![Rect::new(100.0, 50.0, 90.0, 24.0)]);
        assert_eq!(rec.ellipses, vec![(Vec2::new(275.0, 95.0), Vec2::new(25.0, 15.0))]);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut s = state();
        s.pointer_left();

        let mut rec = Recorder::default();
        draw_frame(&mut rec, &s);

        assert!(rec.rects.iter().any(|(_, c)| c == OVERLAY));
        assert!(has_text(&rec, "Game Over"));
        assert!(has_text(&rec, "You left the road!"));
        assert!(has_text(&rec, "Final Score: 0"));
        assert!(has_text(&rec, "Refresh the page to play again."));
        assert!(
            rec.texts
                .iter()
                .filter(|(t, _)| t.starts_with("Final"))
                .all(|(_, a)| *a == TextAlign::Center)
        );
    }
}
