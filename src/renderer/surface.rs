//! Minimal drawing interface the scene code talks to
//!
//! Coordinates are surface pixels, colors are CSS color strings.

use glam::Vec2;

use crate::sim::Rect;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Text style for `Surface::fill_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle<'a> {
    /// CSS font shorthand
    pub font: &'a str,
    pub align: TextAlign,
    pub color: &'a str,
}

/// A 2D drawing target
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> Vec2;

    /// Erase everything
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// Rectangle with quadratic-curve corners of `radius`
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: &str);

    /// Straight line with a dash pattern (empty = solid)
    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: &[f32], color: &str);

    /// Independent line segments stroked as one path
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: &str);

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: &str);

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: &str);

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle<'_>);
}
