use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Straight stroke between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub a: Vec2,
    pub b: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a line segment.
    #[inline]
    pub fn push_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.push(DrawCmd::Line(LineCmd { a, b, width, color }));
    }
}
