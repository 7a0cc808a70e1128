use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Filled polygon payload.
///
/// Vertices are filled as a triangle fan from the first vertex, so the outline
/// is expected to be convex. Fewer than three vertices draw nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCmd {
    pub points: Vec<Vec2>,
    pub color: Color,
}

impl DrawList {
    /// Records a filled polygon.
    #[inline]
    pub fn push_polygon(&mut self, points: Vec<Vec2>, color: Color) {
        self.push(DrawCmd::Polygon(PolygonCmd { points, color }));
    }
}
