use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::Stimulus;

/// Line segment between two normalized points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub a: Vec2,
    pub b: Vec2,
    pub color: Color,
    /// Stroke width in pixels.
    pub linewidth: f32,
}

impl Line {
    pub fn new(a: impl Into<Vec2>, b: impl Into<Vec2>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn linewidth(mut self, linewidth: f32) -> Self {
        self.linewidth = linewidth;
        self
    }
}

impl Default for Line {
    fn default() -> Self {
        Self {
            a: Vec2::zero(),
            b: Vec2::zero(),
            color: Color::white(),
            linewidth: 1.0,
        }
    }
}

impl Stimulus for Line {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        list.push_line(
            viewport.to_pixels(self.a),
            viewport.to_pixels(self.b),
            self.linewidth,
            self.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn maps_both_endpoints() {
        let mut list = DrawList::new();
        Line::new((-1.0, 0.0), (1.0, 0.0))
            .linewidth(3.0)
            .adapt(Viewport::new(100.0, 50.0), &mut list);

        let DrawCmd::Line(cmd) = &list.items()[0] else { panic!("expected line") };
        assert_eq!(cmd.a, Vec2::new(0.0, 25.0));
        assert_eq!(cmd.b, Vec2::new(100.0, 25.0));
        assert_eq!(cmd.width, 3.0);
    }
}
