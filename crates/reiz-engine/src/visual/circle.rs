use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::{Stimulus, trunc_px};

/// Diameter per unit zoom, as a fraction of the shorter window side.
const DIAMETER_PER_ZOOM: f32 = 0.1;

/// Filled circle sized relative to the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub zoom: f32,
    pub color: Color,
    pub position: Vec2,
    pub opacity: f32,
}

impl Circle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn position(mut self, position: impl Into<Vec2>) -> Self {
        self.position = position.into();
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Diameter in pixels for a window of the given size.
    pub fn diameter(&self, viewport: Viewport) -> f32 {
        trunc_px(DIAMETER_PER_ZOOM * viewport.min_side() * self.zoom)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            color: Color::red(),
            position: Vec2::zero(),
            opacity: 1.0,
        }
    }
}

impl Stimulus for Circle {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        list.push_circle(
            viewport.to_pixels(self.position),
            self.diameter(viewport) * 0.5,
            self.color.with_opacity(self.opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn diameter_follows_shorter_side() {
        let c = Circle::new().zoom(2.0);
        assert_eq!(c.diameter(Viewport::new(640.0, 480.0)), 96.0);
        assert_eq!(c.diameter(Viewport::new(300.0, 900.0)), 60.0);
    }

    #[test]
    fn opacity_applies_to_color() {
        let mut list = DrawList::new();
        Circle::new()
            .opacity(0.25)
            .position((1.0, 1.0))
            .adapt(Viewport::new(100.0, 100.0), &mut list);

        let DrawCmd::Circle(cmd) = &list.items()[0] else { panic!("expected circle") };
        assert_eq!(cmd.center, Vec2::new(100.0, 100.0));
        assert_eq!(cmd.radius, 5.0);
        assert_eq!(cmd.color.a, 0.25);
    }
}
