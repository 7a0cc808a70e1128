use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::{Stimulus, trunc_px};

const ARM_LENGTH: f32 = 100.0;
const ARM_HALF_WIDTH: f32 = 15.0;

/// Fixation cross in the window center.
///
/// Unlike other stimuli the arms have an absolute pixel size (scaled by
/// `zoom`), independent of the window size.
#[derive(Debug, Clone, PartialEq)]
pub struct Cross {
    pub zoom: f32,
    pub color: Color,
}

impl Cross {
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

    /// Horizontal and vertical arm rectangles.
    pub fn arms(&self, viewport: Viewport) -> [Rect; 2] {
        let c = viewport.center();
        let len = trunc_px(self.zoom * ARM_LENGTH);
        let wid = trunc_px(self.zoom * ARM_HALF_WIDTH);

        let horizontal = Rect::from_corners(
            Vec2::new(c.x - len, c.y - wid),
            Vec2::new(c.x + len, c.y + wid),
        );
        let vertical = Rect::from_corners(
            Vec2::new(c.x - wid, c.y - len),
            Vec2::new(c.x + wid, c.y + len),
        );
        [horizontal, vertical]
    }
}

impl Default for Cross {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            color: Color::white(),
        }
    }
}

impl Stimulus for Cross {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        for arm in self.arms(viewport) {
            list.push_rect(arm, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_are_centered_with_absolute_size() {
        let [h, v] = Cross::new().arms(Viewport::new(640.0, 480.0));
        assert_eq!(h, Rect::new(220.0, 225.0, 200.0, 30.0));
        assert_eq!(v, Rect::new(305.0, 140.0, 30.0, 200.0));
    }

    #[test]
    fn zoom_truncates_to_whole_pixels() {
        let [h, _] = Cross::new().zoom(0.55).arms(Viewport::new(200.0, 200.0));
        // 55 px arms, 8 px half-thickness.
        assert_eq!(h, Rect::new(45.0, 92.0, 110.0, 16.0));
    }
}
