use super::Vec2;

/// Window size in logical pixels.
///
/// Also the basis of the normalized → pixel mapping:
/// `pixel = half * normalized + half`, with `half = floor(extent / 2)` per axis.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half extents, floored to whole pixels.
    #[inline]
    pub fn half_extent(self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Window center in pixel space.
    #[inline]
    pub fn center(self) -> Vec2 {
        self.half_extent()
    }

    /// Maps a normalized position to pixel space.
    ///
    /// No range check: values outside `[-1, 1]` land off-screen.
    #[inline]
    pub fn to_pixels(self, normalized: Vec2) -> Vec2 {
        let half = self.half_extent();
        Vec2::new(
            half.x * normalized.x + half.x,
            half.y * normalized.y + half.y,
        )
    }

    #[inline]
    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn center_maps_to_half_extent() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.to_pixels(Vec2::zero()), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn corners_map_to_window_edges() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.to_pixels(Vec2::new(-1.0, -1.0)), Vec2::zero());
        assert_eq!(vp.to_pixels(Vec2::new(1.0, 1.0)), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn odd_extent_floors_half() {
        let vp = Viewport::new(641.0, 481.0);
        assert_eq!(vp.half_extent(), Vec2::new(320.0, 240.0));
        assert_eq!(vp.to_pixels(Vec2::new(1.0, 1.0)), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn out_of_range_lands_off_screen() {
        let vp = Viewport::new(100.0, 100.0);
        let p = vp.to_pixels(Vec2::new(2.0, -3.0));
        assert_eq!(p, Vec2::new(150.0, -100.0));
    }

    proptest! {
        #[test]
        fn normalized_range_stays_inside_window(
            nx in -1.0f32..=1.0,
            ny in -1.0f32..=1.0,
            w in 1u32..8192,
            h in 1u32..8192,
        ) {
            let vp = Viewport::new(w as f32, h as f32);
            let p = vp.to_pixels(Vec2::new(nx, ny));
            prop_assert!(p.x >= 0.0 && p.x <= vp.width, "x = {} outside [0, {}]", p.x, vp.width);
            prop_assert!(p.y >= 0.0 && p.y <= vp.height, "y = {} outside [0, {}]", p.y, vp.height);
        }
    }
}
