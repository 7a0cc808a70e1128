use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::{Stimulus, trunc_px};

/// Fraction of the window width per unit of `fontsize`.
const WIDTH_PER_FONTSIZE: f32 = 0.05;

/// Centered text label.
///
/// `fontsize` is relative: one unit is 5% of the window width.
#[derive(Debug, Clone, PartialEq)]
pub struct Mural {
    pub text: String,
    pub font: String,
    pub fontsize: f32,
    pub position: Vec2,
    pub color: Color,
}

impl Mural {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font = family.into();
        self
    }

    pub fn fontsize(mut self, fontsize: f32) -> Self {
        self.fontsize = fontsize;
        self
    }

    pub fn position(mut self, position: impl Into<Vec2>) -> Self {
        self.position = position.into();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Font size in pixels for a window of the given size.
    pub fn pixel_size(&self, viewport: Viewport) -> f32 {
        trunc_px(viewport.width * WIDTH_PER_FONTSIZE * self.fontsize)
    }
}

impl Default for Mural {
    fn default() -> Self {
        Self {
            text: "Hello World".to_string(),
            font: "Times New Roman".to_string(),
            fontsize: 1.0,
            position: Vec2::zero(),
            color: Color::white(),
        }
    }
}

impl Stimulus for Mural {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        list.push_text(
            self.text.clone(),
            self.font.clone(),
            self.pixel_size(viewport),
            self.color,
            viewport.to_pixels(self.position),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn size_scales_with_window_width() {
        let m = Mural::new("+").fontsize(2.0);
        assert_eq!(m.pixel_size(Viewport::new(800.0, 600.0)), 80.0);
        assert_eq!(m.pixel_size(Viewport::new(1010.0, 600.0)), 101.0);
    }

    #[test]
    fn text_is_centered_on_mapped_position() {
        let mut list = DrawList::new();
        Mural::new("Ready").position((0.5, -0.5)).adapt(Viewport::new(800.0, 600.0), &mut list);

        let DrawCmd::Text(cmd) = &list.items()[0] else { panic!("expected text") };
        assert_eq!(cmd.text, "Ready");
        assert_eq!(cmd.family, "Times New Roman");
        assert_eq!(cmd.center, Vec2::new(600.0, 150.0));
        assert_eq!(cmd.size, 40.0);
    }
}
