use crate::coords::{Rect, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::Stimulus;

/// Solid fill covering the whole window.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub color: Color,
}

impl Background {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new(Color::white())
    }
}

impl Stimulus for Background {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        list.push_rect(Rect::new(0.0, 0.0, viewport.width, viewport.height), self.color);
    }
}
