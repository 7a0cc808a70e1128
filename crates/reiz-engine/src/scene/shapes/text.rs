use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Text label payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Font family name, resolved by the renderer's `FontSystem`.
    pub family: String,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Center of the laid-out text block.
    pub center: Vec2,
}

impl DrawList {
    /// Records a text label centered on `center`.
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        family: impl Into<String>,
        size: f32,
        color: Color,
        center: Vec2,
    ) {
        self.push(DrawCmd::Text(TextCmd {
            text: text.into(),
            family: family.into(),
            size,
            color,
            center,
        }));
    }
}
