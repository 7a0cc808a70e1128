use super::shapes::{CircleCmd, ImageCmd, LineCmd, PolygonCmd, RectCmd, TextCmd};

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
/// - teach `render::mesh` (solid fills) or `render::scene` (sprites) to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Polygon(PolygonCmd),
    Circle(CircleCmd),
    Line(LineCmd),
    Text(TextCmd),
    Image(ImageCmd),
}

impl DrawCmd {
    /// Returns `true` for commands drawn from a texture rather than solid geometry.
    #[inline]
    pub fn is_sprite(&self) -> bool {
        matches!(self, DrawCmd::Text(_) | DrawCmd::Image(_))
    }
}
