//! Stimulus descriptors.
//!
//! Every stimulus is declared in normalized coordinates and adapted to the
//! window's current pixel size each time it is shown. Adaptation is pure: it
//! records fresh draw commands and leaves the descriptor untouched, so a
//! resized window never sees stale geometry.

mod background;
mod circle;
mod cross;
mod image;
mod line;
mod mural;
mod polygon;

pub use background::Background;
pub use circle::Circle;
pub use cross::Cross;
pub use image::{Image, VisualError};
pub use line::Line;
pub use mural::Mural;
pub use polygon::Polygon;

use crate::coords::Viewport;
use crate::scene::DrawList;

/// Anything that can be adapted to a viewport and drawn into a frame.
///
/// Implemented by every descriptor, by [`Visual`], and by collections of
/// stimuli so a whole sequence can be handed to `Canvas::show` at once.
pub trait Stimulus {
    /// Records this stimulus into `list`, resolved against `viewport`.
    fn adapt(&self, viewport: Viewport, list: &mut DrawList);
}

/// Tagged union over all stimulus kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Background(Background),
    Mural(Mural),
    Line(Line),
    Polygon(Polygon),
    Circle(Circle),
    Cross(Cross),
    Image(Image),
}

impl Stimulus for Visual {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        match self {
            Visual::Background(v) => v.adapt(viewport, list),
            Visual::Mural(v) => v.adapt(viewport, list),
            Visual::Line(v) => v.adapt(viewport, list),
            Visual::Polygon(v) => v.adapt(viewport, list),
            Visual::Circle(v) => v.adapt(viewport, list),
            Visual::Cross(v) => v.adapt(viewport, list),
            Visual::Image(v) => v.adapt(viewport, list),
        }
    }
}

macro_rules! impl_from_descriptor {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Visual {
                #[inline]
                fn from(v: $ty) -> Self {
                    Visual::$ty(v)
                }
            }
        )*
    };
}

impl_from_descriptor!(Background, Mural, Line, Polygon, Circle, Cross, Image);

impl<S: Stimulus + ?Sized> Stimulus for &S {
    #[inline]
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        (**self).adapt(viewport, list);
    }
}

/// `None` entries draw nothing.
impl<S: Stimulus> Stimulus for Option<S> {
    #[inline]
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        if let Some(s) = self {
            s.adapt(viewport, list);
        }
    }
}

impl<S: Stimulus> Stimulus for [S] {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        for s in self {
            s.adapt(viewport, list);
        }
    }
}

impl<S: Stimulus, const N: usize> Stimulus for [S; N] {
    #[inline]
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        self.as_slice().adapt(viewport, list);
    }
}

impl<S: Stimulus> Stimulus for Vec<S> {
    #[inline]
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        self.as_slice().adapt(viewport, list);
    }
}

/// Truncates toward zero like an integer cast, keeping the value as `f32`.
#[inline]
pub(crate) fn trunc_px(v: f32) -> f32 {
    v.trunc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::DrawCmd;

    #[test]
    fn sequences_keep_order_and_skip_none() {
        let seq: Vec<Option<Visual>> = vec![
            Some(Background::new(Color::black()).into()),
            None,
            Some(Cross::new().into()),
        ];

        let mut list = DrawList::new();
        seq.adapt(Viewport::new(640.0, 480.0), &mut list);

        // Background = 1 rect, cross = 2 rects.
        assert_eq!(list.len(), 3);
        let DrawCmd::Rect(bg) = &list.items()[0] else { panic!("expected background rect") };
        assert_eq!(bg.color, Color::black());
    }

    #[test]
    fn readapting_after_resize_uses_new_size() {
        let circle = Circle::new();
        let mut small = DrawList::new();
        let mut large = DrawList::new();
        circle.adapt(Viewport::new(200.0, 100.0), &mut small);
        circle.adapt(Viewport::new(2000.0, 1000.0), &mut large);

        let (DrawCmd::Circle(a), DrawCmd::Circle(b)) = (&small.items()[0], &large.items()[0]) else {
            panic!("expected circles");
        };
        assert_eq!(a.center.x * 10.0, b.center.x);
        assert!(b.radius > a.radius);
    }
}
