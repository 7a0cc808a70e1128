use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::scene::DrawList;

use super::Stimulus;

/// Filled convex polygon with normalized vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub positions: Vec<Vec2>,
    pub color: Color,
}

impl Polygon {
    pub fn new<I, P>(positions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        Self {
            positions: positions.into_iter().map(Into::into).collect(),
            color: Color::white(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Stimulus for Polygon {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        let points = self
            .positions
            .iter()
            .map(|p| viewport.to_pixels(*p))
            .collect();
        list.push_polygon(points, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn maps_every_vertex() {
        let mut list = DrawList::new();
        Polygon::new([(-1.0, -1.0), (1.0, -1.0), (0.0, 1.0)])
            .adapt(Viewport::new(200.0, 100.0), &mut list);

        let DrawCmd::Polygon(cmd) = &list.items()[0] else { panic!("expected polygon") };
        assert_eq!(
            cmd.points,
            vec![Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0), Vec2::new(100.0, 100.0)]
        );
    }
}
