//! CPU tessellation of solid draw commands into triangle lists.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::DrawCmd;

/// Segments used to approximate a circle.
pub(super) const CIRCLE_SEGMENTS: usize = 64;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct SolidVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl SolidVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Appends the triangles of `cmd` to `out`.
///
/// Sprite commands and degenerate geometry append nothing.
pub(super) fn tessellate(cmd: &DrawCmd, out: &mut Vec<SolidVertex>) {
    match cmd {
        DrawCmd::Rect(r) => {
            let rect = r.rect.normalized();
            if rect.is_empty() || !rect.is_finite() {
                return;
            }
            let (min, max) = (rect.min(), rect.max());
            quad(
                [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
                r.color,
                out,
            );
        }
        DrawCmd::Polygon(p) => {
            // Fan triangulation; correct for convex outlines.
            if p.points.len() < 3 {
                return;
            }
            let first = p.points[0];
            for pair in p.points[1..].windows(2) {
                triangle(first, pair[0], pair[1], p.color, out);
            }
        }
        DrawCmd::Circle(c) => {
            if c.radius.is_nan() || c.radius <= 0.0 || !c.center.is_finite() {
                return;
            }
            let point = |i: usize| {
                let angle = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                c.center + Vec2::new(angle.cos(), angle.sin()) * c.radius
            };
            for i in 0..CIRCLE_SEGMENTS {
                triangle(c.center, point(i), point(i + 1), c.color, out);
            }
        }
        DrawCmd::Line(l) => {
            if l.width.is_nan() || l.width <= 0.0 {
                return;
            }
            let Some(dir) = (l.b - l.a).normalized() else { return };
            let offset = dir.perp() * (l.width / 2.0);
            quad(
                [l.a - offset, l.b - offset, l.b + offset, l.a + offset],
                l.color,
                out,
            );
        }
        DrawCmd::Text(_) | DrawCmd::Image(_) => {}
    }
}

fn triangle(a: Vec2, b: Vec2, c: Vec2, color: Color, out: &mut Vec<SolidVertex>) {
    let color = color.to_array();
    out.extend([a, b, c].map(|p| SolidVertex { pos: [p.x, p.y], color }));
}

fn quad(corners: [Vec2; 4], color: Color, out: &mut Vec<SolidVertex>) {
    let [a, b, c, d] = corners;
    triangle(a, b, c, color, out);
    triangle(a, c, d, color, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::scene::DrawList;

    fn tessellate_all(list: &DrawList) -> Vec<SolidVertex> {
        let mut out = Vec::new();
        for cmd in list.iter() {
            tessellate(cmd, &mut out);
        }
        out
    }

    fn pos(v: &SolidVertex) -> Vec2 {
        Vec2::new(v.pos[0], v.pos[1])
    }

    #[test]
    fn rect_is_two_triangles_inside_bounds() {
        let mut list = DrawList::new();
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        list.push_rect(rect, Color::red());

        let verts = tessellate_all(&list);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| rect.contains(pos(v))));
        assert!(verts.iter().all(|v| v.color == Color::red().to_array()));
    }

    #[test]
    fn empty_rect_draws_nothing() {
        let mut list = DrawList::new();
        list.push_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::white());
        assert!(tessellate_all(&list).is_empty());
    }

    #[test]
    fn polygon_fan_vertex_count() {
        let mut list = DrawList::new();
        let pentagon = (0..5)
            .map(|i| {
                let a = TAU * i as f32 / 5.0;
                Vec2::new(a.cos(), a.sin())
            })
            .collect();
        list.push_polygon(pentagon, Color::white());
        list.push_polygon(vec![Vec2::zero(), Vec2::new(1.0, 1.0)], Color::white());

        assert_eq!(tessellate_all(&list).len(), 9);
    }

    #[test]
    fn circle_stays_within_radius() {
        let mut list = DrawList::new();
        let center = Vec2::new(100.0, 50.0);
        list.push_circle(center, 24.0, Color::white());

        let verts = tessellate_all(&list);
        assert_eq!(verts.len(), CIRCLE_SEGMENTS * 3);
        assert!(verts.iter().all(|v| (pos(v) - center).length() <= 24.0 + 1e-3));
    }

    #[test]
    fn line_is_offset_by_half_width() {
        let mut list = DrawList::new();
        list.push_line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 4.0, Color::white());

        let verts = tessellate_all(&list);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.pos[1].abs() == 2.0));
        assert!(verts.iter().all(|v| (0.0..=10.0).contains(&v.pos[0])));
    }

    #[test]
    fn degenerate_line_draws_nothing() {
        let mut list = DrawList::new();
        list.push_line(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 1.0, Color::white());
        list.push_line(Vec2::zero(), Vec2::new(1.0, 0.0), 0.0, Color::white());
        assert!(tessellate_all(&list).is_empty());
    }
}
