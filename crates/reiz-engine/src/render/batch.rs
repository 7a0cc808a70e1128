use std::ops::Range;

use crate::scene::DrawList;

use super::mesh::{SolidVertex, tessellate};

/// One step of the frame's draw sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Batch {
    /// Range into the frame's solid vertex buffer.
    Solid(Range<u32>),
    /// Index of a text/image command in the draw list.
    Sprite(usize),
}

/// Tessellates `list` into `vertices` and returns the draw sequence.
///
/// Consecutive solid commands merge into one batch; sprites split them so
/// the original paint order survives.
pub(super) fn plan(list: &DrawList, vertices: &mut Vec<SolidVertex>) -> Vec<Batch> {
    vertices.clear();
    let mut batches = Vec::new();

    for (index, cmd) in list.iter().enumerate() {
        if cmd.is_sprite() {
            batches.push(Batch::Sprite(index));
            continue;
        }

        let start = vertices.len() as u32;
        tessellate(cmd, vertices);
        let end = vertices.len() as u32;
        if start == end {
            continue;
        }

        match batches.last_mut() {
            Some(Batch::Solid(range)) if range.end == start => range.end = end,
            _ => batches.push(Batch::Solid(start..end)),
        }
    }

    batches
}
