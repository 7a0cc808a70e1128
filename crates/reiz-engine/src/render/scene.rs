use crate::scene::DrawList;
use crate::text::FontSystem;

use super::batch::{Batch, plan};
use super::mesh::SolidVertex;
use super::solid::SolidRenderer;
use super::sprite::SpriteRenderer;
use super::{RenderCtx, RenderTarget};

/// Renders a whole draw list into one pass over a black-cleared target.
#[derive(Default)]
pub struct SceneRenderer {
    solid: SolidRenderer,
    sprite: SpriteRenderer,
    vertices: Vec<SolidVertex>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        fonts: &mut FontSystem,
    ) {
        let batches = plan(list, &mut self.vertices);
        self.solid.prepare(ctx, &self.vertices);
        self.sprite.prepare(ctx, list, &batches, fonts);

        // The pass runs even for an empty list so the frame clears to black.
        let mut rpass = target.begin_pass("reiz scene pass");

        for batch in &batches {
            match batch {
                Batch::Solid(range) => self.solid.draw(&mut rpass, range.clone()),
                Batch::Sprite(index) => self.sprite.draw(&mut rpass, *index),
            }
        }
    }
}
