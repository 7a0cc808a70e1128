//! GPU rendering of a `scene::DrawList`.
//!
//! Conventions:
//! - CPU geometry is in logical pixels, origin bottom-left, +Y up.
//! - Vertex shaders map to NDC with a viewport uniform (`pos / viewport * 2 - 1`).
//! - Colors are premultiplied and written without conversion.
//!
//! Solid shapes are tessellated on the CPU (`mesh`), texts and images are
//! drawn as textured quads (`sprite`). `batch` splits a list into runs so
//! both kinds interleave in paint order inside a single pass.

mod batch;
mod common;
mod ctx;
mod mesh;
mod scene;
mod solid;
mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
