//! Color model shared between stimuli and renderers.
//!
//! Colors are stored premultiplied. Named colors and hex strings resolve
//! through [`Color::named`].

mod color;
mod named;

pub use color::{Color, ColorError};
