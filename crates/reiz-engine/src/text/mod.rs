//! Font loading and label rasterization (fontdue).

mod font_system;

pub use font_system::{FontLoadError, FontSystem, LabelBitmap};
