//! Reiz engine crate.
//!
//! Presentation layer for visual and auditory stimulation experiments:
//! stimulus descriptors in normalized coordinates (`visual`), a caller-driven
//! window with back/front buffers (`canvas`), and WAV clip libraries with
//! playback (`audio`). The remaining modules are the drawing and platform
//! plumbing underneath.

pub mod audio;
pub mod canvas;
pub mod visual;

pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod time;

pub use canvas::{Canvas, CanvasConfig, CanvasError, CanvasSize, FpsPolicy};
pub use paint::Color;
pub use visual::{Stimulus, Visual};
