//! Coordinate and geometry types shared by stimuli and renderers.
//!
//! Canonical pixel space:
//! - Logical pixels (DPI-aware)
//! - Origin bottom-left
//! - +X right, +Y up
//!
//! Stimuli are described in normalized coordinates (conventionally `[-1, 1]`
//! on both axes, `(0, 0)` at the window center) and mapped into pixel space
//! through [`Viewport::to_pixels`] every time they are shown.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
