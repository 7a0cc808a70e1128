//! Keyboard input.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Backends translate platform events into [`KeyEvent`]s; the canvas records
//! the events of each dispatch into an [`InputFrame`].

mod frame;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub use types::{Key, KeyEvent, KeyState, Modifiers};
