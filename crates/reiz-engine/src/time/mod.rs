//! Time subsystem.
//!
//! - `FrameClock`: per-canvas frame timing, ticked once per flip
//! - `FpsCounter`: rolling average of unclamped frame intervals, used to
//!   measure the refresh rate a display can sustain

mod fps;
mod frame_clock;

pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
