//! Window/canvas controller.
//!
//! A [`Canvas`] owns one window through a [`Backend`] and a backbuffer
//! draw list. Stimuli are adapted into the backbuffer by [`Canvas::show`];
//! [`Canvas::flip`] pumps window events, presents the backbuffer and starts
//! a fresh one. Everything runs on the caller's thread.

mod backend;
mod config;
mod controller;
mod error;
mod flags;
mod fps;
mod headless;
mod winit_backend;

pub use backend::{Backend, WindowSignal};
pub use config::{CanvasConfig, CanvasSize};
pub use controller::Canvas;
pub use error::CanvasError;
pub use flags::{KeyAction, RunFlags};
pub use fps::{FpsPolicy, check_feasible};
pub use headless::HeadlessBackend;
pub use winit_backend::WinitBackend;
