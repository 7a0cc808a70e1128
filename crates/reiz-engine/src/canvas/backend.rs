use crate::coords::Viewport;
use crate::input::KeyEvent;
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::CanvasConfig;

/// Window-level occurrence reported by [`Backend::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSignal {
    Key(KeyEvent),
    CloseRequested,
    Resized(Viewport),
}

/// Platform window the canvas drives.
///
/// All methods are called from the thread that owns the canvas. A backend
/// holds at most one window at a time.
pub trait Backend {
    /// Creates the window, initially hidden, replacing any previous one.
    fn create_window(&mut self, config: &CanvasConfig) -> anyhow::Result<()>;

    fn destroy_window(&mut self);

    fn has_window(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn set_fullscreen(&mut self, fullscreen: bool);

    fn is_fullscreen(&self) -> bool;

    /// Current drawable size in logical pixels; zero without a window.
    fn viewport(&self) -> Viewport;

    /// Processes pending window events without blocking.
    fn dispatch(&mut self, signals: &mut Vec<WindowSignal>) -> anyhow::Result<()>;

    /// Draws `list` over a black frame and presents it.
    fn present(&mut self, list: &DrawList, fonts: &mut FontSystem) -> anyhow::Result<()>;
}
