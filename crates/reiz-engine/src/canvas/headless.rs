use std::collections::VecDeque;
use std::time::Duration;

use crate::coords::Viewport;
use crate::input::{Key, KeyEvent};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::{Backend, CanvasConfig, CanvasSize, WindowSignal};

#[derive(Debug, Clone)]
struct HeadlessWindow {
    windowed: Viewport,
    visible: bool,
    fullscreen: bool,
}

/// In-memory window.
///
/// Presenting copies the draw list into a frontbuffer that can be inspected.
/// Key presses, close requests and resizes are injected and delivered on the
/// next dispatch. An optional frame interval makes every present sleep, which
/// stands in for vsync when measuring frame rates.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    window: Option<HeadlessWindow>,
    monitor: Viewport,
    frame_interval: Option<Duration>,
    pending: VecDeque<WindowSignal>,
    front: DrawList,
    presents: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            window: None,
            monitor: Viewport::new(1920.0, 1080.0),
            frame_interval: None,
            pending: VecDeque::new(),
            front: DrawList::new(),
            presents: 0,
        }
    }

    /// Monitor size used for `CanvasSize::Full` and fullscreen.
    pub fn with_monitor(mut self, width: u32, height: u32) -> Self {
        self.monitor = Viewport::new(width as f32, height as f32);
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn inject(&mut self, signal: WindowSignal) {
        self.pending.push_back(signal);
    }

    pub fn press(&mut self, key: Key) {
        self.inject(WindowSignal::Key(KeyEvent::pressed(key)));
    }

    pub fn request_close(&mut self) {
        self.inject(WindowSignal::CloseRequested);
    }

    /// Resizes the window as a user drag would; reported on the next dispatch.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width as f32, height as f32);
        if let Some(window) = self.window.as_mut() {
            window.windowed = viewport;
            window.fullscreen = false;
            self.pending.push_back(WindowSignal::Resized(viewport));
        }
    }

    /// Last presented draw list.
    pub fn front_buffer(&self) -> &DrawList {
        &self.front
    }

    /// An empty frontbuffer is a plain black frame.
    pub fn is_front_black(&self) -> bool {
        self.front.is_empty()
    }

    pub fn present_count(&self) -> u64 {
        self.presents
    }

    pub fn is_visible(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.visible)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn create_window(&mut self, config: &CanvasConfig) -> anyhow::Result<()> {
        let windowed = match config.size {
            CanvasSize::Windowed { width, height } => Viewport::new(width as f32, height as f32),
            CanvasSize::Full => self.monitor,
        };
        anyhow::ensure!(windowed.is_valid(), "window has zero size");

        self.window = Some(HeadlessWindow {
            windowed,
            visible: false,
            fullscreen: false,
        });
        self.pending.clear();
        self.front.clear();
        Ok(())
    }

    fn destroy_window(&mut self) {
        self.window = None;
        self.pending.clear();
    }

    fn has_window(&self) -> bool {
        self.window.is_some()
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(window) = self.window.as_mut() {
            window.visible = visible;
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if let Some(window) = self.window.as_mut() {
            window.fullscreen = fullscreen;
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.fullscreen)
    }

    fn viewport(&self) -> Viewport {
        match &self.window {
            Some(w) if w.fullscreen => self.monitor,
            Some(w) => w.windowed,
            None => Viewport::default(),
        }
    }

    fn dispatch(&mut self, signals: &mut Vec<WindowSignal>) -> anyhow::Result<()> {
        if self.window.is_some() {
            signals.extend(self.pending.drain(..));
        }
        Ok(())
    }

    fn present(&mut self, list: &DrawList, _fonts: &mut FontSystem) -> anyhow::Result<()> {
        anyhow::ensure!(self.window.is_some(), "present without a window");
        self.front.clone_from(list);
        self.presents += 1;
        if let Some(interval) = self.frame_interval {
            std::thread::sleep(interval);
        }
        Ok(())
    }
}
