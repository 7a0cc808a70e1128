use std::path::Path;

use crate::coords::Viewport;
use crate::input::InputFrame;
use crate::scene::DrawList;
use crate::text::FontSystem;
use crate::time::{FpsCounter, FrameClock, FrameTime};
use crate::visual::Stimulus;

use super::{
    Backend, CanvasConfig, CanvasError, FpsPolicy, KeyAction, RunFlags, WindowSignal,
    WinitBackend, check_feasible,
};

/// Frames presented by [`Canvas::get_fps`].
const FPS_PROBE_FRAMES: usize = 100;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CanvasState {
    Hidden,
    Visible,
    Closed,
}

/// A single stimulus window with a back/front buffer pair.
///
/// The window is created hidden; call [`open`](Self::open) to show it.
/// After [`close`](Self::close) (or Escape, or the user closing the window)
/// every frame operation returns [`CanvasError::Closed`] until the canvas is
/// opened again.
pub struct Canvas<B: Backend = WinitBackend> {
    config: CanvasConfig,
    backend: B,
    fonts: FontSystem,

    backbuffer: DrawList,
    state: CanvasState,
    flags: RunFlags,

    clock: FrameClock,
    input: InputFrame,
    frame_time: Option<FrameTime>,
    signals: Vec<WindowSignal>,
}

impl Canvas<WinitBackend> {
    /// Creates a hidden winit window.
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        let backend = WinitBackend::new()?;
        Self::with_backend(config, backend)
    }
}

impl<B: Backend> Canvas<B> {
    /// Creates a hidden window on `backend`.
    pub fn with_backend(config: CanvasConfig, mut backend: B) -> Result<Self, CanvasError> {
        backend.create_window(&config)?;
        let mut canvas = Self {
            config,
            backend,
            fonts: FontSystem::new(),
            backbuffer: DrawList::new(),
            state: CanvasState::Hidden,
            flags: RunFlags::default(),
            clock: FrameClock::new(),
            input: InputFrame::default(),
            frame_time: None,
            signals: Vec::new(),
        };
        canvas.dispatch()?;
        Ok(canvas)
    }

    /// Shows the window, recreating it if it was closed, and clears it to black.
    pub fn open(&mut self) -> Result<(), CanvasError> {
        if self.state == CanvasState::Closed || !self.backend.has_window() {
            log::debug!("recreating canvas window");
            self.backend.create_window(&self.config)?;
            self.clock.reset();
        }
        self.backend.set_visible(true);
        self.state = CanvasState::Visible;
        self.dispatch()?;
        self.clear()
    }

    /// Destroys the window.
    pub fn close(&mut self) -> Result<(), CanvasError> {
        self.ensure_open()?;
        self.shut_down();
        Ok(())
    }

    /// Presents two empty frames, leaving both buffers black.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        self.flip()?;
        self.flip()
    }

    /// Adapts `stimulus` into the backbuffer and flips.
    ///
    /// Accepts single descriptors, [`Visual`](crate::visual::Visual)s and
    /// sequences of them (`None` entries are skipped).
    pub fn show<S: Stimulus + ?Sized>(&mut self, stimulus: &S) -> Result<(), CanvasError> {
        self.ensure_open()?;
        stimulus.adapt(self.viewport(), &mut self.backbuffer);
        self.flip()
    }

    /// Dispatches window events, presents the backbuffer and clears the new one.
    ///
    /// Returns [`CanvasError::Closed`] if the window is closed, including when
    /// this very dispatch closed it.
    pub fn flip(&mut self) -> Result<(), CanvasError> {
        self.ensure_open()?;
        self.dispatch()?;
        self.ensure_open()?;

        self.backend.present(&self.backbuffer, &mut self.fonts)?;
        self.backbuffer.clear();
        self.frame_time = Some(self.clock.tick());
        Ok(())
    }

    pub fn set_fullscreen(&mut self) -> Result<(), CanvasError> {
        self.ensure_open()?;
        self.backend.set_fullscreen(true);
        self.flip()
    }

    pub fn set_windowed(&mut self) -> Result<(), CanvasError> {
        self.ensure_open()?;
        self.backend.set_fullscreen(false);
        self.flip()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.backend.is_fullscreen()
    }

    /// Measures the display rate by presenting frames back to back.
    ///
    /// Blocks for [`FPS_PROBE_FRAMES`] frame intervals. The backbuffer is
    /// presented unchanged, so pending draws are shown but not consumed.
    pub fn get_fps(&mut self) -> Result<f64, CanvasError> {
        self.ensure_open()?;

        let mut counter = FpsCounter::new();
        counter.tick();
        for _ in 0..FPS_PROBE_FRAMES {
            self.backend.present(&self.backbuffer, &mut self.fonts)?;
            counter.tick();
        }

        let fps = counter.fps();
        log::debug!("measured {fps:.2} fps over {} frames", counter.samples());
        Ok(fps)
    }

    /// Checks `fps` against a fresh [`get_fps`](Self::get_fps) measurement.
    pub fn is_fps_feasible(&mut self, fps: f64, policy: FpsPolicy) -> Result<bool, CanvasError> {
        let measured = self.get_fps()?;
        check_feasible(fps, measured, policy)
    }

    /// Registers a font family for text stimuli.
    pub fn register_font(&mut self, family: &str, bytes: &[u8]) -> Result<(), CanvasError> {
        self.fonts.load_font(family, bytes)?;
        Ok(())
    }

    pub fn register_font_file(&mut self, family: &str, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        self.fonts.load_font_file(family, path)?;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.backend.viewport()
    }

    pub fn width(&self) -> u32 {
        self.viewport().width as u32
    }

    pub fn height(&self) -> u32 {
        self.viewport().height as u32
    }

    /// Square root of the pixel area.
    pub fn diag(&self) -> f64 {
        (f64::from(self.width()) * f64::from(self.height())).sqrt()
    }

    /// Window position with negative components clamped to 0.
    pub fn origin(&self) -> (u32, u32) {
        self.config.clamped_origin()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.state == CanvasState::Visible
    }

    pub fn is_closed(&self) -> bool {
        self.state == CanvasState::Closed
    }

    pub fn paused(&self) -> bool {
        self.flags.paused
    }

    pub fn start_run(&self) -> bool {
        self.flags.start_run
    }

    pub fn flags(&self) -> RunFlags {
        self.flags
    }

    /// Key events received during the most recent dispatch.
    pub fn last_input(&self) -> &InputFrame {
        &self.input
    }

    /// Clock snapshot of the most recent flip.
    pub fn frame_time(&self) -> Option<FrameTime> {
        self.frame_time
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn ensure_open(&self) -> Result<(), CanvasError> {
        if self.state == CanvasState::Closed {
            return Err(CanvasError::Closed);
        }
        Ok(())
    }

    fn dispatch(&mut self) -> Result<(), CanvasError> {
        self.input.clear();
        self.signals.clear();
        self.backend.dispatch(&mut self.signals)?;

        let mut close = false;
        for signal in self.signals.drain(..) {
            match signal {
                WindowSignal::Key(ev) => {
                    self.input.push_event(ev);
                    if self.flags.handle_key(&ev) == KeyAction::Close {
                        close = true;
                    }
                }
                WindowSignal::CloseRequested => close = true,
                WindowSignal::Resized(vp) => {
                    log::debug!("canvas resized to {}x{}", vp.width, vp.height);
                }
            }
        }

        if close {
            log::info!("canvas window closed by user");
            self.shut_down();
        }
        Ok(())
    }

    fn shut_down(&mut self) {
        self.backend.destroy_window();
        self.backbuffer.clear();
        self.state = CanvasState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::canvas::{CanvasSize, HeadlessBackend};
    use crate::input::Key;
    use crate::paint::Color;
    use crate::scene::DrawCmd;
    use crate::visual::{Background, Circle, Cross, Visual};

    fn canvas() -> Canvas<HeadlessBackend> {
        Canvas::with_backend(CanvasConfig::windowed(640, 480), HeadlessBackend::new())
            .expect("headless canvas")
    }

    #[test]
    fn starts_hidden() {
        let canvas = canvas();
        assert!(!canvas.is_open());
        assert!(!canvas.backend().is_visible());
        assert_eq!((canvas.width(), canvas.height()), (640, 480));
    }

    #[test]
    fn open_shows_black_frame() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        assert!(canvas.is_open());
        assert!(canvas.backend().is_visible());
        assert!(canvas.backend().is_front_black());
        assert_eq!(canvas.backend().present_count(), 2);
    }

    #[test]
    fn show_presents_adapted_stimulus() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.show(&Background::new(Color::white())).unwrap();

        let front = canvas.backend().front_buffer();
        assert_eq!(front.len(), 1);
        assert!(matches!(&front.items()[0], DrawCmd::Rect(r) if r.rect.size.x == 640.0));
    }

    #[test]
    fn show_sequence_skips_none() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        let sequence: Vec<Option<Visual>> = vec![
            Some(Cross::new().into()),
            None,
            Some(Circle::new().into()),
        ];
        canvas.show(&sequence).unwrap();

        // Cross adapts to two rects, circle to one.
        assert_eq!(canvas.backend().front_buffer().len(), 3);
    }

    #[test]
    fn clear_leaves_black_frontbuffer() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.show(&Cross::new()).unwrap();
        assert!(!canvas.backend().is_front_black());

        let before = canvas.backend().present_count();
        canvas.clear().unwrap();
        assert_eq!(canvas.backend().present_count(), before + 2);
        assert!(canvas.backend().is_front_black());
    }

    #[test]
    fn flip_after_close_fails() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.close().unwrap();

        assert!(matches!(canvas.flip(), Err(CanvasError::Closed)));
        assert!(matches!(canvas.show(&Cross::new()), Err(CanvasError::Closed)));
        assert!(matches!(canvas.close(), Err(CanvasError::Closed)));
        assert!(matches!(canvas.get_fps(), Err(CanvasError::Closed)));
    }

    #[test]
    fn escape_closes_during_flip() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.backend_mut().press(Key::Escape);

        assert!(matches!(canvas.flip(), Err(CanvasError::Closed)));
        assert!(canvas.is_closed());
        assert!(!canvas.backend().has_window());
    }

    #[test]
    fn close_request_behaves_like_escape() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.backend_mut().request_close();
        assert!(matches!(canvas.flip(), Err(CanvasError::Closed)));
    }

    #[test]
    fn keys_drive_run_flags() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.backend_mut().press(Key::F5);
        canvas.backend_mut().press(Key::P);
        canvas.flip().unwrap();

        assert!(canvas.start_run());
        assert!(canvas.paused());
        assert!(canvas.last_input().pressed(Key::F5));

        canvas.backend_mut().press(Key::P);
        canvas.flip().unwrap();
        assert!(!canvas.paused());
        assert!(!canvas.last_input().pressed(Key::F5));
    }

    #[test]
    fn reopen_after_close() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.close().unwrap();
        canvas.open().unwrap();

        assert!(canvas.is_open());
        canvas.flip().unwrap();
    }

    #[test]
    fn fullscreen_uses_monitor_size() {
        let backend = HeadlessBackend::new().with_monitor(1024, 768);
        let mut canvas = Canvas::with_backend(CanvasConfig::windowed(320, 200), backend).unwrap();
        canvas.open().unwrap();

        canvas.set_fullscreen().unwrap();
        assert!(canvas.is_fullscreen());
        assert_eq!((canvas.width(), canvas.height()), (1024, 768));

        canvas.set_windowed().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (320, 200));
    }

    #[test]
    fn full_size_and_geometry_accessors() {
        let backend = HeadlessBackend::new().with_monitor(800, 450);
        let config = CanvasConfig {
            size: CanvasSize::Full,
            ..CanvasConfig::default().with_origin(-5, -5)
        };
        let canvas = Canvas::with_backend(config, backend).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (800, 450));
        assert_eq!(canvas.origin(), (0, 0));
        assert!((canvas.diag() - 600.0).abs() < 1e-9);
    }

    fn front_circle(canvas: &Canvas<HeadlessBackend>) -> (f32, f32, f32) {
        match canvas.backend().front_buffer().items() {
            [DrawCmd::Circle(c)] => (c.center.x, c.center.y, c.radius),
            other => panic!("expected a single circle, got {other:?}"),
        }
    }

    #[test]
    fn show_adapts_to_the_size_after_a_resize() {
        let mut canvas = canvas();
        canvas.open().unwrap();
        canvas.backend_mut().press(Key::P);
        canvas.flip().unwrap();
        assert!(canvas.paused());

        canvas.show(&Circle::new()).unwrap();
        assert_eq!(front_circle(&canvas), (320.0, 240.0, 24.0));

        canvas.backend_mut().resize(1000, 800);
        assert_eq!((canvas.width(), canvas.height()), (1000, 800));

        canvas.show(&Circle::new()).unwrap();
        assert_eq!(front_circle(&canvas), (500.0, 400.0, 40.0));

        assert!(canvas.last_input().events.is_empty());
        assert_eq!(canvas.flags(), RunFlags { paused: true, start_run: false });
        assert!(canvas.is_open());
    }

    #[test]
    fn measures_frame_rate_from_presents() {
        let backend = HeadlessBackend::new().with_frame_interval(Duration::from_millis(2));
        let mut canvas = Canvas::with_backend(CanvasConfig::default(), backend).unwrap();
        canvas.open().unwrap();

        let fps = canvas.get_fps().unwrap();
        // Sleeping never undershoots, so the rate cannot exceed 500 fps.
        assert!(fps > 0.0 && fps <= 500.0);

        assert!(canvas.is_fps_feasible(1.0, FpsPolicy::Raise).unwrap());
        assert!(!canvas.is_fps_feasible(10_000.0, FpsPolicy::Report).unwrap());
        assert!(matches!(
            canvas.is_fps_feasible(10_000.0, FpsPolicy::Raise),
            Err(CanvasError::FrameRateTooHigh { .. })
        ));
    }
}
