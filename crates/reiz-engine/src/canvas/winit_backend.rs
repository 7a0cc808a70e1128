use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::Modifiers;
use crate::input::platform::winit::{map_modifiers, translate_key_event};
use crate::render::{RenderCtx, RenderTarget, SceneRenderer};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::{Backend, CanvasConfig, CanvasSize, WindowSignal};

/// Pumps allowed for the platform to deliver the window after a request.
const CREATE_ATTEMPTS: usize = 32;

/// winit window rendered with wgpu.
///
/// winit normally owns the control flow; here the event loop is pumped with
/// a zero timeout from `dispatch`, so the canvas stays caller-driven. One
/// event loop exists per process, so only one `WinitBackend` can be created.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    app: WinitApp,
}

struct WindowRequest {
    title: String,
    size: CanvasSize,
    origin: (u32, u32),
    resizable: bool,
}

struct WinitApp {
    gpu_init: GpuInit,
    request: Option<WindowRequest>,

    // Field order matters: the surface must drop before its window.
    gpu: Option<Gpu>,
    window: Option<Arc<Window>>,

    renderer: SceneRenderer,
    modifiers: Modifiers,
    signals: Vec<WindowSignal>,
    error: Option<anyhow::Error>,
}

impl WinitBackend {
    pub fn new() -> Result<Self> {
        Self::with_gpu_init(GpuInit::default())
    }

    pub fn with_gpu_init(gpu_init: GpuInit) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        Ok(Self {
            event_loop,
            app: WinitApp {
                gpu_init,
                request: None,
                gpu: None,
                window: None,
                renderer: SceneRenderer::new(),
                modifiers: Modifiers::default(),
                signals: Vec::new(),
                error: None,
            },
        })
    }

    fn pump(&mut self) -> Result<()> {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let PumpStatus::Exit(code) = status {
            anyhow::bail!("event loop exited (code {code})");
        }
        match self.app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn window(&self) -> Option<&Window> {
        self.app.window.as_deref()
    }
}

impl Backend for WinitBackend {
    fn create_window(&mut self, config: &CanvasConfig) -> Result<()> {
        self.destroy_window();

        self.app.gpu_init.vsync = config.vsync;
        self.app.request = Some(WindowRequest {
            title: config.title.clone(),
            size: config.size,
            origin: config.clamped_origin(),
            resizable: config.resizable,
        });

        for _ in 0..CREATE_ATTEMPTS {
            self.pump()?;
            if self.app.window.is_some() {
                return Ok(());
            }
        }
        self.app.request = None;
        anyhow::bail!("event loop did not deliver the window")
    }

    fn destroy_window(&mut self) {
        self.app.gpu = None;
        self.app.window = None;
        self.app.signals.clear();
    }

    fn has_window(&self) -> bool {
        self.app.window.is_some()
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(window) = self.window() {
            window.set_visible(visible);
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if let Some(window) = self.window() {
            window.set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.window().is_some_and(|w| w.fullscreen().is_some())
    }

    fn viewport(&self) -> Viewport {
        self.window().map_or_else(Viewport::default, logical_viewport)
    }

    fn dispatch(&mut self, signals: &mut Vec<WindowSignal>) -> Result<()> {
        self.pump()?;
        signals.append(&mut self.app.signals);
        Ok(())
    }

    fn present(&mut self, list: &DrawList, fonts: &mut FontSystem) -> Result<()> {
        let app = &mut self.app;
        let (Some(window), Some(gpu)) = (app.window.as_ref(), app.gpu.as_mut()) else {
            anyhow::bail!("present without a window");
        };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(e) => {
                let reason = e.to_string();
                return match gpu.handle_surface_error(e) {
                    SurfaceErrorAction::Fatal => Err(anyhow::anyhow!("surface error: {reason}")),
                    action => {
                        log::debug!("frame skipped ({action:?}): {reason}");
                        Ok(())
                    }
                };
            }
        };

        let ctx = RenderCtx::from_gpu(gpu, logical_viewport(window));
        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
        app.renderer.render(&ctx, &mut target, list, fonts);

        window.pre_present_notify();
        gpu.submit(frame);
        Ok(())
    }
}

impl WinitApp {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(request) = self.request.take() else { return };
        if let Err(e) = self.open(event_loop, request) {
            self.error = Some(e);
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop, request: WindowRequest) -> Result<()> {
        let (x, y) = request.origin;
        let attrs = Window::default_attributes()
            .with_title(request.title)
            .with_visible(false)
            .with_resizable(request.resizable)
            .with_position(LogicalPosition::new(x as f64, y as f64));

        let attrs = match request.size {
            CanvasSize::Windowed { width, height } => {
                attrs.with_inner_size(LogicalSize::new(width as f64, height as f64))
            }
            CanvasSize::Full => {
                let monitor = event_loop
                    .primary_monitor()
                    .or_else(|| event_loop.available_monitors().next())
                    .context("no monitor available for a full-size canvas")?;
                attrs.with_inner_size(monitor.size())
            }
        };

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        let gpu = Gpu::new(Arc::clone(&window), &self.gpu_init)
            .context("GPU initialization failed for window")?;

        log::info!(
            "window created: {}x{} (scale {})",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        self.modifiers = Modifiers::default();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn is_current(&self, id: WindowId) -> bool {
        self.window.as_ref().is_some_and(|w| w.id() == id)
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if !self.is_current(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.signals.push(WindowSignal::CloseRequested),

            WindowEvent::ModifiersChanged(m) => self.modifiers = map_modifiers(m.state()),

            WindowEvent::KeyboardInput { event, .. } => {
                let ev = translate_key_event(&event, self.modifiers);
                self.signals.push(WindowSignal::Key(ev));
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size);
                }
                if let Some(window) = self.window.as_deref() {
                    self.signals.push(WindowSignal::Resized(logical_viewport(window)));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let (Some(window), Some(gpu)) = (self.window.as_deref(), self.gpu.as_mut()) {
                    gpu.resize(window.inner_size());
                }
            }

            _ => {}
        }
    }
}

fn logical_viewport(window: &Window) -> Viewport {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Viewport::new(size.width, size.height)
}
