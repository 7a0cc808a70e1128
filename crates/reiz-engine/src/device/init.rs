/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: stimulus colors are written to the framebuffer as given.
    pub prefer_srgb: bool,

    /// Synchronize presentation with the display refresh.
    ///
    /// `true` selects `Fifo`; `false` selects `AutoNoVsync`.
    pub vsync: bool,

    /// Optional alpha mode; ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            vsync: true,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        let mut init = GpuInit::default();
        assert_eq!(init.present_mode(), wgpu::PresentMode::Fifo);
        init.vsync = false;
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
