/// Requested window size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CanvasSize {
    /// Logical pixels.
    Windowed { width: u32, height: u32 },
    /// Size of the primary monitor (still a regular window).
    Full,
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize::Windowed {
            width: 640,
            height: 480,
        }
    }
}

/// Canvas configuration.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub size: CanvasSize,
    /// Top-left window position on the desktop, in logical pixels.
    /// Negative components are clamped to 0.
    pub origin: (i32, i32),
    pub title: String,
    pub vsync: bool,
    pub resizable: bool,
}

impl CanvasConfig {
    pub fn windowed(width: u32, height: u32) -> Self {
        Self {
            size: CanvasSize::Windowed { width, height },
            ..Self::default()
        }
    }

    pub fn full() -> Self {
        Self {
            size: CanvasSize::Full,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Origin with negative components clamped to 0.
    pub fn clamped_origin(&self) -> (u32, u32) {
        (self.origin.0.max(0) as u32, self.origin.1.max(0) as u32)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: CanvasSize::default(),
            origin: (100, 100),
            title: "Experimental Framework".to_string(),
            vsync: true,
            resizable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_origin_is_clamped() {
        let config = CanvasConfig::default().with_origin(-20, 35);
        assert_eq!(config.clamped_origin(), (0, 35));
    }

    #[test]
    fn defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.size, CanvasSize::Windowed { width: 640, height: 480 });
        assert_eq!(config.clamped_origin(), (100, 100));
        assert!(config.vsync);
    }
}
