use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::coords::{Rect, Vec2, Viewport};
use crate::scene::{Bitmap, DrawList};

use super::Stimulus;

/// Error returned when an image stimulus cannot be created.
#[derive(Debug, thiserror::Error)]
pub enum VisualError {
    #[error("failed to load image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels")]
    Empty { path: PathBuf },
}

/// Bitmap scaled to fit the window, then by `scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub bitmap: Arc<Bitmap>,
    pub position: Vec2,
    pub scale: f32,
    path: Option<PathBuf>,
}

impl Image {
    /// Decodes an image file. Decoding happens once, at construction.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VisualError> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .map_err(|source| VisualError::Image { path: path.to_path_buf(), source })?
            .to_rgba8();
        let (w, h) = rgba.dimensions();
        let bitmap = Bitmap::from_rgba(w, h, rgba.into_raw())
            .ok_or_else(|| VisualError::Empty { path: path.to_path_buf() })?;

        log::debug!("loaded image {} ({w}x{h})", path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::from_bitmap(Arc::new(bitmap))
        })
    }

    /// Wraps already decoded pixels.
    pub fn from_bitmap(bitmap: Arc<Bitmap>) -> Self {
        Self {
            bitmap,
            position: Vec2::zero(),
            scale: 1.0,
            path: None,
        }
    }

    pub fn position(mut self, position: impl Into<Vec2>) -> Self {
        self.position = position.into();
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Source file, when the image was loaded from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Destination rectangle for a window of the given size.
    ///
    /// The bitmap is first fitted inside the window, then multiplied by
    /// `scale`. `position` moves the bottom-left corner relative to the
    /// position that centers the image.
    pub fn placement(&self, viewport: Viewport) -> Rect {
        let iw = self.bitmap.width() as f32;
        let ih = self.bitmap.height() as f32;

        let fit = (viewport.width / iw).min(viewport.height / ih);
        let s = self.scale * fit;

        let half = viewport.half_extent();
        let x0 = half.x - (s * iw / 2.0).floor();
        let y0 = half.y - (s * ih / 2.0).floor();

        Rect::new(
            x0 * self.position.x + x0,
            y0 * self.position.y + y0,
            s * iw,
            s * ih,
        )
    }
}

impl Stimulus for Image {
    fn adapt(&self, viewport: Viewport, list: &mut DrawList) {
        list.push_image(self.bitmap.clone(), self.placement(viewport));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(w: u32, h: u32) -> Arc<Bitmap> {
        Arc::new(Bitmap::from_rgba(w, h, vec![255; (w * h * 4) as usize]).unwrap())
    }

    #[test]
    fn fits_and_centers_in_window() {
        let img = Image::from_bitmap(bitmap(100, 50));
        // Fit factor = min(400/100, 400/50) = 4 → 400 x 200, centered vertically.
        assert_eq!(img.placement(Viewport::new(400.0, 400.0)), Rect::new(0.0, 100.0, 400.0, 200.0));
    }

    #[test]
    fn scale_shrinks_around_center() {
        let img = Image::from_bitmap(bitmap(100, 100)).scale(0.5);
        assert_eq!(img.placement(Viewport::new(400.0, 400.0)), Rect::new(100.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("failed to write png");

        let img = Image::open(&path).expect("png should decode");
        assert_eq!(img.bitmap.width(), 3);
        assert_eq!(img.bitmap.height(), 2);
        assert_eq!(&img.bitmap.pixels()[..4], &[10, 20, 30, 255]);
        assert_eq!(img.path(), Some(path.as_path()));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Image::open("/definitely/not/here.png").unwrap_err();
        assert!(err.to_string().contains("here.png"));
    }
}
