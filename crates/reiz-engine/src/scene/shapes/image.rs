use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// Decoded RGBA8 pixels (straight alpha, top row first).
///
/// Every bitmap carries a process-unique id so renderers can cache the GPU
/// texture across frames.
#[derive(Debug, PartialEq, Eq)]
pub struct Bitmap {
    id: u64,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps raw RGBA8 pixels. Returns `None` if the buffer length does not
    /// match `width * height * 4` or either side is zero.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixels converted to premultiplied alpha, ready for upload.
    pub fn premultiplied(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as u16;
                let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
                [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
            })
            .collect()
    }
}

/// Textured quad payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub bitmap: Arc<Bitmap>,
    /// Destination in pixel space; `rect.origin` is the bottom-left corner.
    pub rect: Rect,
}

impl DrawList {
    /// Records a bitmap stretched over `rect`.
    #[inline]
    pub fn push_image(&mut self, bitmap: Arc<Bitmap>, rect: Rect) {
        self.push(DrawCmd::Image(ImageCmd { bitmap, rect }));
    }
}
