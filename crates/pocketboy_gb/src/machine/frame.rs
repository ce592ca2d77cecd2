use std::sync::{Arc, Mutex, PoisonError};

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// 160×144 shades, one byte per pixel, row-major. Each value is a 2-bit
/// DMG shade (0 = lightest, 3 = darkest) after palette mapping.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Box<[u8]>,
}

impl FrameBuffer {
    pub const WIDTH: usize = SCREEN_WIDTH;
    pub const HEIGHT: usize = SCREEN_HEIGHT;

    pub fn new() -> Self {
        Self {
            pixels: vec![0; Self::WIDTH * Self::HEIGHT].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * Self::WIDTH + x]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, shade: u8) {
        self.pixels[y * Self::WIDTH + x] = shade & 0x03;
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * Self::WIDTH..(y + 1) * Self::WIDTH]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.pixels[y * Self::WIDTH..(y + 1) * Self::WIDTH]
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &Self::WIDTH)
            .field("height", &Self::HEIGHT)
            .finish_non_exhaustive()
    }
}

/// Shared front buffer. The PPU copies each completed frame into it; a
/// presentation thread can read it through a clone of the handle.
#[derive(Clone, Debug, Default)]
pub struct FrameHandle {
    inner: Arc<Mutex<FrameBuffer>>,
}

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the front buffer locked.
    pub fn with_frame<R>(&self, f: impl FnOnce(&FrameBuffer) -> R) -> R {
        // Only `publish` writes, in a single copy.
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn snapshot(&self) -> FrameBuffer {
        self.with_frame(FrameBuffer::clone)
    }

    pub(crate) fn publish(&self, frame: &FrameBuffer) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.pixels.copy_from_slice(&frame.pixels);
    }
}
