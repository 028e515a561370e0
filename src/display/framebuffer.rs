//! 8-bit indexed shadow framebuffer
//!
//! One byte per pixel, row-major, `width * height` bytes for the lifetime
//! of the device. Index [`TRANSPARENT`] never paints through [`set`], which
//! lets glyph rendering skip background pixels.
//!
//! [`set`]: IndexedFramebuffer::set

use crate::error::{Error, Result};

/// Palette index that suppresses pixel writes
pub const TRANSPARENT: u8 = 255;

/// Indexed framebuffer
#[derive(Debug, Clone)]
pub struct IndexedFramebuffer {
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl IndexedFramebuffer {
    /// Allocate a zeroed framebuffer.
    ///
    /// Fails with [`Error::Alloc`] instead of aborting when memory is short.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })?;

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size).map_err(|_| {
            log::error!("framebuffer allocation of {} bytes failed", size);
            Error::Alloc { bytes: size }
        })?;
        buffer.resize(size, 0);

        Ok(Self { width, height, buffer })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Write `index` at (x, y) unless it is [`TRANSPARENT`].
    ///
    /// Coordinates are not validated here; the drawing operations check
    /// them once up front.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, index: u8) {
        if index != TRANSPARENT {
            self.buffer[x + y * self.width] = index;
        }
    }

    /// Write `index` over columns `x0..=x1` of row `y`, unless it is
    /// [`TRANSPARENT`]. Unchecked like [`IndexedFramebuffer::set`].
    #[inline]
    pub fn fill_span(&mut self, x0: usize, x1: usize, y: usize, index: u8) {
        if index != TRANSPARENT {
            let row = y * self.width;
            self.buffer[row + x0..=row + x1].fill(index);
        }
    }

    /// Read the index at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.buffer[x + y * self.width])
        } else {
            None
        }
    }

    /// Fill every pixel with `index`. [`TRANSPARENT`] is written too.
    pub fn clear(&mut self, index: u8) {
        self.buffer.fill(index);
    }

    /// Raw indices, row-major
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Groups of `lines` whole scanlines; the last group may be shorter.
    /// `lines` is clamped to `1..=height`.
    pub fn scanline_chunks(&self, lines: usize) -> std::slice::Chunks<'_, u8> {
        self.buffer.chunks(self.width * lines.clamp(1, self.height))
    }
}
