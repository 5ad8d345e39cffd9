//! Bit-packed pixel store
//!
//! The buffer mirrors the physical memory layout of SH1106-class
//! controllers: 8 horizontal pages of 8 pixel rows each, one byte per
//! column within a page, the least significant bit on top.

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Backing store size in bytes (1 bit per pixel)
pub const BUFFER_SIZE: usize = (WIDTH * HEIGHT) / 8;

/// In-memory 1 bpp framebuffer
///
/// Byte index for pixel `(x, y)` is `(y / 8) * WIDTH + x`, bit offset
/// `y % 8`. Coordinates outside the buffer are silently ignored -
/// a documented policy, not an error (the rendering core favors
/// best-effort partial output over fault propagation).
pub struct FrameBuffer {
    data: [u8; BUFFER_SIZE],
}

impl FrameBuffer {
    /// Create a cleared framebuffer
    pub const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
        }
    }

    /// Set every byte to zero
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Set or clear a single pixel
    ///
    /// Out-of-bounds coordinates are a no-op.
    pub fn set_pixel(&mut self, on: bool, x: i16, y: i16) {
        if x < 0 || y < 0 || x >= WIDTH as i16 || y >= HEIGHT as i16 {
            return;
        }

        let index = (y as usize / 8) * WIDTH + x as usize;
        let bit = y as usize % 8;

        if on {
            self.data[index] |= 1 << bit;
        } else {
            self.data[index] &= !(1 << bit);
        }
    }

    /// Read back a single pixel
    ///
    /// Out-of-bounds coordinates read as off.
    pub fn pixel(&self, x: i16, y: i16) -> bool {
        if x < 0 || y < 0 || x >= WIDTH as i16 || y >= HEIGHT as i16 {
            return false;
        }

        let index = (y as usize / 8) * WIDTH + x as usize;
        (self.data[index] >> (y as usize % 8)) & 1 != 0
    }

    /// Read one page/column byte (flush accessor)
    ///
    /// `page` must be below [`PAGES`], `column` below [`WIDTH`].
    pub fn page_byte(&self, page: usize, column: usize) -> u8 {
        self.data[page * WIDTH + column]
    }

    /// Borrow one page as a column-indexed byte slice
    pub fn page(&self, page: usize) -> &[u8] {
        &self.data[page * WIDTH..(page + 1) * WIDTH]
    }

    /// Borrow the whole backing store
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
