//! Monochrome rendering core for the Eos wake-up clock
//!
//! This crate contains everything that draws pixels but knows nothing
//! about hardware:
//!
//! - Bit-packed 1 bpp framebuffer mirroring the display's page layout
//! - Geometric primitives (lines, rectangles, circles)
//! - Bitmap-font text rendering with embedded glyph tables
//!
//! Drawing is best-effort by design: out-of-range coordinates and
//! glyph codes are silently dropped, never surfaced as errors. The
//! framebuffer is flushed to a physical display by `eos-display`.

#![no_std]
#![deny(unsafe_code)]

pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod text;

pub use font::{Font, FONT_5X7, FONT_SEG16};
pub use framebuffer::{FrameBuffer, HEIGHT, PAGES, WIDTH};
