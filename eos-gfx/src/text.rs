//! Bitmap-font text rendering
//!
//! Maps strings onto the framebuffer one glyph at a time through the
//! pixel primitive. Layout follows the original firmware: the cursor
//! advances by the glyph's stored width plus a gap of `height / 10`
//! pixels, and rendering stops at the right or bottom edge instead of
//! wrapping.

use core::fmt::Write;

use crate::font::Font;
use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

/// Formatted strings longer than this are truncated, not rejected
pub const FORMAT_CAP: usize = 50;

/// Draw a single character
///
/// Codes without a glyph in `font` are a no-op. Column `c`, vertical
/// byte `b`, bit `k` of the glyph map to `(x + c, y + b*8 + k)`;
/// cleared bits are skipped so overlapping glyphs do not erase each
/// other's pixels.
pub fn draw_character(fb: &mut FrameBuffer, on: bool, x: i16, y: i16, font: &Font, code: u8) {
    let Some(glyph) = font.glyph(code) else {
        return;
    };

    for column in 0..glyph.width {
        for byte in 0..font.bytes_per_column {
            let bits = glyph.column_byte(column, byte);
            for bit in 0..8u8 {
                if (bits >> bit) & 1 != 0 {
                    fb.set_pixel(on, x + column as i16, y + (bit as i16 + 8 * byte as i16));
                }
            }
        }
    }
}

/// Draw a string left to right
///
/// Characters past the right or bottom edge are dropped. Characters
/// outside the font's range plot nothing and advance nothing; the rest
/// of the string still renders.
pub fn draw_str(fb: &mut FrameBuffer, on: bool, x: i16, y: i16, font: &Font, text: &str) {
    let mut x = x;

    for code in text.bytes() {
        if x >= WIDTH as i16 || y >= HEIGHT as i16 {
            break;
        }

        let Some(glyph) = font.glyph(code) else {
            continue;
        };

        let width = glyph.width;
        draw_character(fb, on, x, y, font, code);
        x += width as i16 + font.letter_gap();
    }
}

/// Draw formatted text
///
/// The output is bounded at [`FORMAT_CAP`] characters; anything beyond
/// the cap is silently truncated. Call through `format_args!`:
///
/// ```ignore
/// draw_fmt(&mut fb, true, 7, 20, &FONT_SEG16, format_args!("{:02}:{:02}:{:02}", h, m, s));
/// ```
pub fn draw_fmt(
    fb: &mut FrameBuffer,
    on: bool,
    x: i16,
    y: i16,
    font: &Font,
    args: core::fmt::Arguments,
) {
    let mut formatted: heapless::String<FORMAT_CAP> = heapless::String::new();
    // Overflow leaves the part that fit; render it anyway.
    let _ = formatted.write_fmt(args);

    draw_str(fb, on, x, y, font, formatted.as_str());
}
