//! 16-pixel numeric clock face font
//!
//! Seven-segment style digits plus the punctuation a clock and a date
//! line need (`-`, `.`, `/`, `:`). Two bytes per column, low byte on
//! top. Narrow glyphs pad their records with zero columns to keep the
//! table stride uniform.

use super::Font;

/// Large numeric font for the HH:MM:SS clock face
pub const FONT_SEG16: Font = Font {
    ascii_begin: 0x2D, // '-'
    ascii_end: 0x3A,   // ':'
    ascii_offset: 0x2D,
    bytes_per_column: 2,
    glyph_stride: 17,
    height: 16,
    data: &FONT_SEG16_DATA,
};

#[rustfmt::skip]
const FONT_SEG16_DATA: [u8; 14 * 17] = [
    // '-'
    8, 0x00,0x00, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0x00,0x00,
    // '.'
    6, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0x00,0xC0, 0x00,0xC0, 0x00,0x00, 0x00,0x00, 0x00,0x00,
    // '/'
    8, 0x00,0xC0, 0x00,0x30, 0x00,0x0C, 0x00,0x03, 0xC0,0x00, 0x30,0x00, 0x0C,0x00, 0x03,0x00,
    // '0'
    8, 0xFF,0xFF, 0xFF,0xFF, 0x03,0xC0, 0x03,0xC0, 0x03,0xC0, 0x03,0xC0, 0xFF,0xFF, 0xFF,0xFF,
    // '1'
    8, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0xFF,0xFF, 0xFF,0xFF,
    // '2'
    8, 0x80,0xFF, 0x83,0xFF, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0xFF,0xC1, 0xFF,0x01,
    // '3'
    8, 0x00,0x00, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0xFF,0xFF, 0xFF,0xFF,
    // '4'
    8, 0xFF,0x01, 0xFF,0x01, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0x80,0x01, 0xFF,0xFF, 0xFF,0xFF,
    // '5'
    8, 0xFF,0x01, 0xFF,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xFF, 0x80,0xFF,
    // '6'
    8, 0xFF,0xFF, 0xFF,0xFF, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xFF, 0x80,0xFF,
    // '7'
    8, 0x00,0x00, 0x03,0x00, 0x03,0x00, 0x03,0x00, 0x03,0x00, 0x03,0x00, 0xFF,0xFF, 0xFF,0xFF,
    // '8'
    8, 0xFF,0xFF, 0xFF,0xFF, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0xFF,0xFF, 0xFF,0xFF,
    // '9'
    8, 0xFF,0x01, 0xFF,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0x83,0xC1, 0xFF,0xFF, 0xFF,0xFF,
    // ':'
    6, 0x00,0x00, 0x00,0x00, 0x30,0x0C, 0x30,0x0C, 0x00,0x00, 0x00,0x00, 0x00,0x00, 0x00,0x00,
];
