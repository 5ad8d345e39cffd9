//! Bitmap font tables
//!
//! A font is immutable glyph data addressed by ASCII code. Each glyph
//! record starts with a width byte (columns actually drawn) followed
//! by a column-major bitmap: `bytes_per_column` bytes per column, each
//! byte covering 8 vertical pixels with the least significant bit at
//! the glyph's top. Records are padded to a fixed `glyph_stride` so
//! the record for code `c` starts at `(c - ascii_offset) * stride`.

mod font5x7;
mod seg16;

pub use font5x7::FONT_5X7;
pub use seg16::FONT_SEG16;

/// An embedded, read-only bitmap font
pub struct Font {
    /// First supported ASCII code
    pub ascii_begin: u8,
    /// Last supported ASCII code (inclusive)
    pub ascii_end: u8,
    /// Code of the first glyph record in `data`
    pub ascii_offset: u8,
    /// Vertical bytes per glyph column
    pub bytes_per_column: u8,
    /// Bytes per glyph record, width byte included
    pub glyph_stride: usize,
    /// Glyph height in pixels; also drives the inter-letter gap
    pub height: u8,
    /// Raw glyph table
    pub data: &'static [u8],
}

impl Font {
    /// Look up the glyph for an ASCII code
    ///
    /// Codes outside `[ascii_begin, ascii_end]` have no glyph and
    /// render as empty, never as an error.
    pub fn glyph(&self, code: u8) -> Option<Glyph<'_>> {
        if code < self.ascii_begin || code > self.ascii_end {
            return None;
        }

        let start = (code - self.ascii_offset) as usize * self.glyph_stride;
        let record = &self.data[start..start + self.glyph_stride];
        Some(Glyph {
            width: record[0],
            bytes_per_column: self.bytes_per_column,
            columns: &record[1..],
        })
    }

    /// Inter-letter gap in pixels
    ///
    /// `height / 10` with integer truncation - the original firmware's
    /// spacing heuristic, preserved for layout parity.
    pub const fn letter_gap(&self) -> i16 {
        (self.height / 10) as i16
    }
}

/// One glyph's bitmap within a font table
pub struct Glyph<'a> {
    /// Width in columns
    pub width: u8,
    bytes_per_column: u8,
    columns: &'a [u8],
}

impl Glyph<'_> {
    /// Read the vertical byte `byte` of column `column`
    pub fn column_byte(&self, column: u8, byte: u8) -> u8 {
        self.columns[byte as usize + self.bytes_per_column as usize * column as usize]
    }
}
