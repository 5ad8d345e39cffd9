//! Controller command sets
//!
//! Device commands are enumerated tagged values per controller family
//! rather than hex literals scattered through driver code. Each value
//! knows how to put itself on the wire: SH1106 command/argument pairs
//! go out as two consecutive command-mode bytes.

use crate::transport::Transport;

/// SH1106 command set (the subset this firmware uses)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sh1106Command {
    /// 0xAE - panel off, RAM retained
    DisplayOff,
    /// 0xAF - panel on
    DisplayOn,
    /// 0xD5 - oscillator divide ratio / frequency
    ClockDivider(u8),
    /// 0xA8 - multiplex ratio (lines - 1)
    MultiplexRatio(u8),
    /// 0xD3 - vertical display offset
    DisplayOffset(u8),
    /// 0x40 | line - display start line
    StartLine(u8),
    /// 0xAD - DC-DC charge pump control
    ChargePump(u8),
    /// 0xA1 - segment remap (horizontal flip)
    SegmentRemap,
    /// 0xC8 - COM output scan decrement (vertical flip)
    ComScanDecrement,
    /// 0xDA - COM pins hardware configuration
    ComPins(u8),
    /// 0x81 - contrast level
    Contrast(u8),
    /// 0xD9 - precharge period
    Precharge(u8),
    /// 0xA6 - normal (non-inverted) display
    NormalDisplay,
    /// 0xA7 - inverted display
    InverseDisplay,
    /// 0xA4 - resume display from RAM (entire-display-on override off)
    EntireDisplayResume,
    /// 0xA5 - force every pixel on regardless of RAM
    EntireDisplayOn,
    /// 0xB0 | page - page select for the flush loop
    PageAddress(u8),
    /// 0x00 | low nibble - column address low
    ColumnLow(u8),
    /// 0x10 | high nibble - column address high
    ColumnHigh(u8),
}

impl Sh1106Command {
    /// Encode to one or two command bytes
    pub fn encode(self) -> (u8, Option<u8>) {
        use Sh1106Command::*;

        match self {
            DisplayOff => (0xAE, None),
            DisplayOn => (0xAF, None),
            ClockDivider(v) => (0xD5, Some(v)),
            MultiplexRatio(v) => (0xA8, Some(v)),
            DisplayOffset(v) => (0xD3, Some(v)),
            StartLine(line) => (0x40 | (line & 0x3F), None),
            ChargePump(v) => (0xAD, Some(v)),
            SegmentRemap => (0xA1, None),
            ComScanDecrement => (0xC8, None),
            ComPins(v) => (0xDA, Some(v)),
            Contrast(v) => (0x81, Some(v)),
            Precharge(v) => (0xD9, Some(v)),
            NormalDisplay => (0xA6, None),
            InverseDisplay => (0xA7, None),
            EntireDisplayResume => (0xA4, None),
            EntireDisplayOn => (0xA5, None),
            PageAddress(page) => (0xB0 | (page & 0x07), None),
            ColumnLow(column) => (column & 0x0F, None),
            ColumnHigh(column) => (0x10 | (column >> 4), None),
        }
    }

    /// Transmit as consecutive command-mode bytes
    pub fn send<T: Transport>(self, transport: &mut T) -> Result<(), T::Error> {
        let (first, second) = self.encode();
        transport.send_command(first)?;
        if let Some(argument) = second {
            transport.send_command(argument)?;
        }
        Ok(())
    }
}

/// ST7920 instruction set (single-byte instructions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7920Command {
    /// 0x01 - clear text DDRAM
    Clear,
    /// 0x02 - cursor home
    Home,
    /// 0x06 - entry mode, address increment
    AddressIncrement,
    /// 0x0C - display on, cursor off
    DisplayOn,
    /// 0x08 - display off
    DisplayOff,
    /// 0x30 - basic instruction set
    BasicFunction,
    /// 0x34 - extended instruction set
    ExtendedFunction,
    /// 0x36 - extended set with graphic display enabled
    GraphicOn,
    /// 0x80 | addr - GDRAM vertical address (extended set)
    VerticalAddress(u8),
    /// 0x80 | addr - GDRAM horizontal address (extended set)
    HorizontalAddress(u8),
}

impl St7920Command {
    /// Encode to the single instruction byte
    pub fn encode(self) -> u8 {
        use St7920Command::*;

        match self {
            Clear => 0x01,
            Home => 0x02,
            AddressIncrement => 0x06,
            DisplayOn => 0x0C,
            DisplayOff => 0x08,
            BasicFunction => 0x30,
            ExtendedFunction => 0x34,
            GraphicOn => 0x36,
            VerticalAddress(addr) => 0x80 | (addr & 0x3F),
            HorizontalAddress(addr) => 0x80 | (addr & 0x0F),
        }
    }

    /// Transmit as one command-mode byte
    pub fn send<T: Transport>(self, transport: &mut T) -> Result<(), T::Error> {
        transport.send_command(self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sh1106_pairs_encode_two_bytes() {
        assert_eq!(Sh1106Command::ClockDivider(0x80).encode(), (0xD5, Some(0x80)));
        assert_eq!(Sh1106Command::Contrast(0xFF).encode(), (0x81, Some(0xFF)));
        assert_eq!(Sh1106Command::DisplayOn.encode(), (0xAF, None));
    }

    #[test]
    fn test_sh1106_addressing_nibbles() {
        // Column 2 is the visible-area origin on the SH1106
        assert_eq!(Sh1106Command::ColumnLow(2).encode(), (0x02, None));
        assert_eq!(Sh1106Command::ColumnHigh(2).encode(), (0x10, None));
        assert_eq!(Sh1106Command::ColumnLow(0x7F).encode(), (0x0F, None));
        assert_eq!(Sh1106Command::ColumnHigh(0x7F).encode(), (0x17, None));
        assert_eq!(Sh1106Command::PageAddress(5).encode(), (0xB5, None));
    }

    #[test]
    fn test_st7920_instruction_bytes() {
        assert_eq!(St7920Command::BasicFunction.encode(), 0x30);
        assert_eq!(St7920Command::GraphicOn.encode(), 0x36);
        assert_eq!(St7920Command::VerticalAddress(31).encode(), 0x9F);
        assert_eq!(St7920Command::HorizontalAddress(8).encode(), 0x88);
    }
}
