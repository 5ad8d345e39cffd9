//! ST7920 graphic LCD controller
//!
//! Second controller family, usually paired with the bit-banged
//! transport. The ST7920's GDRAM is row-oriented: 32 address rows of
//! 32 bytes, where the first 16 bytes of a row are the top half of the
//! panel and the last 16 map to the bottom half. Flushing repacks the
//! page-organized framebuffer into horizontal row bytes on the fly.

use embedded_hal::delay::DelayNs;

use eos_gfx::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

use crate::command::St7920Command as Cmd;
use crate::state::ControllerState;
use crate::transport::Transport;

/// GDRAM rows (each covers one top-half and one bottom-half line)
const GDRAM_ROWS: usize = HEIGHT / 2;

/// Horizontal bytes per panel line
const LINE_BYTES: usize = WIDTH / 8;

/// Instruction execution time; the clear instruction needs more
const EXEC_DELAY_MS: u32 = 1;
const CLEAR_DELAY_MS: u32 = 12;

/// ST7920 display controller over any [`Transport`]
pub struct St7920<T> {
    transport: T,
    buffer: FrameBuffer,
    state: ControllerState,
}

impl<T: Transport> St7920<T> {
    /// Create an uninitialized controller with a cleared framebuffer
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: FrameBuffer::new(),
            state: ControllerState::Uninitialized,
        }
    }

    /// Borrow the framebuffer for drawing
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Borrow the framebuffer read-only
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Current initialization state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Bring the panel up in basic (text) mode
    ///
    /// The function-set instruction is issued twice per the
    /// controller's wake-up requirements; the clear instruction gets
    /// its longer execution window.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), T::Error> {
        self.state = ControllerState::TransportReady;

        self.transport.reset()?;
        self.state = ControllerState::Reset;

        Cmd::BasicFunction.send(&mut self.transport)?;
        delay.delay_ms(EXEC_DELAY_MS);
        Cmd::BasicFunction.send(&mut self.transport)?;
        delay.delay_ms(EXEC_DELAY_MS);
        Cmd::DisplayOn.send(&mut self.transport)?;
        delay.delay_ms(EXEC_DELAY_MS);
        Cmd::Clear.send(&mut self.transport)?;
        delay.delay_ms(CLEAR_DELAY_MS);
        Cmd::AddressIncrement.send(&mut self.transport)?;
        self.state = ControllerState::ConfigurationScripted;

        delay.delay_ms(EXEC_DELAY_MS);
        self.state = ControllerState::On;

        Ok(())
    }

    /// Switch the graphic display on or off
    ///
    /// Flushing requires graphic mode; text mode is the power-on
    /// default.
    pub fn graphic_mode(&mut self, enabled: bool, delay: &mut impl DelayNs) -> Result<(), T::Error> {
        Cmd::ExtendedFunction.send(&mut self.transport)?;
        delay.delay_ms(EXEC_DELAY_MS);
        if enabled {
            Cmd::GraphicOn.send(&mut self.transport)?;
        } else {
            Cmd::BasicFunction.send(&mut self.transport)?;
        }
        delay.delay_ms(EXEC_DELAY_MS);
        Ok(())
    }

    /// Stream the framebuffer into GDRAM
    ///
    /// For each of the 32 address rows: set the vertical then
    /// horizontal address, then stream 16 top-half bytes followed by
    /// 16 bottom-half bytes. The controller auto-increments within a
    /// row, so each row is one address pair plus a linear data burst.
    pub fn flush(&mut self) -> Result<(), T::Error> {
        for row in 0..GDRAM_ROWS {
            Cmd::VerticalAddress(row as u8).send(&mut self.transport)?;
            Cmd::HorizontalAddress(0).send(&mut self.transport)?;

            for chunk in 0..LINE_BYTES {
                let byte = row_byte(&self.buffer, chunk, row);
                self.transport.send_data(byte)?;
            }
            for chunk in 0..LINE_BYTES {
                let byte = row_byte(&self.buffer, chunk, row + GDRAM_ROWS);
                self.transport.send_data(byte)?;
            }
        }
        Ok(())
    }
}

/// Repack 8 horizontal pixels into one GDRAM byte, leftmost pixel in
/// the most significant bit
fn row_byte(buffer: &FrameBuffer, chunk: usize, y: usize) -> u8 {
    let mut byte = 0u8;
    for bit in 0..8 {
        if buffer.pixel((chunk * 8 + bit) as i16, y as i16) {
            byte |= 0x80 >> bit;
        }
    }
    byte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Command(u8),
        Data(u8),
        Reset,
    }

    struct MockTransport {
        calls: heapless::Vec<Call, 2200>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                calls: heapless::Vec::new(),
            }
        }
    }

    impl Transport for MockTransport {
        type Error = ();

        fn send_command(&mut self, byte: u8) -> Result<(), ()> {
            self.calls.push(Call::Command(byte)).map_err(|_| ())
        }

        fn send_data(&mut self, byte: u8) -> Result<(), ()> {
            self.calls.push(Call::Data(byte)).map_err(|_| ())
        }

        fn reset(&mut self) -> Result<(), ()> {
            self.calls.push(Call::Reset).map_err(|_| ())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_init_instruction_order() {
        let mut display = St7920::new(MockTransport::new());
        display.init(&mut NoopDelay).unwrap();

        let expected: &[Call] = &[
            Call::Reset,
            Call::Command(0x30), // function set
            Call::Command(0x30), // repeated per wake-up sequence
            Call::Command(0x0C), // display on
            Call::Command(0x01), // clear
            Call::Command(0x06), // entry mode
        ];
        assert_eq!(display.transport.calls.as_slice(), expected);
        assert_eq!(display.state(), ControllerState::On);
    }

    #[test]
    fn test_graphic_mode_sequence() {
        let mut display = St7920::new(MockTransport::new());
        display.graphic_mode(true, &mut NoopDelay).unwrap();
        assert_eq!(
            display.transport.calls.as_slice(),
            &[Call::Command(0x34), Call::Command(0x36)]
        );
    }

    #[test]
    fn test_flush_row_addressing_and_repacking() {
        let mut display = St7920::new(MockTransport::new());

        display.buffer_mut().set_pixel(true, 0, 0); // top-left
        display.buffer_mut().set_pixel(true, 127, 32); // bottom half, row 0, last bit

        display.flush().unwrap();

        let calls = display.transport.calls.as_slice();
        let row_stride = 2 + 2 * LINE_BYTES;
        assert_eq!(calls.len(), GDRAM_ROWS * row_stride);

        // Row 0: address pair then data
        assert_eq!(calls[0], Call::Command(0x80));
        assert_eq!(calls[1], Call::Command(0x80));
        assert_eq!(calls[2], Call::Data(0x80)); // pixel (0,0), MSB first
        assert_eq!(calls[2 + 2 * LINE_BYTES - 1], Call::Data(0x01)); // pixel (127,32)

        // Row 5 addresses
        let base = 5 * row_stride;
        assert_eq!(calls[base], Call::Command(0x85));
        assert_eq!(calls[base + 1], Call::Command(0x80));
    }
}
