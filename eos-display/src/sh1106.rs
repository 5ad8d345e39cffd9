//! SH1106 OLED display controller
//!
//! Owns the framebuffer and the buffer-to-device protocol for
//! 128x64 SH1106-class panels. Application code borrows the buffer
//! mutably to draw, then calls [`Sh1106::flush`] to page the whole
//! buffer out through the transport.

use embedded_hal::delay::DelayNs;

use eos_gfx::framebuffer::{FrameBuffer, PAGES, WIDTH};

use crate::command::Sh1106Command as Cmd;
use crate::state::ControllerState;
use crate::transport::Transport;

/// The SH1106 has 132 columns of RAM; the visible 128 start at 2
const COLUMN_OFFSET: u8 = 2;

/// Panel settle time between the configuration script and display-on
const SETTLE_BEFORE_ON_MS: u32 = 10;

/// SH1106 display controller over any [`Transport`]
pub struct Sh1106<T> {
    transport: T,
    buffer: FrameBuffer,
    state: ControllerState,
}

impl<T: Transport> Sh1106<T> {
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

    /// Whether the init sequence has completed
    pub fn is_on(&self) -> bool {
        self.state == ControllerState::On
    }

    /// Bring the panel up
    ///
    /// Runs the timed hardware reset, then the fixed configuration
    /// script, then enables the display after a short settle window.
    /// Command/argument pairs go out as two consecutive command bytes.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), T::Error> {
        self.state = ControllerState::TransportReady;

        self.transport.reset()?;
        self.state = ControllerState::Reset;

        const SCRIPT: [Cmd; 13] = [
            Cmd::DisplayOff,
            Cmd::ClockDivider(0x80),
            Cmd::MultiplexRatio(0x3F),
            Cmd::DisplayOffset(0x00),
            Cmd::StartLine(0),
            Cmd::ChargePump(0x8B),
            Cmd::SegmentRemap,
            Cmd::ComScanDecrement,
            Cmd::ComPins(0x12),
            Cmd::Contrast(0xFF),
            Cmd::Precharge(0x1F),
            Cmd::NormalDisplay,
            Cmd::EntireDisplayResume,
        ];
        for cmd in SCRIPT {
            cmd.send(&mut self.transport)?;
        }
        self.state = ControllerState::ConfigurationScripted;

        delay.delay_ms(SETTLE_BEFORE_ON_MS);
        Cmd::DisplayOn.send(&mut self.transport)?;
        self.state = ControllerState::On;

        Ok(())
    }

    /// Page the framebuffer out to the device
    ///
    /// The SH1106 has no random pixel addressing - only sequential
    /// column writes within a page. For each of the 8 pages: select
    /// the page, rewind the column pointer to the visible origin, then
    /// stream 128 data bytes. The ordering is a hardware contract and
    /// must not change.
    pub fn flush(&mut self) -> Result<(), T::Error> {
        for page in 0..PAGES as u8 {
            Cmd::PageAddress(page).send(&mut self.transport)?;
            Cmd::ColumnLow(COLUMN_OFFSET).send(&mut self.transport)?;
            Cmd::ColumnHigh(COLUMN_OFFSET).send(&mut self.transport)?;

            for column in 0..WIDTH {
                self.transport
                    .send_data(self.buffer.page_byte(page as usize, column))?;
            }
        }
        Ok(())
    }

    /// Adjust contrast after init
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), T::Error> {
        Cmd::Contrast(contrast).send(&mut self.transport)
    }

    /// Invert the whole panel without touching the buffer
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), T::Error> {
        let cmd = if inverted {
            Cmd::InverseDisplay
        } else {
            Cmd::NormalDisplay
        };
        cmd.send(&mut self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Command(u8),
        Data(u8),
        Reset,
    }

    /// Transport that records every call for protocol assertions
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
    fn test_init_wire_sequence() {
        let mut display = Sh1106::new(MockTransport::new());
        display.init(&mut NoopDelay).unwrap();

        let expected: &[Call] = &[
            Call::Reset,
            Call::Command(0xAE), // display off
            Call::Command(0xD5),
            Call::Command(0x80), // clock divider
            Call::Command(0xA8),
            Call::Command(0x3F), // multiplex ratio
            Call::Command(0xD3),
            Call::Command(0x00), // display offset
            Call::Command(0x40), // start line 0
            Call::Command(0xAD),
            Call::Command(0x8B), // charge pump
            Call::Command(0xA1), // segment remap
            Call::Command(0xC8), // COM scan decrement
            Call::Command(0xDA),
            Call::Command(0x12), // COM pins
            Call::Command(0x81),
            Call::Command(0xFF), // contrast
            Call::Command(0xD9),
            Call::Command(0x1F), // precharge
            Call::Command(0xA6), // normal display
            Call::Command(0xA4), // resume from RAM
            Call::Command(0xAF), // display on
        ];
        assert_eq!(display.transport.calls.as_slice(), expected);
        assert!(display.is_on());
    }

    #[test]
    fn test_state_progression_is_linear() {
        let mut display = Sh1106::new(MockTransport::new());
        assert_eq!(display.state(), ControllerState::Uninitialized);

        display.init(&mut NoopDelay).unwrap();
        assert_eq!(display.state(), ControllerState::On);

        // Flush never regresses the state machine
        display.flush().unwrap();
        assert_eq!(display.state(), ControllerState::On);
    }

    #[test]
    fn test_flush_page_column_data_ordering() {
        let mut display = Sh1106::new(MockTransport::new());

        // Recognizable pattern: one pixel per page at column = page
        for page in 0..PAGES as i16 {
            display.buffer_mut().set_pixel(true, page, page * 8 + 3);
        }

        display.flush().unwrap();

        let calls = display.transport.calls.as_slice();
        assert_eq!(calls.len(), PAGES * (3 + WIDTH));

        for page in 0..PAGES {
            let base = page * (3 + WIDTH);
            assert_eq!(calls[base], Call::Command(0xB0 | page as u8));
            assert_eq!(calls[base + 1], Call::Command(0x02));
            assert_eq!(calls[base + 2], Call::Command(0x10));

            for column in 0..WIDTH {
                let expected = if column == page { 1 << 3 } else { 0 };
                assert_eq!(
                    calls[base + 3 + column],
                    Call::Data(expected),
                    "page {page} column {column}"
                );
            }
        }
    }

    #[test]
    fn test_flush_before_init_still_transmits() {
        // Fire-and-forget: flushing an uninitialized controller is not an error
        let mut display = Sh1106::new(MockTransport::new());
        display.flush().unwrap();
        assert_eq!(
            display.transport.calls.len(),
            PAGES * (3 + WIDTH)
        );
        assert_eq!(display.state(), ControllerState::Uninitialized);
    }
}
