//! Bit-banged serial transport
//!
//! ST7920 panels speak a three-frame serial protocol over plain GPIO:
//! a sync byte carrying the register-select bit, then the instruction
//! byte split into two frames of four bits each padded with zeros.
//! Chip-select is active high on these modules.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::transport::{Transport, TransportError};

/// Sync frame for instruction-register writes (RS = 0)
const SYNC_COMMAND: u8 = 0xF8;

/// Sync frame for data-register writes (RS = 1)
const SYNC_DATA: u8 = 0xFA;

/// Clock half-period; the controller samples on the rising edge
const HALF_PERIOD_US: u32 = 1;

/// Reset pulse and recovery window
const RESET_HOLD_MS: u32 = 100;

/// [`Transport`] bit-banged over clock, data, CS and RST pins
pub struct BitBangTransport<SCK, SID, CS, RST, D> {
    sck: SCK,
    sid: SID,
    cs: CS,
    rst: RST,
    delay: D,
}

impl<SCK, SID, CS, RST, D> BitBangTransport<SCK, SID, CS, RST, D>
where
    SCK: OutputPin,
    SID: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the four control pins
    pub fn new(sck: SCK, sid: SID, cs: CS, rst: RST, delay: D) -> Self {
        Self {
            sck,
            sid,
            cs,
            rst,
            delay,
        }
    }

    /// Clock one byte out MSB first
    fn shift_out(&mut self, byte: u8) -> Result<(), TransportError> {
        for bit in 0..8 {
            if byte & (0x80 >> bit) != 0 {
                self.sid.set_high().map_err(|_| TransportError::Pin)?;
            } else {
                self.sid.set_low().map_err(|_| TransportError::Pin)?;
            }
            self.sck.set_high().map_err(|_| TransportError::Pin)?;
            self.delay.delay_us(HALF_PERIOD_US);
            self.sck.set_low().map_err(|_| TransportError::Pin)?;
            self.delay.delay_us(HALF_PERIOD_US);
        }
        Ok(())
    }

    /// Transmit one sync + nibble-split frame triple
    fn send_frame(&mut self, sync: u8, byte: u8) -> Result<(), TransportError> {
        self.cs.set_high().map_err(|_| TransportError::Pin)?;
        let result = self
            .shift_out(sync)
            .and_then(|_| self.shift_out(byte & 0xF0))
            .and_then(|_| self.shift_out(byte << 4));
        self.cs.set_low().map_err(|_| TransportError::Pin)?;
        result
    }
}

impl<SCK, SID, CS, RST, D> Transport for BitBangTransport<SCK, SID, CS, RST, D>
where
    SCK: OutputPin,
    SID: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = TransportError;

    fn send_command(&mut self, byte: u8) -> Result<(), TransportError> {
        self.send_frame(SYNC_COMMAND, byte)
    }

    fn send_data(&mut self, byte: u8) -> Result<(), TransportError> {
        self.send_frame(SYNC_DATA, byte)
    }

    fn reset(&mut self) -> Result<(), TransportError> {
        self.rst.set_low().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.rst.set_high().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType as PinErrorType;

    use super::*;

    /// Shared pin state; bits are captured on the SCK rising edge
    #[derive(Default)]
    struct Wire {
        sid_high: bool,
        cs_high: bool,
        bits: heapless::Vec<bool, 256>,
    }

    impl Wire {
        /// Reassemble captured bits into MSB-first bytes
        fn bytes(&self) -> heapless::Vec<u8, 32> {
            let mut out = heapless::Vec::new();
            for chunk in self.bits.chunks(8) {
                let mut byte = 0u8;
                for (index, &bit) in chunk.iter().enumerate() {
                    if bit {
                        byte |= 0x80 >> index;
                    }
                }
                out.push(byte).unwrap();
            }
            out
        }
    }

    struct SckPin<'a>(&'a RefCell<Wire>);

    impl PinErrorType for SckPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for SckPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut wire = self.0.borrow_mut();
            let bit = wire.sid_high;
            wire.bits.push(bit).unwrap();
            Ok(())
        }
    }

    struct SidPin<'a>(&'a RefCell<Wire>);

    impl PinErrorType for SidPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for SidPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().sid_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().sid_high = true;
            Ok(())
        }
    }

    struct CsPin<'a>(&'a RefCell<Wire>);

    impl PinErrorType for CsPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for CsPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().cs_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().cs_high = true;
            Ok(())
        }
    }

    struct NoopPin;

    impl PinErrorType for NoopPin {
        type Error = Infallible;
    }

    impl OutputPin for NoopPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn transport(
        wire: &RefCell<Wire>,
    ) -> BitBangTransport<SckPin<'_>, SidPin<'_>, CsPin<'_>, NoopPin, NoopDelay> {
        BitBangTransport::new(SckPin(wire), SidPin(wire), CsPin(wire), NoopPin, NoopDelay)
    }

    #[test]
    fn test_command_frame_splits_nibbles() {
        let wire = RefCell::new(Wire::default());
        transport(&wire).send_command(0x2A).unwrap();

        // Sync with RS=0, then high nibble, then low nibble shifted up
        assert_eq!(wire.borrow().bytes().as_slice(), &[0xF8, 0x20, 0xA0]);
    }

    #[test]
    fn test_data_frame_uses_data_sync() {
        let wire = RefCell::new(Wire::default());
        transport(&wire).send_data(0xC3).unwrap();

        assert_eq!(wire.borrow().bytes().as_slice(), &[0xFA, 0xC0, 0x30]);
    }

    #[test]
    fn test_cs_is_active_high_and_released() {
        let wire = RefCell::new(Wire::default());
        transport(&wire).send_command(0x30).unwrap();

        // 24 bits were clocked out and CS is back low afterwards
        assert_eq!(wire.borrow().bits.len(), 24);
        assert!(!wire.borrow().cs_high);
    }
}
