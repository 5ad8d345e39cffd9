//! Transport capability
//!
//! Abstraction over the physical command/data serial link to a
//! display controller chip. Two implementations exist in this crate
//! (hardware SPI, bit-banged serial); both satisfy the same contract
//! and are swappable at composition time.

/// Byte-level link to a display controller
///
/// The command/data distinction is a side channel asserted immediately
/// before each transmitted byte; it never reorders bytes. Busy-waits
/// while the link drains are the implementation's concern, and the
/// implementation must guarantee eventual readiness - the controllers
/// above do not time out.
pub trait Transport {
    /// Transmission error
    type Error;

    /// Transmit one byte with the command/data selector in command mode
    fn send_command(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Transmit one byte with the command/data selector in data mode
    fn send_data(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Run the fixed timed hardware reset sequence
    fn reset(&mut self) -> Result<(), Self::Error>;
}

/// Error for transports assembled from bus and pin pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Serial bus write failed
    Bus,
    /// Control pin toggle failed
    Pin,
}
