//! DS3231 real-time clock (I2C)
//!
//! Battery-backed RTC with a temperature-compensated oscillator. The
//! seven timekeeping registers at 0x00 hold packed BCD; the status
//! register's oscillator-stop flag records a power loss since the
//! time was last written, which we surface as an error rather than
//! handing back a stale timestamp.

use embedded_hal_async::i2c::I2c;

use super::{from_bcd, to_bcd, DateTime, RtcError};

/// Fixed 7-bit bus address
const ADDRESS: u8 = 0x68;

/// First timekeeping register (seconds)
const REG_SECONDS: u8 = 0x00;

/// Status register holding the oscillator-stop flag
const REG_STATUS: u8 = 0x0F;

/// Oscillator-stop flag bit in the status register
const OSF_BIT: u8 = 0x80;

/// Register count for a full timekeeping read
const CLOCK_REGISTERS: usize = 7;

/// Decode the seven timekeeping registers
///
/// Control bits share the registers with the BCD digits: bit 7 of the
/// seconds register is the clock-halt bit on related parts, bit 6 of
/// the hours register selects 12-hour mode (we configure 24-hour and
/// mask it off), and bit 7 of the month register is the century flag.
pub fn decode_datetime(raw: &[u8; CLOCK_REGISTERS]) -> DateTime {
    let century = if raw[5] & 0x80 != 0 { 2100 } else { 2000 };

    DateTime {
        second: from_bcd(raw[0] & 0x7F),
        minute: from_bcd(raw[1] & 0x7F),
        hour: from_bcd(raw[2] & 0x3F),
        weekday: raw[3] & 0x07,
        day: from_bcd(raw[4] & 0x3F),
        month: from_bcd(raw[5] & 0x1F),
        year: century + from_bcd(raw[6]) as u16,
    }
}

/// Encode a [`DateTime`] into the seven timekeeping registers
pub fn encode_datetime(datetime: &DateTime) -> [u8; CLOCK_REGISTERS] {
    let century = if datetime.year >= 2100 { 0x80 } else { 0x00 };

    [
        to_bcd(datetime.second),
        to_bcd(datetime.minute),
        to_bcd(datetime.hour),
        datetime.weekday & 0x07,
        to_bcd(datetime.day),
        to_bcd(datetime.month) | century,
        to_bcd((datetime.year % 100) as u8),
    ]
}

/// DS3231 driver over an async I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Take ownership of the bus handle
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Read the current date and time
    ///
    /// Fails with [`RtcError::OscillatorStopped`] when the chip lost
    /// power since the time was last set.
    pub async fn read_datetime(&mut self) -> Result<DateTime, RtcError> {
        if self.oscillator_stopped().await? {
            return Err(RtcError::OscillatorStopped);
        }

        let mut raw = [0u8; CLOCK_REGISTERS];
        self.i2c
            .write_read(ADDRESS, &[REG_SECONDS], &mut raw)
            .await
            .map_err(|_| RtcError::Bus)?;

        Ok(decode_datetime(&raw))
    }

    /// Set the date and time and clear the oscillator-stop flag
    pub async fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), RtcError> {
        let registers = encode_datetime(datetime);
        let mut write = [0u8; 1 + CLOCK_REGISTERS];
        write[0] = REG_SECONDS;
        write[1..].copy_from_slice(&registers);

        self.i2c
            .write(ADDRESS, &write)
            .await
            .map_err(|_| RtcError::Bus)?;

        self.clear_oscillator_flag().await
    }

    /// Whether the oscillator stopped since the last time-set
    pub async fn oscillator_stopped(&mut self) -> Result<bool, RtcError> {
        let mut status = [0u8];
        self.i2c
            .write_read(ADDRESS, &[REG_STATUS], &mut status)
            .await
            .map_err(|_| RtcError::Bus)?;

        Ok(status[0] & OSF_BIT != 0)
    }

    async fn clear_oscillator_flag(&mut self) -> Result<(), RtcError> {
        let mut status = [0u8];
        self.i2c
            .write_read(ADDRESS, &[REG_STATUS], &mut status)
            .await
            .map_err(|_| RtcError::Bus)?;

        self.i2c
            .write(ADDRESS, &[REG_STATUS, status[0] & !OSF_BIT])
            .await
            .map_err(|_| RtcError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_masks_control_bits() {
        // Seconds with clock-halt bit set, hours with 12-hour bit set
        let raw = [0x80 | 0x30, 0x59, 0x40 | 0x23, 0x03, 0x28, 0x08, 0x26];
        let datetime = decode_datetime(&raw);

        assert_eq!(
            datetime,
            DateTime {
                year: 2026,
                month: 8,
                day: 28,
                weekday: 3,
                hour: 23,
                minute: 59,
                second: 30,
            }
        );
    }

    #[test]
    fn test_decode_century_flag() {
        let raw = [0x00, 0x00, 0x00, 0x01, 0x01, 0x80 | 0x01, 0x05];
        assert_eq!(decode_datetime(&raw).year, 2105);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let datetime = DateTime {
            year: 2026,
            month: 12,
            day: 31,
            weekday: 4,
            hour: 6,
            minute: 45,
            second: 7,
        };
        assert_eq!(decode_datetime(&encode_datetime(&datetime)), datetime);
    }
}
