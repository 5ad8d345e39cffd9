//! Real-time clock drivers

pub mod ds3231;

pub use ds3231::Ds3231;

/// Calendar date and wall-clock time, 24-hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Full year, e.g. 2026
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 1-7, device-defined start of week
    pub weekday: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

/// RTC communication and integrity errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// I2C transaction failed
    Bus,
    /// The oscillator stopped since the time was last set; the
    /// reported time is not trustworthy
    OscillatorStopped,
}

/// Decode a packed BCD byte
pub(crate) fn from_bcd(value: u8) -> u8 {
    value - 6 * (value >> 4)
}

/// Encode to packed BCD; caller guarantees `value < 100`
pub(crate) fn to_bcd(value: u8) -> u8 {
    value + 6 * (value / 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_round_trip() {
        for value in 0..100 {
            assert_eq!(from_bcd(to_bcd(value)), value);
        }
    }

    #[test]
    fn test_bcd_known_values() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(to_bcd(0), 0x00);
        assert_eq!(from_bcd(0x23), 23);
        assert_eq!(from_bcd(0x31), 31);
    }
}
