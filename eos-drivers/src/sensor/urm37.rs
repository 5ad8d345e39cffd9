//! URM37 ultrasonic range and temperature sensor (UART mode)
//!
//! The sensor speaks fixed four-byte frames at 9600 baud: command,
//! data high, data low, checksum (the low byte of the sum of the
//! first three). A response echoes the request command; 0xFF in both
//! data bytes means the sensor could not produce a reading.

use embedded_io_async::{Read, Write};

/// Temperature request frame (command 0x11)
pub const TEMPERATURE_REQUEST: [u8; 4] = [0x11, 0x00, 0x00, 0x11];

/// Distance request frame (command 0x22)
pub const DISTANCE_REQUEST: [u8; 4] = [0x22, 0x00, 0x00, 0x22];

/// Marker the sensor returns in both data bytes when it has no reading
const INVALID_MARKER: u8 = 0xFF;

/// URM37 communication and reading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Urm37Error {
    /// UART read or write failed
    Serial,
    /// Response frame checksum did not match
    Checksum,
    /// Response echoed a different command than requested
    CommandMismatch,
    /// Sensor reported it could not produce a reading
    InvalidReading,
}

/// Low byte of the sum of the first three frame bytes
fn frame_checksum(frame: &[u8; 4]) -> u8 {
    frame[0].wrapping_add(frame[1]).wrapping_add(frame[2])
}

/// Validate framing and extract the 16-bit payload
fn decode_frame(frame: &[u8; 4], command: u8) -> Result<u16, Urm37Error> {
    if frame[3] != frame_checksum(frame) {
        return Err(Urm37Error::Checksum);
    }
    if frame[0] != command {
        return Err(Urm37Error::CommandMismatch);
    }
    if frame[1] == INVALID_MARKER && frame[2] == INVALID_MARKER {
        return Err(Urm37Error::InvalidReading);
    }

    Ok(((frame[1] as u16) << 8) | frame[2] as u16)
}

/// Decode a temperature response to tenths of a degree Celsius
///
/// The payload is a 12-bit two's complement value in 0.1 degree
/// steps, so readings run -204.8..=204.7 degrees.
pub fn decode_temperature(frame: &[u8; 4]) -> Result<i16, Urm37Error> {
    let raw = decode_frame(frame, TEMPERATURE_REQUEST[0])? & 0x0FFF;

    if raw > 0x7FF {
        Ok(raw as i16 - 0x1000)
    } else {
        Ok(raw as i16)
    }
}

/// Decode a distance response to whole centimeters
pub fn decode_distance(frame: &[u8; 4]) -> Result<u16, Urm37Error> {
    decode_frame(frame, DISTANCE_REQUEST[0])
}

/// URM37 driver over an async UART
pub struct Urm37<U> {
    uart: U,
}

impl<U: Read + Write> Urm37<U> {
    /// Take ownership of the UART handle
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    async fn exchange(&mut self, request: &[u8; 4]) -> Result<[u8; 4], Urm37Error> {
        self.uart
            .write_all(request)
            .await
            .map_err(|_| Urm37Error::Serial)?;

        let mut response = [0u8; 4];
        self.uart
            .read_exact(&mut response)
            .await
            .map_err(|_| Urm37Error::Serial)?;

        Ok(response)
    }

    /// Measure ambient temperature in tenths of a degree Celsius
    pub async fn read_celsius_x10(&mut self) -> Result<i16, Urm37Error> {
        let response = self.exchange(&TEMPERATURE_REQUEST).await?;
        decode_temperature(&response)
    }

    /// Measure distance to the nearest obstacle in centimeters
    pub async fn read_distance_cm(&mut self) -> Result<u16, Urm37Error> {
        let response = self.exchange(&DISTANCE_REQUEST).await?;
        decode_distance(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_frames_carry_valid_checksums() {
        assert_eq!(frame_checksum(&TEMPERATURE_REQUEST), TEMPERATURE_REQUEST[3]);
        assert_eq!(frame_checksum(&DISTANCE_REQUEST), DISTANCE_REQUEST[3]);
    }

    #[test]
    fn test_decode_positive_temperature() {
        // 23.5 degrees = 235 tenths = 0x0EB
        let frame = [0x11, 0x00, 0xEB, 0x11u8.wrapping_add(0xEB)];
        assert_eq!(decode_temperature(&frame), Ok(235));
    }

    #[test]
    fn test_decode_negative_temperature() {
        // -5.0 degrees = -50 tenths = 0xFCE in 12-bit two's complement
        let frame = [0x11, 0x0F, 0xCE, 0x11u8.wrapping_add(0x0F).wrapping_add(0xCE)];
        assert_eq!(decode_temperature(&frame), Ok(-50));
    }

    #[test]
    fn test_decode_distance() {
        // 300 cm = 0x012C
        let frame = [0x22, 0x01, 0x2C, 0x22u8.wrapping_add(0x01).wrapping_add(0x2C)];
        assert_eq!(decode_distance(&frame), Ok(300));
    }

    #[test]
    fn test_invalid_marker_rejected() {
        let frame = [0x22, 0xFF, 0xFF, 0x22u8.wrapping_add(0xFF).wrapping_add(0xFF)];
        assert_eq!(decode_distance(&frame), Err(Urm37Error::InvalidReading));
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let frame = [0x22, 0x01, 0x2C, 0x00];
        assert_eq!(decode_distance(&frame), Err(Urm37Error::Checksum));
    }

    #[test]
    fn test_command_echo_mismatch_rejected() {
        // A temperature echo handed to the distance decoder
        let frame = [0x11, 0x00, 0xEB, 0x11u8.wrapping_add(0xEB)];
        assert_eq!(decode_distance(&frame), Err(Urm37Error::CommandMismatch));
    }
}
