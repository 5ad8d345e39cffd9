//! ESP-01 Wi-Fi modem (AT firmware over UART)
//!
//! The module runs Espressif's stock AT firmware at 115200 baud.
//! Every exchange is a command line terminated with CRLF, answered by
//! echoed text ending in `OK` or `ERROR`. The driver retries failed
//! commands a few times since the module drops characters around its
//! own housekeeping, and bounds every exchange with a deadline.
//!
//! Time comes from the module's built-in SNTP client rather than a
//! weather API: configure it once with [`Esp01::configure_sntp`], then
//! poll [`Esp01::sntp_time`] to discipline the RTC.

use core::fmt::Write as _;

use embassy_time::{with_timeout, Duration, Instant};
use embedded_io_async::{Read, Write};
use heapless::String;

use crate::rtc::DateTime;

/// Response accumulator size; AT replies this firmware parses fit well
/// within it
const RESPONSE_CAP: usize = 128;

/// Per-exchange deadline for ordinary commands
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Joining an access point can take much longer than a local command
const JOIN_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Attempts per command before giving up
const RETRIES: usize = 3;

/// AT exchange outcome markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum AtStatus {
    Ok,
    Error,
}

/// ESP-01 communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EspError {
    /// UART read or write failed
    Serial,
    /// No terminator arrived before the deadline
    Timeout,
    /// The module answered ERROR
    ErrorResponse,
    /// Response or command exceeded the fixed buffer
    Overflow,
    /// Response arrived but could not be parsed
    Parse,
}

/// Scan an accumulating response for its terminator
fn response_status(buffer: &[u8]) -> Option<AtStatus> {
    if ends_with(buffer, b"OK\r\n") {
        Some(AtStatus::Ok)
    } else if ends_with(buffer, b"ERROR\r\n") || ends_with(buffer, b"FAIL\r\n") {
        Some(AtStatus::Error)
    } else {
        None
    }
}

fn ends_with(buffer: &[u8], suffix: &[u8]) -> bool {
    buffer.len() >= suffix.len() && &buffer[buffer.len() - suffix.len()..] == suffix
}

/// Parse a `+CIPSNTPTIME:` response into a [`DateTime`]
///
/// The module answers in asctime layout, for example
/// `+CIPSNTPTIME:Thu Aug 28 20:41:31 2026`. Before the first SNTP
/// sync it reports the epoch year 1970, which is rejected so an
/// unsynced module never disciplines the clock.
pub fn parse_sntp_time(response: &str) -> Option<DateTime> {
    let line = response
        .lines()
        .find_map(|line| line.strip_prefix("+CIPSNTPTIME:"))?;

    let mut fields = line.split_whitespace();
    let weekday = weekday_number(fields.next()?)?;
    let month = month_number(fields.next()?)?;
    let day: u8 = fields.next()?.parse().ok()?;
    let mut clock = fields.next()?.split(':');
    let hour: u8 = clock.next()?.parse().ok()?;
    let minute: u8 = clock.next()?.parse().ok()?;
    let second: u8 = clock.next()?.parse().ok()?;
    let year: u16 = fields.next()?.parse().ok()?;

    if year < 2000 {
        return None;
    }

    Some(DateTime {
        year,
        month,
        day,
        weekday,
        hour,
        minute,
        second,
    })
}

fn month_number(name: &str) -> Option<u8> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS
        .iter()
        .position(|&month| month == name)
        .map(|index| index as u8 + 1)
}

fn weekday_number(name: &str) -> Option<u8> {
    const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    DAYS.iter()
        .position(|&day| day == name)
        .map(|index| index as u8 + 1)
}

/// ESP-01 AT-command client over an async UART
pub struct Esp01<U> {
    uart: U,
}

impl<U: Read + Write> Esp01<U> {
    /// Take ownership of the UART handle
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Probe the module with a bare `AT`
    pub async fn ping(&mut self) -> Result<(), EspError> {
        self.command("AT", DEFAULT_TIMEOUT).await.map(|_| ())
    }

    /// Put the module in station (client) mode
    pub async fn station_mode(&mut self) -> Result<(), EspError> {
        self.command("AT+CWMODE=1", DEFAULT_TIMEOUT).await.map(|_| ())
    }

    /// Join an access point
    pub async fn join_network(&mut self, ssid: &str, password: &str) -> Result<(), EspError> {
        let mut line: String<96> = String::new();
        write!(line, "AT+CWJAP=\"{ssid}\",\"{password}\"").map_err(|_| EspError::Overflow)?;
        self.command(&line, JOIN_TIMEOUT).await.map(|_| ())
    }

    /// Enable the module's SNTP client with a UTC offset in hours
    pub async fn configure_sntp(&mut self, utc_offset_hours: i8) -> Result<(), EspError> {
        let mut line: String<32> = String::new();
        write!(line, "AT+CIPSNTPCFG=1,{utc_offset_hours}").map_err(|_| EspError::Overflow)?;
        self.command(&line, DEFAULT_TIMEOUT).await.map(|_| ())
    }

    /// Query the SNTP-synchronized wall-clock time
    pub async fn sntp_time(&mut self) -> Result<DateTime, EspError> {
        let response = self.command("AT+CIPSNTPTIME?", DEFAULT_TIMEOUT).await?;
        parse_sntp_time(&response).ok_or(EspError::Parse)
    }

    /// Run one AT exchange with retries
    async fn command(
        &mut self,
        line: &str,
        timeout: Duration,
    ) -> Result<String<RESPONSE_CAP>, EspError> {
        let mut last = EspError::Timeout;
        for _ in 0..RETRIES {
            match self.exchange(line, timeout).await {
                Ok(response) => return Ok(response),
                Err(error) => last = error,
            }
        }
        Err(last)
    }

    async fn exchange(
        &mut self,
        line: &str,
        timeout: Duration,
    ) -> Result<String<RESPONSE_CAP>, EspError> {
        self.uart
            .write_all(line.as_bytes())
            .await
            .map_err(|_| EspError::Serial)?;
        self.uart
            .write_all(b"\r\n")
            .await
            .map_err(|_| EspError::Serial)?;

        let deadline = Instant::now() + timeout;
        let mut buffer: heapless::Vec<u8, RESPONSE_CAP> = heapless::Vec::new();

        loop {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .ok_or(EspError::Timeout)?;

            let mut chunk = [0u8; 16];
            let read = with_timeout(remaining, self.uart.read(&mut chunk))
                .await
                .map_err(|_| EspError::Timeout)?
                .map_err(|_| EspError::Serial)?;

            buffer
                .extend_from_slice(&chunk[..read])
                .map_err(|_| EspError::Overflow)?;

            match response_status(&buffer) {
                Some(AtStatus::Ok) => break,
                Some(AtStatus::Error) => return Err(EspError::ErrorResponse),
                None => {}
            }
        }

        let text = core::str::from_utf8(&buffer).map_err(|_| EspError::Parse)?;
        let mut response = String::new();
        response.push_str(text).map_err(|_| EspError::Overflow)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status_detection() {
        assert_eq!(response_status(b"AT\r\n\r\nOK\r\n"), Some(AtStatus::Ok));
        assert_eq!(response_status(b"\r\nERROR\r\n"), Some(AtStatus::Error));
        assert_eq!(response_status(b"+CWJAP:3\r\nFAIL\r\n"), Some(AtStatus::Error));
        assert_eq!(response_status(b"AT+CIPSNTPTIME?\r\n+CIPSN"), None);
        assert_eq!(response_status(b""), None);
    }

    #[test]
    fn test_parse_sntp_time() {
        let response = "AT+CIPSNTPTIME?\r\n+CIPSNTPTIME:Fri Aug 28 20:41:31 2026\r\n\r\nOK\r\n";
        assert_eq!(
            parse_sntp_time(response),
            Some(DateTime {
                year: 2026,
                month: 8,
                day: 28,
                weekday: 5,
                hour: 20,
                minute: 41,
                second: 31,
            })
        );
    }

    #[test]
    fn test_parse_sntp_rejects_unsynced_epoch() {
        let response = "+CIPSNTPTIME:Thu Jan 1 00:00:00 1970\r\n\r\nOK\r\n";
        assert_eq!(parse_sntp_time(response), None);
    }

    #[test]
    fn test_parse_sntp_rejects_garbage() {
        assert_eq!(parse_sntp_time("+CIPSNTPTIME:not a time"), None);
        assert_eq!(parse_sntp_time("\r\nOK\r\n"), None);
    }

    #[test]
    fn test_month_and_weekday_tables() {
        assert_eq!(month_number("Jan"), Some(1));
        assert_eq!(month_number("Dec"), Some(12));
        assert_eq!(month_number("Foo"), None);
        assert_eq!(weekday_number("Mon"), Some(1));
        assert_eq!(weekday_number("Sun"), Some(7));
    }
}
