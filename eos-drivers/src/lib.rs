//! Hardware driver implementations
//!
//! Concrete drivers for the peripherals around the display:
//!
//! - Real-time clock (DS3231 over I2C)
//! - Ultrasonic range/temperature sensor (URM37 over UART)
//! - Serial Wi-Fi modem (ESP-01 AT firmware over UART)
//!
//! Wire formats are built and parsed by pure functions so the framing
//! logic is testable without hardware; the driver structs own the bus
//! handles and the retry/timeout policy.

#![no_std]
#![deny(unsafe_code)]

pub mod rtc;
pub mod sensor;
pub mod wifi;
