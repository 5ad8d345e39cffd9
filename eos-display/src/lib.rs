//! Display controllers and transports for Eos
//!
//! This crate owns everything between the framebuffer and the wire:
//!
//! - The [`Transport`] capability: `send_command`, `send_data`,
//!   `reset` over a narrow serial link
//! - Per-family command enums (no raw hex scattered through drivers)
//! - The SH1106 OLED controller with its init script and the
//!   page/column/data flush protocol
//! - The ST7920 GLCD controller (graphic-mode GDRAM flush)
//! - Two interchangeable transports: hardware SPI with a D/C line,
//!   and the ST7920-style bit-banged serial link
//!
//! Transports are selected at composition time; the rendering code
//! never branches on the physical link.

#![no_std]
#![deny(unsafe_code)]

pub mod bitbang;
pub mod command;
pub mod sh1106;
pub mod spi;
pub mod st7920;
pub mod state;
pub mod transport;

pub use bitbang::BitBangTransport;
pub use sh1106::Sh1106;
pub use spi::SpiTransport;
pub use st7920::St7920;
pub use state::ControllerState;
pub use transport::{Transport, TransportError};
