//! Serial Wi-Fi modem drivers

pub mod esp01;

pub use esp01::Esp01;
