//! Environment sensor drivers

pub mod urm37;

pub use urm37::Urm37;
