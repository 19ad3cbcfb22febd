#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Calibration data types shared by all converters.
pub mod calibration;

/// I/O for third-party calibration formats.
pub mod io;

/// Rotation conversion utilities.
pub mod transforms;
