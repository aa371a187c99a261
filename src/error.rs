//! Unified error type for quadpack.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging when the
//! `defmt` feature is enabled.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // History storage
    /// Flash read/write/erase failed.
    Storage,

    /// A stored record image failed to decode (wrong length or garbage).
    BadRecord,

    // UI / Display
    /// SPI transaction to the LCD failed.
    Display,

    // Measurement
    /// The ADC could not complete a conversion.
    Measurement,
}
