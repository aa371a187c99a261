//! 4×20 character LCD on SPI.
//!
//! The panel speaks a serial character protocol: `|` enters command
//! mode, `-` clears the display and homes the cursor, and every other
//! byte is printed at the cursor. Chip select frames each byte and a
//! short settle delay follows it.
//!
//! Generic over the HAL's SPI bus, chip-select pin, and delay so the
//! driver carries no chip-specific types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config::DISPLAY_COLS;
use crate::error::Error;
use crate::interface::{Panel, ScreenText};

/// Enter command mode.
const CMD_MODE: u8 = b'|';

/// Clear display and home the cursor (valid in command mode).
const CMD_CLEAR: u8 = b'-';

/// Settle time after each transmitted byte (µs).
const BYTE_SETTLE_US: u32 = 100;

pub struct CharacterLcd<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
}

impl<SPI, CS, D> CharacterLcd<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    /// Initialise the panel: power-up delay, then clear.
    pub fn new(spi: SPI, cs: CS, mut delay: D) -> Result<Self, Error> {
        delay.delay_ms(10);
        let mut lcd = Self { spi, cs, delay };
        lcd.clear()?;
        Ok(lcd)
    }

    /// Transmit one byte framed by chip select.
    fn send(&mut self, byte: u8) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Display)?;
        let result = self.spi.write(&[byte]);
        self.cs.set_high().map_err(|_| Error::Display)?;
        result.map_err(|_| Error::Display)?;
        self.delay.delay_us(BYTE_SETTLE_US);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), Error> {
        self.send(CMD_MODE)?;
        self.send(CMD_CLEAR)
    }

    /// Clear, then stream all 80 characters, padding short lines.
    fn write_frame(&mut self, text: &ScreenText) -> Result<(), Error> {
        self.clear()?;
        for line in text.iter() {
            let bytes = line.as_bytes();
            for col in 0..DISPLAY_COLS {
                self.send(bytes.get(col).copied().unwrap_or(b' '))?;
            }
        }
        Ok(())
    }
}

impl<SPI, CS, D> Panel for CharacterLcd<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    fn show(&mut self, text: &ScreenText) {
        if self.write_frame(text).is_err() {
            defmt::warn!("LCD frame write failed");
        }
    }
}
