//! Adjustable analyzer settings: test mode, target load current, and
//! voltage display precision.
//!
//! The load current is edited one BCD digit at a time (hundreds, tens,
//! ones on their own display lines) and committed as a whole when the
//! editor is left. The hundreds digit caps the value so the target can
//! never exceed [`MAX_TARGET_LOAD_AMPS`].

use crate::config::{DEFAULT_TARGET_LOAD_AMPS, MAX_TARGET_LOAD_AMPS, MAX_VOLTAGE_PRECISION};
use crate::record::TestMode;

/// BCD digits of the target load current, one per editor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentDigits {
    pub hundreds: u8,
    pub tens: u8,
    pub ones: u8,
}

impl CurrentDigits {
    fn from_amps(amps: u16) -> Self {
        Self {
            hundreds: (amps / 100 % 10) as u8,
            tens: (amps / 10 % 10) as u8,
            ones: (amps % 10) as u8,
        }
    }

    fn to_amps(self) -> u16 {
        u16::from(self.hundreds) * 100 + u16::from(self.tens) * 10 + u16::from(self.ones)
    }
}

/// Analyzer settings adjusted from the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Manual knob or automated stepper ramp.
    pub mode: TestMode,
    /// Committed target load current (amps).
    pub target_amps: u16,
    /// Digits being edited; committed to `target_amps` on leaving the
    /// editor.
    pub digits: CurrentDigits,
    /// Decimal places shown for voltage readings.
    pub precision: u8,
}

impl Settings {
    pub const fn new() -> Self {
        Self {
            mode: TestMode::Manual,
            target_amps: DEFAULT_TARGET_LOAD_AMPS,
            digits: CurrentDigits {
                hundreds: (DEFAULT_TARGET_LOAD_AMPS / 100 % 10) as u8,
                tens: (DEFAULT_TARGET_LOAD_AMPS / 10 % 10) as u8,
                ones: (DEFAULT_TARGET_LOAD_AMPS % 10) as u8,
            },
            precision: MAX_VOLTAGE_PRECISION,
        }
    }

    /// Toggle between manual and automated testing.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            TestMode::Manual => TestMode::Automated,
            TestMode::Automated => TestMode::Manual,
        };
    }

    /// Increment the digit on editor line 1-3, wrapping within its
    /// range. The hundreds digit wraps at the value that would push
    /// the target past the ceiling; whenever the hundreds digit sits
    /// at the ceiling the lower digits reset instead of incrementing.
    pub fn bump_digit(&mut self, line: u8) {
        let cap_hundreds = (MAX_TARGET_LOAD_AMPS / 100) as u8;
        let d = &mut self.digits;
        match line {
            1 => d.hundreds = if d.hundreds >= cap_hundreds { 0 } else { d.hundreds + 1 },
            2 => {
                d.tens = if d.hundreds >= cap_hundreds || d.tens >= 9 {
                    0
                } else {
                    d.tens + 1
                }
            }
            3 => {
                d.ones = if d.hundreds >= cap_hundreds || d.ones >= 9 {
                    0
                } else {
                    d.ones + 1
                }
            }
            _ => {}
        }
    }

    /// Commit the edited digits to the target, clamped to the ceiling.
    pub fn commit_digits(&mut self) {
        self.target_amps = self.digits.to_amps().min(MAX_TARGET_LOAD_AMPS);
        self.digits = CurrentDigits::from_amps(self.target_amps);
    }

    /// Step the voltage precision, wrapping past the ceiling back to 0.
    pub fn bump_precision(&mut self) {
        self.precision = if self.precision >= MAX_VOLTAGE_PRECISION {
            0
        } else {
            self.precision + 1
        };
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::new();
        assert_eq!(s.mode, TestMode::Manual);
        assert_eq!(s.target_amps, 500);
        assert_eq!(s.digits, CurrentDigits { hundreds: 5, tens: 0, ones: 0 });
        assert_eq!(s.precision, 3);
    }

    #[test]
    fn mode_toggles_both_ways() {
        let mut s = Settings::new();
        s.toggle_mode();
        assert_eq!(s.mode, TestMode::Automated);
        s.toggle_mode();
        assert_eq!(s.mode, TestMode::Manual);
    }

    #[test]
    fn hundreds_digit_wraps_at_cap() {
        let mut s = Settings::new();
        assert_eq!(s.digits.hundreds, 5);
        s.bump_digit(1);
        assert_eq!(s.digits.hundreds, 0);
        s.bump_digit(1);
        assert_eq!(s.digits.hundreds, 1);
    }

    #[test]
    fn lower_digits_reset_while_hundreds_at_cap() {
        let mut s = Settings::new();
        // hundreds = 5: tens/ones may only reset to 0.
        s.digits.tens = 4;
        s.bump_digit(2);
        assert_eq!(s.digits.tens, 0);
        s.bump_digit(3);
        assert_eq!(s.digits.ones, 0);
    }

    #[test]
    fn tens_and_ones_wrap_past_nine() {
        let mut s = Settings::new();
        s.digits.hundreds = 2;
        s.digits.tens = 9;
        s.digits.ones = 9;
        s.bump_digit(2);
        s.bump_digit(3);
        assert_eq!(s.digits.tens, 0);
        assert_eq!(s.digits.ones, 0);
    }

    #[test]
    fn commit_converts_bcd_and_clamps() {
        let mut s = Settings::new();
        s.digits = CurrentDigits { hundreds: 3, tens: 2, ones: 1 };
        s.commit_digits();
        assert_eq!(s.target_amps, 321);

        s.digits = CurrentDigits { hundreds: 5, tens: 9, ones: 9 };
        s.commit_digits();
        assert_eq!(s.target_amps, 500);
    }

    #[test]
    fn precision_wraps_at_ceiling() {
        let mut s = Settings::new();
        assert_eq!(s.precision, 3);
        s.bump_precision();
        assert_eq!(s.precision, 0);
        s.bump_precision();
        assert_eq!(s.precision, 1);
    }
}
