//! Test records - the result of one completed quad-pack load test.
//!
//! A record is always produced and persisted as a whole: the four
//! unloaded and four loaded cell voltages come from the same test
//! cycle, never mixed across tests.
//!
//! Storage layout (39 bytes, little-endian):
//!   - 4 × f32 unloaded cell voltages (16 bytes)
//!   - 4 × f32 loaded cell voltages (16 bytes)
//!   - u16 max load current in amps (2 bytes)
//!   - u8 test mode (1 byte)
//!   - u8 ambient temperature in °C (1 byte)
//!   - u8 year (offset from 2000), u8 month, u8 day (3 bytes)
//!
//! 13 slots × 39 bytes = 507 bytes, inside the 512-byte budget
//! reserved for history storage.

use crate::error::Error;

/// Serialized size of one [`TestRecord`].
pub const RECORD_BYTES: usize = 39;

/// Whether the load was ramped by hand (carbon-pile knob) or by the
/// stepper motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestMode {
    Manual,
    Automated,
}

impl TestMode {
    fn to_byte(self) -> u8 {
        match self {
            TestMode::Manual => 0x00,
            TestMode::Automated => 0x01,
        }
    }

    fn from_byte(b: u8) -> Self {
        match b {
            0x01 => TestMode::Automated,
            _ => TestMode::Manual,
        }
    }
}

/// Date of a test, year stored as an offset from 2000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestDate {
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

/// One completed quad-pack test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestRecord {
    /// Cell voltages B1..B4 before the load was applied (volts).
    pub unloaded_volts: [f32; 4],
    /// Cell voltages B1..B4 at the target load current (volts).
    pub loaded_volts: [f32; 4],
    /// Highest load current drawn during the test (amps).
    pub max_load_amps: u16,
    /// How the load was ramped.
    pub mode: TestMode,
    /// Ambient temperature during the test (°C).
    pub ambient_temp_c: u8,
    /// Date of the test.
    pub date: TestDate,
}

impl TestRecord {
    /// The empty sentinel stored in unused history slots.
    pub const fn zeroed() -> Self {
        Self {
            unloaded_volts: [0.0; 4],
            loaded_volts: [0.0; 4],
            max_load_amps: 0,
            mode: TestMode::Manual,
            ambient_temp_c: 0,
            date: TestDate {
                year: 0,
                month: 0,
                day: 0,
            },
        }
    }

    /// True for the zeroed sentinel (no real test ever reads 0 V on
    /// every cell).
    pub fn is_empty(&self) -> bool {
        self.unloaded_volts.iter().all(|v| *v == 0.0)
            && self.loaded_volts.iter().all(|v| *v == 0.0)
            && self.max_load_amps == 0
    }

    /// Serialize into `buf`. Returns the number of bytes written, or 0
    /// if the buffer is too small.
    pub fn encode(&self, buf: &mut [u8]) -> usize {
        if buf.len() < RECORD_BYTES {
            return 0;
        }

        let mut offset = 0;
        for v in self.unloaded_volts.iter().chain(self.loaded_volts.iter()) {
            buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
            offset += 4;
        }
        buf[offset..offset + 2].copy_from_slice(&self.max_load_amps.to_le_bytes());
        offset += 2;
        buf[offset] = self.mode.to_byte();
        buf[offset + 1] = self.ambient_temp_c;
        buf[offset + 2] = self.date.year;
        buf[offset + 3] = self.date.month;
        buf[offset + 4] = self.date.day;

        RECORD_BYTES
    }

    /// Deserialize from a stored image.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        if data.len() < RECORD_BYTES {
            return Err(Error::BadRecord);
        }

        let mut volts = [0.0f32; 8];
        for (i, v) in volts.iter_mut().enumerate() {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&data[i * 4..i * 4 + 4]);
            *v = f32::from_le_bytes(bytes);
        }

        let mut unloaded_volts = [0.0f32; 4];
        let mut loaded_volts = [0.0f32; 4];
        unloaded_volts.copy_from_slice(&volts[..4]);
        loaded_volts.copy_from_slice(&volts[4..]);

        Ok(Self {
            unloaded_volts,
            loaded_volts,
            max_load_amps: u16::from_le_bytes([data[32], data[33]]),
            mode: TestMode::from_byte(data[34]),
            ambient_temp_c: data[35],
            date: TestDate {
                year: data[36],
                month: data[37],
                day: data[38],
            },
        })
    }
}

impl Default for TestRecord {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TestRecord {
        TestRecord {
            unloaded_volts: [3.012, 3.005, 2.998, 3.020],
            loaded_volts: [2.801, 2.790, 2.755, 2.810],
            max_load_amps: 502,
            mode: TestMode::Automated,
            ambient_temp_c: 23,
            date: TestDate {
                year: 25,
                month: 3,
                day: 23,
            },
        }
    }

    #[test]
    fn record_encode_decode_roundtrip() {
        let original = sample();
        let mut buf = [0u8; RECORD_BYTES];
        assert_eq!(original.encode(&mut buf), RECORD_BYTES);

        let parsed = TestRecord::decode(&buf).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn record_encode_buffer_too_small() {
        let mut buf = [0u8; RECORD_BYTES - 1];
        assert_eq!(sample().encode(&mut buf), 0);
    }

    #[test]
    fn record_decode_short_image_fails() {
        assert_eq!(TestRecord::decode(&[0u8; 10]), Err(Error::BadRecord));
    }

    #[test]
    fn record_zeroed_is_empty() {
        assert!(TestRecord::zeroed().is_empty());
        assert!(!sample().is_empty());
    }

    #[test]
    fn record_mode_byte_roundtrip() {
        assert_eq!(TestMode::from_byte(TestMode::Manual.to_byte()), TestMode::Manual);
        assert_eq!(
            TestMode::from_byte(TestMode::Automated.to_byte()),
            TestMode::Automated
        );
        // Unknown bytes fall back to manual rather than failing the decode.
        assert_eq!(TestMode::from_byte(0x7F), TestMode::Manual);
    }
}
