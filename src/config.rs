//! Application-wide constants and compile-time configuration.
//!
//! All hardware scaling factors, timing parameters, and menu geometry
//! live here so they can be tuned in one place.

// Display

/// Character LCD geometry: 4 lines of 20 characters.
pub const DISPLAY_LINES: usize = 4;
pub const DISPLAY_COLS: usize = 20;

// Menu geometry (lines the cursor can rest on)

/// Main menu: Test / View History / Settings.
pub const MAIN_MENU_LINES: u8 = 3;

/// Result menu: Voltages / Health / Conditions / Discard.
pub const RESULT_MENU_LINES: u8 = 4;

/// Settings menu: Mode / Load Current / Voltage Precision.
/// (Line 4 shows the battery type but is not selectable.)
pub const SETTINGS_MENU_LINES: u8 = 3;

/// Load-current editor: one line per BCD digit, line 4 shows units.
pub const CURRENT_EDIT_LINES: u8 = 3;

/// Slot lists fill the whole display; the marker pins inside this
/// window while the selection wraps over all 13 slots.
pub const SLOT_LIST_LINES: u8 = 4;

// Measurement

/// ADC reference voltage (volts).
pub const ADC_VREF_VOLTS: f32 = 3.3;

/// Single-ended conversion resolution (12 bits).
pub const ADC_SINGLE_ENDED_COUNTS: f32 = 4096.0;

/// Differential conversions lose one bit to the sign.
pub const ADC_DIFFERENTIAL_COUNTS: f32 = 2048.0;

/// Voltage divider ratio on the battery cell taps.
pub const BATTERY_DIVIDER_RATIO: f32 = 5.0;

/// Voltage divider ratio on the current-sense amplifier output.
pub const CURRENT_DIVIDER_RATIO: f32 = 6.0;

/// Shunt resistance used for load-current sensing (80 micro-ohms).
pub const SHUNT_RESISTANCE_OHMS: f32 = 0.00008;

/// Gain of the current-sense instrumentation amplifier.
pub const AMP_GAIN: f32 = 30.0;

/// Pack voltages below this mean no battery is connected (volts).
pub const NO_BATTERY_THRESHOLD_VOLTS: f32 = 0.1;

/// Readings below this are amplifier noise and report as 0 A.
pub const LOAD_CURRENT_FLOOR_AMPS: f32 = 10.0;

/// The loaded measurement ends once the operator has released the
/// carbon pile and the current falls below this bound (amps).
pub const LOAD_RELEASE_THRESHOLD_AMPS: f32 = 200.0;

/// Factory default for the target load current (amps).
pub const DEFAULT_TARGET_LOAD_AMPS: u16 = 500;

/// Hard ceiling the load-current setting may never exceed (amps).
pub const MAX_TARGET_LOAD_AMPS: u16 = 500;

/// Delay between load-current polls during the ramp (ms).
pub const RAMP_POLL_MS: u64 = 50;

/// Fan duty cycle while a test is drawing load current (percent).
pub const FAN_TEST_DUTY_PERCENT: u8 = 75;

/// Buzzer on/off half-period while waiting for load release (ms).
pub const BUZZER_BEEP_MS: u64 = 1000;

// History storage

/// Number of quad-pack history slots.
pub const HISTORY_SLOTS: u8 = 13;

/// Bounded retries for a failed history write before the fault
/// screen is shown.
pub const STORE_RETRY_LIMIT: u8 = 3;

/// Flash page index where history storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 254;

/// Number of flash pages reserved for history storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button OK      → P0.11
//   Button BACK    → P0.12
//   Button UP      → P0.24
//   Button DOWN    → P0.25
//   LCD SPI SCK    → P0.26
//   LCD SPI MOSI   → P0.27
//   LCD /CS        → P0.06
//   Buzzer         → P0.07
//   Fan PWM        → P0.08
//   Stepper STEP   → P1.01
//   Stepper DIR    → P1.02
//   Cell taps      → AIN0..AIN3, current sense → AIN4

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Lock-out window after an event is fully handled, before the next
/// press is accepted (ms).
pub const HANDLER_DEBOUNCE_MS: u64 = 300;

/// Voltage precision ceiling (decimal places).
pub const MAX_VOLTAGE_PRECISION: u8 = 3;
