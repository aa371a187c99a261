//! Pure screen rendering - one function per screen, returning the full
//! 4×20 frame. Nothing here touches hardware; the frame is handed to a
//! [`Panel`](crate::interface::Panel) for transmission.
//!
//! The cursor marker `<-` always sits at the right edge of its line.

use core::fmt::Write;

use heapless::String;

use crate::config::DISPLAY_COLS;
use crate::grading::grade_cells;
use crate::interface::cursor::{nth_from, Cursor};
use crate::interface::{blank_screen, ScreenText};
use crate::record::{TestMode, TestRecord};
use crate::settings::{CurrentDigits, Settings};

/// Column where the cursor marker starts.
const CURSOR_COL: usize = DISPLAY_COLS - 2;

fn line(s: &str) -> String<DISPLAY_COLS> {
    let mut out = String::new();
    for c in s.chars().take(DISPLAY_COLS) {
        let _ = out.push(c);
    }
    out
}

/// Splice the `<-` marker onto the tail of the cursor line.
fn with_cursor(text: &mut ScreenText, cursor_line: u8) {
    let s = &mut text[usize::from(cursor_line) - 1];
    s.truncate(CURSOR_COL);
    while s.len() < CURSOR_COL {
        let _ = s.push(' ');
    }
    let _ = s.push('<');
    let _ = s.push('-');
}

pub fn main_menu(cursor: &Cursor) -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Test");
    text[1] = line("View History");
    text[2] = line("Settings");
    with_cursor(&mut text, cursor.line());
    text
}

/// The 13 quad-pack slots, windowed so the selected slot sits on the
/// cursor line with its circular neighbours above and below.
pub fn slot_list(selected: u8, cursor: &Cursor) -> ScreenText {
    let mut text = blank_screen();
    for display_line in 1..=4u8 {
        let offset = display_line as i8 - cursor.line() as i8;
        let slot = nth_from(selected, offset);
        let mut s = String::new();
        let _ = write!(s, "Quad pack {}", slot + 1);
        text[usize::from(display_line) - 1] = s;
    }
    with_cursor(&mut text, cursor.line());
    text
}

pub fn result_menu(cursor: &Cursor) -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Voltage Readings");
    text[1] = line("Health Ratings");
    text[2] = line("Test Conditions");
    text[3] = line("Discard Results");
    with_cursor(&mut text, cursor.line());
    text
}

/// Unloaded voltages on the left, loaded on the right, at the
/// configured precision.
pub fn voltage_view(record: &TestRecord, precision: u8) -> ScreenText {
    let mut text = blank_screen();
    let p = usize::from(precision);
    for cell in 0..4 {
        let mut s = String::new();
        let _ = write!(
            s,
            "B{n}: {unl:.p$}  B{n}: {ld:.p$}",
            n = cell + 1,
            unl = record.unloaded_volts[cell],
            ld = record.loaded_volts[cell],
        );
        text[cell] = s;
    }
    text
}

pub fn health_view(record: &TestRecord) -> ScreenText {
    let mut text = blank_screen();
    let grades = grade_cells(&record.loaded_volts);
    for cell in 0..4 {
        let mut s = String::new();
        let _ = write!(s, "B{}: {}", cell + 1, grades[cell]);
        text[cell] = s;
    }
    text
}

pub fn conditions_view(record: &TestRecord) -> ScreenText {
    let mut text = blank_screen();
    let _ = write!(text[0], "Load Current: {}A", record.max_load_amps);
    let mode = match record.mode {
        TestMode::Manual => "Mode: Manual",
        TestMode::Automated => "Mode: Automated",
    };
    text[1] = line(mode);
    let _ = write!(text[2], "Amb Temp: {}C", record.ambient_temp_c);
    let _ = write!(
        text[3],
        "Date: 20{:02}/{}/{}",
        record.date.year, record.date.month, record.date.day
    );
    text
}

pub fn discard_confirm() -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Press OK to");
    text[1] = line("permanently discard");
    text[2] = line("test results, press");
    text[3] = line("BACK to view results");
    text
}

pub fn save_confirm() -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Save results?");
    text[1] = line("Press OK");
    text[2] = line("Otherwise press BACK");
    text
}

pub fn overwrite_confirm(slot: u8) -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Press OK to");
    let _ = write!(text[1], "overwrite pack {}", slot + 1);
    text[2] = line("Press BACK to pick");
    text[3] = line("another entry");
    text
}

pub fn no_battery_error() -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Failed! Ensure");
    text[1] = line("Proper Connection");
    text[2] = line("Press OK or BACK");
    text[3] = line("to Continue");
    text
}

pub fn storage_fault() -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Storage fault!");
    text[1] = line("History unavailable");
    text[2] = line("Press OK or BACK");
    text[3] = line("to Continue");
    text
}

pub fn settings_menu(settings: &Settings, cursor: &Cursor) -> ScreenText {
    let mut text = blank_screen();
    let mode = match settings.mode {
        TestMode::Manual => "Mode: Manual",
        TestMode::Automated => "Mode: Automated",
    };
    text[0] = line(mode);
    let _ = write!(text[1], "Load Current:{}A", settings.target_amps);
    let _ = write!(text[2], "Voltage DP:{}", settings.precision);
    text[3] = line("Battery Type: Li-Ion");
    with_cursor(&mut text, cursor.line());
    text
}

/// One BCD digit per line, units on line 4.
pub fn load_current_edit(digits: &CurrentDigits, cursor: &Cursor) -> ScreenText {
    let mut text = blank_screen();
    let _ = write!(text[0], "{}", digits.hundreds);
    let _ = write!(text[1], "{}", digits.tens);
    let _ = write!(text[2], "{}", digits.ones);
    text[3] = line("Amps");
    with_cursor(&mut text, cursor.line());
    text
}

pub fn precision_edit(precision: u8) -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Voltage Precision:");
    let _ = write!(text[1], "{} decimal points", precision);
    text[2] = line("OK: change");
    text[3] = line("BACK: done");
    text
}

/// Live prompt while the load ramps toward the target.
pub fn ramp_prompt(amps: f32, mode: TestMode) -> ScreenText {
    let mut text = blank_screen();
    match mode {
        TestMode::Manual => {
            text[0] = line("Rotate Knob until");
            text[1] = line("beeping sound is");
            text[2] = line("heard...");
        }
        TestMode::Automated => {
            text[0] = line("Ramping load to");
            text[1] = line("target current...");
        }
    }
    let _ = write!(text[3], "Load Current: {:.1}A", amps);
    text
}

/// Live prompt while waiting for the load to be released.
pub fn release_prompt(amps: f32, mode: TestMode) -> ScreenText {
    let mut text = blank_screen();
    text[0] = line("Test complete...");
    match mode {
        TestMode::Manual => {
            text[1] = line("Rotate Knob until");
            text[2] = line("beeping stops...");
        }
        TestMode::Automated => {
            text[1] = line("Unwinding load...");
        }
    }
    let _ = write!(text[3], "Load Current: {:.1}A", amps);
    text
}
