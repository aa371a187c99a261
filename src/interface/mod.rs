//! Local interface subsystem - character LCD screens + physical buttons.
//!
//! The interface is a hierarchy of state machines: a top-level mode
//! (main menu, test, view history, settings) whose states carry their
//! own sub-state. Every state change goes through
//! [`controller::Interface::handle_event`]; screens are rendered by
//! pure functions in [`render`] and pushed whole to a [`Panel`].
//!
//! ## Components
//!
//! - **Display**: 4×20 character LCD via SPI (see `hw::lcd`)
//! - **Buttons**: 4 tactile switches with debouncing (OK, BACK, UP, DOWN)

pub mod controller;
pub mod cursor;
pub mod render;

#[cfg(feature = "embedded")]
pub mod buttons;

use heapless::String;

use crate::config::{DISPLAY_COLS, DISPLAY_LINES};

/// Physical button events (after debouncing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Ok,
    Back,
    Up,
    Down,
}

/// Top-level interface mode. Each mode owns its sub-state; the pair is
/// the complete interface position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceState {
    /// Test / View History / Settings cursor menu.
    MainMenu,
    /// Running or reviewing a fresh test.
    Test(TestState),
    /// Browsing previously saved tests.
    History(HistoryState),
    /// Adjusting analyzer settings.
    Settings(SettingsState),
}

/// Sub-states of a fresh test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestState {
    /// No battery detected when the test was requested.
    Error,
    /// The blocking load test owns the display; ends on its own.
    Running,
    /// Result menu and its data views.
    Review(ResultView),
    /// "Save results?" prompt after leaving the review.
    SaveConfirm,
    /// Scrolling the 13 history slots for a save target.
    SlotPicker,
    /// "Overwrite old results?" prompt for the picked slot.
    OverwriteConfirm,
    /// Persistent storage failure while saving.
    StorageFault,
}

/// Sub-states of the history browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HistoryState {
    /// Scrolling the 13 saved quad-pack slots.
    ScrollSlots,
    /// Result menu and its data views, backed by the loaded record.
    Review(ResultView),
    /// Persistent storage failure while loading or discarding.
    StorageFault,
}

/// Sub-states of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsState {
    /// Scrolling the settings list.
    Menu,
    /// Editing the target load current digit by digit.
    LoadCurrentEdit,
    /// Editing the voltage display precision.
    PrecisionEdit,
}

/// The shared result-review chain used by both Test and History.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResultView {
    /// Voltages / Health / Conditions / Discard cursor menu.
    Menu,
    /// Unloaded and loaded voltages side by side.
    Voltages,
    /// Letter grades for all four cells.
    Health,
    /// Current, mode, temperature, and date of the test.
    Conditions,
    /// "Permanently discard?" prompt.
    DiscardConfirm,
}

/// One full frame for the character LCD.
pub type ScreenText = [String<DISPLAY_COLS>; 4];

/// An empty frame.
pub fn blank_screen() -> ScreenText {
    [String::new(), String::new(), String::new(), String::new()]
}

/// Display sink: replaces the whole frame, clear + redraw. There is no
/// partial-line update.
pub trait Panel {
    fn show(&mut self, text: &ScreenText);
}

/// Panel that remembers the last frame. Backs the host test suite and
/// doubles as the sink for a desktop simulator.
pub struct BufferPanel {
    pub last: ScreenText,
    pub frames: usize,
}

impl BufferPanel {
    pub fn new() -> Self {
        Self {
            last: blank_screen(),
            frames: 0,
        }
    }

    /// Line `line` (1-based) of the most recent frame.
    pub fn line(&self, line: usize) -> &str {
        debug_assert!((1..=DISPLAY_LINES).contains(&line));
        &self.last[line - 1]
    }
}

impl Default for BufferPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for BufferPanel {
    fn show(&mut self, text: &ScreenText) {
        self.last = text.clone();
        self.frames += 1;
    }
}
