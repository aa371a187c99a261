//! The local interface controller - the single place interface state
//! changes.
//!
//! [`Interface`] owns the complete interface context (active state,
//! cursor, selected slot, working record, settings) and exposes one
//! entry point, [`Interface::handle_event`]. Each event runs to
//! completion: state read, collaborator actions, state write, full
//! screen redraw. Events that make no sense in the current state are
//! no-ops that re-render the unchanged screen.
//!
//! Two hard rules hold everywhere:
//! - every BACK from a leaf view returns to its enclosing menu;
//! - every terminal confirm (save, overwrite, discard) lands on the
//!   main menu with cursor line 1 and slot 0.

use crate::config::{
    CURRENT_EDIT_LINES, MAIN_MENU_LINES, RESULT_MENU_LINES, SETTINGS_MENU_LINES, SLOT_LIST_LINES,
};
use crate::history::{store_with_retry, HistoryStore};
use crate::interface::cursor::{Cursor, Direction, SlotCursor};
use crate::interface::render;
use crate::interface::{
    ButtonEvent, HistoryState, InterfaceState, Panel, ResultView, ScreenText, SettingsState,
    TestState,
};
use crate::measure::LoadTester;
use crate::record::TestRecord;
use crate::settings::Settings;

/// The complete mutable interface context. Lives for the whole power
/// cycle; nothing else mutates interface state.
pub struct Interface {
    state: InterfaceState,
    cursor: Cursor,
    slots: SlotCursor,
    /// The record being reviewed: fresh from a test, or loaded from a
    /// history slot.
    record: TestRecord,
    /// Which slot `record` was loaded from, if any. A discard writes
    /// the zeroed record back there.
    source_slot: Option<u8>,
    settings: Settings,
}

impl Interface {
    pub const fn new() -> Self {
        Self {
            state: InterfaceState::MainMenu,
            cursor: Cursor::new(),
            slots: SlotCursor::new(),
            record: TestRecord::zeroed(),
            source_slot: None,
            settings: Settings::new(),
        }
    }

    pub fn state(&self) -> InterfaceState {
        self.state
    }

    pub fn cursor_line(&self) -> u8 {
        self.cursor.line()
    }

    pub fn selected_slot(&self) -> u8 {
        self.slots.slot()
    }

    pub fn record(&self) -> &TestRecord {
        &self.record
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch one button event and redraw. The only way interface
    /// state changes.
    pub fn handle_event(
        &mut self,
        event: ButtonEvent,
        tester: &mut impl LoadTester,
        history: &mut impl HistoryStore,
        panel: &mut impl Panel,
    ) {
        match self.state {
            InterfaceState::MainMenu => self.on_main_menu(event, tester, panel),
            InterfaceState::Test(state) => self.on_test(state, event, history),
            InterfaceState::History(state) => self.on_history(state, event, history),
            InterfaceState::Settings(state) => self.on_settings(state, event),
        }
        panel.show(&self.render_current());
    }

    /// The frame for the current state. Pure; also used for the
    /// power-on draw.
    pub fn render_current(&self) -> ScreenText {
        match self.state {
            InterfaceState::MainMenu => render::main_menu(&self.cursor),
            InterfaceState::Test(state) => match state {
                TestState::Error => render::no_battery_error(),
                // Running draws its own frames; this is only reachable
                // if rendered mid-test.
                TestState::Running => render::ramp_prompt(0.0, self.settings.mode),
                TestState::Review(view) => self.render_review(view),
                TestState::SaveConfirm => render::save_confirm(),
                TestState::SlotPicker => render::slot_list(self.slots.slot(), &self.cursor),
                TestState::OverwriteConfirm => render::overwrite_confirm(self.slots.slot()),
                TestState::StorageFault => render::storage_fault(),
            },
            InterfaceState::History(state) => match state {
                HistoryState::ScrollSlots => render::slot_list(self.slots.slot(), &self.cursor),
                HistoryState::Review(view) => self.render_review(view),
                HistoryState::StorageFault => render::storage_fault(),
            },
            InterfaceState::Settings(state) => match state {
                SettingsState::Menu => render::settings_menu(&self.settings, &self.cursor),
                SettingsState::LoadCurrentEdit => {
                    render::load_current_edit(&self.settings.digits, &self.cursor)
                }
                SettingsState::PrecisionEdit => render::precision_edit(self.settings.precision),
            },
        }
    }

    fn render_review(&self, view: ResultView) -> ScreenText {
        match view {
            ResultView::Menu => render::result_menu(&self.cursor),
            ResultView::Voltages => render::voltage_view(&self.record, self.settings.precision),
            ResultView::Health => render::health_view(&self.record),
            ResultView::Conditions => render::conditions_view(&self.record),
            ResultView::DiscardConfirm => render::discard_confirm(),
        }
    }

    // Transitions

    fn on_main_menu(
        &mut self,
        event: ButtonEvent,
        tester: &mut impl LoadTester,
        panel: &mut impl Panel,
    ) {
        match event {
            ButtonEvent::Up => self.cursor.step(Direction::Up, MAIN_MENU_LINES),
            ButtonEvent::Down => self.cursor.step(Direction::Down, MAIN_MENU_LINES),
            ButtonEvent::Ok => match self.cursor.line() {
                1 => self.start_test(tester, panel),
                2 => {
                    self.reset_navigation();
                    self.state = InterfaceState::History(HistoryState::ScrollSlots);
                }
                3 => {
                    self.reset_navigation();
                    self.state = InterfaceState::Settings(SettingsState::Menu);
                }
                _ => {}
            },
            // BACK has nowhere to go from the top level.
            ButtonEvent::Back => {}
        }
    }

    /// Connectivity check, then the blocking test. The test owns the
    /// panel until it completes; afterwards the review menu opens on
    /// the fresh record.
    fn start_test(&mut self, tester: &mut impl LoadTester, panel: &mut impl Panel) {
        if !tester.battery_connected() {
            self.state = InterfaceState::Test(TestState::Error);
            return;
        }

        self.state = InterfaceState::Test(TestState::Running);
        self.record = tester.run_load_test(&self.settings, panel);
        self.source_slot = None;
        self.reset_navigation();
        self.state = InterfaceState::Test(TestState::Review(ResultView::Menu));
    }

    fn on_test(&mut self, state: TestState, event: ButtonEvent, history: &mut impl HistoryStore) {
        match state {
            TestState::Error | TestState::StorageFault => {
                if matches!(event, ButtonEvent::Ok | ButtonEvent::Back) {
                    self.to_main_menu();
                }
            }
            // Not event-driven: the test sequence runs to completion
            // inside `start_test` and is never resting here.
            TestState::Running => {}
            TestState::Review(view) => self.on_review(view, event, true, history),
            TestState::SaveConfirm => match event {
                ButtonEvent::Ok => {
                    self.reset_navigation();
                    self.state = InterfaceState::Test(TestState::SlotPicker);
                }
                ButtonEvent::Back => {
                    self.state = InterfaceState::Test(TestState::Review(ResultView::Menu));
                }
                _ => {}
            },
            TestState::SlotPicker => match event {
                ButtonEvent::Up | ButtonEvent::Down => self.scroll_slots(event),
                ButtonEvent::Ok => {
                    self.state = InterfaceState::Test(TestState::OverwriteConfirm);
                }
                ButtonEvent::Back => {
                    self.state = InterfaceState::Test(TestState::Review(ResultView::Menu));
                }
            },
            TestState::OverwriteConfirm => match event {
                ButtonEvent::Ok => {
                    match store_with_retry(history, self.slots.slot(), &self.record) {
                        Ok(()) => self.to_main_menu(),
                        Err(_) => self.state = InterfaceState::Test(TestState::StorageFault),
                    }
                }
                ButtonEvent::Back => {
                    self.state = InterfaceState::Test(TestState::SlotPicker);
                }
                _ => {}
            },
        }
    }

    fn on_history(
        &mut self,
        state: HistoryState,
        event: ButtonEvent,
        history: &mut impl HistoryStore,
    ) {
        match state {
            HistoryState::ScrollSlots => match event {
                ButtonEvent::Up | ButtonEvent::Down => self.scroll_slots(event),
                ButtonEvent::Ok => match history.load(self.slots.slot()) {
                    Ok(record) => {
                        self.record = record;
                        self.source_slot = Some(self.slots.slot());
                        self.cursor.reset();
                        self.state = InterfaceState::History(HistoryState::Review(ResultView::Menu));
                    }
                    Err(_) => {
                        self.state = InterfaceState::History(HistoryState::StorageFault);
                    }
                },
                ButtonEvent::Back => self.to_main_menu(),
            },
            HistoryState::Review(view) => self.on_review(view, event, false, history),
            HistoryState::StorageFault => {
                if matches!(event, ButtonEvent::Ok | ButtonEvent::Back) {
                    self.to_main_menu();
                }
            }
        }
    }

    /// The result-review chain shared by Test and History. `in_test`
    /// decides where BACK from the menu goes and which mode owns the
    /// sub-state.
    fn on_review(
        &mut self,
        view: ResultView,
        event: ButtonEvent,
        in_test: bool,
        history: &mut impl HistoryStore,
    ) {
        match view {
            ResultView::Menu => match event {
                ButtonEvent::Up => self.cursor.step(Direction::Up, RESULT_MENU_LINES),
                ButtonEvent::Down => self.cursor.step(Direction::Down, RESULT_MENU_LINES),
                ButtonEvent::Ok => {
                    let next = match self.cursor.line() {
                        1 => ResultView::Voltages,
                        2 => ResultView::Health,
                        3 => ResultView::Conditions,
                        _ => ResultView::DiscardConfirm,
                    };
                    self.set_review(next, in_test);
                }
                ButtonEvent::Back => {
                    if in_test {
                        self.state = InterfaceState::Test(TestState::SaveConfirm);
                    } else {
                        // Back to the slot list at the entry that was
                        // being reviewed.
                        self.cursor.reset();
                        self.state = InterfaceState::History(HistoryState::ScrollSlots);
                    }
                }
            },
            ResultView::Voltages | ResultView::Health | ResultView::Conditions => {
                if event == ButtonEvent::Back {
                    self.set_review(ResultView::Menu, in_test);
                }
            }
            ResultView::DiscardConfirm => match event {
                ButtonEvent::Ok => self.discard(history),
                ButtonEvent::Back => self.set_review(ResultView::Menu, in_test),
                _ => {}
            },
        }
    }

    fn set_review(&mut self, view: ResultView, in_test: bool) {
        self.state = if in_test {
            InterfaceState::Test(TestState::Review(view))
        } else {
            InterfaceState::History(HistoryState::Review(view))
        };
    }

    /// Zero the working record. A record that came from a history slot
    /// is zeroed there too, so the slot reads as empty from now on.
    fn discard(&mut self, history: &mut impl HistoryStore) {
        self.record = TestRecord::zeroed();
        if let Some(slot) = self.source_slot.take() {
            if store_with_retry(history, slot, &self.record).is_err() {
                self.state = InterfaceState::History(HistoryState::StorageFault);
                return;
            }
        }
        self.to_main_menu();
    }

    fn on_settings(&mut self, state: SettingsState, event: ButtonEvent) {
        match state {
            SettingsState::Menu => match event {
                ButtonEvent::Up => self.cursor.step(Direction::Up, SETTINGS_MENU_LINES),
                ButtonEvent::Down => self.cursor.step(Direction::Down, SETTINGS_MENU_LINES),
                ButtonEvent::Ok => match self.cursor.line() {
                    1 => self.settings.toggle_mode(),
                    2 => {
                        self.cursor.reset();
                        self.state = InterfaceState::Settings(SettingsState::LoadCurrentEdit);
                    }
                    3 => {
                        self.state = InterfaceState::Settings(SettingsState::PrecisionEdit);
                    }
                    _ => {}
                },
                ButtonEvent::Back => self.to_main_menu(),
            },
            SettingsState::LoadCurrentEdit => match event {
                ButtonEvent::Up => self.cursor.step_clamped(Direction::Up, CURRENT_EDIT_LINES),
                ButtonEvent::Down => self.cursor.step_clamped(Direction::Down, CURRENT_EDIT_LINES),
                ButtonEvent::Ok => self.settings.bump_digit(self.cursor.line()),
                ButtonEvent::Back => {
                    self.settings.commit_digits();
                    self.cursor.reset();
                    self.state = InterfaceState::Settings(SettingsState::Menu);
                }
            },
            SettingsState::PrecisionEdit => match event {
                ButtonEvent::Ok => self.settings.bump_precision(),
                ButtonEvent::Back => {
                    self.state = InterfaceState::Settings(SettingsState::Menu);
                }
                _ => {}
            },
        }
    }

    /// UP/DOWN in a slot list: the selection wraps over the 13 slots
    /// while the marker pins inside the 4-line window.
    fn scroll_slots(&mut self, event: ButtonEvent) {
        let dir = match event {
            ButtonEvent::Up => Direction::Up,
            _ => Direction::Down,
        };
        self.slots.step(dir);
        self.cursor.step_clamped(dir, SLOT_LIST_LINES);
    }

    /// Cursor to line 1, slot to 0. Runs on every return to a fresh
    /// top-level menu and after every terminal confirm.
    fn reset_navigation(&mut self) {
        self.cursor.reset();
        self.slots.reset();
    }

    fn to_main_menu(&mut self) {
        self.reset_navigation();
        self.state = InterfaceState::MainMenu;
    }
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::history::MemoryHistory;
    use crate::interface::BufferPanel;
    use crate::measure::ScriptedTester;
    use crate::record::{TestDate, TestMode};

    fn sample_record() -> TestRecord {
        TestRecord {
            unloaded_volts: [3.01, 3.0, 2.99, 3.02],
            loaded_volts: [2.85, 2.8, 2.75, 2.9],
            max_load_amps: 500,
            mode: TestMode::Manual,
            ambient_temp_c: 22,
            date: TestDate { year: 25, month: 3, day: 22 },
        }
    }

    struct Rig {
        interface: Interface,
        tester: ScriptedTester,
        history: MemoryHistory,
        panel: BufferPanel,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                interface: Interface::new(),
                tester: ScriptedTester::new(3.0, sample_record()),
                history: MemoryHistory::new(),
                panel: BufferPanel::new(),
            }
        }

        fn press(&mut self, event: ButtonEvent) {
            self.interface
                .handle_event(event, &mut self.tester, &mut self.history, &mut self.panel);
        }

        fn press_all(&mut self, events: &[ButtonEvent]) {
            for event in events {
                self.press(*event);
            }
        }
    }

    use ButtonEvent::{Back, Down, Ok as OkBtn, Up};

    #[test]
    fn main_menu_cursor_wraps() {
        let mut rig = Rig::new();
        rig.press(Up);
        assert_eq!(rig.interface.cursor_line(), 3);
        rig.press(Down);
        assert_eq!(rig.interface.cursor_line(), 1);
    }

    #[test]
    fn back_in_main_menu_is_noop() {
        let mut rig = Rig::new();
        rig.press(Back);
        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert_eq!(rig.interface.cursor_line(), 1);
    }

    #[test]
    fn ok_on_test_line_runs_test_into_review_menu() {
        let mut rig = Rig::new();
        rig.press(OkBtn);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::Review(ResultView::Menu))
        );
        assert_eq!(rig.tester.tests_run, 1);
        assert_eq!(rig.interface.record().unloaded_volts, sample_record().unloaded_volts);
    }

    #[test]
    fn ok_with_no_battery_shows_error_then_back_recovers() {
        let mut rig = Rig::new();
        rig.tester.pack_volts = 0.05;
        rig.press(OkBtn);
        assert_eq!(rig.interface.state(), InterfaceState::Test(TestState::Error));
        assert_eq!(rig.tester.tests_run, 0);

        // UP/DOWN only redisplay the error text.
        rig.press(Up);
        assert_eq!(rig.interface.state(), InterfaceState::Test(TestState::Error));

        rig.press(Back);
        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert_eq!(rig.interface.cursor_line(), 1);
        assert_eq!(rig.interface.selected_slot(), 0);
    }

    #[test]
    fn review_menu_opens_view_for_cursor_line() {
        let mut rig = Rig::new();
        rig.press(OkBtn); // run test
        rig.press(Down); // cursor to Health Ratings
        rig.press(OkBtn);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::Review(ResultView::Health))
        );
        rig.press(Back);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::Review(ResultView::Menu))
        );
    }

    #[test]
    fn invalid_events_in_views_are_idempotent() {
        let mut rig = Rig::new();
        rig.press_all(&[OkBtn, OkBtn]); // test, open voltage view
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::Review(ResultView::Voltages))
        );

        let frame = rig.panel.last.clone();
        rig.press(Up);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::Review(ResultView::Voltages))
        );
        assert_eq!(rig.panel.last, frame);

        rig.press(OkBtn);
        assert_eq!(rig.panel.last, frame);
    }

    #[test]
    fn save_flow_writes_picked_slot_and_resets() {
        let mut rig = Rig::new();
        rig.press(OkBtn); // run test -> review menu
        rig.press(Back); // -> save confirm
        assert_eq!(rig.interface.state(), InterfaceState::Test(TestState::SaveConfirm));
        rig.press(OkBtn); // -> slot picker at slot 0
        assert_eq!(rig.interface.state(), InterfaceState::Test(TestState::SlotPicker));
        assert_eq!(rig.interface.selected_slot(), 0);

        rig.press(Up); // wraps to slot 12
        assert_eq!(rig.interface.selected_slot(), 12);

        rig.press(OkBtn); // -> overwrite confirm
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::OverwriteConfirm)
        );
        rig.press(OkBtn); // persist + back to main menu

        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert_eq!(rig.interface.cursor_line(), 1);
        assert_eq!(rig.interface.selected_slot(), 0);
        assert_eq!(rig.history.load(12).unwrap(), sample_record());
    }

    #[test]
    fn overwrite_back_returns_to_slot_picker() {
        let mut rig = Rig::new();
        rig.press_all(&[OkBtn, Back, OkBtn, Down, OkBtn]);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::OverwriteConfirm)
        );
        rig.press(Back);
        assert_eq!(rig.interface.state(), InterfaceState::Test(TestState::SlotPicker));
        // The slot picked before the confirm is still selected.
        assert_eq!(rig.interface.selected_slot(), 1);
    }

    #[test]
    fn discard_fresh_test_zeroes_nothing_in_history() {
        let mut rig = Rig::new();
        rig.history.store(4, &sample_record()).unwrap();

        rig.press(OkBtn); // run test
        rig.press_all(&[Down, Down, Down]); // cursor to Discard Results
        rig.press(OkBtn); // -> discard confirm
        rig.press(OkBtn); // confirm

        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert!(rig.interface.record().is_empty());
        // History untouched by discarding a fresh, unsaved test.
        assert_eq!(rig.history.load(4).unwrap(), sample_record());
    }

    #[test]
    fn history_browse_loads_slot_into_review() {
        let mut rig = Rig::new();
        rig.history.store(4, &sample_record()).unwrap();

        rig.press(Down); // cursor to View History
        rig.press(OkBtn);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::History(HistoryState::ScrollSlots)
        );
        assert_eq!(rig.interface.selected_slot(), 0);

        rig.press_all(&[Down, Down, Down, Down]); // slot 4
        assert_eq!(rig.interface.selected_slot(), 4);
        rig.press(OkBtn);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::History(HistoryState::Review(ResultView::Menu))
        );
        assert_eq!(*rig.interface.record(), sample_record());

        // BACK from the review menu returns to the slot list here,
        // not to a save prompt, with the reviewed slot still selected.
        rig.press(Back);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::History(HistoryState::ScrollSlots)
        );
        assert_eq!(rig.interface.selected_slot(), 4);
    }

    #[test]
    fn discard_from_history_zeroes_the_slot() {
        let mut rig = Rig::new();
        rig.history.store(2, &sample_record()).unwrap();

        rig.press_all(&[Down, OkBtn]); // view history
        rig.press_all(&[Down, Down]); // slot 2
        rig.press(OkBtn); // load into review
        rig.press_all(&[Down, Down, Down, OkBtn]); // discard confirm
        rig.press(OkBtn); // confirm

        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert!(rig.history.load(2).unwrap().is_empty());
    }

    #[test]
    fn history_back_from_slot_list_resets_navigation() {
        let mut rig = Rig::new();
        rig.press_all(&[Down, OkBtn, Down, Down]);
        assert_eq!(rig.interface.selected_slot(), 2);
        rig.press(Back);
        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
        assert_eq!(rig.interface.selected_slot(), 0);
        assert_eq!(rig.interface.cursor_line(), 1);
    }

    #[test]
    fn settings_toggle_and_edits() {
        let mut rig = Rig::new();
        rig.press_all(&[Up, OkBtn]); // cursor wraps to Settings, enter
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Settings(SettingsState::Menu)
        );

        rig.press(OkBtn); // toggle mode on line 1
        assert_eq!(rig.interface.settings().mode, TestMode::Automated);

        rig.press(Down);
        rig.press(OkBtn); // enter load current editor
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Settings(SettingsState::LoadCurrentEdit)
        );
        rig.press(OkBtn); // hundreds digit 5 wraps to 0
        rig.press(Back); // commit -> 0*100 + 0 + 0
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Settings(SettingsState::Menu)
        );
        assert_eq!(rig.interface.settings().target_amps, 0);

        rig.press_all(&[Down, Down, OkBtn]); // precision editor
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Settings(SettingsState::PrecisionEdit)
        );
        rig.press(OkBtn); // 3 wraps to 0
        assert_eq!(rig.interface.settings().precision, 0);
        rig.press(Back);
        rig.press(Back); // leave settings
        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
    }

    /// Store that always fails, for the fault path.
    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn load(&mut self, _slot: u8) -> Result<TestRecord, Error> {
            Err(Error::Storage)
        }

        fn store(&mut self, _slot: u8, _record: &TestRecord) -> Result<(), Error> {
            Err(Error::Storage)
        }
    }

    #[test]
    fn failed_save_lands_on_storage_fault_screen() {
        let mut rig = Rig::new();
        rig.press_all(&[OkBtn, Back, OkBtn]); // test, save confirm, slot picker
        let mut broken = BrokenStore;
        rig.interface
            .handle_event(OkBtn, &mut rig.tester, &mut broken, &mut rig.panel);
        rig.interface
            .handle_event(OkBtn, &mut rig.tester, &mut broken, &mut rig.panel);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::Test(TestState::StorageFault)
        );
        rig.press(OkBtn);
        assert_eq!(rig.interface.state(), InterfaceState::MainMenu);
    }

    #[test]
    fn failed_history_load_lands_on_storage_fault_screen() {
        let mut rig = Rig::new();
        rig.press_all(&[Down, OkBtn]);
        let mut broken = BrokenStore;
        rig.interface
            .handle_event(OkBtn, &mut rig.tester, &mut broken, &mut rig.panel);
        assert_eq!(
            rig.interface.state(),
            InterfaceState::History(HistoryState::StorageFault)
        );
    }

    #[test]
    fn cursor_and_slot_stay_in_range_under_event_storm() {
        let mut rig = Rig::new();
        rig.history.store(0, &sample_record()).unwrap();
        let script = [OkBtn, Down, Up, Back, Down, OkBtn, Up, Up, Back, Back, Down];
        for round in 0..200 {
            rig.press(script[round % script.len()]);
            assert!((1..=4).contains(&rig.interface.cursor_line()));
            assert!(rig.interface.selected_slot() < 13);
        }
    }

    #[test]
    fn every_event_redraws() {
        let mut rig = Rig::new();
        let before = rig.panel.frames;
        rig.press(Back); // no-op event still re-renders
        assert_eq!(rig.panel.frames, before + 1);
    }
}
