//! GPIO button input with async debouncing.
//!
//! Four physical buttons (active-low with internal pull-up, falling
//! edge triggered):
//!   - OK     - confirm / enter
//!   - BACK   - return to the enclosing menu
//!   - UP     - scroll up
//!   - DOWN   - scroll down
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and offers a `ButtonEvent` to the capacity-1 event
//! channel. The controller consumes events in the main task; at most
//! one press is ever pending, and presses that land while one is
//! pending are dropped.

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::interface::ButtonEvent;
use defmt::{debug, info};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Duration, Timer};

/// The single pending-event slot between the button tasks and the
/// controller loop.
pub type EventChannel = Channel<CriticalSectionRawMutex, ButtonEvent, 1>;
pub type EventSender = Sender<'static, CriticalSectionRawMutex, ButtonEvent, 1>;

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, offers the event,
/// then waits for release before repeating.
pub async fn button_task(pin: AnyPin, event: ButtonEvent, tx: &EventSender) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("Button: {}", event);
            if tx.try_send(event).is_err() {
                debug!("press dropped, one already pending");
            }

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
