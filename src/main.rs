//! Embedded entry point for the quad-pack load analyzer (nRF52840).
//!
//! Wiring: four button tasks feed debounced events into a capacity-1
//! channel; the main task owns the interface controller and all the
//! collaborators (analyzer, flash history, LCD) and drains the channel
//! one event at a time. Per-event handling is atomic because nothing
//! else runs in this task, and a lock-out delay after each event keeps
//! bounce from re-entering the controller.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::temp::{self, Temp};
use embassy_nrf::{bind_interrupts, peripherals, saadc};
use embassy_time::{Delay, Duration, Timer};

use quadpack::config::HANDLER_DEBOUNCE_MS;
use quadpack::hw::analyzer::Analyzer;
use quadpack::hw::fan::Fan;
use quadpack::hw::flash::FlashHistory;
use quadpack::hw::lcd::CharacterLcd;
use quadpack::hw::stepper::Stepper;
use quadpack::interface::buttons::{button_task, EventChannel};
use quadpack::interface::controller::Interface;
use quadpack::interface::{ButtonEvent, Panel};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    TEMP => temp::InterruptHandler;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

static EVENTS: EventChannel = EventChannel::new();

#[embassy_executor::task(pool_size = 4)]
async fn button(pin: AnyPin, event: ButtonEvent) {
    button_task(pin, event, &EVENTS.sender()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("quadpack analyzer starting");

    // Character LCD on SPI3, chip select framed per byte.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M1;
    let spi = Spim::new_txonly(p.SPI3, Irqs, p.P0_26, p.P0_27, spi_config);
    let cs = Output::new(p.P0_06, Level::High, OutputDrive::Standard);
    let mut lcd = match CharacterLcd::new(spi, cs, Delay) {
        Ok(lcd) => lcd,
        Err(_) => {
            defmt::panic!("LCD did not initialise");
        }
    };

    // Measurement peripherals.
    let fan = Fan::new(SimplePwm::new_1ch(p.PWM0, p.P0_08));
    let buzzer = Output::new(p.P0_07, Level::Low, OutputDrive::Standard);
    let stepper = Stepper::new(
        Output::new(p.P1_01.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P1_02.degrade(), Level::Low, OutputDrive::Standard),
    );
    let temp = Temp::new(p.TEMP, Irqs);
    let mut analyzer = Analyzer::new(
        Irqs, p.SAADC, p.P0_02, p.P0_03, p.P0_04, p.P0_05, p.P0_28, fan, buzzer, stepper, temp,
    );

    // History records in the reserved internal-flash pages.
    let mut history = FlashHistory::new(Nvmc::new(p.NVMC));

    // One debounced task per button.
    unwrap!(spawner.spawn(button(p.P0_11.degrade(), ButtonEvent::Ok)));
    unwrap!(spawner.spawn(button(p.P0_12.degrade(), ButtonEvent::Back)));
    unwrap!(spawner.spawn(button(p.P0_24.degrade(), ButtonEvent::Up)));
    unwrap!(spawner.spawn(button(p.P0_25.degrade(), ButtonEvent::Down)));

    // Power-on state: main menu, cursor on line 1.
    let mut interface = Interface::new();
    lcd.show(&interface.render_current());

    loop {
        let event = EVENTS.receive().await;
        interface.handle_event(event, &mut analyzer, &mut history, &mut lcd);

        // Presses during handling were dropped by the full channel;
        // wait out the lock-out window before accepting the next one.
        Timer::after(Duration::from_millis(HANDLER_DEBOUNCE_MS)).await;
    }
}
