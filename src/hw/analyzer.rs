//! SAADC-backed measurement service - the embedded [`LoadTester`].
//!
//! Cell 1 sits against ground, so it is read single-ended for the full
//! conversion range; cells 2-4 are read differentially against the
//! adjacent lower tap. Load current comes from the shunt amplifier
//! output. The SAADC is reconfigured per conversion, matching the one
//! channel it can route at a time.
//!
//! [`Analyzer::run_load_test`] is deliberately blocking: the test owns
//! the processor and the display until the operator (or the stepper)
//! has ramped the load to the target and released it again.

use defmt::info;
use embassy_futures::block_on;
use embassy_nrf::gpio::Output;
use embassy_nrf::interrupt::typelevel::{Binding, SAADC as SaadcIrq};
use embassy_nrf::pwm::Instance as PwmInstance;
use embassy_nrf::saadc::{ChannelConfig, Config, InterruptHandler, Saadc};
use embassy_nrf::temp::Temp;
use embassy_nrf::peripherals;
use embassy_time::{block_for, Duration};

use crate::config::{
    ADC_DIFFERENTIAL_COUNTS, ADC_SINGLE_ENDED_COUNTS, ADC_VREF_VOLTS, AMP_GAIN,
    BATTERY_DIVIDER_RATIO, BUZZER_BEEP_MS, CURRENT_DIVIDER_RATIO, FAN_TEST_DUTY_PERCENT,
    LOAD_CURRENT_FLOOR_AMPS, LOAD_RELEASE_THRESHOLD_AMPS, RAMP_POLL_MS, SHUNT_RESISTANCE_OHMS,
};
use crate::hw::fan::Fan;
use crate::hw::stepper::{StepDirection, Stepper};
use crate::interface::{render, Panel};
use crate::measure::LoadTester;
use crate::record::{TestDate, TestMode, TestRecord};
use crate::settings::Settings;

pub struct Analyzer<'d, I, T>
where
    I: Binding<SaadcIrq, InterruptHandler> + Copy,
    T: PwmInstance,
{
    irqs: I,
    saadc: peripherals::SAADC,
    // Cell taps B1..B4 and the current-sense amplifier output.
    b1: peripherals::P0_02,
    b2: peripherals::P0_03,
    b3: peripherals::P0_04,
    b4: peripherals::P0_05,
    isense: peripherals::P0_28,
    fan: Fan<'d, T>,
    buzzer: Output<'d>,
    stepper: Stepper<'d>,
    temp: Temp<'d>,
}

impl<'d, I, T> Analyzer<'d, I, T>
where
    I: Binding<SaadcIrq, InterruptHandler> + Copy,
    T: PwmInstance,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        irqs: I,
        saadc: peripherals::SAADC,
        b1: peripherals::P0_02,
        b2: peripherals::P0_03,
        b3: peripherals::P0_04,
        b4: peripherals::P0_05,
        isense: peripherals::P0_28,
        fan: Fan<'d, T>,
        buzzer: Output<'d>,
        stepper: Stepper<'d>,
        temp: Temp<'d>,
    ) -> Self {
        Self {
            irqs,
            saadc,
            b1,
            b2,
            b3,
            b4,
            isense,
            fan,
            buzzer,
            stepper,
            temp,
        }
    }

    /// One conversion on a freshly configured channel.
    fn convert(saadc: &mut peripherals::SAADC, irqs: I, channel: ChannelConfig<'_>) -> i16 {
        let mut adc = Saadc::new(&mut *saadc, irqs, Config::default(), [channel]);
        let mut buf = [0i16; 1];
        block_on(adc.sample(&mut buf));
        buf[0]
    }

    fn single_ended_volts(raw: i16) -> f32 {
        f32::from(raw.max(0)) * ADC_VREF_VOLTS / ADC_SINGLE_ENDED_COUNTS
    }

    fn differential_volts(raw: i16) -> f32 {
        f32::from(raw.max(0)) * ADC_VREF_VOLTS / ADC_DIFFERENTIAL_COUNTS
    }

    /// Voltage across one cell, divider ratio undone.
    fn cell_volts(&mut self, cell: usize) -> f32 {
        let volts = match cell {
            0 => Self::single_ended_volts(Self::convert(
                &mut self.saadc,
                self.irqs,
                ChannelConfig::single_ended(&mut self.b1),
            )),
            1 => Self::differential_volts(Self::convert(
                &mut self.saadc,
                self.irqs,
                ChannelConfig::differential(&mut self.b2, &mut self.b1),
            )),
            2 => Self::differential_volts(Self::convert(
                &mut self.saadc,
                self.irqs,
                ChannelConfig::differential(&mut self.b3, &mut self.b2),
            )),
            _ => Self::differential_volts(Self::convert(
                &mut self.saadc,
                self.irqs,
                ChannelConfig::differential(&mut self.b4, &mut self.b3),
            )),
        };
        volts * BATTERY_DIVIDER_RATIO
    }

    fn all_cell_volts(&mut self) -> [f32; 4] {
        [
            self.cell_volts(0),
            self.cell_volts(1),
            self.cell_volts(2),
            self.cell_volts(3),
        ]
    }

    /// Load current through the shunt, amplifier gain and divider
    /// undone. Readings under the noise floor report as 0 A.
    fn load_current(&mut self) -> f32 {
        let raw = Self::convert(
            &mut self.saadc,
            self.irqs,
            ChannelConfig::single_ended(&mut self.isense),
        );
        let volts = Self::single_ended_volts(raw);
        let amps = volts * CURRENT_DIVIDER_RATIO / (AMP_GAIN * SHUNT_RESISTANCE_OHMS);
        if amps < LOAD_CURRENT_FLOOR_AMPS {
            0.0
        } else {
            amps
        }
    }

    fn ambient_temp_c(&mut self) -> u8 {
        let celsius: i32 = block_on(self.temp.read()).to_num();
        celsius.clamp(0, i32::from(u8::MAX)) as u8
    }
}

impl<'d, I, T> LoadTester for Analyzer<'d, I, T>
where
    I: Binding<SaadcIrq, InterruptHandler> + Copy,
    T: PwmInstance,
{
    fn pack_voltage(&mut self) -> f32 {
        let raw = Self::convert(
            &mut self.saadc,
            self.irqs,
            ChannelConfig::single_ended(&mut self.b4),
        );
        Self::single_ended_volts(raw) * BATTERY_DIVIDER_RATIO
    }

    fn run_load_test(&mut self, settings: &Settings, panel: &mut impl Panel) -> TestRecord {
        info!("load test started, target {}A", settings.target_amps);

        // Unloaded readings first, then spin the fan up for the ramp.
        let unloaded_volts = self.all_cell_volts();
        self.fan.set_percent(FAN_TEST_DUTY_PERCENT);

        let target = f32::from(settings.target_amps);
        let mut amps = self.load_current();
        let mut max_amps = amps;
        panel.show(&render::ramp_prompt(amps, settings.mode));

        // Ramp until the target current is reached. In manual mode the
        // operator winds the knob; in automated mode the stepper winds
        // the pile one step per poll.
        while amps < target {
            if settings.mode == TestMode::Automated {
                self.stepper.step(StepDirection::Increase);
            }
            block_for(Duration::from_millis(RAMP_POLL_MS));
            amps = self.load_current();
            if amps > max_amps {
                max_amps = amps;
            }
            panel.show(&render::ramp_prompt(amps, settings.mode));
        }

        // Loaded readings at the target, then let the pack settle.
        let loaded_volts = self.all_cell_volts();
        block_for(Duration::from_millis(1000));
        info!("loaded readings captured at {}A", amps);

        // Beep until the load is released.
        panel.show(&render::release_prompt(amps, settings.mode));
        while amps > LOAD_RELEASE_THRESHOLD_AMPS {
            if settings.mode == TestMode::Automated {
                self.stepper.step(StepDirection::Decrease);
            }
            self.buzzer.set_high();
            block_for(Duration::from_millis(BUZZER_BEEP_MS));
            self.buzzer.set_low();
            block_for(Duration::from_millis(BUZZER_BEEP_MS));
            amps = self.load_current();
            panel.show(&render::release_prompt(amps, settings.mode));
        }

        self.fan.set_percent(0);
        info!("load test complete");

        TestRecord {
            unloaded_volts,
            loaded_volts,
            max_load_amps: max_amps as u16,
            mode: settings.mode,
            ambient_temp_c: self.ambient_temp_c(),
            // No RTC fitted; the date stays at the sentinel.
            date: TestDate::default(),
        }
    }
}
