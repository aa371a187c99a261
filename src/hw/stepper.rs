//! Stepper driver for the motorised carbon pile (automated tests).
//!
//! STEP/DIR interface: direction is latched on the DIR pin, one load
//! increment per rising edge on STEP.

use embassy_nrf::gpio::Output;
use embassy_time::{block_for, Duration};

/// Half of the STEP pulse period (µs).
const STEP_HALF_PERIOD_US: u64 = 5;

/// Which way to drive the carbon pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Wind the pile in, drawing more current.
    Increase,
    /// Back the pile off, releasing the load.
    Decrease,
}

pub struct Stepper<'d> {
    step: Output<'d>,
    dir: Output<'d>,
}

impl<'d> Stepper<'d> {
    pub fn new(step: Output<'d>, dir: Output<'d>) -> Self {
        Self { step, dir }
    }

    /// One step of the motor in the given direction.
    pub fn step(&mut self, direction: StepDirection) {
        match direction {
            StepDirection::Increase => self.dir.set_high(),
            StepDirection::Decrease => self.dir.set_low(),
        }
        self.step.set_high();
        block_for(Duration::from_micros(STEP_HALF_PERIOD_US));
        self.step.set_low();
        block_for(Duration::from_micros(STEP_HALF_PERIOD_US));
    }
}
