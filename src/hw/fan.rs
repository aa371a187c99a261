//! Cooling fan on a PWM channel.
//!
//! The fan runs flat out only while a test is drawing load current;
//! duty is a percentage so callers never see timer counts.

use embassy_nrf::pwm::{Instance, Prescaler, SimplePwm};

/// Full scale for the PWM compare register, so duty maps 1:1 to
/// percent.
const MAX_DUTY: u16 = 100;

pub struct Fan<'d, T: Instance> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: Instance> Fan<'d, T> {
    /// Takes a single-channel PWM already routed to the fan pin.
    pub fn new(mut pwm: SimplePwm<'d, T>) -> Self {
        pwm.set_prescaler(Prescaler::Div16);
        pwm.set_max_duty(MAX_DUTY);
        pwm.set_duty(0, 0);
        Self { pwm }
    }

    /// Set fan speed as a percentage of full scale.
    pub fn set_percent(&mut self, duty: u8) {
        self.pwm.set_duty(0, u16::from(duty).min(MAX_DUTY));
    }
}
