//! PWM + direction motor output
//!
//! Drives an H-bridge from a signed effort: the sign selects the direction
//! pin level, the magnitude sets the PWM duty cycle.
//!
//! - Effort is clamped to `-1.0..=1.0`
//! - Non-zero efforts are scaled into `min_duty..=100%` so small commands
//!   still overcome the bridge dead zone
//! - Pin and PWM errors set a fault flag instead of propagating
//!
//! ```ignore
//! let mut motor = PwmMotor::new(pwm_channel, dir_pin, PwmMotorConfig::default());
//! let mut lift = LiftController::new(encoder, &mut motor, config);
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use hoist_core::traits::MotorOutput;

/// PWM motor configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmMotorConfig {
    /// Minimum duty cycle percentage (below this the motor won't move)
    pub min_duty: u8,
    /// Reverse the direction pin
    pub inverted: bool,
}

impl Default for PwmMotorConfig {
    fn default() -> Self {
        Self {
            min_duty: 8,
            inverted: false,
        }
    }
}

/// Motor output on a PWM channel and a direction pin
pub struct PwmMotor<P, D> {
    pwm: P,
    direction: D,
    config: PwmMotorConfig,
    /// Last commanded effort after clamping
    effort: f32,
    /// A pin or PWM write failed
    fault: bool,
}

impl<P: SetDutyCycle, D: OutputPin> PwmMotor<P, D> {
    /// Create a motor output, starting stopped
    pub fn new(pwm: P, direction: D, config: PwmMotorConfig) -> Self {
        let mut motor = Self {
            pwm,
            direction,
            config,
            effort: 0.0,
            fault: false,
        };
        motor.set(0.0);
        motor
    }

    /// Get the configuration
    pub fn config(&self) -> &PwmMotorConfig {
        &self.config
    }

    /// Whether a write has failed
    pub fn is_faulted(&self) -> bool {
        self.fault
    }

    /// Clear the fault flag
    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Give the PWM channel and direction pin back
    pub fn release(self) -> (P, D) {
        (self.pwm, self.direction)
    }

    /// Scale an effort magnitude to a duty cycle in `0..=max`
    ///
    /// Maps `(0, 1]` to `[min_duty, 100]` percent; zero stays off.
    fn scale_duty(&self, magnitude: f32) -> u16 {
        let max = self.pwm.max_duty_cycle() as f32;
        if magnitude <= 0.0 {
            return 0;
        }
        let min = self.config.min_duty.min(100) as f32 / 100.0;
        let scaled = min + magnitude * (1.0 - min);
        let duty = scaled * max;
        if duty >= max {
            self.pwm.max_duty_cycle()
        } else {
            // Round to nearest
            (duty + 0.5) as u16
        }
    }

    fn record<E>(&mut self, result: Result<(), E>) {
        if result.is_err() {
            #[cfg(feature = "defmt")]
            if !self.fault {
                defmt::warn!("pwm motor: output write failed");
            }
            self.fault = true;
        }
    }
}

impl<P: SetDutyCycle, D: OutputPin> MotorOutput for PwmMotor<P, D> {
    fn set(&mut self, effort: f32) {
        let effort = if effort > 1.0 {
            1.0
        } else if effort < -1.0 {
            -1.0
        } else if effort.is_nan() {
            0.0
        } else {
            effort
        };
        self.effort = effort;

        let forward = effort >= 0.0;
        let level = if forward != self.config.inverted {
            self.direction.set_high()
        } else {
            self.direction.set_low()
        };
        self.record(level);

        let magnitude = if forward { effort } else { -effort };
        let duty = self.scale_duty(magnitude);
        let written = self.pwm.set_duty_cycle(duty);
        self.record(written);
    }

    fn get(&self) -> f32 {
        self.effort
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorKind;

    /// PWM channel with a 0..=1000 duty range
    struct Channel {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for Channel {
        type Error = Infallible;
    }

    impl SetDutyCycle for Channel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    struct Pin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    struct BrokenPin;

    impl embedded_hal::digital::ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    fn motor(config: PwmMotorConfig) -> PwmMotor<Channel, Pin> {
        PwmMotor::new(Channel { duty: 500 }, Pin { high: false }, config)
    }

    #[test]
    fn test_starts_stopped() {
        let motor = motor(PwmMotorConfig::default());
        assert_eq!(motor.pwm.duty, 0);
        assert_eq!(motor.get(), 0.0);
        assert!(!motor.is_faulted());
    }

    #[test]
    fn test_direction_follows_sign() {
        let mut motor = motor(PwmMotorConfig {
            min_duty: 0,
            inverted: false,
        });

        motor.set(0.5);
        assert!(motor.direction.high);
        assert_eq!(motor.pwm.duty, 500);

        motor.set(-0.25);
        assert!(!motor.direction.high);
        assert_eq!(motor.pwm.duty, 250);
    }

    #[test]
    fn test_inverted_direction() {
        let mut motor = motor(PwmMotorConfig {
            min_duty: 0,
            inverted: true,
        });

        motor.set(0.5);
        assert!(!motor.direction.high);
    }

    #[test]
    fn test_min_duty_scaling() {
        let mut motor = motor(PwmMotorConfig {
            min_duty: 20,
            inverted: false,
        });

        motor.set(0.0);
        assert_eq!(motor.pwm.duty, 0);

        motor.set(1.0);
        assert_eq!(motor.pwm.duty, 1000);

        // 20% + 0.5 * 80% = 60%
        motor.set(0.5);
        assert_eq!(motor.pwm.duty, 600);
    }

    #[test]
    fn test_effort_is_clamped() {
        let mut motor = motor(PwmMotorConfig::default());

        motor.set(3.0);
        assert_eq!(motor.get(), 1.0);
        assert_eq!(motor.pwm.duty, 1000);

        motor.set(-7.0);
        assert_eq!(motor.get(), -1.0);

        motor.set(f32::NAN);
        assert_eq!(motor.get(), 0.0);
        assert_eq!(motor.pwm.duty, 0);
    }

    #[test]
    fn test_pin_error_sets_fault() {
        let mut motor = PwmMotor::new(Channel { duty: 0 }, BrokenPin, PwmMotorConfig::default());
        assert!(motor.is_faulted());

        // Duty is still written
        motor.set(1.0);
        assert_eq!(motor.pwm.duty, 1000);

        motor.clear_fault();
        assert!(!motor.is_faulted());
    }
}
