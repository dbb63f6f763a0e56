//! Motor output implementations
//!
//! - PWM + direction pin for H-bridge drivers

pub mod pwm;

pub use pwm::{PwmMotor, PwmMotorConfig};
